use crate::booking::BookingGuard;
use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::mailer::{self, Mailer};
use crate::models::{BookingRequest, ContactRequest, LeadProfile, LeadRecord, ScoreResult, Scalar};
use crate::scoring;
use crate::sheets::SheetsClient;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Tabular store client (Google Sheets values API).
    pub sheets: Arc<SheetsClient>,
    /// Double-booking guard over the bookings ledger.
    pub booking: BookingGuard,
    /// Transactional mailer; `None` when SMTP is not configured.
    pub mailer: Option<Arc<Mailer>>,
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "lead-intake-api",
            "version": "0.1.0"
        })),
    )
}

/// POST /api/v1/score
///
/// Pure scoring endpoint: maps a lead profile to a score and product
/// recommendations. Always succeeds; missing fields score zero.
pub async fn score_lead(Json(profile): Json<LeadProfile>) -> Json<ScoreResult> {
    let result = scoring::score(&profile);
    tracing::debug!(
        "Scored profile: {} points, {} recommendation(s)",
        result.score,
        result.recommendations.len()
    );
    Json(result)
}

/// POST /api/v1/leads
///
/// Appends the full questionnaire row to the Leads sheet. If the client did
/// not send a precomputed `lead_score`, the scorer fills it in from the
/// record's own answers before the row is written.
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    Json(mut record): Json<LeadRecord>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("Received lead data: {}", record.full_name());

    let result = ensure_scored(&mut record);

    let timestamp = iso_timestamp();
    let row = record.to_row(&timestamp);
    state
        .sheets
        .append_row(&state.config.leads_range, &row)
        .await
        .context("Failed to save lead row")?;

    tracing::info!(
        "Lead saved: {} | score: {} | source: {}",
        record.full_name(),
        record.lead_score,
        if record.utm_source.is_empty() {
            "direct"
        } else {
            record.utm_source.as_str()
        }
    );

    Ok(Json(json!({
        "success": true,
        "message": "Lead data saved successfully",
        "leadScore": record.lead_score,
        "recommendations": result.recommendations,
    })))
}

/// POST /api/v1/bookings
///
/// Books an appointment slot. The guard rejects an exact `appointment_date`
/// collision with 409 `TIME_SLOT_TAKEN` and zero writes. On success the
/// notification emails are dispatched in the background and the full lead
/// row is appended best-effort - a sheet failure at that point is logged but
/// the booking is already confirmed.
pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    Json(mut booking): Json<BookingRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    tracing::info!("Booking appointment for: {}", booking.lead.full_name());

    state
        .booking
        .book(
            booking.appointment_date.as_str(),
            booking.appointment_formatted.as_str(),
        )
        .await?;

    ensure_scored(&mut booking.lead);
    if booking.lead.booking_type.is_empty() {
        booking.lead.booking_type = booking.session_type.clone();
    }

    dispatch_booking_emails(&state, &booking);

    // The slot is reserved; the archival row is best-effort.
    let timestamp = iso_timestamp();
    let mut row = booking.lead.to_row(&timestamp);
    row.push(format!("BOOKED: {}", booking.appointment_formatted));
    if let Err(e) = state.sheets.append_row(&state.config.leads_range, &row).await {
        tracing::error!("Failed to save booking lead row (booking still confirmed): {}", e);
    }

    Ok(Json(json!({
        "success": true,
        "message": "Appointment booked successfully",
    })))
}

/// POST /api/v1/contact
///
/// Contact form submission: notifies the owner (reply-to set to the lead)
/// and sends an auto-reply back. The auto-reply is fire-and-forget.
pub async fn contact(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if request.name.is_empty() || request.email.is_empty() {
        return Err(AppError::BadRequest(
            "name and email are required".to_string(),
        ));
    }

    tracing::info!(
        "Contact form submission from: {} {}",
        request.name,
        request.email
    );

    let Some(mailer) = state.mailer.clone() else {
        return Err(AppError::NotifyError(
            "Email delivery is not configured".to_string(),
        ));
    };

    let (subject, html) = mailer::contact_owner_email(&request);
    mailer
        .send(
            mailer.owner_email(),
            &subject,
            html,
            Some(request.email.as_str()),
        )
        .await
        .context("Failed to notify owner of contact form submission")?;

    let (reply_subject, reply_html) = mailer::contact_auto_reply_email(&request);
    let to = request.email.to_string();
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, &reply_subject, reply_html, None).await {
            tracing::warn!("Failed to send contact auto-reply to {}: {}", to, e);
        }
    });

    Ok(Json(json!({
        "success": true,
        "message": "Message sent successfully",
    })))
}

/// Fill in `lead_score` from the record's own answers unless the client
/// already supplied one, and return the score result either way.
fn ensure_scored(record: &mut LeadRecord) -> ScoreResult {
    let result = scoring::score(&record.profile());
    if record.lead_score.is_empty() {
        record.lead_score = Scalar::new(result.score.to_string());
    }
    result
}

/// Spawn owner notification and lead confirmation emails (non-blocking).
///
/// Email failures must not affect the booking outcome already returned to
/// the caller; they are logged for manual follow-up.
fn dispatch_booking_emails(state: &AppState, booking: &BookingRequest) {
    let Some(mailer) = state.mailer.clone() else {
        tracing::warn!("SMTP not configured - skipping booking notification emails");
        return;
    };

    let (owner_subject, owner_html) = mailer::booking_owner_email(booking);
    let (lead_subject, lead_html) = mailer::booking_confirmation_email(booking);
    let lead_email = booking.lead.lead_email.to_string();

    tokio::spawn(async move {
        let owner = mailer.owner_email().to_string();
        if let Err(e) = mailer.send(&owner, &owner_subject, owner_html, None).await {
            tracing::error!("Failed to send booking notification to owner: {}", e);
        }

        if lead_email.trim().is_empty() {
            tracing::warn!("Booking has no lead email - skipping confirmation");
            return;
        }
        if let Err(e) = mailer.send(&lead_email, &lead_subject, lead_html, None).await {
            tracing::error!(
                "Failed to send booking confirmation to {}: {}",
                lead_email,
                e
            );
        }
    });
}

/// RFC 3339 timestamp with millisecond precision, matching the format the
/// chatbot client writes into `appointment_date`.
fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
