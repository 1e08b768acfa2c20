//! Transactional email delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Delivery is
//! fire-and-forget from the booking core's perspective: a failed send is
//! logged so the operator can notify the lead manually, but it never changes
//! a booking outcome that was already decided.

use crate::config::SmtpConfig;
use crate::errors::AppError;
use crate::models::{BookingRequest, ContactRequest};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub struct Mailer {
    config: SmtpConfig,
}

impl Mailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub fn owner_email(&self) -> &str {
        &self.config.owner_email
    }

    /// Send one HTML email. `reply_to` is set on contact notifications so the
    /// owner can answer the lead directly.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html: String,
        reply_to: Option<&str>,
    ) -> Result<(), AppError> {
        let mut builder = Message::builder()
            .from(
                self.config
                    .from_address
                    .parse()
                    .map_err(|e| AppError::NotifyError(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| AppError::NotifyError(format!("Invalid recipient '{}': {}", to, e)))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        if let Some(addr) = reply_to {
            builder = builder.reply_to(addr.parse().map_err(|e| {
                AppError::NotifyError(format!("Invalid reply-to '{}': {}", addr, e))
            })?);
        }

        let email = builder
            .body(html)
            .map_err(|e| AppError::NotifyError(format!("Failed to build message: {}", e)))?;

        let mut transport =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
                .map_err(|e| AppError::NotifyError(format!("SMTP relay setup failed: {}", e)))?
                .port(self.config.port);

        if let (Some(user), Some(pass)) = (&self.config.user, &self.config.password) {
            transport = transport.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport
            .build()
            .send(email)
            .await
            .map_err(|e| AppError::NotifyError(format!("SMTP send failed: {}", e)))?;

        tracing::info!("Email sent to {}: {}", to, subject);
        Ok(())
    }
}

/// Owner notification for a new booking: subject plus HTML body.
pub fn booking_owner_email(booking: &BookingRequest) -> (String, String) {
    let (date, time) = booking.formatted_parts();
    let lead = &booking.lead;

    let subject = format!(
        "New {} - {} - {} at {}",
        booking.session_type,
        lead.full_name(),
        date,
        time
    );

    let mut details = String::new();
    for (label, value) in [
        ("Income", lead.income_range.as_str()),
        ("Employment", lead.employment_type.as_str()),
        ("Occupation", lead.occupation.as_str()),
        ("Relationship", lead.has_partner.as_str()),
        ("Children", lead.has_kids.as_str()),
        ("Budget", lead.monthly_budget.as_str()),
        ("Timeline", lead.timeline.as_str()),
    ] {
        if !value.trim().is_empty() {
            details.push_str(&format!(
                "<p style=\"margin: 5px 0;\"><strong>{}:</strong> {}</p>\n",
                label, value
            ));
        }
    }

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: #0a0a0a; padding: 30px; text-align: center;">
    <h1 style="color: #d4a84b; margin: 0;">New Appointment Booked!</h1>
  </div>
  <div style="background: #1a1a1a; padding: 30px; color: #ffffff;">
    <h2 style="color: #d4a84b; margin-top: 0;">{session_type}</h2>
    <div style="background: #2d2d2d; padding: 20px; border-radius: 8px; margin-bottom: 20px;">
      <p style="margin: 5px 0; font-size: 18px;"><strong>Date:</strong> {date}</p>
      <p style="margin: 5px 0; font-size: 18px;"><strong>Time:</strong> {time}</p>
    </div>
    <h3 style="color: #d4a84b;">Contact Information</h3>
    <p style="margin: 5px 0;"><strong>Name:</strong> {name}</p>
    <p style="margin: 5px 0;"><strong>Email:</strong> <a href="mailto:{email}" style="color: #d4a84b;">{email}</a></p>
    <p style="margin: 5px 0;"><strong>Phone:</strong> <a href="tel:{phone}" style="color: #d4a84b;">{phone}</a></p>
    <p style="margin: 5px 0;"><strong>State:</strong> {state}</p>
    <h3 style="color: #d4a84b;">Lead Details</h3>
    <p style="margin: 5px 0;"><strong>Looking to protect:</strong> {focus}</p>
    <p style="margin: 5px 0;"><strong>Lead Score:</strong> {score} (Tier {tier})</p>
    {details}
  </div>
</div>"#,
        session_type = booking.session_type,
        date = date,
        time = time,
        name = lead.full_name(),
        email = lead.lead_email,
        phone = lead.lead_phone,
        state = lead.lead_state,
        focus = or_na(lead.primary_focus.as_str()),
        score = or_na(lead.lead_score.as_str()),
        tier = or_na(lead.lead_tier.as_str()),
        details = details,
    );

    (subject, html)
}

/// Confirmation email sent to the lead after a successful booking.
pub fn booking_confirmation_email(booking: &BookingRequest) -> (String, String) {
    let (date, time) = booking.formatted_parts();
    let lead = &booking.lead;

    let subject = format!("Confirmed: Your Call - {}", date);

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: #0a0a0a; padding: 30px; text-align: center;">
    <h1 style="color: #d4a84b; margin: 0;">You're All Set!</h1>
  </div>
  <div style="background: #1a1a1a; padding: 30px; color: #ffffff;">
    <p style="font-size: 16px; line-height: 1.6;">Hi {first_name},</p>
    <p style="font-size: 16px; line-height: 1.6;">Thank you for taking the time to schedule a call - looking forward to connecting with you!</p>
    <div style="background: #2d2d2d; padding: 25px; border-radius: 8px; margin: 25px 0; text-align: center;">
      <p style="margin: 0 0 10px; font-size: 14px; color: #999;">YOUR APPOINTMENT</p>
      <p style="margin: 0; font-size: 22px; color: #d4a84b; font-weight: bold;">{date}</p>
      <p style="margin: 5px 0 0; font-size: 20px; color: #fff;">{time}</p>
    </div>
    <p style="font-size: 16px; line-height: 1.6;">We'll reach out to you at <strong style="color: #d4a84b;">{phone}</strong> at your scheduled time.</p>
    <p style="font-size: 16px; line-height: 1.6;">Need to reschedule? No problem - just reply to this email.</p>
  </div>
</div>"#,
        first_name = lead.lead_first_name,
        date = date,
        time = time,
        phone = lead.lead_phone,
    );

    (subject, html)
}

/// Owner notification for a contact form submission.
pub fn contact_owner_email(contact: &ContactRequest) -> (String, String) {
    let subject = if contact.coverages.is_empty() {
        format!("New Contact: {}", contact.name)
    } else {
        let first_coverage = contact
            .coverages
            .as_str()
            .split(',')
            .next()
            .unwrap_or("")
            .trim();
        format!("New Contact: {} - {}", contact.name, first_coverage)
    };

    let mut sections = String::new();
    if !contact.coverages.is_empty() {
        sections.push_str(&format!(
            r#"<h3 style="color: #d4a84b; margin-top: 20px;">Interested In</h3>
    <p style="background: #2d2d2d; padding: 15px; border-radius: 8px;">{}</p>
"#,
            contact.coverages
        ));
    }
    if !contact.message.is_empty() {
        sections.push_str(&format!(
            r#"<h3 style="color: #d4a84b; margin-top: 20px;">Message</h3>
    <p style="background: #2d2d2d; padding: 15px; border-radius: 8px;">{}</p>
"#,
            contact.message
        ));
    }

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: #0a0a0a; padding: 30px; text-align: center;">
    <h1 style="color: #d4a84b; margin: 0;">New Contact Form Submission</h1>
  </div>
  <div style="background: #1a1a1a; padding: 30px; color: #ffffff;">
    <h3 style="color: #d4a84b;">Contact Details</h3>
    <p style="margin: 5px 0;"><strong>Name:</strong> {name}</p>
    <p style="margin: 5px 0;"><strong>Email:</strong> <a href="mailto:{email}" style="color: #d4a84b;">{email}</a></p>
    <p style="margin: 5px 0;"><strong>Phone:</strong> {phone}</p>
    {sections}
  </div>
</div>"#,
        name = contact.name,
        email = contact.email,
        phone = or_na(contact.phone.as_str()),
        sections = sections,
    );

    (subject, html)
}

/// Auto-reply sent back to the person who submitted the contact form.
pub fn contact_auto_reply_email(contact: &ContactRequest) -> (String, String) {
    let first_name = contact.first_name();

    let subject = format!("Got your message, {}!", first_name);

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: #0a0a0a; padding: 30px; text-align: center;">
    <h1 style="color: #d4a84b; margin: 0;">Thanks for Reaching Out!</h1>
  </div>
  <div style="background: #1a1a1a; padding: 30px; color: #ffffff;">
    <p style="font-size: 16px; line-height: 1.6;">Hi {first_name},</p>
    <p style="font-size: 16px; line-height: 1.6;">Thanks for getting in touch - your message has been received and you'll hear back within 24 hours.</p>
    <p style="font-size: 16px; line-height: 1.6;">If you'd like to chat sooner, you can book a quick intro call directly on the calendar. In the meantime, just reply to this email with any questions.</p>
  </div>
</div>"#,
        first_name = first_name,
    );

    (subject, html)
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}
