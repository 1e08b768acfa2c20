//! Double-booking guard over the append-only bookings ledger.
//!
//! The ledger is a two-column sheet: canonical ISO-8601 slot key, then the
//! human-readable rendering. Invariant: no two rows share the same slot key.
//! The guard owns the protocol for appending safely; it never caches ledger
//! contents, so every booking re-reads the full range.

use crate::config::AvailabilityPolicy;
use crate::errors::AppError;
use crate::sheets::SheetsClient;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct BookingGuard {
    sheets: Arc<SheetsClient>,
    range: String,
    policy: AvailabilityPolicy,
    /// Serializes the check-then-append sequence. Without it, two concurrent
    /// requests for the same slot could both pass the availability scan and
    /// both append. Cross-process races remain possible; the sheet has no
    /// conditional-write primitive to close them with.
    write_lock: Mutex<()>,
}

impl BookingGuard {
    pub fn new(sheets: Arc<SheetsClient>, range: String, policy: AvailabilityPolicy) -> Self {
        Self {
            sheets,
            range,
            policy,
            write_lock: Mutex::new(()),
        }
    }

    /// Reserve `requested_time` if no existing row claims it.
    ///
    /// The scan is an exact string match against column 0 of the ledger - no
    /// tolerance window, no timezone normalization. The caller is responsible
    /// for producing a canonical timestamp.
    ///
    /// Availability-read failures follow the configured policy: fail-open
    /// proceeds to append after a logged warning (the reference trade-off:
    /// accept a rare double-booking over blocking the lead), fail-closed
    /// surfaces the store error. Append failures are always surfaced, since a
    /// failed append means the booking was never recorded.
    pub async fn book(&self, requested_time: &str, display_time: &str) -> Result<(), AppError> {
        if requested_time.trim().is_empty() {
            return Err(AppError::BadRequest(
                "appointment_date is required".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().await;

        match self.sheets.read_range(&self.range).await {
            Ok(rows) => {
                let taken = rows
                    .iter()
                    .any(|row| row.first().map(String::as_str) == Some(requested_time));
                if taken {
                    return Err(AppError::SlotTaken(requested_time.to_string()));
                }
            }
            Err(e) => match self.policy {
                AvailabilityPolicy::FailOpen => {
                    tracing::warn!(
                        "Availability check failed, proceeding fail-open for {}: {}",
                        requested_time,
                        e
                    );
                }
                AvailabilityPolicy::FailClosed => {
                    tracing::error!(
                        "Availability check failed, rejecting booking for {}: {}",
                        requested_time,
                        e
                    );
                    return Err(e);
                }
            },
        }

        let row = vec![requested_time.to_string(), display_time.to_string()];
        self.sheets.append_row(&self.range, &row).await?;

        tracing::info!("Time slot reserved: {} ({})", requested_time, display_time);
        Ok(())
    }
}
