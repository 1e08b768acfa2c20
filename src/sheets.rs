//! Google Sheets values API client.
//!
//! The spreadsheet is the system's only shared mutable resource. This client
//! exposes the two operations the service needs: read a full range and append
//! one row. No schema is enforced beyond column order; callers keep row shape
//! consistent with the target sheet.

use crate::config::Config;
use crate::errors::AppError;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Per-request timeout for the values API. A stalled store call must not hold
/// the lead's connection open indefinitely; timeouts surface as retryable
/// store errors.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SheetsClient {
    client: Client,
    base_url: String,
    sheet_id: String,
    api_token: String,
}

/// Response body of `values.get`. The API omits `values` entirely for an
/// empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: config.sheets_base_url.clone(),
            sheet_id: config.sheet_id.clone(),
            api_token: config.sheets_api_token.clone(),
        }
    }

    /// Read all rows in `range`, e.g. `Bookings!A:B`.
    ///
    /// Each row is an ordered sequence of cell strings; short rows are
    /// returned as-is (the API trims trailing empty cells).
    pub async fn read_range(&self, range: &str) -> Result<Vec<Vec<String>>, AppError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.sheet_id, range
        );

        tracing::debug!("Reading sheet range: {}", range);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(AppError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Sheets read returned error {}: {}", status, error_text);
            return Err(AppError::StoreError(format!(
                "Sheets values.get returned status {}: {}",
                status, error_text
            )));
        }

        let body: ValueRange = response.json().await.map_err(|e| {
            AppError::StoreError(format!("Failed to parse Sheets response: {}", e))
        })?;

        Ok(body.values)
    }

    /// Append a single row to `range`.
    ///
    /// Uses `INSERT_ROWS` so concurrent appends land on distinct rows; the
    /// store appends in arrival order and never rewrites existing rows.
    pub async fn append_row(&self, range: &str, row: &[String]) -> Result<(), AppError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.base_url, self.sheet_id, range
        );

        tracing::debug!("Appending {}-cell row to range: {}", row.len(), range);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(AppError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Sheets append returned error {}: {}", status, error_text);
            return Err(AppError::StoreError(format!(
                "Sheets values.append returned status {}: {}",
                status, error_text
            )));
        }

        tracing::debug!("Row appended to {}", range);
        Ok(())
    }
}
