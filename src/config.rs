use serde::Deserialize;

/// Policy applied when the bookings availability check cannot read the ledger.
///
/// The reference deployment fails open: a transient read failure should not
/// block a lead from booking, at the cost of a rare double-booking that the
/// owner resolves manually. Fail-closed inverts that trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AvailabilityPolicy {
    FailOpen,
    FailClosed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub sheet_id: String,
    pub sheets_api_token: String,
    pub sheets_base_url: String,
    pub leads_range: String,
    pub bookings_range: String,
    pub availability_policy: AvailabilityPolicy,
    pub smtp: Option<SmtpConfig>,
}

/// SMTP settings for the transactional mailer.
///
/// Optional as a block: when `SMTP_HOST` is unset the service runs without
/// email delivery and logs a warning at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from_address: String,
    pub owner_email: String,
}

const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";
const DEFAULT_SMTP_PORT: u16 = 587;

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: parse_port(&std::env::var("PORT").unwrap_or_else(|_| "8080".to_string()))?,
            sheet_id: std::env::var("SHEET_ID")
                .map_err(|_| anyhow::anyhow!("SHEET_ID environment variable required"))
                .and_then(|id| {
                    if id.trim().is_empty() {
                        anyhow::bail!("SHEET_ID cannot be empty");
                    }
                    Ok(id)
                })?,
            sheets_api_token: std::env::var("SHEETS_API_TOKEN")
                .map_err(|_| anyhow::anyhow!("SHEETS_API_TOKEN environment variable required"))
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("SHEETS_API_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            sheets_base_url: std::env::var("SHEETS_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("SHEETS_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_SHEETS_BASE_URL.to_string()),
            leads_range: std::env::var("LEADS_RANGE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Leads!A:BQ".to_string()),
            bookings_range: std::env::var("BOOKINGS_RANGE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Bookings!A:B".to_string()),
            availability_policy: match std::env::var("BOOKING_FAIL_CLOSED").as_deref() {
                Ok("true") | Ok("1") => AvailabilityPolicy::FailClosed,
                _ => AvailabilityPolicy::FailOpen,
            },
            smtp: SmtpConfig::from_env()?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Sheets base URL: {}", config.sheets_base_url);
        tracing::debug!("Leads range: {}", config.leads_range);
        tracing::debug!("Bookings range: {}", config.bookings_range);
        tracing::info!("Availability policy: {:?}", config.availability_policy);
        if config.smtp.is_none() {
            tracing::warn!("SMTP_HOST not set - email notifications disabled");
        }
        tracing::debug!("Server port: {}", config.port);

        Ok(config)
    }
}

impl SmtpConfig {
    /// Load SMTP settings; `Ok(None)` when `SMTP_HOST` is unset.
    fn from_env() -> anyhow::Result<Option<Self>> {
        let host = match std::env::var("SMTP_HOST").ok().filter(|s| !s.trim().is_empty()) {
            Some(host) => host,
            None => return Ok(None),
        };

        let from_address = std::env::var("SMTP_FROM")
            .map_err(|_| anyhow::anyhow!("SMTP_FROM required when SMTP_HOST is set"))
            .and_then(|addr| {
                if addr.trim().is_empty() {
                    anyhow::bail!("SMTP_FROM cannot be empty");
                }
                Ok(addr)
            })?;
        let owner_email = std::env::var("OWNER_EMAIL")
            .map_err(|_| anyhow::anyhow!("OWNER_EMAIL required when SMTP_HOST is set"))
            .and_then(|addr| {
                if addr.trim().is_empty() {
                    anyhow::bail!("OWNER_EMAIL cannot be empty");
                }
                Ok(addr)
            })?;

        Ok(Some(Self {
            host,
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            user: std::env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
            password: std::env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            from_address,
            owner_email,
        }))
    }
}

/// Parses the HTTP listen port. Port 0 is not accepted.
fn parse_port(raw: &str) -> anyhow::Result<u16> {
    raw.parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| anyhow::anyhow!("PORT must be a valid number between 1-65535"))
}
