use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single questionnaire answer as it arrives from the chatbot client.
///
/// The intake form sends a flat JSON object where any field may be a string,
/// a number, a boolean, null, or simply absent. Every variant collapses to a
/// plain string; absence collapses to the empty string. Nothing here can fail,
/// which is what keeps the scorer infallible downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scalar(String);

impl Scalar {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Numeric view of the answer: keep only digit characters, then parse.
    ///
    /// Handles currency and free-text answers like "$8,500" or "8500/month".
    /// Absent or unparsable values read as 0, never as an error.
    pub fn number(&self) -> i64 {
        let digits: String = self.0.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(0)
    }

    /// Case-sensitive substring check, false for the empty needle.
    pub fn contains(&self, needle: &str) -> bool {
        !needle.is_empty() && self.0.contains(needle)
    }

    /// Case-insensitive substring check.
    pub fn contains_ci(&self, needle: &str) -> bool {
        !needle.is_empty() && self.0.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for Scalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let text = match value {
            Value::Null => String::new(),
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(de::Error::custom(format!(
                    "expected a scalar value, got {}",
                    other
                )))
            }
        };
        Ok(Scalar(text))
    }
}

/// The scorer's flat view of a lead: demographic, financial, and behavioral
/// attributes. No field is required; missing answers score zero.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeadProfile {
    pub age: Scalar,
    pub monthly_income: Scalar,
    pub employment_type: Scalar,
    pub relationship_status: Scalar,
    pub kids: Scalar,
    pub dependents: Scalar,
    pub housing_status: Scalar,
    pub financial_discipline: Scalar,
    pub benefits_awareness: Scalar,
    pub health_status: Scalar,
    pub tobacco_use: Scalar,
    pub risk_tolerance: Scalar,
    pub financial_goals: Scalar,
}

/// Output of the lead scorer.
///
/// `recommendations` preserves rule evaluation order; each rule targets a
/// distinct product so duplicates cannot occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub recommendations: Vec<String>,
}

/// Full questionnaire record as submitted by the chatbot.
///
/// Field groups mirror the Leads sheet column layout; `to_row` must stay in
/// lockstep with the sheet headers.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LeadRecord {
    // Contact
    pub lead_first_name: Scalar,
    pub lead_last_name: Scalar,
    pub lead_email: Scalar,
    pub lead_phone: Scalar,
    pub lead_state: Scalar,
    pub lead_state_other: Scalar,
    pub lead_age: Scalar,
    pub primary_focus: Scalar,
    // Work / income
    pub employment_type: Scalar,
    pub occupation: Scalar,
    pub income_range: Scalar,
    pub monthly_income: Scalar,
    pub income_stability: Scalar,
    // Family
    pub has_partner: Scalar,
    pub partner_works: Scalar,
    pub partner_income_sufficiency: Scalar,
    pub has_kids: Scalar,
    pub kids_ages: Scalar,
    pub kids_expenses: Scalar,
    pub other_dependents: Scalar,
    // Finances
    pub home_status: Scalar,
    pub mortgage_balance: Scalar,
    pub monthly_expenses: Scalar,
    pub debt_types: Scalar,
    pub emergency_fund: Scalar,
    pub financial_discipline: Scalar,
    pub risk_tolerance: Scalar,
    pub benefits_awareness: Scalar,
    // Risk / priority
    pub biggest_risk: Scalar,
    pub protection_priority: Scalar,
    // Current coverage
    pub has_life_insurance: Scalar,
    pub why_no_insurance: Scalar,
    pub current_coverage_amount: Scalar,
    pub current_policy_types: Scalar,
    pub coverage_confidence: Scalar,
    // Preferences
    pub preference_style: Scalar,
    pub goal_type: Scalar,
    pub time_horizon: Scalar,
    pub funding_commitment: Scalar,
    pub monthly_budget: Scalar,
    // Health
    pub nicotine_use: Scalar,
    pub health_status: Scalar,
    pub health_conditions: Scalar,
    pub health_other: Scalar,
    // Intent
    pub timeline: Scalar,
    pub trigger_reason: Scalar,
    pub sms_consent: Scalar,
    pub decision_role: Scalar,
    // Business info
    pub trade_type: Scalar,
    pub business_name: Scalar,
    pub years_in_business: Scalar,
    pub team_size: Scalar,
    pub annual_revenue_range: Scalar,
    pub tax_pain_level: Scalar,
    // Computed / bookkeeping
    pub lead_score: Scalar,
    pub lead_tier: Scalar,
    pub booking_type: Scalar,
    pub chat_completion_type: Scalar,
    pub notes: Scalar,
    // Tracking (UTM)
    pub utm_source: Scalar,
    pub utm_medium: Scalar,
    pub utm_campaign: Scalar,
    pub utm_content: Scalar,
    pub utm_term: Scalar,
    pub landing_page: Scalar,
    pub referrer: Scalar,
    pub session_duration: Scalar,
}

impl LeadRecord {
    /// Build the ordered scalar row for the Leads sheet.
    ///
    /// Column order is the sheet's contract; the store enforces no schema
    /// beyond it.
    pub fn to_row(&self, timestamp: &str) -> Vec<String> {
        vec![
            timestamp.to_string(),
            self.lead_first_name.to_string(),
            self.lead_last_name.to_string(),
            self.lead_email.to_string(),
            self.lead_phone.to_string(),
            self.lead_state.to_string(),
            self.lead_state_other.to_string(),
            self.lead_age.to_string(),
            self.primary_focus.to_string(),
            self.employment_type.to_string(),
            self.occupation.to_string(),
            self.income_range.to_string(),
            self.monthly_income.to_string(),
            self.income_stability.to_string(),
            self.has_partner.to_string(),
            self.partner_works.to_string(),
            self.partner_income_sufficiency.to_string(),
            self.has_kids.to_string(),
            self.kids_ages.to_string(),
            self.kids_expenses.to_string(),
            self.other_dependents.to_string(),
            self.home_status.to_string(),
            self.mortgage_balance.to_string(),
            self.monthly_expenses.to_string(),
            self.debt_types.to_string(),
            self.emergency_fund.to_string(),
            self.financial_discipline.to_string(),
            self.risk_tolerance.to_string(),
            self.benefits_awareness.to_string(),
            self.biggest_risk.to_string(),
            self.protection_priority.to_string(),
            self.has_life_insurance.to_string(),
            self.why_no_insurance.to_string(),
            self.current_coverage_amount.to_string(),
            self.current_policy_types.to_string(),
            self.coverage_confidence.to_string(),
            self.preference_style.to_string(),
            self.goal_type.to_string(),
            self.time_horizon.to_string(),
            self.funding_commitment.to_string(),
            self.monthly_budget.to_string(),
            self.nicotine_use.to_string(),
            self.health_status.to_string(),
            self.health_conditions.to_string(),
            self.health_other.to_string(),
            self.timeline.to_string(),
            self.trigger_reason.to_string(),
            self.sms_consent.to_string(),
            self.decision_role.to_string(),
            self.trade_type.to_string(),
            self.business_name.to_string(),
            self.years_in_business.to_string(),
            self.team_size.to_string(),
            self.annual_revenue_range.to_string(),
            self.tax_pain_level.to_string(),
            self.lead_score.to_string(),
            self.lead_tier.to_string(),
            self.booking_type.to_string(),
            self.chat_completion_type.to_string(),
            self.notes.to_string(),
            self.utm_source.to_string(),
            self.utm_medium.to_string(),
            self.utm_campaign.to_string(),
            self.utm_content.to_string(),
            self.utm_term.to_string(),
            self.landing_page.to_string(),
            self.referrer.to_string(),
            self.session_duration.to_string(),
        ]
    }

    /// Project the record onto the scorer's attribute view.
    pub fn profile(&self) -> LeadProfile {
        LeadProfile {
            age: self.lead_age.clone(),
            monthly_income: self.monthly_income.clone(),
            employment_type: self.employment_type.clone(),
            relationship_status: self.has_partner.clone(),
            kids: self.has_kids.clone(),
            dependents: self.other_dependents.clone(),
            housing_status: self.home_status.clone(),
            financial_discipline: self.financial_discipline.clone(),
            benefits_awareness: self.benefits_awareness.clone(),
            health_status: self.health_status.clone(),
            tobacco_use: self.nicotine_use.clone(),
            risk_tolerance: self.risk_tolerance.clone(),
            financial_goals: self.goal_type.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.lead_first_name, self.lead_last_name)
            .trim()
            .to_string()
    }
}

/// Appointment booking request.
///
/// `appointment_date` is the canonical ISO-8601 slot key produced by the
/// client; this service matches it byte-for-byte and performs no timezone
/// normalization. `appointment_formatted` is the human-readable rendering,
/// e.g. "Thu, Dec 26 at 4:00 PM".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookingRequest {
    pub appointment_date: Scalar,
    pub appointment_formatted: Scalar,
    pub session_type: Scalar,
    #[serde(flatten)]
    pub lead: LeadRecord,
}

impl BookingRequest {
    /// Split the display string into date and time halves for the emails.
    pub fn formatted_parts(&self) -> (String, String) {
        let formatted = self.appointment_formatted.as_str();
        let mut parts = formatted.splitn(2, " at ");
        let date = parts.next().filter(|s| !s.is_empty()).unwrap_or("Date TBD");
        let time = parts.next().filter(|s| !s.is_empty()).unwrap_or("Time TBD");
        (date.to_string(), time.to_string())
    }
}

/// Contact form submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub name: Scalar,
    pub email: Scalar,
    pub phone: Scalar,
    pub message: Scalar,
    pub coverages: Scalar,
}

impl ContactRequest {
    pub fn first_name(&self) -> &str {
        self.name
            .as_str()
            .split_whitespace()
            .next()
            .unwrap_or("there")
    }
}
