//! Rule-based lead scoring and product recommendation engine.
//!
//! Pure and infallible: every rule reads one or two profile attributes,
//! missing answers contribute zero points and no recommendation. Rules are
//! evaluated independently and summed; ladders (income, discipline) award a
//! single bracket.

use crate::models::{LeadProfile, ScoreResult};

/// Maximum score the rule set can award.
pub const MAX_SCORE: u32 = 125;

/// Score a lead profile and derive product recommendations.
///
/// Deterministic and side-effect free; safe to call repeatedly and
/// concurrently. Downstream tiering (A/B/C/D) is the caller's concern.
pub fn score(profile: &LeadProfile) -> ScoreResult {
    ScoreResult {
        score: score_points(profile),
        recommendations: recommend(profile),
    }
}

fn score_points(profile: &LeadProfile) -> u32 {
    let mut points = 0u32;

    let age = profile.age.number();
    if (25..=40).contains(&age) {
        points += 20;
    } else if (41..=50).contains(&age) {
        points += 10;
    }

    let income = profile.monthly_income.number();
    if income >= 8000 {
        points += 25;
    } else if income >= 5000 {
        points += 15;
    } else if income >= 3000 {
        points += 5;
    }

    let employment = &profile.employment_type;
    if employment.contains("Contractor")
        || employment.contains("Business Owner")
        || employment.contains("Self-employed")
    {
        points += 20;
    }

    if has_family(profile) {
        points += 15;
    }

    if profile.kids.number() > 0 {
        points += 5;
    }

    if profile.housing_status.as_str() == "Own my home" {
        points += 10;
    }

    let discipline = profile.financial_discipline.number();
    if discipline >= 7 {
        points += 10;
    } else if discipline >= 5 {
        points += 5;
    }

    if profile.benefits_awareness.contains("that's why I'm here") {
        points += 10;
    }

    if profile.health_status.as_str() == "Excellent" {
        points += 5;
    }

    if profile.tobacco_use.as_str() == "No" {
        points += 5;
    }

    points
}

/// Ordered recommendation rules; each appends its product at most once.
fn recommend(profile: &LeadProfile) -> Vec<String> {
    let mut products = Vec::new();

    if has_family(profile) || !profile.dependents.is_empty() {
        products.push("Term Life".to_string());
    }

    let income = profile.monthly_income.number();
    let age = profile.age.number();
    if income >= 5000
        && age <= 50
        && (profile.benefits_awareness.contains("here")
            || profile.risk_tolerance.contains("growth"))
    {
        products.push("Indexed Universal Life (IUL)".to_string());
    }

    if profile.risk_tolerance.contains("stable") || profile.risk_tolerance.contains("Mix") {
        products.push("Whole Life".to_string());
    }

    if (age >= 45 || profile.financial_discipline.number() >= 7)
        && profile.financial_goals.contains_ci("retirement")
    {
        products.push("Annuities".to_string());
    }

    products
}

/// Married or parenting leads qualify for the family bracket.
fn has_family(profile: &LeadProfile) -> bool {
    profile.relationship_status.contains("Married")
        || profile.relationship_status.contains("parent")
}
