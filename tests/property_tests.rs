/// Property-based tests using proptest
/// Tests invariants of the lead scorer that should hold for all inputs
use lead_intake_api::models::LeadProfile;
use lead_intake_api::scoring::{score, MAX_SCORE};
use proptest::prelude::*;

fn arbitrary_profile() -> impl Strategy<Value = LeadProfile> {
    (
        "\\PC{0,20}",
        "\\PC{0,20}",
        "\\PC{0,30}",
        "\\PC{0,30}",
        "\\PC{0,10}",
        "\\PC{0,30}",
        "\\PC{0,30}",
        "\\PC{0,10}",
        "\\PC{0,60}",
        ("\\PC{0,20}", "\\PC{0,10}", "\\PC{0,30}", "\\PC{0,40}"),
    )
        .prop_map(
            |(
                age,
                income,
                employment,
                relationship,
                kids,
                dependents,
                housing,
                discipline,
                awareness,
                (health, tobacco, risk, goals),
            )| LeadProfile {
                age: age.as_str().into(),
                monthly_income: income.as_str().into(),
                employment_type: employment.as_str().into(),
                relationship_status: relationship.as_str().into(),
                kids: kids.as_str().into(),
                dependents: dependents.as_str().into(),
                housing_status: housing.as_str().into(),
                financial_discipline: discipline.as_str().into(),
                benefits_awareness: awareness.as_str().into(),
                health_status: health.as_str().into(),
                tobacco_use: tobacco.as_str().into(),
                risk_tolerance: risk.as_str().into(),
                financial_goals: goals.as_str().into(),
            },
        )
}

// Property: scoring never panics and never exceeds the rule-set maximum
proptest! {
    #[test]
    fn scoring_never_panics(profile in arbitrary_profile()) {
        let _ = score(&profile);
    }

    #[test]
    fn score_bounded_by_max(profile in arbitrary_profile()) {
        let result = score(&profile);
        prop_assert!(result.score <= MAX_SCORE);
    }

    #[test]
    fn scoring_is_idempotent(profile in arbitrary_profile()) {
        prop_assert_eq!(score(&profile), score(&profile));
    }
}

// Property: recommendations come from a fixed catalog, in rule order,
// without duplicates
proptest! {
    #[test]
    fn recommendations_are_bounded_and_unique(profile in arbitrary_profile()) {
        let result = score(&profile);
        prop_assert!(result.recommendations.len() <= 4);

        let catalog = [
            "Term Life",
            "Indexed Universal Life (IUL)",
            "Whole Life",
            "Annuities",
        ];
        let mut last_index = None;
        for product in &result.recommendations {
            let index = catalog
                .iter()
                .position(|known| known == product)
                .expect("recommendation outside catalog");
            if let Some(last) = last_index {
                prop_assert!(index > last, "recommendations out of rule order");
            }
            last_index = Some(index);
        }
    }
}

// Property: raising income never lowers the score (monotone qualifying signal)
proptest! {
    #[test]
    fn raising_income_never_decreases_score(
        profile in arbitrary_profile(),
        low in 0i64..8000,
        bump in 0i64..20000,
    ) {
        let mut poorer = profile.clone();
        poorer.monthly_income = low.to_string().as_str().into();

        let mut richer = profile;
        richer.monthly_income = (low + bump).to_string().as_str().into();

        prop_assert!(score(&richer).score >= score(&poorer).score);
    }
}

// Property: numeric parsing tolerates arbitrary currency decoration
proptest! {
    #[test]
    fn currency_decoration_does_not_change_income_bracket(
        income in 0u32..100_000,
        prefix in "[$ ]{0,3}",
        suffix in "[a-z /]{0,8}",
    ) {
        let plain = LeadProfile {
            monthly_income: income.to_string().as_str().into(),
            ..Default::default()
        };
        let decorated = LeadProfile {
            monthly_income: format!("{}{}{}", prefix, income, suffix).as_str().into(),
            ..Default::default()
        };
        prop_assert_eq!(score(&plain).score, score(&decorated).score);
    }
}
