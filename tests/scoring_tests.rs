/// Unit tests for the lead scoring and recommendation engine
use lead_intake_api::models::LeadProfile;
use lead_intake_api::scoring::{score, MAX_SCORE};

/// Profile from the full questionnaire happy path: every scoring signal set.
fn qualified_profile() -> LeadProfile {
    LeadProfile {
        age: "32".into(),
        monthly_income: "$8,500".into(),
        employment_type: "Self-employed".into(),
        relationship_status: "Married".into(),
        housing_status: "Own my home".into(),
        financial_discipline: "8".into(),
        tobacco_use: "No".into(),
        health_status: "Excellent".into(),
        ..Default::default()
    }
}

#[cfg(test)]
mod score_tests {
    use super::*;

    #[test]
    fn test_empty_profile_scores_zero() {
        let result = score(&LeadProfile::default());
        assert_eq!(result.score, 0);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_full_questionnaire_scenario() {
        // 20 (age) + 25 (income) + 20 (employment) + 15 (married)
        // + 10 (homeowner) + 10 (discipline) + 5 (tobacco) + 5 (health)
        let result = score(&qualified_profile());
        assert_eq!(result.score, 110);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let profile = qualified_profile();
        let first = score(&profile);
        let second = score(&profile);
        assert_eq!(first, second);
    }

    #[test]
    fn test_age_brackets() {
        for (age, expected) in [
            ("24", 0),
            ("25", 20),
            ("40", 20),
            ("41", 10),
            ("50", 10),
            ("51", 0),
            ("", 0),
        ] {
            let profile = LeadProfile {
                age: age.into(),
                ..Default::default()
            };
            assert_eq!(score(&profile).score, expected, "age = {:?}", age);
        }
    }

    #[test]
    fn test_income_ladder_awards_one_bracket() {
        for (income, expected) in [
            ("2999", 0),
            ("3000", 5),
            ("4999", 5),
            ("5000", 15),
            ("7999", 15),
            ("8000", 25),
            ("12000", 25),
        ] {
            let profile = LeadProfile {
                monthly_income: income.into(),
                ..Default::default()
            };
            assert_eq!(score(&profile).score, expected, "income = {:?}", income);
        }
    }

    #[test]
    fn test_currency_formatting_stripped_before_parsing() {
        let plain = LeadProfile {
            monthly_income: "8500".into(),
            ..Default::default()
        };
        let formatted = LeadProfile {
            monthly_income: "$8,500 per month".into(),
            ..Default::default()
        };
        assert_eq!(score(&plain).score, score(&formatted).score);
    }

    #[test]
    fn test_unparsable_income_scores_zero() {
        let profile = LeadProfile {
            monthly_income: "prefer not to say".into(),
            ..Default::default()
        };
        assert_eq!(score(&profile).score, 0);
    }

    #[test]
    fn test_employment_type_variants() {
        for employment in ["Contractor", "Business Owner", "Self-employed"] {
            let profile = LeadProfile {
                employment_type: employment.into(),
                ..Default::default()
            };
            assert_eq!(score(&profile).score, 20, "employment = {:?}", employment);
        }

        let salaried = LeadProfile {
            employment_type: "W2 Employee".into(),
            ..Default::default()
        };
        assert_eq!(score(&salaried).score, 0);
    }

    #[test]
    fn test_family_and_kids_signals() {
        let married = LeadProfile {
            relationship_status: "Married".into(),
            ..Default::default()
        };
        assert_eq!(score(&married).score, 15);

        let single_parent = LeadProfile {
            relationship_status: "Single parent".into(),
            ..Default::default()
        };
        assert_eq!(score(&single_parent).score, 15);

        let with_kids = LeadProfile {
            relationship_status: "Married".into(),
            kids: "2".into(),
            ..Default::default()
        };
        assert_eq!(score(&with_kids).score, 20);
    }

    #[test]
    fn test_discipline_ladder() {
        for (rating, expected) in [("4", 0), ("5", 5), ("6", 5), ("7", 10), ("10", 10)] {
            let profile = LeadProfile {
                financial_discipline: rating.into(),
                ..Default::default()
            };
            assert_eq!(score(&profile).score, expected, "discipline = {:?}", rating);
        }
    }

    #[test]
    fn test_awareness_health_and_tobacco() {
        let aware = LeadProfile {
            benefits_awareness: "yes, that's why I'm here".into(),
            ..Default::default()
        };
        assert_eq!(score(&aware).score, 10);

        let healthy_nonsmoker = LeadProfile {
            health_status: "Excellent".into(),
            tobacco_use: "No".into(),
            ..Default::default()
        };
        assert_eq!(score(&healthy_nonsmoker).score, 10);

        // Exact-match fields reject near misses
        let near_miss = LeadProfile {
            health_status: "Pretty good".into(),
            tobacco_use: "Not really".into(),
            ..Default::default()
        };
        assert_eq!(score(&near_miss).score, 0);
    }

    #[test]
    fn test_monotonicity_raising_income_never_decreases_score() {
        let mut profile = qualified_profile();
        profile.monthly_income = "4000".into();
        let low = score(&profile).score;

        profile.monthly_income = "8000".into();
        let high = score(&profile).score;

        assert!(high >= low);
    }

    #[test]
    fn test_max_score_constant() {
        let maxed = LeadProfile {
            age: "32".into(),
            monthly_income: "9000".into(),
            employment_type: "Business Owner".into(),
            relationship_status: "Married".into(),
            kids: "3".into(),
            housing_status: "Own my home".into(),
            financial_discipline: "9".into(),
            benefits_awareness: "that's why I'm here".into(),
            health_status: "Excellent".into(),
            tobacco_use: "No".into(),
            ..Default::default()
        };
        assert_eq!(score(&maxed).score, MAX_SCORE);
    }
}

#[cfg(test)]
mod recommendation_tests {
    use super::*;

    #[test]
    fn test_qualified_profile_without_triggers_gets_term_life_only() {
        // No benefits_awareness / risk_tolerance trigger set, so IUL is out.
        let result = score(&qualified_profile());
        assert_eq!(result.recommendations, vec!["Term Life".to_string()]);
    }

    #[test]
    fn test_awareness_trigger_adds_iul() {
        let mut profile = qualified_profile();
        profile.benefits_awareness = "heard about living benefits, that's why I'm here".into();
        let result = score(&profile);
        assert_eq!(
            result.recommendations,
            vec![
                "Term Life".to_string(),
                "Indexed Universal Life (IUL)".to_string()
            ]
        );
    }

    #[test]
    fn test_iul_requires_income_and_age() {
        let mut profile = qualified_profile();
        profile.risk_tolerance = "growth".into();

        profile.monthly_income = "4500".into();
        assert!(!score(&profile)
            .recommendations
            .contains(&"Indexed Universal Life (IUL)".to_string()));

        profile.monthly_income = "6000".into();
        profile.age = "55".into();
        assert!(!score(&profile)
            .recommendations
            .contains(&"Indexed Universal Life (IUL)".to_string()));

        profile.age = "45".into();
        assert!(score(&profile)
            .recommendations
            .contains(&"Indexed Universal Life (IUL)".to_string()));
    }

    #[test]
    fn test_term_life_from_dependents_without_family_status() {
        let profile = LeadProfile {
            dependents: "elderly mother".into(),
            ..Default::default()
        };
        assert_eq!(
            score(&profile).recommendations,
            vec!["Term Life".to_string()]
        );
    }

    #[test]
    fn test_whole_life_from_risk_tolerance() {
        for tolerance in ["stable", "Mix of both"] {
            let profile = LeadProfile {
                risk_tolerance: tolerance.into(),
                ..Default::default()
            };
            assert!(
                score(&profile)
                    .recommendations
                    .contains(&"Whole Life".to_string()),
                "tolerance = {:?}",
                tolerance
            );
        }
    }

    #[test]
    fn test_annuities_rules() {
        // Age path, case-insensitive goals match
        let older = LeadProfile {
            age: "47".into(),
            financial_goals: "Retirement income".into(),
            ..Default::default()
        };
        assert!(score(&older)
            .recommendations
            .contains(&"Annuities".to_string()));

        // Discipline path
        let disciplined = LeadProfile {
            age: "30".into(),
            financial_discipline: "8".into(),
            financial_goals: "saving for retirement".into(),
            ..Default::default()
        };
        assert!(score(&disciplined)
            .recommendations
            .contains(&"Annuities".to_string()));

        // Goals without the retirement keyword
        let other_goals = LeadProfile {
            age: "47".into(),
            financial_goals: "College fund".into(),
            ..Default::default()
        };
        assert!(!score(&other_goals)
            .recommendations
            .contains(&"Annuities".to_string()));
    }

    #[test]
    fn test_recommendation_order_is_rule_order() {
        let profile = LeadProfile {
            age: "47".into(),
            monthly_income: "6000".into(),
            relationship_status: "Married".into(),
            financial_discipline: "8".into(),
            risk_tolerance: "growth but also stable".into(),
            financial_goals: "retirement".into(),
            ..Default::default()
        };
        assert_eq!(
            score(&profile).recommendations,
            vec![
                "Term Life".to_string(),
                "Indexed Universal Life (IUL)".to_string(),
                "Whole Life".to_string(),
                "Annuities".to_string(),
            ]
        );
    }
}

#[cfg(test)]
mod record_projection_tests {
    use lead_intake_api::models::LeadRecord;
    use lead_intake_api::scoring::score;

    #[test]
    fn test_record_profile_projection_scores() {
        let record: LeadRecord = serde_json::from_value(serde_json::json!({
            "lead_first_name": "Dana",
            "lead_age": 32,
            "monthly_income": "$8,500",
            "employment_type": "Self-employed",
            "has_partner": "Married",
            "home_status": "Own my home",
            "financial_discipline": 8,
            "nicotine_use": "No",
            "health_status": "Excellent"
        }))
        .expect("record deserializes");

        let result = score(&record.profile());
        assert_eq!(result.score, 110);
    }

    #[test]
    fn test_numbers_and_strings_both_accepted() {
        let from_number: LeadRecord =
            serde_json::from_value(serde_json::json!({ "lead_age": 32 })).unwrap();
        let from_string: LeadRecord =
            serde_json::from_value(serde_json::json!({ "lead_age": "32" })).unwrap();

        assert_eq!(
            score(&from_number.profile()).score,
            score(&from_string.profile()).score
        );
    }

    #[test]
    fn test_row_starts_with_timestamp_and_keeps_column_count() {
        let record = LeadRecord::default();
        let row = record.to_row("2025-12-26T21:00:00.000Z");
        assert_eq!(row[0], "2025-12-26T21:00:00.000Z");
        assert_eq!(row.len(), 68);
    }
}
