//! End-to-end flow: classify onboarding answers, persist the profile, pull
//! candidates from the store, and score them.

use std::collections::BTreeSet;

use pathways_core::persona::classifier::{OnboardingInput, ProfilePatch, classify, update};
use pathways_core::persona::model::{EmotionalState, JourneyType};
use pathways_core::persona::theme::ThemeName;
use pathways_core::recommend::model::{
    Availability, LocationData, OutcomeMetrics, Preferences, Provider, VerificationStatus,
};
use pathways_core::recommend::score_providers;
use pathways_core::store::{Database, LibSqlBackend};

fn onboarding_answers() -> OnboardingInput {
    OnboardingInput {
        journey_type: Some("ivf".into()),
        emotional_state: Some("anxious".into()),
        age: Some(38),
        relationship_status: Some("married".into()),
        financial_situation: Some("limited".into()),
        health_concerns: Some(false),
        timeline: Some("urgent".into()),
        priorities: Some(vec!["cost".into(), "success_rates".into()]),
        ..Default::default()
    }
}

fn clinic(id: &str, rating: f64, tags: &[&str]) -> Provider {
    Provider {
        id: id.into(),
        name: format!("Clinic {id}"),
        provider_type: "fertility_clinic".into(),
        specializations: tags.iter().map(|t| t.to_string()).collect(),
        location_data: LocationData {
            city: Some("Denver".into()),
            state: Some("CO".into()),
            distance_miles: None,
            availability: Some(Availability::Immediate),
        },
        rating_average: rating,
        total_ratings: 40,
        insurance_accepted: BTreeSet::from(["acme_gold".to_string()]),
        outcome_metrics: OutcomeMetrics {
            success_rate: Some(0.8),
            cost_effectiveness: Some(0.7),
        },
        verification_status: VerificationStatus::Verified,
    }
}

#[tokio::test]
async fn classify_persist_and_recommend() {
    let db = LibSqlBackend::new_memory().await.unwrap();

    // Onboarding: classify and persist.
    let profile = classify(&onboarding_answers()).unwrap();
    assert_eq!(profile.journey_type, JourneyType::Ivf);
    assert_eq!(profile.emotional_state, EmotionalState::Anxious);
    // Anxious takes precedence over the ivf-over-35 rule.
    assert_eq!(profile.theme, ThemeName::NurturingGreen);

    db.upsert_profile("user-1", &profile, true).await.unwrap();
    db.insert_journey("user-1", profile.journey_type)
        .await
        .unwrap();

    // Seed the provider catalog.
    let mut supportive = clinic("supportive", 4.0, &["ivf", "emotional_support"]);
    supportive.insurance_accepted.clear();
    db.upsert_provider(&supportive).await.unwrap();
    db.upsert_provider(&clinic("top-rated", 4.9, &["ivf"]))
        .await
        .unwrap();
    db.upsert_provider(&clinic("unrelated", 5.0, &["domestic_adoption"]))
        .await
        .unwrap();

    // Recommendation request with insurance preference.
    let stored = db.get_profile("user-1").await.unwrap().unwrap();
    let candidates = db
        .providers_for_journey(stored.profile.journey_type, 10)
        .await
        .unwrap();
    assert_eq!(candidates.len(), 2, "adoption clinic is not a candidate");

    let preferences = Preferences {
        insurance_plan: Some("acme_gold".into()),
    };
    let recommendations = score_providers(candidates, &stored.profile, Some(&preferences));

    // top-rated: 98 base + 15 cost + 10 availability + 20 insurance = 143 → 100
    assert_eq!(recommendations[0].provider.id, "top-rated");
    assert_eq!(recommendations[0].recommendation_score, 100.0);
    assert!(recommendations[0]
        .match_reasons
        .contains(&"Highly rated by patients".to_string()));
    assert!(recommendations[0]
        .match_reasons
        .contains(&"Accepts your insurance".to_string()));

    // supportive: 80 base + 15 cost + 10 emotional + 10 availability = 115 → 100.
    // Equal scores tie-break by rating: top-rated stays first.
    assert_eq!(recommendations[1].provider.id, "supportive");
    assert_eq!(recommendations[1].recommendation_score, 100.0);
    assert!(recommendations[1]
        .match_reasons
        .contains(&"Provides emotional support services".to_string()));
    assert!(!recommendations[1]
        .match_reasons
        .contains(&"Accepts your insurance".to_string()));
}

#[tokio::test]
async fn profile_update_persists_recomputed_theme() {
    let db = LibSqlBackend::new_memory().await.unwrap();

    let profile = classify(&onboarding_answers()).unwrap();
    db.upsert_profile("user-1", &profile, true).await.unwrap();

    // The user settles down: anxious → determined. The distress rule no
    // longer fires, so the ivf-over-35 rule picks the theme.
    let patch = ProfilePatch {
        emotional_state: Some(EmotionalState::Determined),
        ..Default::default()
    };
    let stored = db.get_profile("user-1").await.unwrap().unwrap();
    let updated = update(&stored.profile, &patch);
    assert_eq!(updated.theme, ThemeName::StrengthGray);

    db.upsert_profile("user-1", &updated, true).await.unwrap();
    let reloaded = db.get_profile("user-1").await.unwrap().unwrap();
    assert_eq!(reloaded.profile, updated);
}

#[tokio::test]
async fn recommendations_for_empty_catalog_are_empty() {
    let db = LibSqlBackend::new_memory().await.unwrap();
    let profile = classify(&onboarding_answers()).unwrap();

    let candidates = db
        .providers_for_journey(profile.journey_type, 10)
        .await
        .unwrap();
    let recommendations = score_providers(candidates, &profile, None);
    assert!(recommendations.is_empty());
}
