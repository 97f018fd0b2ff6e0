//! Personalized dashboard content derived from a persona profile.
//!
//! Pure functions: the profile in, display-ready strings out. The UI layer
//! owns rendering; this module only decides *what* to surface.

use serde::Serialize;

use crate::persona::model::{
    AgeGroup, EmotionalState, FinancialReadiness, JourneyType, PersonaProfile, RelationshipStatus,
    SupportSystem, TimelineUrgency,
};

/// The full personalized content bundle for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalizedContent {
    pub welcome_message: String,
    pub prioritized_features: Vec<String>,
    pub provider_categories: Vec<String>,
    pub educational_topics: Vec<String>,
    pub support_resources: Vec<String>,
}

/// Assemble all personalized content for a profile.
pub fn personalized_content(profile: &PersonaProfile) -> PersonalizedContent {
    PersonalizedContent {
        welcome_message: welcome_message(profile),
        prioritized_features: prioritized_features(profile),
        provider_categories: provider_categories(profile),
        educational_topics: educational_topics(profile),
        support_resources: support_resources(profile),
    }
}

/// Per-journey welcome greeting.
pub fn welcome_message(profile: &PersonaProfile) -> String {
    let message = match profile.journey_type {
        JourneyType::Ivf => {
            "Welcome to your IVF journey. We're here to support you every step of the way."
        }
        JourneyType::NaturalConception => {
            "Welcome! Let's explore natural paths to parenthood together."
        }
        JourneyType::DomesticAdoption => {
            "Welcome to your adoption journey. We'll help you navigate this meaningful path."
        }
        JourneyType::InternationalAdoption => {
            "Welcome! International adoption is a beautiful journey, and we're here to guide you."
        }
        JourneyType::Surrogacy => {
            "Welcome to your surrogacy journey. We'll help you understand and navigate this process."
        }
        JourneyType::EggFreezing => {
            "Welcome! Let's explore egg freezing options to preserve your future fertility."
        }
    };
    message.to_string()
}

/// Features to surface, most relevant first.
pub fn prioritized_features(profile: &PersonaProfile) -> Vec<String> {
    let mut features: Vec<String> = [
        "AI Concierge",
        "Journey Dashboard",
        "Provider Marketplace",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    if profile.financial_readiness == FinancialReadiness::Limited
        || profile.priorities.contains("cost")
    {
        features.insert(0, "Insurance Optimizer".to_string());
        features.insert(0, "Cost Calculator".to_string());
    }

    if profile.emotional_state == EmotionalState::Anxious
        || profile.support_system == SupportSystem::Limited
    {
        features.push("Support Groups".to_string());
        features.push("Mental Health Resources".to_string());
    }

    if profile.timeline_urgency == TimelineUrgency::Urgent {
        features.insert(0, "Fast Track Appointments".to_string());
    }

    features
}

/// Provider categories worth browsing for this journey.
pub fn provider_categories(profile: &PersonaProfile) -> Vec<String> {
    let mut categories: Vec<&str> = match profile.journey_type {
        JourneyType::Ivf | JourneyType::EggFreezing => {
            vec!["fertility_clinic", "reproductive_endocrinologist"]
        }
        JourneyType::NaturalConception => {
            vec!["obgyn", "fertility_specialist", "nutritionist"]
        }
        JourneyType::DomesticAdoption | JourneyType::InternationalAdoption => {
            vec!["adoption_agency", "adoption_attorney", "social_worker"]
        }
        JourneyType::Surrogacy => {
            vec!["surrogacy_agency", "reproductive_attorney", "fertility_clinic"]
        }
    };

    if profile.emotional_state == EmotionalState::Anxious
        || profile.support_system == SupportSystem::Limited
    {
        categories.push("therapist");
        categories.push("support_group");
    }

    categories.iter().map(|s| s.to_string()).collect()
}

/// Educational topics matched to the profile.
pub fn educational_topics(profile: &PersonaProfile) -> Vec<String> {
    let mut topics = vec![
        format!("{}_basics", profile.journey_type),
        format!("{}_timeline", profile.journey_type),
    ];

    if matches!(
        profile.age_group,
        AgeGroup::From36To40 | AgeGroup::From41To45 | AgeGroup::Over45
    ) {
        topics.push("age_related_fertility".to_string());
    }

    if profile.financial_readiness == FinancialReadiness::Limited {
        topics.push("financing_options".to_string());
        topics.push("insurance_coverage".to_string());
    }

    if profile.priorities.contains("success_rates") {
        topics.push("success_rate_analysis".to_string());
        topics.push("clinic_comparison".to_string());
    }

    topics
}

/// Support resources matched to the profile.
pub fn support_resources(profile: &PersonaProfile) -> Vec<String> {
    let mut resources = vec!["peer_support_groups".to_string()];

    if matches!(
        profile.emotional_state,
        EmotionalState::Anxious | EmotionalState::Overwhelmed
    ) {
        resources.push("anxiety_management".to_string());
        resources.push("stress_reduction".to_string());
    }

    if matches!(
        profile.relationship_status,
        RelationshipStatus::Partnered | RelationshipStatus::Married
    ) {
        resources.push("couples_counseling".to_string());
        resources.push("relationship_support".to_string());
    }

    if profile.support_system == SupportSystem::Limited {
        resources.push("online_communities".to_string());
        resources.push("mentorship_program".to_string());
    }

    resources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::classifier::{OnboardingInput, classify};

    fn profile_for(journey: &str, state: &str, age: u32) -> PersonaProfile {
        classify(&OnboardingInput {
            journey_type: Some(journey.into()),
            emotional_state: Some(state.into()),
            age: Some(age),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn welcome_message_varies_by_journey() {
        let ivf = profile_for("ivf", "hopeful", 30);
        assert!(welcome_message(&ivf).contains("IVF"));

        let adoption = profile_for("domestic_adoption", "hopeful", 30);
        assert!(welcome_message(&adoption).contains("adoption"));
    }

    #[test]
    fn limited_finances_front_load_cost_tools() {
        let mut profile = profile_for("ivf", "hopeful", 30);
        profile.financial_readiness = FinancialReadiness::Limited;
        let features = prioritized_features(&profile);
        assert_eq!(features[0], "Cost Calculator");
        assert_eq!(features[1], "Insurance Optimizer");
    }

    #[test]
    fn cost_priority_also_front_loads_cost_tools() {
        let mut profile = profile_for("ivf", "hopeful", 30);
        profile.priorities.insert("cost".to_string());
        let features = prioritized_features(&profile);
        assert_eq!(features[0], "Cost Calculator");
    }

    #[test]
    fn urgency_puts_fast_track_first() {
        let mut profile = profile_for("ivf", "hopeful", 30);
        profile.financial_readiness = FinancialReadiness::Limited;
        profile.timeline_urgency = TimelineUrgency::Urgent;
        let features = prioritized_features(&profile);
        // Urgency outranks even the cost tools.
        assert_eq!(features[0], "Fast Track Appointments");
        assert_eq!(features[1], "Cost Calculator");
    }

    #[test]
    fn anxious_profiles_get_support_features_and_categories() {
        let profile = profile_for("ivf", "anxious", 30);
        let features = prioritized_features(&profile);
        assert!(features.contains(&"Support Groups".to_string()));
        assert!(features.contains(&"Mental Health Resources".to_string()));

        let categories = provider_categories(&profile);
        assert!(categories.contains(&"therapist".to_string()));
        assert!(categories.contains(&"support_group".to_string()));
    }

    #[test]
    fn provider_categories_by_journey() {
        let surrogacy = profile_for("surrogacy", "hopeful", 30);
        let categories = provider_categories(&surrogacy);
        assert_eq!(categories[0], "surrogacy_agency");

        let natural = profile_for("natural_conception", "hopeful", 30);
        assert!(provider_categories(&natural).contains(&"nutritionist".to_string()));
    }

    #[test]
    fn educational_topics_follow_journey_and_age() {
        let profile = profile_for("ivf", "hopeful", 42);
        let topics = educational_topics(&profile);
        assert!(topics.contains(&"ivf_basics".to_string()));
        assert!(topics.contains(&"ivf_timeline".to_string()));
        assert!(topics.contains(&"age_related_fertility".to_string()));

        let young = profile_for("ivf", "hopeful", 28);
        assert!(!educational_topics(&young).contains(&"age_related_fertility".to_string()));
    }

    #[test]
    fn support_resources_follow_state_and_relationships() {
        let mut profile = profile_for("ivf", "overwhelmed", 30);
        profile.relationship_status = RelationshipStatus::Married;
        profile.support_system = SupportSystem::Limited;
        let resources = support_resources(&profile);
        assert_eq!(resources[0], "peer_support_groups");
        assert!(resources.contains(&"anxiety_management".to_string()));
        assert!(resources.contains(&"couples_counseling".to_string()));
        assert!(resources.contains(&"online_communities".to_string()));
    }
}
