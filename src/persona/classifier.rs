//! Persona classification — onboarding input to `PersonaProfile`.
//!
//! Onboarding arrives as a loosely-typed record. We model it as a struct of
//! optional raw fields and validate it here, so a `PersonaProfile` can only
//! be constructed from recognized values. Required fields fail the call;
//! optional fields take documented defaults.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PersonaError;
use crate::persona::model::{
    AgeGroup, EducationLevel, EmotionalState, FinancialReadiness, HealthStatus, JourneyType,
    LocationType, PersonaProfile, RelationshipStatus, SupportSystem, TimelineUrgency,
};
use crate::persona::theme::select_theme;

/// Raw onboarding answers, exactly as collected.
///
/// Field names mirror the onboarding form (`financial_situation`,
/// `timeline`, `education`, `location`), not the profile. Everything is
/// optional at this layer; [`classify`] decides what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingInput {
    pub journey_type: Option<String>,
    pub emotional_state: Option<String>,
    pub age: Option<u32>,
    pub relationship_status: Option<String>,
    pub financial_situation: Option<String>,
    pub support_system: Option<String>,
    pub health_concerns: Option<bool>,
    pub timeline: Option<String>,
    pub education: Option<String>,
    pub location: Option<String>,
    pub priorities: Option<Vec<String>>,
}

/// Parse a required enumeration field.
fn parse_required<T: FromStr>(
    field: &'static str,
    value: Option<&str>,
) -> Result<T, PersonaError> {
    let raw = value.ok_or(PersonaError::MissingRequiredField { field })?;
    raw.parse()
        .map_err(|_| PersonaError::InvalidEnumValue {
            field,
            value: raw.to_string(),
        })
}

/// Parse an optional enumeration field, defaulting when absent.
///
/// A present-but-unrecognized value is still an error: optional fields are
/// defaulted, never silently coerced.
fn parse_optional<T: FromStr + Default>(
    field: &'static str,
    value: Option<&str>,
) -> Result<T, PersonaError> {
    match value {
        Some(raw) => raw.parse().map_err(|_| PersonaError::InvalidEnumValue {
            field,
            value: raw.to_string(),
        }),
        None => Ok(T::default()),
    }
}

/// Build a `PersonaProfile` from raw onboarding input.
///
/// `journey_type`, `emotional_state`, and `age` are required. The timeline
/// answer maps leniently ("urgent" and "flexible" pass through, anything
/// else — including absence — becomes moderate), matching the onboarding
/// form's free-text timeline step. The theme is always computed from the
/// classified attributes, never read from input.
pub fn classify(input: &OnboardingInput) -> Result<PersonaProfile, PersonaError> {
    let journey_type: JourneyType =
        parse_required("journey_type", input.journey_type.as_deref())?;
    let emotional_state: EmotionalState =
        parse_required("emotional_state", input.emotional_state.as_deref())?;

    let age = input
        .age
        .ok_or(PersonaError::MissingRequiredField { field: "age" })?;
    let age_group = AgeGroup::from_age(age);

    let relationship_status: RelationshipStatus =
        parse_optional("relationship_status", input.relationship_status.as_deref())?;
    // `financial_situation` on the form is `financial_readiness` on the
    // profile — a straight rename.
    let financial_readiness: FinancialReadiness =
        parse_optional("financial_situation", input.financial_situation.as_deref())?;
    let support_system: SupportSystem =
        parse_optional("support_system", input.support_system.as_deref())?;
    let education_level: EducationLevel =
        parse_optional("education", input.education.as_deref())?;
    let location_type: LocationType = parse_optional("location", input.location.as_deref())?;

    let health_status = if input.health_concerns.unwrap_or(false) {
        HealthStatus::Concerns
    } else {
        HealthStatus::Good
    };

    let timeline_urgency = match input.timeline.as_deref() {
        Some("urgent") => TimelineUrgency::Urgent,
        Some("flexible") => TimelineUrgency::Flexible,
        _ => TimelineUrgency::Moderate,
    };

    let priorities: BTreeSet<String> = input
        .priorities
        .as_deref()
        .unwrap_or_default()
        .iter()
        .cloned()
        .collect();

    let theme = select_theme(journey_type, emotional_state, age_group);

    Ok(PersonaProfile {
        journey_type,
        emotional_state,
        age_group,
        relationship_status,
        financial_readiness,
        support_system,
        health_status,
        priorities,
        theme,
        timeline_urgency,
        education_level,
        location_type,
    })
}

/// A field-level patch to an existing profile.
///
/// Present fields overwrite, absent fields are untouched. There is no
/// `theme` field: the theme is recomputed, never patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub journey_type: Option<JourneyType>,
    pub emotional_state: Option<EmotionalState>,
    pub age_group: Option<AgeGroup>,
    pub relationship_status: Option<RelationshipStatus>,
    pub financial_readiness: Option<FinancialReadiness>,
    pub support_system: Option<SupportSystem>,
    pub health_status: Option<HealthStatus>,
    pub priorities: Option<BTreeSet<String>>,
    pub timeline_urgency: Option<TimelineUrgency>,
    pub education_level: Option<EducationLevel>,
    pub location_type: Option<LocationType>,
}

impl ProfilePatch {
    /// Whether applying this patch can change the theme.
    fn touches_theme_inputs(&self) -> bool {
        self.journey_type.is_some() || self.emotional_state.is_some()
    }
}

/// Apply a patch to a profile, returning a new profile value.
///
/// If `journey_type` or `emotional_state` is among the patched fields, the
/// theme is recomputed from the post-merge attribute values. The input
/// profile is never mutated.
pub fn update(profile: &PersonaProfile, patch: &ProfilePatch) -> PersonaProfile {
    let mut updated = profile.clone();

    if let Some(journey_type) = patch.journey_type {
        updated.journey_type = journey_type;
    }
    if let Some(emotional_state) = patch.emotional_state {
        updated.emotional_state = emotional_state;
    }
    if let Some(age_group) = patch.age_group {
        updated.age_group = age_group;
    }
    if let Some(relationship_status) = patch.relationship_status {
        updated.relationship_status = relationship_status;
    }
    if let Some(financial_readiness) = patch.financial_readiness {
        updated.financial_readiness = financial_readiness;
    }
    if let Some(support_system) = patch.support_system {
        updated.support_system = support_system;
    }
    if let Some(health_status) = patch.health_status {
        updated.health_status = health_status;
    }
    if let Some(ref priorities) = patch.priorities {
        updated.priorities = priorities.clone();
    }
    if let Some(timeline_urgency) = patch.timeline_urgency {
        updated.timeline_urgency = timeline_urgency;
    }
    if let Some(education_level) = patch.education_level {
        updated.education_level = education_level;
    }
    if let Some(location_type) = patch.location_type {
        updated.location_type = location_type;
    }

    if patch.touches_theme_inputs() {
        updated.theme = select_theme(
            updated.journey_type,
            updated.emotional_state,
            updated.age_group,
        );
    }

    updated
}
