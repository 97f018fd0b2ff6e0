//! Persona profile data model.
//!
//! The `PersonaProfile` is the canonical description of a user's situation,
//! built once at onboarding completion and replaced wholesale on update.
//! Every enumeration here is closed: unrecognized values are rejected at the
//! classification boundary rather than coerced.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::persona::theme::ThemeName;

/// The family-building path the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyType {
    NaturalConception,
    Ivf,
    DomesticAdoption,
    InternationalAdoption,
    Surrogacy,
    EggFreezing,
}

impl std::fmt::Display for JourneyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NaturalConception => "natural_conception",
            Self::Ivf => "ivf",
            Self::DomesticAdoption => "domestic_adoption",
            Self::InternationalAdoption => "international_adoption",
            Self::Surrogacy => "surrogacy",
            Self::EggFreezing => "egg_freezing",
        };
        write!(f, "{s}")
    }
}

impl FromStr for JourneyType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "natural_conception" => Ok(Self::NaturalConception),
            "ivf" => Ok(Self::Ivf),
            "domestic_adoption" => Ok(Self::DomesticAdoption),
            "international_adoption" => Ok(Self::InternationalAdoption),
            "surrogacy" => Ok(Self::Surrogacy),
            "egg_freezing" => Ok(Self::EggFreezing),
            _ => Err(()),
        }
    }
}

/// Self-reported emotional state at onboarding time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    Optimistic,
    Anxious,
    Determined,
    Overwhelmed,
    Hopeful,
    Cautious,
}

impl std::fmt::Display for EmotionalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Optimistic => "optimistic",
            Self::Anxious => "anxious",
            Self::Determined => "determined",
            Self::Overwhelmed => "overwhelmed",
            Self::Hopeful => "hopeful",
            Self::Cautious => "cautious",
        };
        write!(f, "{s}")
    }
}

impl FromStr for EmotionalState {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "optimistic" => Ok(Self::Optimistic),
            "anxious" => Ok(Self::Anxious),
            "determined" => Ok(Self::Determined),
            "overwhelmed" => Ok(Self::Overwhelmed),
            "hopeful" => Ok(Self::Hopeful),
            "cautious" => Ok(Self::Cautious),
            _ => Err(()),
        }
    }
}

/// Age bracket, always derived from an integer age — never supplied directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-30")]
    From26To30,
    #[serde(rename = "31-35")]
    From31To35,
    #[serde(rename = "36-40")]
    From36To40,
    #[serde(rename = "41-45")]
    From41To45,
    #[serde(rename = "46+")]
    Over45,
}

impl AgeGroup {
    /// Map an integer age onto its bracket (half-open bins).
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=25 => Self::From18To25,
            26..=30 => Self::From26To30,
            31..=35 => Self::From31To35,
            36..=40 => Self::From36To40,
            41..=45 => Self::From41To45,
            _ => Self::Over45,
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::From18To25 => "18-25",
            Self::From26To30 => "26-30",
            Self::From31To35 => "31-35",
            Self::From36To40 => "36-40",
            Self::From41To45 => "41-45",
            Self::Over45 => "46+",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    #[default]
    Single,
    Partnered,
    Married,
    Divorced,
    Widowed,
}

impl FromStr for RelationshipStatus {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "single" => Ok(Self::Single),
            "partnered" => Ok(Self::Partnered),
            "married" => Ok(Self::Married),
            "divorced" => Ok(Self::Divorced),
            "widowed" => Ok(Self::Widowed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FinancialReadiness {
    Limited,
    #[default]
    Moderate,
    Comfortable,
    WellResourced,
}

impl FromStr for FinancialReadiness {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "limited" => Ok(Self::Limited),
            "moderate" => Ok(Self::Moderate),
            "comfortable" => Ok(Self::Comfortable),
            "well_resourced" => Ok(Self::WellResourced),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SupportSystem {
    Strong,
    #[default]
    Moderate,
    Limited,
}

impl FromStr for SupportSystem {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "strong" => Ok(Self::Strong),
            "moderate" => Ok(Self::Moderate),
            "limited" => Ok(Self::Limited),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Excellent,
    #[default]
    Good,
    Fair,
    Concerns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimelineUrgency {
    Flexible,
    #[default]
    Moderate,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    #[default]
    College,
    Graduate,
    Professional,
}

impl FromStr for EducationLevel {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "high_school" => Ok(Self::HighSchool),
            "college" => Ok(Self::College),
            "graduate" => Ok(Self::Graduate),
            "professional" => Ok(Self::Professional),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Urban,
    #[default]
    Suburban,
    Rural,
}

impl FromStr for LocationType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "urban" => Ok(Self::Urban),
            "suburban" => Ok(Self::Suburban),
            "rural" => Ok(Self::Rural),
            _ => Err(()),
        }
    }
}

/// Structured classification of a user's situation, driving personalization.
///
/// Stored in `user_profiles.persona_profile` as JSON. Immutable except via
/// full replacement through [`crate::persona::classifier::update`].
///
/// `theme` is always a function of `journey_type`, `emotional_state`, and
/// `age_group` under the current rule table; it is recomputed by the
/// classifier whenever any of those change and is never accepted from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub journey_type: JourneyType,
    pub emotional_state: EmotionalState,
    pub age_group: AgeGroup,
    pub relationship_status: RelationshipStatus,
    pub financial_readiness: FinancialReadiness,
    pub support_system: SupportSystem,
    pub health_status: HealthStatus,
    /// Free-form priority tags. A set: order irrelevant, duplicates collapse.
    #[serde(default)]
    pub priorities: BTreeSet<String>,
    pub theme: ThemeName,
    pub timeline_urgency: TimelineUrgency,
    pub education_level: EducationLevel,
    pub location_type: LocationType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_group_bin_edges() {
        assert_eq!(AgeGroup::from_age(18), AgeGroup::From18To25);
        assert_eq!(AgeGroup::from_age(25), AgeGroup::From18To25);
        assert_eq!(AgeGroup::from_age(26), AgeGroup::From26To30);
        assert_eq!(AgeGroup::from_age(30), AgeGroup::From26To30);
        assert_eq!(AgeGroup::from_age(31), AgeGroup::From31To35);
        assert_eq!(AgeGroup::from_age(35), AgeGroup::From31To35);
        assert_eq!(AgeGroup::from_age(36), AgeGroup::From36To40);
        assert_eq!(AgeGroup::from_age(40), AgeGroup::From36To40);
        assert_eq!(AgeGroup::from_age(41), AgeGroup::From41To45);
        assert_eq!(AgeGroup::from_age(45), AgeGroup::From41To45);
        assert_eq!(AgeGroup::from_age(46), AgeGroup::Over45);
        assert_eq!(AgeGroup::from_age(60), AgeGroup::Over45);
    }

    #[test]
    fn age_group_serde_uses_bracket_labels() {
        let json = serde_json::to_string(&AgeGroup::From36To40).unwrap();
        assert_eq!(json, "\"36-40\"");
        let json = serde_json::to_string(&AgeGroup::Over45).unwrap();
        assert_eq!(json, "\"46+\"");

        let parsed: AgeGroup = serde_json::from_str("\"41-45\"").unwrap();
        assert_eq!(parsed, AgeGroup::From41To45);
    }

    #[test]
    fn display_matches_serde() {
        let journeys = [
            JourneyType::NaturalConception,
            JourneyType::Ivf,
            JourneyType::DomesticAdoption,
            JourneyType::InternationalAdoption,
            JourneyType::Surrogacy,
            JourneyType::EggFreezing,
        ];
        for j in journeys {
            let json = serde_json::to_string(&j).unwrap();
            assert_eq!(json, format!("\"{j}\""));
        }

        let states = [
            EmotionalState::Optimistic,
            EmotionalState::Anxious,
            EmotionalState::Determined,
            EmotionalState::Overwhelmed,
            EmotionalState::Hopeful,
            EmotionalState::Cautious,
        ];
        for s in states {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{s}\""));
        }
    }

    #[test]
    fn from_str_roundtrips_display() {
        for j in ["natural_conception", "ivf", "surrogacy", "egg_freezing"] {
            let parsed: JourneyType = j.parse().unwrap();
            assert_eq!(parsed.to_string(), j);
        }
        assert!("unknown".parse::<JourneyType>().is_err());
        assert!("IVF".parse::<JourneyType>().is_err());
    }

    #[test]
    fn priorities_collapse_duplicates() {
        let mut priorities = BTreeSet::new();
        priorities.insert("cost".to_string());
        priorities.insert("cost".to_string());
        priorities.insert("success_rates".to_string());
        assert_eq!(priorities.len(), 2);
    }
}
