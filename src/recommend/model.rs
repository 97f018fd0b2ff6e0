//! Provider and recommendation data models.
//!
//! `Provider` records are externally owned reference data, read-only to the
//! scorer. `Recommendation` values are transient: recomputed per request,
//! never persisted.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Appointment availability advertised by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Immediate,
    Scheduled,
    Waitlist,
}

/// Provider location details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

/// Optional outcome metrics reported for a provider.
///
/// Both rates are fractions in [0, 1]. Absence means the metric is unknown,
/// which the scorer treats as "condition not met", never as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_effectiveness: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    #[default]
    Pending,
    Unverified,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Verified => "verified",
            Self::Pending => "pending",
            Self::Unverified => "unverified",
        };
        write!(f, "{s}")
    }
}

/// A candidate service provider (clinic, agency, specialist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub provider_type: String,
    /// Specialization tags, e.g. `ivf`, `emotional_support`.
    #[serde(default)]
    pub specializations: BTreeSet<String>,
    #[serde(default)]
    pub location_data: LocationData,
    /// Average patient rating, 0.0–5.0.
    pub rating_average: f64,
    pub total_ratings: u32,
    /// Accepted insurance plan identifiers.
    #[serde(default)]
    pub insurance_accepted: BTreeSet<String>,
    #[serde(default)]
    pub outcome_metrics: OutcomeMetrics,
    #[serde(default)]
    pub verification_status: VerificationStatus,
}

/// User-stated preferences supplied alongside a scoring request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_plan: Option<String>,
}

/// A provider ranked and annotated for a given profile and preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub provider: Provider,
    /// 0–100 inclusive.
    pub recommendation_score: f64,
    /// Human-readable reasons in fixed evaluation order. Each reason is
    /// independently derivable from the inputs.
    pub match_reasons: Vec<String>,
}
