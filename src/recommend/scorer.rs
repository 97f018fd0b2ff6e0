//! Provider scoring and ranking against a persona profile.
//!
//! The scorer is total: it never errors. Missing optional provider fields
//! mean the relevant bonus simply does not apply, and an empty candidate
//! list yields an empty result. Candidates arrive pre-filtered for
//! eligibility (verification, geography) by the store query; no filtering
//! happens here.

use crate::persona::model::{EmotionalState, FinancialReadiness, PersonaProfile, TimelineUrgency};
use crate::recommend::model::{Availability, Preferences, Provider, Recommendation};

/// Base multiplier: a 5.0-star provider starts at 100.
const RATING_MULTIPLIER: f64 = 20.0;

/// Upper clamp on the final score. There is no lower clamp: a 0-star
/// provider with no bonuses legitimately scores 0.
const MAX_SCORE: f64 = 100.0;

const COST_EFFECTIVENESS_BONUS: f64 = 15.0;
const EMOTIONAL_SUPPORT_BONUS: f64 = 10.0;
const AVAILABILITY_BONUS: f64 = 10.0;
const INSURANCE_BONUS: f64 = 20.0;

/// Rating at or above which a provider counts as highly rated.
const HIGHLY_RATED_THRESHOLD: f64 = 4.5;

/// Success rate above which the "High success rate" reason applies.
const HIGH_SUCCESS_THRESHOLD: f64 = 0.7;

/// Score and rank a candidate set against a profile and preferences.
///
/// Results are sorted by score descending; ties break by rating average
/// descending, then provider id ascending, so ordering is reproducible
/// regardless of input order.
pub fn score_providers(
    providers: Vec<Provider>,
    profile: &PersonaProfile,
    preferences: Option<&Preferences>,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = providers
        .into_iter()
        .map(|provider| {
            let recommendation_score = compute_score(&provider, profile, preferences);
            let match_reasons = match_reasons(&provider, profile, preferences);
            Recommendation {
                provider,
                recommendation_score,
                match_reasons,
            }
        })
        .collect();

    recommendations.sort_by(|a, b| {
        b.recommendation_score
            .total_cmp(&a.recommendation_score)
            .then_with(|| b.provider.rating_average.total_cmp(&a.provider.rating_average))
            .then_with(|| a.provider.id.cmp(&b.provider.id))
    });

    recommendations
}

/// Compute the clamped score for one provider.
///
/// Starts from the rating base, then applies additive bonuses. Each bonus is
/// independently triggered; several may apply to the same provider.
fn compute_score(
    provider: &Provider,
    profile: &PersonaProfile,
    preferences: Option<&Preferences>,
) -> f64 {
    let mut score = provider.rating_average * RATING_MULTIPLIER;

    if profile.financial_readiness == FinancialReadiness::Limited
        && provider.outcome_metrics.cost_effectiveness.is_some()
    {
        score += COST_EFFECTIVENESS_BONUS;
    }

    if profile.emotional_state == EmotionalState::Anxious
        && provider.specializations.contains("emotional_support")
    {
        score += EMOTIONAL_SUPPORT_BONUS;
    }

    if profile.timeline_urgency == TimelineUrgency::Urgent
        && provider.location_data.availability == Some(Availability::Immediate)
    {
        score += AVAILABILITY_BONUS;
    }

    if insurance_matches(provider, preferences) {
        score += INSURANCE_BONUS;
    }

    score.min(MAX_SCORE)
}

/// Generate the explanation list for one provider, in fixed order.
///
/// Reasons are evaluated independently of the numeric score, but every
/// bonus-granting condition that fires has a reason here so no score
/// movement goes unexplained.
fn match_reasons(
    provider: &Provider,
    profile: &PersonaProfile,
    preferences: Option<&Preferences>,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if provider.rating_average >= HIGHLY_RATED_THRESHOLD {
        reasons.push("Highly rated by patients".to_string());
    }

    if provider
        .specializations
        .contains(&profile.journey_type.to_string())
    {
        reasons.push(format!("Specializes in {}", profile.journey_type));
    }

    if profile.financial_readiness == FinancialReadiness::Limited
        && provider.outcome_metrics.cost_effectiveness.is_some()
    {
        reasons.push("Strong cost effectiveness".to_string());
    }

    if profile.emotional_state == EmotionalState::Anxious
        && provider.specializations.contains("emotional_support")
    {
        reasons.push("Provides emotional support services".to_string());
    }

    if profile.timeline_urgency == TimelineUrgency::Urgent
        && provider.location_data.availability == Some(Availability::Immediate)
    {
        reasons.push("Immediate availability".to_string());
    }

    if insurance_matches(provider, preferences) {
        reasons.push("Accepts your insurance".to_string());
    }

    if provider
        .outcome_metrics
        .success_rate
        .is_some_and(|rate| rate > HIGH_SUCCESS_THRESHOLD)
    {
        reasons.push("High success rate".to_string());
    }

    reasons
}

fn insurance_matches(provider: &Provider, preferences: Option<&Preferences>) -> bool {
    preferences
        .and_then(|p| p.insurance_plan.as_deref())
        .is_some_and(|plan| provider.insurance_accepted.contains(plan))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::persona::classifier::{OnboardingInput, classify};
    use crate::recommend::model::{LocationData, OutcomeMetrics, VerificationStatus};

    fn profile(state: &str, financial: &str, timeline: &str) -> PersonaProfile {
        classify(&OnboardingInput {
            journey_type: Some("ivf".into()),
            emotional_state: Some(state.into()),
            age: Some(34),
            financial_situation: Some(financial.into()),
            timeline: Some(timeline.into()),
            ..Default::default()
        })
        .unwrap()
    }

    fn provider(id: &str, rating: f64) -> Provider {
        Provider {
            id: id.into(),
            name: format!("Provider {id}"),
            provider_type: "fertility_clinic".into(),
            specializations: BTreeSet::new(),
            location_data: LocationData::default(),
            rating_average: rating,
            total_ratings: 50,
            insurance_accepted: BTreeSet::new(),
            outcome_metrics: OutcomeMetrics::default(),
            verification_status: VerificationStatus::Verified,
        }
    }

    #[test]
    fn base_score_is_rating_times_twenty() {
        let profile = profile("hopeful", "comfortable", "moderate");
        let recs = score_providers(vec![provider("a", 4.0)], &profile, None);
        assert_eq!(recs[0].recommendation_score, 80.0);
    }

    #[test]
    fn all_bonuses_clamp_at_exactly_100() {
        let profile = profile("anxious", "limited", "urgent");

        let mut p = provider("a", 5.0);
        p.specializations.insert("emotional_support".into());
        p.location_data.availability = Some(Availability::Immediate);
        p.outcome_metrics.cost_effectiveness = Some(0.9);
        p.insurance_accepted.insert("acme_gold".into());

        let prefs = Preferences {
            insurance_plan: Some("acme_gold".into()),
        };

        // Raw: 100 + 15 + 10 + 10 + 20 = 155, clamped.
        let recs = score_providers(vec![p], &profile, Some(&prefs));
        assert_eq!(recs[0].recommendation_score, 100.0);
    }

    #[test]
    fn zero_star_no_bonus_scores_zero_with_no_reasons() {
        let profile = profile("hopeful", "comfortable", "moderate");
        let recs = score_providers(vec![provider("a", 0.0)], &profile, None);
        assert_eq!(recs[0].recommendation_score, 0.0);
        assert!(recs[0].match_reasons.is_empty());
    }

    #[test]
    fn bonuses_are_independent() {
        let profile = profile("anxious", "comfortable", "moderate");

        let mut p = provider("a", 3.0);
        p.specializations.insert("emotional_support".into());

        // Only the emotional-support bonus applies: 60 + 10.
        let recs = score_providers(vec![p], &profile, None);
        assert_eq!(recs[0].recommendation_score, 70.0);
    }

    #[test]
    fn cost_effectiveness_bonus_requires_limited_readiness() {
        let mut p = provider("a", 3.0);
        p.outcome_metrics.cost_effectiveness = Some(0.8);

        let limited = profile("hopeful", "limited", "moderate");
        let recs = score_providers(vec![p.clone()], &limited, None);
        assert_eq!(recs[0].recommendation_score, 75.0);

        let comfortable = profile("hopeful", "comfortable", "moderate");
        let recs = score_providers(vec![p], &comfortable, None);
        assert_eq!(recs[0].recommendation_score, 60.0);
    }

    #[test]
    fn availability_bonus_requires_urgency_and_immediate() {
        let mut p = provider("a", 3.0);
        p.location_data.availability = Some(Availability::Scheduled);

        let urgent = profile("hopeful", "comfortable", "urgent");
        let recs = score_providers(vec![p.clone()], &urgent, None);
        assert_eq!(recs[0].recommendation_score, 60.0);

        p.location_data.availability = Some(Availability::Immediate);
        let recs = score_providers(vec![p], &urgent, None);
        assert_eq!(recs[0].recommendation_score, 70.0);
    }

    #[test]
    fn insurance_bonus_requires_plan_match() {
        let mut p = provider("a", 3.0);
        p.insurance_accepted.insert("acme_gold".into());
        let profile = profile("hopeful", "comfortable", "moderate");

        let matching = Preferences {
            insurance_plan: Some("acme_gold".into()),
        };
        let recs = score_providers(vec![p.clone()], &profile, Some(&matching));
        assert_eq!(recs[0].recommendation_score, 80.0);
        assert!(recs[0]
            .match_reasons
            .contains(&"Accepts your insurance".to_string()));

        let other = Preferences {
            insurance_plan: Some("other_plan".into()),
        };
        let recs = score_providers(vec![p], &profile, Some(&other));
        assert_eq!(recs[0].recommendation_score, 60.0);
    }

    #[test]
    fn reasons_preserve_fixed_order() {
        let profile = profile("anxious", "comfortable", "moderate");

        let mut p = provider("a", 4.8);
        p.specializations.insert("ivf".into());
        p.specializations.insert("emotional_support".into());
        p.insurance_accepted.insert("acme_gold".into());
        p.outcome_metrics.success_rate = Some(0.85);

        let prefs = Preferences {
            insurance_plan: Some("acme_gold".into()),
        };
        let recs = score_providers(vec![p], &profile, Some(&prefs));
        assert_eq!(
            recs[0].match_reasons,
            vec![
                "Highly rated by patients",
                "Specializes in ivf",
                "Provides emotional support services",
                "Accepts your insurance",
                "High success rate",
            ]
        );
    }

    #[test]
    fn reasons_can_exist_without_bonus() {
        // A high success rate produces a reason but no numeric bonus.
        let profile = profile("hopeful", "comfortable", "moderate");
        let mut p = provider("a", 3.0);
        p.outcome_metrics.success_rate = Some(0.9);

        let recs = score_providers(vec![p], &profile, None);
        assert_eq!(recs[0].recommendation_score, 60.0);
        assert_eq!(recs[0].match_reasons, vec!["High success rate"]);
    }

    #[test]
    fn every_bonus_has_a_matching_reason() {
        let profile = profile("anxious", "limited", "urgent");

        let mut p = provider("a", 2.0);
        p.specializations.insert("emotional_support".into());
        p.location_data.availability = Some(Availability::Immediate);
        p.outcome_metrics.cost_effectiveness = Some(0.9);
        p.insurance_accepted.insert("acme_gold".into());

        let prefs = Preferences {
            insurance_plan: Some("acme_gold".into()),
        };
        let recs = score_providers(vec![p], &profile, Some(&prefs));
        // 40 + 15 + 10 + 10 + 20 = 95; four bonuses, four reasons.
        assert_eq!(recs[0].recommendation_score, 95.0);
        assert_eq!(
            recs[0].match_reasons,
            vec![
                "Strong cost effectiveness",
                "Provides emotional support services",
                "Immediate availability",
                "Accepts your insurance",
            ]
        );
    }

    #[test]
    fn exact_success_threshold_produces_no_reason() {
        let profile = profile("hopeful", "comfortable", "moderate");
        let mut p = provider("a", 3.0);
        p.outcome_metrics.success_rate = Some(0.7);
        let recs = score_providers(vec![p], &profile, None);
        assert!(recs[0].match_reasons.is_empty());
    }

    #[test]
    fn ranking_is_score_descending() {
        let profile = profile("hopeful", "comfortable", "moderate");
        let recs = score_providers(
            vec![provider("low", 2.0), provider("high", 4.9), provider("mid", 3.5)],
            &profile,
            None,
        );
        let ids: Vec<&str> = recs.iter().map(|r| r.provider.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn ties_break_by_rating_then_id() {
        let profile = profile("hopeful", "limited", "moderate");

        // b scores 60 from rating alone; a scores 45 + 15 cost bonus = 60
        // with a lower rating. Equal scores: higher rating first.
        let mut a = provider("a", 2.25);
        a.outcome_metrics.cost_effectiveness = Some(0.8);
        let b = provider("b", 3.0);

        let recs = score_providers(vec![a, b], &profile, None);
        assert_eq!(recs[0].recommendation_score, recs[1].recommendation_score);
        assert_eq!(recs[0].provider.id, "b");

        // Identical score and rating: id ascending, regardless of input order.
        let recs = score_providers(vec![provider("z", 3.0), provider("m", 3.0)], &profile, None);
        assert_eq!(recs[0].provider.id, "m");
        assert_eq!(recs[1].provider.id, "z");
    }

    #[test]
    fn scoring_is_idempotent() {
        let profile = profile("anxious", "limited", "urgent");
        let candidates = vec![provider("a", 4.6), provider("b", 4.6), provider("c", 2.0)];
        let first = score_providers(candidates.clone(), &profile, None);
        let second = score_providers(candidates, &profile, None);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_candidates_yield_empty_result() {
        let profile = profile("hopeful", "comfortable", "moderate");
        let recs = score_providers(Vec::new(), &profile, None);
        assert!(recs.is_empty());
    }
}
