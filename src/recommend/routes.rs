//! REST endpoint for provider recommendations.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::recommend::model::Preferences;
use crate::recommend::scorer::score_providers;
use crate::store::Database;

/// Shared state for recommendation routes.
#[derive(Clone)]
pub struct RecommendRouteState {
    pub db: Arc<dyn Database>,
    /// Maximum candidate providers pulled from the store per request.
    pub provider_limit: usize,
}

#[derive(Debug, Deserialize)]
struct RecommendationRequest {
    user_id: String,
    #[serde(default)]
    preferences: Option<Preferences>,
}

/// POST /api/recommendations
///
/// Load eligible candidates for the user's journey type, score them against
/// the stored persona profile and stated preferences, and return the ranked
/// list. The candidate query owns eligibility filtering; the scorer does not.
async fn generate_recommendations(
    State(state): State<RecommendRouteState>,
    Json(request): Json<RecommendationRequest>,
) -> impl IntoResponse {
    let stored = match state.db.get_profile(&request.user_id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "No profile exists yet" })),
            )
                .into_response();
        }
        Err(err) => {
            tracing::error!("Database error: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to generate recommendations" })),
            )
                .into_response();
        }
    };

    let providers = match state
        .db
        .providers_for_journey(stored.profile.journey_type, state.provider_limit)
        .await
    {
        Ok(providers) => providers,
        Err(err) => {
            tracing::error!("Provider query failed: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to generate recommendations" })),
            )
                .into_response();
        }
    };

    let total_providers = providers.len();
    let recommendations =
        score_providers(providers, &stored.profile, request.preferences.as_ref());

    if let Err(err) = state
        .db
        .log_interaction(
            &request.user_id,
            "solution_recommender",
            "generate_recommendations",
            &serde_json::json!({
                "journey_type": stored.profile.journey_type,
                "preferences": request.preferences,
            }),
            &serde_json::json!({ "recommendations": recommendations.len() }),
            true,
        )
        .await
    {
        tracing::warn!("Failed to log recommendation interaction: {err}");
    }

    Json(serde_json::json!({
        "recommendations": recommendations,
        "total_providers": total_providers,
    }))
    .into_response()
}

/// Build the recommendation REST routes.
pub fn recommend_routes(state: RecommendRouteState) -> Router {
    Router::new()
        .route("/api/recommendations", post(generate_recommendations))
        .with_state(state)
}
