//! REST endpoints for onboarding and profile management.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{DatabaseError, PersonaError};
use crate::persona::classifier::{self, OnboardingInput, ProfilePatch};
use crate::persona::content::personalized_content;
use crate::persona::theme::theme_config;
use crate::store::Database;

/// Shared state for persona routes.
#[derive(Clone)]
pub struct PersonaRouteState {
    pub db: Arc<dyn Database>,
}

#[derive(Debug, Deserialize)]
struct OnboardingRequest {
    user_id: String,
    #[serde(flatten)]
    input: OnboardingInput,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    user_id: String,
    #[serde(flatten)]
    patch: ProfilePatch,
}

fn persona_error_response(err: PersonaError) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}

fn db_error_response(err: DatabaseError) -> (StatusCode, Json<serde_json::Value>) {
    tracing::error!("Database error: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Internal error" })),
    )
}

/// POST /api/onboarding
///
/// Classify raw onboarding answers into a persona profile, persist it, and
/// create the user's initial journey record.
async fn complete_onboarding(
    State(state): State<PersonaRouteState>,
    Json(request): Json<OnboardingRequest>,
) -> impl IntoResponse {
    let profile = match classifier::classify(&request.input) {
        Ok(profile) => profile,
        Err(err) => return persona_error_response(err).into_response(),
    };

    if let Err(err) = state
        .db
        .upsert_profile(&request.user_id, &profile, true)
        .await
    {
        return db_error_response(err).into_response();
    }

    // Onboarding succeeds even if the journey record can't be created.
    if let Err(err) = state
        .db
        .insert_journey(&request.user_id, profile.journey_type)
        .await
    {
        tracing::warn!("Journey creation failed: {err}");
    }

    if let Err(err) = state
        .db
        .log_interaction(
            &request.user_id,
            "demographic_input",
            "onboarding_completion",
            &serde_json::to_value(&request.input).unwrap_or_default(),
            &serde_json::to_value(&profile).unwrap_or_default(),
            true,
        )
        .await
    {
        tracing::warn!("Failed to log onboarding interaction: {err}");
    }

    Json(serde_json::json!({
        "success": true,
        "persona_profile": profile,
    }))
    .into_response()
}

/// GET /api/onboarding/status?user_id=...
async fn onboarding_status(
    State(state): State<PersonaRouteState>,
    Query(query): Query<UserQuery>,
) -> impl IntoResponse {
    match state.db.get_profile(&query.user_id).await {
        Ok(Some(stored)) => Json(serde_json::json!({
            "onboarding_completed": stored.onboarding_completed,
            "persona_profile": stored.profile,
        }))
        .into_response(),
        Ok(None) => Json(serde_json::json!({
            "onboarding_completed": false,
            "persona_profile": null,
        }))
        .into_response(),
        Err(err) => db_error_response(err).into_response(),
    }
}

/// PATCH /api/profile
///
/// Apply a field-level patch to the stored profile. The theme is recomputed
/// when journey type or emotional state change.
async fn update_profile(
    State(state): State<PersonaRouteState>,
    Json(request): Json<UpdateProfileRequest>,
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
        Err(err) => return db_error_response(err).into_response(),
    };

    let updated = classifier::update(&stored.profile, &request.patch);

    if let Err(err) = state
        .db
        .upsert_profile(&request.user_id, &updated, stored.onboarding_completed)
        .await
    {
        return db_error_response(err).into_response();
    }

    Json(serde_json::json!({ "persona_profile": updated })).into_response()
}

/// GET /api/profile/content?user_id=...
///
/// Personalized dashboard content plus the resolved theme tokens.
async fn profile_content(
    State(state): State<PersonaRouteState>,
    Query(query): Query<UserQuery>,
) -> impl IntoResponse {
    match state.db.get_profile(&query.user_id).await {
        Ok(Some(stored)) => {
            let content = personalized_content(&stored.profile);
            let theme = theme_config(stored.profile.theme);
            Json(serde_json::json!({
                "content": content,
                "theme": theme,
            }))
            .into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "No profile exists yet" })),
        )
            .into_response(),
        Err(err) => db_error_response(err).into_response(),
    }
}

/// Build the persona REST routes.
pub fn persona_routes(state: PersonaRouteState) -> Router {
    Router::new()
        .route("/api/onboarding", post(complete_onboarding))
        .route("/api/onboarding/status", get(onboarding_status))
        .route("/api/profile", patch(update_profile))
        .route("/api/profile/content", get(profile_content))
        .with_state(state)
}
