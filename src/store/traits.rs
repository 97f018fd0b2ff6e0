//! Unified `Database` trait — single async interface for all persistence.
//!
//! Covers user profiles, journeys, the provider catalog, the agent
//! interaction log, and concierge conversations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::persona::model::{JourneyType, PersonaProfile};
use crate::recommend::model::Provider;

/// A persisted user profile row.
#[derive(Debug, Clone)]
pub struct StoredProfile {
    pub user_id: String,
    pub profile: PersonaProfile,
    pub onboarding_completed: bool,
    pub updated_at: DateTime<Utc>,
}

/// A persisted journey row.
#[derive(Debug, Clone)]
pub struct JourneyRecord {
    pub id: Uuid,
    pub user_id: String,
    pub journey_type: JourneyType,
    /// planning | active | paused | completed
    pub status: String,
    /// assessment | treatment | matching | ...
    pub current_phase: String,
    pub created_at: DateTime<Utc>,
}

/// A conversation message from the database.
#[derive(Debug, Clone)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: String,
    pub content: String,
}

/// Backend-agnostic database trait.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    // ── Profiles ────────────────────────────────────────────────────

    /// Insert or replace a user's persona profile.
    async fn upsert_profile(
        &self,
        user_id: &str,
        profile: &PersonaProfile,
        onboarding_completed: bool,
    ) -> Result<(), DatabaseError>;

    /// Get a user's stored profile, if any.
    async fn get_profile(&self, user_id: &str) -> Result<Option<StoredProfile>, DatabaseError>;

    // ── Journeys ────────────────────────────────────────────────────

    /// Create a journey record for a user. Returns the generated id.
    async fn insert_journey(
        &self,
        user_id: &str,
        journey_type: JourneyType,
    ) -> Result<Uuid, DatabaseError>;

    /// List a user's journeys, most recent first.
    async fn list_journeys(&self, user_id: &str) -> Result<Vec<JourneyRecord>, DatabaseError>;

    // ── Providers ───────────────────────────────────────────────────

    /// Insert or replace a provider record (reference data ingestion).
    async fn upsert_provider(&self, provider: &Provider) -> Result<(), DatabaseError>;

    /// Candidate providers for a journey: verified, specialized in the
    /// journey type, ordered by rating descending, up to `limit`.
    async fn providers_for_journey(
        &self,
        journey_type: JourneyType,
        limit: usize,
    ) -> Result<Vec<Provider>, DatabaseError>;

    // ── Interaction log ─────────────────────────────────────────────

    /// Append an agent interaction record.
    async fn log_interaction(
        &self,
        user_id: &str,
        agent_type: &str,
        interaction_type: &str,
        input: &serde_json::Value,
        output: &serde_json::Value,
        success: bool,
    ) -> Result<(), DatabaseError>;

    // ── Conversations ───────────────────────────────────────────────

    /// Ensure a conversation exists, creating it if needed.
    async fn ensure_conversation(
        &self,
        thread_id: Uuid,
        user_id: &str,
    ) -> Result<(), DatabaseError>;

    /// Add a message to a conversation.
    async fn add_conversation_message(
        &self,
        thread_id: Uuid,
        role: &str,
        content: &str,
    ) -> Result<(), DatabaseError>;

    /// List messages in a conversation, oldest first.
    async fn list_conversation_messages(
        &self,
        thread_id: Uuid,
    ) -> Result<Vec<ConversationMessage>, DatabaseError>;
}
