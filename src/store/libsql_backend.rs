//! libSQL backend — async `Database` trait implementation.
//!
//! Supports local file and in-memory databases. Tag sets and metric bundles
//! are stored as JSON columns; enum-valued columns store their snake_case
//! serde names.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase};
use tracing::info;
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::persona::model::{JourneyType, PersonaProfile};
use crate::recommend::model::Provider;
use crate::store::migrations;
use crate::store::traits::{ConversationMessage, Database, JourneyRecord, StoredProfile};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.run_migrations().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

fn json_column<T: serde::de::DeserializeOwned>(
    column: &str,
    raw: &str,
) -> Result<T, DatabaseError> {
    serde_json::from_str(raw)
        .map_err(|e| DatabaseError::Serialization(format!("Bad JSON in column {column}: {e}")))
}

fn query_err(e: libsql::Error) -> DatabaseError {
    DatabaseError::Query(e.to_string())
}

/// Map a providers row to a `Provider`.
///
/// Column order: 0:id, 1:name, 2:provider_type, 3:specializations,
/// 4:location_data, 5:rating_average, 6:total_ratings, 7:insurance_accepted,
/// 8:outcome_metrics, 9:verification_status
fn row_to_provider(row: &libsql::Row) -> Result<Provider, DatabaseError> {
    let id: String = row.get(0).map_err(query_err)?;
    let name: String = row.get(1).map_err(query_err)?;
    let provider_type: String = row.get(2).map_err(query_err)?;
    let specializations_raw: String = row.get(3).map_err(query_err)?;
    let location_raw: String = row.get(4).map_err(query_err)?;
    let rating_average: f64 = row.get(5).map_err(query_err)?;
    let total_ratings: i64 = row.get(6).map_err(query_err)?;
    let insurance_raw: String = row.get(7).map_err(query_err)?;
    let metrics_raw: String = row.get(8).map_err(query_err)?;
    let status_raw: String = row.get(9).map_err(query_err)?;

    Ok(Provider {
        id,
        name,
        provider_type,
        specializations: json_column("specializations", &specializations_raw)?,
        location_data: json_column("location_data", &location_raw)?,
        rating_average,
        total_ratings: total_ratings.max(0) as u32,
        insurance_accepted: json_column("insurance_accepted", &insurance_raw)?,
        outcome_metrics: json_column("outcome_metrics", &metrics_raw)?,
        verification_status: json_column(
            "verification_status",
            &format!("\"{status_raw}\""),
        )?,
    })
}

const PROVIDER_COLUMNS: &str = "id, name, provider_type, specializations, location_data, \
     rating_average, total_ratings, insurance_accepted, outcome_metrics, verification_status";

#[async_trait]
impl Database for LibSqlBackend {
    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    // ── Profiles ────────────────────────────────────────────────────

    async fn upsert_profile(
        &self,
        user_id: &str,
        profile: &PersonaProfile,
        onboarding_completed: bool,
    ) -> Result<(), DatabaseError> {
        let profile_json = serde_json::to_string(profile)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        self.conn()
            .execute(
                "INSERT INTO user_profiles (user_id, persona_profile, onboarding_completed, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(user_id) DO UPDATE SET
                     persona_profile = excluded.persona_profile,
                     onboarding_completed = excluded.onboarding_completed,
                     updated_at = excluded.updated_at",
                libsql::params![user_id, profile_json, onboarding_completed as i64, now],
            )
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<StoredProfile>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT persona_profile, onboarding_completed, updated_at
                 FROM user_profiles WHERE user_id = ?1",
                libsql::params![user_id],
            )
            .await
            .map_err(query_err)?;

        let Some(row) = rows.next().await.map_err(query_err)? else {
            return Ok(None);
        };

        let profile_raw: String = row.get(0).map_err(query_err)?;
        let completed: i64 = row.get(1).map_err(query_err)?;
        let updated_raw: String = row.get(2).map_err(query_err)?;

        Ok(Some(StoredProfile {
            user_id: user_id.to_string(),
            profile: json_column("persona_profile", &profile_raw)?,
            onboarding_completed: completed != 0,
            updated_at: parse_datetime(&updated_raw),
        }))
    }

    // ── Journeys ────────────────────────────────────────────────────

    async fn insert_journey(
        &self,
        user_id: &str,
        journey_type: JourneyType,
    ) -> Result<Uuid, DatabaseError> {
        let id = Uuid::new_v4();
        self.conn()
            .execute(
                "INSERT INTO journeys (id, user_id, journey_type) VALUES (?1, ?2, ?3)",
                libsql::params![id.to_string(), user_id, journey_type.to_string()],
            )
            .await
            .map_err(query_err)?;
        Ok(id)
    }

    async fn list_journeys(&self, user_id: &str) -> Result<Vec<JourneyRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, journey_type, status, current_phase, created_at
                 FROM journeys WHERE user_id = ?1 ORDER BY created_at DESC",
                libsql::params![user_id],
            )
            .await
            .map_err(query_err)?;

        let mut journeys = Vec::new();
        while let Some(row) = rows.next().await.map_err(query_err)? {
            let id_raw: String = row.get(0).map_err(query_err)?;
            let journey_raw: String = row.get(1).map_err(query_err)?;
            let status: String = row.get(2).map_err(query_err)?;
            let current_phase: String = row.get(3).map_err(query_err)?;
            let created_raw: String = row.get(4).map_err(query_err)?;

            let journey_type: JourneyType = journey_raw.parse().map_err(|_| {
                DatabaseError::Serialization(format!("Unknown journey_type: {journey_raw}"))
            })?;

            journeys.push(JourneyRecord {
                id: Uuid::parse_str(&id_raw)
                    .map_err(|e| DatabaseError::Serialization(e.to_string()))?,
                user_id: user_id.to_string(),
                journey_type,
                status,
                current_phase,
                created_at: parse_datetime(&created_raw),
            });
        }
        Ok(journeys)
    }

    // ── Providers ───────────────────────────────────────────────────

    async fn upsert_provider(&self, provider: &Provider) -> Result<(), DatabaseError> {
        let specializations = serde_json::to_string(&provider.specializations)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;
        let location = serde_json::to_string(&provider.location_data)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;
        let insurance = serde_json::to_string(&provider.insurance_accepted)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;
        let metrics = serde_json::to_string(&provider.outcome_metrics)
            .map_err(|e| DatabaseError::Serialization(e.to_string()))?;

        self.conn()
            .execute(
                "INSERT INTO providers (id, name, provider_type, specializations, location_data,
                     rating_average, total_ratings, insurance_accepted, outcome_metrics, verification_status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     provider_type = excluded.provider_type,
                     specializations = excluded.specializations,
                     location_data = excluded.location_data,
                     rating_average = excluded.rating_average,
                     total_ratings = excluded.total_ratings,
                     insurance_accepted = excluded.insurance_accepted,
                     outcome_metrics = excluded.outcome_metrics,
                     verification_status = excluded.verification_status,
                     updated_at = datetime('now')",
                libsql::params![
                    provider.id.as_str(),
                    provider.name.as_str(),
                    provider.provider_type.as_str(),
                    specializations,
                    location,
                    provider.rating_average,
                    provider.total_ratings as i64,
                    insurance,
                    metrics,
                    provider.verification_status.to_string(),
                ],
            )
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn providers_for_journey(
        &self,
        journey_type: JourneyType,
        limit: usize,
    ) -> Result<Vec<Provider>, DatabaseError> {
        // Specialization tags live in a JSON column, so the tag match
        // happens here after the SQL-side status/rating filter.
        let sql = format!(
            "SELECT {PROVIDER_COLUMNS} FROM providers
             WHERE verification_status = 'verified'
             ORDER BY rating_average DESC"
        );
        let mut rows = self.conn().query(&sql, ()).await.map_err(query_err)?;

        let tag = journey_type.to_string();
        let mut providers = Vec::new();
        while let Some(row) = rows.next().await.map_err(query_err)? {
            let provider = row_to_provider(&row)?;
            if provider.specializations.contains(&tag) {
                providers.push(provider);
                if providers.len() >= limit {
                    break;
                }
            }
        }
        Ok(providers)
    }

    // ── Interaction log ─────────────────────────────────────────────

    async fn log_interaction(
        &self,
        user_id: &str,
        agent_type: &str,
        interaction_type: &str,
        input: &serde_json::Value,
        output: &serde_json::Value,
        success: bool,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO agent_interactions
                     (id, user_id, agent_type, interaction_type, input_data, output_data, success)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    Uuid::new_v4().to_string(),
                    user_id,
                    agent_type,
                    interaction_type,
                    input.to_string(),
                    output.to_string(),
                    success as i64,
                ],
            )
            .await
            .map_err(query_err)?;
        Ok(())
    }

    // ── Conversations ───────────────────────────────────────────────

    async fn ensure_conversation(
        &self,
        thread_id: Uuid,
        user_id: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO conversations (id, user_id) VALUES (?1, ?2)",
                libsql::params![thread_id.to_string(), user_id],
            )
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn add_conversation_message(
        &self,
        thread_id: Uuid,
        role: &str,
        content: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO conversation_messages (id, conversation_id, role, content)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    Uuid::new_v4().to_string(),
                    thread_id.to_string(),
                    role,
                    content
                ],
            )
            .await
            .map_err(query_err)?;

        self.conn()
            .execute(
                "UPDATE conversations SET last_activity = datetime('now') WHERE id = ?1",
                libsql::params![thread_id.to_string()],
            )
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn list_conversation_messages(
        &self,
        thread_id: Uuid,
    ) -> Result<Vec<ConversationMessage>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, role, content FROM conversation_messages
                 WHERE conversation_id = ?1 ORDER BY created_at ASC, rowid ASC",
                libsql::params![thread_id.to_string()],
            )
            .await
            .map_err(query_err)?;

        let mut messages = Vec::new();
        while let Some(row) = rows.next().await.map_err(query_err)? {
            let id_raw: String = row.get(0).map_err(query_err)?;
            let role: String = row.get(1).map_err(query_err)?;
            let content: String = row.get(2).map_err(query_err)?;
            messages.push(ConversationMessage {
                id: Uuid::parse_str(&id_raw)
                    .map_err(|e| DatabaseError::Serialization(e.to_string()))?,
                role,
                content,
            });
        }
        Ok(messages)
    }
}
