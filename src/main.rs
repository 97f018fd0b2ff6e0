use std::sync::Arc;

use pathways_core::concierge::routes::{ConciergeRouteState, concierge_routes};
use pathways_core::concierge::{ConciergeProvider, GeminiConcierge};
use pathways_core::config::AppConfig;
use pathways_core::persona::routes::{PersonaRouteState, persona_routes};
use pathways_core::recommend::routes::{RecommendRouteState, recommend_routes};
use pathways_core::store::{Database, LibSqlBackend};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;

    eprintln!("🌱 Pathways Core v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://0.0.0.0:{}/api", config.port);
    eprintln!("   DB:  {}", config.db_path);

    // ── Database ─────────────────────────────────────────────────────────
    let db_path = std::path::Path::new(&config.db_path);
    let db: Arc<dyn Database> = Arc::new(LibSqlBackend::new_local(db_path).await.map_err(
        |e| anyhow::anyhow!("Failed to open database at {}: {e}", config.db_path),
    )?);

    // ── Routes ───────────────────────────────────────────────────────────
    let mut app = persona_routes(PersonaRouteState { db: db.clone() }).merge(recommend_routes(
        RecommendRouteState {
            db: db.clone(),
            provider_limit: config.provider_limit,
        },
    ));

    // The concierge is optional: without an API key the rest of the service
    // still runs.
    match std::env::var("GEMINI_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => {
            let model = std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string());
            let provider: Arc<dyn ConciergeProvider> = Arc::new(GeminiConcierge::new(
                secrecy::SecretString::from(api_key),
                model,
            ));
            tracing::info!(model = provider.model_name(), "Concierge enabled");
            app = app.merge(concierge_routes(ConciergeRouteState {
                db: db.clone(),
                provider,
            }));
        }
        _ => {
            tracing::warn!("GEMINI_API_KEY not set — concierge chat disabled");
        }
    }

    let app = app.layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
