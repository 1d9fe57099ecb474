use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use lexcase_core::{CoreConfig, OpenAiProvider, ScenarioService};

/// Main entry point for the LexCase server
///
/// Resolves configuration once, then serves the REST API (default: 0.0.0.0:3000).
///
/// A missing `OPENAI_API_KEY` does not stop the server: it logs a warning and every generation
/// request answers with a configuration error until the key is provided.
///
/// # Environment Variables
/// - `LEXCASE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `OPENAI_API_KEY`: credential for the OpenAI API
/// - `OPENAI_MODEL`: model identifier (default: "gpt-4-turbo-preview")
/// - `OPENAI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
/// - `OPENAI_TIMEOUT_SECS`: transport timeout per completion call (default: 60)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexcase_run=info".parse()?)
                .add_directive("lexcase_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("LEXCASE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::from_env_values(
        std::env::var("OPENAI_API_KEY").ok(),
        std::env::var("OPENAI_MODEL").ok(),
        std::env::var("OPENAI_BASE_URL").ok(),
        std::env::var("OPENAI_TIMEOUT_SECS").ok(),
    )?);

    if cfg.api_key().is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; scenario generation will fail until it is");
    }
    tracing::info!(model = %cfg.model(), "++ Using OpenAI at {}", cfg.openai_base_url());

    let provider = Arc::new(OpenAiProvider::from_config(&cfg)?);
    let service = ScenarioService::new(cfg, provider);
    let app = api_rest::router(AppState::new(service));

    tracing::info!("++ Starting LexCase REST on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
