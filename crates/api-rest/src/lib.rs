//! # API REST
//!
//! REST API implementation for LexCase.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for wire types and `lexcase-core` for everything else.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AreaEntry, CatalogueRes, DifficultyCount, DifficultyEntry, ErrorRes, GenerateScenarioReq,
    HealthRes, HealthService, ListScenariosRes,
};
use lexcase_core::{Difficulty, LegalArea, Parties, Scenario, ScenarioError, ScenarioId};
use lexcase_core::{ScenarioService, ScenarioSession};

/// Status and JSON error body returned by failing handlers.
pub type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across REST API handlers.
///
/// The service is stateless; the session is the only mutable state and is held here, outside
/// the service.
#[derive(Clone)]
pub struct AppState {
    service: ScenarioService,
    session: Arc<RwLock<ScenarioSession>>,
}

impl AppState {
    pub fn new(service: ScenarioService) -> Self {
        Self {
            service,
            session: Arc::new(RwLock::new(ScenarioSession::new())),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, catalogue, generate_scenario, list_scenarios, get_scenario),
    components(schemas(
        HealthRes,
        ErrorRes,
        GenerateScenarioReq,
        CatalogueRes,
        AreaEntry,
        DifficultyEntry,
        ListScenariosRes,
        DifficultyCount,
        Scenario,
        Parties,
        LegalArea,
        Difficulty,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/catalogue", get(catalogue))
        .route("/api/generate-scenario", post(generate_scenario))
        .route("/scenarios", get(list_scenarios))
        .route("/scenarios/:id", get(get_scenario))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Map a service error onto its HTTP status and user-facing body.
///
/// Internal detail has already been logged by the service.
pub fn error_response(err: &ScenarioError) -> ApiError {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(ErrorRes::new(err.user_message())))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/catalogue",
    responses(
        (status = 200, description = "Selectable legal areas and difficulty levels", body = CatalogueRes)
    )
)]
/// List the legal areas and difficulty levels a request may use.
#[axum::debug_handler]
async fn catalogue(State(_state): State<AppState>) -> Json<CatalogueRes> {
    Json(CatalogueRes::current())
}

#[utoipa::path(
    post,
    path = "/api/generate-scenario",
    request_body = GenerateScenarioReq,
    responses(
        (status = 200, description = "Scenario generated", body = Scenario),
        (status = 400, description = "Missing or invalid area/difficulty", body = ErrorRes),
        (status = 500, description = "Missing configuration, provider failure or unusable provider response", body = ErrorRes)
    )
)]
/// Generate a new legal-training scenario
///
/// Validates the request, asks the configured provider for scenario content and returns the
/// assembled scenario. Successful results are also added to the session listing.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not a JSON object,
/// - `area` or `difficulty` is missing or not one of the catalogue values.
///
/// Returns `500 Internal Server Error` if:
/// - no OpenAI API key is configured,
/// - the provider call fails,
/// - the provider response is empty or not a scenario-shaped JSON object.
#[axum::debug_handler]
async fn generate_scenario(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Scenario>, ApiError> {
    let Json(raw) = body.map_err(|rejection| {
        tracing::warn!("unreadable generation request: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorRes::new("Corpo da requisição inválido")),
        )
    })?;

    let scenario = state
        .service
        .generate(&raw)
        .await
        .map_err(|err| error_response(&err))?;

    state.session.write().await.record(scenario.clone());
    Ok(Json(scenario))
}

#[utoipa::path(
    get,
    path = "/scenarios",
    responses(
        (status = 200, description = "Scenarios generated in this session, newest first", body = ListScenariosRes)
    )
)]
/// List the scenarios generated since the server started.
#[axum::debug_handler]
async fn list_scenarios(State(state): State<AppState>) -> Json<ListScenariosRes> {
    let session = state.session.read().await;
    Json(ListScenariosRes::from_session(&session))
}

#[utoipa::path(
    get,
    path = "/scenarios/{id}",
    params(
        ("id" = String, Path, description = "Scenario identifier")
    ),
    responses(
        (status = 200, description = "Scenario detail", body = Scenario),
        (status = 404, description = "No scenario with this identifier", body = ErrorRes)
    )
)]
/// Fetch one scenario from the session.
///
/// Malformed identifiers are reported as not found.
#[axum::debug_handler]
async fn get_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Scenario>, ApiError> {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorRes::new("Cenário não encontrado")),
        )
    };

    let id = ScenarioId::parse(&id).map_err(|_| not_found())?;
    let session = state.session.read().await;
    session.get(&id).cloned().map(Json).ok_or_else(not_found)
}
