// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use hpc_config::WizardState;
use hpc_config_api::{
    AllPricesResponse, ApiError, AvailableNodeCountsResponse, ConfigurationResponse,
    ExportRequest, ExportResponse, GenerateConfigurationResponse, HealthResponse, LocalBackend,
    PriceResponse, PricingService, ResolveSelectionsRequest, ResolveSelectionsResponse,
    SaveConfigurationRequest, SaveConfigurationResponse, ServiceInfoResponse,
    export_configuration, generate_configuration, get_all_prices, get_available_node_counts,
    get_catalog, get_configuration, get_price_by_nodes, health, resolve_selections,
    save_configuration, service_info,
};
use hpc_config_domain::{Catalog, default_price_entries};
use hpc_config_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};

/// HPC Config Server - HTTP server for the HPC configuration wizard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DATABASE_PATH")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "HPC_CONFIG_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "HPC_CONFIG_PORT", default_value_t = 8000)]
    port: u16,

    /// Origins allowed to call the API from a browser
    #[arg(
        long,
        env = "HPC_CONFIG_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:4200,http://frontend:4200,http://127.0.0.1:4200"
    )]
    cors_origins: Vec<String>,

    /// Replace the stored price table with the default prices at startup
    #[arg(long)]
    reseed_prices: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The configuration store and price table.
    persistence: Arc<Mutex<Persistence>>,
    /// Prices loaded at startup.
    pricing: Arc<PricingService>,
    /// The option catalog offered by the wizard.
    catalog: Arc<Catalog>,
    /// Live event fan-out.
    live: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn local_backend(&self) -> LocalBackend {
        LocalBackend::new(Arc::clone(&self.persistence), Arc::clone(&self.pricing))
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Seeds the price table if needed, loads it into memory and builds the
/// shared state.
///
/// # Errors
///
/// Returns an error if the prices cannot be seeded or loaded.
fn build_app_state(
    mut persistence: Persistence,
    reseed_prices: bool,
) -> Result<AppState, ApiError> {
    if reseed_prices {
        let inserted: usize = persistence.reseed_pricing(&default_price_entries())?;
        info!(inserted, "Replaced stored prices with defaults");
    } else {
        let inserted: usize = persistence.seed_default_pricing()?;
        if inserted > 0 {
            info!(inserted, "Seeded default prices");
        }
    }

    let mut pricing: PricingService = PricingService::new();
    pricing.load(&mut persistence)?;

    Ok(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        pricing: Arc::new(pricing),
        catalog: Arc::new(Catalog::standard()),
        live: Arc::new(LiveEventBroadcaster::new()),
    })
}

/// Handler for POST `/api/configuration/save` endpoint.
async fn handle_save_configuration(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveConfigurationRequest>,
) -> Result<Json<SaveConfigurationResponse>, HttpError> {
    info!(
        configuration_id = ?req.configuration_id,
        is_generated = req.is_generated,
        "Handling save_configuration request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SaveConfigurationResponse = save_configuration(&mut persistence, &req)?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::ConfigurationSaved {
        id: response.id,
        configuration_id: response.configuration_id.clone(),
    });

    Ok(Json(response))
}

/// Handler for POST `/api/configuration/generate` endpoint.
///
/// Prices, assembles and stores a submitted wizard state.
async fn handle_generate_configuration(
    AxumState(app_state): AxumState<AppState>,
    Json(state): Json<WizardState>,
) -> Result<Json<GenerateConfigurationResponse>, HttpError> {
    info!(
        current_step = state.current_step,
        "Handling generate_configuration request"
    );

    let backend: LocalBackend = app_state.local_backend();
    let response: GenerateConfigurationResponse =
        generate_configuration(&backend, &state, OffsetDateTime::now_utc()).await?;

    for warning in &response.warnings {
        warn!(warning = %warning, "Generation completed with warning");
    }

    app_state.live.broadcast(&LiveEvent::ConfigurationGenerated {
        configuration_id: response.configuration_id.clone(),
        price_unavailable: response.price_unavailable,
    });

    Ok(Json(response))
}

/// Handler for GET `/api/configuration/{id}` endpoint.
async fn handle_get_configuration(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ConfigurationResponse>, HttpError> {
    info!(id, "Handling get_configuration request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ConfigurationResponse = get_configuration(&mut persistence, id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/configuration/{id}/export` endpoint.
async fn handle_export_configuration(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, HttpError> {
    info!(id, format = %req.format, "Handling export_configuration request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ExportResponse =
        export_configuration(&mut persistence, id, &req, OffsetDateTime::now_utc())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/pricing/nodes/{nodes_count}` endpoint.
async fn handle_get_price(
    AxumState(app_state): AxumState<AppState>,
    Path(nodes_count): Path<u32>,
) -> Result<Json<PriceResponse>, HttpError> {
    debug!(nodes_count, "Handling get_price request");
    Ok(Json(get_price_by_nodes(&app_state.pricing, nodes_count)?))
}

/// Handler for GET `/api/pricing/all` endpoint.
async fn handle_get_all_prices(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AllPricesResponse>, HttpError> {
    Ok(Json(get_all_prices(&app_state.pricing)?))
}

/// Handler for GET `/api/pricing/nodes` endpoint.
async fn handle_get_available_node_counts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AvailableNodeCountsResponse>, HttpError> {
    Ok(Json(get_available_node_counts(&app_state.pricing)?))
}

/// Handler for GET `/api/catalog` endpoint.
async fn handle_get_catalog(AxumState(app_state): AxumState<AppState>) -> Json<Catalog> {
    Json(get_catalog(&app_state.catalog))
}

/// Handler for POST `/api/catalog/resolve` endpoint.
///
/// Turns catalog ids into wizard step payloads with derived values.
async fn handle_resolve_selections(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ResolveSelectionsRequest>,
) -> Result<Json<ResolveSelectionsResponse>, HttpError> {
    debug!(?req, "Handling resolve_selections request");
    Ok(Json(resolve_selections(
        &app_state.catalog,
        &app_state.pricing,
        &req,
    )?))
}

/// Handler for GET `/api/health` endpoint.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Json<HealthResponse> {
    Json(health(&app_state.pricing))
}

/// Handler for GET `/` endpoint.
async fn handle_root() -> Json<ServiceInfoResponse> {
    Json(service_info())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    let api: Router<AppState> = Router::new()
        .route("/configuration/save", post(handle_save_configuration))
        .route("/configuration/generate", post(handle_generate_configuration))
        .route("/configuration/{id}", get(handle_get_configuration))
        .route(
            "/configuration/{id}/export",
            post(handle_export_configuration),
        )
        .route("/pricing/nodes/{nodes_count}", get(handle_get_price))
        .route("/pricing/all", get(handle_get_all_prices))
        .route("/pricing/nodes", get(handle_get_available_node_counts))
        .route("/catalog", get(handle_get_catalog))
        .route("/catalog/resolve", post(handle_resolve_selections))
        .route("/health", get(handle_health))
        .route("/live", get(live_events_handler));

    Router::new()
        .route("/", get(handle_root))
        .nest("/api", api)
        .with_state(app_state)
}

/// Builds the CORS layer for the configured origins.
///
/// # Errors
///
/// Returns an error if an origin is not a valid header value.
fn build_cors(origins: &[String]) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin.trim()))
        .collect::<Result<_, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded: bool = dotenvy::dotenv().is_ok();

    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing HPC Config Server");
    if dotenv_loaded {
        debug!("Loaded environment from .env");
    }

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = build_app_state(persistence, args.reseed_prices)?;
    let cors: CorsLayer = build_cors(&args.cors_origins)?;
    info!(origins = ?args.cors_origins, "CORS configured");

    let app: Router = build_router(app_state).layer(cors);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
