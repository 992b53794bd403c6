//! # noteful-api
//!
//! HTTP API for noteful: folder and note CRUD over axum.
//!
//! [`router`] builds the complete application (routes, fallback, middleware)
//! so the binary and the integration tests serve the same thing.

pub mod config;
pub mod error;
pub mod handlers;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use handlers::{folders, notes};
use noteful_core::logging::{ERROR_MSG, REQUEST_ID, SUBSYSTEM};
use noteful_db::Database;

pub use config::ServerConfig;
pub use error::ApiError;

/// Maximum accepted request body.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Noteful API",
        description = "Notes and the folders that organise them"
    ),
    paths(
        folders::list_folders,
        folders::get_folder,
        folders::create_folder,
        folders::update_folder,
        folders::delete_folder,
        notes::list_notes,
        notes::get_note,
        notes::create_note,
        notes::update_note,
        notes::delete_note,
    ),
    components(schemas(
        noteful_core::Folder,
        noteful_core::Note,
        folders::FolderBody,
        notes::NoteBody,
        error::ErrorBody,
    )),
    tags(
        (name = "Folders", description = "Folder CRUD; delete clears notes' folderId"),
        (name = "Notes", description = "Note CRUD and search")
    )
)]
pub struct ApiDoc;

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        .route(
            "/folders",
            get(folders::list_folders).post(folders::create_folder),
        )
        .route(
            "/folders/:id",
            get(folders::get_folder)
                .put(folders::update_folder)
                .delete(folders::delete_folder),
        )
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .fallback(not_found)
        // Middleware
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.cors_origins()))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .expose_headers([header::LOCATION])
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// Span for one request, tagged with the id set by the request-id layer.
fn request_span<B>(request: &axum::http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    tracing::debug_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        { REQUEST_ID } = request_id
    )
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, database) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "connected"),
        Err(e) => {
            tracing::warn!(
                { SUBSYSTEM } = "api",
                { ERROR_MSG } = %e,
                "Health check could not reach the database"
            );
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };
    let healthy = if status == StatusCode::OK { "healthy" } else { "degraded" };

    (
        status,
        Json(serde_json::json!({
            "status": healthy,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        })),
    )
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}
