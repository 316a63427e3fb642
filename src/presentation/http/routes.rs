// src/presentation/http/routes.rs
use crate::config::AppConfig;
use crate::presentation::http::middleware::rate_limit::rate_limit_layer;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{admin, auth, catalog, issues},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Room for form fields and multipart framing around one full-size image.
const BODY_OVERHEAD: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub rate_limit: bool,
}

impl RouterOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            allowed_origins: config.allowed_origins().to_vec(),
            max_upload_bytes: config.max_upload_bytes(),
            rate_limit: config.rate_limit_enabled(),
        }
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_upload_bytes: 10 * 1024 * 1024,
            rate_limit: true,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if parsed.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::profile))
        .route("/api/v1/catalog", get(catalog::catalog))
        .route(
            "/api/v1/issues",
            get(issues::list_issues).post(issues::create_issue),
        )
        .route("/api/v1/issues/{id}", get(issues::get_issue))
        .route("/api/v1/issues/{id}/history", get(issues::issue_history))
        .route("/api/v1/issues/{id}/status", post(issues::update_status))
        .route("/api/v1/issues/{id}/feedback", post(issues::submit_feedback))
        .route("/api/v1/issues/{id}/report", get(issues::issue_report))
        .route("/api/v1/admin/dashboard", get(admin::dashboard))
        .layer(DefaultBodyLimit::max(
            options.max_upload_bytes.saturating_add(BODY_OVERHEAD),
        ));

    let api = if options.rate_limit {
        match rate_limit_layer() {
            Some(layer) => api.layer(layer),
            None => {
                warn!("rate limiter configuration rejected, serving without it");
                api
            }
        }
    } else {
        api
    };

    Router::new()
        .merge(openapi::docs_router())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
