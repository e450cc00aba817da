use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;

use pii_config::Config;
use pii_core::{PlaceholderOverrides, RedactionLevel};
use pii_engine::Redactor;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::protocol::{ApiError, RedactRequest, RedactResponse};

pub struct RedactServer {
    pub redactor: Arc<Redactor>,
    pub request_timeout: Duration,
}

#[derive(Clone)]
struct AppState {
    server: Arc<RedactServer>,
}

impl RedactServer {
    pub fn new(redactor: Arc<Redactor>, request_timeout: Duration) -> Self {
        Self {
            redactor,
            request_timeout,
        }
    }

    /// Build the pipeline described by `config` and serve until shutdown
    pub async fn serve(config: &Config) -> anyhow::Result<()> {
        let source = pii_sources::build_source(&config.recognizer)?;
        let redactor = Redactor::new(source).with_policy(config.redaction.overlap_policy);

        let server = Arc::new(Self::new(
            Arc::new(redactor),
            Duration::from_millis(config.server.request_timeout_ms),
        ));

        let addr = format!("{}:{}", config.server.host, config.server.port);
        let listener = TcpListener::bind(&addr).await?;

        info!(
            recognizer = server.redactor.source_name(),
            "Redaction server listening on {}", addr
        );

        axum::serve(listener, router(server)).await?;

        Ok(())
    }
}

/// Routes for the redaction API
pub fn router(server: Arc<RedactServer>) -> Router {
    // Add CORS layer to allow connections from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_info))
        .route("/health", get(handle_health))
        .route("/redact", post(handle_redact))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { server })
}

/// GET / - service info
async fn handle_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "pii-redact",
        "version": env!("CARGO_PKG_VERSION"),
        "recognizer": state.server.redactor.source_name(),
        "overlap_policy": state.server.redactor.policy(),
    }))
}

/// GET /health
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// POST /redact - redact one body of text
async fn handle_redact(
    State(state): State<AppState>,
    payload: Result<Json<RedactRequest>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("redact", %request_id);

    async move {
        let Json(req) = match payload {
            Ok(payload) => payload,
            Err(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                return ApiError::new(rejection.status(), rejection.body_text()).into_response();
            }
        };

        let level = match RedactionLevel::try_from(req.level) {
            Ok(level) => level,
            Err(e) => {
                warn!("{}", e);
                return ApiError::from(e).into_response();
            }
        };

        let overrides =
            PlaceholderOverrides::from_json(req.custom_placeholders.unwrap_or_default());

        let redaction = state.server.redactor.redact(&req.text, level, &overrides);
        match tokio::time::timeout(state.server.request_timeout, redaction).await {
            Ok(Ok(outcome)) => Json(RedactResponse {
                redacted_text: outcome.redacted_text,
            })
            .into_response(),
            Ok(Err(e)) => {
                error!("Redaction failed: {}", e);
                ApiError::from(e).into_response()
            }
            Err(_) => {
                error!(
                    timeout_ms = state.server.request_timeout.as_millis() as u64,
                    "Redaction timed out"
                );
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Redaction timed out waiting for the entity source",
                )
                .into_response()
            }
        }
    }
    .instrument(span)
    .await
}
