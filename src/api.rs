use std::sync::Arc;

use anyhow::{Error, Result};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    clients::{auth::AuthClient, fcm::FcmClient, store::StoreClient},
    config::Config,
    error::DispatchError,
    utils::dispatch_push,
};

const DEFAULT_PORT: u16 = 8080;

pub struct AppState {
    pub dispatch: Option<DispatchContext>,
}

/// Everything the push handler needs, constructed once at startup and
/// injected through the router state. Absent when the environment is
/// incomplete; the handler then rejects every request.
pub struct DispatchContext {
    pub config: Config,
    pub store: StoreClient,
    pub auth: AuthClient,
    pub fcm: FcmClient,
}

impl DispatchContext {
    pub fn new(config: Config) -> Self {
        let store = StoreClient::new(&config);
        let auth = AuthClient::new(&config);
        let fcm = FcmClient::new(&config);

        Self {
            config,
            store,
            auth,
            fcm,
        }
    }
}

impl AppState {
    pub fn new(config: Option<Config>) -> Self {
        Self {
            dispatch: config.map(DispatchContext::new),
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/push", post(push).fallback(method_not_allowed))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(state: AppState) -> Result<(), Error> {
    let port = state
        .dispatch
        .as_ref()
        .map(|ctx| ctx.config.server_port)
        .unwrap_or(DEFAULT_PORT);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Push dispatcher server started");

    axum::serve(listener, app(Arc::new(state))).await?;

    Ok(())
}

/// The body is read as text and parsed inside the pipeline, so malformed
/// JSON maps to a 500 with the stringified cause instead of an extractor
/// rejection.
async fn push(State(state): State<Arc<AppState>>, body: String) -> Response {
    let Some(ctx) = state.dispatch.as_ref() else {
        return DispatchError::MissingEnv.into_response();
    };

    match dispatch_push(&body, &ctx.config, &ctx.store, &ctx.auth, &ctx.fcm).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }))
}
