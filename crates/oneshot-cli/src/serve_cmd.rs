use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use oneshot_core::{PlanCatalog, PlanDocument, PlanRequest, dispatch};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(catalog: Arc<PlanCatalog>) -> Router {
    Router::new()
        .route("/one-shot-plan", post(one_shot_plan))
        .fallback(no_route)
        // Oversized bodies are still answered with a plan, never a 413.
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .with_state(catalog)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(catalog: PlanCatalog, bind: &str, port: u16) -> Result<()> {
    let app = build_router(Arc::new(catalog));
    let addr = format!("{bind}:{port}")
        .parse::<SocketAddr>()
        .or_else(|_| format!("[{bind}]:{port}").parse::<SocketAddr>())
        .with_context(|| format!("invalid bind address {bind:?}"))?;
    tracing::info!("oneshot serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("oneshot serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `POST /one-shot-plan`. Always answers 200; unreadable bodies are treated as `{}`.
async fn one_shot_plan(
    State(catalog): State<Arc<PlanCatalog>>,
    body: Bytes,
) -> Json<PlanDocument> {
    let request = PlanRequest::from_body(&body);
    let plan = dispatch(&catalog, &request);
    tracing::info!(scenario = %plan.scenario(), "one-shot plan served");
    Json(plan)
}

async fn no_route(method: Method, uri: Uri) -> AppError {
    AppError::not_found(format!("no route for {method} {}", uri.path()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
