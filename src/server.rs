//! HTTP surface: the GraphQL endpoint plus a couple of plain JSON routes.

use std::sync::Arc;
use std::time::Duration;

use async_graphql::http::GraphiQLSource;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::{InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use sqlx::mysql::MySqlPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::Authenticator;
use crate::graphql::{ApiSchema, Viewer};
use crate::registry::Loaders;

const BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub schema: ApiSchema,
    pub pool: MySqlPool,
    pub authenticator: Arc<Authenticator>,
    pub batch_delay: Duration,
}

pub struct RouterOptions<'a> {
    pub cors_origin: &'a str,
    pub graphiql: bool,
}

pub fn router(state: AppState, options: RouterOptions<'_>) -> Result<Router, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(options.cors_origin)?)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    let graphql = if options.graphiql {
        get(graphiql).post(graphql_handler)
    } else {
        axum::routing::post(graphql_handler)
    };

    Ok(Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/graphql", graphql)
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Serves until Ctrl-C or SIGTERM, letting in-flight requests finish.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
}

/// Extracts the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves the request viewer. Missing or invalid tokens leave the request anonymous; resolvers
/// that need a user reject it themselves.
fn resolve_viewer(authenticator: &Authenticator, headers: &HeaderMap) -> Viewer {
    let Some(token) = bearer_token(headers) else {
        return Viewer(None);
    };
    match authenticator.verify_access(token) {
        Ok(user) => Viewer(Some(user)),
        Err(error) => {
            tracing::debug!(%error, "ignoring bearer token");
            Viewer(None)
        }
    }
}

async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let viewer = resolve_viewer(&state.authenticator, &headers);
    let request = request
        .data(Loaders::with_delay(&state.pool, state.batch_delay))
        .data(viewer);
    Json(state.schema.execute(request).await)
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn index() -> impl IntoResponse {
    Json(json!({ "success": true, "message": "axocom api is running" }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "OK", "timestamp": chrono::Utc::now().to_rfc3339() }))
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": format!("Route {} {} not found", method, uri.path()),
            "error_code": 10006,
        })),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
