use std::sync::Arc;

use anyhow::Context;
use axocom_api::auth::Authenticator;
use axocom_api::config::Config;
use axocom_api::server::{self, AppState, RouterOptions};
use axocom_api::{db, graphql};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let pool = db::connect(&config.database).await.context("error connecting to MySQL pool")?;
    if config.run_migrations {
        db::migrate(&pool).await.context("error applying migrations")?;
    }

    let authenticator = Arc::new(Authenticator::new(&config.auth));
    let schema = graphql::build_schema(pool.clone(), Arc::clone(&authenticator));
    let state = AppState { schema, pool, authenticator, batch_delay: config.loader_batch_delay };
    let app = server::router(
        state,
        RouterOptions { cors_origin: &config.cors_origin, graphiql: !config.is_production() },
    )
    .context("invalid CORS_ORIGIN")?;

    let listener = TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("error binding port {}", config.port))?;
    tracing::info!(port = config.port, env = %config.app_env, "GraphQL endpoint listening on /graphql");

    server::serve(listener, app).await?;
    tracing::info!("server stopped");
    Ok(())
}
