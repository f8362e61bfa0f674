use gigachat_token_releaser::infrastructure;
use gigachat_token_releaser::infrastructure::config::AppConfig;
use gigachat_token_releaser::infrastructure::gigachat::GigaChatClient;
use gigachat_token_releaser::infrastructure::identity::CliIdentityResolver;
use gigachat_token_releaser::infrastructure::repositories::token_releases::PostgresTokenReleaseRepository;
use gigachat_token_releaser::infrastructure::state::AppState;
use gigachat_token_releaser::infrastructure::storage::ObjectStoreTokenArchive;
use gigachat_token_releaser::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run<F>(shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG")
                .unwrap_or_else(|_| "gigachat_token_releaser=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let (listener, app) = bootstrap(&config).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    Ok(())
}

async fn bootstrap(config: &AppConfig) -> anyhow::Result<(tokio::net::TcpListener, axum::Router)> {
    let pool = infrastructure::db::create_pool(&config.database).await?;
    infrastructure::db::migrate(&pool).await?;

    let state = AppState {
        pool: pool.clone(),
        identity: Arc::new(CliIdentityResolver::new(&config.identity)),
        provider: Arc::new(GigaChatClient::new(&config.gigachat)?),
        archive: Arc::new(ObjectStoreTokenArchive::from_config(&config.storage)?),
        releases: Arc::new(PostgresTokenReleaseRepository::new(pool)),
        default_minutes_valid: config.gigachat.token_ttl_minutes,
    };

    let app = presentation::router::app(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    Ok((listener, app))
}
