use std::sync::Arc;

use auth::TokenService;
use blog_service::config::Config;
use blog_service::config::StorageBackend;
use blog_service::domain::user::ports::RefreshTokenRepository;
use blog_service::domain::user::ports::UserRepository;
use blog_service::domain::user::service::SessionService;
use blog_service::inbound::http::cookies::CookieSettings;
use blog_service::inbound::http::router::create_router;
use blog_service::outbound::repositories::InMemoryRefreshTokenRepository;
use blog_service::outbound::repositories::InMemoryUserRepository;
use blog_service::outbound::repositories::PostgresRefreshTokenRepository;
use blog_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "blog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = ?config.storage.backend,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_minutes = config.jwt.refresh_ttl_minutes,
        "Configuration loaded"
    );

    let token_service = Arc::new(TokenService::new(
        config.jwt.access_secret.as_bytes(),
        config.jwt.refresh_secret.as_bytes(),
    )?);

    match config.storage.backend {
        StorageBackend::Postgres => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(&config.database.url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(
                &config,
                Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                Arc::new(PostgresRefreshTokenRepository::new(pg_pool)),
                token_service,
            )
            .await
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on restart");

            serve(
                &config,
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryRefreshTokenRepository::new()),
                token_service,
            )
            .await
        }
    }
}

async fn serve<UR, TR>(
    config: &Config,
    users: Arc<UR>,
    refresh_tokens: Arc<TR>,
    token_service: Arc<TokenService>,
) -> Result<(), anyhow::Error>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
{
    let session_service = Arc::new(SessionService::new(
        users,
        refresh_tokens,
        token_service,
        config.jwt.session_settings(),
    ));
    let cookie_settings = CookieSettings::new(config.cookie.max_age_hours, config.cookie.secure);

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(session_service, cookie_settings)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
