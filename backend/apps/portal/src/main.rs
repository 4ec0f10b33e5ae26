//! Portal Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `auth::AuthError` and the kernel `AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::domain::repository::{LoginAttemptRepository, SessionStore, UserRepository};
use auth::{
    AuthConfig, InMemoryAuthRepository, PgAuthRepository, RoleGate, RoleRequirement,
    SessionAuthenticator, SessionState, UserRole, auth_router, require_role,
};
use axum::{
    Extension, Json, Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::PortalConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PortalConfig::from_env()?;
    let auth_config = Arc::new(config.auth.clone());

    match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let repo = Arc::new(PgAuthRepository::new(pool));
            serve(SessionAuthenticator::new(repo, auth_config), &config).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");

            let repo = Arc::new(InMemoryAuthRepository::new());
            if let Some(password) = config.dev_admin_password.clone() {
                seed_admin(&repo, &auth_config, password).await?;
            }
            serve(SessionAuthenticator::new(repo, auth_config), &config).await
        }
    }
}

async fn serve<R>(auth: SessionAuthenticator<R>, config: &PortalConfig) -> anyhow::Result<()>
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    // Startup cleanup must not prevent the server from starting
    match auth.purge_expired().await {
        Ok(report) => {
            tracing::info!(
                sessions_deleted = report.sessions,
                attempts_deleted = report.attempts,
                "Auth cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth cleanup failed, continuing anyway");
        }
    }

    let app = app(auth, &config.frontend_origins);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn app<R>(auth: SessionAuthenticator<R>, frontend_origins: &[String]) -> Router
where
    R: UserRepository + LoginAttemptRepository + SessionStore + Send + Sync + 'static,
{
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            http::HeaderName::from_static("x-requested-with"),
        ]))
        .allow_credentials(true);

    let signed_in = RoleGate::new(auth.clone(), RoleRequirement::any());

    let api = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(signed_in, require_role::<R>));

    Router::new()
        .nest("/auth", auth_router(auth))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn me(Extension(state): Extension<SessionState>) -> Json<SessionState> {
    Json(state)
}

async fn seed_admin(
    repo: &InMemoryAuthRepository,
    config: &AuthConfig,
    password: String,
) -> anyhow::Result<()> {
    use auth::domain::User;
    use auth::domain::value_object::user_name::UserName;
    use auth::domain::value_object::user_password::{RawPassword, UserPassword};
    use platform::clock::{Clock, SystemClock};

    let user_name = UserName::new("admin")?;
    let raw = RawPassword::new(password)?;
    let hash = UserPassword::from_raw(&raw, config.pepper())?;

    repo.insert_user(User::new(
        user_name,
        hash,
        UserRole::Admin,
        "Administrator",
        SystemClock.now(),
    ))
    .await;

    tracing::info!("Seeded development admin account");
    Ok(())
}
