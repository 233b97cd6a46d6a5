/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → DB 接続 + migration → 依存生成 (AppState) → Router 組み立て
 * - Middleware の適用 (http / CORS / security headers / access token)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::repos::{PgCommentRepo, PgPostRepo, PgUserRepo};
use crate::services::{auth::TokenCodec, password::Argon2Hasher};
use crate::state::{AppState, Stores, TokenLifetimes};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,social_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let pool = connect(&config).await?;
    let state = build_state(pool, &config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn connect(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    Ok(pool)
}

fn build_state(pool: PgPool, config: &Config) -> Result<AppState> {
    // The signing secret is read once here and owned by the codec from now on.
    let codec = TokenCodec::new(
        &config.jwt_secret,
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
        config.token_leeway_seconds,
    )?;

    let stores = Stores {
        users: Arc::new(PgUserRepo::new(pool.clone())),
        posts: Arc::new(PgPostRepo::new(pool.clone())),
        comments: Arc::new(PgCommentRepo::new(pool)),
    };

    Ok(AppState::new(
        stores,
        Arc::new(Argon2Hasher),
        Arc::new(codec),
        TokenLifetimes {
            access_seconds: config.access_token_ttl_seconds,
            refresh_seconds: config.refresh_token_ttl_seconds,
        },
        config.app_env.is_production(),
    ))
}

/// Full application router with every transport layer applied.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(&state))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
