use std::sync::Arc;
use std::time::Duration;

use server::config::{feature_flags, load_feature_flags, Settings, StoreKind};
use server::db::{create_pool, run_migrations, AppState};
use server::mailgun::{LogMailer, Mailer, MailgunMailer};
use server::rate_limit::RateLimitState;
use server::repo::{MemoryStore, PgStore, Store};
use server::storage::{ObjectStore, S3ObjectStore};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .with(fmt::layer())
        .init();

    load_feature_flags();
    let flags = feature_flags();
    let settings = Settings::from_env()?;

    if flags.telemetry {
        if let Err(e) = server::telemetry::init_telemetry() {
            tracing::warn!(error = %e, "telemetry disabled");
        }
    }
    server::health::record_start_time();

    let store: Arc<dyn Store> = match settings.store {
        StoreKind::Postgres => {
            let pool = create_pool(&settings)?;
            run_migrations(&pool).await?;
            Arc::new(PgStore::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory store, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let mailer: Arc<dyn Mailer> = if flags.mailgun {
        Arc::new(MailgunMailer::from_settings(&settings)?)
    } else {
        Arc::new(LogMailer)
    };

    let objects: Option<Arc<dyn ObjectStore>> = if flags.s3 {
        let s3 = S3ObjectStore::from_env()?;
        s3.ensure_bucket().await;
        Some(Arc::new(s3))
    } else {
        tracing::info!("s3 disabled, uploads will be refused");
        None
    };

    let rate_limit = flags.rate_limit.then(|| {
        RateLimitState::new(
            settings.rate_limit_max,
            Duration::from_secs(settings.rate_limit_window_secs),
        )
    });

    let bind_addr = settings.bind_addr.clone();
    let state = AppState {
        store,
        objects,
        mailer,
        settings: Arc::new(settings),
    };

    let mut router = server::openapi::api_router(state, rate_limit);
    if flags.telemetry {
        router = router.layer(server::telemetry::OtelTraceLayer);
    }
    let router = router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "innovex-server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
