use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use farebox_api::{app, notifier::NotificationDispatcher, AppState};
use farebox_store::DbClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farebox_api=debug,farebox_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = farebox_store::Config::load()?;
    tracing::info!("Starting farebox API on port {}", config.server.port);

    let db = DbClient::new(&config.database).await?;
    db.migrate().await?;
    if config.seed.enabled {
        db.seed_demo_item().await?;
    }

    let notifier =
        NotificationDispatcher::new(Duration::from_secs(config.notifications.send_delay_seconds));

    let app_state = AppState {
        db: Arc::new(db),
        notifier: notifier.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Outstanding ticket sends must finish before the process exits
    tracing::info!(in_flight = notifier.in_flight(), "waiting for ticket sends to drain");
    notifier.wait_for_completion().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
