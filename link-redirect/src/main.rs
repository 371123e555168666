use std::sync::Arc;

use clap::Parser;
use link_alloc::SharedAllocator;
use link_redirect::AppState;
use link_redirect::Args;
use link_redirect::admin_router;
use link_redirect::public_router;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,link_redirect=debug,link_alloc=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    let args = Args::parse().validate()?;

    let state = AppState::new(Arc::new(SharedAllocator::new()), &args.host);
    let public = public_router(state.clone(), args.request_timeout);
    let admin = admin_router(state, args.credentials(), args.request_timeout);

    let public_listener = TcpListener::bind(args.public_addr).await?;
    let admin_listener = TcpListener::bind(args.admin_addr).await?;

    info!(addr = %args.public_addr, host = %args.host, "public listener ready");
    info!(addr = %args.admin_addr, user = args.credentials().user(), "admin listener ready");

    tokio::try_join!(
        async {
            axum::serve(public_listener, public)
                .with_graceful_shutdown(shutdown_signal())
                .await
        },
        async {
            axum::serve(admin_listener, admin)
                .with_graceful_shutdown(shutdown_signal())
                .await
        },
    )?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
