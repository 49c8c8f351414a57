mod api;
mod middleware;
mod wishlist;

use std::sync::Arc;

use cardboard_core::RegistryLoader;
use cardboard_scraper::{load_stores, Checker, StoreClient};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    wishlist::WishlistStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = cardboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let loader = RegistryLoader::new(config.config_dir.clone());
    let stores = load_stores(&loader);
    let client = StoreClient::new(config.request_timeout_secs, &config.user_agent)?;
    let checker = Checker::new(stores, client, config.max_concurrent_games);

    let state = AppState {
        checker: Arc::new(checker),
        wishlist: Arc::new(WishlistStore::new(config.games_path.clone())),
    };
    tracing::info!(
        stores = state.checker.stores().len(),
        wishlist = %state.wishlist.path().display(),
        "starting wishlist checker"
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
