use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pkgscout_core::{
    load_config_or_default, validate_config, CacheBackend, HttpFetcher, JsonFileCache, LinkCache,
    LinkOrchestrator, LinkResolver, MemoryCache, RealDebridClient,
};
use pkgscout_server::api::create_router;
use pkgscout_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("PKGSCOUT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Catalog site: {}", config.scraper.base_url);
    info!(
        "Cache backend: {:?} (ttl {}s)",
        config.database.backend,
        config.database.effective_ttl()
    );

    // Create link cache
    let cache: Arc<dyn LinkCache> = match config.database.backend {
        CacheBackend::File => Arc::new(JsonFileCache::new(
            &config.database.cache_file,
            config.database.effective_ttl(),
        )),
        CacheBackend::Memory => Arc::new(MemoryCache::new(config.database.effective_ttl())),
    };
    let loaded = cache.load();
    info!("Link cache initialized with {} records", loaded);

    // Create page fetcher
    let fetcher = Arc::new(HttpFetcher::new(&config.scraper).context("Failed to create HTTP client")?);
    info!(
        "Page fetcher ready ({:?} on {:?}, timeout {}s)",
        config.scraper.client.browser, config.scraper.client.platform, config.scraper.timeout
    );

    let orchestrator = Arc::new(LinkOrchestrator::new(&config.scraper, fetcher, cache));
    info!(
        "Link filter blocklist: {:?}",
        orchestrator.filter().blocklist()
    );

    // Create resolver if configured
    let resolver: Option<Arc<dyn LinkResolver>> = match &config.resolver {
        Some(resolver_config) => {
            let client =
                RealDebridClient::new(resolver_config).context("Failed to create link resolver")?;
            info!("Initializing link resolver at {}", resolver_config.base_url);
            Some(Arc::new(client))
        }
        None => {
            info!("No link resolver configured");
            None
        }
    };

    let addr = SocketAddr::new(config.server.host, config.server.port);

    // Create app state
    let state = Arc::new(AppState::new(config, orchestrator, resolver));

    // Create router
    let app = create_router(state);

    // Start server
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
