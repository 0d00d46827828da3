use std::net::TcpListener;

use learning_path_api::{
    db::postgres::create_pool,
    graceful_shutdown::shutdown_signal,
    repositories::{memory::InMemoryStore, sqlx_repo::SqlxStore, store::Store},
    settings::{AppConfig, StorageBackend},
    startup::build_server,
    telemetry::init_tracing,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);
    tracing::info!("Loaded configuration: {:?}", config);

    match config.storage {
        StorageBackend::Postgres => {
            let pool = create_pool(&config.database_url, config.database_max_connections)
                .await
                .map_err(std::io::Error::other)?;

            let store = SqlxStore::new(pool);
            if let Err(e) = store.run_migrations().await {
                tracing::error!("{}", e);
                std::process::exit(1);
            }

            serve(&config, store).await
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            serve(&config, InMemoryStore::new()).await
        }
    }
}

async fn serve<S: Store>(config: &AppConfig, store: S) -> std::io::Result<()> {
    let server_addr = config.server_addr();
    let listener = TcpListener::bind(&server_addr)?;

    tracing::info!(
        "Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = build_server(config, store, listener)?;
    let handle = server.handle();

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => {
            handle.stop(true).await;
            Ok(())
        },
    }
}
