use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;

use institute_registry::utils::{logger, validation::Validate};
use institute_registry::{
    registry_router, FileConfig, FsBlobStore, RegistrationService, RestDirectory, ServerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ServerConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_logger(config.verbose);
    }

    if let Some(path) = config.config.clone() {
        tracing::info!(file = %path.display(), "loading configuration file");
        config = FileConfig::load(&path)?.apply(config);
    }

    config.validate()?;

    tracing::info!(
        port = config.port,
        store = %config.store_url,
        uploads = %config.upload_dir,
        "starting institute-registry"
    );

    let records = RestDirectory::new(config.store_url.clone(), config.store_key.clone());
    let blobs = FsBlobStore::new(config.upload_dir.clone());
    let service = Arc::new(RegistrationService::new(records, blobs));

    let app = registry_router(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {e}");
    }
}
