mod cli;
mod core;
mod features;
mod shared;

use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{App, Cli};
use crate::core::config::Config;
use crate::core::rest::ResourceClient;
use crate::features::auth::{AuthClient, SessionStore};
use crate::features::citizens::CitizenService;
use crate::features::signalements::SignalementService;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::debug!("Using API at {}", config.api.base_url);

    let session = Arc::new(SessionStore::open(config.session.path.clone()));
    let resource = Arc::new(ResourceClient::new(&config.api, session.clone())?);

    let app = App {
        auth: AuthClient::new(&config.api, session.clone())?,
        session: session.clone(),
        signalements: SignalementService::new(resource.clone(), session),
        citizens: CitizenService::new(resource),
    };

    if let Err(error) = cli::run(cli.command, &app).await {
        cli::render_error(&error);
        std::process::exit(1);
    }
    Ok(())
}
