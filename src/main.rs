use std::env;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CONFIG_DIR: &str = "./config/payslip";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config_dir = env::var("PAYSLIP_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("PAYSLIP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading payslip configuration from {}", config_dir))?;
    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(addr = %addr, config_dir = %config_dir, "Payslip engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
