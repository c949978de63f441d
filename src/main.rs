//! Kabarbot - chat-bot webhook service
//!
//! Receives user commands from a messaging platform over an HTTP webhook and
//! replies with random facts or point-in-time weather forecasts resolved from
//! hourly Open-Meteo data.

mod commands;
mod config;
mod data;
mod resolver;
mod server;

use std::sync::Arc;

use clap::Parser;
use log::info;

use commands::Dispatcher;
use config::Config;
use data::{FactClient, ForecastClient};

/// Kabarbot - fact and weather-forecast chat-bot service
#[derive(Parser, Debug)]
#[command(name = "kabarbot")]
#[command(about = "Chat-bot webhook service for facts and weather forecasts")]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides the PORT environment variable)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let port = cli.port.unwrap_or(config.port);

    info!("Starting kabarbot...");
    info!("Fact endpoint: {}", config.fact_url);

    let dispatcher = Arc::new(Dispatcher::new(
        FactClient::new(),
        ForecastClient::new(),
        config.fact_url.clone(),
    ));

    server::run_server(dispatcher, config.bot_token.clone(), port).await?;

    Ok(())
}
