// src/main.rs
use clap::Parser;

use reqreslog::{config::Config, server, telemetry};

#[derive(Debug, Parser)]
#[command(name = "reqreslog", version, about = "Demo API with request/response logging")]
struct Args {
    /// Config file (toml/yaml/json); `config/default` when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    telemetry::init_tracing(&cfg.logging)?;
    tracing::info!(?cfg, "Loaded configuration");

    server::run(&cfg).await?;

    Ok(())
}
