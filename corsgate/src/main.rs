#![forbid(unsafe_code)]

use clap::Parser;
use corsgate_lib::{config::load_from_path, proxy, telemetry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Local development CORS gateway")]
struct Cli {
    /// Path to configuration TOML file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/localhost.toml"
    )]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match load_from_path(&cli.config) {
        Ok(cfg) => {
            if let Err(err) = telemetry::init_tracing(&cfg.logging) {
                eprintln!("failed to initialize tracing: {err}");
            }
            info!(?cfg.listen, upstream = %cfg.upstream.url, "configuration loaded");
            let cfg = Arc::new(cfg);
            if let Err(err) = proxy::run(cfg).await {
                error!(%err, "gateway exited with error");
                std::process::exit(1);
            }
        }
        Err(err) => {
            let _ = telemetry::init_tracing(&Default::default());
            error!(%err, "failed to load configuration");
            std::process::exit(1);
        }
    }
}
