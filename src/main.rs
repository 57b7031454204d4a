use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use eyre::Result;
use log::{debug, info};

mod cli;

use cli::Cli;
use ytserve::config::{AllowedOrigins, Config};
use ytserve::server::Server;
use ytserve::youtube::CaptionFetcher;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    // Apply config defaults (CLI flags take priority)
    let host = cli
        .host
        .clone()
        .or(config.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = cli.port.or(config.port).unwrap_or(DEFAULT_PORT);
    let languages = if cli.lang.is_empty() {
        config.default_langs.unwrap_or_else(|| vec!["en".to_string()])
    } else {
        cli.lang.clone()
    };

    if cli.verbose {
        let config_path = ytserve::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        debug!("Preferred languages: {languages:?}");
    }

    let origins = AllowedOrigins::from_env();
    info!("CORS allow-list: {origins:?}");

    let client = reqwest::Client::new();
    let fetcher = Arc::new(CaptionFetcher::new(client));

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let server = Server::new(fetcher, languages, &origins, addr);

    server.serve().await
}
