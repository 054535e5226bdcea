use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::{bail, Context};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use sub2clash::interfaces::{convert_content, convert_url, spawn_auto_refresh};
use sub2clash::settings::update_settings_from_file;
use sub2clash::utils::HttpTransport;
use sub2clash::web_handlers::interfaces;
use sub2clash::{AppState, Settings};

/// Convert proxy subscriptions into geo-grouped Clash configurations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML or YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address (e.g., 127.0.0.1 or 0.0.0.0)
    #[arg(short, long, value_name = "ADDRESS")]
    address: Option<String>,

    /// Listen port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Subscription URL to convert directly instead of starting the server
    #[arg(long, value_name = "URL", conflicts_with = "input")]
    url: Option<String>,

    /// Local subscription file to convert directly
    #[arg(long, value_name = "FILE")]
    input: Option<String>,

    /// Output file for a direct conversion
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    output: Option<String>,
}

/// Joins a listen address and port unless the address already carries one.
///
/// Bare IPv6 addresses such as `::1` are bracketed.
fn resolve_listen_address(address: &str, port: u16) -> String {
    let address = address.trim();
    if address.parse::<SocketAddr>().is_ok() {
        return address.to_string();
    }
    if let Ok(ip) = address.trim_matches(|c| c == '[' || c == ']').parse::<IpAddr>() {
        return SocketAddr::new(ip, port).to_string();
    }
    match address.rsplit_once(':') {
        Some((_, p)) if p.parse::<u16>().is_ok() => address.to_string(),
        _ => format!("{}:{}", address, port),
    }
}

async fn convert_once(
    state: &AppState<HttpTransport>,
    args: &Args,
    output: &str,
) -> anyhow::Result<()> {
    let config = match (&args.url, &args.input) {
        (Some(url), _) => {
            info!("Processing subscription from URL: {} to file: {}", url, output);
            convert_url(url, state.resolver(), state.config.fetch_timeout()).await?
        }
        (None, Some(input)) => {
            info!("Processing subscription file: {} to file: {}", input, output);
            let content = tokio::fs::read_to_string(input)
                .await
                .with_context(|| format!("Failed to read {}", input))?;
            convert_content(&content, state.resolver()).await?
        }
        (None, None) => bail!("Nothing to convert"),
    };

    tokio::fs::write(output, config)
        .await
        .with_context(|| format!("Failed to write to output file {}", output))?;
    info!("Successfully wrote configuration to {}", output);
    Ok(())
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.config {
        update_settings_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path))?;
    }
    let settings = Settings::current();

    // Initialize the logger, RUST_LOG takes precedence
    env_logger::init_from_env(Env::default().default_filter_or(settings.common.log_level.as_str()));

    let direct = args.url.is_some() || args.input.is_some();
    if direct != args.output.is_some() {
        bail!("--url or --input must be used together with -o/--output");
    }

    let app_state = Arc::new(AppState::new(Arc::clone(&settings))?);

    if let Some(output) = &args.output {
        if let Err(e) = convert_once(&app_state, &args, output).await {
            error!("{:#}", e);
            return Err(e);
        }
        return Ok(());
    }

    let address = args
        .address
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| settings.common.listen_address.clone());
    let port = args.port.unwrap_or(settings.common.listen_port);
    let listen_address = resolve_listen_address(&address, port);

    let _refresher = spawn_auto_refresh(Arc::clone(&app_state));

    info!("sub2clash starting on {}", listen_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&app_state)))
            .configure(interfaces::config::<HttpTransport>)
    })
    .bind(&listen_address)
    .with_context(|| format!("Failed to bind {}", listen_address))?
    .run()
    .await?;

    Ok(())
}
