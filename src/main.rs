use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use port_tariff_engine::api::{AppState, create_router};
use port_tariff_engine::calculation::calculate_all;
use port_tariff_engine::config::ConfigLoader;
use port_tariff_engine::error::EngineError;
use port_tariff_engine::llm::GeminiClient;
use port_tariff_engine::models::{Port, VesselParticulars};
use port_tariff_engine::settings::{AppSettings, SettingsError};
use port_tariff_engine::telemetry::{self, TelemetryError};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "port-tariff",
    about = "Calculate South African port dues from vessel particulars",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Price a single port call and print the assessment as JSON
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Gross tonnage of the vessel
    #[arg(long)]
    gt: Decimal,
    /// Port of call, e.g. "Durban" or "Richards Bay"
    #[arg(long)]
    port: Port,
    /// Days alongside, possibly fractional
    #[arg(long)]
    days: Decimal,
    /// Override the configured tariff book directory
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to render assessment: {0}")]
    Render(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Quote(args) => run_quote(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), CliError> {
    let mut settings = AppSettings::load()?;

    if let Some(host) = args.host.take() {
        settings.server.host = host;
    }
    if let Some(port) = args.port.take() {
        settings.server.port = port;
    }

    telemetry::init(&settings.telemetry)?;

    let config = ConfigLoader::load(&settings.tariff_config_dir)?;
    let llm_configured = settings.llm.api_key.is_some();
    let state = AppState::new(config, GeminiClient::new(settings.llm.clone()));
    let app = create_router(state);

    let addr = settings.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        environment = ?settings.environment,
        %addr,
        tariff_config_dir = %settings.tariff_config_dir.display(),
        llm_configured,
        "Port tariff engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_quote(args: QuoteArgs) -> Result<(), CliError> {
    let settings = AppSettings::load()?;
    let config_dir = args.config_dir.unwrap_or(settings.tariff_config_dir);

    let loader = ConfigLoader::load(&config_dir)?;
    let vessel = VesselParticulars::new(args.gt, args.port, args.days)?;
    let assessment = calculate_all(&vessel, loader.config())?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}
