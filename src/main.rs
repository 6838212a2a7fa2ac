use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use toolboard::catalog::{CatalogController, parse_tools};
use toolboard::config::Config;
use toolboard::gateway::{RequestError, RequestSpec};
use toolboard::layout::{ResponsiveLayoutTracker, cards_per_row, col_span, derive_span_with, grid_col_span};
use toolboard::tui::{self, TuiRunner};

fn setup_logging(config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolboard")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolboard.log");

    // The terminal belongs to the TUI, so logs go to a file
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the config file's log_level
    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => run_tui(config).await,
        Some(Commands::List { json }) => handle_list_command(*json, config).await,
        Some(Commands::Layout { width }) => handle_layout_command(*width, config),
    }
}

async fn run_tui(config: &Config) -> Result<()> {
    info!("Launching TUI against {}", config.gateway.origin);
    let gateway = config.gateway.connect()?;
    let tracker =
        ResponsiveLayoutTracker::new(config.layout.min_card_width).with_stack_below(config.layout.stack_below);
    let controller = CatalogController::new(gateway, tracker).with_list_path(config.gateway.list_tools_path.as_str());

    let terminal = tui::init_terminal().context("Failed to initialize terminal")?;
    let result = match TuiRunner::new(terminal, controller, config) {
        Ok(mut runner) => runner.run().await,
        Err(e) => Err(e),
    };
    tui::restore_terminal().context("Failed to restore terminal")?;
    result
}

async fn handle_list_command(json: bool, config: &Config) -> Result<()> {
    info!("Listing tools from {}", config.gateway.origin);
    let gateway = config.gateway.connect()?;
    let spec = RequestSpec::get(config.gateway.list_tools_path.as_str());

    let payload = match gateway.send(spec).await {
        Ok(payload) => payload,
        Err(error) => {
            print_request_error(&error);
            return Err(error).context("Failed to fetch tool catalog");
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let tools = parse_tools(&payload).context("Gateway returned an unexpected catalog")?;
    if tools.is_empty() {
        println!("{}", "No tools available".dimmed());
        return Ok(());
    }

    let width = tools.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
    for tool in &tools {
        let name = format!("{:width$}", tool.name, width = width);
        println!("{}  {}", name.green().bold(), tool.description);
    }
    println!("{}", format!("{} tools", tools.len()).dimmed());
    Ok(())
}

fn print_request_error(error: &RequestError) {
    match error {
        RequestError::Status { status, data, message } => {
            eprintln!("{} {}", "Server error:".red(), message);
            eprintln!("  status: {}", status);
            if let Some(data) = data {
                eprintln!("  body:   {}", data);
            }
        }
        RequestError::NoResponse { message, request } => {
            eprintln!("{} {}", "Transport error:".red(), message);
            eprintln!("  request: {}", request);
        }
        RequestError::Construction { message } => {
            eprintln!("{} {}", "Request error:".red(), message);
        }
    }
}

fn handle_layout_command(width: u32, config: &Config) -> Result<()> {
    let span = derive_span_with(width, config.layout.min_card_width);
    let col = grid_col_span(width, span, config.layout.stack_below);
    println!("{} {}", "width:".cyan(), width);
    println!("{} {}", "cards per row:".cyan(), span);
    println!("{} {}/12", "column span:".cyan(), col);
    if col != col_span(span) {
        println!(
            "{}",
            format!("  narrower than {}: cards stack one per row", config.layout.stack_below).yellow()
        );
    } else if cards_per_row(col) != span {
        println!(
            "{}",
            format!("  {} cards fit per grid row at this column span", cards_per_row(col)).yellow()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; it decides the default log level
    let (config, warnings) = Config::load_with_warnings(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = config.with_origin(cli.origin.as_deref());

    // Logging is not up yet, so skipped config files go to stderr
    for warning in &warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    setup_logging(&config).context("Failed to setup logging")?;
    for warning in &warnings {
        log::warn!("{}", warning);
    }

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
