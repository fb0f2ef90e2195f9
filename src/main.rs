//! braindump - ADHD Brain Dump Organizer
//!
//! CLI entry point. No subcommand launches the interactive TUI; `run`
//! processes a single dump and prints the plan.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use braindump::cli::{Cli, Command};
use braindump::config::Config;
use braindump::llm::create_client;
use braindump::pipeline::{self, EMPTY_INPUT_WARNING};
use braindump::prompts::{Granularity, Mode, PromptLoader};
use braindump::session::SessionLog;
use braindump::tui::{self, TuiRunner};
use braindump::{content, render};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("braindump")
        .join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    let log_file = fs::File::create(log_dir.join("braindump.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Run {
            input,
            mode,
            granularity,
            raw,
        }) => {
            debug!("main: matched Run command");
            cmd_run(&cli.config, cli.log_level.as_deref(), input, mode, granularity, raw).await
        }
        None => {
            debug!("main: no subcommand, launching TUI");
            cmd_tui(&cli.config, cli.log_level.as_deref()).await
        }
    }
}

/// Launch the interactive TUI
async fn cmd_tui(config_path: &Option<PathBuf>, log_level: Option<&str>) -> Result<()> {
    let config = Config::load(config_path.as_ref()).context("Failed to load configuration")?;
    setup_logging(log_level, config.log_level.as_deref()).context("Failed to setup logging")?;
    config.validate()?;

    info!(model = %config.llm.model, "braindump starting TUI");

    let log = SessionLog::new();
    log.info("Session started");
    log.push(
        braindump::session::LogLevel::Config,
        format!("Model: {} via {}", config.llm.model, config.llm.base_url),
    );

    let llm = create_client(&config.llm)?;
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let prompts = Arc::new(PromptLoader::new(&root));

    let terminal = tui::init();
    let mut runner = TuiRunner::new(
        terminal,
        llm,
        prompts,
        log,
        Duration::from_millis(config.ui.tick_rate_ms),
    );
    let result = runner.run().await;
    tui::restore();
    result
}

/// Process one brain dump and print the rendered plan
async fn cmd_run(
    config_path: &Option<PathBuf>,
    log_level: Option<&str>,
    input: String,
    mode: Mode,
    granularity: u8,
    raw: bool,
) -> Result<()> {
    // Reject empty input before touching config or the network
    if input.trim().is_empty() {
        return Err(eyre!(EMPTY_INPUT_WARNING));
    }
    let granularity =
        Granularity::from_level(granularity).ok_or_else(|| eyre!("granularity must be 1, 2, or 3"))?;

    let config = Config::load(config_path.as_ref()).context("Failed to load configuration")?;
    setup_logging(log_level, config.log_level.as_deref()).context("Failed to setup logging")?;
    config.validate()?;

    info!(model = %config.llm.model, ?mode, ?granularity, "braindump run");

    let llm = create_client(&config.llm)?;
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let prompts = Arc::new(PromptLoader::new(&root));
    let log = SessionLog::new();

    let outcome = pipeline::process(llm, prompts, log, input, mode, granularity).await;

    if raw {
        match outcome.raw_response {
            Some(text) => {
                println!("{text}");
                return Ok(());
            }
            None => {
                return Err(eyre!(outcome
                    .plan
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no response".to_string())));
            }
        }
    }

    match outcome.plan {
        Ok(plan) => {
            println!("{}", render::render_plan(&plan, outcome.acknowledgment.as_deref()));
            println!("💡 {}", content::random_tip());
            println!("{}", content::random_affirmation());
            Ok(())
        }
        Err(failure) => Err(eyre!(failure.to_string())),
    }
}
