//! ragchat Entry Point
//!
//! Launches the terminal chat client for the knowledge-base service.
//!
//! # Usage
//!
//! ```bash
//! # Defaults (http://localhost:8000, ~/.config/ragchat/client.toml)
//! ragchat
//!
//! # Different service
//! ragchat --api-url https://kb.example.com
//!
//! # Verbose logging (written to the log file, never the screen)
//! RUST_LOG=debug ragchat --log-file /tmp/ragchat.log
//! ```

use std::fs::{self, File};
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ragchat_core::config::{load_config, load_config_from_path};
use ragchat_core::{ClientConfig, ConfigOverrides, HttpBackend};
use ragchat_tui::App;

/// Terminal client for the knowledge-base chat service
#[derive(Parser, Debug)]
#[command(name = "ragchat")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the knowledge-base service
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Chat and auth request timeout
    #[arg(long, value_name = "SECS")]
    request_timeout: Option<u64>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, env = "RAGCHAT_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Prefill the login username
    #[arg(short = 'u', long)]
    username: Option<String>,
}

/// Default log location under the user cache dir
fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("ragchat").join("ragchat.log"))
}

/// Route tracing output to a file
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {parent:?}"))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {path:?}"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}

/// Resolve file, env and CLI settings into one config
fn resolve_config(args: &Args) -> Result<ClientConfig> {
    let mut config = match &args.config {
        Some(path) => {
            anyhow::ensure!(path.exists(), "Config file not found: {}", path.display());
            load_config_from_path(Some(path.clone()))?
        }
        None => load_config()?,
    };

    ConfigOverrides {
        api_url: args.api_url.clone(),
        request_timeout_secs: args.request_timeout,
    }
    .apply(&mut config);

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = args.log_file.clone().or_else(default_log_path) {
        init_logging(&path)?;
    }

    let config = resolve_config(&args)?;
    info!(
        api_url = %config.api_url,
        source = %config.source,
        version = env!("CARGO_PKG_VERSION"),
        "ragchat starting"
    );

    // Check if we have a TTY before attempting initialization
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: ragchat requires a terminal (TTY)");
        eprintln!();
        eprintln!("Run it interactively, or use `ssh -t` for remote sessions.");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, config, args.username).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("ragchat stopped");

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: ClientConfig,
    username: Option<String>,
) -> Result<()> {
    let backend = Arc::new(HttpBackend::new(&config)?);
    let mut app = App::new(config, backend.clone(), backend);
    if let Some(username) = username {
        app = app.with_username(username);
    }
    app.run(terminal).await
}
