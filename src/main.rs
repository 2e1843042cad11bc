//! user-roster - terminal user directory with a validated insert form

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use user_roster::config::{self, Config};
use user_roster::core::RosterPage;
use user_roster::data::{DisplayMode, UserInsertData};
use user_roster::frontend::tui::RosterTheme;
use user_roster::frontend::{Frontend, TuiFrontend};
use user_roster::services::{MockUserService, SimulatedSubmitter, UserSource};
use user_roster::validation::{FormState, RuleSet};

#[derive(ClapParser)]
#[command(name = "user-roster")]
#[command(about = "Terminal user directory with a validated insert form", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// How the insert form is shown (overrides ui.display_mode)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Insert form heading (overrides ui.title)
    #[arg(short, long)]
    title: Option<String>,

    /// Custom data directory (default: ~/.user-roster)
    /// Can also be set via USER_ROSTER_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Popup,
    Inline,
}

impl From<ModeArg> for DisplayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Popup => DisplayMode::Popup,
            ModeArg::Inline => DisplayMode::Inline,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one user record and print the result as JSON
    Validate {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Print the built-in users as JSON
    List,
}

fn init_logging() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create data directory: {:?}", parent))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file: {:?}", log_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Must happen before anything resolves the base directory
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DIR_ENV, data_dir);
    }

    init_logging()?;
    if let Some(data_dir) = &cli.data_dir {
        tracing::info!("Using custom data directory: {:?}", data_dir);
    }

    match cli.command {
        Some(Commands::Validate {
            first_name,
            last_name,
            email,
            phone,
        }) => {
            let data = UserInsertData {
                first_name,
                last_name,
                email,
                phone,
            };
            if !validate_command(&data)? {
                std::process::exit(1);
            }
            return Ok(());
        }
        Some(Commands::List) => {
            let runtime = tokio::runtime::Runtime::new()?;
            let users = runtime
                .block_on(MockUserService::new().fetch_all())
                .context("Failed to load users")?;
            println!("{}", serde_json::to_string_pretty(&users)?);
            return Ok(());
        }
        None => {}
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if let Some(mode) = cli.mode {
        config.ui.display_mode = mode.into();
    }
    if let Some(title) = cli.title {
        config.ui.title = Some(title);
    }

    run_tui(config)
}

/// Prints the result with every field treated as touched. Returns overall validity.
fn validate_command(data: &UserInsertData) -> Result<bool> {
    let rules = RuleSet::user_defaults().context("Failed to compile validation rules")?;
    let mut form = FormState::new(rules);
    form.set_values(data);
    form.mark_all_touched();

    let result = form.validation_result();
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(result.is_valid)
}

/// Run TUI frontend
fn run_tui(config: Config) -> Result<()> {
    // Submit calls and the success dwell run as tokio tasks
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config))
}

async fn async_run_tui(config: Config) -> Result<()> {
    let submitter = Arc::new(SimulatedSubmitter::new(config.form.submit_delay()));
    let mut page = RosterPage::new(&config, submitter)?;
    page.load_users(&MockUserService::new()).await?;

    let mut frontend = TuiFrontend::new(RosterTheme::from_config(&config.theme))?;
    tracing::info!(
        "Started in {} mode ({} users)",
        page.display_mode(),
        page.users().len()
    );

    while page.running {
        for event in frontend.poll_events()? {
            frontend.handle_event(event, &mut page)?;
        }
        page.pump();
        frontend.render(&mut page)?;
    }

    frontend.cleanup()?;
    tracing::info!("Exiting");
    Ok(())
}
