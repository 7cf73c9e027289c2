use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dataloader_wizard::app::{LoaderApp, WizardConfig, ui};
use dataloader_wizard::error::{Result, WizardError};
use dataloader_wizard::event::{Event, EventHandler};
use ratatui::prelude::*;
use std::io::stdout;
use std::panic;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dataloader-wizard")]
#[command(author, version, about = "Create a Telegraf data loader configuration")]
struct Args {
    /// Path to config file (default: $XDG_CONFIG_HOME/dataloader-wizard/wizard.toml)
    #[arg(long)]
    config: Option<String>,

    /// Bucket (name or id) the wizard writes into
    #[arg(long)]
    bucket: Option<String>,

    /// Starting data loader type; pass an empty string for the explicit empty type
    #[arg(long)]
    loader_type: Option<String>,

    /// Starting step index (0 = select, 1 = configure, 2 = verify)
    #[arg(long)]
    step: Option<usize>,

    /// Starting substep (index, `streaming` or `config`)
    #[arg(long)]
    substep: Option<String>,

    /// Open the wizard immediately instead of showing the bucket list
    #[arg(long)]
    open: bool,

    /// Log file path (logging disabled if not specified)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging only if log file is specified
    if let Some(ref log_path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .ok();

        if let Some(file) = file {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .init();

            info!("Starting dataloader-wizard");
        }
    }

    let config = load_config(&args)?;
    let mut app = LoaderApp::new(config)?;
    if args.open {
        app.open_wizard(None);
    }

    // Set up panic handler to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        error!("{}", panic_info);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;

    let result = run(&mut terminal, &mut app).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(ref e) = result {
        error!("Wizard error: {}", e);
    }

    result
}

fn load_config(args: &Args) -> Result<WizardConfig> {
    let mut config = match &args.config {
        Some(path) => WizardConfig::load_from(path)?,
        None => WizardConfig::load()?,
    };

    // Command line overrides [starting]
    if args.bucket.is_some() {
        config.starting.bucket = args.bucket.clone();
    }
    if args.loader_type.is_some() {
        config.starting.loader_type = args.loader_type.clone();
    }
    if args.step.is_some() {
        config.starting.step = args.step;
    }
    if args.substep.is_some() {
        config.starting.substep = args.substep.clone();
    }

    if args.bucket.is_some() && config.starting_bucket().is_none() {
        return Err(WizardError::Config(format!(
            "unknown bucket: {}",
            args.bucket.as_deref().unwrap_or_default()
        )));
    }

    Ok(config)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().map_err(|e| WizardError::Terminal(e.to_string()))?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| WizardError::Terminal(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| WizardError::Terminal(e.to_string()))
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().map_err(|e| WizardError::Terminal(e.to_string()))?;
    execute!(stdout(), LeaveAlternateScreen).map_err(|e| WizardError::Terminal(e.to_string()))?;
    Ok(())
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut LoaderApp,
) -> Result<()> {
    let mut events = EventHandler::new(Duration::from_millis(250));

    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .map_err(|e| WizardError::Terminal(e.to_string()))?;

        match events.next().await {
            Some(Event::Key(key)) => app.handle_key(key),
            Some(Event::Resize) | Some(Event::Tick) => {}
            None => break,
        }

        if app.should_exit {
            break;
        }
    }

    info!("Exiting dataloader-wizard");
    Ok(())
}
