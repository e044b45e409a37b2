//! Party Battle terminal application.
//!
//! Recruit up to four heroes and fight escalating monster encounters until
//! the party falls.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! cargo run -p battle -- --headless --party warrior,mage,cleric,rogue --seed 7
//! ```

mod app;
mod events;
mod headless;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use battle_core::{RunSession, SessionConfig, MAX_PARTY_SIZE};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use events::{handle_event, EventResult};
use ui::render;

/// Turn-based party-vs-monster battles in the terminal
#[derive(Parser, Debug)]
#[command(name = "battle", version, about)]
struct Args {
    /// Run the text protocol on stdin/stdout instead of the TUI
    #[arg(long)]
    headless: bool,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Heroes needed before the first battle (1-4)
    #[arg(long, default_value_t = MAX_PARTY_SIZE)]
    party_size: usize,

    /// Classes recruited at startup, e.g. `warrior,mage`
    #[arg(long, value_delimiter = ',')]
    party: Vec<String>,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.log_dir.clone())?;
    tracing::info!(seed = ?args.seed, party_size = args.party_size, "starting");

    if args.headless {
        let config = headless::config_from_party(&args.party, args.seed, args.party_size)?;
        return headless::run_headless(config);
    }

    let mut config = SessionConfig::new().with_party_size(args.party_size);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let mut session = RunSession::new(config);
    for name in &args.party {
        let class = battle_core::HeroClass::from_name(name)
            .ok_or_else(|| anyhow::anyhow!("unknown class '{name}'"))?;
        session.recruit(class)?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result?;
    println!(
        "Fought {} battles, {} victories in the last run.",
        app.battles_fought(),
        app.session.victories()
    );
    tracing::info!(victories = app.session.victories(), "exiting");
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }
    }
}

/// Log to a file so the TUI owns the terminal.
fn setup_logging(log_dir: Option<PathBuf>) -> Result<()> {
    let log_dir = log_dir.unwrap_or_else(default_log_directory);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "battle.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process
    std::mem::forget(guard);
    Ok(())
}

/// Filter from `RUST_LOG` directives, or `info` when unset or invalid.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn default_log_directory() -> PathBuf {
    if let Some(cache) = std::env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(cache).join("battle").join("logs");
    }
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".cache").join("battle").join("logs"),
        None => std::env::temp_dir().join("battle").join("logs"),
    }
}
