use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use common::{Board, ReplayKey, TurnSnapshot};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use search::{discover_replay_keys, SearchConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use terminal::app::{App, AppCommand};
use terminal::prompt::{prompt_for_key, resolve_choice};
use terminal::render::board::BoardRenderer;
use terminal::render::glyphs::AsciiGlyphs;
use terminal::render::text::render_turn_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PrintFormat {
    /// ASCII board per turn
    Board,
    /// Snapshots as a JSON array
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "snake-replay",
    about = "Rebuild a snake match turn by turn from server logs"
)]
struct Args {
    /// Directory holding the index and event logs (REPLAY_LOG_DIR)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Glob for index files, relative to the log directory (REPLAY_INDEX_PATTERN)
    #[arg(long)]
    index_pattern: Option<String>,

    /// Glob for event logs, relative to the log directory (REPLAY_LOG_PATTERN)
    #[arg(long)]
    log_pattern: Option<String>,

    /// Tag namespace in front of `.info.` (REPLAY_TAG_NAMESPACE)
    #[arg(long)]
    namespace: Option<String>,

    /// Target chunk size in bytes (REPLAY_CHUNK_SIZE)
    #[arg(long)]
    chunk_size: Option<u64>,

    /// Search worker threads (REPLAY_WORKERS)
    #[arg(long)]
    workers: Option<usize>,

    /// Board width (REPLAY_BOARD_WIDTH)
    #[arg(long)]
    width: Option<u16>,

    /// Board height (REPLAY_BOARD_HEIGHT)
    #[arg(long)]
    height: Option<u16>,

    /// Index of the replay to load; -1 picks the most recent
    #[arg(long, allow_hyphen_values = true)]
    choice: Option<i64>,

    /// Print every turn to stdout instead of opening the viewer
    #[arg(long, value_enum)]
    print: Option<PrintFormat>,
}

impl Args {
    fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        if let Some(pattern) = &self.index_pattern {
            config.index_pattern = pattern.clone();
        }
        if let Some(pattern) = &self.log_pattern {
            config.log_pattern = pattern.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(size) = self.chunk_size {
            config.chunk_size = size;
        }
        if let Some(workers) = self.workers {
            config.workers = workers.max(1);
        }
        if let Some(width) = self.width {
            config.board = Board::new(width, config.board.height);
        }
        if let Some(height) = self.height {
            config.board = Board::new(config.board.width, height);
        }
        config
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // The viewer owns the screen, so stay quiet there unless RUST_LOG says otherwise
    let default_level = if args.print.is_some() { "info" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = args.apply(SearchConfig::from_env()?);
    info!(log_dir = %config.log_dir.display(), "Looking for replays");

    let keys = discover_replay_keys(&config.index_glob())?;

    match args.print {
        Some(format) => {
            let key = match args.choice {
                Some(choice) => resolve_choice(&keys, choice)?.clone(),
                None => prompt_for_key(&keys, io::stdin().lock(), io::stdout())?,
            };
            let turns = search::replay_turns(&config, &key)?;
            print_turns(&turns, format)
        }
        None => {
            let initial = args
                .choice
                .map(|choice| resolve_choice(&keys, choice).cloned())
                .transpose()?;
            run_viewer(App::new(config, keys), initial)
        }
    }
}

fn print_turns(turns: &[TurnSnapshot], format: PrintFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        PrintFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, turns).context("Failed to encode turns")?;
            writeln!(stdout)?;
        }
        PrintFormat::Board => {
            let renderer = BoardRenderer::new(AsciiGlyphs);
            for snapshot in turns {
                writeln!(stdout, "{}", render_turn_text(&renderer, snapshot))?;
            }
        }
    }
    Ok(())
}

fn run_viewer(mut app: App, initial: Option<ReplayKey>) -> Result<()> {
    if let Some(key) = initial {
        app.handle_command(AppCommand::OpenReplay(key))?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore the terminal before any error is reported
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let mut last_update = Instant::now();

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_update);
        last_update = now;

        app.update(dt);
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(command) = app.handle_input(key) {
                    match command {
                        AppCommand::Quit => return Ok(()),
                        _ => app.handle_command(command)?,
                    }
                }
            }
        }
    }
}
