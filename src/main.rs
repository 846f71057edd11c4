//! Main entry point for the show-browser CLI application.

use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use ratatui::prelude::*;
use show_browser::api::TvMazeClient;
use show_browser::config::Config;
use show_browser::filter::EmptyResults;
use show_browser::navigation::Navigator;
use show_browser::tui::{poll_event, Action, TuiView};
use std::fs::{self, File};
use std::io::{self, stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command-line arguments for the show-browser application.
#[derive(Parser, Debug)]
#[command(
    name = "show-browser",
    version,
    about = "A terminal TV show browser",
    long_about = "Browse, search and open TV shows and their episodes from a TVMaze-style catalog."
)]
struct Args {
    /// Catalog API base URL (overrides config)
    #[arg(short, long)]
    base_url: Option<String>,

    /// What to display when a search matches nothing (overrides config)
    #[arg(short, long, value_enum)]
    empty_results: Option<EmptyResults>,

    /// Open this show id once the show list has loaded
    #[arg(short, long)]
    show: Option<u32>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Write logs here instead of the default data directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Set up env_logger writing to a file, since the terminal belongs to the TUI.
fn init_logging(level: u8, path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = match level {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let path = match path {
        Some(p) => p,
        None => Config::default_log_path()?,
    };
    let file = open_log_file(&path)?;

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    debug!("Log level set to {:?}", log_level);
    Ok(())
}

/// Create the log file and any missing parent directories.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The browser still works without a log file
    if let Err(e) = init_logging(args.log, args.log_file.clone()) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Err(e) = Config::create_default_if_missing() {
        warn!("Failed to write default config: {}", e);
    }

    // Load config
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // Merge config with CLI args
    let base_url = args.base_url.unwrap_or_else(|| config.base_url.clone());
    let empty_results = args.empty_results.unwrap_or(config.empty_results);
    let startup_show = args.show.or(config.startup_show);

    info!("Using catalog at {}", base_url);
    let client = TvMazeClient::new(&base_url, config.request_timeout())?;

    let terminal = init_terminal()?;
    let mut navigator = Navigator::new(client, TuiView::new(terminal), empty_results);

    let result = run_app(&mut navigator, startup_show).await;

    restore_terminal()?;

    result
}

async fn run_app<B: Backend>(
    navigator: &mut Navigator<TvMazeClient, TuiView<B>>,
    startup_show: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    if navigator.load().await.is_ok() {
        if let Some(show_id) = startup_show {
            // Failure is shown in the TUI
            let _ = navigator.select_show(show_id).await;
        }
    }

    loop {
        navigator.renderer_mut().redraw()?;

        // Input arriving while a fetch is awaited stays buffered until here
        let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match navigator.renderer_mut().handle_input(key) {
            Action::Quit => break,
            Action::Dispatch(event) => navigator.handle(event).await,
            Action::None => {}
        }

        if navigator.renderer().state().should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("show-browser.log");
        assert!(open_log_file(&path).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        assert!(open_log_file(&blocker.join("show-browser.log")).is_err());
    }
}
