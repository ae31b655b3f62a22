//! Main entry point for the show-browser terminal client.

mod tui;

use crate::tui::{Action, App, draw, poll_event};
use clap::Parser;
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};
use ratatui::prelude::*;
use show_browser::api::{Fetcher, HttpFetcher};
use show_browser::config::Config;
use show_browser::loader::LOADING_EPISODES;
use show_browser::presenter::Presenter;
use show_browser::session::{Browser, LOADING_SHOWS};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the show-browser application.
#[derive(Parser, Debug)]
#[command(
    name = "show-browser",
    version,
    about = "Browse the TVmaze show catalog",
    long_about = "Search the TVmaze show catalog, open a show's episode list and read episode details in a TUI."
)]
struct Args {
    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Maximum number of catalog pages to load (overrides config)
    #[arg(short, long)]
    max_pages: Option<usize>,

    /// Base URL of the catalog API (overrides config)
    #[arg(short, long)]
    api_base: Option<String>,

    /// Path to a config file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
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

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Log level set to {:?}", log_level);

    let loaded = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // CLI flags win over the config file
    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages;
    }
    if let Some(api_base) = args.api_base {
        config.api_base = api_base;
    }

    let fetcher = HttpFetcher::new(&config)?;
    let mut browser = Browser::new(fetcher, App::new(), &config);

    let mut terminal = init_terminal()?;

    let result = run_app(&mut terminal, &mut browser).await;

    restore_terminal()?;

    result
}

async fn run_app<F: Fetcher>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    browser: &mut Browser<F, App>,
) -> Result<(), Box<dyn std::error::Error>> {
    browser.presenter_mut().set_status_message(LOADING_SHOWS);
    terminal.draw(|f| draw(f, browser.presenter_mut()))?;
    browser.bootstrap().await;

    loop {
        terminal.draw(|f| draw(f, browser.presenter_mut()))?;

        if let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match browser.presenter_mut().handle_input(key) {
                Action::Quit => break,
                Action::Search(text) => browser.on_search_text_changed(&text),
                Action::OpenShow(show_id) => {
                    browser.presenter_mut().set_status_message(LOADING_EPISODES);
                    terminal.draw(|f| draw(f, browser.presenter_mut()))?;
                    browser.on_entry_selected(show_id).await;
                }
                Action::PickShow(pick) => browser.on_single_entry_picked(pick),
                Action::PickEpisode(pick) => browser.on_child_selected(pick),
                Action::Back => browser.on_back(),
                Action::None => {}
            }
        }

        if browser.presenter().should_quit {
            break;
        }
    }

    Ok(())
}
