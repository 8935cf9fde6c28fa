//! A terminal rendition of a recruiting design system.
//!
//! Run the binary to browse the candidate pipeline and the component
//! showcase.  Run with `--print-seed` to dump the sample data as CSV.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent, TICK_RATE},
    handler,
    state::AppState,
};
use crate::config::{AppConfig, PageSizeMode};
use crate::core::record::{seed_candidates, Candidate, SearchField};
use crate::core::source::{write_csv, CsvSource, RecordSource, SeedSource};
use crate::ui::{screen, sidebar::NavSelection};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartPage {
    Pipeline,
    Showcase,
}

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Recruiting design-system demo")]
struct Cli {
    /// Candidate CSV to load instead of the built-in sample.
    #[arg(long, value_name = "CSV")]
    data: Option<PathBuf>,

    /// Page to open on.
    #[arg(long, value_enum, default_value_t = StartPage::Pipeline)]
    page: StartPage,

    /// Fixed rows per page (otherwise derived from the table height).
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    page_size: Option<u16>,

    /// Field the search box matches against.
    #[arg(long, value_parser = parse_search_field)]
    search_field: Option<SearchField>,

    /// Print the sample candidates as CSV and exit.
    #[arg(long)]
    print_seed: bool,
}

fn parse_search_field(s: &str) -> Result<SearchField, String> {
    SearchField::from_key(&s.to_ascii_lowercase()).ok_or_else(|| {
        let keys: Vec<_> = SearchField::ALL.iter().map(|f| f.key()).collect();
        format!("expected one of: {}", keys.join(", "))
    })
}

fn load_records(cli: &Cli) -> Result<(Vec<Candidate>, String)> {
    let source: Box<dyn RecordSource> = match &cli.data {
        Some(path) => Box::new(CsvSource::new(path)),
        None => Box::new(SeedSource),
    };
    let name = source.describe();
    let records = source
        .load()
        .with_context(|| format!("loading candidates from {name}"))?;
    tracing::info!(source = %name, count = records.len(), "candidates loaded");
    Ok((records, name))
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.print_seed {
        write_csv(io::stdout().lock(), &seed_candidates())?;
        return Ok(());
    }

    // ── state ─────────────────────────────────────────────────
    let (records, source) = load_records(&cli)?;
    let mut user_config = AppConfig::load();
    if let Some(n) = cli.page_size {
        user_config.page_size = PageSizeMode::Fixed(usize::from(n));
    }
    if let Some(field) = cli.search_field {
        user_config.search_field = field;
    }
    let mut state = AppState::new(records, source, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    state.resize(size.width, size.height);
    if cli.page == StartPage::Showcase {
        state.select_nav(NavSelection::entry(1));
    }

    let mut events = spawn_event_reader(TICK_RATE);

    // ── event loop ────────────────────────────────────────────
    loop {
        state.observe_reveals();
        terminal.draw(|frame| screen::draw(frame, &mut state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                    AppEvent::Tick => state.tick(),
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "vu-deck",
            "--page",
            "showcase",
            "--page-size",
            "5",
            "--search-field",
            "Job",
        ])
        .unwrap();
        assert_eq!(cli.page, StartPage::Showcase);
        assert_eq!(cli.page_size, Some(5));
        assert_eq!(cli.search_field, Some(SearchField::Job));
        assert!(cli.data.is_none());
    }

    #[test]
    fn cli_rejects_bad_values() {
        assert!(Cli::try_parse_from(["vu-deck", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["vu-deck", "--search-field", "score"]).is_err());
    }

    #[test]
    fn seed_source_is_default() {
        let cli = Cli::try_parse_from(["vu-deck"]).unwrap();
        let (records, name) = load_records(&cli).unwrap();
        assert_eq!(records.len(), 12);
        assert_eq!(name, SeedSource.describe());
    }
}
