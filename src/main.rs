// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use recon_probe::api::{handle_scan_request, ScanRequest};
use recon_probe::config::ScanConfig;
use recon_probe::core::models::{ScanOutcome, ScanTarget};
use recon_probe::core::scanner::Scanner;
use recon_probe::logging::initialize_logging;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

mod app;
mod ui;

use app::{App, AppState};

#[derive(Parser, Debug)]
#[command(name = "recon-probe", version, about = "Lightweight external security reconnaissance probe", long_about = None)]
struct Cli {
    /// Scan URL once and print the JSON result instead of starting the UI.
    #[arg(long, value_name = "URL")]
    json: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    initialize_logging()?;
    let cli = Cli::parse();

    let scanner = Scanner::new(ScanConfig::load())?;

    if let Some(url) = cli.json {
        return run_headless(&scanner, url).await;
    }
    run_tui(scanner).await
}

/// Prints the response body of one scan request; exit code 2 on input errors.
async fn run_headless(scanner: &Scanner, url: String) -> Result<()> {
    info!(url = %url, "Running headless scan.");
    let response = handle_scan_request(scanner, ScanRequest { url: Some(url) }).await;
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if !response.is_success() {
        std::process::exit(2);
    }
    Ok(())
}

async fn run_tui(scanner: Scanner) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<ScanOutcome>(1);

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            if event::poll(Duration::from_millis(100))? {
                handle_events(&mut app, &scanner, &tx)?;
            }

            if let Ok(outcome) = rx.try_recv() {
                app.finish_scan(outcome);
            }
            app.on_tick();
        }
        Ok::<(), color_eyre::eyre::Report>(())
    }
    .await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    result
}

fn handle_events(app: &mut App, scanner: &Scanner, tx: &mpsc::Sender<ScanOutcome>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if app.show_disclaimer {
            match key.code {
                KeyCode::Enter => app.show_disclaimer = false,
                KeyCode::Esc => app.quit(),
                _ => {}
            }
            return Ok(());
        }
        match app.state {
            AppState::Idle => handle_idle_input(app, key.code, scanner, tx),
            AppState::Finished => handle_finished_input(app, key.code),
            AppState::Scanning => {
                if key.code == KeyCode::Char('q') { app.quit(); }
            }
        }
    }
    Ok(())
}

/// While idle every printable key goes into the target field, so quitting is on Esc.
fn handle_idle_input(app: &mut App, key_code: KeyCode, scanner: &Scanner, tx: &mpsc::Sender<ScanOutcome>) {
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => { app.input.pop(); },
        KeyCode::Enter => {
            if app.input.trim().is_empty() { return; }
            let raw = app.normalized_input();
            // Rejected targets never reach the scanner.
            let target = match ScanTarget::parse(&raw) {
                Ok(target) => target,
                Err(e) => {
                    app.reject_input(e.to_string());
                    return;
                }
            };
            app.start_scan(raw);

            let tx_clone = tx.clone();
            let scanner = scanner.clone();
            tokio::spawn(async move {
                let outcome = scanner.scan_detailed(&target).await;
                let _ = tx_clone.send(outcome).await;
            });
        }
        _ => {}
    }
}

fn handle_finished_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('n') => app.reset(),
        KeyCode::Char('e') => app.export_report(),
        KeyCode::Char('l') => app.toggle_logs(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Left => app.scroll_logs_left(),
        KeyCode::Right => app.scroll_logs_right(),
        _ => {}
    }
}
