//! Trove: a terminal treasure-hunt narrative game.
//!
//! A login screen, a scripted nine-step expedition resolved with simulated
//! latency, a map panel tracking the hunter, and persistence of progress.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for
//! automated testing:
//!
//! ```bash
//! cargo run -p trove -- --headless --name Mara --fast
//! ```

mod app;
mod audio;
mod events;
mod headless;
mod ui;
mod worker;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use trove_core::{load_notes, Expedition, ScriptedMap, StateStore, STEP_DELAY};

use app::App;
use audio::AmbientAudio;
use events::{handle_event, EventResult};
use headless::HeadlessOptions;
use ui::render::render;
use worker::run_worker;

const DEFAULT_DATA_DIR: &str = ".trove";
const DEFAULT_NOTES_PATH: &str = "assets/locations.txt";
const DEFAULT_MUSIC_PATH: &str = "assets/ambient.mp3";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let options = parse_options(&args);
    init_logging(&options.data_dir);

    if args.iter().any(|a| a == "--headless") {
        return headless::run_headless(HeadlessOptions {
            name: options.name,
            data_dir: options.data_dir,
            notes_path: options.notes_path,
            fast: options.fast,
        })
        .await;
    }

    // Build the engine side before touching the terminal
    let delay = if options.fast {
        Duration::ZERO
    } else {
        STEP_DELAY
    };
    let map = ScriptedMap::new().with_delay(delay);
    let store = StateStore::new(&options.data_dir);
    let expedition = match Expedition::new(map, store).await {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Failed to open the saved session: {e}");
            std::process::exit(1);
        }
    };

    let notes = load_notes(&options.notes_path).await;

    let audio = if options.no_audio {
        AmbientAudio::disabled()
    } else {
        AmbientAudio::new(Some(PathBuf::from(options.music_path)))
    };

    let (request_tx, request_rx) = mpsc::channel(32);
    let (response_tx, response_rx) = mpsc::channel(32);
    tokio::spawn(run_worker(expedition, request_rx, response_tx));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(request_tx, response_rx, notes, audio);
    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Apply any pending worker updates
        while let Ok(response) = app.response_rx.try_recv() {
            app.handle_response(response);
        }

        // Poll for events; the timeout keeps worker updates flowing
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Options shared by the TUI and headless modes.
struct Options {
    name: Option<String>,
    data_dir: String,
    notes_path: String,
    music_path: String,
    no_audio: bool,
    fast: bool,
}

/// Parse command line arguments, with environment overrides for paths.
fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        name: None,
        data_dir: std::env::var("TROVE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
        notes_path: std::env::var("TROVE_NOTES")
            .unwrap_or_else(|_| DEFAULT_NOTES_PATH.to_string()),
        music_path: std::env::var("TROVE_MUSIC")
            .unwrap_or_else(|_| DEFAULT_MUSIC_PATH.to_string()),
        no_audio: false,
        fast: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--name" => {
                if let Some(name) = args.get(i + 1) {
                    options.name = Some(name.clone());
                    i += 1;
                }
            }
            "--data-dir" => {
                if let Some(dir) = args.get(i + 1) {
                    options.data_dir = dir.clone();
                    i += 1;
                }
            }
            "--notes" => {
                if let Some(path) = args.get(i + 1) {
                    options.notes_path = path.clone();
                    i += 1;
                }
            }
            "--music" => {
                if let Some(path) = args.get(i + 1) {
                    options.music_path = path.clone();
                    i += 1;
                }
            }
            "--no-audio" => options.no_audio = true,
            "--fast" => options.fast = true,
            _ => {}
        }
        i += 1;
    }

    options
}

/// Write tracing output to a file under the data directory so it never
/// corrupts the TUI.
fn init_logging(data_dir: &str) {
    use tracing_subscriber::EnvFilter;

    let dir = PathBuf::from(data_dir);
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("trove.log")) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

fn print_help() {
    println!("Trove - a terminal treasure hunt");
    println!();
    println!("USAGE:");
    println!("  trove [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help         Show this help message");
    println!("  --headless         Run the line-oriented mode (no TUI)");
    println!("  --name <NAME>      Player name (headless: skips the prompt)");
    println!("  --data-dir <DIR>   Where progress is saved (default: {DEFAULT_DATA_DIR})");
    println!("  --notes <PATH>     Location-notes asset (default: {DEFAULT_NOTES_PATH})");
    println!("  --music <PATH>     Ambient track (default: {DEFAULT_MUSIC_PATH})");
    println!("  --no-audio         Disable ambient music");
    println!("  --fast             Skip the simulated step delays");
    println!();
    println!("ENVIRONMENT:");
    println!("  TROVE_DATA_DIR, TROVE_NOTES, TROVE_MUSIC override the defaults.");
    println!();
    println!("KEYS (TUI):");
    println!("  Enter  submit name / start the expedition");
    println!("  s      start the expedition");
    println!("  c      clear saved progress");
    println!("  j/k    scroll the log, G to follow the latest entry");
    println!("  q      quit");
}
