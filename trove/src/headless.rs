//! Headless mode for the treasure hunt.
//!
//! A line-oriented interface for terminals without a TUI, automated
//! testing, and scripted runs. Commands start with `#`; everything else is
//! ignored.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use trove_core::{
    load_notes, Expedition, ScriptedMap, StateStore, CONSOLATION_MESSAGE, NOTES_UNAVAILABLE,
    PLAN_LEN, VICTORY_MESSAGE,
};

/// Options for a headless session.
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Player name; prompted for when absent.
    pub name: Option<String>,
    /// Data directory for the persisted session.
    pub data_dir: String,
    /// Path of the location-notes asset.
    pub notes_path: String,
    /// Skip the simulated step latency.
    pub fast: bool,
}

/// Run the game in headless mode.
pub async fn run_headless(options: HeadlessOptions) -> Result<(), Box<dyn std::error::Error>> {
    let delay = if options.fast {
        Duration::ZERO
    } else {
        trove_core::STEP_DELAY
    };
    let map = ScriptedMap::new().with_delay(delay);
    let store = StateStore::new(&options.data_dir);
    let mut expedition = Expedition::new(map, store).await?;

    println!("=== Trove Headless Mode ===");
    match load_notes(&options.notes_path).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(_) => println!("{NOTES_UNAVAILABLE}"),
    }
    println!();

    if !expedition.history().is_empty() {
        println!("[RESTORED] {} saved entries:", expedition.history().len());
        for (i, entry) in expedition.history().iter().enumerate() {
            println!("  Step {}: {entry}", i + 1);
        }
        println!();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    // Login loop: the name comes from the options or from the first
    // non-command lines, and blank names are rejected without state change.
    let mut pending_name = options.name;
    loop {
        let candidate = match pending_name.take() {
            Some(name) => name,
            None => {
                print!("Enter your name: ");
                stdout.flush().ok();
                match lines.next() {
                    Some(line) => line?,
                    None => return Ok(()),
                }
            }
        };

        match expedition.login(&candidate).await {
            Ok(welcome) => {
                println!("{welcome}");
                break;
            }
            Err(e) => println!("[ERROR] {e}"),
        }
    }

    println!();
    println!("Commands:");
    println!("  #start    - Run the expedition");
    println!("  #clear    - Wipe saved progress");
    println!("  #history  - Show persisted history");
    println!("  #help     - Show this help");
    println!("  #quit     - Exit");
    println!();

    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(command) = line.strip_prefix('#') else {
            println!("[ERROR] Unknown input. Type #help for commands.");
            continue;
        };

        match command.split_whitespace().next() {
            Some("quit") | Some("exit") => {
                println!("Goodbye!");
                break;
            }
            Some("start") => run_expedition(&mut expedition, &mut stdout).await,
            Some("clear") => match expedition.clear().await {
                Ok(()) => println!("[CLEARED] Progress wiped."),
                Err(e) => println!("[ERROR] {e}"),
            },
            Some("history") => {
                if expedition.history().is_empty() {
                    println!("[HISTORY] empty");
                } else {
                    println!("[HISTORY]");
                    for (i, entry) in expedition.history().iter().enumerate() {
                        println!("  Step {}: {entry}", i + 1);
                    }
                }
            }
            Some("help") => {
                println!("[HELP]");
                println!("  #start    - Run the expedition");
                println!("  #clear    - Wipe saved progress");
                println!("  #history  - Show persisted history");
                println!("  #quit     - Exit");
            }
            _ => println!("[ERROR] Unknown command. Type #help for help."),
        }
        stdout.flush().ok();
    }

    Ok(())
}

async fn run_expedition(expedition: &mut Expedition<ScriptedMap>, stdout: &mut io::Stdout) {
    if let Err(e) = expedition.begin() {
        println!("[ERROR] {e}");
        return;
    }

    loop {
        match expedition.advance().await {
            Ok(Some(outcome)) => {
                println!(
                    "[STEP {}/{PLAN_LEN}] {}",
                    outcome.index + 1,
                    outcome.message
                );
                let at = outcome.waypoint;
                match outcome.landmark {
                    Some(landmark) => {
                        println!("[MAP] hunter at ({}, {}), {landmark}", at.x, at.y)
                    }
                    None => println!("[MAP] hunter at ({}, {})", at.x, at.y),
                }
                stdout.flush().ok();
            }
            Ok(None) => {
                println!("[DONE] {VICTORY_MESSAGE}");
                break;
            }
            Err(e) => {
                println!("[ERROR] {e}");
                println!("{CONSOLATION_MESSAGE}");
                break;
            }
        }
    }
}
