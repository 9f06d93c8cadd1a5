use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bizdash::app::{console, ConsoleCommand, DocumentTheme, Session};
use bizdash::kernel::services::adapters::{
    ensure_settings_file, ensure_state_dir, load_settings_from, FileStorage,
};
use bizdash::kernel::services::ports::Settings;
use bizdash::kernel::SystemClock;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

mod logging;

#[derive(Debug)]
enum AppEvent {
    Input(String),
    InputClosed,
    Tick,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let logging = logging::init();
    if logging.is_none() {
        eprintln!("warning: logging disabled");
    }

    let settings = match ensure_settings_file() {
        Ok(path) => {
            tracing::info!(path = %path.display(), "loading settings");
            load_settings_from(&path)
        }
        Err(e) => {
            tracing::warn!(error = %e, "no settings file, using defaults");
            Settings::default()
        }
    };

    let storage = FileStorage::new(resolve_storage_dir(&settings));
    tracing::info!(dir = %storage.dir().display(), "state storage");

    let document = DocumentTheme::new();
    let mut session = Session::open(
        settings.clone(),
        storage,
        Arc::new(SystemClock),
        document.clone(),
    );

    let terminate = Arc::new(AtomicBool::new(false));
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        if let Err(e) = signal_hook::flag::register(signal, Arc::clone(&terminate)) {
            tracing::warn!(signal, error = %e, "failed to register signal handler");
        }
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let input_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if input_tx.send(AppEvent::Input(line)).is_err() {
                        break;
                    }
                }
                Ok(None) | Err(_) => {
                    let _ = input_tx.send(AppEvent::InputClosed);
                    break;
                }
            }
        }
    });

    let tick_tx = event_tx;
    let tick_interval = settings.tick_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_interval);
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    println!("bizdash console ({} theme). Type `help` for commands.", session.state().theme.label());
    if let Some(guard) = &logging {
        println!("logs: {}", guard.log_dir().display());
    }
    println!("{}", console::render_state(&session));

    while let Some(event) = event_rx.recv().await {
        match event {
            AppEvent::Input(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match ConsoleCommand::parse(&line) {
                    Ok(command) => {
                        let outcome = console::execute(&mut session, command);
                        println!("{}", outcome.output);
                        if outcome.quit {
                            break;
                        }
                    }
                    Err(e) => println!("error: {e}"),
                }
            }
            AppEvent::InputClosed => break,
            AppEvent::Tick => {
                let before = session.state().notifications.len();
                if session.tick() {
                    let expired = before.saturating_sub(session.state().notifications.len());
                    if expired > 0 {
                        println!("{expired} notification(s) expired");
                    }
                }
                if terminate.load(Ordering::Relaxed) {
                    tracing::info!("termination signal received");
                    break;
                }
            }
        }
    }

    session.shutdown();
    tracing::info!(dark = document.is_dark(), "console exited");

    // The stdin task can stay parked in a blocking read, which would keep the
    // runtime from shutting down. Flush logs and leave explicitly.
    drop(logging);
    std::process::exit(0);
}

fn resolve_storage_dir(settings: &Settings) -> PathBuf {
    if let Some(dir) = settings.storage_dir.clone() {
        return dir;
    }
    ensure_state_dir().unwrap_or_else(|e| {
        let dir = std::env::temp_dir().join("bizdash").join("state");
        tracing::warn!(error = %e, fallback = %dir.display(), "no data directory");
        dir
    })
}
