//! Quoteboard TUI entry point.

use quoteboard_core::RemoteQuotes;
use quoteboard_storage::{FileStore, KeyValueStore, MemoryStore};
use quoteboard_tui::config::TuiConfig;
use quoteboard_tui::error::TuiError;
use quoteboard_tui::events::TuiEvent;
use quoteboard_tui::runtime::Runtime;
use quoteboard_tui::state::App;
use quoteboard_tui::sync::HttpRemote;
use quoteboard_tui::telemetry;
use quoteboard_tui::views::{render_view, FrameTarget};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    telemetry::init_logging(&config.log_path)?;

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    let mut runtime = bootstrap(config, event_tx.clone())?;

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};
    spawn_input_reader(event_tx.clone());

    let period = Duration::from_millis(runtime.app.config.sync_interval_ms);
    let mut sync_timer = interval_at(Instant::now() + period, period);
    sync_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal.draw(|f| {
            let mut target = FrameTarget::new(f, &runtime.app.theme);
            render_view(&mut target, &runtime.app);
        })?;

        tokio::select! {
            _ = sync_timer.tick() => {
                runtime.request_sync();
            }
            Some(event) = event_rx.recv() => {
                if runtime.handle_event(event) {
                    break;
                }
            }
        }
    }

    tracing::info!(quotes = runtime.app.library.len(), "Shutting down");
    Ok(())
}

/// Open both stores, load the collection and build the runtime.
fn bootstrap(config: TuiConfig, sender: mpsc::Sender<TuiEvent>) -> Result<Runtime, TuiError> {
    let durable: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.store_path)?);
    let session: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let remote: Arc<dyn RemoteQuotes> = Arc::new(HttpRemote::new(&config)?);

    tracing::info!(
        store_path = %config.store_path.display(),
        remote_url = %config.remote_url,
        sync_interval_ms = config.sync_interval_ms,
        "Starting quoteboard"
    );

    let app = App::new(config, durable, session);
    Ok(Runtime::new(app, remote, sender))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) => sender.blocking_send(TuiEvent::Input(key)),
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}
