//! Event loop plumbing between `App` and background work.

use crate::events::TuiEvent;
use crate::state::{App, Command};
use crate::sync::{spawn_fetch, spawn_push, SyncScheduler};
use crate::transfer;
use quoteboard_core::RemoteQuotes;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Runtime {
    pub app: App,
    remote: Arc<dyn RemoteQuotes>,
    scheduler: SyncScheduler,
    sender: mpsc::Sender<TuiEvent>,
}

impl Runtime {
    pub fn new(app: App, remote: Arc<dyn RemoteQuotes>, sender: mpsc::Sender<TuiEvent>) -> Self {
        Self {
            app,
            remote,
            scheduler: SyncScheduler::new(),
            sender,
        }
    }

    pub fn scheduler(&self) -> &SyncScheduler {
        &self.scheduler
    }

    /// Apply one event. Returns `true` when the loop should stop.
    pub fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::Input(key) => {
                if let Some(command) = self.app.handle_key(key) {
                    return self.dispatch(command);
                }
            }
            TuiEvent::SyncFetched { result, ticket } => {
                self.app.apply_sync_result(result);
                self.app.sync.in_flight = false;
                drop(ticket);
            }
            TuiEvent::PushFinished { count, result } => {
                self.app.apply_push_result(count, result);
            }
            TuiEvent::ImportLoaded { path, result } => {
                if let Some(command) = self.app.apply_import(path, result) {
                    return self.dispatch(command);
                }
            }
            TuiEvent::Resize { .. } | TuiEvent::Tick => {}
        }
        false
    }

    /// Carry out a command. Returns `true` for quit.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Quit => return true,
            Command::Sync => {
                self.request_sync();
            }
            Command::Push(quotes) => {
                spawn_push(Arc::clone(&self.remote), quotes, self.sender.clone());
            }
            Command::ReadImport(path) => self.spawn_import(path),
        }
        false
    }

    /// Start a sync unless one is already running. Returns whether a fetch
    /// was started.
    pub fn request_sync(&mut self) -> bool {
        match self.scheduler.try_begin() {
            Some(ticket) => {
                self.app.sync.in_flight = true;
                spawn_fetch(Arc::clone(&self.remote), ticket, self.sender.clone());
                true
            }
            None => {
                tracing::debug!("Sync already in flight, skipping");
                false
            }
        }
    }

    fn spawn_import(&self, path: PathBuf) {
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = transfer::read_import(&path).await;
            let _ = sender.send(TuiEvent::ImportLoaded { path, result }).await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::keys::Action;
    use quoteboard_core::{Quote, SyncError};
    use quoteboard_storage::MemoryStore;
    use quoteboard_test_utils::{remote_snapshot, MockRemote};
    use std::time::Duration;
    use tempfile::TempDir;

    fn runtime(remote: MockRemote) -> (Runtime, mpsc::Receiver<TuiEvent>) {
        let (sender, receiver) = mpsc::channel(16);
        let app = App::new(
            test_config("tmp".into()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
        );
        (Runtime::new(app, Arc::new(remote), sender), receiver)
    }

    async fn next_event(receiver: &mut mpsc::Receiver<TuiEvent>) -> TuiEvent {
        tokio::time::timeout(Duration::from_secs(5), receiver.recv())
            .await
            .expect("event in time")
            .expect("channel open")
    }

    #[tokio::test]
    async fn sync_merges_remote_snapshot() {
        let remote = MockRemote::new(remote_snapshot());
        let (mut runtime, mut receiver) = runtime(remote.clone());

        assert!(runtime.request_sync());
        assert!(runtime.app.sync.in_flight);
        let event = next_event(&mut receiver).await;
        runtime.handle_event(event);

        assert!(!runtime.app.sync.in_flight);
        assert!(!runtime.scheduler().is_in_flight());
        assert_eq!(remote.fetch_count(), 1);
        for quote in remote_snapshot() {
            assert!(runtime.app.library.all().contains(&quote));
        }
    }

    #[tokio::test]
    async fn second_sync_is_skipped_while_in_flight() {
        let remote = MockRemote::new(Vec::new()).with_delay(Duration::from_millis(50));
        let (mut runtime, mut receiver) = runtime(remote.clone());

        assert!(runtime.request_sync());
        assert!(!runtime.request_sync());

        let event = next_event(&mut receiver).await;
        assert!(runtime.scheduler().is_in_flight());
        runtime.handle_event(event);
        assert!(!runtime.scheduler().is_in_flight());
        assert_eq!(remote.fetch_count(), 1);

        assert!(runtime.request_sync());
    }

    #[tokio::test]
    async fn failed_fetch_releases_slot() {
        let remote = MockRemote::new(Vec::new());
        remote.fail_fetch(SyncError::Network {
            reason: "offline".into(),
        });
        let (mut runtime, mut receiver) = runtime(remote);

        runtime.dispatch(Command::Sync);
        let event = next_event(&mut receiver).await;
        runtime.handle_event(event);

        assert!(runtime.app.sync.last_error.is_some());
        assert_eq!(runtime.app.library.len(), 3);
        assert!(!runtime.scheduler().is_in_flight());
    }

    #[tokio::test]
    async fn push_sends_single_quote() {
        let remote = MockRemote::new(Vec::new());
        let (mut runtime, mut receiver) = runtime(remote.clone());

        let quote = Quote::new("Fresh", "New");
        runtime.dispatch(Command::Push(vec![quote.clone()]));
        let event = next_event(&mut receiver).await;
        assert!(matches!(event, TuiEvent::PushFinished { count: 1, result: Ok(_) }));
        runtime.handle_event(event);
        assert_eq!(remote.pushed(), vec![quote]);
    }

    #[tokio::test]
    async fn import_file_is_read_merged_and_pushed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("import.json");
        std::fs::write(
            &path,
            r#"[{"text":"One","category":"A"},{"text":"Two","category":"B"}]"#,
        )
        .unwrap();

        let remote = MockRemote::new(Vec::new());
        let (mut runtime, mut receiver) = runtime(remote.clone());
        runtime.dispatch(Command::ReadImport(path));

        let loaded = next_event(&mut receiver).await;
        runtime.handle_event(loaded);
        assert_eq!(runtime.app.library.len(), 5);

        let pushed = next_event(&mut receiver).await;
        runtime.handle_event(pushed);
        assert_eq!(remote.pushed().len(), 2);
    }

    #[tokio::test]
    async fn quit_key_stops_the_loop() {
        let (mut runtime, _receiver) = runtime(MockRemote::default());
        let quit = runtime.app.handle_action(Action::Quit);
        assert_eq!(quit, Some(Command::Quit));
        assert!(runtime.dispatch(Command::Quit));
        assert!(!runtime.handle_event(TuiEvent::Tick));
    }
}
