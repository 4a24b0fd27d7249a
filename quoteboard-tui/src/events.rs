//! Event types for the TUI event loop.

use crate::sync::SyncTicket;
use crate::transfer::TransferError;
use crossterm::event::KeyEvent;
use quoteboard_core::{Quote, SyncError};
use std::path::PathBuf;

#[derive(Debug)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    /// A remote fetch finished. The ticket keeps the sync slot taken until
    /// the result has been merged.
    SyncFetched {
        result: Result<Vec<Quote>, SyncError>,
        ticket: SyncTicket,
    },
    PushFinished {
        count: usize,
        result: Result<serde_json::Value, SyncError>,
    },
    ImportLoaded {
        path: PathBuf,
        result: Result<String, TransferError>,
    },
}
