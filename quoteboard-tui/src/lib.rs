//! Quoteboard TUI library exports.

pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod notifications;
pub mod runtime;
pub mod state;
pub mod sync;
pub mod telemetry;
pub mod theme;
pub mod traits;
pub mod transfer;
pub mod views;
pub mod widgets;
