//! data-inspector: terminal inspector for captured topology messages.
//!
//! Loads a snapshot of devices and their messages, keeps them in a small
//! store, and renders each message's metadata and payload. Payloads can
//! be shown raw or, for ROOT objects, plotted.

pub mod config;
pub mod error;
pub mod model;
pub mod plot;
pub mod snapshot;
pub mod store;
pub mod tui;
