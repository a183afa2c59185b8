//! The inspector: ratatui TUI presentation layer.
//!
//! Renders captured messages as a terminal dashboard: a device tree on
//! the left, the selected message on the right.
//!
//! ## Architecture (TEA)
//!
//! Model (`InspectorApp`) + Update (message handler) + View (render).
//! Immediate mode, no retained widget state beyond tree selection and
//! the plot registry. Views read the store; changes go through dispatch.

pub mod app;
pub mod dashboard;
pub mod event;
pub mod input;
pub mod layout;
pub mod message_tree;
pub mod runner;
pub mod view;
