//! Message views: device header and message detail.
//!
//! Pure presentation over a [`Message`](crate::model::Message). The only
//! side effects are dispatches from the display selector and drawings
//! registered by the payload renderer.

pub mod header;
pub mod message;
pub mod metadata;
pub mod payload;
pub mod selection;

pub use header::render_header;
pub use message::render_message;
