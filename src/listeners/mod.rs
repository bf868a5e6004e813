//! # Event listeners.
//!
//! This module provides the listener-side types:
//! - [`Listen`] — trait for implementing async record handlers
//! - [`ListenFn`] — function-backed listener implementation
//! - [`ListenerRef`] — shared handle to a listener (`Arc<dyn Listen>`)
//! - [`LogWriter`] — built-in stdout printer (feature `logging`)
//!
//! ## Architecture
//! ```text
//! Emitter ──► [bounded queue] ──► worker task ──► listener.on_record()
//!                                       └─► panic caught, reported, worker continues
//! ```
//!
//! ## Rules
//! - A slow listener only affects its own queue; once the queue is full,
//!   producers block on emit (backpressure, not loss).
//! - Records are processed sequentially (FIFO) per listener.
//! - Listeners do not block producers beyond queue acceptance, nor each other.

mod listen;
mod listen_fn;

pub use listen::{Listen, ListenerRef};
pub use listen_fn::ListenFn;

// Optional: a simple built-in stdout listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
