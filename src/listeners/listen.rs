//! # Core listener trait.
//!
//! [`Listen`] is the extension point for plugging event handlers into the
//! emitter. Each registered listener is driven by a dedicated worker task
//! fed from its own delivery queue, owned by the [`Emitter`](crate::Emitter).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching) — a slow listener only
//!   fills its own queue, which back-pressures producers once full.
//! - Records arrive in FIFO order per listener; different listeners race.
//! - Panics are caught by the worker and reported with the listener's
//!   [`name`](Listen::name); the worker then continues with the next record.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use eventvisor::{Listen, Record};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Listen for Audit {
//!     async fn on_record(&self, record: &Record) {
//!         // write audit entry...
//!         let _ = record;
//!     }
//!
//!     fn name(&self) -> &str { "audit" }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::record::Record;

/// Contract for event listeners.
///
/// Called from a listener-dedicated worker task, never in the producer's
/// context. Implementations should avoid blocking the async runtime
/// (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Handles a single record.
    ///
    /// Records are delivered in FIFO order per listener. Panics are caught
    /// by the worker and do not affect other listeners.
    async fn on_record(&self, record: &Record);

    /// Human-readable name used in panic diagnostics.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared handle to a listener (`Arc<dyn Listen>`).
pub type ListenerRef = Arc<dyn Listen>;
