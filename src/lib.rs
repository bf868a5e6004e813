//! # eventvisor
//!
//! **Eventvisor** is a lightweight in-process event emitter for Rust.
//!
//! Producers emit named events carrying a payload, a message and an
//! optional error; independent listeners — registered per event name or
//! globally — each receive a private, ordered copy through their own
//! bounded delivery queue. The crate decouples producers from consumers
//! inside one running process: no persistence, no transport, no broker.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//!  │  producer A  │      │  producer B  │      │  producer C  │
//!  └──────┬───────┘      └──────┬───────┘      └──────┬───────┘
//!         │ emit(name, record)  │                     │
//!         ▼                     ▼                     ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │  Emitter (registration tables, one coarse RwLock)             │
//! │  - scoped:  name → [queue, queue, ...]  (insertion order)     │
//! │  - global:  [queue, queue, ...]                               │
//! │  - stamps the event name on a private copy of the record      │
//! └──────┬──────────────────┬──────────────────┬──────────────────┘
//!        ▼                  ▼                  ▼
//!   [queue S1]         [queue S2]         [queue G1]
//!   (bounded)          (bounded)          (handoff)
//!        ▼                  ▼                  ▼
//!    worker S1          worker S2          worker G1
//!        ▼                  ▼                  ▼
//!   listener.on_record()  ...                ...
//! ```
//!
//! ### Delivery semantics
//! ```text
//! emit(name, record)
//!   ├─► observed closed? ──► silent no-op
//!   ├─► stamp name on private copy, share as Arc
//!   ├─► branch 1: push into every global queue        ┐ concurrent,
//!   ├─► branch 2: push into every queue for `name`    ┘ joined
//!   └─► return once every matching queue accepted the record
//!         (acceptance guarantee — callbacks run later in the workers;
//!          a full queue blocks here until its worker drains it)
//! ```
//!
//! ## Features
//! | Area             | Description                                                   | Key types / traits            |
//! |------------------|---------------------------------------------------------------|-------------------------------|
//! | **Emitting**     | Named events with payload/message/error, per-listener fan-out.| [`Emitter`], [`Record`]       |
//! | **Listeners**    | Scoped (one event name) or global (every event), FIFO each.   | [`Listen`], [`ListenFn`]      |
//! | **Backpressure** | Bounded queues; a full queue blocks the producer, never drops.| [`Config`]                    |
//! | **Shutdown**     | One-way close: queues drain, workers exit, tables released.   | [`Emitter::close`]            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use eventvisor::{Config, Emitter, ListenFn, Record};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let emitter = Arc::new(Emitter::new(Config { capacity: 8 }));
//!
//!     // Scoped listener: only "user:created" records.
//!     emitter
//!         .on("user:created", ListenFn::arc("welcome-mail", |record: Record| async move {
//!             println!("sending welcome mail: {record}");
//!         }))
//!         .await;
//!
//!     // Global listener: every record, regardless of name.
//!     emitter
//!         .on_all(ListenFn::arc("audit", |record: Record| async move {
//!             println!("audit: {record}");
//!         }))
//!         .await;
//!
//!     emitter.emit("user:created", Record::new().with_payload("u-42")).await;
//!
//!     // Close drains what was accepted, then joins every worker.
//!     emitter.close().await;
//! }
//! ```
//!
//! There is deliberately no process-wide default instance: construct an
//! [`Emitter`] where your application wires its dependencies and pass it
//! down (an `Arc<Emitter>` is cheap to clone). If a singleton is genuinely
//! wanted, build it at the application's outermost layer.

mod core;
mod listeners;
mod record;

// ---- Public re-exports ----

pub use crate::core::{Config, Emitter};
pub use crate::listeners::{Listen, ListenFn, ListenerRef};
pub use crate::record::Record;

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use crate::listeners::LogWriter;
