//! # In-process event emitter with per-listener delivery queues.
//!
//! [`Emitter`] distributes each emitted [`Record`] to every matching
//! listener — the ones registered on that event name plus every global
//! listener — through a dedicated bounded queue per listener.
//!
//! ## Architecture
//! ```text
//! emit("user:created", record)
//!     │  stamp name, wrap in Arc
//!     │
//!     ├──► global branch ──► [queue G1] ──► worker G1 ──► listener.on_record()
//!     │                 └──► [queue G2] ──► worker G2 ──► listener.on_record()
//!     │
//!     └──► scoped branch ──► [queue S1] ──► worker S1 ──► listener.on_record()
//!          ("user:created")  (bounded, capacity from Config)
//! ```
//!
//! ## Rules
//! - **Delivery-acceptance guarantee**: `emit` returns once every matching
//!   queue has accepted the record, not once callbacks have run.
//! - **Backpressure**: a full queue suspends the fan-out branch (and the
//!   producer) until the listener's worker drains it. Nothing is dropped.
//! - **Per-listener FIFO**: each listener sees records in emit order.
//!   No ordering across listeners or across event names.
//! - **Isolation**: each listener owns a queue and a worker; a slow or
//!   panicking listener never affects its siblings.
//! - **One-way close**: after [`Emitter::close`], registration and emission
//!   are silent no-ops. Workers drain whatever was already accepted, invoke
//!   the listener for each record, then exit.
//! - **Emit/close race**: the fan-out holds the shared table guard while
//!   pushing, so a concurrent `close` waits until in-flight deliveries have
//!   been accepted — an emit that observed the emitter open always lands in
//!   the queues it selected.

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;

use crate::core::config::Config;
use crate::listeners::ListenerRef;
use crate::record::Record;

/// Registration tables, guarded by one coarse lock.
///
/// Table mutation (register/close) is rare relative to emit traffic, so a
/// single reader/writer lock over the whole set is sufficient.
struct Tables {
    /// Scoped delivery queues, keyed by event name (insertion order per name).
    scoped: HashMap<String, Vec<mpsc::Sender<Arc<Record>>>>,
    /// Global delivery queues, one per listener registered for every event.
    global: Vec<mpsc::Sender<Arc<Record>>>,
    /// Worker handles, joined on close so no worker outlives the emitter.
    workers: Vec<JoinHandle<()>>,
    /// One-way flag; checked under the same lock that guards the tables.
    closed: bool,
}

/// Drives one listener from its delivery queue until the queue is closed.
///
/// Panics inside the listener are caught and reported; the worker then
/// continues with the next record.
fn spawn_worker(listener: ListenerRef, mut rx: mpsc::Receiver<Arc<Record>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            let fut = listener.on_record(record.as_ref());
            if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                eprintln!(
                    "[eventvisor] listener '{}' panicked: {:?}",
                    listener.name(),
                    panic_err
                );
            }
        }
    })
}

/// In-process publish/subscribe engine.
///
/// Producers call [`emit`](Emitter::emit) with an event name and a
/// [`Record`]; listeners registered via [`on`](Emitter::on) (scoped to one
/// event name) or [`on_all`](Emitter::on_all) (every event) each receive a
/// private, ordered copy through their own bounded queue and worker task.
///
/// Registration and emission never fail visibly: after
/// [`close`](Emitter::close) both become silent no-ops, and a slow listener
/// back-pressures producers instead of raising an error.
///
/// ### Example
/// ```rust
/// use eventvisor::{Config, Emitter, ListenFn, Record};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let emitter = Emitter::new(Config { capacity: 8 });
///
/// emitter
///     .on("user:created", ListenFn::arc("welcome-mail", |record: Record| async move {
///         println!("sending welcome mail: {record}");
///     }))
///     .await;
///
/// emitter.emit("user:created", Record::new().with_payload("u-42")).await;
/// emitter.close().await;
/// # }
/// ```
pub struct Emitter {
    /// Queue depth for scoped listeners, fixed at construction.
    capacity: usize,
    tables: RwLock<Tables>,
}

impl Emitter {
    /// Creates an emitter with empty registration tables.
    ///
    /// The configured capacity applies to every scoped listener registered
    /// later; zero is clamped to 1.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            capacity: config.capacity_clamped(),
            tables: RwLock::new(Tables {
                scoped: HashMap::new(),
                global: Vec::new(),
                workers: Vec::new(),
                closed: false,
            }),
        }
    }

    /// Attaches a listener to a particular event name.
    ///
    /// Creates a bounded delivery queue of the configured capacity, appends
    /// it to the list for `event` (the empty string is an ordinary name),
    /// and starts a dedicated worker that invokes the listener per record
    /// in FIFO order. The worker exits when the queue is closed.
    ///
    /// No-op on a closed emitter. Fire-and-forget: there is no way to
    /// unregister short of closing the emitter.
    pub async fn on(&self, event: &str, listener: ListenerRef) {
        let mut tables = self.tables.write().await;
        if tables.closed {
            return;
        }

        let (tx, rx) = mpsc::channel::<Arc<Record>>(self.capacity);
        tables.scoped.entry(event.to_string()).or_default().push(tx);
        tables.workers.push(spawn_worker(listener, rx));
    }

    /// Attaches a listener to every event, regardless of name.
    ///
    /// Same semantics as [`on`](Emitter::on), but the queue depth is 1 —
    /// the closest equivalent of a synchronous handoff — and the listener
    /// is appended to the global list.
    pub async fn on_all(&self, listener: ListenerRef) {
        let mut tables = self.tables.write().await;
        if tables.closed {
            return;
        }

        let (tx, rx) = mpsc::channel::<Arc<Record>>(1);
        tables.global.push(tx);
        tables.workers.push(spawn_worker(listener, rx));
    }

    /// Emits a record under the given event name.
    ///
    /// Stamps `event` on a private copy of the record and pushes it into
    /// every global queue and every scoped queue registered for `event`,
    /// as two concurrent branches. Returns once every matching queue has
    /// accepted the record; callbacks run later in their workers. A full
    /// queue blocks this call until its worker drains it.
    ///
    /// Emitting to a name with zero listeners is a correct no-op, as is
    /// emitting on a closed emitter.
    pub async fn emit(&self, event: &str, record: Record) {
        let tables = self.tables.read().await;
        if tables.closed {
            return;
        }

        let record = Arc::new(record.stamped(event));

        let global = async {
            for tx in &tables.global {
                let _ = tx.send(Arc::clone(&record)).await;
            }
        };
        let scoped = async {
            if let Some(queues) = tables.scoped.get(event) {
                for tx in queues {
                    let _ = tx.send(Arc::clone(&record)).await;
                }
            }
        };
        tokio::join!(global, scoped);
    }

    /// Returns the distinct event names that currently have at least one
    /// scoped listener, sorted. Global listeners are unnamed and excluded.
    pub async fn list(&self) -> Vec<String> {
        let tables = self.tables.read().await;
        let mut names: Vec<String> = tables.scoped.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Closes the emitter and releases all registration tables.
    ///
    /// Closes every delivery queue (workers drain remaining buffered
    /// records, invoke their listener for each, then exit) and awaits every
    /// worker, so no task outlives this call. Subsequent register/emit
    /// calls are silent no-ops.
    ///
    /// Idempotent: the cleanup body runs at most once; concurrent callers
    /// observe the closed flag under the table lock and return immediately.
    pub async fn close(&self) {
        let workers = {
            let mut tables = self.tables.write().await;
            if tables.closed {
                return;
            }
            tables.closed = true;

            // Dropping the senders closes every delivery queue.
            tables.scoped.clear();
            tables.global.clear();
            std::mem::take(&mut tables.workers)
        };

        for worker in workers {
            let _ = worker.await;
        }
    }
}

impl Default for Emitter {
    /// An emitter with the default scoped-queue capacity of 1.
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::Value;
    use tokio::time::timeout;

    use super::*;
    use crate::listeners::ListenFn;

    /// Listener that forwards every delivered record into a test channel.
    fn recorder(name: &'static str) -> (ListenerRef, mpsc::UnboundedReceiver<Record>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener = ListenFn::arc(name, move |record: Record| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(record);
            }
        });
        (listener, rx)
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<Record>) -> Record {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("timed out waiting for record")
            .expect("delivery queue closed early")
    }

    fn noop() -> ListenerRef {
        ListenFn::arc("noop", |_record: Record| async {})
    }

    #[test]
    fn test_zero_capacity_defaults_to_one() {
        let emitter = Emitter::new(Config { capacity: 0 });
        assert_eq!(emitter.capacity, 1);
    }

    #[tokio::test]
    async fn test_on_all_attaches_global_listeners() {
        let emitter = Emitter::default();
        for _ in 0..4 {
            emitter.on_all(noop()).await;
        }
        assert_eq!(emitter.tables.read().await.global.len(), 4);
    }

    #[tokio::test]
    async fn test_on_attaches_scoped_listeners() {
        let emitter = Emitter::default();
        for _ in 0..10 {
            emitter.on("event", noop()).await;
        }
        let tables = emitter.tables.read().await;
        assert_eq!(tables.scoped.get("event").map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn test_emit_delivers_in_order_to_scoped_and_global() {
        let emitter = Emitter::new(Config { capacity: 8 });
        let (scoped, mut scoped_rx) = recorder("scoped");
        let (global, mut global_rx) = recorder("global");
        emitter.on("event", scoped).await;
        emitter.on_all(global).await;

        for i in 0..5 {
            emitter.emit("event", Record::new().with_payload(i)).await;
        }

        for i in 0..5 {
            for rx in [&mut scoped_rx, &mut global_rx] {
                let record = next(rx).await;
                assert_eq!(record.event(), "event");
                assert_eq!(record.payload(), Some(&Value::from(i)));
            }
        }
    }

    #[tokio::test]
    async fn test_global_listener_sees_every_event_name() {
        let emitter = Emitter::default();
        let (global, mut rx) = recorder("global");
        emitter.on_all(global).await;

        // The empty string is an ordinary, distinct event name.
        for name in ["user:created", "user:updated", ""] {
            emitter.emit(name, Record::new()).await;
        }
        for name in ["user:created", "user:updated", ""] {
            assert_eq!(next(&mut rx).await.event(), name);
        }
    }

    #[tokio::test]
    async fn test_reused_record_is_restamped_per_emit() {
        let emitter = Emitter::default();
        let (global, mut rx) = recorder("global");
        emitter.on_all(global).await;

        let record = Record::new().with_payload("shared");
        emitter.emit("a", record.clone()).await;
        emitter.emit("b", record.clone()).await;

        assert_eq!(next(&mut rx).await.event(), "a");
        assert_eq!(next(&mut rx).await.event(), "b");
        // The caller's copy is never mutated.
        assert_eq!(record.event(), "");
    }

    #[tokio::test]
    async fn test_list_returns_distinct_event_names() {
        let emitter = Emitter::default();
        for event in ["b", "a", "a"] {
            emitter.on(event, noop()).await;
        }
        assert_eq!(emitter.list().await, vec!["a".to_string(), "b".to_string()]);

        // Global listeners are unnamed and never listed.
        emitter.on_all(noop()).await;
        assert_eq!(emitter.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_emit_without_listeners_is_a_noop() {
        let emitter = Emitter::default();
        emitter.emit("nobody:listening", Record::new()).await;
    }

    #[tokio::test]
    async fn test_close_delivers_accepted_records() {
        let emitter = Emitter::new(Config { capacity: 8 });
        let (scoped, mut rx) = recorder("scoped");
        emitter.on("event", scoped).await;

        for i in 0..3 {
            emitter.emit("event", Record::new().with_payload(i)).await;
        }
        emitter.close().await;

        // close() joins the workers, so everything accepted before the
        // close was already handed to the listener.
        for i in 0..3 {
            assert_eq!(next(&mut rx).await.payload(), Some(&Value::from(i)));
        }
    }

    #[tokio::test]
    async fn test_close_is_idempotent_under_concurrent_calls() {
        let emitter = Emitter::default();
        let (scoped, _scoped_rx) = recorder("scoped");
        let (global, _global_rx) = recorder("global");
        emitter.on("event", scoped).await;
        emitter.on_all(global).await;

        tokio::join!(emitter.close(), emitter.close(), emitter.close());
        emitter.close().await;

        let tables = emitter.tables.read().await;
        assert!(tables.closed);
        assert!(tables.scoped.is_empty());
        assert!(tables.global.is_empty());
        assert!(tables.workers.is_empty());
    }

    #[tokio::test]
    async fn test_operations_after_close_are_noops() {
        let emitter = Emitter::default();
        let (listener, mut rx) = recorder("late");
        emitter.close().await;

        emitter.on("event", Arc::clone(&listener)).await;
        emitter.on_all(listener).await;
        emitter.emit("event", Record::new().with_payload("dropped")).await;

        let tables = emitter.tables.read().await;
        assert!(tables.closed);
        assert!(tables.scoped.is_empty());
        assert!(tables.global.is_empty());
        drop(tables);

        assert!(rx.try_recv().is_err(), "no delivery after close");
    }

    #[tokio::test]
    async fn test_full_queue_blocks_producer() {
        let emitter = Emitter::default();
        emitter
            .on(
                "event",
                ListenFn::arc("stalled", |_record: Record| async {
                    std::future::pending::<()>().await
                }),
            )
            .await;

        // First record is taken by the worker, which parks in the callback;
        // the second occupies the single queue slot.
        emitter.emit("event", Record::new()).await;
        emitter.emit("event", Record::new()).await;

        let blocked = timeout(
            Duration::from_millis(100),
            emitter.emit("event", Record::new()),
        )
        .await;
        assert!(blocked.is_err(), "emit into a full queue must block, not drop");
    }

    #[tokio::test]
    async fn test_listener_panic_does_not_affect_siblings() {
        let emitter = Emitter::new(Config { capacity: 4 });
        let (steady, mut rx) = recorder("steady");
        emitter
            .on("event", ListenFn::arc("bomb", |_record: Record| async { panic!("boom") }))
            .await;
        emitter.on("event", steady).await;

        emitter.emit("event", Record::new().with_payload(1)).await;
        emitter.emit("event", Record::new().with_payload(2)).await;

        assert_eq!(next(&mut rx).await.payload(), Some(&Value::from(1)));
        assert_eq!(next(&mut rx).await.payload(), Some(&Value::from(2)));
    }
}
