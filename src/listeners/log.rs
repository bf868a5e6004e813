//! # LogWriter — simple record printer.
//!
//! A minimal listener that prints incoming [`Record`]s to stdout.
//! Use it for tests or demos; implement a custom [`Listen`] for
//! structured logging or metrics collection.
//!
//! ## Example output
//! ```text
//! [user:created] {"event":"user:created","payload":"u-42","message":"","error":""}
//! [deploy:failed] {"event":"deploy:failed","payload":"api","message":"","error":"connection refused"}
//! ```

use async_trait::async_trait;

use crate::listeners::Listen;
use crate::record::Record;

/// Stdout logging listener.
///
/// Enabled via the `logging` feature. Typically registered globally
/// ([`Emitter::on_all`](crate::Emitter::on_all)) so every emitted record
/// gets a log line.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listen for LogWriter {
    async fn on_record(&self, record: &Record) {
        println!("[{}] {}", record.event(), record);
    }

    fn name(&self) -> &str {
        "LogWriter"
    }
}
