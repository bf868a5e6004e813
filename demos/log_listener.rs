//! # LogWriter Example
//!
//! Registers the built-in [`LogWriter`] as a global listener so every
//! emitted record gets a stdout line, including one carrying an error.
//!
//! ## Run
//! ```bash
//! cargo run --example log_listener --features logging
//! ```

use std::io;
use std::sync::Arc;

use eventvisor::{Emitter, LogWriter, Record};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let emitter = Emitter::default();

    emitter.on_all(Arc::new(LogWriter::new())).await;

    emitter
        .emit(
            "deploy:started",
            Record::new().with_payload("api").with_message("rolling restart"),
        )
        .await;

    emitter
        .emit(
            "deploy:failed",
            Record::new()
                .with_payload("api")
                .with_error(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused")),
        )
        .await;

    emitter.close().await;
}
