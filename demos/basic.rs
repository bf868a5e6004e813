//! # Basic Emitter Example
//!
//! Two producer tasks emit `user:created` and `user:updated` records while
//! scoped and global listeners consume them independently.
//!
//! The emitter is constructed here and passed down explicitly — there is
//! no process-wide default instance.
//!
//! ## Run
//! ```bash
//! cargo run --example basic
//! ```

use std::sync::Arc;

use eventvisor::{Config, Emitter, ListenFn, Record};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let emitter = Arc::new(Emitter::new(Config { capacity: 8 }));

    for i in 1..=2 {
        emitter
            .on(
                "user:created",
                ListenFn::arc(format!("created-{i}"), move |record: Record| async move {
                    println!("listener {i}: {record}");
                }),
            )
            .await;
    }

    for i in 1..=3 {
        emitter
            .on(
                "user:updated",
                ListenFn::arc(format!("updated-{i}"), move |record: Record| async move {
                    println!("listener {i}: {record}");
                }),
            )
            .await;
    }

    // Global listeners see every record; this is where an application
    // would forward to an external sink (alerting, audit, ...).
    emitter
        .on_all(ListenFn::arc("audit", |record: Record| async move {
            eprintln!("audit: {record}");
        }))
        .await;

    println!("registered for: {:?}", emitter.list().await);

    let created = {
        let emitter = Arc::clone(&emitter);
        tokio::spawn(async move {
            for i in 0..20 {
                emitter
                    .emit(
                        "user:created",
                        Record::new()
                            .with_payload(format!("payload {i}"))
                            .with_message(format!("message {i}")),
                    )
                    .await;
            }
        })
    };

    let updated = {
        let emitter = Arc::clone(&emitter);
        tokio::spawn(async move {
            for i in 0..10 {
                emitter
                    .emit(
                        "user:updated",
                        Record::new()
                            .with_payload(format!("payload {i}"))
                            .with_message(format!("message {i}")),
                    )
                    .await;
            }
        })
    };

    let _ = tokio::join!(created, updated);

    // Drains everything already accepted, then joins the workers.
    emitter.close().await;
}
