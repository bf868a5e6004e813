//! # Function-backed listener (`ListenFn`)
//!
//! [`ListenFn`] wraps a closure `F: Fn(Record) -> Fut`, producing a fresh
//! future per delivered record. The closure receives its own clone of the
//! record, so no shared mutable state is implied; if shared state is
//! needed, capture an `Arc<...>` explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use eventvisor::{ListenFn, ListenerRef, Record};
//!
//! let l: ListenerRef = ListenFn::arc("welcome-mail", |record: Record| async move {
//!     // send the mail...
//!     let _ = record;
//! });
//!
//! assert_eq!(l.name(), "welcome-mail");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::listeners::listen::Listen;
use crate::record::Record;

/// Function-backed listener implementation.
///
/// Wraps a closure that *creates* a new future per record.
#[derive(Debug)]
pub struct ListenFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenFn<F> {
    /// Creates a new function-backed listener.
    ///
    /// Prefer [`ListenFn::arc`] when you immediately need a
    /// [`ListenerRef`](crate::ListenerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Listen for ListenFn<F>
where
    F: Fn(Record) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn on_record(&self, record: &Record) {
        (self.f)(record.clone()).await;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
