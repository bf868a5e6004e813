//! # Event record carried from producers to listeners.
//!
//! A [`Record`] bundles the data one emitted event hands to every eligible
//! listener: the event name, an arbitrary payload, an optional message and
//! an optional carried error.
//!
//! ## Name stamping
//! The `event` field is private and set by the [`Emitter`](crate::Emitter)
//! at emit time. A producer builds a record without knowing the name it
//! will be emitted under; the emitter stamps the name on its own copy, so
//! listeners always observe the name of the emit call even when a producer
//! reuses one record across several events.
//!
//! ## Serialization
//! Records render to JSON for logging and debugging. The shape is fixed:
//! exactly four keys, always present, with empty strings standing in for
//! unset optional fields. A carried error contributes its display text,
//! never its internal structure.
//!
//! ```text
//! {"event":"user:created","payload":"u-42","message":"","error":""}
//! ```
//!
//! [`Display`](std::fmt::Display) produces the same JSON, so a record can
//! be dropped straight into a log line.
//!
//! ## Example
//! ```rust
//! use eventvisor::Record;
//!
//! let record = Record::new()
//!     .with_payload("u-42")
//!     .with_message("signup flow");
//!
//! assert_eq!(record.event(), "");       // stamped by the emitter later
//! assert_eq!(record.message(), Some("signup flow"));
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

/// Data carried by one emitted event.
///
/// Immutable once handed to a listener: the emitter stamps the event name
/// on a private copy at emit time and shares it read-only across every
/// matching delivery queue.
///
/// ### Fields
/// - **event**: name stamped by the emitter (empty until emitted).
/// - **payload**: opaque caller-defined value; `None` ("not set") is
///   distinct from a present-but-empty value.
/// - **message**: optional human-readable annotation.
/// - **error**: optional carried application error. The emitter never
///   inspects it; it is data for listeners, not a control-flow signal.
#[derive(Clone, Debug, Default)]
pub struct Record {
    event: String,
    payload: Option<Value>,
    message: Option<String>,
    error: Option<Arc<dyn Error + Send + Sync>>,
}

impl Record {
    /// Creates an empty record. Use the `with_*` builders to fill it in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a payload value.
    #[inline]
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Attaches a human-readable message.
    #[inline]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches a carried application error.
    ///
    /// Only the error's display text is ever serialized.
    #[inline]
    pub fn with_error<E>(mut self, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(error));
        self
    }

    /// Returns the event name this record was emitted under.
    ///
    /// Empty until the record has passed through [`Emitter::emit`](crate::Emitter::emit).
    #[inline]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the payload, if one was set.
    #[inline]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Returns the message, if one was set.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the carried error, if one was set.
    #[inline]
    pub fn error(&self) -> Option<&(dyn Error + Send + Sync)> {
        self.error.as_deref()
    }

    /// Returns this record with the event name stamped on it.
    ///
    /// Called by the emitter on its private copy at emit time.
    #[inline]
    pub(crate) fn stamped(mut self, event: &str) -> Self {
        self.event = event.to_string();
        self
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Record", 4)?;
        state.serialize_field("event", &self.event)?;
        match &self.payload {
            Some(payload) => state.serialize_field("payload", payload)?,
            None => state.serialize_field("payload", "")?,
        }
        state.serialize_field("message", self.message.as_deref().unwrap_or(""))?;
        match &self.error {
            Some(error) => state.serialize_field("error", &error.to_string())?,
            None => state.serialize_field("error", "")?,
        }
        state.end()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("{}"),
        }
    }
}
