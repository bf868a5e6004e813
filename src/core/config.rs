//! # Emitter configuration.
//!
//! Provides [`Config`] — construction-time settings for an
//! [`Emitter`](crate::Emitter).
//!
//! ## Sentinel values
//! - `capacity = 0` → invalid input; clamped to 1 rather than rejected.

/// Configuration for an emitter instance.
///
/// ## Field semantics
/// - `capacity`: delivery-queue depth applied to every scoped listener
///   registered on this emitter (min 1; clamped). Global listeners always
///   use a queue depth of 1, the closest equivalent of a synchronous
///   handoff.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Queue depth for each scoped listener's delivery queue.
    ///
    /// Set once at construction. A full queue blocks producers on emit
    /// until the listener's worker drains it — this is the system's only
    /// backpressure mechanism.
    pub capacity: usize,
}

impl Config {
    /// Returns the capacity clamped to a minimum of 1.
    ///
    /// The emitter uses this value to avoid constructing an invalid channel.
    #[inline]
    pub fn capacity_clamped(&self) -> usize {
        self.capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration: `capacity = 1`.
    fn default() -> Self {
        Self { capacity: 1 }
    }
}
