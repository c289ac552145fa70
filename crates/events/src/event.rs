use chrono::{DateTime, Utc};

/// A domain event: an immutable fact about something that happened to an
/// aggregate.
///
/// Events carry a stable name and a schema version so an append-only log of
/// them stays readable as the types evolve.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "vending.machine.coin_accepted").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
