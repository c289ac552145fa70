//! Aggregate traits for event-sourced domain models.

/// Aggregate root marker + minimal interface.
///
/// Deliberately small: how state transitions are modeled (decision functions,
/// event application) stays with the domain type, and nothing here drags in
/// infrastructure.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Event-sourced implementations count applied events: version `n` means
    /// `n` events folded in since construction.
    fn version(&self) -> u64;
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` returns events.
/// - **State mutation**: `apply(&mut self, event)` evolves state.
///
/// No IO, no side effects, no clock reads. An aggregate only ever returns
/// events describing what happened.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    ///
    /// Must be deterministic, and should keep `version()` tracking consistent
    /// (+1 per applied event).
    fn apply(&mut self, event: &Self::Event);

    /// Decide which events to emit given the current state and a command.
    ///
    /// This must not mutate state. State evolution is done through `apply`.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;
}

/// Rehydrate an aggregate by folding a recorded event history, in order, into
/// a freshly constructed seed.
pub fn replay<A: Aggregate>(seed: A, history: &[A::Event]) -> A {
    let mut aggregate = seed;
    for event in history {
        aggregate.apply(event);
    }
    aggregate
}
