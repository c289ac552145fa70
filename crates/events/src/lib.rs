//! Domain events.
//!
//! Events emitted from business operations; immutable facts about what
//! happened to an aggregate.

pub mod event;

pub use event::Event;
