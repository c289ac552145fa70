//! `vendo-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod money;

pub use aggregate::{Aggregate, AggregateRoot, replay};
pub use error::{DomainError, DomainResult};
pub use id::MachineId;
pub use money::Cents;
