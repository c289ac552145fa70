//! Coin denominations and acceptance rules.
//!
//! This crate contains the fixed currency model, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod coin;

pub use coin::Coin;
