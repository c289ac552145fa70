//! Product catalog.
//!
//! This crate contains the fixed catalog and its price table, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::Product;
