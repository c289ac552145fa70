//! Domain error model.

use thiserror::Error;

use crate::money::Cents;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, refused transactions). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A purchase was refused because accumulated credit does not cover the price.
    #[error("insufficient funds: price is {price}, credit is {balance}")]
    InsufficientFunds { price: Cents, balance: Cents },

    /// A purchase was refused because the selected product has no stock.
    #[error("out of stock: {0}")]
    OutOfStock(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn insufficient_funds(price: Cents, balance: Cents) -> Self {
        Self::InsufficientFunds { price, balance }
    }

    pub fn out_of_stock(product: impl Into<String>) -> Self {
        Self::OutOfStock(product.into())
    }
}
