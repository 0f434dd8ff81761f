//! Error types shared by the pricing library and the CLI.
//!
//! The `PricingError` enum unifies the failure cases of fixed-point arithmetic,
//! price-model validation, collateral configuration and manifest file handling,
//! allowing every crate in the workspace to propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the library and the CLI.
#[derive(Error, Debug)]
pub enum PricingError {
    /// Price model bounds are inconsistent (`low > curr`, `curr > high` or `low > high`).
    #[error("Invalid price model: {0}")]
    InvalidModel(String),

    /// A fixed-point operation produced a value that does not fit the representation.
    #[error("Fixed-point overflow: {0}")]
    Overflow(String),

    /// A fixed-point subtraction would go below zero.
    #[error("Fixed-point underflow: {0}")]
    Underflow(String),

    /// Fixed-point division with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// Malformed decimal string for a fixed-point value.
    #[error("Parse fixed-point error: {0}")]
    ParseFix(String),

    /// Collateral configuration rejected by validation.
    #[error("Invalid collateral config: {0}")]
    InvalidConfig(String),

    /// Deployment manifest address is not a `0x`-prefixed 20-byte hex string.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// I/O error originating from the standard library (manifest and state files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
