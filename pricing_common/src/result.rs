//! Result type alias shared across the workspace.
//!
//! Functions can simply return `Result<T>` and get `PricingError` as the error type.
use crate::error::PricingError;

/// Workspace-wide `Result` alias with `PricingError` as the default error.
pub type Result<T, E = PricingError> = std::result::Result<T, E>;
