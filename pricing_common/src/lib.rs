//!
//! Price models and collateral valuation shared by the pricing CLI.
//!
//! This crate aggregates:
//! - `error` — unified error type `PricingError` used across the workspace.
//! - `result` — handy `Result<T, PricingError>` alias.
//! - `fixed` — 18-decimal fixed-point arithmetic.
//! - `price_model` — declarative price models and their evaluation.
//! - `quote` — composite quote of four models.
//! - `engine` — owner of the four models with quote/update/advance.
//! - `collateral` — collateral mock with its static configuration.
//! - `manifest` — JSON deployment manifest.
#![warn(missing_docs)]
pub mod collateral;
pub mod engine;
pub mod error;
pub mod fixed;
pub mod manifest;
pub mod price_model;
pub mod quote;
pub mod result;

pub use collateral::{CollateralConfig, CollateralMock};
pub use engine::PriceModelEngine;
pub use error::PricingError;
pub use fixed::{Fix, RoundingMode};
pub use manifest::DeploymentManifest;
pub use price_model::{PriceModel, PriceModelKind};
pub use quote::CompositeQuote;
pub use result::Result;
