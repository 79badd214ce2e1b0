//! unitbasis: exact re-expression of physical dimensions
//!
//! Picks seven anchor quantities (say, charge instead of current), inverts
//! the matrix of their SI exponent vectors in exact rational arithmetic, and
//! rewrites any quantity's dimensions in terms of those anchors.
//!
//! # Architecture
//!
//! ```text
//! Fraction → Matrix (det, adjugate, inverse) → BasisMatrix → unit string
//! ```
//!
//! - [`units`]: the arithmetic core, the quantity catalog and the engine
//! - [`config`]: anchor selection and custom quantities from TOML/JSON files

pub mod config;
pub mod units;

pub use units::{BasisMatrix, Fraction, Matrix, Quantity, UnitError};
