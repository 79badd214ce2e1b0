//! Exact dimensional basis conversion
//!
//! Re-expresses the dimensional signature of a physical quantity in terms
//! of any seven linearly independent "anchor" quantities, for example
//! electric charge in place of current.
//!
//! # Key Features
//!
//! - **Exact arithmetic**: exponents are [`Fraction`]s, never floats
//! - **Cofactor inversion**: exact determinant, adjugate and inverse
//! - **Coherence detection**: dependent anchors are flagged, not rejected
//! - **Standard catalog**: the SI base quantities plus common derived ones
//!
//! # Example
//!
//! ```
//! use unitbasis::units::prelude::*;
//!
//! let basis = BasisMatrix::from_names(
//!     catalog(),
//!     &["Time", "Length", "Mass", "Electric Charge",
//!       "Temperature", "Luminous Intensity", "Amount of Substance"],
//! )?;
//! let volt = catalog().lookup("Electric Potential")?;
//! assert_eq!(basis.express(volt)?, "s-2 m2 kg1 C-1");
//! # Ok::<(), unitbasis::units::UnitError>(())
//! ```

pub mod basis;
pub mod catalog;
pub mod error;
pub mod fraction;
pub mod matrix;
pub mod quantity;

// Re-exports
pub use basis::BasisMatrix;
pub use catalog::{QuantityCatalog, SI_BASE_NAMES, catalog};
pub use error::UnitError;
pub use fraction::Fraction;
pub use matrix::Matrix;
pub use quantity::{BASE_DIMENSIONS, BaseDimension, ExponentVector, Quantity, QuantityBuilder};

/// Prelude for common imports
pub mod prelude {
    pub use super::basis::BasisMatrix;
    pub use super::catalog::{QuantityCatalog, catalog};
    pub use super::fraction::Fraction;
    pub use super::matrix::Matrix;
    pub use super::quantity::{BaseDimension, Quantity};
}
