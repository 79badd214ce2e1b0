//! Errors raised by the exact-arithmetic core
//!
//! Singular matrices are not errors: `Matrix::inverse` reports them as
//! `Ok(None)` and `BasisMatrix` records them as an incoherent basis.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from fraction arithmetic, matrix algebra and basis conversion
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum UnitError {
    /// Zero denominator, or inverting a zero fraction
    #[error("division by zero")]
    #[diagnostic(code(unitbasis::division_by_zero))]
    DivisionByZero,

    /// `convert` called on a basis whose anchors are linearly dependent
    #[error("the anchor quantities do not form a basis")]
    #[diagnostic(
        code(unitbasis::incoherent_basis),
        help(
            "check `is_incoherent()` before converting, or pick anchors whose \
             exponent vectors are linearly independent"
        )
    )]
    IncoherentBasis,

    /// An exponent vector or matrix has the wrong length
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    #[diagnostic(code(unitbasis::dimension_mismatch))]
    DimensionMismatch { expected: usize, found: usize },

    /// A square-only operation was given a rectangular matrix
    #[error("matrix is not square ({rows}x{cols})")]
    #[diagnostic(code(unitbasis::not_square))]
    NotSquare { rows: usize, cols: usize },

    /// Rows of differing lengths
    #[error("row {row} has {found} entries, expected {expected}")]
    #[diagnostic(code(unitbasis::ragged_matrix))]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown quantity: {0}")]
    #[diagnostic(
        code(unitbasis::unknown_quantity),
        help("run `unitbasis list` to see the known quantities")
    )]
    UnknownQuantity(String),

    #[error("unknown base dimension: {0}")]
    #[diagnostic(
        code(unitbasis::unknown_dimension),
        help(
            "base dimensions are time, length, mass, current, temperature, \
             luminous_intensity and amount_of_substance"
        )
    )]
    UnknownDimension(String),

    #[error("quantity defined twice: {0}")]
    #[diagnostic(code(unitbasis::duplicate_quantity))]
    DuplicateQuantity(String),

    /// Text that does not parse as `n` or `n/d`
    #[error("invalid fraction: {0:?}")]
    #[diagnostic(
        code(unitbasis::invalid_fraction),
        help("write fractions as an integer (`-2`) or numerator/denominator (`1/2`)")
    )]
    InvalidFraction(String),
}

pub type Result<T> = std::result::Result<T, UnitError>;
