//! Exact rational matrix algebra
//!
//! Determinant, minors, cofactors, adjugate and inverse over [`Fraction`].
//! Every operation is a pure function that allocates and returns a new
//! matrix; nothing is updated in place.
//!
//! The determinant uses cofactor expansion along the first row. Its cost is
//! factorial in the size, which is fine for the seven base dimensions. A
//! fraction-free elimination (Bareiss) would be the route for larger sizes.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use super::error::{Result, UnitError};
use super::fraction::Fraction;

/// Rectangular grid of fractions, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Matrix {
    rows: Vec<Vec<Fraction>>,
    #[serde(skip)]
    cols: usize,
}

impl Matrix {
    /// Build from rows; every row must have the same length
    pub fn new(rows: Vec<Vec<Fraction>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(UnitError::RaggedMatrix {
                row,
                expected: cols,
                found,
            });
        }
        Ok(Self { rows, cols })
    }

    /// Build a `rows × cols` matrix from an entry function
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut entry: impl FnMut(usize, usize) -> Fraction,
    ) -> Self {
        let rows = (0..rows)
            .map(|i| (0..cols).map(|j| entry(i, j)).collect())
            .collect();
        Self { rows, cols }
    }

    /// Like [`Matrix::from_fn`], stopping at the first failing entry
    pub fn try_from_fn(
        rows: usize,
        cols: usize,
        mut entry: impl FnMut(usize, usize) -> Result<Fraction>,
    ) -> Result<Self> {
        let rows = (0..rows)
            .map(|i| (0..cols).map(|j| entry(i, j)).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows, cols })
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |i, j| if i == j { Fraction::ONE } else { Fraction::ZERO })
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.n_rows() == self.n_cols()
    }

    pub fn rows(&self) -> &[Vec<Fraction>] {
        &self.rows
    }

    /// Swap rows and columns; defined for any shape
    pub fn transpose(&self) -> Matrix {
        Self::from_fn(self.n_cols(), self.n_rows(), |i, j| self.rows[j][i])
    }

    /// The submatrix left after deleting `row` and `col`
    pub fn minor(&self, row: usize, col: usize) -> Matrix {
        let rows: Vec<Vec<Fraction>> = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != row)
            .map(|(_, r)| {
                r.iter()
                    .enumerate()
                    .filter(|&(j, _)| j != col)
                    .map(|(_, &entry)| entry)
                    .collect()
            })
            .collect();
        let cols = if col < self.cols { self.cols - 1 } else { self.cols };
        Self { rows, cols }
    }

    fn ensure_square(&self) -> Result<()> {
        if self.is_square() {
            Ok(())
        } else {
            Err(UnitError::NotSquare {
                rows: self.n_rows(),
                cols: self.n_cols(),
            })
        }
    }

    /// Determinant; the empty matrix has determinant 1
    pub fn determinant(&self) -> Result<Fraction> {
        self.ensure_square()?;
        Ok(self.expand_determinant())
    }

    fn expand_determinant(&self) -> Fraction {
        let m = &self.rows;
        match m.len() {
            0 => Fraction::ONE,
            1 => m[0][0],
            2 => m[0][0] * m[1][1] - m[0][1] * m[1][0],
            _ => m[0]
                .iter()
                .enumerate()
                .filter(|(_, entry)| !entry.is_zero())
                .map(|(i, &entry)| alternate(i, entry * self.minor(0, i).expand_determinant()))
                .sum(),
        }
    }

    /// `(-1)^(i+j) * det(minor(i, j))`
    fn cofactor(&self, i: usize, j: usize) -> Fraction {
        alternate(i + j, self.minor(i, j).expand_determinant())
    }

    /// Matrix of cofactors, not transposed
    pub fn cofactor_matrix(&self) -> Result<Matrix> {
        self.ensure_square()?;
        let n = self.n_rows();
        Ok(Self::from_fn(n, n, |i, j| self.cofactor(i, j)))
    }

    /// Transpose of the cofactor matrix, built directly with swapped indices
    pub fn adjugate(&self) -> Result<Matrix> {
        self.ensure_square()?;
        let n = self.n_rows();
        Ok(Self::from_fn(n, n, |i, j| self.cofactor(j, i)))
    }

    /// Exact inverse, or `None` when the matrix is singular
    pub fn inverse(&self) -> Result<Option<Matrix>> {
        self.inverse_with(self.determinant()?)
    }

    /// [`Matrix::inverse`] given this matrix's determinant, already computed
    pub(crate) fn inverse_with(&self, det: Fraction) -> Result<Option<Matrix>> {
        if det.is_zero() {
            return Ok(None);
        }
        let adjugate = self.adjugate()?;
        let n = self.n_rows();
        Self::try_from_fn(n, n, |i, j| adjugate.rows[i][j].divide(det)).map(Some)
    }

    /// Matrix product `self × rhs`
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.n_cols() != rhs.n_rows() {
            return Err(UnitError::DimensionMismatch {
                expected: self.n_cols(),
                found: rhs.n_rows(),
            });
        }
        Ok(Self::from_fn(self.n_rows(), rhs.n_cols(), |i, j| {
            (0..self.n_cols()).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum()
        }))
    }

    /// Row vector times matrix: `result[i] = Σ_j self[j][i] * vector[j]`
    ///
    /// Rows of `self` pair with components of `vector`; the sum for each
    /// output index runs over `j` in ascending order.
    pub fn vector_product(&self, vector: &[Fraction]) -> Result<Vec<Fraction>> {
        if vector.len() != self.n_rows() {
            return Err(UnitError::DimensionMismatch {
                expected: self.n_rows(),
                found: vector.len(),
            });
        }
        Ok((0..self.n_cols())
            .map(|i| {
                vector
                    .iter()
                    .zip(&self.rows)
                    .map(|(&component, row)| row[i] * component)
                    .sum()
            })
            .collect())
    }
}

/// Apply the sign `(-1)^index`
fn alternate(index: usize, value: Fraction) -> Fraction {
    if index % 2 == 0 { value } else { -value }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Fraction;

    fn index(&self, (i, j): (usize, usize)) -> &Fraction {
        &self.rows[i][j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(entry_text).collect())
            .collect();
        let width = cells.iter().flatten().map(|c| c.chars().count()).max().unwrap_or(0);

        for (i, row) in cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
            write!(f, "[ {} ]", line.join("  "))?;
        }
        Ok(())
    }
}

fn entry_text(entry: &Fraction) -> String {
    if entry.is_integer() {
        entry.numerator().to_string()
    } else {
        entry.to_string()
    }
}
