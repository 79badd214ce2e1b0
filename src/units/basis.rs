//! Re-expressing quantities in a basis of anchor quantities
//!
//! A [`BasisMatrix`] stacks the exponent vectors of D anchor quantities as
//! the rows of a D×D matrix `A`. A quantity with exponent row vector `q`
//! equals the product of the anchors raised to the components of `c`
//! exactly when `c × A = q`, so `c = q × A⁻¹`.
//!
//! With anchors time, length, mass, charge, ... the volt becomes
//! `s-2 m2 kg1 C-1` instead of the SI `s-3 m2 kg1 A-1`.

use std::sync::OnceLock;

use super::catalog::QuantityCatalog;
use super::error::{Result, UnitError};
use super::fraction::Fraction;
use super::matrix::Matrix;
use super::quantity::{BaseDimension, ExponentVector, Quantity};

static SI: OnceLock<BasisMatrix> = OnceLock::new();

/// Anchor quantities together with their exact inverse matrix
///
/// The inverse is computed once in [`BasisMatrix::new`] and never changes,
/// so a shared reference can serve any number of readers. When the anchors
/// are linearly dependent there is no inverse and the basis is incoherent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisMatrix {
    anchors: Vec<Quantity>,
    matrix: Matrix,
    determinant: Fraction,
    inverse: Option<Matrix>,
}

impl BasisMatrix {
    /// Build a basis from D anchors, each with a D-component exponent vector
    ///
    /// An incoherent anchor set is not an error; check
    /// [`BasisMatrix::is_incoherent`]. Fails only when the shapes disagree.
    pub fn new(anchors: Vec<Quantity>) -> Result<Self> {
        let size = anchors.len();
        if let Some(bad) = anchors.iter().find(|a| a.exponents().len() != size) {
            return Err(UnitError::DimensionMismatch {
                expected: size,
                found: bad.exponents().len(),
            });
        }

        let matrix = Matrix::new(anchors.iter().map(|a| a.exponents().to_vec()).collect())?;
        let determinant = matrix.determinant()?;
        let inverse = matrix.inverse_with(determinant)?;

        tracing::debug!(
            "basis [{}]: determinant {}, {}",
            anchor_names(&anchors),
            determinant,
            if inverse.is_some() { "coherent" } else { "incoherent" }
        );

        Ok(Self {
            anchors,
            matrix,
            determinant,
            inverse,
        })
    }

    /// Build a basis from catalog names
    pub fn from_names<S: AsRef<str>>(catalog: &QuantityCatalog, names: &[S]) -> Result<Self> {
        Self::new(catalog.lookup_all(names)?)
    }

    /// The basis of the seven SI base quantities; always coherent
    pub fn si() -> &'static BasisMatrix {
        SI.get_or_init(|| {
            let anchors = BaseDimension::ALL.into_iter().map(Quantity::base).collect();
            Self::new(anchors).expect("SI base quantities form a square basis")
        })
    }

    /// True when the anchors do not span the dimension space
    #[inline]
    pub fn is_incoherent(&self) -> bool {
        self.inverse.is_none()
    }

    /// Number of anchors, D
    pub fn dimension(&self) -> usize {
        self.anchors.len()
    }

    pub fn anchors(&self) -> &[Quantity] {
        &self.anchors
    }

    /// Anchor exponent vectors stacked as rows
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Zero exactly when the basis is incoherent
    pub fn determinant(&self) -> Fraction {
        self.determinant
    }

    /// `None` for an incoherent basis
    pub fn inverse_matrix(&self) -> Option<&Matrix> {
        self.inverse.as_ref()
    }

    /// Express `quantity` as powers of the anchors
    ///
    /// Fails with `IncoherentBasis` when there is no inverse.
    pub fn convert(&self, quantity: &Quantity) -> Result<ExponentVector> {
        let converted = self.convert_exponents(quantity.exponents())?;
        tracing::trace!(
            "converted {} -> {}",
            quantity.name(),
            self.unit_string(&converted).unwrap_or_default()
        );
        Ok(converted)
    }

    /// Express a raw exponent vector as powers of the anchors
    ///
    /// Computes `result[i] = Σ_j inverse[j][i] * source[j]`.
    pub fn convert_exponents(&self, source: &[Fraction]) -> Result<ExponentVector> {
        let inverse = self.inverse.as_ref().ok_or(UnitError::IncoherentBasis)?;
        inverse.vector_product(source)
    }

    /// Format a converted vector with the anchors' short unit symbols
    ///
    /// Each nonzero exponent prints as the symbol followed by the exponent,
    /// always with an explicit magnitude (`C1`, `s-2`, `m1/2`). Zero
    /// exponents are skipped, so a dimensionless vector gives `""`.
    ///
    /// Fails with `DimensionMismatch` unless there is one exponent per anchor.
    pub fn unit_string(&self, vector: &[Fraction]) -> Result<String> {
        if vector.len() != self.anchors.len() {
            return Err(UnitError::DimensionMismatch {
                expected: self.anchors.len(),
                found: vector.len(),
            });
        }
        Ok(self
            .anchors
            .iter()
            .zip(vector)
            .filter(|(_, exponent)| !exponent.is_zero())
            .map(|(anchor, exponent)| format!("{}{}", anchor.short_unit(), exponent_text(exponent)))
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// [`BasisMatrix::convert`] followed by [`BasisMatrix::unit_string`]
    pub fn express(&self, quantity: &Quantity) -> Result<String> {
        self.unit_string(&self.convert(quantity)?)
    }
}

fn exponent_text(exponent: &Fraction) -> String {
    let sign = if exponent.is_negative() { "-" } else { "" };
    let magnitude = exponent.abs();
    if magnitude.is_integer() {
        format!("{sign}{}", magnitude.numerator())
    } else {
        format!("{sign}{}/{}", magnitude.numerator(), magnitude.denominator())
    }
}

fn anchor_names(anchors: &[Quantity]) -> String {
    anchors
        .iter()
        .map(Quantity::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::catalog::catalog;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn charge_basis() -> BasisMatrix {
        BasisMatrix::from_names(
            catalog(),
            &[
                "Time",
                "Length",
                "Mass",
                "Electric Charge",
                "Temperature",
                "Luminous Intensity",
                "Amount of Substance",
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_si_is_identity() {
        let si = BasisMatrix::si();
        assert!(!si.is_incoherent());
        assert_eq!(si.dimension(), 7);
        assert_eq!(si.matrix(), &Matrix::identity(7));
        assert_eq!(si.inverse_matrix(), Some(&Matrix::identity(7)));
    }

    #[test]
    fn test_charge_basis_inverse() {
        let basis = charge_basis();
        let inverse = basis.inverse_matrix().unwrap();
        assert_eq!(basis.matrix().multiply(inverse).unwrap(), Matrix::identity(7));
        assert_eq!(basis.determinant(), basis.matrix().determinant().unwrap());
        assert_eq!(basis.determinant(), Fraction::ONE);
    }

    #[test]
    fn test_convert_current() {
        let basis = charge_basis();
        let current = catalog().lookup("Current").unwrap();
        let vector = basis.convert(current).unwrap();
        assert_eq!(vector.len(), 7);
        assert_eq!(vector[0], Fraction::whole(-1));
        assert_eq!(vector[3], Fraction::ONE);
        assert_eq!(basis.unit_string(&vector).unwrap(), "s-1 C1");
    }

    #[test]
    fn test_incoherent_convert_fails() {
        let basis = BasisMatrix::from_names(
            catalog(),
            &[
                "Time",
                "Length",
                "Mass",
                "Energy",
                "Temperature",
                "Luminous Intensity",
                "Amount of Substance",
            ],
        )
        .unwrap();
        assert!(basis.is_incoherent());
        assert_eq!(basis.determinant(), Fraction::ZERO);
        assert_eq!(basis.inverse_matrix(), None);
        let energy = catalog().lookup("Energy").unwrap();
        assert_eq!(basis.convert(energy), Err(UnitError::IncoherentBasis));
    }

    #[test]
    fn test_shape_mismatch() {
        let short = Quantity::new("Short", "unit", "u", vec![Fraction::ONE; 3]);
        let err = BasisMatrix::new(vec![short.clone(), short]).unwrap_err();
        assert_eq!(err, UnitError::DimensionMismatch { expected: 2, found: 3 });

        let basis = BasisMatrix::si();
        assert!(matches!(
            basis.convert_exponents(&[Fraction::ONE; 2]),
            Err(UnitError::DimensionMismatch { expected: 7, found: 2 })
        ));
    }

    #[test]
    fn test_unit_string_formatting() {
        let basis = BasisMatrix::si();
        assert_eq!(basis.unit_string(&[Fraction::ZERO; 7]).unwrap(), "");
        let vector = vec![
            frac(1, 2),
            Fraction::ZERO,
            frac(-3, 2),
            Fraction::whole(-1),
            Fraction::ZERO,
            Fraction::ZERO,
            Fraction::whole(2),
        ];
        assert_eq!(basis.unit_string(&vector).unwrap(), "s1/2 kg-3/2 A-1 mol2");
    }

    #[test]
    fn test_unit_string_length_must_match_anchors() {
        let basis = BasisMatrix::si();
        let short = [Fraction::ONE; 3];
        assert_eq!(
            basis.unit_string(&short),
            Err(UnitError::DimensionMismatch { expected: 7, found: 3 })
        );
        assert_eq!(
            basis.unit_string(&[Fraction::ONE; 8]),
            Err(UnitError::DimensionMismatch { expected: 7, found: 8 })
        );
    }

    #[test]
    fn test_fractional_result() {
        // Anchors: area (m²) in place of length
        let mut anchors: Vec<Quantity> =
            BaseDimension::ALL.into_iter().map(Quantity::base).collect();
        anchors[1] = catalog().lookup("Area").unwrap().clone();
        let basis = BasisMatrix::new(anchors).unwrap();
        let velocity = catalog().lookup("Velocity").unwrap();
        assert_eq!(basis.express(velocity).unwrap(), "s-1 m²1/2");
    }

    #[test]
    fn test_small_dimension() {
        // Two dimensions: x and y, anchors x and x·y
        let x = Quantity::new("X", "x", "x", vec![Fraction::ONE, Fraction::ZERO]);
        let xy = Quantity::new("XY", "xy", "xy", vec![Fraction::ONE, Fraction::ONE]);
        let y = Quantity::new("Y", "y", "y", vec![Fraction::ZERO, Fraction::ONE]);
        let basis = BasisMatrix::new(vec![x, xy]).unwrap();
        assert_eq!(basis.express(&y).unwrap(), "x-1 xy1");
    }
}
