//! Property-based tests for the exact arithmetic core

use proptest::prelude::*;
use unitbasis::units::{Fraction, Matrix};

// ============================================================================
// Strategies
// ============================================================================

fn arb_fraction() -> impl Strategy<Value = Fraction> {
    (-60i64..=60, 1i64..=24).prop_map(|(n, d)| Fraction::new(n, d).unwrap())
}

fn arb_nonzero_fraction() -> impl Strategy<Value = Fraction> {
    arb_fraction().prop_filter("nonzero", |f| !f.is_zero())
}

/// Square matrices of size 1..=4 with small integer entries
fn arb_square_matrix() -> impl Strategy<Value = Matrix> {
    (1usize..=4).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(-3i64..=3, n), n).prop_map(|rows| {
            Matrix::new(
                rows.into_iter()
                    .map(|row| row.into_iter().map(Fraction::whole).collect())
                    .collect(),
            )
            .unwrap()
        })
    })
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn swap_first_rows(m: &Matrix) -> Matrix {
    let mut rows = m.rows().to_vec();
    rows.swap(0, 1);
    Matrix::new(rows).unwrap()
}

// ============================================================================
// Fraction properties
// ============================================================================

proptest! {
    #[test]
    fn fraction_is_always_reduced(
        n in -1000i64..1000,
        d in (-1000i64..1000).prop_filter("nonzero", |d| *d != 0),
    ) {
        let f = Fraction::new(n, d).unwrap();
        prop_assert!(f.denominator() > 0);
        prop_assert_eq!(gcd(f.numerator().abs(), f.denominator()), 1);
        // Same value as the input
        prop_assert_eq!(f.numerator() as i128 * d as i128, n as i128 * f.denominator() as i128);
    }

    #[test]
    fn multiply_then_divide_roundtrips(a in arb_fraction(), b in arb_nonzero_fraction()) {
        prop_assert_eq!((a * b).divide(b).unwrap(), a);
    }

    #[test]
    fn add_then_subtract_roundtrips(a in arb_fraction(), b in arb_fraction()) {
        prop_assert_eq!((a + b) - b, a);
    }

    #[test]
    fn inverse_is_involutive(a in arb_nonzero_fraction()) {
        prop_assert_eq!(a.inverse().unwrap().inverse().unwrap(), a);
        prop_assert_eq!(a * a.inverse().unwrap(), Fraction::ONE);
    }

    #[test]
    fn display_parses_back(a in arb_fraction()) {
        prop_assert_eq!(a.to_string().parse::<Fraction>().unwrap(), a);
    }
}

// ============================================================================
// Matrix properties
// ============================================================================

proptest! {
    #[test]
    fn identity_has_unit_determinant(n in 0usize..=6) {
        prop_assert_eq!(Matrix::identity(n).determinant().unwrap(), Fraction::ONE);
    }

    #[test]
    fn inverse_absent_iff_singular(m in arb_square_matrix()) {
        let det = m.determinant().unwrap();
        let inverse = m.inverse().unwrap();
        prop_assert_eq!(inverse.is_none(), det.numerator() == 0);

        if let Some(inverse) = inverse {
            let n = m.n_rows();
            prop_assert_eq!(m.multiply(&inverse).unwrap(), Matrix::identity(n));
            prop_assert_eq!(inverse.multiply(&m).unwrap(), Matrix::identity(n));
        }
    }

    #[test]
    fn row_swap_negates_determinant(
        m in arb_square_matrix().prop_filter("two rows", |m| m.n_rows() >= 2),
    ) {
        let swapped = swap_first_rows(&m);
        prop_assert_eq!(swapped.determinant().unwrap(), -m.determinant().unwrap());
    }

    #[test]
    fn adjugate_is_transposed_cofactors(m in arb_square_matrix()) {
        prop_assert_eq!(m.adjugate().unwrap(), m.cofactor_matrix().unwrap().transpose());
    }

    #[test]
    fn matrix_times_adjugate_is_scaled_identity(m in arb_square_matrix()) {
        let n = m.n_rows();
        let det = m.determinant().unwrap();
        let expected = Matrix::from_fn(n, n, |i, j| if i == j { det } else { Fraction::ZERO });
        prop_assert_eq!(m.multiply(&m.adjugate().unwrap()).unwrap(), expected);
    }

    #[test]
    fn transpose_preserves_determinant(m in arb_square_matrix()) {
        prop_assert_eq!(m.transpose().determinant().unwrap(), m.determinant().unwrap());
    }
}
