//! Utility functions to manipulate scalar vectors.
//!
//! Shared helpers needed in the shuffle proof implementation.

use p256::Scalar;

/// Provides an iterator over the powers of a `Scalar`.
///
/// This struct is created by the `exp_iter` function.
pub struct ScalarExp {
    x: Scalar,
    next_exp_x: Scalar,
}

impl Iterator for ScalarExp {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        let exp_x = self.next_exp_x;
        self.next_exp_x *= self.x;
        Some(exp_x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Return an iterator of the powers of `x`, starting from `x^0 = 1`.
pub fn exp_iter(x: Scalar) -> ScalarExp {
    let next_exp_x = Scalar::ONE;
    ScalarExp { x, next_exp_x }
}

/// Scalar product of two scalar vectors.
pub fn inner_product(row: &[Scalar], col: &[Scalar]) -> Scalar {
    row.iter().zip(col.iter()).map(|(i, j)| i * j).sum()
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
