use std::fmt::Debug;

use crate::error::{MatmulError, Result};
use crate::matrix::Matrix;

/// A strategy for computing `C = A @ B` into a caller-owned output.
///
/// Implementations differ only in how the work is scheduled. For identical
/// inputs every implementation must leave `c` bit-identical, and every cell
/// of `c` is overwritten exactly once per call.
pub trait Multiplier: Send + Sync + Debug {
    /// Returns the name of this strategy (e.g., "sequential", "parallel").
    fn name(&self) -> &str;

    /// Matrix multiplication: C = A @ B.
    ///
    /// - `a`: shape [m, k]
    /// - `b`: shape [k, n]
    /// - `c`: pre-allocated output of shape [m, n]
    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()>;
}

/// Validate that `a @ b` is defined and that `c` has the shape of the product.
pub fn check_shapes(a: &Matrix, b: &Matrix, c: &Matrix) -> Result<()> {
    let (m, k) = a.shape();
    let (k2, n) = b.shape();
    if k != k2 {
        return Err(MatmulError::DimensionMismatch { m, k, k2, n });
    }
    if c.shape() != (m, n) {
        return Err(MatmulError::OutputShape {
            expected: (m, n),
            got: c.shape(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_shapes_ok() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(3, 4);
        let c = Matrix::new(2, 4);
        assert!(check_shapes(&a, &b, &c).is_ok());
    }

    #[test]
    fn test_check_shapes_inner_mismatch() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(2, 4);
        let c = Matrix::new(2, 4);
        assert_eq!(
            check_shapes(&a, &b, &c),
            Err(MatmulError::DimensionMismatch {
                m: 2,
                k: 3,
                k2: 2,
                n: 4
            })
        );
    }

    #[test]
    fn test_check_shapes_bad_output() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(3, 4);
        let c = Matrix::new(4, 2);
        assert_eq!(
            check_shapes(&a, &b, &c),
            Err(MatmulError::OutputShape {
                expected: (2, 4),
                got: (4, 2)
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = MatmulError::DimensionMismatch {
            m: 2,
            k: 3,
            k2: 2,
            n: 4,
        };
        assert_eq!(err.to_string(), "matmul dimension mismatch: [2x3] @ [2x4]");
    }
}
