use tracing::debug;

use crate::backend::{check_shapes, Multiplier};
use crate::error::Result;
use crate::matrix::{Element, Matrix};

/// Single-threaded reference multiplier.
///
/// Straight triple loop in row-major order of the output. It doubles as the
/// oracle the parallel engine is checked against.
#[derive(Debug, Clone, Default)]
pub struct SequentialMultiplier;

impl SequentialMultiplier {
    pub fn new() -> Self {
        SequentialMultiplier
    }
}

impl Multiplier for SequentialMultiplier {
    fn name(&self) -> &str {
        "sequential"
    }

    fn multiply(&self, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
        multiply_sequential(a, b, c)
    }
}

/// Compute `c = a @ b` on the calling thread.
///
/// # Errors
/// Returns an error if `a.cols() != b.rows()` or `c` is not
/// `a.rows() x b.cols()`. `c` is untouched in that case.
pub fn multiply_sequential(a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
    check_shapes(a, b, c)?;
    let (m, k) = a.shape();
    let n = b.cols();
    debug!(m, k, n, "sequential multiply");

    for i in 0..m {
        for j in 0..n {
            let mut sum: Element = 0;
            for p in 0..k {
                sum += a[(i, p)] * b[(p, j)];
            }
            c[(i, j)] = sum;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatmulError;

    fn m(rows: Vec<Vec<Element>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_multiply_basic() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![5, 6], vec![7, 8]]);
        let mut c = Matrix::new(2, 2);
        multiply_sequential(&a, &b, &mut c).unwrap();
        assert_eq!(c, m(vec![vec![19, 22], vec![43, 50]]));
    }

    #[test]
    fn test_multiply_rectangular() {
        // [1x3] @ [3x2]
        let a = m(vec![vec![1, 2, 3]]);
        let b = m(vec![vec![1, 4], vec![2, 5], vec![3, 6]]);
        let mut c = Matrix::new(1, 2);
        multiply_sequential(&a, &b, &mut c).unwrap();
        assert_eq!(c.row(0), &[14, 32]);
    }

    #[test]
    fn test_multiply_identity() {
        let a = m(vec![vec![3, -1, 2], vec![0, 7, 5], vec![-4, 1, 9]]);
        let mut c = Matrix::new(3, 3);
        multiply_sequential(&a, &Matrix::identity(3), &mut c).unwrap();
        assert_eq!(c, a);
        multiply_sequential(&Matrix::identity(3), &a, &mut c).unwrap();
        assert_eq!(c, a);
    }

    #[test]
    fn test_multiply_zero() {
        let a = m(vec![vec![3, -1], vec![0, 7], vec![-4, 1]]);
        let mut c = Matrix::from_fn(3, 4, |_, _| 99);
        multiply_sequential(&a, &Matrix::zeros(2, 4), &mut c).unwrap();
        assert_eq!(c, Matrix::zeros(3, 4));
    }

    #[test]
    fn test_multiply_overwrites_output() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![5, 6], vec![7, 8]]);
        let mut c = Matrix::from_fn(2, 2, |_, _| -1);
        multiply_sequential(&a, &b, &mut c).unwrap();
        multiply_sequential(&a, &b, &mut c).unwrap();
        assert_eq!(c, m(vec![vec![19, 22], vec![43, 50]]));
    }

    #[test]
    fn test_multiply_empty_inner_dimension() {
        let a = Matrix::new(2, 0);
        let b = Matrix::new(0, 3);
        let mut c = Matrix::from_fn(2, 3, |_, _| 5);
        multiply_sequential(&a, &b, &mut c).unwrap();
        assert_eq!(c, Matrix::zeros(2, 3));
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(2, 2);
        let mut c = Matrix::new(2, 2);
        assert!(matches!(
            multiply_sequential(&a, &b, &mut c),
            Err(MatmulError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_trait_object() {
        let backend: &dyn Multiplier = &SequentialMultiplier::new();
        assert_eq!(backend.name(), "sequential");
        let a = Matrix::identity(2);
        let mut c = Matrix::new(2, 2);
        backend.multiply(&a, &a, &mut c).unwrap();
        assert_eq!(c, a);
    }
}
