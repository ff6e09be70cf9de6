use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{MatmulError, Result};
use crate::zip::Indexed;

/// Element type stored in a [`Matrix`].
pub type Element = i64;

/// A dense, row-major integer matrix.
///
/// Every row is its own `Vec`, so rows are not contiguous with each other.
/// This lets the parallel engine hand each output row to a different task as
/// an exclusive `&mut` borrow. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Vec<Element>>,
}

impl Matrix {
    /// Create a zero-filled matrix with `rows` rows of `cols` elements.
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![vec![0; cols]; rows],
        }
    }

    /// Alias for [`Matrix::new`], reads better at call sites building operands.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols)
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.data[i][i] = 1;
        }
        m
    }

    /// Build a matrix from owned rows.
    ///
    /// The column count is taken from the first row; an empty `Vec` yields a
    /// `0 x 0` matrix.
    ///
    /// # Errors
    /// Returns [`MatmulError::RaggedRows`] if any row differs in length from
    /// the first.
    pub fn from_rows(data: Vec<Vec<Element>>) -> Result<Self> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some((row, r)) = data.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatmulError::RaggedRows {
                row,
                expected: cols,
                got: r.len(),
            });
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// Build a matrix by evaluating `f(i, j)` for every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Element,
    {
        let data = (0..rows)
            .map(|i| (0..cols).map(|j| f(i, j)).collect())
            .collect();
        Matrix { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    pub fn row(&self, i: usize) -> &[Element] {
        &self.data[i]
    }

    /// Row `i` as a mutable slice.
    ///
    /// # Panics
    /// Panics if `i >= rows()`.
    pub fn row_mut(&mut self, i: usize) -> &mut [Element] {
        &mut self.data[i]
    }

    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Element]> + '_ {
        self.data.iter().map(Vec::as_slice)
    }

    /// Mutable borrows of every row at once. The borrows are disjoint, so
    /// they can be moved into separate tasks.
    pub fn rows_mut(&mut self) -> impl ExactSizeIterator<Item = &mut [Element]> + '_ {
        self.data.iter_mut().map(Vec::as_mut_slice)
    }

    /// A virtual view of column `j`; nothing is copied.
    pub fn column(&self, j: usize) -> Column<'_> {
        Column { matrix: self, col: j }
    }

    /// Consume the matrix and return its rows.
    pub fn into_rows(self) -> Vec<Vec<Element>> {
        self.data
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Element;

    fn index(&self, (i, j): (usize, usize)) -> &Element {
        &self.data[i][j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Element {
        &mut self.data[i][j]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.data {
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Column `col` of a row-major matrix, gathered one element at a time.
///
/// Each access touches a different row, so locality is poor; the access
/// pattern is kept because it needs no extra storage.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    matrix: &'a Matrix,
    col: usize,
}

impl Column<'_> {
    pub fn col_index(&self) -> usize {
        self.col
    }

    /// Number of elements in the column, i.e. the row count of the matrix.
    pub fn len(&self) -> usize {
        self.matrix.rows
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.rows == 0
    }
}

impl Indexed for Column<'_> {
    type Item = Element;

    fn at(&self, k: usize) -> Element {
        self.matrix.data[k][self.col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let m = Matrix::new(2, 3);
        assert_eq!(m.shape(), (2, 3));
        assert!(m.iter_rows().all(|r| r == [0, 0, 0]));
    }

    #[test]
    fn test_identity() {
        let m = Matrix::identity(3);
        assert_eq!(m.row(0), &[1, 0, 0]);
        assert_eq!(m.row(1), &[0, 1, 0]);
        assert_eq!(m.row(2), &[0, 0, 1]);
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m[(1, 2)], 6);
    }

    #[test]
    fn test_from_rows_empty() {
        let m = Matrix::from_rows(vec![]).unwrap();
        assert_eq!(m.shape(), (0, 0));
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            MatmulError::RaggedRows {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_from_fn() {
        let m = Matrix::from_fn(2, 2, |i, j| (i * 10 + j) as Element);
        assert_eq!(m.into_rows(), vec![vec![0, 1], vec![10, 11]]);
    }

    #[test]
    fn test_index_mut() {
        let mut m = Matrix::new(2, 2);
        m[(0, 1)] = 7;
        m.row_mut(1)[0] = 9;
        assert_eq!(m.into_rows(), vec![vec![0, 7], vec![9, 0]]);
    }

    #[test]
    fn test_rows_mut_are_independent() {
        let mut m = Matrix::new(3, 2);
        for (i, row) in m.rows_mut().enumerate() {
            row.fill(i as Element);
        }
        assert_eq!(m.into_rows(), vec![vec![0, 0], vec![1, 1], vec![2, 2]]);
    }

    #[test]
    fn test_column_view() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        let c = m.column(1);
        assert_eq!(c.len(), 3);
        assert_eq!(c.col_index(), 1);
        assert_eq!((0..c.len()).map(|k| c.at(k)).collect::<Vec<_>>(), vec![2, 4, 6]);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_range_panics() {
        let m = Matrix::new(1, 1);
        let _ = m.row(1);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(m.to_string(), "[1, 2]\n[3, 4]\n");
    }
}
