//! Matrices with entries in a ring, and row reduction over a field.
//!
//! The solver works on an augmented matrix: the first `n` columns hold the
//! coefficients of `n` unknowns and the last column holds the constants.
//! [Matrix::reduce] brings such a matrix into reduced row-echelon form
//! (Gauss-Jordan) in place and reports which columns received a pivot.

use std::{
    fmt::{self, Display, Formatter, Write},
    ops::{Index, IndexMut},
    slice::Chunks,
};

use crate::domains::{Field, Ring};

/// Errors that can occur when constructing or reducing a matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    ShapeMismatch {
        data_len: usize,
        nrows: u32,
        ncols: u32,
    },
    NotRectangular,
    MissingConstantColumn,
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::ShapeMismatch {
                data_len,
                nrows,
                ncols,
            } => write!(
                f,
                "Data length does not match matrix dimensions: {} vs ({},{})",
                data_len, nrows, ncols
            ),
            MatrixError::NotRectangular => write!(f, "The matrix is not rectangular"),
            MatrixError::MissingConstantColumn => {
                write!(f, "An augmented matrix requires at least one column")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// A matrix with entries that are elements of a ring `F`, stored row-major.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Matrix<F: Ring> {
    pub(crate) data: Vec<F::Element>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
    pub(crate) field: F,
}

impl<F: Ring> Matrix<F> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| field.zero())
                .collect(),
            nrows,
            ncols,
            field,
        }
    }

    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(
        data: Vec<F::Element>,
        nrows: u32,
        ncols: u32,
        field: F,
    ) -> Result<Matrix<F>, MatrixError> {
        if data.len() == nrows as usize * ncols as usize {
            Ok(Matrix {
                data,
                nrows,
                ncols,
                field,
            })
        } else {
            Err(MatrixError::ShapeMismatch {
                data_len: data.len(),
                nrows,
                ncols,
            })
        }
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<F::Element>>, field: F) -> Result<Matrix<F>, MatrixError> {
        let mut data = vec![];

        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);

        for d in matrix {
            if d.len() != cols {
                return Err(MatrixError::NotRectangular);
            }

            data.extend(d);
        }

        Ok(Matrix {
            nrows: if cols == 0 { 0 } else { (data.len() / cols) as u32 },
            ncols: cols as u32,
            data,
            field,
        })
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return the field of the matrix entries.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, F::Element> {
        self.data.chunks(self.ncols as usize)
    }

    /// Swap rows `r1` and `r2`.
    pub fn swap_rows(&mut self, r1: u32, r2: u32) {
        if r1 == r2 {
            return;
        }

        for l in 0..self.ncols {
            self.data
                .swap((self.ncols * r1 + l) as usize, (self.ncols * r2 + l) as usize);
        }
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|e| F::is_zero(e))
    }

    /// Check that no row asserts a non-zero constant with all-zero
    /// coefficients: for every row whose first `unknowns` entries are zero,
    /// the remaining (augmented) entries must be zero as well.
    pub fn is_consistent(&self, unknowns: u32) -> bool {
        self.row_iter().all(|r| {
            r[..unknowns as usize].iter().any(|e| !F::is_zero(e))
                || r[unknowns as usize..].iter().all(F::is_zero)
        })
    }
}

impl<F: Ring> Index<u32> for Matrix<F> {
    type Output = [F::Element];

    /// Get the `index`th row of the matrix.
    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        &self.data[index as usize * self.ncols as usize..(index as usize + 1) * self.ncols as usize]
    }
}

impl<F: Ring> Index<(u32, u32)> for Matrix<F> {
    type Output = F::Element;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> IndexMut<(u32, u32)> for Matrix<F> {
    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut F::Element {
        &mut self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> Display for Matrix<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (ri, r) in self.row_iter().enumerate() {
            f.write_char('{')?;
            for (ci, c) in r.iter().enumerate() {
                write!(f, "{}", c)?;
                if ci + 1 < self.ncols as usize {
                    f.write_char(',')?;
                }
            }
            f.write_char('}')?;
            if ri + 1 < self.nrows as usize {
                f.write_char(',')?;
            }
        }
        f.write_char('}')
    }
}

/// The result of a row reduction: the rank and the partition of the first
/// `max_col` columns into pivot (basis) and free columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    /// The number of pivots found.
    pub rank: u32,
    /// The columns that received a pivot, in elimination order. The pivot of
    /// `pivot_columns[i]` sits in row `i`.
    pub pivot_columns: Vec<u32>,
    /// The columns without a pivot, in ascending order.
    pub free_columns: Vec<u32>,
}

/// A single row operation performed during a reduction.
///
/// A step record carries enough information to replay the operation on a copy
/// of the input matrix, so a presentation layer can reconstruct every
/// intermediate state without the reduction itself doing any output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EliminationStep<F: Ring> {
    /// Row `swapped_with` was swapped into row `pivot_row` to serve as the
    /// pivot row for `column`. When no swap was needed, the two are equal.
    PivotSelected {
        column: u32,
        pivot_row: u32,
        swapped_with: u32,
    },
    /// The pivot row was divided by its pivot entry.
    RowNormalized {
        column: u32,
        row: u32,
        divisor: F::Element,
    },
    /// `factor` times the pivot row was subtracted from `row`.
    RowEliminated {
        column: u32,
        row: u32,
        pivot_row: u32,
        factor: F::Element,
    },
    /// The column had no non-zero entry at or below the pivot row.
    ColumnSkipped { column: u32 },
}

impl<F: Ring> EliminationStep<F> {
    /// The column this step was taken for.
    pub fn column(&self) -> u32 {
        match self {
            EliminationStep::PivotSelected { column, .. }
            | EliminationStep::RowNormalized { column, .. }
            | EliminationStep::RowEliminated { column, .. }
            | EliminationStep::ColumnSkipped { column } => *column,
        }
    }
}

impl<F: Field> EliminationStep<F> {
    /// Replay the step on `matrix`. Applying every step of a reduction in
    /// order to a copy of the input reproduces the reduced matrix.
    pub fn apply_to(&self, matrix: &mut Matrix<F>) {
        match self {
            EliminationStep::PivotSelected {
                pivot_row,
                swapped_with,
                ..
            } => matrix.swap_rows(*pivot_row, *swapped_with),
            EliminationStep::RowNormalized { row, divisor, .. } => {
                let field = matrix.field.clone();
                let inv = field.inv(divisor);
                for l in 0..matrix.ncols {
                    field.mul_assign(&mut matrix[(*row, l)], &inv);
                }
            }
            EliminationStep::RowEliminated {
                row,
                pivot_row,
                factor,
                ..
            } => {
                let field = matrix.field.clone();
                for l in 0..matrix.ncols {
                    let mut e = std::mem::replace(&mut matrix[(*row, l)], field.zero());
                    field.sub_mul_assign(&mut e, &matrix[(*pivot_row, l)], factor);
                    matrix[(*row, l)] = e;
                }
            }
            EliminationStep::ColumnSkipped { .. } => {}
        }
    }
}

impl<F: Field> Matrix<F> {
    /// Bring the first `max_col` columns into reduced row-echelon form
    /// (Gauss-Jordan) in place. Any trailing columns are augmented: they take
    /// part in the row operations but never produce a pivot.
    ///
    /// Columns are scanned left to right. The first row at or below the
    /// current pivot row with a non-zero entry is swapped into place, the
    /// pivot row is normalized so the pivot becomes one, and the column is
    /// cleared in every other row. A column with no eligible non-zero entry
    /// is recorded as free and the pivot row does not advance.
    pub fn reduce(&mut self, max_col: u32) -> Reduction {
        self.reduce_impl(max_col, &mut None)
    }

    /// Like [Matrix::reduce], but records every row operation in `steps`.
    pub fn reduce_traced(&mut self, max_col: u32, steps: &mut Vec<EliminationStep<F>>) -> Reduction {
        let mut sink = Some(steps);
        self.reduce_impl(max_col, &mut sink)
    }

    fn reduce_impl(
        &mut self,
        max_col: u32,
        steps: &mut Option<&mut Vec<EliminationStep<F>>>,
    ) -> Reduction {
        assert!(
            max_col <= self.ncols,
            "Cannot reduce over more columns than the matrix has: {} vs {}",
            max_col,
            self.ncols
        );

        let field = self.field.clone();
        let mut pivot_columns = vec![];
        let mut free_columns = vec![];

        let mut i = 0;
        for j in 0..max_col {
            // Select the first non-zero pivot at or below row i.
            let pivot = (i..self.nrows).find(|&k| !F::is_zero(&self[(k, j)]));

            let Some(k) = pivot else {
                free_columns.push(j);
                if let Some(s) = steps {
                    s.push(EliminationStep::ColumnSkipped { column: j });
                }
                continue;
            };

            self.swap_rows(i, k);
            if let Some(s) = steps {
                s.push(EliminationStep::PivotSelected {
                    column: j,
                    pivot_row: i,
                    swapped_with: k,
                });
            }

            let x = self[(i, j)].clone();
            if !field.is_one(&x) {
                let inv_x = field.inv(&x);
                for l in j..self.ncols {
                    field.mul_assign(&mut self[(i, l)], &inv_x);
                }
                if let Some(s) = steps {
                    s.push(EliminationStep::RowNormalized {
                        column: j,
                        row: i,
                        divisor: x,
                    });
                }
            }

            // Clear the column in every other row.
            for k in 0..self.nrows {
                if k == i || F::is_zero(&self[(k, j)]) {
                    continue;
                }

                let factor = std::mem::replace(&mut self[(k, j)], field.zero());
                for l in j + 1..self.ncols {
                    let mut e = std::mem::replace(&mut self[(k, l)], field.zero());
                    field.sub_mul_assign(&mut e, &self[(i, l)], &factor);
                    self[(k, l)] = e;
                }
                if let Some(s) = steps {
                    s.push(EliminationStep::RowEliminated {
                        column: j,
                        row: k,
                        pivot_row: i,
                        factor,
                    });
                }
            }

            pivot_columns.push(j);
            i += 1;
            if i == self.nrows {
                free_columns.extend(j + 1..max_col);
                if let Some(s) = steps {
                    for c in j + 1..max_col {
                        s.push(EliminationStep::ColumnSkipped { column: c });
                    }
                }
                break;
            }
        }

        Reduction {
            rank: i,
            pivot_columns,
            free_columns,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::domains::rational::{Q, Rational};
    use crate::matrix::{Matrix, MatrixError, Reduction};

    #[test]
    fn basics() {
        let a = Matrix::from_linear(
            vec![
                1.into(),
                2.into(),
                3.into(),
                4.into(),
                5.into(),
                6.into(),
            ],
            2,
            3,
            Q,
        )
        .unwrap();

        assert_eq!(a.nrows(), 2);
        assert_eq!(a.ncols(), 3);
        assert_eq!(a[(1, 2)], 6);
        assert_eq!(
            &a[1],
            &[Rational::from(4), Rational::from(5), Rational::from(6)]
        );
        assert_eq!(format!("{}", a), "{{1,2,3},{4,5,6}}");

        let mut b = a.clone();
        b.swap_rows(0, 1);
        assert_eq!(&b[0], &a[1]);
        assert_eq!(&b[1], &a[0]);

        assert!(matches!(
            Matrix::from_linear(vec![1.into(), 2.into()], 2, 3, Q),
            Err(MatrixError::ShapeMismatch { data_len: 2, .. })
        ));
        assert!(matches!(
            Matrix::from_nested_vec(vec![vec![1.into(), 2.into()], vec![3.into()]], Q),
            Err(MatrixError::NotRectangular)
        ));
    }

    #[test]
    fn row_reduce() {
        let mut a = Matrix::from_linear(
            vec![
                1.into(),
                2.into(),
                3.into(),
                4.into(),
                5.into(),
                6.into(),
                7.into(),
                8.into(),
                9.into(),
            ],
            3,
            3,
            Q,
        )
        .unwrap();

        let red = a.reduce(3);

        assert_eq!(
            red,
            Reduction {
                rank: 2,
                pivot_columns: vec![0, 1],
                free_columns: vec![2],
            }
        );
        assert_eq!(
            a.data,
            vec![
                Rational::from(1),
                Rational::from(0),
                Rational::from(-1),
                Rational::from(0),
                Rational::from(1),
                Rational::from(2),
                Rational::from(0),
                Rational::from(0),
                Rational::from(0)
            ]
        );
    }

    #[test]
    fn augmented_column_never_pivots() {
        // 0*x = 1: the constant column must not produce a pivot.
        let mut a = Matrix::from_linear(vec![0.into(), 1.into()], 1, 2, Q).unwrap();
        let red = a.reduce(1);

        assert_eq!(red.rank, 0);
        assert_eq!(red.free_columns, vec![0]);
        assert!(!a.is_consistent(1));
    }

    #[test]
    fn consistency() {
        let a = Matrix::from_linear(
            vec![1.into(), 0.into(), 2.into(), 0.into(), 0.into(), 0.into()],
            2,
            3,
            Q,
        )
        .unwrap();
        assert!(a.is_consistent(2));

        let b = Matrix::from_linear(
            vec![1.into(), 0.into(), 2.into(), 0.into(), 0.into(), 5.into()],
            2,
            3,
            Q,
        )
        .unwrap();
        assert!(!b.is_consistent(2));
    }

    #[test]
    fn reduce_is_idempotent() {
        let mut a = Matrix::from_linear(
            vec![
                2.into(),
                4.into(),
                6.into(),
                1.into(),
                3.into(),
                5.into(),
            ],
            2,
            3,
            Q,
        )
        .unwrap();

        let first = a.reduce(2);
        let reduced = a.clone();
        let second = a.reduce(2);

        assert_eq!(first, second);
        assert_eq!(a, reduced);
    }

    #[test]
    fn trace_replays_to_reduced_form() {
        let original = Matrix::from_linear(
            vec![
                0.into(),
                2.into(),
                4.into(),
                3.into(),
                6.into(),
                18.into(),
            ],
            2,
            3,
            Q,
        )
        .unwrap();

        let mut reduced = original.clone();
        let mut steps = vec![];
        let red = reduced.reduce_traced(2, &mut steps);
        assert_eq!(red.rank, 2);
        assert!(!steps.is_empty());

        let mut replay = original.clone();
        for step in &steps {
            step.apply_to(&mut replay);
        }

        assert_eq!(replay, reduced);

        // The untraced reduction produces the same form.
        let mut untraced = original.clone();
        assert_eq!(untraced.reduce(2), red);
        assert_eq!(untraced, reduced);
    }
}
