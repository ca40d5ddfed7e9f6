use alloc::vec::Vec;
use core::fmt;
use core::fmt::Write as _;

use crate::traits::Scalar;

use super::DynMatrix;

impl<T: Copy> DynMatrix<T> {
    /// Apply `f` to every element, producing a new matrix.
    ///
    /// ```
    /// use echelon::{Complex, DynMatrix};
    /// let m = DynMatrix::from_rows(1, 2, &[1.0_f64, 2.0]);
    /// let z = m.map(Complex::from_real);
    /// assert_eq!(z[(0, 1)], Complex::new(2.0, 0.0));
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> DynMatrix<U> {
        DynMatrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<T> {
        assert!(i < self.nrows, "row index {} out of bounds for {} rows", i, self.nrows);
        self.data[i * self.ncols..(i + 1) * self.ncols].to_vec()
    }

    /// Copy of column `j`.
    pub fn col(&self, j: usize) -> Vec<T> {
        assert!(j < self.ncols, "column index {} out of bounds for {} columns", j, self.ncols);
        (0..self.nrows).map(|i| self.data[i * self.ncols + j]).collect()
    }

    /// All columns, left to right.
    pub fn columns(&self) -> Vec<Vec<T>> {
        (0..self.ncols).map(|j| self.col(j)).collect()
    }
}

impl<T: Scalar> DynMatrix<T> {
    /// Overwrite column `j` with `values`.
    pub fn set_col(&mut self, j: usize, values: &[T]) {
        assert_eq!(values.len(), self.nrows, "column length mismatch");
        for (i, &v) in values.iter().enumerate() {
            self[(i, j)] = v;
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        // Measure column widths
        let mut widths: Vec<usize> = alloc::vec![0; n];
        for j in 0..n {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                if w > widths[j] {
                    widths[j] = w;
                }
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = widths[j])?;
            }
            write!(f, "│")?;
            if i + 1 < m {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

pub(crate) struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    pub(crate) fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}
