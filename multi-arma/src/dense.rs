//! Dense column vectors and column-major matrices.

use crate::error::{ArmaError, ArmaResult};

/// A column vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Col<T> {
    data: Vec<T>,
}

impl<T: Copy> Col<T> {
    /// Copies `data` into a new vector.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.data.get(index).copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Col<U> {
        Col {
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Combines two vectors element by element.
    pub fn zip_with<U>(&self, other: &Col<T>, f: impl Fn(T, T) -> U) -> ArmaResult<Col<U>> {
        if self.len() != other.len() {
            return Err(ArmaError::Length {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(Col {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }
}

impl<T> From<Vec<T>> for Col<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// A matrix stored column by column.
#[derive(Debug, Clone, PartialEq)]
pub struct Mat<T> {
    data: Vec<T>,
    n_rows: usize,
    n_cols: usize,
}

impl<T: Copy> Mat<T> {
    /// Copies a column-major buffer of `n_rows * n_cols` elements.
    pub fn from_column_major(data: &[T], n_rows: usize, n_cols: usize) -> ArmaResult<Self> {
        if n_rows.checked_mul(n_cols) != Some(data.len()) {
            return Err(ArmaError::Shape {
                len: data.len(),
                n_rows,
                n_cols,
            });
        }
        Ok(Self {
            data: data.to_vec(),
            n_rows,
            n_cols,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.n_rows || col >= self.n_cols {
            return None;
        }
        self.data.get(col * self.n_rows + row).copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Mat<U> {
        Mat {
            data: self.data.iter().map(|&x| f(x)).collect(),
            n_rows: self.n_rows,
            n_cols: self.n_cols,
        }
    }

    /// Combines two matrices of equal dimensions element by element.
    pub fn zip_with<U>(&self, other: &Mat<T>, f: impl Fn(T, T) -> U) -> ArmaResult<Mat<U>> {
        if self.dims() != other.dims() {
            return Err(ArmaError::Dims {
                left: self.dims(),
                right: other.dims(),
            });
        }
        Ok(Mat {
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
            n_rows: self.n_rows,
            n_cols: self.n_cols,
        })
    }
}
