//! Errors for holder construction and the demo operations.

use multi::DispatchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArmaError {
    #[error("buffer of {len} elements cannot hold a {n_rows}x{n_cols} matrix")]
    Shape {
        len: usize,
        n_rows: usize,
        n_cols: usize,
    },

    #[error("empty buffer where a scalar was expected")]
    EmptyBuffer,

    #[error("length mismatch: {left} vs {right}")]
    Length { left: usize, right: usize },

    #[error("dimension mismatch: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    Dims {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

pub type ArmaResult<T> = Result<T, ArmaError>;
