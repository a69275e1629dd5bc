//! The numeric type set, its context holders and owned results.
//!
//! An [`ArmaContext`] is what a caller hands to a dispatched operation: it
//! wraps caller-owned memory (a scalar by reference, or a buffer copied into a
//! dense container) and reveals exactly one member of [`Arma`] when visited.

use multi::{Reveal, Visitor};
use tracing::trace;

use crate::dense::{Col, Mat};
use crate::error::{ArmaError, ArmaResult};

multi::type_set! {
    /// Real and integer scalars, column vectors and matrices.
    pub set Arma {
        tag ArmaType;
        arg ArmaArg;
        visitor ArmaVisitor;
        Real(f64) => visit_real,
        Vec(Col<f64>) => visit_vec,
        Mat(Mat<f64>) => visit_mat,
        Int(i32) => visit_int,
        IntVec(Col<i32>) => visit_ivec,
        IntMat(Mat<i32>) => visit_imat,
    }
}

#[derive(Debug, Clone)]
enum Held<'a> {
    Real(&'a f64),
    Int(&'a i32),
    Vec(Col<f64>),
    IntVec(Col<i32>),
    Mat(Mat<f64>),
    IntMat(Mat<i32>),
}

/// A dispatchable handle over caller-provided data.
#[derive(Debug, Clone)]
pub struct ArmaContext<'a> {
    held: Held<'a>,
}

impl<'a> ArmaContext<'a> {
    pub fn real(value: &'a f64) -> Self {
        Self {
            held: Held::Real(value),
        }
    }

    pub fn int(value: &'a i32) -> Self {
        Self {
            held: Held::Int(value),
        }
    }

    /// Takes the first element of a buffer as a real scalar.
    pub fn real_from_buffer(buffer: &'a [f64]) -> ArmaResult<Self> {
        buffer.first().map(Self::real).ok_or(ArmaError::EmptyBuffer)
    }

    /// Takes the first element of a buffer as an integer scalar.
    pub fn int_from_buffer(buffer: &'a [i32]) -> ArmaResult<Self> {
        buffer.first().map(Self::int).ok_or(ArmaError::EmptyBuffer)
    }

    pub fn vec(data: &[f64]) -> Self {
        Self {
            held: Held::Vec(Col::from_slice(data)),
        }
    }

    pub fn ivec(data: &[i32]) -> Self {
        Self {
            held: Held::IntVec(Col::from_slice(data)),
        }
    }

    /// Wraps a column-major buffer of `n_rows * n_cols` reals.
    pub fn mat(data: &[f64], n_rows: usize, n_cols: usize) -> ArmaResult<Self> {
        trace!("real matrix context {}x{}", n_rows, n_cols);
        Ok(Self {
            held: Held::Mat(Mat::from_column_major(data, n_rows, n_cols)?),
        })
    }

    /// Wraps a column-major buffer of `n_rows * n_cols` integers.
    pub fn imat(data: &[i32], n_rows: usize, n_cols: usize) -> ArmaResult<Self> {
        trace!("integer matrix context {}x{}", n_rows, n_cols);
        Ok(Self {
            held: Held::IntMat(Mat::from_column_major(data, n_rows, n_cols)?),
        })
    }

    pub fn arma_type(&self) -> ArmaType {
        match &self.held {
            Held::Real(_) => ArmaType::Real,
            Held::Int(_) => ArmaType::Int,
            Held::Vec(_) => ArmaType::Vec,
            Held::IntVec(_) => ArmaType::IntVec,
            Held::Mat(_) => ArmaType::Mat,
            Held::IntMat(_) => ArmaType::IntMat,
        }
    }
}

impl Reveal<Arma> for ArmaContext<'_> {
    fn reveal<'v>(&'v self, visitor: &mut dyn Visitor<'v, Arma>) {
        match &self.held {
            Held::Real(x) => visitor.visit_real(x),
            Held::Int(x) => visitor.visit_int(x),
            Held::Vec(v) => visitor.visit_vec(v),
            Held::IntVec(v) => visitor.visit_ivec(v),
            Held::Mat(m) => visitor.visit_mat(m),
            Held::IntMat(m) => visitor.visit_imat(m),
        }
    }
}

/// An owned member of [`Arma`], as produced by the demo operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ArmaValue {
    Real(f64),
    Vec(Col<f64>),
    Mat(Mat<f64>),
    Int(i32),
    IntVec(Col<i32>),
    IntMat(Mat<i32>),
}

impl ArmaValue {
    pub fn arma_type(&self) -> ArmaType {
        match self {
            ArmaValue::Real(_) => ArmaType::Real,
            ArmaValue::Vec(_) => ArmaType::Vec,
            ArmaValue::Mat(_) => ArmaType::Mat,
            ArmaValue::Int(_) => ArmaType::Int,
            ArmaValue::IntVec(_) => ArmaType::IntVec,
            ArmaValue::IntMat(_) => ArmaType::IntMat,
        }
    }
}

// Results can be fed back into further calls.
impl Reveal<Arma> for ArmaValue {
    fn reveal<'v>(&'v self, visitor: &mut dyn Visitor<'v, Arma>) {
        match self {
            ArmaValue::Real(x) => visitor.visit_real(x),
            ArmaValue::Vec(v) => visitor.visit_vec(v),
            ArmaValue::Mat(m) => visitor.visit_mat(m),
            ArmaValue::Int(x) => visitor.visit_int(x),
            ArmaValue::IntVec(v) => visitor.visit_ivec(v),
            ArmaValue::IntMat(m) => visitor.visit_imat(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multi::{Signature, TagCollector, TypeSet};

    #[test]
    fn test_declaration_order() {
        assert_eq!(Arma::NAME, "Arma");
        assert_eq!(
            Arma::TAGS,
            &[
                ArmaType::Real,
                ArmaType::Vec,
                ArmaType::Mat,
                ArmaType::Int,
                ArmaType::IntVec,
                ArmaType::IntMat,
            ]
        );
    }

    #[test]
    fn test_context_reveals_its_type() {
        let x = 2.5;
        let n = 7;
        let contexts = [
            ArmaContext::real(&x),
            ArmaContext::int(&n),
            ArmaContext::vec(&[1.0, 2.0]),
            ArmaContext::ivec(&[1, 2]),
            ArmaContext::mat(&[1.0; 6], 2, 3).unwrap(),
            ArmaContext::imat(&[1; 4], 2, 2).unwrap(),
        ];
        for ctx in &contexts {
            assert_eq!(TagCollector::<Arma>::tag_of(ctx), Some(ctx.arma_type()));
        }
    }

    #[test]
    fn test_scalar_borrows_caller_memory() {
        let x = 4.0;
        let ctx = ArmaContext::real(&x);
        let mut seen = None;
        struct Grab<'a, 'b>(&'b mut Option<&'a f64>);
        impl<'a> Visitor<'a, Arma> for Grab<'a, '_> {
            fn visit(&mut self, arg: ArmaArg<'a>) {
                if let ArmaArg::Real(x) = arg {
                    *self.0 = Some(x);
                }
            }
        }
        ctx.reveal(&mut Grab(&mut seen));
        assert!(std::ptr::eq(seen.unwrap(), &x));
    }

    #[test]
    fn test_buffer_scalars() {
        let buffer = [3.0, 9.0];
        let ctx = ArmaContext::real_from_buffer(&buffer).unwrap();
        assert_eq!(ctx.arma_type(), ArmaType::Real);
        assert!(matches!(
            ArmaContext::int_from_buffer(&[]),
            Err(ArmaError::EmptyBuffer)
        ));
    }

    #[test]
    fn test_matrix_shape_checked() {
        assert!(matches!(
            ArmaContext::imat(&[1, 2, 3], 2, 2),
            Err(ArmaError::Shape { len: 3, .. })
        ));
    }

    #[test]
    fn test_value_signature() {
        let a = ArmaValue::Int(1);
        let b = ArmaValue::Vec(Col::from_slice(&[1.0]));
        let tags = [
            TagCollector::<Arma>::tag_of(&a).unwrap(),
            TagCollector::<Arma>::tag_of(&b).unwrap(),
        ];
        assert_eq!(Signature::new(tags.to_vec()).to_string(), "(Int, Vec)");
        assert_eq!(b.arma_type(), ArmaType::Vec);
    }
}
