//! Demo operations dispatched over [`Arma`].
//!
//! - `dims`: rows and columns of any member (scalars are 1x1, vectors n x 1).
//! - `add`: element-wise sum of same-kind operands, plus scalar broadcasting
//!   onto vectors. Mixing real and integer operands is not implemented.
//! - `axpy`: `a * x + y` for a scalar and two vectors, or a real scalar and
//!   two real matrices.
//!
//! Integer arithmetic wraps on overflow.

use multi::{DispatchConfig, DispatchResult, Method, Reveal};
use tracing::debug;

use crate::context::{Arma, ArmaValue};
use crate::dense::{Col, Mat};
use crate::error::ArmaResult;

pub type ArmaMethod<Out> = Method<Arma, Out>;

fn col_dims<T>(v: &Col<T>) -> (usize, usize)
where
    T: Copy,
{
    (v.len(), 1)
}

/// Builds the `dims` method. Every unary signature is implemented.
pub fn dims_method(config: DispatchConfig) -> DispatchResult<ArmaMethod<(usize, usize)>> {
    Method::<Arma, (usize, usize)>::builder_with_config("dims", config)
        .on1(|_: &f64| (1, 1))
        .on1(|_: &i32| (1, 1))
        .on1(col_dims::<f64>)
        .on1(col_dims::<i32>)
        .on1(|m: &Mat<f64>| m.dims())
        .on1(|m: &Mat<i32>| m.dims())
        .build()
}

/// Builds the `add` method.
pub fn add_method(config: DispatchConfig) -> DispatchResult<ArmaMethod<ArmaResult<ArmaValue>>> {
    Method::<Arma, ArmaResult<ArmaValue>>::builder_with_config("add", config)
        .on2(|a: &f64, b: &f64| Ok(ArmaValue::Real(a + b)))
        .on2(|a: &i32, b: &i32| Ok(ArmaValue::Int(a.wrapping_add(*b))))
        .on2(|a: &Col<f64>, b: &Col<f64>| Ok(ArmaValue::Vec(a.zip_with(b, |x, y| x + y)?)))
        .on2(|a: &Col<i32>, b: &Col<i32>| {
            Ok(ArmaValue::IntVec(a.zip_with(b, i32::wrapping_add)?))
        })
        .on2(|a: &Mat<f64>, b: &Mat<f64>| Ok(ArmaValue::Mat(a.zip_with(b, |x, y| x + y)?)))
        .on2(|a: &Mat<i32>, b: &Mat<i32>| {
            Ok(ArmaValue::IntMat(a.zip_with(b, i32::wrapping_add)?))
        })
        .on2(|a: &f64, v: &Col<f64>| Ok(ArmaValue::Vec(v.map(|y| a + y))))
        .on2(|v: &Col<f64>, a: &f64| Ok(ArmaValue::Vec(v.map(|x| x + a))))
        .on2(|a: &i32, v: &Col<i32>| Ok(ArmaValue::IntVec(v.map(|y| a.wrapping_add(y)))))
        .on2(|v: &Col<i32>, a: &i32| Ok(ArmaValue::IntVec(v.map(|x| x.wrapping_add(*a)))))
        .build()
}

/// Builds the `axpy` method.
pub fn axpy_method(config: DispatchConfig) -> DispatchResult<ArmaMethod<ArmaResult<ArmaValue>>> {
    Method::<Arma, ArmaResult<ArmaValue>>::builder_with_config("axpy", config)
        .on3(|a: &f64, x: &Col<f64>, y: &Col<f64>| {
            Ok(ArmaValue::Vec(x.zip_with(y, |xi, yi| a * xi + yi)?))
        })
        .on3(|a: &i32, x: &Col<i32>, y: &Col<i32>| {
            Ok(ArmaValue::IntVec(
                x.zip_with(y, |xi, yi| a.wrapping_mul(xi).wrapping_add(yi))?,
            ))
        })
        .on3(|a: &f64, x: &Mat<f64>, y: &Mat<f64>| {
            Ok(ArmaValue::Mat(x.zip_with(y, |xi, yi| a * xi + yi)?))
        })
        .build()
}

/// The demo methods, built once and shared.
pub struct Ops {
    dims: ArmaMethod<(usize, usize)>,
    add: ArmaMethod<ArmaResult<ArmaValue>>,
    axpy: ArmaMethod<ArmaResult<ArmaValue>>,
}

impl Ops {
    pub fn new() -> DispatchResult<Self> {
        Self::with_config(DispatchConfig::default())
    }

    pub fn with_config(config: DispatchConfig) -> DispatchResult<Self> {
        let ops = Self {
            dims: dims_method(config.clone())?,
            add: add_method(config.clone())?,
            axpy: axpy_method(config)?,
        };
        debug!(
            "arma ops ready ({} + {} + {} table entries)",
            ops.dims.table_len(),
            ops.add.table_len(),
            ops.axpy.table_len()
        );
        Ok(ops)
    }

    pub fn dims(&self, x: &dyn Reveal<Arma>) -> ArmaResult<(usize, usize)> {
        Ok(self.dims.call(&[x])?)
    }

    pub fn add(&self, lhs: &dyn Reveal<Arma>, rhs: &dyn Reveal<Arma>) -> ArmaResult<ArmaValue> {
        self.add.call(&[lhs, rhs])?
    }

    pub fn axpy(
        &self,
        a: &dyn Reveal<Arma>,
        x: &dyn Reveal<Arma>,
        y: &dyn Reveal<Arma>,
    ) -> ArmaResult<ArmaValue> {
        self.axpy.call(&[a, x, y])?
    }

    pub fn dims_method(&self) -> &ArmaMethod<(usize, usize)> {
        &self.dims
    }

    pub fn add_method(&self) -> &ArmaMethod<ArmaResult<ArmaValue>> {
        &self.add
    }

    pub fn axpy_method(&self) -> &ArmaMethod<ArmaResult<ArmaValue>> {
        &self.axpy
    }
}
