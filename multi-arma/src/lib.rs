//! Numeric dispatch over scalars, vectors and matrices.
//!
//! [`Arma`] is a closed set of six member types: real and integer scalars,
//! column vectors and column-major matrices. [`ArmaContext`] wraps caller
//! memory into a dispatchable handle; [`Ops`] carries a few methods
//! dispatched on the runtime types of their arguments.
//!
//! ```
//! use multi_arma::{ArmaContext, ArmaValue, Col, Ops};
//!
//! let ops = Ops::new().unwrap();
//! let two = 2.0;
//! let sum = ops
//!     .add(&ArmaContext::real(&two), &ArmaContext::vec(&[1.0, 2.0]))
//!     .unwrap();
//! assert_eq!(sum, ArmaValue::Vec(Col::from_slice(&[3.0, 4.0])));
//! ```

pub mod context;
pub mod dense;
pub mod error;
pub mod ops;

pub use context::{Arma, ArmaArg, ArmaContext, ArmaType, ArmaValue, ArmaVisitor};
pub use dense::{Col, Mat};
pub use error::{ArmaError, ArmaResult};
pub use ops::{add_method, axpy_method, dims_method, ArmaMethod, Ops};
