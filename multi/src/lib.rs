//! Runtime multiple dispatch over a closed set of types.
//!
//! Declare the set with [`type_set!`], build a [`Method`] from typed handlers,
//! and call it with handles implementing [`Reveal`]:
//!
//! ```
//! use multi::{Method, Reveal, Visitor};
//!
//! multi::type_set! {
//!     pub set Num {
//!         tag NumType;
//!         arg NumArg;
//!         visitor NumVisitor;
//!         Int(i64) => visit_int,
//!         Real(f64) => visit_real,
//!     }
//! }
//!
//! enum Value {
//!     Int(i64),
//!     Real(f64),
//! }
//!
//! impl Reveal<Num> for Value {
//!     fn reveal<'a>(&'a self, visitor: &mut dyn Visitor<'a, Num>) {
//!         match self {
//!             Value::Int(v) => visitor.visit_int(v),
//!             Value::Real(v) => visitor.visit_real(v),
//!         }
//!     }
//! }
//!
//! let both = Method::<Num, &'static str>::builder("both")
//!     .on2(|_: &i64, _: &i64| "both-int")
//!     .on2(|_: &f64, _: &f64| "both-real")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(both.call(&[&Value::Int(3), &Value::Int(4)]).unwrap(), "both-int");
//! assert!(both.call(&[&Value::Int(3), &Value::Real(4.0)]).is_err());
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod dispatch;

pub use config::{DispatchConfig, FallbackPolicy, ARITY_LIMIT};
pub use dispatch::{
    ArgList, CoverageReport, DispatchError, DispatchResult, Driver, Handler, Member, Method,
    MethodBuilder, Reveal, Signature, TagCollector, TypeSet, Visitor,
};
