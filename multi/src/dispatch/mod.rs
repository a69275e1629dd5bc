//! Multiple dispatch over a closed set of types.
//!
//! A call's implementation is chosen from the runtime types of all of its
//! arguments. Arguments arrive as type-erased handles that can only *reveal*
//! their concrete type to a visitor.
//!
//! # Flow
//!
//! 1. **Begin**: [`Method::begin`] creates a [`Driver`] for a given arity
//! 2. **Feed**: each handle reveals its member into the driver, extending the
//!    driver's [`ArgList`] by one tagged argument
//! 3. **Finalize**: the accumulated [`Signature`] selects the handler, which
//!    is either the user's or the fallback bound when the table was built
//!
//! # Module Structure
//!
//! - [`types`] - `TypeSet`, `Member`, `Signature`
//! - [`visitor`] - the reveal protocol
//! - [`chain`] - argument accumulation
//! - [`method`] - method tables, handlers and the fallback
//! - [`driver`] - the per-call driver
//! - [`coverage`] - coverage reports
//! - [`result`] - dispatch errors

pub mod chain;
pub mod coverage;
pub mod driver;
pub mod method;
pub mod result;
pub mod types;
pub mod visitor;


pub use chain::ArgList;
pub use coverage::CoverageReport;
pub use driver::Driver;
pub use method::{Handler, Method, MethodBuilder};
pub use result::{DispatchError, DispatchResult};
pub use types::{Member, Signature, TypeSet};
pub use visitor::{Reveal, TagCollector, Visitor};
