//! Argument accumulation.
//!
//! An [`ArgList`] records the revealed arguments of one call. Each
//! [`ArgList::add_arg`] consumes the node and returns the next one, so a node
//! can be advanced or finalized only once.

use std::fmt;

use super::method::Method;
use super::result::{DispatchError, DispatchResult};
use super::types::{Signature, TypeSet};

/// The arguments collected so far for one call.
pub struct ArgList<'a, S: TypeSet> {
    arity: usize,
    args: Vec<S::Arg<'a>>,
}

impl<'a, S: TypeSet> ArgList<'a, S> {
    /// An empty list that will accept `arity` arguments.
    pub fn new(arity: usize) -> Self {
        Self {
            arity,
            args: Vec::with_capacity(arity),
        }
    }

    /// Number of arguments collected.
    pub fn depth(&self) -> usize {
        self.args.len()
    }

    /// Number of arguments the list accepts.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_full(&self) -> bool {
        self.args.len() >= self.arity
    }

    pub fn args(&self) -> &[S::Arg<'a>] {
        &self.args
    }

    /// Tags of the arguments collected so far.
    pub fn signature(&self) -> Signature<S::Tag> {
        Signature::of::<S>(&self.args)
    }

    /// Appends the next argument.
    #[must_use = "add_arg consumes the list and returns the extended one"]
    pub fn add_arg(self, arg: S::Arg<'a>) -> DispatchResult<Self> {
        if self.is_full() {
            return Err(DispatchError::ArityExceeded { arity: self.arity });
        }
        let mut args = self.args;
        args.push(arg);
        Ok(Self {
            arity: self.arity,
            args,
        })
    }

    /// Calls the handler of `method` registered for the collected signature.
    pub fn finalize<Out>(self, method: &Method<S, Out>) -> DispatchResult<Out> {
        if !self.is_full() {
            return Err(DispatchError::Incomplete {
                expected: self.arity,
                found: self.args.len(),
            });
        }
        method.invoke(&self.args)
    }
}

impl<S: TypeSet> Clone for ArgList<'_, S> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            args: self.args.clone(),
        }
    }
}

impl<S: TypeSet> fmt::Debug for ArgList<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgList")
            .field("arity", &self.arity)
            .field("args", &self.args)
            .finish()
    }
}
