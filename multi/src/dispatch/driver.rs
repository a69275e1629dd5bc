//! The per-call dispatch driver.

use tracing::{debug, trace};

use super::chain::ArgList;
use super::method::Method;
use super::result::{DispatchError, DispatchResult};
use super::types::TypeSet;
use super::visitor::{Reveal, Visitor};

/// Drives one dispatch: fed one handle per position, then finalized.
///
/// Created by [`Method::begin`]. Each [`feed`](Driver::feed) reveals a handle
/// into the driver, which appends the revealed argument to its [`ArgList`].
/// [`finalize`](Driver::finalize) consumes the driver, so it cannot be reused
/// across calls.
pub struct Driver<'m, 'a, 's, S: TypeSet, Out> {
    method: &'m Method<S, Out>,
    /// `None` once a failed step has consumed the list.
    chain: Option<ArgList<'a, S>>,
    slot: &'s mut Option<Out>,
    /// Visits observed during the current `feed`.
    visits: usize,
    fault: Option<DispatchError>,
}

impl<'m, 'a, 's, S: TypeSet, Out> Driver<'m, 'a, 's, S, Out> {
    pub(crate) fn new(
        method: &'m Method<S, Out>,
        chain: ArgList<'a, S>,
        slot: &'s mut Option<Out>,
    ) -> Self {
        Self {
            method,
            chain: Some(chain),
            slot,
            visits: 0,
            fault: None,
        }
    }

    /// Number of arguments fed so far.
    pub fn depth(&self) -> usize {
        self.chain.as_ref().map_or(0, ArgList::depth)
    }

    /// Number of arguments this dispatch expects.
    pub fn arity(&self) -> usize {
        self.chain.as_ref().map_or(0, ArgList::arity)
    }

    /// Returns true once every position has been fed.
    pub fn is_ready(&self) -> bool {
        self.chain.as_ref().is_some_and(ArgList::is_full)
    }

    /// Reveals `handle` as the argument for the next position.
    pub fn feed<R>(&mut self, handle: &'a R) -> DispatchResult<()>
    where
        R: Reveal<S> + ?Sized,
    {
        let chain = self.chain.as_ref().ok_or(DispatchError::Poisoned)?;
        if chain.is_full() {
            return Err(DispatchError::ArityExceeded {
                arity: chain.arity(),
            });
        }
        let position = chain.depth();

        self.visits = 0;
        handle.reveal(self);

        if self.visits != 1 {
            self.chain = None;
            return Err(DispatchError::RevealContract {
                position,
                calls: self.visits,
            });
        }
        if let Some(err) = self.fault.take() {
            return Err(err);
        }
        debug!(
            "`{}`: fed position {} of {}",
            self.method.name(),
            position,
            self.arity()
        );
        Ok(())
    }

    /// Runs the handler for the accumulated signature and stores its result
    /// in the caller's slot.
    pub fn finalize(self) -> DispatchResult<()> {
        let chain = self.chain.ok_or(DispatchError::Poisoned)?;
        debug!(
            "`{}`: finalizing {}",
            self.method.name(),
            chain.signature()
        );
        let out = chain.finalize(self.method)?;
        *self.slot = Some(out);
        Ok(())
    }
}

impl<'a, S: TypeSet, Out> Visitor<'a, S> for Driver<'_, 'a, '_, S, Out> {
    fn visit(&mut self, arg: S::Arg<'a>) {
        self.visits += 1;
        if self.visits > 1 {
            return;
        }
        if self.method.config().trace_args {
            trace!("`{}` arg {}: {:?}", self.method.name(), self.depth(), arg);
        }

        let Some(chain) = self.chain.take() else {
            return;
        };
        match chain.add_arg(arg) {
            Ok(next) => self.chain = Some(next),
            Err(err) => self.fault = Some(err),
        }
    }
}
