//! Method tables.
//!
//! A [`Method`] maps every [`Signature`] up to its maximum arity to exactly one
//! handler. Handlers registered through [`MethodBuilder`] take precedence; every
//! signature left uncovered is bound to a shared fallback when the table is
//! built, so coverage is known before the first call.

use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::config::{DispatchConfig, FallbackPolicy};

use super::chain::ArgList;
use super::coverage::CoverageReport;
use super::driver::Driver;
use super::result::{DispatchError, DispatchResult};
use super::types::{Member, Signature, TypeSet};
use super::visitor::Reveal;

/// A callable bound to one signature.
pub trait Handler<S: TypeSet, Out>: Send + Sync {
    fn call<'a>(&self, args: &[S::Arg<'a>]) -> DispatchResult<Out>;
}

/// Fetches argument `position` as `T`.
fn downcast<'a, S, T>(args: &[S::Arg<'a>], position: usize) -> DispatchResult<&'a T>
where
    S: TypeSet,
    T: Member<S>,
{
    let arg = *args.get(position).ok_or(DispatchError::Incomplete {
        expected: position + 1,
        found: args.len(),
    })?;
    T::from_arg(arg).ok_or_else(|| DispatchError::ArgMismatch {
        position,
        expected: T::TAG.to_string(),
        found: S::tag_of(&arg).to_string(),
    })
}

struct Unary<A, F> {
    f: F,
    _args: PhantomData<fn(&A)>,
}

impl<S, Out, A, F> Handler<S, Out> for Unary<A, F>
where
    S: TypeSet,
    A: Member<S>,
    F: Fn(&A) -> Out + Send + Sync,
{
    fn call<'a>(&self, args: &[S::Arg<'a>]) -> DispatchResult<Out> {
        let a = downcast::<S, A>(args, 0)?;
        Ok((self.f)(a))
    }
}

struct Binary<A, B, F> {
    f: F,
    _args: PhantomData<fn(&A, &B)>,
}

impl<S, Out, A, B, F> Handler<S, Out> for Binary<A, B, F>
where
    S: TypeSet,
    A: Member<S>,
    B: Member<S>,
    F: Fn(&A, &B) -> Out + Send + Sync,
{
    fn call<'a>(&self, args: &[S::Arg<'a>]) -> DispatchResult<Out> {
        let a = downcast::<S, A>(args, 0)?;
        let b = downcast::<S, B>(args, 1)?;
        Ok((self.f)(a, b))
    }
}

struct Ternary<A, B, C, F> {
    f: F,
    _args: PhantomData<fn(&A, &B, &C)>,
}

impl<S, Out, A, B, C, F> Handler<S, Out> for Ternary<A, B, C, F>
where
    S: TypeSet,
    A: Member<S>,
    B: Member<S>,
    C: Member<S>,
    F: Fn(&A, &B, &C) -> Out + Send + Sync,
{
    fn call<'a>(&self, args: &[S::Arg<'a>]) -> DispatchResult<Out> {
        let a = downcast::<S, A>(args, 0)?;
        let b = downcast::<S, B>(args, 1)?;
        let c = downcast::<S, C>(args, 2)?;
        Ok((self.f)(a, b, c))
    }
}

/// Handler for arities above three; receives the raw tagged arguments.
struct Variadic<F> {
    f: F,
}

impl<S, Out, F> Handler<S, Out> for Variadic<F>
where
    S: TypeSet,
    F: for<'a> Fn(&[S::Arg<'a>]) -> Out + Send + Sync,
{
    fn call<'a>(&self, args: &[S::Arg<'a>]) -> DispatchResult<Out> {
        Ok((self.f)(args))
    }
}

/// The synthetic handler bound to every signature without a user handler.
struct Fallback {
    method: Arc<str>,
    policy: FallbackPolicy,
}

impl<S: TypeSet, Out> Handler<S, Out> for Fallback {
    fn call<'a>(&self, args: &[S::Arg<'a>]) -> DispatchResult<Out> {
        let signature = Signature::of::<S>(args);
        warn!("no implementation of `{}` for {}", self.method, signature);

        let err = DispatchError::Unimplemented {
            method: self.method.to_string(),
            signature: signature.to_string(),
        };
        match self.policy {
            FallbackPolicy::Error => Err(err),
            FallbackPolicy::Panic => panic!("{}", err),
        }
    }
}

/// Registers handlers for a [`Method`].
pub struct MethodBuilder<S: TypeSet, Out> {
    name: String,
    config: DispatchConfig,
    handlers: Vec<(Signature<S::Tag>, Arc<dyn Handler<S, Out>>)>,
    declared: IndexSet<Signature<S::Tag>>,
    error: Option<DispatchError>,
}

impl<S: TypeSet, Out: 'static> MethodBuilder<S, Out> {
    fn new(name: impl Into<String>, config: DispatchConfig) -> Self {
        Self {
            name: name.into(),
            config,
            handlers: Vec::new(),
            declared: IndexSet::new(),
            error: None,
        }
    }

    /// Registers the handler for the single-argument signature `(A)`.
    pub fn on1<A, F>(self, f: F) -> Self
    where
        A: Member<S>,
        F: Fn(&A) -> Out + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![A::TAG]);
        self.register(signature, Unary { f, _args: PhantomData })
    }

    /// Registers the handler for `(A, B)`.
    pub fn on2<A, B, F>(self, f: F) -> Self
    where
        A: Member<S>,
        B: Member<S>,
        F: Fn(&A, &B) -> Out + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![A::TAG, B::TAG]);
        self.register(signature, Binary { f, _args: PhantomData })
    }

    /// Registers the handler for `(A, B, C)`.
    pub fn on3<A, B, C, F>(self, f: F) -> Self
    where
        A: Member<S>,
        B: Member<S>,
        C: Member<S>,
        F: Fn(&A, &B, &C) -> Out + Send + Sync + 'static,
    {
        let signature = Signature::new(vec![A::TAG, B::TAG, C::TAG]);
        self.register(signature, Ternary { f, _args: PhantomData })
    }

    /// Registers a handler for an explicit signature of any arity.
    ///
    /// The handler receives the tagged arguments and downcasts them itself
    /// with [`Member::from_arg`].
    pub fn on_signature<F>(self, signature: Signature<S::Tag>, f: F) -> Self
    where
        F: for<'a> Fn(&[S::Arg<'a>]) -> Out + Send + Sync + 'static,
    {
        self.register(signature, Variadic { f })
    }

    /// Registers a custom [`Handler`] for `signature`.
    pub fn on_handler<H>(self, signature: Signature<S::Tag>, handler: H) -> Self
    where
        H: Handler<S, Out> + 'static,
    {
        self.register(signature, handler)
    }

    fn register<H>(mut self, signature: Signature<S::Tag>, handler: H) -> Self
    where
        H: Handler<S, Out> + 'static,
    {
        if self.error.is_some() {
            return self;
        }
        let arity = signature.arity();
        if arity == 0 || arity > self.config.max_arity {
            self.error = Some(DispatchError::UnsupportedArity {
                arity,
                max: self.config.max_arity,
            });
            return self;
        }
        if !self.declared.insert(signature.clone()) {
            self.error = Some(DispatchError::DuplicateHandler {
                method: self.name.clone(),
                signature: signature.to_string(),
            });
            return self;
        }

        debug!("`{}`: registered handler for {}", self.name, signature);
        let handler: Arc<dyn Handler<S, Out>> = Arc::new(handler);
        self.handlers.push((signature, handler));
        self
    }

    /// Builds the table, binding the fallback to every uncovered signature.
    ///
    /// Fails with the first registration error, if any.
    pub fn build(self) -> DispatchResult<Method<S, Out>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.config.validate()?;

        let name: Arc<str> = Arc::from(self.name);
        let fallback: Arc<dyn Handler<S, Out>> = Arc::new(Fallback {
            method: Arc::clone(&name),
            policy: self.config.fallback,
        });

        let mut table: FxHashMap<Signature<S::Tag>, Arc<dyn Handler<S, Out>>> =
            self.handlers.into_iter().collect();
        let handler_count = table.len();
        for arity in 1..=self.config.max_arity {
            for signature in Signature::enumerate(S::TAGS, arity) {
                table
                    .entry(signature)
                    .or_insert_with(|| Arc::clone(&fallback));
            }
        }

        info!(
            "built `{}` over {}: {} handlers, {} fallback signatures",
            name,
            S::NAME,
            handler_count,
            table.len() - handler_count
        );

        Ok(Method {
            name,
            config: self.config,
            table,
            declared: self.declared,
            fallback,
        })
    }
}

/// A multimethod over the closed set `S`, returning `Out`.
pub struct Method<S: TypeSet, Out> {
    name: Arc<str>,
    config: DispatchConfig,
    table: FxHashMap<Signature<S::Tag>, Arc<dyn Handler<S, Out>>>,
    declared: IndexSet<Signature<S::Tag>>,
    fallback: Arc<dyn Handler<S, Out>>,
}

impl<S: TypeSet, Out: 'static> Method<S, Out> {
    /// Starts a method with the default configuration.
    pub fn builder(name: impl Into<String>) -> MethodBuilder<S, Out> {
        MethodBuilder::new(name, DispatchConfig::default())
    }

    pub fn builder_with_config(
        name: impl Into<String>,
        config: DispatchConfig,
    ) -> MethodBuilder<S, Out> {
        MethodBuilder::new(name, config)
    }
}

impl<S: TypeSet, Out> Method<S, Out> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn max_arity(&self) -> usize {
        self.config.max_arity
    }

    /// Returns true if a user handler is registered for `signature`.
    pub fn is_implemented(&self, signature: &Signature<S::Tag>) -> bool {
        self.declared.contains(signature)
    }

    /// User-registered signatures, in registration order.
    pub fn implemented(&self) -> impl Iterator<Item = &Signature<S::Tag>> {
        self.declared.iter()
    }

    /// Number of signatures in the table, fallback entries included.
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Which signatures of `arity` have user handlers and which fall back.
    pub fn coverage(&self, arity: usize) -> DispatchResult<CoverageReport<S::Tag>> {
        self.check_arity(arity)?;
        let (implemented, missing): (Vec<_>, Vec<_>) = Signature::enumerate(S::TAGS, arity)
            .into_iter()
            .partition(|sig| self.is_implemented(sig));
        Ok(CoverageReport::new(
            self.name.to_string(),
            arity,
            implemented,
            missing,
        ))
    }

    /// Starts one dispatch of `arity` arguments whose result is written to
    /// `slot`.
    pub fn begin<'m, 'a, 's>(
        &'m self,
        arity: usize,
        slot: &'s mut Option<Out>,
    ) -> DispatchResult<Driver<'m, 'a, 's, S, Out>> {
        self.check_arity(arity)?;
        debug!("`{}`: begin dispatch of arity {}", self.name, arity);
        Ok(Driver::new(self, ArgList::new(arity), slot))
    }

    /// Dispatches on `handles` in order and returns the handler's result.
    pub fn call(&self, handles: &[&dyn Reveal<S>]) -> DispatchResult<Out> {
        let mut slot = None;
        let mut driver = self.begin(handles.len(), &mut slot)?;
        for handle in handles {
            driver.feed(*handle)?;
        }
        driver.finalize()?;
        slot.ok_or(DispatchError::Incomplete {
            expected: handles.len(),
            found: 0,
        })
    }

    /// Looks up and runs the handler for the signature of `args`.
    pub(crate) fn invoke<'a>(&self, args: &[S::Arg<'a>]) -> DispatchResult<Out> {
        let signature = Signature::of::<S>(args);
        let handler = self.table.get(&signature).unwrap_or(&self.fallback);
        handler.call(args)
    }

    fn check_arity(&self, arity: usize) -> DispatchResult<()> {
        if arity == 0 || arity > self.config.max_arity {
            return Err(DispatchError::UnsupportedArity {
                arity,
                max: self.config.max_arity,
            });
        }
        Ok(())
    }
}
