//! The reveal protocol between type-erased handles and visitors.

use super::types::TypeSet;

/// Receives the concrete member held by a [`Reveal`] handle.
///
/// Sets declared with [`type_set!`](crate::type_set) also get a typed visitor
/// trait (`visit_real`, `visit_int`, ...) that every `Visitor` implements and
/// that forwards here.
pub trait Visitor<'a, S: TypeSet> {
    /// Called exactly once per [`Reveal::reveal`].
    fn visit(&mut self, arg: S::Arg<'a>);
}

/// A type-erased value that can reveal its concrete member type.
///
/// Implementations must call the visitor exactly once, with the member they
/// hold. The value only needs to stay valid for the borrow passed to
/// `reveal`; whether it is held by reference or by value is up to the handle.
pub trait Reveal<S: TypeSet> {
    fn reveal<'a>(&'a self, visitor: &mut dyn Visitor<'a, S>);
}

impl<S: TypeSet, R: Reveal<S> + ?Sized> Reveal<S> for &R {
    fn reveal<'a>(&'a self, visitor: &mut dyn Visitor<'a, S>) {
        (**self).reveal(visitor)
    }
}

impl<S: TypeSet, R: Reveal<S> + ?Sized> Reveal<S> for Box<R> {
    fn reveal<'a>(&'a self, visitor: &mut dyn Visitor<'a, S>) {
        (**self).reveal(visitor)
    }
}

/// Collects revealed tags without keeping the values.
#[derive(Debug)]
pub struct TagCollector<S: TypeSet> {
    tags: Vec<S::Tag>,
}

impl<S: TypeSet> TagCollector<S> {
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Reveals `handle` into the collector and returns its tag, if it
    /// revealed exactly one member.
    pub fn tag_of<R: Reveal<S> + ?Sized>(handle: &R) -> Option<S::Tag> {
        let mut collector = Self::new();
        handle.reveal(&mut collector);
        match collector.tags.as_slice() {
            [tag] => Some(*tag),
            _ => None,
        }
    }

    pub fn tags(&self) -> &[S::Tag] {
        &self.tags
    }
}

impl<S: TypeSet> Default for TagCollector<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: TypeSet> Visitor<'a, S> for TagCollector<S> {
    fn visit(&mut self, arg: S::Arg<'a>) {
        self.tags.push(S::tag_of(&arg));
    }
}
