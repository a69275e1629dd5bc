//! Core type definitions for closed-set dispatch.

use std::fmt;
use std::hash::Hash;

/// A closed, ordered set of types that may appear as a dispatched argument.
///
/// Implemented by the marker type generated by [`type_set!`](crate::type_set).
/// The set is fixed at build time; there is no way to add members at run time.
pub trait TypeSet: Sized + 'static {
    /// Discriminant naming one member of the set.
    type Tag: Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// A borrowed member value, tagged with its concrete type.
    type Arg<'a>: Copy + fmt::Debug;

    /// Name of the set, used in diagnostics.
    const NAME: &'static str;

    /// Every member tag, in declaration order.
    const TAGS: &'static [Self::Tag];

    /// Returns the tag of a revealed argument.
    fn tag_of(arg: &Self::Arg<'_>) -> Self::Tag;
}

/// A type that belongs to the closed set `S`.
pub trait Member<S: TypeSet>: fmt::Debug + 'static {
    /// The tag of this member.
    const TAG: S::Tag;

    /// Recovers `&Self` from a tagged argument, or `None` if the argument
    /// holds a different member.
    fn from_arg<'a>(arg: S::Arg<'a>) -> Option<&'a Self>
    where
        Self: 'a;
}

/// The ordered tuple of member tags for one call; the dispatch table key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature<T> {
    tags: Vec<T>,
}

impl<T: Copy> Signature<T> {
    /// Creates a signature from tags in argument order.
    pub fn new(tags: Vec<T>) -> Self {
        Self { tags }
    }

    /// Number of argument positions.
    pub fn arity(&self) -> usize {
        self.tags.len()
    }

    /// The tags in argument order.
    pub fn tags(&self) -> &[T] {
        &self.tags
    }

    /// Returns a new signature with `tag` appended.
    pub fn extended(&self, tag: T) -> Self {
        let mut tags = Vec::with_capacity(self.tags.len() + 1);
        tags.extend_from_slice(&self.tags);
        tags.push(tag);
        Self { tags }
    }

    /// Every signature of the given arity over `members`, in lexicographic
    /// declaration order.
    pub fn enumerate(members: &[T], arity: usize) -> Vec<Self> {
        let mut out = vec![Self { tags: Vec::new() }];
        for _ in 0..arity {
            out = out
                .into_iter()
                .flat_map(|sig| members.iter().map(move |&tag| sig.extended(tag)))
                .collect();
        }
        out
    }
}

impl<T: Copy + Eq + Hash> Signature<T> {
    /// Reads the signature off a sequence of revealed arguments.
    pub fn of<S>(args: &[S::Arg<'_>]) -> Self
    where
        S: TypeSet<Tag = T>,
    {
        Self {
            tags: args.iter().map(S::tag_of).collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Signature<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", tag)?;
        }
        write!(f, ")")
    }
}

impl<T: fmt::Debug> fmt::Debug for Signature<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("Signature");
        for tag in &self.tags {
            tuple.field(tag);
        }
        tuple.finish()
    }
}
