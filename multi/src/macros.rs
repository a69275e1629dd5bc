//! Declarative generation of closed type sets.

/// Declares a closed set of dispatchable types.
///
/// One invocation generates:
///
/// - a marker type implementing [`TypeSet`](crate::TypeSet),
/// - a tag enum with one variant per member,
/// - a borrowed argument enum (`Arg<'a>`) carrying `&'a T` per member,
/// - a [`Member`](crate::Member) impl for every member type,
/// - a typed visitor trait with one `visit_*` method per member, implemented
///   for every [`Visitor`](crate::Visitor) of the set.
///
/// Member types must be distinct.
///
/// ```
/// multi::type_set! {
///     /// Integers and reals.
///     pub set Num {
///         tag NumType;
///         arg NumArg;
///         visitor NumVisitor;
///         Int(i64) => visit_int,
///         Real(f64) => visit_real,
///     }
/// }
///
/// use multi::TypeSet;
/// assert_eq!(Num::TAGS, &[NumType::Int, NumType::Real]);
/// ```
#[macro_export]
macro_rules! type_set {
    (
        $(#[$meta:meta])*
        $vis:vis set $set:ident {
            tag $tag:ident;
            arg $arg:ident;
            visitor $visitor:ident;
            $( $variant:ident($ty:ty) => $method:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $set;

        #[doc = concat!("Member tags of [`", stringify!($set), "`], in declaration order.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $tag {
            $( $variant, )+
        }

        impl $tag {
            /// Returns the member name.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $tag::$variant => stringify!($variant), )+
                }
            }
        }

        impl ::std::fmt::Display for $tag {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        #[doc = concat!("A borrowed member of [`", stringify!($set), "`], tagged with its type.")]
        #[derive(Debug, Clone, Copy)]
        $vis enum $arg<'a> {
            $( $variant(&'a $ty), )+
        }

        impl $crate::TypeSet for $set {
            type Tag = $tag;
            type Arg<'a> = $arg<'a>;

            const NAME: &'static str = stringify!($set);
            const TAGS: &'static [$tag] = &[$( $tag::$variant, )+];

            fn tag_of(arg: &$arg<'_>) -> $tag {
                match arg {
                    $( $arg::$variant(_) => $tag::$variant, )+
                }
            }
        }

        $(
            impl $crate::Member<$set> for $ty {
                const TAG: $tag = $tag::$variant;

                fn from_arg<'a>(arg: $arg<'a>) -> ::std::option::Option<&'a Self>
                where
                    Self: 'a,
                {
                    match arg {
                        $arg::$variant(value) => ::std::option::Option::Some(value),
                        #[allow(unreachable_patterns)]
                        _ => ::std::option::Option::None,
                    }
                }
            }
        )+

        #[doc = concat!("Typed visitor over the members of [`", stringify!($set), "`].")]
        $vis trait $visitor<'a>: $crate::Visitor<'a, $set> {
            $(
                fn $method(&mut self, value: &'a $ty) {
                    self.visit($arg::$variant(value));
                }
            )+
        }

        impl<'a, V: $crate::Visitor<'a, $set> + ?Sized> $visitor<'a> for V {}
    };
}
