use derive_getters::Dissolve;
use derive_more::Constructor;
use eyre::Result;

/// A deferred, parameter-bound adaptor that turns a sequence into a view.
///
/// Adaptors are small `Copy` bundles holding only their parameters (a count, a threshold, ...).
/// They are applied either directly, `take(3).apply(&seq)`, or with the pipe operator,
/// `&seq | take(3)`. Both produce the same view type. Nothing is read from the sequence until
/// the resulting view is iterated.
pub trait Adaptor<S> {
    type Output;

    fn apply(self, seq: S) -> Self::Output;
}

/// Output of an adaptor, a view or the `Result` of a validated construction, as `Result<View>`.
pub trait IntoView {
    type View;

    fn into_view(self) -> Result<Self::View>;
}

impl<V> IntoView for Result<V> {
    type View = V;

    #[inline(always)]
    fn into_view(self) -> Result<V> {
        self
    }
}

/// Applies the next adaptor of a chain to the output of the previous one.
///
/// Views are handed over as they are. A `Result` from an `_or_throw` adaptor is unwrapped first
/// and an error skips the rest of the chain, so validated adaptors can sit anywhere in it.
pub trait Pipe<A> {
    type Output;

    fn pipe(self, adaptor: A) -> Self::Output;
}

impl<V, A> Pipe<A> for Result<V>
where
    A: Adaptor<V>,
    A::Output: IntoView,
{
    type Output = Result<<A::Output as IntoView>::View>;

    #[inline(always)]
    fn pipe(self, adaptor: A) -> Self::Output {
        self.and_then(|view| adaptor.apply(view).into_view())
    }
}

/// Two adaptors applied left to right: `first` wraps the sequence, `second` wraps the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Constructor, Dissolve)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<S, A, B> Adaptor<S> for Chain<A, B>
where
    A: Adaptor<S>,
    A::Output: Pipe<B>,
{
    type Output = <A::Output as Pipe<B>>::Output;

    #[inline(always)]
    fn apply(self, seq: S) -> Self::Output {
        self.first.apply(seq).pipe(self.second)
    }
}

/// Adaptor-side pipe support: `adaptor | adaptor` builds a [`Chain`] and `adaptor.then(..)` does
/// the same without the operator.
macro_rules! impl_adaptor {
    ([$($gen:tt)*] $ty:ty) => {
        impl<$($gen)*> $ty {
            /// Apply `next` to the view produced by this adaptor.
            pub fn then<Next>(self, next: Next) -> $crate::adaptor::Chain<Self, Next> {
                $crate::adaptor::Chain::new(self, next)
            }
        }

        impl<$($gen)* Rhs> ::std::ops::BitOr<Rhs> for $ty {
            type Output = $crate::adaptor::Chain<Self, Rhs>;

            #[inline(always)]
            fn bitor(self, rhs: Rhs) -> Self::Output {
                $crate::adaptor::Chain::new(self, rhs)
            }
        }
    };
}

/// View-side pipe support plus the conveniences every view offers: std iteration, eager
/// conversion into a `Vec` and being a nested sequence for deep adaptors.
macro_rules! impl_view {
    ([$($gen:tt)*] $ty:ty) => {
        impl<$($gen)* Rhs: $crate::adaptor::Adaptor<$ty>> ::std::ops::BitOr<Rhs> for $ty {
            type Output = Rhs::Output;

            #[inline(always)]
            fn bitor(self, rhs: Rhs) -> Self::Output {
                rhs.apply(self)
            }
        }

        impl<$($gen)*> ::std::iter::IntoIterator for $ty
        where
            $ty: ::seqview_core_rs::InputCursor,
        {
            type Item = ::eyre::Result<<$ty as ::seqview_core_rs::InputCursor>::Item>;
            type IntoIter = ::seqview_core_rs::Iter<$ty>;

            fn into_iter(self) -> Self::IntoIter {
                ::seqview_core_rs::Iter::new(self)
            }
        }

        impl<$($gen)* Elem> ::std::convert::TryFrom<$ty> for Vec<Elem>
        where
            $ty: ::seqview_core_rs::InputCursor<Item = Elem>,
        {
            type Error = ::eyre::Report;

            fn try_from(view: $ty) -> ::eyre::Result<Self> {
                ::seqview_core_rs::SequenceExt::materialize(view)
            }
        }

        impl<$($gen)*> ::seqview_core_rs::Nesting for $ty {
            type Depth = ::seqview_core_rs::Nested;
        }

        impl<$($gen)*> $crate::adaptor::IntoView for $ty {
            type View = Self;

            #[inline(always)]
            fn into_view(self) -> ::eyre::Result<Self> {
                Ok(self)
            }
        }

        impl<$($gen)* Next: $crate::adaptor::Adaptor<$ty>> $crate::adaptor::Pipe<Next> for $ty {
            type Output = Next::Output;

            #[inline(always)]
            fn pipe(self, adaptor: Next) -> Self::Output {
                adaptor.apply(self)
            }
        }
    };
}

/// Pipe support for sequence types defined outside of this crate. The orphan rule only allows
/// `BitOr` impls for them with a concrete adaptor type on the right, so every adaptor is listed.
macro_rules! impl_source {
    ($([$($gen:tt)*] $ty:ty),+ $(,)?) => {
        $(
            impl_source!(@pipe [$($gen)*] $ty => [const EXACT: bool, const OR_THROW: bool]
                $crate::take::TakeFn<EXACT, OR_THROW>);
            impl_source!(@pipe [$($gen)*] $ty => [const REQUIRE_EOL: bool]
                $crate::take_line::TakeLineFn<REQUIRE_EOL>);
            impl_source!(@pipe [$($gen)*] $ty => [Th] $crate::trim::TrimFn<Th>);
            impl_source!(@pipe [$($gen)*] $ty => [A] $crate::deep::DeepFn<A>);
            impl_source!(@pipe [$($gen)*] $ty => [] $crate::skip::SkipFn);
            impl_source!(@pipe [$($gen)*] $ty => [] $crate::single_pass::SinglePassFn);
            impl_source!(@pipe [$($gen)*] $ty => [A, B] $crate::adaptor::Chain<A, B>);
        )+
    };
    (@pipe [$($gen:tt)*] $ty:ty => [$($agen:tt)*] $adaptor:ty) => {
        impl<$($gen)* $($agen)*> ::std::ops::BitOr<$adaptor> for $ty
        where
            $adaptor: $crate::adaptor::Adaptor<$ty>,
        {
            type Output = <$adaptor as $crate::adaptor::Adaptor<$ty>>::Output;

            #[inline(always)]
            fn bitor(self, rhs: $adaptor) -> Self::Output {
                $crate::adaptor::Adaptor::apply(rhs, self)
            }
        }
    };
}

/// Pipe support for the `Result` of an `_or_throw` adaptor, going through [`Pipe`].
macro_rules! impl_fallible_pipe {
    ($([$($agen:tt)*] $adaptor:ty),+ $(,)?) => {
        $(
            impl<V, $($agen)*> ::std::ops::BitOr<$adaptor> for ::eyre::Result<V>
            where
                Self: $crate::adaptor::Pipe<$adaptor>,
            {
                type Output = <Self as $crate::adaptor::Pipe<$adaptor>>::Output;

                #[inline(always)]
                fn bitor(self, rhs: $adaptor) -> Self::Output {
                    $crate::adaptor::Pipe::pipe(self, rhs)
                }
            }
        )+
    };
}

pub(crate) use {impl_adaptor, impl_view};

impl_adaptor!([A, B,] Chain<A, B>);

mod sources {
    use std::io::Read;

    use seqview_core_rs::cursor::{
        BoxedCursor, BoxedForwardCursor, Copied, IterCursor, MutSliceCursor, ReadCursor,
        SliceCursor,
    };
    use seqview_core_rs::{FixedSpan, Span};

    impl_source!(
        ['a, T,] &'a [T],
        ['a, T, const N: usize,] &'a [T; N],
        ['a, T,] &'a Vec<T>,
        ['a, T,] &'a mut [T],
        ['a, T,] &'a mut Vec<T>,
        ['a,] &'a str,
        ['a,] &'a String,
        ['a, T,] Span<'a, T>,
        ['a, T, const N: usize,] FixedSpan<'a, T, N>,
        ['a, T,] SliceCursor<'a, T>,
        ['a, T,] MutSliceCursor<'a, T>,
        [I: Iterator,] IterCursor<I>,
        [R: Read,] ReadCursor<R>,
        [C,] Copied<C>,
        ['a, T,] BoxedCursor<'a, T>,
        ['a, T,] BoxedForwardCursor<'a, T>,
    );

    impl_fallible_pipe!(
        [const EXACT: bool, const OR_THROW: bool] crate::take::TakeFn<EXACT, OR_THROW>,
        [const REQUIRE_EOL: bool] crate::take_line::TakeLineFn<REQUIRE_EOL>,
        [Th] crate::trim::TrimFn<Th>,
        [A] crate::deep::DeepFn<A>,
        [] crate::skip::SkipFn,
        [] crate::single_pass::SinglePassFn,
        [A, B] crate::adaptor::Chain<A, B>,
    );
}

#[cfg(test)]
mod tests {
    use seqview_core_rs::{InputCursor, SequenceExt, ViewError};

    use super::*;
    use crate::{skip, take, take_exactly_or_throw, take_line};

    #[test]
    fn test_chain_applies_left_to_right() -> Result<()> {
        let text = "line one\nline two";

        let composed = skip(5) | take(10) | take_line();
        let direct: Vec<u8> = composed.apply(text).materialize()?;
        let piped: Vec<u8> = (text | composed).materialize()?;
        let nested: Vec<u8> = (text | skip(5) | take(10) | take_line()).materialize()?;

        assert_eq!(direct, b"one");
        assert_eq!(piped, direct);
        assert_eq!(nested, direct);
        Ok(())
    }

    #[test]
    fn test_then_matches_pipe() -> Result<()> {
        let data = vec![1, 2, 3, 4, 5];
        let by_then: Vec<&i32> = take(4).then(skip(1)).apply(&data).materialize()?;
        let by_pipe: Vec<&i32> = (&data | (take(4) | skip(1))).materialize()?;
        assert_eq!(by_then, vec![&2, &3, &4]);
        assert_eq!(by_pipe, by_then);
        Ok(())
    }

    #[test]
    fn test_validated_adaptors_chain() -> Result<()> {
        let vec = vec![1, 2, 3, 4];

        let view = (&vec | take_exactly_or_throw(3) | take_exactly_or_throw(3))?;
        assert_eq!(view.size(), Some(3));
        assert_eq!(view.materialize::<Vec<_>>()?, vec![&1, &2, &3]);

        let head: Vec<&i32> = (&vec | take_exactly_or_throw(3) | take(2))?.materialize()?;
        assert_eq!(head, vec![&1, &2]);

        let err = (&vec | take_exactly_or_throw(5) | take(2)).unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));
        let err = (&vec | take(2) | take_exactly_or_throw(3)).unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));
        Ok(())
    }

    #[test]
    fn test_validated_adaptor_inside_composition() -> Result<()> {
        let text = "ACGT\nTT";

        let composed = take_exactly_or_throw(6) | take_line();
        let line: Vec<u8> = composed.apply(text)?.materialize()?;
        assert_eq!(line, b"ACGT");

        let err = composed.apply("AC").unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));

        let line: Vec<u8> = (text | skip(1) | composed)?.materialize()?;
        assert_eq!(line, b"CGT");
        Ok(())
    }
}
