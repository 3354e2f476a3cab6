use std::iter::FusedIterator;

use derive_getters::Dissolve;
use eyre::Result;
use impl_tools::autoimpl;

use crate::capability::Capabilities;
use crate::cursor::{Copied, InputCursor, MutSliceCursor, SliceCursor};

/// Anything with a start position and an end condition: the unit all views operate on.
///
/// Converting into a cursor must be O(1) and must not read elements. Every cursor is a sequence
/// of its remaining elements.
pub trait Sequence {
    type Item;

    type Cursor: InputCursor<Item = Self::Item>;

    fn into_cursor(self) -> Self::Cursor;
}

impl<C: InputCursor> Sequence for C {
    type Item = C::Item;
    type Cursor = C;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        self
    }
}

impl<'a, T> Sequence for &'a [T] {
    type Item = &'a T;
    type Cursor = SliceCursor<'a, T>;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self)
    }
}

impl<'a, T, const N: usize> Sequence for &'a [T; N] {
    type Item = &'a T;
    type Cursor = SliceCursor<'a, T>;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self)
    }
}

impl<'a, T> Sequence for &'a Vec<T> {
    type Item = &'a T;
    type Cursor = SliceCursor<'a, T>;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self)
    }
}

impl<'a, T: Copy> Sequence for &'a mut [T] {
    type Item = T;
    type Cursor = MutSliceCursor<'a, T>;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        MutSliceCursor::new(self)
    }
}

impl<'a, T: Copy> Sequence for &'a mut Vec<T> {
    type Item = T;
    type Cursor = MutSliceCursor<'a, T>;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        MutSliceCursor::new(self)
    }
}

/// Strings are viewed as their UTF-8 bytes.
impl<'a> Sequence for &'a str {
    type Item = u8;
    type Cursor = Copied<SliceCursor<'a, u8>>;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        Copied::new(SliceCursor::new(self.as_bytes()))
    }
}

impl<'a> Sequence for &'a String {
    type Item = u8;
    type Cursor = Copied<SliceCursor<'a, u8>>;

    #[inline(always)]
    fn into_cursor(self) -> Self::Cursor {
        Copied::new(SliceCursor::new(self.as_bytes()))
    }
}

/// Marks an element type as a leaf (e.g. a quality letter) for deep adaptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shallow;

/// Marks an element type as a sequence itself, deep adaptors descend into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nested;

/// Tells deep adaptors whether an element is itself a sequence.
#[autoimpl(for<T: trait + ?Sized> &T, &mut T, Box<T>)]
pub trait Nesting {
    /// Either [`Shallow`] or [`Nested`].
    type Depth;
}

impl<T> Nesting for [T] {
    type Depth = Nested;
}

impl<T, const N: usize> Nesting for [T; N] {
    type Depth = Nested;
}

impl<T> Nesting for Vec<T> {
    type Depth = Nested;
}

impl Nesting for str {
    type Depth = Nested;
}

impl Nesting for String {
    type Depth = Nested;
}

impl<T> Nesting for SliceCursor<'_, T> {
    type Depth = Nested;
}

impl<C> Nesting for Copied<C> {
    type Depth = Nested;
}

/// Std iterator over the elements of a sequence. Every step yields `Result`, the iterator is
/// fused after the first error.
#[derive(Debug, Clone, Dissolve)]
pub struct Iter<C> {
    cursor: C,
    done: bool,
}

impl<C: InputCursor> Iter<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            done: false,
        }
    }

    /// The underlying cursor, positioned right after the last yielded element.
    pub fn into_cursor(self) -> C {
        self.cursor
    }
}

impl<C: InputCursor> Iterator for Iter<C> {
    type Item = Result<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.next() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.done, self.cursor.size()) {
            (true, _) => (0, Some(0)),
            (false, Some(size)) => (0, Some(size)),
            (false, None) => (0, None),
        }
    }
}

impl<C: InputCursor> FusedIterator for Iter<C> {}

/// Operations available on every sequence.
pub trait SequenceExt: Sequence + Sized {
    /// Capabilities granted by the sequence, for callers that select algorithms by tier.
    fn capabilities(&self) -> Capabilities {
        <Self::Cursor as InputCursor>::CAPABILITIES
    }

    /// Std iterator over the elements.
    fn elements(self) -> Iter<Self::Cursor> {
        Iter::new(self.into_cursor())
    }

    /// Eagerly copy all elements into a container with a single forward pass.
    fn materialize<B: FromIterator<Self::Item>>(self) -> Result<B> {
        itertools::process_results(self.elements(), |items| items.collect())
    }
}

impl<S: Sequence> SequenceExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Tier;
    use crate::cursor::from_iter;
    use crate::error::ViewError;

    struct FailsAfter(usize);

    impl InputCursor for FailsAfter {
        type Item = usize;

        fn get(&mut self) -> Result<Option<Self::Item>> {
            match self.0 {
                0 => Err(ViewError::unexpected_end("boom").into()),
                n => Ok(Some(n)),
            }
        }

        fn advance(&mut self) -> Result<()> {
            self.0 = self.0.saturating_sub(1);
            Ok(())
        }
    }

    #[test]
    fn test_builtin_capabilities() {
        let vec = vec![1, 2, 3];
        assert_eq!((&vec).capabilities(), Capabilities::CONTIGUOUS);
        assert_eq!("ACGT".capabilities(), Capabilities::CONTIGUOUS);
        assert_eq!(from_iter(0..3).capabilities().tier, Tier::Input);

        let mut vec = vec;
        let caps = (&mut vec).capabilities();
        assert!(caps.output && caps.sized && caps.common);
        assert_eq!(caps.tier, Tier::RandomAccess);
    }

    #[test]
    fn test_materialize_roundtrip() -> Result<()> {
        let original = vec![3u8, 1, 4, 1, 5];
        let copy: Vec<u8> = (&original).elements().map(|x| x.map(|x| *x)).collect::<Result<_>>()?;
        assert_eq!(copy, original);

        let text: Vec<u8> = "ACGT".materialize()?;
        assert_eq!(text, b"ACGT");

        let refs: Vec<&u8> = (&original).materialize()?;
        itertools::assert_equal(refs.into_iter(), original.iter());
        Ok(())
    }

    #[test]
    fn test_iteration_stops_on_error() {
        let mut iter = FailsAfter(2).elements();
        assert_eq!(iter.next().map(|x| x.ok()), Some(Some(2)));
        assert_eq!(iter.next().map(|x| x.ok()), Some(Some(1)));
        assert!(iter.next().map(|x| x.is_err()).unwrap_or(false));
        assert!(iter.next().is_none());

        let err = FailsAfter(3).materialize::<Vec<_>>().unwrap_err();
        assert!(ViewError::is_unexpected_end(&err));
    }
}
