use eyre::Result;

use super::{
    BidirectionalCursor, ContiguousCursor, ForwardCursor, InputCursor, RandomAccessCursor,
};
use crate::capability::Capabilities;

/// Cursor adapter that dereferences `&T` elements into `T` copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Copied<C> {
    inner: C,
}

impl<C> Copied<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<'a, T: Copy + 'a, C: InputCursor<Item = &'a T>> InputCursor for Copied<C> {
    type Item = T;

    const CAPABILITIES: Capabilities = C::CAPABILITIES.with_output(false);

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.inner.get()?.copied())
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        self.inner.advance()
    }

    #[inline(always)]
    fn size(&self) -> Option<usize> {
        self.inner.size()
    }
}

impl<'a, T: Copy + 'a, C: ForwardCursor<Item = &'a T>> ForwardCursor for Copied<C> {}

impl<'a, T: Copy + 'a, C: BidirectionalCursor<Item = &'a T>> BidirectionalCursor for Copied<C> {
    #[inline(always)]
    fn retreat(&mut self) -> bool {
        self.inner.retreat()
    }
}

impl<'a, T: Copy + 'a, C: RandomAccessCursor<Item = &'a T>> RandomAccessCursor for Copied<C> {
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        self.inner.peek_at(offset).copied()
    }

    #[inline(always)]
    fn advance_by(&mut self, n: usize) -> usize {
        self.inner.advance_by(n)
    }
}

impl<'a, T: Copy + 'a, C: ContiguousCursor<Item = &'a T>> ContiguousCursor for Copied<C> {
    type Elem = C::Elem;

    #[inline(always)]
    fn as_slice(&self) -> &[Self::Elem] {
        self.inner.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::SliceCursor;

    #[test]
    fn test_copied_keeps_navigation() -> Result<()> {
        let mut cursor = Copied::new(SliceCursor::new(b"ACGT"));
        assert_eq!(cursor.next()?, Some(b'A'));
        assert_eq!(cursor.peek_at(1), Some(b'G'));
        assert!(cursor.retreat());
        assert_eq!(cursor.as_slice(), b"ACGT");
        assert_eq!(<Copied<SliceCursor<'_, u8>>>::CAPABILITIES, Capabilities::CONTIGUOUS);
        Ok(())
    }
}
