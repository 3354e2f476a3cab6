use eyre::Result;
use seqview_core_rs::{
    BidirectionalCursor, Capabilities, ContiguousCursor, ForwardCursor, InputCursor, OutputCursor,
    RandomAccessCursor, Sequence,
};

use crate::adaptor::impl_view;

/// View over a whole sequence. Adds nothing but lets any sequence take part in pipes, including
/// borrowed cursors: `all(cursor.by_ref()) | take(3)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct All<C> {
    inner: C,
}

impl<C> All<C> {
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: InputCursor> InputCursor for All<C> {
    type Item = C::Item;

    const CAPABILITIES: Capabilities = C::CAPABILITIES;

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        self.inner.get()
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

impl<C: ForwardCursor> ForwardCursor for All<C> {}

impl<C: BidirectionalCursor> BidirectionalCursor for All<C> {
    #[inline(always)]
    fn retreat(&mut self) -> bool {
        self.inner.retreat()
    }
}

impl<C: RandomAccessCursor> RandomAccessCursor for All<C> {
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        self.inner.peek_at(offset)
    }

    #[inline(always)]
    fn advance_by(&mut self, n: usize) -> usize {
        self.inner.advance_by(n)
    }
}

impl<C: ContiguousCursor> ContiguousCursor for All<C> {
    type Elem = C::Elem;

    #[inline(always)]
    fn as_slice(&self) -> &[Self::Elem] {
        self.inner.as_slice()
    }
}

impl<C: OutputCursor> OutputCursor for All<C> {
    type Value = C::Value;

    #[inline(always)]
    fn put(&mut self, value: Self::Value) -> Result<()> {
        self.inner.put(value)
    }
}

impl_view!([C,] All<C>);

/// Wrap a sequence into a pipeable view.
pub fn all<S: Sequence>(seq: S) -> All<S::Cursor> {
    All {
        inner: seq.into_cursor(),
    }
}

#[cfg(test)]
mod tests {
    use seqview_core_rs::cursor::from_iter;
    use seqview_core_rs::SequenceExt;

    use super::*;
    use crate::{take, take_line};

    #[test]
    fn test_all_keeps_capabilities() {
        let data = [1, 2, 3];
        assert_eq!(all(&data).capabilities(), Capabilities::CONTIGUOUS);
        assert_eq!(all(&data).size(), Some(3));
    }

    #[test]
    fn test_borrowed_cursor_in_pipe() -> Result<()> {
        let mut records = from_iter("first\nsecond\n".bytes());

        let first: Vec<u8> = (all(records.by_ref()) | take_line()).materialize()?;
        let second: Vec<u8> = (all(records.by_ref()) | take_line()).materialize()?;
        assert_eq!(first, b"first");
        assert_eq!(second, b"second");
        assert_eq!(records.get()?, None);

        let head: Vec<u8> = (all("abc") | take(2)).materialize()?;
        assert_eq!(head, b"ab");
        Ok(())
    }
}
