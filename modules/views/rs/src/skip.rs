use eyre::Result;
use seqview_core_rs::{
    BidirectionalCursor, Capabilities, ContiguousCursor, ForwardCursor, InputCursor, OutputCursor,
    RandomAccessCursor, Sequence,
};

use crate::adaptor::{impl_adaptor, impl_view, Adaptor, Chain};
use crate::take::{take, TakeFn};

/// View over a sequence without its first `count` elements.
///
/// Nothing is skipped at construction: the elements are stepped over on first access, or jumped
/// over in O(1) by random-access navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skip<C> {
    inner: C,
    pending: usize,
    offset: usize,
}

impl<C: InputCursor> Skip<C> {
    pub fn new<S: Sequence<Cursor = C>>(seq: S, count: usize) -> Self {
        Self {
            inner: seq.into_cursor(),
            pending: count,
            offset: 0,
        }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn settle(&mut self) -> Result<()> {
        while self.pending > 0 {
            if self.inner.get()?.is_none() {
                self.pending = 0;
                break;
            }
            self.inner.advance()?;
            self.pending -= 1;
        }
        Ok(())
    }
}

impl<C: InputCursor> InputCursor for Skip<C> {
    type Item = C::Item;

    const CAPABILITIES: Capabilities = C::CAPABILITIES;

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        self.settle()?;
        self.inner.get()
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        self.settle()?;
        if self.inner.get()?.is_some() {
            self.inner.advance()?;
            self.offset += 1;
        }
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        self.inner
            .size()
            .map(|size| size.saturating_sub(self.pending))
    }
}

impl<C: ForwardCursor> ForwardCursor for Skip<C> {}

impl<C: BidirectionalCursor> BidirectionalCursor for Skip<C> {
    fn retreat(&mut self) -> bool {
        if self.offset == 0 || !self.inner.retreat() {
            return false;
        }
        self.offset -= 1;
        true
    }
}

impl<C: RandomAccessCursor> RandomAccessCursor for Skip<C> {
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        self.inner.peek_at(self.pending.saturating_add(offset))
    }

    fn advance_by(&mut self, n: usize) -> usize {
        let skipped = std::mem::take(&mut self.pending);
        let moved = self
            .inner
            .advance_by(skipped.saturating_add(n))
            .saturating_sub(skipped);
        self.offset += moved;
        moved
    }
}

impl<C: ContiguousCursor> ContiguousCursor for Skip<C> {
    type Elem = C::Elem;

    #[inline(always)]
    fn as_slice(&self) -> &[Self::Elem] {
        let rest = self.inner.as_slice();
        &rest[self.pending.min(rest.len())..]
    }
}

impl<C: OutputCursor> OutputCursor for Skip<C> {
    type Value = C::Value;

    fn put(&mut self, value: Self::Value) -> Result<()> {
        self.settle()?;
        self.inner.put(value)
    }
}

impl_view!([C,] Skip<C>);

/// Number of elements skipped by a [`Skip`] view, see [`skip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SkipFn {
    count: usize,
}

impl SkipFn {
    pub fn count(&self) -> usize {
        self.count
    }
}

impl_adaptor!([] SkipFn);

impl<S: Sequence> Adaptor<S> for SkipFn {
    type Output = Skip<S::Cursor>;

    fn apply(self, seq: S) -> Self::Output {
        Skip::new(seq, self.count)
    }
}

/// Everything but the first `count` elements.
pub fn skip(count: usize) -> SkipFn {
    SkipFn { count }
}

/// Elements in `[begin, end)`. An empty range if `end <= begin`.
pub fn slice(begin: usize, end: usize) -> Chain<SkipFn, TakeFn<false, false>> {
    skip(begin).then(take(end.saturating_sub(begin)))
}
