use eyre::Result;
use seqview_core_rs::{
    BidirectionalCursor, Capabilities, ForwardCursor, InputCursor, RandomAccessCursor, Sequence,
    Tier,
};

use crate::adaptor::{impl_adaptor, impl_view, Adaptor};

/// View over a sequence of sequences that applies an adaptor to each inner sequence.
///
/// The outer structure is untouched: the view has as many elements as its input, each one being
/// the adaptor's view of the corresponding inner sequence. Elements are produced on access, so
/// the view can't be contiguous or writable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Deep<C, A> {
    inner: C,
    adaptor: A,
}

impl<C: InputCursor, A> Deep<C, A> {
    pub fn new<S: Sequence<Cursor = C>>(seq: S, adaptor: A) -> Self {
        Self {
            inner: seq.into_cursor(),
            adaptor,
        }
    }

    pub fn adaptor(&self) -> &A {
        &self.adaptor
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C, A> InputCursor for Deep<C, A>
where
    C: InputCursor,
    A: Adaptor<C::Item> + Clone,
{
    type Item = A::Output;

    const CAPABILITIES: Capabilities = C::CAPABILITIES
        .at_most(Tier::RandomAccess)
        .with_output(false);

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.inner.get()?.map(|x| self.adaptor.clone().apply(x)))
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

impl<C, A> ForwardCursor for Deep<C, A>
where
    C: ForwardCursor,
    A: Adaptor<C::Item> + Clone,
{
}

impl<C, A> BidirectionalCursor for Deep<C, A>
where
    C: BidirectionalCursor,
    A: Adaptor<C::Item> + Clone,
{
    #[inline(always)]
    fn retreat(&mut self) -> bool {
        self.inner.retreat()
    }
}

impl<C, A> RandomAccessCursor for Deep<C, A>
where
    C: RandomAccessCursor,
    A: Adaptor<C::Item> + Clone,
{
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        self.inner
            .peek_at(offset)
            .map(|x| self.adaptor.clone().apply(x))
    }

    #[inline(always)]
    fn advance_by(&mut self, n: usize) -> usize {
        self.inner.advance_by(n)
    }
}

impl_view!([C, A,] Deep<C, A>);

/// Adaptor applied to every inner sequence, see [`deep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeepFn<A> {
    adaptor: A,
}

impl_adaptor!([A,] DeepFn<A>);

impl<S, A> Adaptor<S> for DeepFn<A>
where
    S: Sequence,
    A: Adaptor<S::Item> + Clone,
{
    type Output = Deep<S::Cursor, A>;

    fn apply(self, seq: S) -> Self::Output {
        Deep::new(seq, self.adaptor)
    }
}

/// Apply `adaptor` to each element of a sequence of sequences instead of the sequence itself.
pub fn deep<A>(adaptor: A) -> DeepFn<A> {
    DeepFn { adaptor }
}

#[cfg(test)]
mod tests {
    use seqview_core_rs::SequenceExt;

    use super::*;
    use crate::take;

    #[test]
    fn test_deep_take() -> Result<()> {
        let reads = vec![b"ACGT".to_vec(), b"G".to_vec(), Vec::new()];

        let heads: Vec<Vec<&u8>> = (&reads | deep(take(2)))
            .elements()
            .map(|read| read?.materialize())
            .collect::<Result<_>>()?;
        assert_eq!(heads, vec![vec![&b'A', &b'C'], vec![&b'G'], vec![]]);

        let outer: Vec<&Vec<u8>> = (&reads | take(2)).materialize()?;
        assert_eq!(outer.len(), 2);
        Ok(())
    }

    #[test]
    fn test_deep_capabilities() -> Result<()> {
        let reads = vec![vec![1, 2], vec![3]];
        let mut view = &reads | deep(take(1));

        let caps = view.capabilities();
        assert_eq!(caps.tier, Tier::RandomAccess);
        assert!(caps.sized);
        assert_eq!(view.size(), Some(2));

        let second: Vec<&i32> = view.peek_at(1).map_or(Ok(Vec::new()), |x| x.materialize())?;
        assert_eq!(second, vec![&3]);

        view.advance_by(1);
        assert!(view.retreat());
        assert!(view.get()?.is_some());
        Ok(())
    }
}
