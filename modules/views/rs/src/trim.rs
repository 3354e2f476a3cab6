use eyre::Result;
use num::PrimInt;
use seqview_core_rs::quality::{Quality, Threshold};
use seqview_core_rs::{
    BidirectionalCursor, Capabilities, ContiguousCursor, ForwardCursor, InputCursor, Nested,
    Nesting, OutputCursor, RandomAccessCursor, Sequence, Shallow, ViewError,
};

use crate::adaptor::{impl_adaptor, impl_view, Adaptor};
use crate::deep::Deep;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TrimState {
    Pending,
    Passing,
    Done,
}

/// View over the leading elements whose quality is at least `threshold`.
///
/// The first element below the threshold ends the view and is never consumed, later elements
/// are not looked at. Like any scan-terminated view it is never sized, and random-access
/// navigation scans for the failing element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trim<C, P> {
    inner: C,
    threshold: P,
    state: TrimState,
    offset: usize,
}

impl<C, P> Trim<C, P>
where
    C: InputCursor,
    C::Item: Quality<Phred = P>,
    P: PrimInt,
{
    pub fn new<S: Sequence<Cursor = C>>(seq: S, threshold: impl Threshold<P>) -> Self {
        Self {
            inner: seq.into_cursor(),
            threshold: threshold.to_threshold(),
            state: TrimState::Pending,
            offset: 0,
        }
    }

    pub fn threshold(&self) -> P {
        self.threshold
    }

    /// Underlying cursor, left on the first element that failed the threshold.
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn inspect(&mut self) -> Result<Option<C::Item>> {
        match self.inner.get()? {
            Some(item) if item.to_phred() >= self.threshold => {
                self.state = TrimState::Passing;
                Ok(Some(item))
            }
            Some(_) => {
                self.state = TrimState::Done;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    #[inline(always)]
    fn step(&mut self) -> Result<()> {
        self.inner.advance()?;
        self.offset += 1;
        self.state = TrimState::Pending;
        Ok(())
    }
}

impl<C, P> InputCursor for Trim<C, P>
where
    C: InputCursor,
    C::Item: Quality<Phred = P>,
    P: PrimInt,
{
    type Item = C::Item;

    const CAPABILITIES: Capabilities = C::CAPABILITIES.with_sized(false).with_common(false);

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        match self.state {
            TrimState::Pending => self.inspect(),
            TrimState::Passing => self.inner.get(),
            TrimState::Done => Ok(None),
        }
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        match self.state {
            TrimState::Pending => {
                if self.inspect()?.is_some() {
                    self.step()?;
                }
                Ok(())
            }
            TrimState::Passing => self.step(),
            TrimState::Done => Ok(()),
        }
    }
}

impl<C, P> ForwardCursor for Trim<C, P>
where
    C: ForwardCursor,
    C::Item: Quality<Phred = P>,
    P: PrimInt,
{
}

impl<C, P> BidirectionalCursor for Trim<C, P>
where
    C: BidirectionalCursor,
    C::Item: Quality<Phred = P>,
    P: PrimInt,
{
    fn retreat(&mut self) -> bool {
        if self.offset == 0 || !self.inner.retreat() {
            return false;
        }
        self.offset -= 1;
        self.state = TrimState::Pending;
        true
    }
}

impl<C, P> Trim<C, P>
where
    C: RandomAccessCursor,
    C::Item: Quality<Phred = P>,
    P: PrimInt,
{
    /// Number of passing elements ahead of the cursor, counting at most `limit`.
    fn passing_len(&self, limit: usize) -> usize {
        if self.state == TrimState::Done {
            return 0;
        }
        (0..limit)
            .take_while(|&i| {
                self.inner
                    .peek_at(i)
                    .is_some_and(|x| x.to_phred() >= self.threshold)
            })
            .count()
    }
}

impl<C, P> RandomAccessCursor for Trim<C, P>
where
    C: RandomAccessCursor,
    C::Item: Quality<Phred = P>,
    P: PrimInt,
{
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        if self.passing_len(offset.saturating_add(1)) <= offset {
            return None;
        }
        self.inner.peek_at(offset)
    }

    fn advance_by(&mut self, n: usize) -> usize {
        let n = self.passing_len(n);
        if n == 0 {
            return 0;
        }
        let moved = self.inner.advance_by(n);
        self.offset += moved;
        self.state = TrimState::Pending;
        moved
    }
}

impl<C, P> ContiguousCursor for Trim<C, P>
where
    C: ContiguousCursor,
    C::Item: Quality<Phred = P>,
    C::Elem: Quality<Phred = P>,
    P: PrimInt,
{
    type Elem = C::Elem;

    fn as_slice(&self) -> &[Self::Elem] {
        if self.state == TrimState::Done {
            return &[];
        }
        let rest = self.inner.as_slice();
        match rest.iter().position(|x| x.to_phred() < self.threshold) {
            Some(end) => &rest[..end],
            None => rest,
        }
    }
}

impl<C, P> OutputCursor for Trim<C, P>
where
    C: OutputCursor,
    C::Item: Quality<Phred = P>,
    P: PrimInt,
{
    type Value = C::Value;

    fn put(&mut self, value: Self::Value) -> Result<()> {
        if self.get()?.is_none() {
            return Err(ViewError::unexpected_end("Write past the end of a trimmed view").into());
        }
        self.inner.put(value)
    }
}

impl_view!([C, P,] Trim<C, P>);

/// Quality threshold of a [`trim`] adaptor: a quality letter or a raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrimFn<Th> {
    threshold: Th,
}

impl<Th> TrimFn<Th> {
    pub fn threshold(&self) -> &Th {
        &self.threshold
    }
}

impl_adaptor!([Th,] TrimFn<Th>);

/// Picks how [`trim`] applies to a sequence from the [`Nesting`] depth of its elements.
pub trait TrimDepth<S, Th> {
    type Output;

    fn trim(seq: S, threshold: Th) -> Self::Output;
}

/// Elements are quality letters: trim the sequence itself.
impl<S, Th> TrimDepth<S, Th> for Shallow
where
    S: Sequence,
    S::Item: Quality,
    Th: Threshold<<S::Item as Quality>::Phred>,
{
    type Output = Trim<S::Cursor, <S::Item as Quality>::Phred>;

    fn trim(seq: S, threshold: Th) -> Self::Output {
        Trim::new(seq, threshold)
    }
}

/// Elements are sequences of quality letters: trim each of them. Deeper nesting is rejected.
impl<S, Th> TrimDepth<S, Th> for Nested
where
    S: Sequence,
    S::Item: Sequence,
    <S::Item as Sequence>::Item: Nesting<Depth = Shallow>,
    TrimFn<Th>: Adaptor<S::Item> + Clone,
{
    type Output = Deep<S::Cursor, TrimFn<Th>>;

    fn trim(seq: S, threshold: Th) -> Self::Output {
        Deep::new(seq, TrimFn { threshold })
    }
}

impl<S, Th> Adaptor<S> for TrimFn<Th>
where
    S: Sequence,
    S::Item: Nesting,
    <S::Item as Nesting>::Depth: TrimDepth<S, Th>,
{
    type Output = <<S::Item as Nesting>::Depth as TrimDepth<S, Th>>::Output;

    fn apply(self, seq: S) -> Self::Output {
        <<S::Item as Nesting>::Depth as TrimDepth<S, Th>>::trim(seq, self.threshold)
    }
}

/// Keep the leading elements with quality of at least `threshold`. Applied to a sequence of
/// reads, each read is trimmed on its own.
pub fn trim<Th>(threshold: Th) -> TrimFn<Th> {
    TrimFn { threshold }
}
