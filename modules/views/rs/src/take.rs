use eyre::Result;
use seqview_core_rs::{
    BidirectionalCursor, Capabilities, ContiguousCursor, ForwardCursor, InputCursor, OutputCursor,
    RandomAccessCursor, Sequence, Tier, ViewError,
};

use crate::adaptor::{impl_adaptor, impl_view, Adaptor};

/// View over the first `count` elements of a sequence.
///
/// * `Take<C>` yields `min(count, len)` elements. It is sized only if the input is sized.
/// * `Take<C, true>` ([`TakeExactly`]) is always sized and reports `count` even for inputs of
///   unknown length. The caller vouches for the count: if the input runs out early, the reported
///   size was wrong and the view simply ends. A warning is logged when that happens.
/// * `Take<C, true, true>` ([`TakeExactlyOrThrow`]) refuses sized inputs shorter than `count`
///   at construction and fails with [`ViewError::UnexpectedEndOfInput`] if an unsized input runs
///   out before `count` elements.
///
/// On sized inputs the count is clamped to the input size, so the reported size is always exact.
/// Random access and contiguity are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Take<C, const EXACT: bool = false, const OR_THROW: bool = false> {
    inner: C,
    remaining: usize,
    taken: usize,
    exhausted: bool,
}

pub type TakeExactly<C> = Take<C, true, false>;
pub type TakeExactlyOrThrow<C> = Take<C, true, true>;

impl<C: InputCursor, const EXACT: bool, const OR_THROW: bool> Take<C, EXACT, OR_THROW> {
    fn with_count(inner: C, count: usize) -> Self {
        let remaining = match inner.size() {
            Some(size) => count.min(size),
            None => count,
        };
        Self {
            inner,
            remaining,
            taken: 0,
            exhausted: false,
        }
    }

    /// Underlying cursor, positioned right after the last element consumed through the view.
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn on_early_end(&mut self) -> Result<()> {
        if OR_THROW {
            return Err(ViewError::unexpected_end(format!(
                "Reached the end of input with {} of the requested elements missing",
                self.remaining
            ))
            .into());
        }
        if !self.exhausted {
            self.exhausted = true;
            if EXACT {
                log::warn!(
                    "Input ended {} elements short of the count promised to take_exactly",
                    self.remaining
                );
            }
        }
        Ok(())
    }
}

impl<C: InputCursor> Take<C> {
    pub fn new<S: Sequence<Cursor = C>>(seq: S, count: usize) -> Self {
        Self::with_count(seq.into_cursor(), count)
    }
}

impl<C: InputCursor> Take<C, true, false> {
    pub fn exactly<S: Sequence<Cursor = C>>(seq: S, count: usize) -> Self {
        Self::with_count(seq.into_cursor(), count)
    }
}

impl<C: InputCursor> Take<C, true, true> {
    /// Fails with [`ViewError::InvalidArgument`] if the input is sized and shorter than `count`.
    /// Nothing is read from the input.
    pub fn exactly_or_throw<S: Sequence<Cursor = C>>(seq: S, count: usize) -> Result<Self> {
        let inner = seq.into_cursor();
        if let Some(size) = inner.size() {
            if size < count {
                log::debug!(
                    "Rejected take_exactly_or_throw({count}) over a sequence of length {size}"
                );
                return Err(ViewError::invalid_argument(format!(
                    "Expected at least {count} elements, the sequence has only {size}"
                ))
                .into());
            }
        }
        Ok(Self::with_count(inner, count))
    }
}

impl<C: InputCursor, const EXACT: bool, const OR_THROW: bool> InputCursor
    for Take<C, EXACT, OR_THROW>
{
    type Item = C::Item;

    const CAPABILITIES: Capabilities = {
        let caps = C::CAPABILITIES;
        caps.with_sized(EXACT || caps.sized)
            .with_common(caps.common && caps.sized && caps.tier.implies(Tier::RandomAccess))
    };

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        if self.remaining == 0 || self.exhausted {
            return Ok(None);
        }
        match self.inner.get()? {
            Some(item) => Ok(Some(item)),
            None => {
                self.on_early_end()?;
                Ok(None)
            }
        }
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        if self.remaining == 0 || self.exhausted {
            return Ok(());
        }
        if self.inner.get()?.is_none() {
            return self.on_early_end();
        }
        self.inner.advance()?;
        self.remaining -= 1;
        self.taken += 1;
        Ok(())
    }

    fn size(&self) -> Option<usize> {
        if self.exhausted {
            Some(0)
        } else if EXACT {
            Some(self.remaining)
        } else {
            self.inner.size().map(|size| size.min(self.remaining))
        }
    }
}

impl<C: ForwardCursor, const EXACT: bool, const OR_THROW: bool> ForwardCursor
    for Take<C, EXACT, OR_THROW>
{
}

impl<C: BidirectionalCursor, const EXACT: bool, const OR_THROW: bool> BidirectionalCursor
    for Take<C, EXACT, OR_THROW>
{
    fn retreat(&mut self) -> bool {
        if self.taken == 0 || !self.inner.retreat() {
            return false;
        }
        self.taken -= 1;
        self.remaining += 1;
        self.exhausted = false;
        true
    }
}

impl<C: RandomAccessCursor, const EXACT: bool, const OR_THROW: bool> RandomAccessCursor
    for Take<C, EXACT, OR_THROW>
{
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        if offset >= self.remaining || self.exhausted {
            return None;
        }
        self.inner.peek_at(offset)
    }

    fn advance_by(&mut self, n: usize) -> usize {
        let moved = self.inner.advance_by(n.min(self.remaining));
        self.remaining -= moved;
        self.taken += moved;
        moved
    }
}

impl<C: ContiguousCursor, const EXACT: bool, const OR_THROW: bool> ContiguousCursor
    for Take<C, EXACT, OR_THROW>
{
    type Elem = C::Elem;

    #[inline(always)]
    fn as_slice(&self) -> &[Self::Elem] {
        let rest = self.inner.as_slice();
        &rest[..rest.len().min(self.remaining)]
    }
}

impl<C: OutputCursor, const EXACT: bool, const OR_THROW: bool> OutputCursor
    for Take<C, EXACT, OR_THROW>
{
    type Value = C::Value;

    fn put(&mut self, value: Self::Value) -> Result<()> {
        if self.remaining == 0 {
            return Err(ViewError::unexpected_end("Write past the end of a take view").into());
        }
        self.inner.put(value)
    }
}

impl_view!([C, const EXACT: bool, const OR_THROW: bool,] Take<C, EXACT, OR_THROW>);

/// Bound count of a [`Take`] view, see [`take`], [`take_exactly`] and [`take_exactly_or_throw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TakeFn<const EXACT: bool, const OR_THROW: bool> {
    count: usize,
}

impl<const EXACT: bool, const OR_THROW: bool> TakeFn<EXACT, OR_THROW> {
    pub fn count(&self) -> usize {
        self.count
    }
}

impl_adaptor!([const EXACT: bool, const OR_THROW: bool,] TakeFn<EXACT, OR_THROW>);

impl<S: Sequence> Adaptor<S> for TakeFn<false, false> {
    type Output = Take<S::Cursor>;

    fn apply(self, seq: S) -> Self::Output {
        Take::new(seq, self.count)
    }
}

impl<S: Sequence> Adaptor<S> for TakeFn<true, false> {
    type Output = TakeExactly<S::Cursor>;

    fn apply(self, seq: S) -> Self::Output {
        Take::exactly(seq, self.count)
    }
}

impl<S: Sequence> Adaptor<S> for TakeFn<true, true> {
    type Output = Result<TakeExactlyOrThrow<S::Cursor>>;

    fn apply(self, seq: S) -> Self::Output {
        Take::exactly_or_throw(seq, self.count)
    }
}

/// At most the first `count` elements.
pub fn take(count: usize) -> TakeFn<false, false> {
    TakeFn { count }
}

/// The first `count` elements, reported as exactly `count` even when the input size is unknown.
pub fn take_exactly(count: usize) -> TakeFn<true, false> {
    TakeFn { count }
}

/// Exactly the first `count` elements or an error. Applying it returns `Result`, which can be piped
/// into further adaptors like a view.
pub fn take_exactly_or_throw(count: usize) -> TakeFn<true, true> {
    TakeFn { count }
}

#[cfg(test)]
mod tests {
    use seqview_core_rs::cursor::{from_iter, SliceCursor};
    use seqview_core_rs::SequenceExt;

    use super::*;
    use crate::{single_pass_input, take_line};

    #[test]
    fn test_pipe_and_direct_forms() -> Result<()> {
        let text = "foobar";

        let piped: Vec<u8> = (text | take(3)).materialize()?;
        let direct: Vec<u8> = Take::new(text, 3).materialize()?;
        assert_eq!(piped, b"foo");
        assert_eq!(direct, b"foo");

        let exactly: Vec<u8> = (text | take_exactly(3)).try_into()?;
        assert_eq!(exactly, b"foo");

        let or_throw: Vec<u8> = (text | take_exactly_or_throw(3))?.try_into()?;
        assert_eq!(or_throw, b"foo");
        Ok(())
    }

    #[test]
    fn test_capabilities_over_contiguous_input() {
        let vec = vec![1, 2, 3];
        for caps in [
            (&vec | take(3)).capabilities(),
            (&vec | take_exactly(3)).capabilities(),
        ] {
            assert_eq!(caps, Capabilities::CONTIGUOUS);
        }
    }

    #[test]
    fn test_capabilities_over_single_pass_input() {
        let vec = vec![1, 2, 3];

        let caps = (&vec | single_pass_input() | take(3)).capabilities();
        assert_eq!(caps.tier, Tier::Input);
        assert!(!caps.sized && !caps.common && !caps.const_iterable);

        let caps = (&vec | single_pass_input() | take_exactly(3)).capabilities();
        assert_eq!(caps.tier, Tier::Input);
        assert!(caps.sized && !caps.common);
    }

    #[test]
    fn test_underlying_is_shorter() -> Result<()> {
        let text = "foo";

        let view = text | take(4);
        assert_eq!(view.size(), Some(3));
        let view = text | take_exactly(4);
        assert_eq!(view.size(), Some(3));

        let collected: Vec<u8> = (text | single_pass_input() | take(4)).materialize()?;
        assert_eq!(collected, b"foo");

        let view = text | single_pass_input() | take_exactly(4);
        assert_eq!(view.size(), Some(4));
        let collected: Vec<u8> = view.materialize()?;
        assert_eq!(collected, b"foo");
        Ok(())
    }

    #[test]
    fn test_or_throw_failures() {
        let text = "foo";

        let err = (text | take_exactly_or_throw(4)).unwrap_err();
        assert!(ViewError::is_invalid_argument(&err));

        let view = (text | single_pass_input() | take_exactly_or_throw(4))
            .expect("single-pass input can't be validated up-front");
        let err = view.materialize::<Vec<u8>>().unwrap_err();
        assert!(ViewError::is_unexpected_end(&err));
    }

    #[test]
    fn test_navigation() -> Result<()> {
        let data = [1, 2, 3, 4, 5, 6];
        let mut view = Take::new(SliceCursor::new(&data), 4);

        assert!(!view.retreat());
        assert_eq!(view.peek_at(3), Some(&4));
        assert_eq!(view.peek_at(4), None);
        assert_eq!(view.as_slice(), &[1, 2, 3, 4]);

        view.advance_by(10);
        assert_eq!(view.get()?, None);
        assert_eq!(view.size(), Some(0));

        assert!(view.retreat());
        assert_eq!(view.get()?, Some(&4));
        assert_eq!(view.as_slice(), &[4]);
        Ok(())
    }

    #[test]
    fn test_writes_through_view() -> Result<()> {
        let mut data = vec![1, 2, 3];
        let mut view = &mut data | take(2);
        view.put(10)?;
        view.advance()?;
        view.put(20)?;
        view.advance()?;
        assert!(ViewError::is_unexpected_end(&view.put(30).unwrap_err()));
        assert_eq!(data, vec![10, 20, 3]);
        Ok(())
    }

    #[test]
    fn test_writable_input_keeps_random_access() -> Result<()> {
        let mut data = vec![1, 2, 3, 4];
        let view = &mut data | take(3);

        let caps = view.capabilities();
        assert_eq!(caps.tier, Tier::RandomAccess);
        assert!(caps.output && caps.sized && caps.common);

        let mut ahead = view.clone();
        assert_eq!(ahead.advance_by(2), 2);
        ahead.put(30)?;
        assert_eq!(view.peek_at(2), Some(30));
        assert_eq!(ahead.advance_by(5), 1);
        assert_eq!(view.size(), Some(3));
        assert_eq!(data, vec![1, 2, 30, 4]);
        Ok(())
    }

    #[test]
    fn test_advancing_at_the_end_keeps_counts() -> Result<()> {
        let mut view = Take::exactly("ab\ncd" | take_line(), 4);
        assert_eq!(view.size(), Some(4));
        for _ in 0..3 {
            view.advance()?;
        }
        assert_eq!(view.get()?, None);
        assert_eq!(view.size(), Some(0));

        assert!(view.retreat());
        assert_eq!(view.get()?, Some(b'b'));
        assert_eq!(view.size(), Some(3));
        assert!(view.retreat());
        assert!(!view.retreat());
        Ok(())
    }

    #[test]
    fn test_resume_after_take() -> Result<()> {
        let mut cursor = from_iter(1..=5);
        let head: Vec<i32> = take(2).apply(cursor.by_ref()).materialize()?;
        assert_eq!(head, vec![1, 2]);
        assert_eq!(cursor.get()?, Some(3));
        Ok(())
    }
}
