use eyre::Result;
use seqview_core_rs::{
    BidirectionalCursor, Capabilities, ContiguousCursor, ForwardCursor, InputCursor, OutputCursor,
    RandomAccessCursor, Sequence, ViewError,
};

use crate::adaptor::{impl_adaptor, impl_view, Adaptor};

/// Symbols that can end a line: `\n`, or `\r` optionally followed by `\n`.
pub trait LineSymbol {
    fn is_cr(&self) -> bool;

    fn is_lf(&self) -> bool;

    #[inline(always)]
    fn is_terminator(&self) -> bool {
        self.is_cr() || self.is_lf()
    }

    /// Offset of the first terminator in `line`.
    fn find_terminator(line: &[Self]) -> Option<usize>
    where
        Self: Sized,
    {
        line.iter().position(|x| x.is_terminator())
    }
}

impl LineSymbol for u8 {
    #[inline(always)]
    fn is_cr(&self) -> bool {
        *self == b'\r'
    }

    #[inline(always)]
    fn is_lf(&self) -> bool {
        *self == b'\n'
    }

    #[inline(always)]
    fn find_terminator(line: &[Self]) -> Option<usize> {
        memchr::memchr2(b'\n', b'\r', line)
    }
}

impl LineSymbol for char {
    #[inline(always)]
    fn is_cr(&self) -> bool {
        *self == '\r'
    }

    #[inline(always)]
    fn is_lf(&self) -> bool {
        *self == '\n'
    }
}

impl<T: LineSymbol + ?Sized> LineSymbol for &T {
    #[inline(always)]
    fn is_cr(&self) -> bool {
        (**self).is_cr()
    }

    #[inline(always)]
    fn is_lf(&self) -> bool {
        (**self).is_lf()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LineState {
    /// The element under the inner cursor hasn't been inspected yet.
    Pending,
    /// The element under the inner cursor belongs to the line.
    Scanning,
    /// The inner cursor rests on the terminator. Always the case for multi-pass input, for
    /// single-pass input only if the line is empty.
    TerminatorDetected,
    /// Single-pass input only: the terminator has been consumed while stepping, nothing is read
    /// anymore.
    Exhausted,
}

/// View over the elements of a sequence up to, but excluding, the first line terminator.
///
/// Over multi-pass input the inner cursor is left on the terminator. Single-pass input can't be
/// revisited, so the terminator (`\r`, `\n` or `\r\n`) is consumed in the same step that moves
/// past the last element of the line, and the inner cursor ends up at the start of the next line.
/// A line that is empty from the start leaves single-pass input on its terminator, as nothing was
/// stepped over.
///
/// Without a terminator the view ends with the input, while [`TakeLineOrThrow`] fails with
/// [`ViewError::UnexpectedEndOfInput`].
///
/// The view is never sized. Random-access navigation stops at the terminator, which costs a scan
/// over the elements peeked at or jumped over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TakeLine<C, const REQUIRE_EOL: bool = false> {
    inner: C,
    state: LineState,
    offset: usize,
}

pub type TakeLineOrThrow<C> = TakeLine<C, true>;

impl<C: InputCursor, const REQUIRE_EOL: bool> TakeLine<C, REQUIRE_EOL> {
    fn from_cursor(inner: C) -> Self {
        Self {
            inner,
            state: LineState::Pending,
            offset: 0,
        }
    }

    /// Underlying cursor. For multi-pass input it points at the terminator once the line is done,
    /// for single-pass input right after it (unless the line was empty).
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: InputCursor> TakeLine<C> {
    pub fn new<S: Sequence<Cursor = C>>(seq: S) -> Self {
        Self::from_cursor(seq.into_cursor())
    }
}

impl<C: InputCursor> TakeLine<C, true> {
    pub fn or_throw<S: Sequence<Cursor = C>>(seq: S) -> Self {
        Self::from_cursor(seq.into_cursor())
    }
}

impl<C, const REQUIRE_EOL: bool> TakeLine<C, REQUIRE_EOL>
where
    C: InputCursor,
    C::Item: LineSymbol,
{
    /// Classify the element under the inner cursor. Nothing is consumed.
    fn inspect(&mut self) -> Result<Option<C::Item>> {
        let Some(symbol) = self.inner.get()? else {
            if REQUIRE_EOL {
                return Err(
                    ViewError::unexpected_end("Reached end of input before end-of-line").into(),
                );
            }
            return Ok(None);
        };

        if symbol.is_terminator() {
            self.state = LineState::TerminatorDetected;
            return Ok(None);
        }
        self.state = LineState::Scanning;
        Ok(Some(symbol))
    }

    #[inline(always)]
    fn step(&mut self) -> Result<()> {
        self.inner.advance()?;
        self.offset += 1;
        self.state = LineState::Pending;
        if !C::CAPABILITIES.is_multi_pass() {
            self.consume_terminator()?;
        }
        Ok(())
    }

    /// Single-pass input: swallow `\r`, `\n` or `\r\n` right behind the last line element.
    fn consume_terminator(&mut self) -> Result<()> {
        let mut consumed = false;
        if self.inner.get()?.is_some_and(|x| x.is_cr()) {
            self.inner.advance()?;
            consumed = true;
        }
        if self.inner.get()?.is_some_and(|x| x.is_lf()) {
            self.inner.advance()?;
            consumed = true;
        }
        if consumed {
            self.state = LineState::Exhausted;
        }
        Ok(())
    }
}

impl<C, const REQUIRE_EOL: bool> InputCursor for TakeLine<C, REQUIRE_EOL>
where
    C: InputCursor,
    C::Item: LineSymbol,
{
    type Item = C::Item;

    const CAPABILITIES: Capabilities = C::CAPABILITIES.with_sized(false).with_common(false);

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        match self.state {
            LineState::Pending => self.inspect(),
            LineState::Scanning => self.inner.get(),
            LineState::TerminatorDetected | LineState::Exhausted => Ok(None),
        }
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        match self.state {
            LineState::Pending => {
                if self.inspect()?.is_some() {
                    self.step()?;
                }
                Ok(())
            }
            LineState::Scanning => self.step(),
            LineState::TerminatorDetected | LineState::Exhausted => Ok(()),
        }
    }
}

impl<C, const REQUIRE_EOL: bool> ForwardCursor for TakeLine<C, REQUIRE_EOL>
where
    C: ForwardCursor,
    C::Item: LineSymbol,
{
}

impl<C, const REQUIRE_EOL: bool> BidirectionalCursor for TakeLine<C, REQUIRE_EOL>
where
    C: BidirectionalCursor,
    C::Item: LineSymbol,
{
    fn retreat(&mut self) -> bool {
        if self.offset == 0 || !self.inner.retreat() {
            return false;
        }
        self.offset -= 1;
        self.state = LineState::Pending;
        true
    }
}

impl<C, const REQUIRE_EOL: bool> TakeLine<C, REQUIRE_EOL>
where
    C: RandomAccessCursor,
    C::Item: LineSymbol,
{
    /// Number of line elements ahead of the cursor, counting at most `limit`.
    fn line_len(&self, limit: usize) -> usize {
        if self.state == LineState::TerminatorDetected {
            return 0;
        }
        (0..limit)
            .take_while(|&i| self.inner.peek_at(i).is_some_and(|x| !x.is_terminator()))
            .count()
    }
}

impl<C, const REQUIRE_EOL: bool> RandomAccessCursor for TakeLine<C, REQUIRE_EOL>
where
    C: RandomAccessCursor,
    C::Item: LineSymbol,
{
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        if self.line_len(offset.saturating_add(1)) <= offset {
            return None;
        }
        self.inner.peek_at(offset)
    }

    fn advance_by(&mut self, n: usize) -> usize {
        let n = self.line_len(n);
        if n == 0 {
            return 0;
        }
        let moved = self.inner.advance_by(n);
        self.offset += moved;
        self.state = LineState::Pending;
        moved
    }
}

impl<C, const REQUIRE_EOL: bool> ContiguousCursor for TakeLine<C, REQUIRE_EOL>
where
    C: ContiguousCursor,
    C::Item: LineSymbol,
    C::Elem: LineSymbol,
{
    type Elem = C::Elem;

    #[inline(always)]
    fn as_slice(&self) -> &[Self::Elem] {
        let rest = self.inner.as_slice();
        match <C::Elem as LineSymbol>::find_terminator(rest) {
            Some(end) => &rest[..end],
            None => rest,
        }
    }
}

impl<C, const REQUIRE_EOL: bool> OutputCursor for TakeLine<C, REQUIRE_EOL>
where
    C: OutputCursor,
    C::Item: LineSymbol,
{
    type Value = C::Value;

    fn put(&mut self, value: Self::Value) -> Result<()> {
        if self.get()?.is_none() {
            return Err(ViewError::unexpected_end("Write past the end of a line").into());
        }
        self.inner.put(value)
    }
}

impl_view!([C, const REQUIRE_EOL: bool,] TakeLine<C, REQUIRE_EOL>);

/// Line-take adaptor, see [`take_line`] and [`take_line_or_throw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TakeLineFn<const REQUIRE_EOL: bool>;

impl_adaptor!([const REQUIRE_EOL: bool,] TakeLineFn<REQUIRE_EOL>);

impl<S, const REQUIRE_EOL: bool> Adaptor<S> for TakeLineFn<REQUIRE_EOL>
where
    S: Sequence,
    S::Item: LineSymbol,
{
    type Output = TakeLine<S::Cursor, REQUIRE_EOL>;

    fn apply(self, seq: S) -> Self::Output {
        TakeLine::from_cursor(seq.into_cursor())
    }
}

/// The current line without its terminator.
pub fn take_line() -> TakeLineFn<false> {
    TakeLineFn
}

/// The current line without its terminator; running out of input before a terminator is an error.
pub fn take_line_or_throw() -> TakeLineFn<true> {
    TakeLineFn
}
