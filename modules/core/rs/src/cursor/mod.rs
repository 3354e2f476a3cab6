pub use boxed::{BoxedCursor, BoxedForwardCursor};
pub use copied::Copied;
pub use iter::{from_iter, IntoCursor, IterCursor};
pub use read::ReadCursor;
pub use slice::{MutSliceCursor, SliceCursor};

mod boxed;
mod copied;
mod iter;
mod read;
mod slice;

use eyre::Result;

use crate::capability::Capabilities;

/// Position inside a sequence that can be read and moved forward: the weakest iteration tier.
///
/// Reading and advancing are separate steps. Reading the same position twice returns the same
/// element, so adaptors can inspect an element before deciding whether it belongs to them.
/// Both steps are fallible to let stream-backed inputs and `_or_throw` adaptors report failures
/// through the whole adaptor chain.
///
/// Implementors declare their full capability set in [`InputCursor::CAPABILITIES`]. It must
/// agree with the traits they implement (e.g. a cursor claiming [`Tier::Forward`] must implement
/// [`ForwardCursor`]); adaptors rely on it to pick single-pass or multi-pass behavior.
///
/// [`Tier::Forward`]: crate::capability::Tier::Forward
pub trait InputCursor {
    type Item;

    const CAPABILITIES: Capabilities = Capabilities::INPUT;

    /// Element under the cursor or `None` once the end is reached.
    fn get(&mut self) -> Result<Option<Self::Item>>;

    /// Step past the current element. Advancing at the end is a no-op.
    fn advance(&mut self) -> Result<()>;

    /// Number of remaining elements if it is known in O(1).
    fn size(&self) -> Option<usize> {
        None
    }

    /// Read the current element and step past it.
    fn next(&mut self) -> Result<Option<Self::Item>> {
        match self.get()? {
            Some(item) => {
                self.advance()?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Borrow the cursor as a single-pass cursor. Once the borrow ends, the cursor is left
    /// exactly where the borrowing adaptor stopped.
    fn by_ref(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self
    }

    /// Erase the concrete cursor type.
    fn boxed<'a>(self) -> BoxedCursor<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        BoxedCursor::new(self)
    }
}

/// Multi-pass cursor: copies are independent and re-read the same elements.
pub trait ForwardCursor: InputCursor + Clone {
    /// Erase the concrete cursor type but keep it cloneable.
    fn boxed_forward<'a>(self) -> BoxedForwardCursor<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        BoxedForwardCursor::new(self)
    }
}

/// Multi-pass cursor that can step backwards.
pub trait BidirectionalCursor: ForwardCursor {
    /// Step back by one element. Returns `false` (and stays put) at the start of the sequence.
    fn retreat(&mut self) -> bool;
}

/// Cursor that can look at and jump to any offset, in O(1) for sources and plain adaptors.
pub trait RandomAccessCursor: BidirectionalCursor {
    /// Element `offset` positions ahead of the cursor, without moving it.
    ///
    /// Adaptors that find their end by scanning (e.g. line or quality based views) scan up to
    /// `offset` here, so for them this is O(offset).
    fn peek_at(&self, offset: usize) -> Option<Self::Item>;

    /// Move `n` positions forward, stopping at the end, and return how far the cursor moved.
    /// Scan-terminated adaptors stop at their end as well, in O(n).
    fn advance_by(&mut self, n: usize) -> usize;
}

/// Random-access cursor over elements laid out next to each other in memory.
pub trait ContiguousCursor: RandomAccessCursor {
    type Elem;

    /// Remaining elements of the sequence, starting at the cursor.
    fn as_slice(&self) -> &[Self::Elem];
}

/// Cursor that can overwrite the element under it.
pub trait OutputCursor: InputCursor {
    type Value;

    fn put(&mut self, value: Self::Value) -> Result<()>;
}

/// Static capability set of a cursor type.
pub const fn capabilities_of<C: InputCursor>() -> Capabilities {
    C::CAPABILITIES
}

impl<C: InputCursor + ?Sized> InputCursor for &mut C {
    type Item = C::Item;

    const CAPABILITIES: Capabilities = C::CAPABILITIES.single_pass();

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        (**self).get()
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        (**self).advance()
    }

    #[inline(always)]
    fn size(&self) -> Option<usize> {
        (**self).size()
    }
}

impl<C: OutputCursor + ?Sized> OutputCursor for &mut C {
    type Value = C::Value;

    #[inline(always)]
    fn put(&mut self, value: Self::Value) -> Result<()> {
        (**self).put(value)
    }
}
