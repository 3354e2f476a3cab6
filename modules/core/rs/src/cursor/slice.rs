use std::cell::Cell;

use derive_getters::Dissolve;
use eyre::Result;
use impl_tools::autoimpl;

use super::{
    BidirectionalCursor, ContiguousCursor, ForwardCursor, InputCursor, OutputCursor,
    RandomAccessCursor,
};
use crate::capability::{Capabilities, Tier};
use crate::error::ViewError;

/// Contiguous cursor over a borrowed slice. Yields references to the elements.
#[derive(Debug, PartialEq, Eq, Hash, Dissolve)]
#[autoimpl(Clone, Copy)]
pub struct SliceCursor<'a, T> {
    slice: &'a [T],
    pos: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    pub fn new(slice: &'a [T]) -> Self {
        Self { slice, pos: 0 }
    }

    /// Offset of the cursor from the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Remaining elements with the original lifetime.
    pub fn rest(&self) -> &'a [T] {
        &self.slice[self.pos..]
    }
}

impl<'a, T> InputCursor for SliceCursor<'a, T> {
    type Item = &'a T;

    const CAPABILITIES: Capabilities = Capabilities::CONTIGUOUS;

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.slice.get(self.pos))
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        if self.pos < self.slice.len() {
            self.pos += 1;
        }
        Ok(())
    }

    #[inline(always)]
    fn size(&self) -> Option<usize> {
        Some(self.slice.len() - self.pos)
    }
}

impl<T> ForwardCursor for SliceCursor<'_, T> {}

impl<T> BidirectionalCursor for SliceCursor<'_, T> {
    fn retreat(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }
}

impl<T> RandomAccessCursor for SliceCursor<'_, T> {
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        self.rest().get(offset)
    }

    #[inline(always)]
    fn advance_by(&mut self, n: usize) -> usize {
        let n = n.min(self.slice.len() - self.pos);
        self.pos += n;
        n
    }
}

impl<T> ContiguousCursor for SliceCursor<'_, T> {
    type Elem = T;

    #[inline(always)]
    fn as_slice(&self) -> &[Self::Elem] {
        self.rest()
    }
}

/// Random-access cursor over a mutably borrowed slice. Elements are read by value and can be
/// overwritten in place.
///
/// The slice is viewed as cells, so copies of the cursor share it and the cursor stays
/// multi-pass while writable.
#[derive(Dissolve)]
#[autoimpl(Clone, Copy)]
#[autoimpl(Debug ignore self.slice)]
pub struct MutSliceCursor<'a, T> {
    slice: &'a [Cell<T>],
    pos: usize,
}

impl<'a, T> MutSliceCursor<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self {
            slice: Cell::from_mut(slice).as_slice_of_cells(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<T: Copy> InputCursor for MutSliceCursor<'_, T> {
    type Item = T;

    const CAPABILITIES: Capabilities = Capabilities::new(Tier::RandomAccess)
        .with_sized(true)
        .with_common(true)
        .with_output(true);

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.slice.get(self.pos).map(Cell::get))
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        if self.pos < self.slice.len() {
            self.pos += 1;
        }
        Ok(())
    }

    #[inline(always)]
    fn size(&self) -> Option<usize> {
        Some(self.slice.len() - self.pos)
    }
}

impl<T: Copy> ForwardCursor for MutSliceCursor<'_, T> {}

impl<T: Copy> BidirectionalCursor for MutSliceCursor<'_, T> {
    fn retreat(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }
}

impl<T: Copy> RandomAccessCursor for MutSliceCursor<'_, T> {
    #[inline(always)]
    fn peek_at(&self, offset: usize) -> Option<Self::Item> {
        self.slice.get(self.pos.checked_add(offset)?).map(Cell::get)
    }

    #[inline(always)]
    fn advance_by(&mut self, n: usize) -> usize {
        let n = n.min(self.slice.len() - self.pos);
        self.pos += n;
        n
    }
}

impl<T: Copy> OutputCursor for MutSliceCursor<'_, T> {
    type Value = T;

    fn put(&mut self, value: Self::Value) -> Result<()> {
        match self.slice.get(self.pos) {
            Some(slot) => {
                slot.set(value);
                Ok(())
            }
            None => Err(ViewError::unexpected_end("write past the end of the sequence").into()),
        }
    }
}
