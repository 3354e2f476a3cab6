use dyn_clone::DynClone;
use eyre::Result;

use super::{ForwardCursor, InputCursor};
use crate::capability::{Capabilities, Tier};

/// Object-safe mirror of [`InputCursor`]: associated constants can't live behind `dyn`.
trait ErasedCursor<T> {
    fn get(&mut self) -> Result<Option<T>>;

    fn advance(&mut self) -> Result<()>;

    fn size(&self) -> Option<usize>;

    fn capabilities(&self) -> Capabilities;
}

impl<C: InputCursor> ErasedCursor<C::Item> for C {
    #[inline(always)]
    fn get(&mut self) -> Result<Option<C::Item>> {
        InputCursor::get(self)
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        InputCursor::advance(self)
    }

    #[inline(always)]
    fn size(&self) -> Option<usize> {
        InputCursor::size(self)
    }

    fn capabilities(&self) -> Capabilities {
        C::CAPABILITIES
    }
}

trait ErasedForwardCursor<T>: ErasedCursor<T> + DynClone {}

impl<C: ForwardCursor> ErasedForwardCursor<C::Item> for C {}

dyn_clone::clone_trait_object!(<T> ErasedForwardCursor<T>);

/// Type-erased single-pass cursor. Sizes are still forwarded at runtime. Useful to cut down the type of a long adaptor chain.
pub struct BoxedCursor<'a, T> {
    inner: Box<dyn ErasedCursor<T> + 'a>,
}

impl<'a, T> BoxedCursor<'a, T> {
    pub fn new<C: InputCursor<Item = T> + 'a>(cursor: C) -> Self {
        Self {
            inner: Box::new(cursor),
        }
    }

    /// Capabilities of the erased cursor. The boxed cursor itself only offers the input tier.
    pub fn erased_capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
}

impl<T> InputCursor for BoxedCursor<'_, T> {
    type Item = T;

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

/// Type-erased multi-pass cursor.
pub struct BoxedForwardCursor<'a, T> {
    inner: Box<dyn ErasedForwardCursor<T> + 'a>,
}

impl<'a, T> BoxedForwardCursor<'a, T> {
    pub fn new<C: ForwardCursor<Item = T> + 'a>(cursor: C) -> Self {
        Self {
            inner: Box::new(cursor),
        }
    }

    pub fn erased_capabilities(&self) -> Capabilities {
        self.inner.capabilities()
    }
}

impl<T> Clone for BoxedForwardCursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> InputCursor for BoxedForwardCursor<'_, T> {
    type Item = T;

    const CAPABILITIES: Capabilities = Capabilities::new(Tier::Forward).with_const_iterable(true);

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

impl<T> ForwardCursor for BoxedForwardCursor<'_, T> {}
