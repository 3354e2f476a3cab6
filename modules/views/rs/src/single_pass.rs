use eyre::Result;
use seqview_core_rs::{Capabilities, InputCursor, OutputCursor, Sequence};

use crate::adaptor::{impl_adaptor, impl_view, Adaptor};

/// View that demotes any sequence to a consume-once stream of unknown length.
///
/// Useful to run the single-pass code paths of other adaptors over in-memory data.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SinglePass<C> {
    inner: C,
}

impl<C: InputCursor> SinglePass<C> {
    pub fn new<S: Sequence<Cursor = C>>(seq: S) -> Self {
        Self {
            inner: seq.into_cursor(),
        }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: InputCursor> InputCursor for SinglePass<C> {
    type Item = C::Item;

    const CAPABILITIES: Capabilities = C::CAPABILITIES.single_pass().with_sized(false);

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        self.inner.get()
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        self.inner.advance()
    }
}

impl<C: OutputCursor> OutputCursor for SinglePass<C> {
    type Value = C::Value;

    #[inline(always)]
    fn put(&mut self, value: Self::Value) -> Result<()> {
        self.inner.put(value)
    }
}

impl_view!([C,] SinglePass<C>);

/// Adaptor behind [`single_pass_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SinglePassFn;

impl_adaptor!([] SinglePassFn);

impl<S: Sequence> Adaptor<S> for SinglePassFn {
    type Output = SinglePass<S::Cursor>;

    fn apply(self, seq: S) -> Self::Output {
        SinglePass::new(seq)
    }
}

/// Forget everything but single-pass iteration.
pub fn single_pass_input() -> SinglePassFn {
    SinglePassFn
}
