pub use adaptor::{Adaptor, Chain, IntoView, Pipe};
pub use all::{all, All};
pub use deep::{deep, Deep, DeepFn};
pub use single_pass::{single_pass_input, SinglePass, SinglePassFn};
pub use skip::{skip, slice, Skip, SkipFn};
pub use take::{
    take, take_exactly, take_exactly_or_throw, Take, TakeExactly, TakeExactlyOrThrow, TakeFn,
};
pub use take_line::{
    take_line, take_line_or_throw, LineSymbol, TakeLine, TakeLineFn, TakeLineOrThrow,
};
pub use trim::{trim, Trim, TrimDepth, TrimFn};

mod adaptor;
mod all;
mod deep;
mod single_pass;
mod skip;
mod take;
mod take_line;
mod trim;
