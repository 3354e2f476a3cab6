pub use capability::{Capabilities, Tier};
pub use cursor::{
    BidirectionalCursor, ContiguousCursor, ForwardCursor, InputCursor, OutputCursor,
    RandomAccessCursor,
};
pub use error::ViewError;
pub use sequence::{Iter, Nested, Nesting, Sequence, SequenceExt, Shallow};
pub use span::{FixedSpan, Span};

pub mod capability;
pub mod cursor;
pub mod error;
pub mod quality;
pub mod sequence;
pub mod span;
