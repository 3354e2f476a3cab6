use std::fmt::Debug;
use std::marker::PhantomData;
use std::mem::size_of;
use std::ops::Index;
use std::ptr::NonNull;

use eyre::Result;

use crate::cursor::SliceCursor;
use crate::error::ViewError;
use crate::sequence::{Nested, Nesting, Sequence};

/// Contract checks: active in debug builds or with the `checked` feature, free otherwise.
macro_rules! contract {
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(any(debug_assertions, feature = "checked"))]
        assert!($cond, $($arg)+);
    };
}

/// Element types without padding or invalid bit patterns that can be viewed as raw bytes.
///
/// # Safety
///
/// Implementors must not contain padding bytes, and every byte of their representation must be
/// initialized.
pub unsafe trait Plain: Copy {}

macro_rules! impl_plain {
    ($($ty:ty),+) => {
        $(unsafe impl Plain for $ty {})+
    };
}

impl_plain!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

/// Non-owning window over contiguous memory with the length stored at construction.
///
/// Element access is not bounds-checked in release builds: indexing past the end is a contract
/// violation caught only by debug assertions (or the `checked` feature).
pub struct Span<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<&'a T>,
}

/// Non-owning window over exactly `N` contiguous elements.
pub struct FixedSpan<'a, T, const N: usize> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a T>,
}

// SAFETY: both spans behave like `&'a [T]`
unsafe impl<T: Sync> Send for Span<'_, T> {}
unsafe impl<T: Sync> Sync for Span<'_, T> {}
unsafe impl<T: Sync, const N: usize> Send for FixedSpan<'_, T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for FixedSpan<'_, T, N> {}

impl<'a, T> Span<'a, T> {
    pub fn new(slice: &'a [T]) -> Self {
        Self {
            ptr: NonNull::from(slice).cast(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `ptr` must be non-null, aligned and valid for reads of `len` elements for the lifetime
    /// `'a`, and the memory must not be mutated while the span is alive.
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> Self {
        Self {
            ptr: NonNull::new_unchecked(ptr as *mut T),
            len,
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: guaranteed by construction
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Element at `index`. Out-of-bounds access is a caller bug.
    #[inline(always)]
    pub fn at(&self, index: usize) -> &'a T {
        contract!(
            index < self.len,
            "Span index {index} is out of bounds for length {}",
            self.len
        );
        // SAFETY: in-bounds by contract
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Narrower span of `count` elements starting at `offset`. O(1), nothing is copied.
    pub fn subspan(&self, offset: usize, count: usize) -> Span<'a, T> {
        contract!(
            offset <= self.len && count <= self.len - offset,
            "Subspan [{offset}, {offset}+{count}) is out of bounds for length {}",
            self.len
        );
        Span {
            // SAFETY: in-bounds by contract
            ptr: unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(offset)) },
            len: count,
            _marker: PhantomData,
        }
    }

    pub fn first(&self, count: usize) -> Span<'a, T> {
        self.subspan(0, count)
    }

    pub fn last(&self, count: usize) -> Span<'a, T> {
        contract!(
            count <= self.len,
            "Can't take the last {count} elements of a span of length {}",
            self.len
        );
        self.subspan(self.len - count, count)
    }

    /// The same memory as raw bytes, e.g. for hashing or serialization.
    pub fn as_bytes(&self) -> Span<'a, u8>
    where
        T: Plain,
    {
        Span {
            ptr: self.ptr.cast(),
            len: self.len * size_of::<T>(),
            _marker: PhantomData,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, const N: usize> FixedSpan<'a, T, N> {
    pub const EXTENT: usize = N;

    pub fn new(array: &'a [T; N]) -> Self {
        Self {
            ptr: NonNull::from(array).cast(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// Same requirements as [`Span::from_raw_parts`] with `len == N`.
    pub unsafe fn from_raw_parts(ptr: *const T) -> Self {
        Self {
            ptr: NonNull::new_unchecked(ptr as *mut T),
            _marker: PhantomData,
        }
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &'a [T] {
        // SAFETY: guaranteed by construction
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), N) }
    }

    #[inline(always)]
    pub fn at(&self, index: usize) -> &'a T {
        contract!(index < N, "Span index {index} is out of bounds for length {N}");
        // SAFETY: in-bounds by contract
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    pub fn subspan(&self, offset: usize, count: usize) -> Span<'a, T> {
        self.as_dynamic().subspan(offset, count)
    }

    pub fn as_dynamic(&self) -> Span<'a, T> {
        Span {
            ptr: self.ptr,
            len: N,
            _marker: PhantomData,
        }
    }

    pub fn as_bytes(&self) -> Span<'a, u8>
    where
        T: Plain,
    {
        self.as_dynamic().as_bytes()
    }

    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<T> Clone for Span<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Span<'_, T> {}

impl<T, const N: usize> Clone for FixedSpan<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for FixedSpan<'_, T, N> {}

impl<T> Default for Span<'_, T> {
    fn default() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _marker: PhantomData,
        }
    }
}

impl<T> Index<usize> for Span<'_, T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        self.at(index)
    }
}

impl<T, const N: usize> Index<usize> for FixedSpan<'_, T, N> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        self.at(index)
    }
}

impl<T: Debug> Debug for Span<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Debug, const N: usize> Debug for FixedSpan<'_, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Span<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const N: usize> PartialEq for FixedSpan<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<'a, T> From<&'a [T]> for Span<'a, T> {
    fn from(value: &'a [T]) -> Self {
        Span::new(value)
    }
}

impl<'a, T> From<&'a Vec<T>> for Span<'a, T> {
    fn from(value: &'a Vec<T>) -> Self {
        Span::new(value)
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for FixedSpan<'a, T, N> {
    fn from(value: &'a [T; N]) -> Self {
        FixedSpan::new(value)
    }
}

impl<'a, T, const N: usize> From<FixedSpan<'a, T, N>> for Span<'a, T> {
    fn from(value: FixedSpan<'a, T, N>) -> Self {
        value.as_dynamic()
    }
}

impl<'a, T, const N: usize> TryFrom<Span<'a, T>> for FixedSpan<'a, T, N> {
    type Error = eyre::Report;

    fn try_from(value: Span<'a, T>) -> Result<Self, Self::Error> {
        if value.len() != N {
            return Err(ViewError::invalid_argument(format!(
                "Can't view a span of length {} as a fixed span of length {N}",
                value.len()
            ))
            .into());
        }
        Ok(FixedSpan {
            ptr: value.ptr,
            _marker: PhantomData,
        })
    }
}

impl<'a, T> Sequence for Span<'a, T> {
    type Item = &'a T;
    type Cursor = SliceCursor<'a, T>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self.as_slice())
    }
}

impl<'a, T, const N: usize> Sequence for FixedSpan<'a, T, N> {
    type Item = &'a T;
    type Cursor = SliceCursor<'a, T>;

    fn into_cursor(self) -> Self::Cursor {
        SliceCursor::new(self.as_slice())
    }
}

impl<T> Nesting for Span<'_, T> {
    type Depth = Nested;
}

impl<T, const N: usize> Nesting for FixedSpan<'_, T, N> {
    type Depth = Nested;
}
