use eyre::Result;

use super::InputCursor;

/// Single-pass cursor over any iterator. The current element is cached so it can be read
/// more than once; the iterator is not touched before the first read.
#[derive(Debug)]
pub struct IterCursor<I: Iterator> {
    iter: I,
    current: Option<I::Item>,
    primed: bool,
}

impl<I: Iterator> IterCursor<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            current: None,
            primed: false,
        }
    }

    #[inline(always)]
    fn prime(&mut self) {
        if !self.primed {
            self.current = self.iter.next();
            self.primed = true;
        }
    }
}

impl<I> InputCursor for IterCursor<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        self.prime();
        Ok(self.current.clone())
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        self.prime();
        if self.current.is_some() {
            self.current = self.iter.next();
        }
        Ok(())
    }
}

/// Wrap anything iterable into a single-pass cursor.
pub fn from_iter<T: IntoIterator>(iter: T) -> IterCursor<T::IntoIter> {
    IterCursor::new(iter.into_iter())
}

/// Turn std iterators into single-pass cursors.
pub trait IntoCursor: Iterator + Sized {
    fn single_pass(self) -> IterCursor<Self> {
        IterCursor::new(self)
    }
}

impl<T: Iterator> IntoCursor for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_reads_are_cached() -> Result<()> {
        let mut cursor = "ab".chars().single_pass();
        assert_eq!(cursor.get()?, Some('a'));
        assert_eq!(cursor.get()?, Some('a'));
        cursor.advance()?;
        assert_eq!(cursor.next()?, Some('b'));
        assert_eq!(cursor.get()?, None);
        cursor.advance()?;
        assert_eq!(cursor.get()?, None);
        Ok(())
    }

    #[test]
    fn test_construction_is_lazy() -> Result<()> {
        let pulled = Cell::new(0);
        let mut cursor = from_iter((0..3).inspect(|_| pulled.set(pulled.get() + 1)));
        assert_eq!(pulled.get(), 0);

        assert_eq!(cursor.get()?, Some(0));
        assert_eq!(pulled.get(), 1);

        cursor.advance()?;
        cursor.advance()?;
        assert_eq!(pulled.get(), 3);
        Ok(())
    }
}
