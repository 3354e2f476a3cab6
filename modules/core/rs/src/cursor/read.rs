use std::io::{ErrorKind, Read};

use eyre::Result;

use super::InputCursor;

/// Single-pass cursor over the bytes of a [`Read`] stream. I/O errors surface as cursor errors.
pub struct ReadCursor<R> {
    reader: R,
    buffer: Box<[u8]>,
    pos: usize,
    filled: usize,
    eof: bool,
}

impl<R: Read> ReadCursor<R> {
    pub const DEFAULT_CAPACITY: usize = 8 * 1024;

    pub fn new(reader: R) -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader,
            buffer: vec![0; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            eof: false,
        }
    }

    /// Return the stream. Bytes buffered but not yet consumed are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self) -> Result<()> {
        if self.pos < self.filled || self.eof {
            return Ok(());
        }
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.eof = true;
                    self.pos = 0;
                    self.filled = 0;
                    return Ok(());
                }
                Ok(read) => {
                    log::trace!("Refilled stream buffer with {read} bytes");
                    self.pos = 0;
                    self.filled = read;
                    return Ok(());
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl<R: Read> InputCursor for ReadCursor<R> {
    type Item = u8;

    #[inline(always)]
    fn get(&mut self) -> Result<Option<Self::Item>> {
        self.fill()?;
        Ok((self.pos < self.filled).then(|| self.buffer[self.pos]))
    }

    #[inline(always)]
    fn advance(&mut self) -> Result<()> {
        self.fill()?;
        if self.pos < self.filled {
            self.pos += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "stream closed"))
        }
    }

    #[test]
    fn test_reads_across_refills() -> Result<()> {
        let data = b"ACGTACGTAC";
        let mut cursor = ReadCursor::with_capacity(3, Cursor::new(data));
        let mut collected = Vec::new();
        while let Some(byte) = cursor.next()? {
            collected.push(byte);
        }
        assert_eq!(collected, data);
        assert_eq!(cursor.get()?, None);
        Ok(())
    }

    #[test]
    fn test_io_errors_propagate() {
        let mut cursor = ReadCursor::new(Failing);
        let err = cursor.get().unwrap_err();
        assert_eq!(
            err.downcast_ref::<std::io::Error>().map(|x| x.kind()),
            Some(ErrorKind::BrokenPipe)
        );
    }
}
