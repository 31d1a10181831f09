//! Random-access destination reads.
//!
//! The differ revisits the destination at arbitrary offsets, so it reads
//! through [`ReadAt`] rather than [`std::io::Read`]. Anything that is
//! `Read + Seek` already qualifies: files, `Cursor<Vec<u8>>`,
//! `Cursor<&[u8]>`, `BufReader<File>` and so on.

use std::io::{self, Read, Seek, SeekFrom};

/// Offset-addressed reads over a byte source.
pub trait ReadAt {
    /// Reads up to `buf.len()` bytes starting at `offset`.
    ///
    /// Returns the number of bytes read. `Ok(0)` for a non-empty `buf` means
    /// end-of-stream; a short count means the stream ends inside `buf`.
    /// Any `Err` is a hard failure.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;
}

impl<T: Read + Seek> ReadAt for T {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        self.seek(SeekFrom::Start(offset))?;

        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}
