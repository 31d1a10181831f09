//! Sliding window over the destination.

use std::collections::VecDeque;
use std::io;

use bytes::Bytes;

use crate::chunk::StrongSum;
use crate::config::READ_BUFFER_SIZE;
use crate::hash::{Blake3Hasher, RollingChecksum};
use crate::source::ReadAt;

/// The destination region currently tested for a match.
///
/// Holds up to `capacity` bytes starting at `start`, with their weak sum
/// kept up to date as bytes enter and leave. Once the destination reports
/// end-of-stream no further reads are issued; the window then only shrinks.
/// Storage grows with the bytes read, never ahead of them.
#[derive(Debug)]
pub(crate) struct Window {
    bytes: VecDeque<u8>,
    sum: RollingChecksum,
    start: u64,
    capacity: usize,
    scratch: Vec<u8>,
    exhausted: bool,
}

impl Window {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            bytes: VecDeque::with_capacity(capacity.min(READ_BUFFER_SIZE)),
            sum: RollingChecksum::new(),
            start: 0,
            capacity,
            scratch: vec![0u8; capacity.min(READ_BUFFER_SIZE)],
            exhausted: false,
        }
    }

    /// Tops the window up to capacity from `destination`.
    ///
    /// After a slide this reads a single byte; after a match, a whole chunk.
    pub(crate) fn fill<D: ReadAt + ?Sized>(&mut self, destination: &mut D) -> io::Result<()> {
        while !self.exhausted && self.bytes.len() < self.capacity {
            let want = (self.capacity - self.bytes.len()).min(self.scratch.len());
            let at = self.start + self.bytes.len() as u64;
            let n = destination.read_at(at, &mut self.scratch[..want])?;
            if n < want {
                self.exhausted = true;
            }

            let read = &self.scratch[..n];
            self.bytes.extend(read);
            self.sum.update(read);
        }
        Ok(())
    }

    /// Destination offset of the first byte in the window.
    pub(crate) fn start(&self) -> u64 {
        self.start
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn weak_sum(&self) -> u32 {
        self.sum.value()
    }

    /// BLAKE3 over the window, fed from both halves of the ring.
    pub(crate) fn strong_sum(&self) -> StrongSum {
        let (front, back) = self.bytes.as_slices();
        let mut hasher = Blake3Hasher::new();
        hasher.update(front);
        hasher.update(back);
        hasher.finalize()
    }

    /// Drops the first byte and returns it, advancing `start` by one.
    pub(crate) fn slide(&mut self) -> Option<u8> {
        let byte = self.bytes.pop_front()?;
        self.sum.pop_front(byte);
        self.start += 1;
        Some(byte)
    }

    /// Takes the whole window as a matched region, advancing `start` past it.
    pub(crate) fn consume(&mut self) -> Bytes {
        let data: Vec<u8> = self.bytes.drain(..).collect();
        self.start += data.len() as u64;
        self.sum.reset();
        Bytes::from(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn contents(window: &Window) -> Vec<u8> {
        window.bytes.iter().copied().collect()
    }

    #[test]
    fn test_fill_slide_consume() {
        let mut dst = Cursor::new(b"abc12xyz".to_vec());
        let mut window = Window::new(3);

        window.fill(&mut dst).unwrap();
        assert_eq!(contents(&window), b"abc");
        assert_eq!(window.weak_sum(), RollingChecksum::checksum(b"abc"));
        assert_eq!(window.strong_sum(), Blake3Hasher::hash(b"abc"));

        assert_eq!(window.consume().as_ref(), b"abc");
        assert_eq!(window.start(), 3);

        window.fill(&mut dst).unwrap();
        assert_eq!(window.slide(), Some(b'1'));
        window.fill(&mut dst).unwrap();
        assert_eq!(contents(&window), b"2xy");
        assert_eq!(window.strong_sum(), Blake3Hasher::hash(b"2xy"));
        assert_eq!(window.weak_sum(), RollingChecksum::checksum(b"2xy"));
        assert_eq!(window.start(), 4);
    }

    #[test]
    fn test_tail_shrinks_to_empty() {
        let mut dst = Cursor::new(b"abcd".to_vec());
        let mut window = Window::new(3);

        window.fill(&mut dst).unwrap();
        window.slide();
        window.fill(&mut dst).unwrap();
        assert_eq!(contents(&window), b"bcd");

        window.slide();
        window.fill(&mut dst).unwrap();
        assert_eq!(contents(&window), b"cd");
        assert_eq!(window.weak_sum(), RollingChecksum::checksum(b"cd"));

        window.slide();
        window.slide();
        window.fill(&mut dst).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.start(), 4);
    }

    #[test]
    fn test_huge_capacity_holds_short_destination() {
        let mut dst = Cursor::new(b"abc".to_vec());
        let mut window = Window::new(usize::MAX / 2);

        window.fill(&mut dst).unwrap();
        assert_eq!(contents(&window), b"abc");
        assert_eq!(window.consume().as_ref(), b"abc");

        window.fill(&mut dst).unwrap();
        assert!(window.is_empty());
    }

    #[test]
    fn test_fill_spans_several_reads() {
        let data: Vec<u8> = (0..3 * READ_BUFFER_SIZE + 5).map(|i| i as u8).collect();
        let mut dst = Cursor::new(data.clone());
        let mut window = Window::new(2 * READ_BUFFER_SIZE + 1);

        window.fill(&mut dst).unwrap();
        assert_eq!(contents(&window), &data[..2 * READ_BUFFER_SIZE + 1]);
        assert_eq!(
            window.weak_sum(),
            RollingChecksum::checksum(&data[..2 * READ_BUFFER_SIZE + 1])
        );
    }
}
