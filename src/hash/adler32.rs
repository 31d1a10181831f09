//! Adler-32 weak sum with rolling window updates.
//!
//! `a` is one plus the byte sum, `b` the sum of every prefix's `a`, both
//! modulo 65521. The packed value `(b << 16) | a` is the standard Adler-32,
//! so a window summed from scratch and the same window reached by rolling
//! always agree.

/// Largest prime below 2^16.
const MOD_ADLER: u64 = 65521;

/// Adler-32 checksum over a sliding window of bytes.
///
/// Besides the usual append ([`update`](Self::update)), the window can drop
/// its oldest byte ([`pop_front`](Self::pop_front)) or slide by one byte
/// ([`roll`](Self::roll)) in O(1), which is what the differ needs when it
/// advances one byte at a time through the destination.
///
/// # Example
///
/// ```
/// use rhdiff::RollingChecksum;
///
/// let data = b"abcdef";
///
/// let mut rolling = RollingChecksum::new();
/// rolling.update(&data[0..3]);
/// rolling.roll(data[0], data[3]);
///
/// assert_eq!(rolling.value(), RollingChecksum::checksum(&data[1..4]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingChecksum {
    a: u32,
    b: u32,
    len: usize,
}

impl RollingChecksum {
    /// Creates a checksum over the empty window.
    pub const fn new() -> Self {
        Self { a: 1, b: 0, len: 0 }
    }

    /// Computes the checksum of `data` in one shot.
    pub fn checksum(data: &[u8]) -> u32 {
        let mut sum = Self::new();
        sum.update(data);
        sum.value()
    }

    /// Resets to the empty window.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the number of bytes in the window.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends bytes to the end of the window.
    pub fn update(&mut self, data: &[u8]) {
        let mut a = u64::from(self.a);
        let mut b = u64::from(self.b);
        for &byte in data {
            a = (a + u64::from(byte)) % MOD_ADLER;
            b = (b + a) % MOD_ADLER;
        }
        self.a = a as u32;
        self.b = b as u32;
        self.len += data.len();
    }

    /// Appends a single byte to the end of the window.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.update(&[byte]);
    }

    /// Removes `outgoing`, the oldest byte, from the front of the window.
    ///
    /// The caller must pass the byte that is actually at the front; the
    /// checksum does not keep the window contents. Does nothing on an empty
    /// window.
    #[inline]
    pub fn pop_front(&mut self, outgoing: u8) {
        if self.len == 0 {
            return;
        }

        let out = u64::from(outgoing);
        let weight = (self.len as u64 % MOD_ADLER) * out % MOD_ADLER;

        let a = (u64::from(self.a) + MOD_ADLER - out) % MOD_ADLER;
        // b loses `len * outgoing` plus the leading 1 of the dropped prefix.
        let b = (u64::from(self.b) + 2 * MOD_ADLER - weight - 1) % MOD_ADLER;

        self.a = a as u32;
        self.b = b as u32;
        self.len -= 1;
    }

    /// Slides the window by one byte: drops `outgoing` from the front and
    /// appends `incoming` at the back.
    #[inline]
    pub fn roll(&mut self, outgoing: u8, incoming: u8) {
        self.pop_front(outgoing);
        self.push(incoming);
    }

    /// Returns the packed checksum value `(b << 16) | a`.
    #[inline]
    pub fn value(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

impl Default for RollingChecksum {
    fn default() -> Self {
        Self::new()
    }
}
