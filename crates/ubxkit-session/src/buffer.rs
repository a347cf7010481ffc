//! The session receive buffer.
//!
//! A fixed-capacity byte deque with `compact` semantics: bytes `[0, filled)`
//! hold the unparsed prefix of the stream, and consuming `n` bytes slides
//! the remainder to the front. Appending past capacity truncates the chunk;
//! the framer will resynchronize on whatever survives.

/// Largest frame plus slack; comfortably above the 1208-byte minimum the
/// protocol requires.
pub const RECV_CAPACITY: usize = 2048;

/// Fixed-capacity receive buffer.
///
/// # Invariants
///
/// `filled <= RECV_CAPACITY` always; the bytes past `filled` are scratch.
#[derive(Debug)]
pub struct RecvBuffer {
    data: Box<[u8; RECV_CAPACITY]>,
    filled: usize,
}

impl Default for RecvBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecvBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Box::new([0u8; RECV_CAPACITY]), filled: 0 }
    }

    /// The unparsed prefix.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    /// Bytes currently buffered.
    #[must_use]
    pub const fn filled(&self) -> usize {
        self.filled
    }

    /// Append a chunk, truncating whatever does not fit.
    ///
    /// Returns the number of bytes actually stored.
    pub fn extend_truncating(&mut self, chunk: &[u8]) -> usize {
        let room = RECV_CAPACITY - self.filled;
        let take = chunk.len().min(room);
        self.data[self.filled..self.filled + take].copy_from_slice(&chunk[..take]);
        self.filled += take;
        take
    }

    /// Discard the first `n` bytes and slide the rest to the front.
    pub fn compact(&mut self, n: usize) {
        let n = n.min(self.filled);
        self.data.copy_within(n..self.filled, 0);
        self.filled -= n;
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.filled = 0;
    }
}
