//! Frame sync pattern matching.

use crate::consts::{SYNC_BITS, SYNC_PATTERN};

/// Window of the most recent 48 received bits.
const WINDOW_MASK: u64 = (1 << SYNC_BITS) - 1;

/// Matches a sliding window of received bits against a fixed sync pattern.
///
/// The match flag is a level, not an edge: it reports whether the current window
/// equals the pattern and stays set until the next bit shifts the window.
#[derive(Copy, Clone, Debug)]
pub struct SyncMatcher {
    /// Pattern to match against.
    pattern: u64,
    /// Most recently received bits, LSB latest.
    reg: u64,
}

impl SyncMatcher {
    /// Create a matcher for the given 48-bit pattern.
    pub fn new(pattern: u64) -> SyncMatcher {
        assert!(pattern >> SYNC_BITS == 0);

        SyncMatcher { pattern, reg: 0 }
    }

    /// Create a matcher for the standard P25 frame sync pattern.
    pub fn p25() -> SyncMatcher {
        SyncMatcher::new(SYNC_PATTERN)
    }

    /// Shift in the given bit.
    pub fn receive(&mut self, bit: bool) {
        self.reg = self.reg << 1 | bit as u64;
    }

    /// Whether the last 48 received bits equal the sync pattern.
    pub fn matches(&self) -> bool {
        self.reg & WINDOW_MASK == self.pattern
    }

    /// Discard the window, as at construction.
    pub fn reset(&mut self) {
        self.reg = 0;
    }
}
