//! Encoding and decoding of the half-rate "trellis" convolutional code that protects
//! data unit blocks. Encoding walks a finite state machine and decoding runs the
//! Viterbi algorithm over the whole block, adapted from \[1].
//!
//! \[1]: "Coding Theory and Cryptography: The Essentials", 2nd ed, Hankerson, Hoffman,
//! et al, 2000

use collect_slice::CollectSlice;

use crate::bitbuf::BitBuffer;
use crate::bits::Dibit;
use crate::consts::{BLOCK_BITS, BLOCK_DATA_BITS};

/// Number of states in the half-rate state machine.
const STATES: usize = 4;

/// Number of state transitions when coding a block: 48 data dibits plus the flushing
/// symbol.
const STEPS: usize = BLOCK_DATA_BITS / 2;

/// Path metric of a state before any path has reached it.
const UNREACHED: usize = usize::MAX / 2;

/// Constellation points: the four coded bits output on each state transition, indexed
/// through `TRANSITIONS`.
const PAIRS: [(u8, u8); 16] = [
    (0b00, 0b10),
    (0b10, 0b10),
    (0b01, 0b11),
    (0b11, 0b11),
    (0b11, 0b10),
    (0b01, 0b10),
    (0b10, 0b11),
    (0b00, 0b11),
    (0b11, 0b01),
    (0b01, 0b01),
    (0b10, 0b00),
    (0b00, 0b00),
    (0b00, 0b01),
    (0b10, 0b01),
    (0b01, 0b00),
    (0b11, 0b00),
];

/// Constellation point on the transition from each current state (row) to each next
/// state (column).
const TRANSITIONS: [[usize; STATES]; STATES] = [
    [0, 15, 12, 3],
    [4, 11, 8, 7],
    [13, 2, 1, 14],
    [9, 6, 5, 10],
];

/// Get the four coded bits on the transition between the given states.
fn coded_bits(cur: usize, next: usize) -> u8 {
    let (hi, lo) = PAIRS[TRANSITIONS[cur][next]];
    hi << 2 | lo
}

/// Number of differing bits between two 4-bit codewords.
fn distance(a: u8, b: u8) -> usize {
    (a ^ b).count_ones() as usize
}

/// Half-rate trellis code state machine. Each fed-in symbol becomes the next state.
pub struct TrellisFsm {
    /// Current state.
    state: usize,
}

impl TrellisFsm {
    /// Construct a new `TrellisFsm` at the initial state.
    pub fn new() -> TrellisFsm {
        TrellisFsm { state: 0 }
    }

    /// Apply the given symbol to the state machine and return the four coded bits on
    /// the transition.
    pub fn feed(&mut self, input: Dibit) -> u8 {
        let next = input.bits() as usize;
        let bits = coded_bits(self.state, next);

        self.state = next;

        bits
    }

    /// Flush the state machine with the finishing symbol and return the final
    /// transition.
    pub fn finish(&mut self) -> u8 {
        self.feed(Dibit::new(0b00))
    }
}

impl Default for TrellisFsm {
    fn default() -> Self {
        TrellisFsm::new()
    }
}

/// Replace the 96 data bits at `[start, start + 96)` with their 196-bit coded form
/// filling `[start, end)`. Panics unless the range spans exactly 196 bits.
pub fn encode(buf: &mut BitBuffer, start: usize, end: usize) {
    assert!(end - start == BLOCK_BITS, "invalid block range");

    let mut fsm = TrellisFsm::new();
    let mut words = [0u8; STEPS];

    (0..STEPS - 1)
        .map(|i| {
            let dibit = Dibit::new(buf.get_int(start + 2 * i..start + 2 * i + 2) as u8);
            fsm.feed(dibit)
        })
        .collect_slice_checked(&mut words[..STEPS - 1]);

    words[STEPS - 1] = fsm.finish();

    buf.clear(start, end);

    for (i, &w) in words.iter().enumerate() {
        for b in 0..4 {
            if w >> (3 - b) & 1 == 1 {
                buf.set(start + 4 * i + b);
            }
        }
    }
}

/// Decodes coded blocks to the maximum-likelihood data sequence with the Viterbi
/// algorithm.
///
/// Traceback covers the whole block, and the trellis arrays are allocated once per
/// decoder, so per-block decoding is allocation-free.
pub struct TrellisHalfRate {
    /// Path metric for each state after each step.
    metrics: [[usize; STATES]; STEPS + 1],
    /// Predecessor state on the surviving path into each state at each step.
    prev: [[usize; STATES]; STEPS],
}

impl TrellisHalfRate {
    /// Construct a new `TrellisHalfRate` with cleared trellis arrays.
    pub fn new() -> TrellisHalfRate {
        TrellisHalfRate {
            metrics: [[0; STATES]; STEPS + 1],
            prev: [[0; STATES]; STEPS],
        }
    }

    /// Decode the 196 coded bits at `[start, end)` in place: the first 98 bits of the
    /// range become the decoded data and the remainder is cleared. Decoding always
    /// yields the nearest codeword, with ties resolved to the lowest-numbered state.
    /// Panics unless the range spans exactly 196 bits.
    pub fn decode(&mut self, buf: &mut BitBuffer, start: usize, end: usize) {
        assert!(end - start == BLOCK_BITS, "invalid block range");

        // The encoder always starts at state 0.
        self.metrics[0] = [0, UNREACHED, UNREACHED, UNREACHED];

        for step in 0..STEPS {
            let pos = start + 4 * step;
            let received = buf.get_int(pos..pos + 4) as u8;

            for next in 0..STATES {
                let mut best = (UNREACHED, 0);

                for cur in 0..STATES {
                    let metric = self.metrics[step][cur] + distance(coded_bits(cur, next), received);

                    if metric < best.0 {
                        best = (metric, cur);
                    }
                }

                self.metrics[step + 1][next] = best.0;
                self.prev[step][next] = best.1;
            }
        }

        // Walk the surviving path backwards from the best final state. Each decoded
        // symbol equals the state its transition entered.
        let mut state = (0..STATES).fold(0, |best, s| {
            if self.metrics[STEPS][s] < self.metrics[STEPS][best] {
                s
            } else {
                best
            }
        });

        let mut dibits = [Dibit::default(); STEPS];

        for step in (0..STEPS).rev() {
            dibits[step] = Dibit::new(state as u8);
            state = self.prev[step][state];
        }

        buf.clear(start, end);

        for (i, d) in dibits.iter().enumerate() {
            if d.hi() == 1 {
                buf.set(start + 2 * i);
            }

            if d.lo() == 1 {
                buf.set(start + 2 * i + 1);
            }
        }
    }
}

impl Default for TrellisHalfRate {
    fn default() -> Self {
        TrellisHalfRate::new()
    }
}
