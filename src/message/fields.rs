//! Bit positions of NID and PDU header fields within an assembled message.
//!
//! Bit 0 of a message is the first bit following the frame sync sequence.

use std::ops::Range;

/// Network Access Code field of the NID.
pub const NAC: Range<usize> = 0..12;

/// Data Unit ID field of the NID.
pub const DUID: Range<usize> = 12..16;

/// Blocks-to-follow counter of the PDU header. Continuation is determined from the
/// coded header bits, before any block decoding takes place.
pub const PDU_BLOCKS_TO_FOLLOW: Range<usize> = 113..120;

/// Pad block counter of the PDU header.
pub const PDU_PAD_BLOCKS: Range<usize> = 123..128;
