/// Number of bits in the frame sync sequence.
pub const SYNC_BITS: usize = 48;
/// Number of symbols (dibits) in the frame sync sequence.
pub const SYNC_SYMBOLS: usize = SYNC_BITS / 2;
/// Frame sync pattern common to all P25 data units.
pub const SYNC_PATTERN: u64 = 0x5575_F5FF_77FF;
/// Number of bits in the NID word.
pub const NID_BITS: usize = 64;
/// Bit positions of status symbols within an assembled message, relative to the first
/// bit after frame sync. The transmitter inserts a status dibit every 35 symbols, and
/// neither of its bits is part of the message.
pub const STATUS_BITS: [u16; 14] = [
    22, 92, 162, 232, 302, 372, 442, 512, 582, 652, 722, 792, 862, 932,
];
/// Number of message bits between consecutive status symbols.
pub const STATUS_PERIOD: usize = 70;
/// Number of bits in an interleaved, trellis-coded block.
pub const BLOCK_BITS: usize = 196;
/// Number of data bits recovered from a coded block.
pub const BLOCK_DATA_BITS: usize = 98;
/// First bit of the coded block within a TSBK or PDU data unit.
pub const BLOCK_BEGIN: usize = 64;
/// One past the last bit of the coded block.
pub const BLOCK_END: usize = BLOCK_BEGIN + BLOCK_BITS;
/// One past the last payload bit after a block has been decoded in place.
pub const BLOCK_DECODED_END: usize = BLOCK_BEGIN + BLOCK_DATA_BITS;
