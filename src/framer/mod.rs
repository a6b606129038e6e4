//! Frame synchronization and data unit framing.

mod assembler;

pub use self::assembler::MessageAssembler;

use tracing::debug;

use crate::bits::Dibit;
use crate::consts::{STATUS_BITS, SYNC_PATTERN};
use crate::message::msg::Message;
use crate::stats::FramerStats;
use crate::sync::SyncMatcher;

/// A push-style sink of items.
pub trait Listener<T> {
    /// Handle the next item.
    fn receive(&mut self, item: T);
}

impl<T, F: FnMut(T)> Listener<T> for F {
    fn receive(&mut self, item: T) {
        self(item)
    }
}

/// Construction-time framer parameters.
#[derive(Clone, Debug)]
pub struct FramerConfig {
    /// 48-bit frame sync pattern to lock onto.
    pub sync_pattern: u64,
    /// Whether the incoming dibit stream has reversed polarity.
    pub inverted: bool,
    /// Bit positions of status symbols, relative to the first bit after sync.
    pub status_schedule: Vec<u16>,
    /// Number of pooled assemblers, minimum 1.
    pub pool_size: u8,
}

impl Default for FramerConfig {
    fn default() -> FramerConfig {
        FramerConfig {
            sync_pattern: SYNC_PATTERN,
            inverted: false,
            status_schedule: STATUS_BITS.to_vec(),
            pool_size: 2,
        }
    }
}

/// Frames a C4FM dibit stream into P25 messages.
///
/// Each [`receive`](Self::receive) call consumes one symbol. When the sync pattern is
/// seen, an idle assembler from the pool is activated to capture the following data
/// unit; completed units are pushed to the registered listener. Two assemblers are
/// pooled by default, so a false sync trigger inside noise or payload doesn't mask
/// the subsequent true sync.
pub struct Framer {
    /// Sliding matcher for the frame sync sequence.
    matcher: SyncMatcher,
    /// Pool of assembly contexts.
    assemblers: Vec<MessageAssembler>,
    /// Sink for completed messages.
    listener: Option<Box<dyn Listener<Message>>>,
    /// Whether to flip each incoming dibit.
    inverted: bool,
    /// Runtime counters.
    stats: FramerStats,
}

impl Framer {
    /// Create a new `Framer` with the given parameters and no listener.
    pub fn new(config: FramerConfig) -> Framer {
        assert!(config.pool_size >= 1);

        Framer {
            matcher: SyncMatcher::new(config.sync_pattern),
            assemblers: (0..config.pool_size)
                .map(|_| MessageAssembler::new(config.status_schedule.clone()))
                .collect(),
            listener: None,
            inverted: config.inverted,
            stats: FramerStats::default(),
        }
    }

    /// Create a new `Framer` with the standard P25 parameters.
    pub fn p25() -> Framer {
        Framer::new(FramerConfig::default())
    }

    /// Feed in the next symbol.
    pub fn receive(&mut self, dibit: Dibit) {
        let dibit = if self.inverted { dibit.invert() } else { dibit };

        self.matcher.receive(dibit.hi() == 1);
        self.matcher.receive(dibit.lo() == 1);

        for i in 0..self.assemblers.len() {
            if !self.assemblers[i].is_active() {
                continue;
            }

            if let Some(msg) = self.assemblers[i].receive(dibit) {
                self.dispatch(msg);
            }

            if self.assemblers[i].complete() {
                self.assemblers[i].reset();
            }
        }

        if self.matcher.matches() {
            self.stats.syncs += 1;
            self.activate();
        }
    }

    /// Activate an idle assembler for a newly detected sync.
    fn activate(&mut self) {
        match self.assemblers.iter_mut().find(|a| !a.is_active()) {
            Some(asm) => asm.set_active(true),
            None => {
                self.stats.pool_exhausted += 1;
                debug!("no inactive message assembler available");
            }
        }
    }

    /// Push the given message to the listener, if one is registered.
    fn dispatch(&mut self, msg: Message) {
        self.stats.messages += 1;

        if let Some(listener) = &mut self.listener {
            listener.receive(msg);
        }
    }

    /// Register the message sink.
    pub fn set_listener(&mut self, listener: Box<dyn Listener<Message>>) {
        self.listener = Some(listener);
    }

    /// Detach the message sink. Messages completed afterwards are dropped.
    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    /// Return the framer to its construction state: sync search with all assemblers
    /// idle and counters cleared. The listener stays registered.
    pub fn reset(&mut self) {
        self.matcher.reset();

        for asm in &mut self.assemblers {
            asm.reset();
        }

        self.stats.clear();
    }

    /// Runtime counters accumulated so far.
    pub fn stats(&self) -> &FramerStats {
        &self.stats
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::mpsc;

    use crate::bitbuf::BitBuffer;
    use crate::bits::Dibits;
    use crate::coding::{interleave, trellis};
    use crate::consts::{BLOCK_BEGIN, BLOCK_END, NID_BITS, SYNC_PATTERN};
    use crate::message::duid::DataUnitId;
    use crate::message::msg::NetworkAccessCode;
    use crate::trunking::tsbk::Tsbk;

    /// Attach a channel-backed listener to the given framer.
    fn listen(framer: &mut Framer) -> mpsc::Receiver<Message> {
        let (tx, rx) = mpsc::channel();
        framer.set_listener(Box::new(move |msg| tx.send(msg).unwrap()));
        rx
    }

    /// Feed the 24 sync symbols.
    fn feed_sync(framer: &mut Framer) {
        let bytes = SYNC_PATTERN.to_be_bytes();

        for dibit in Dibits::new(bytes[2..].iter().cloned()) {
            framer.receive(dibit);
        }
    }

    /// Feed message bits as dibits, inserting a junk status dibit at each schedule
    /// position.
    fn feed_frame(framer: &mut Framer, bits: &[bool]) {
        assert!(bits.len() % 2 == 0);

        let mut status_idx = 0;
        let mut appended = 0;

        for pair in bits.chunks(2) {
            if status_idx < STATUS_BITS.len() && appended == STATUS_BITS[status_idx] as usize {
                framer.receive(Dibit::new(0b01));
                status_idx += 1;
            }

            framer.receive(Dibit::from_bits(pair[0], pair[1]));
            appended += 2;
        }
    }

    /// Message bits carrying the default NAC and the given DUID code, zero-padded to
    /// `len` bits.
    fn frame_bits(duid: u8, len: usize) -> Vec<bool> {
        let mut bits = vec![false; len];

        for i in 0..12 {
            bits[i] = 0x293 >> (11 - i) & 1 == 1;
        }

        for i in 0..4 {
            bits[12 + i] = duid >> (3 - i) & 1 == 1;
        }

        bits
    }

    #[test]
    fn test_short_stream_emits_nothing() {
        // Property: any stream shorter than sync plus NID produces no messages.
        let mut framer = Framer::p25();
        let rx = listen(&mut framer);

        feed_sync(&mut framer);

        for _ in 0..31 {
            framer.receive(Dibit::new(0b00));
        }

        assert!(rx.try_recv().is_err());
        assert_eq!(framer.stats().messages, 0);
        assert_eq!(framer.stats().syncs, 1);
    }

    #[test]
    fn test_tdu_frame() {
        let mut framer = Framer::p25();
        let rx = listen(&mut framer);

        feed_sync(&mut framer);
        feed_frame(&mut framer, &frame_bits(0x3, 504));

        let msg = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());

        match msg {
            Message::Tdu(m) => {
                assert_eq!(m.duid(), DataUnitId::Tdu);
                assert_eq!(m.bits().size(), 504);
                assert_eq!(m.nac(), NetworkAccessCode::Default);
            }
            _ => panic!("wrong message"),
        }
    }

    #[test]
    fn test_false_then_true_sync() {
        let mut framer = Framer::p25();
        let rx = listen(&mut framer);

        // A sync trigger followed by noise that reads as an LDU1 NID keeps the first
        // assembler busy well past the real frame.
        feed_sync(&mut framer);
        feed_frame(&mut framer, &frame_bits(0x5, 60));

        feed_sync(&mut framer);
        feed_frame(&mut framer, &frame_bits(0x3, 504));

        let msg = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());
        assert_eq!(msg.duid(), DataUnitId::Tdu);
        assert_eq!(msg.bit_len(), 504);
        assert_eq!(framer.stats().syncs, 2);
        assert_eq!(framer.stats().pool_exhausted, 0);
    }

    #[test]
    fn test_inverted_stream() {
        // Property: an inverted framer on the inverted stream behaves identically.
        let mut framer = Framer::new(FramerConfig {
            inverted: true,
            ..FramerConfig::default()
        });
        let rx = listen(&mut framer);

        let bytes = SYNC_PATTERN.to_be_bytes();

        for dibit in Dibits::new(bytes[2..].iter().cloned()) {
            framer.receive(dibit.invert());
        }

        let mut status_idx = 0;
        let mut appended = 0;

        for pair in frame_bits(0x3, 504).chunks(2) {
            if status_idx < STATUS_BITS.len() && appended == STATUS_BITS[status_idx] as usize {
                framer.receive(Dibit::new(0b01).invert());
                status_idx += 1;
            }

            framer.receive(Dibit::from_bits(pair[0], pair[1]).invert());
            appended += 2;
        }

        let msg = rx.try_recv().unwrap();
        assert_eq!(msg.duid(), DataUnitId::Tdu);
        assert_eq!(msg.bit_len(), 504);
    }

    #[test]
    fn test_pdu_continuation() {
        let mut framer = Framer::p25();
        let rx = listen(&mut framer);

        let mut bits = frame_bits(0xC, DataUnitId::Pdu2.bit_len());

        // Blocks-to-follow 2 plus 22 pad blocks selects the first continuation.
        for i in 0..7 {
            bits[113 + i] = 2 >> (6 - i) & 1 == 1;
        }

        for i in 0..5 {
            bits[123 + i] = 22 >> (4 - i) & 1 == 1;
        }

        feed_sync(&mut framer);
        feed_frame(&mut framer, &bits);

        let msg = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());

        match msg {
            Message::Pdu(m) => {
                assert_eq!(m.duid(), DataUnitId::Pdu2);
                assert_eq!(m.bits().size(), 456);
            }
            _ => panic!("wrong message"),
        }
    }

    #[test]
    fn test_tsbk_frame() {
        let mut framer = Framer::p25();
        let rx = listen(&mut framer);

        // Build a last-block TSBK with a group voice grant opcode.
        let mut block = BitBuffer::new(BLOCK_END);
        block.set(BLOCK_BEGIN);

        trellis::encode(&mut block, BLOCK_BEGIN, BLOCK_END);
        interleave::interleave(&mut block, BLOCK_BEGIN, BLOCK_END);

        let mut bits = frame_bits(0x7, NID_BITS);
        bits.extend((BLOCK_BEGIN..BLOCK_END).map(|i| block.get(i)));

        feed_sync(&mut framer);
        feed_frame(&mut framer, &bits);

        let msg = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());

        match msg {
            Message::Tsbk(Tsbk::GroupVoiceGrant(grant)) => {
                assert_eq!(grant.fields().bits().size(), 98);
                assert_eq!(grant.fields().nac(), NetworkAccessCode::Default);
                assert!(grant.fields().last_block());
            }
            _ => panic!("wrong message"),
        }
    }

    #[test]
    fn test_pool_exhaustion() {
        let mut framer = Framer::new(FramerConfig {
            pool_size: 1,
            ..FramerConfig::default()
        });
        let rx = listen(&mut framer);

        // All-zero bits read as an HDU NID, keeping the single assembler busy for 792
        // bits while a second sync arrives.
        feed_sync(&mut framer);

        for _ in 0..100 {
            framer.receive(Dibit::new(0b00));
        }

        feed_sync(&mut framer);
        assert_eq!(framer.stats().pool_exhausted, 1);

        // Let the HDU run to completion: 396 data dibits plus 11 status skips.
        for _ in 0..(407 - 100 - 24) {
            framer.receive(Dibit::new(0b00));
        }

        let msg = rx.try_recv().unwrap();
        assert!(rx.try_recv().is_err());
        assert_eq!(msg.duid(), DataUnitId::Hdu);
        assert_eq!(msg.bit_len(), 792);
        assert_eq!(framer.stats().messages, 1);
    }

    #[test]
    fn test_reset_matches_construction() {
        // Property: a reset framer behaves like a freshly constructed one.
        let mut fresh = Framer::p25();
        let fresh_rx = listen(&mut fresh);

        let mut reused = Framer::p25();
        let reused_rx = listen(&mut reused);

        // Leave the reused framer mid-frame, then reset it.
        feed_sync(&mut reused);
        feed_frame(&mut reused, &frame_bits(0x5, 600));
        reused.reset();
        assert_eq!(*reused.stats(), FramerStats::default());

        for framer in [&mut fresh, &mut reused] {
            feed_sync(framer);
            feed_frame(framer, &frame_bits(0x3, 504));
        }

        let a = fresh_rx.try_recv().unwrap();
        let b = reused_rx.try_recv().unwrap();

        assert_eq!(a.duid(), b.duid());
        assert_eq!(a.bit_len(), b.bit_len());
        assert_eq!(fresh.stats(), reused.stats());
    }

    #[test]
    fn test_clear_listener() {
        let mut framer = Framer::p25();
        let rx = listen(&mut framer);
        framer.clear_listener();

        feed_sync(&mut framer);
        feed_frame(&mut framer, &frame_bits(0x3, 504));

        // The message was counted but not delivered.
        assert!(rx.try_recv().is_err());
        assert_eq!(framer.stats().messages, 1);
    }
}
