//! Per-context assembly state machine for a single data unit.

use crate::bitbuf::BitBuffer;
use crate::bits::Dibit;
use crate::coding::interleave;
use crate::coding::trellis::TrellisHalfRate;
use crate::consts::{BLOCK_BEGIN, BLOCK_DECODED_END, BLOCK_END};
use crate::message::duid::DataUnitId;
use crate::message::fields;
use crate::message::msg::{Message, NetworkAccessCode, RawMessage};
use crate::trunking::tsbk::{Tsbk, TsbkFields};

/// Assembles one data unit at a time from the post-sync dibit stream.
///
/// An assembler is activated when frame sync is detected and then consumes every
/// following dibit: status symbols are discarded and all other bits accumulate into
/// the message buffer. The expected length starts at the NID width and is retargeted
/// as the DUID, and any continuation counters, are read out of the buffer itself.
pub struct MessageAssembler {
    /// Message bits assembled so far.
    message: BitBuffer,
    /// Expected data unit, switched as in-band fields are read.
    duid: DataUnitId,
    /// Bit positions of status symbols, in buffer pointer coordinates.
    status_schedule: Vec<u16>,
    /// Next status symbol position to skip.
    status_idx: usize,
    /// Whether the assembler may consume dibits.
    active: bool,
    /// Latched when the message is fully assembled.
    complete: bool,
    /// Block decoder, allocated once per assembler.
    trellis: TrellisHalfRate,
}

impl MessageAssembler {
    /// Create an idle assembler with the given status symbol schedule.
    pub fn new(status_schedule: Vec<u16>) -> MessageAssembler {
        MessageAssembler {
            message: BitBuffer::new(DataUnitId::Nid.bit_len()),
            duid: DataUnitId::Nid,
            status_schedule,
            status_idx: 0,
            active: false,
            complete: false,
            trellis: TrellisHalfRate::new(),
        }
    }

    /// Whether the assembler is consuming dibits.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the assembler eligible (or not) to consume dibits.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether the current message has been fully assembled.
    pub fn complete(&self) -> bool {
        self.complete
    }

    /// Data unit currently expected.
    pub fn duid(&self) -> DataUnitId {
        self.duid
    }

    /// Return to the idle state: NID length, pointer 0, inactive.
    pub fn reset(&mut self) {
        self.duid = DataUnitId::Nid;
        self.message.set_size(self.duid.bit_len());
        self.message.reset();
        self.status_idx = 0;
        self.complete = false;
        self.active = false;
    }

    /// Feed in the next symbol, possibly producing a completed message. The caller
    /// must [`reset`](Self::reset) the assembler once it reports complete.
    pub fn receive(&mut self, dibit: Dibit) -> Option<Message> {
        if !self.active {
            return None;
        }

        // Status symbols are punctuation of the physical stream, not message bits.
        if self.at_status_symbol() {
            self.status_idx += 1;
            return None;
        }

        let mut overflow = self.message.add(dibit.hi() == 1).is_err();
        overflow |= self.message.add(dibit.lo() == 1).is_err();

        if overflow {
            self.complete = true;
        }

        if self.message.is_full() {
            self.check_complete()
        } else {
            None
        }
    }

    /// Whether the next appended bit would land on a status symbol position.
    fn at_status_symbol(&self) -> bool {
        match self.status_schedule.get(self.status_idx) {
            Some(&pos) => self.message.pointer() == pos as usize,
            None => false,
        }
    }

    /// Determine what to do now that the expected length has been reached: dispatch,
    /// grow into a continuation, or both.
    fn check_complete(&mut self) -> Option<Message> {
        use crate::message::duid::DataUnitId::*;

        match self.duid {
            Nid => {
                let duid = DataUnitId::from_bits(self.message.get_int(fields::DUID) as u8);

                if duid == Unknown {
                    self.duid = Unknown;
                    self.complete = true;
                    Some(Message::Unknown(self.snapshot()))
                } else {
                    self.set_duid(duid);
                    None
                }
            }
            Hdu => self.finish(Message::Hdu),
            Tdu => self.finish(Message::Tdu),
            TduLc => self.finish(Message::TduLc),
            Ldu1 => self.finish(Message::Ldu1),
            Ldu2 => self.finish(Message::Ldu2),
            Pdu1 => {
                let blocks = self.message.get_int(fields::PDU_BLOCKS_TO_FOLLOW);
                let pads = self.message.get_int(fields::PDU_PAD_BLOCKS);

                match blocks + pads {
                    24 | 32 => {
                        self.set_duid(Pdu2);
                        None
                    }
                    36 | 48 => {
                        self.set_duid(Pdu3);
                        None
                    }
                    _ => self.finish(Message::Pdu),
                }
            }
            Pdu2 | Pdu3 => self.finish(Message::Pdu),
            Tsbk1 | Tsbk2 | Tsbk3 => Some(self.decode_tsbk()),
            Unknown => self.finish(Message::Unknown),
        }
    }

    /// Latch completion and wrap the assembled bits.
    fn finish(&mut self, wrap: fn(RawMessage) -> Message) -> Option<Message> {
        self.complete = true;
        Some(wrap(self.snapshot()))
    }

    /// Copy the assembled bits into a dispatchable message.
    fn snapshot(&self) -> RawMessage {
        RawMessage::new(self.duid, self.message.clone())
    }

    /// Decode the coded block that just filled `[64, 260)` and construct its typed
    /// TSBK. A non-final block rewinds the pointer so the next block refills the same
    /// span.
    fn decode_tsbk(&mut self) -> Message {
        use crate::message::duid::DataUnitId::*;

        interleave::deinterleave(&mut self.message, BLOCK_BEGIN, BLOCK_END);
        self.trellis.decode(&mut self.message, BLOCK_BEGIN, BLOCK_END);

        let nac = NetworkAccessCode::from_bits(self.message.get_int(fields::NAC) as u16);
        let payload = self.message.extract(BLOCK_BEGIN, BLOCK_DECODED_END);
        let tsbk = Tsbk::new(TsbkFields::new(self.duid, nac, payload));

        if tsbk.is_last_block() || self.duid == Tsbk3 {
            self.complete = true;
        } else {
            let next = if self.duid == Tsbk1 { Tsbk2 } else { Tsbk3 };

            self.set_duid(next);
            self.message.set_pointer(BLOCK_BEGIN);
        }

        Message::Tsbk(tsbk)
    }

    /// Switch the expected data unit, retargeting the buffer length while keeping the
    /// assembled bits and the pointer.
    fn set_duid(&mut self, duid: DataUnitId) {
        self.duid = duid;
        self.message.set_size(duid.bit_len());
    }
}
