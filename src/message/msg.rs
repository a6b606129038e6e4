//! Messages emitted to the listener.

use crate::bitbuf::BitBuffer;
use crate::message::duid::DataUnitId;
use crate::message::fields;
use crate::trunking::tsbk::Tsbk;

/// "Digital squelch" NAC field of the NID.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NetworkAccessCode {
    /// Default P25 NAC.
    Default,
    /// Allows a receiver to unsquelch on any NAC (shouldn't be transmitted.)
    ReceiveAny,
    /// Allows a repeater to unsquelch/retransmit any NAC (shouldn't be transmitted.)
    RepeatAny,
    /// Custom NAC.
    Other(u16),
}

impl NetworkAccessCode {
    /// Parse 12 bits into a NAC.
    pub fn from_bits(bits: u16) -> NetworkAccessCode {
        use self::NetworkAccessCode::*;

        assert!(bits >> 12 == 0);

        match bits {
            0x293 => Default,
            0xF7E => ReceiveAny,
            0xF7F => RepeatAny,
            _ => Other(bits),
        }
    }

    /// Convert NAC to a 12-bit word.
    pub fn to_bits(self) -> u16 {
        use self::NetworkAccessCode::*;

        match self {
            Default => 0x293,
            ReceiveAny => 0xF7E,
            RepeatAny => 0xF7F,
            Other(bits) => bits,
        }
    }
}

/// Snapshot of an assembled data unit, starting with the NID.
#[derive(Clone, Debug)]
pub struct RawMessage {
    /// Data unit the message was assembled as.
    duid: DataUnitId,
    /// Assembled message bits.
    bits: BitBuffer,
}

impl RawMessage {
    /// Wrap the given assembled bits.
    pub fn new(duid: DataUnitId, bits: BitBuffer) -> RawMessage {
        RawMessage { duid, bits }
    }

    /// Data unit the message was assembled as.
    pub fn duid(&self) -> DataUnitId {
        self.duid
    }

    /// Assembled message bits.
    pub fn bits(&self) -> &BitBuffer {
        &self.bits
    }

    /// NAC field of the NID.
    pub fn nac(&self) -> NetworkAccessCode {
        NetworkAccessCode::from_bits(self.bits.get_int(fields::NAC) as u16)
    }
}

/// A message assembled from one P25 data unit.
#[derive(Clone, Debug)]
pub enum Message {
    /// Voice header data unit.
    Hdu(RawMessage),
    /// Simple terminator.
    Tdu(RawMessage),
    /// Terminator with link control word.
    TduLc(RawMessage),
    /// Voice superframe 1.
    Ldu1(RawMessage),
    /// Voice superframe 2.
    Ldu2(RawMessage),
    /// Packet data unit header or continuation (check the inner DUID.)
    Pdu(RawMessage),
    /// Decoded trunking signalling block.
    Tsbk(Tsbk),
    /// Data unit with an unrecognized DUID, dispatched raw.
    Unknown(RawMessage),
}

impl Message {
    /// Data unit this message was assembled as.
    pub fn duid(&self) -> DataUnitId {
        use self::Message::*;

        match self {
            Hdu(m) | Tdu(m) | TduLc(m) | Ldu1(m) | Ldu2(m) | Pdu(m) | Unknown(m) => m.duid(),
            Tsbk(t) => t.fields().duid(),
        }
    }

    /// Number of bits in the message payload.
    pub fn bit_len(&self) -> usize {
        use self::Message::*;

        match self {
            Hdu(m) | Tdu(m) | TduLc(m) | Ldu1(m) | Ldu2(m) | Pdu(m) | Unknown(m) => m.bits().size(),
            Tsbk(t) => t.fields().bits().size(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nac() {
        assert_eq!(NetworkAccessCode::from_bits(0x293), NetworkAccessCode::Default);
        assert_eq!(NetworkAccessCode::from_bits(0xF7E), NetworkAccessCode::ReceiveAny);
        assert_eq!(NetworkAccessCode::from_bits(0xF7F), NetworkAccessCode::RepeatAny);
        assert_eq!(NetworkAccessCode::from_bits(0x123), NetworkAccessCode::Other(0x123));

        for bits in [0x293, 0xF7E, 0xF7F, 0x123] {
            assert_eq!(NetworkAccessCode::from_bits(bits).to_bits(), bits);
        }
    }

    #[test]
    fn test_raw_message() {
        let mut bits = BitBuffer::new(64);

        // NAC 0x293, DUID 0x3 (TDU).
        for (i, bit) in [0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 1, 0, 0, 1, 1]
            .iter()
            .enumerate()
        {
            if *bit == 1 {
                bits.set(i);
            }
        }

        let msg = RawMessage::new(DataUnitId::Tdu, bits);
        assert_eq!(msg.duid(), DataUnitId::Tdu);
        assert_eq!(msg.nac(), NetworkAccessCode::Default);
        assert_eq!(msg.bits().get_int(fields::DUID), 0x3);
    }
}
