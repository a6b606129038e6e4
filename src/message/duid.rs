//! Data Unit Identifier (DUID) registry.

use crate::consts::{BLOCK_BITS, BLOCK_END, NID_BITS};

/// Data unit carried by a P25 frame, as selected by the DUID field of the NID.
///
/// The continuation variants (`Pdu2`/`Pdu3` and `Tsbk2`/`Tsbk3`) never appear in the
/// NID itself. The assembler enters them when a PDU header or a non-final TSBK asks
/// for more blocks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataUnitId {
    /// Placeholder before the DUID field has been read.
    Nid,
    /// Header data unit preceding a voice call.
    Hdu,
    /// Simple terminator data unit.
    Tdu,
    /// Voice superframe 1.
    Ldu1,
    /// First trunking signalling block.
    Tsbk1,
    /// Voice superframe 2.
    Ldu2,
    /// Packet data unit header.
    Pdu1,
    /// Terminator data unit with link control word.
    TduLc,
    /// First packet data unit continuation.
    Pdu2,
    /// Second packet data unit continuation.
    Pdu3,
    /// Second trunking signalling block.
    Tsbk2,
    /// Third and final trunking signalling block.
    Tsbk3,
    /// Unrecognized DUID code.
    Unknown,
}

impl DataUnitId {
    /// Select a data unit from the given 4-bit DUID code.
    pub fn from_bits(bits: u8) -> DataUnitId {
        use self::DataUnitId::*;

        assert!(bits >> 4 == 0);

        match bits {
            0x0 => Hdu,
            0x3 => Tdu,
            0x5 => Ldu1,
            0x7 => Tsbk1,
            0xA => Ldu2,
            0xC => Pdu1,
            0xF => TduLc,
            _ => Unknown,
        }
    }

    /// Convert the data unit to its 4-bit DUID code, if it has one.
    pub fn to_bits(self) -> Option<u8> {
        use self::DataUnitId::*;

        match self {
            Hdu => Some(0x0),
            Tdu => Some(0x3),
            Ldu1 => Some(0x5),
            Tsbk1 => Some(0x7),
            Ldu2 => Some(0xA),
            Pdu1 => Some(0xC),
            TduLc => Some(0xF),
            _ => None,
        }
    }

    /// Number of message bits in this data unit, including the NID.
    pub fn bit_len(self) -> usize {
        use self::DataUnitId::*;

        match self {
            // An unrecognized unit is dispatched as its bare NID.
            Nid | Unknown => NID_BITS,
            Hdu => 792,
            Tdu => 504,
            Ldu1 | Ldu2 => 1728,
            // Continuation blocks refill the same coded block span.
            Tsbk1 | Tsbk2 | Tsbk3 => BLOCK_END,
            Pdu1 => BLOCK_END,
            Pdu2 => NID_BITS + 2 * BLOCK_BITS,
            Pdu3 => NID_BITS + 3 * BLOCK_BITS,
            TduLc => 648,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_bits() {
        assert_eq!(DataUnitId::from_bits(0x0), DataUnitId::Hdu);
        assert_eq!(DataUnitId::from_bits(0x3), DataUnitId::Tdu);
        assert_eq!(DataUnitId::from_bits(0x5), DataUnitId::Ldu1);
        assert_eq!(DataUnitId::from_bits(0x7), DataUnitId::Tsbk1);
        assert_eq!(DataUnitId::from_bits(0xA), DataUnitId::Ldu2);
        assert_eq!(DataUnitId::from_bits(0xC), DataUnitId::Pdu1);
        assert_eq!(DataUnitId::from_bits(0xF), DataUnitId::TduLc);
        assert_eq!(DataUnitId::from_bits(0x1), DataUnitId::Unknown);
        assert_eq!(DataUnitId::from_bits(0xE), DataUnitId::Unknown);
    }

    #[test]
    #[should_panic]
    fn test_from_bits_invalid() {
        DataUnitId::from_bits(0x10);
    }

    #[test]
    fn test_round_trip() {
        for bits in [0x0, 0x3, 0x5, 0x7, 0xA, 0xC, 0xF] {
            assert_eq!(DataUnitId::from_bits(bits).to_bits(), Some(bits));
        }

        assert_eq!(DataUnitId::Nid.to_bits(), None);
        assert_eq!(DataUnitId::Tsbk2.to_bits(), None);
    }

    #[test]
    fn test_bit_len() {
        assert_eq!(DataUnitId::Nid.bit_len(), 64);
        assert_eq!(DataUnitId::Tdu.bit_len(), 504);
        assert_eq!(DataUnitId::Tsbk1.bit_len(), 260);
        assert_eq!(DataUnitId::Tsbk3.bit_len(), 260);
        assert_eq!(DataUnitId::Pdu1.bit_len(), 260);
        assert_eq!(DataUnitId::Pdu2.bit_len(), 456);
        assert_eq!(DataUnitId::Pdu3.bit_len(), 652);
    }
}
