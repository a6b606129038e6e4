//! Typed trunking signalling block (TSBK) messages.

use crate::bitbuf::BitBuffer;
use crate::message::duid::DataUnitId;
use crate::message::msg::NetworkAccessCode;
use crate::trunking::fields::{Channel, ServiceOptions, SystemServices, TalkGroup};

/// Number of bits in a decoded TSBK payload.
pub const PAYLOAD_BITS: usize = 98;

/// Opcode carried in the header of each TSBK.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TsbkOpcode {
    GroupVoiceGrant,
    GroupVoiceUpdate,
    GroupVoiceUpdateExplicit,
    UnitVoiceGrant,
    UnitCallRequest,
    UnitVoiceUpdate,
    PhoneGrant,
    PhoneCallRequest,
    UnitDataGrant,
    GroupDataGrant,
    GroupDataAnnounce,
    GroupDataAnnounceExplicit,
    UnitStatusUpdate,
    UnitStatusQuery,
    UnitShortMessage,
    UnitMonitor,
    UnitCallAlert,
    AckResponse,
    QueuedResponse,
    ExtendedFunctionResponse,
    DenyResponse,
    GroupAffiliationResponse,
    GroupAffiliationQuery,
    LocRegistrationResponse,
    UnitRegistrationResponse,
    UnitRegistrationCommand,
    AuthCommand,
    DeregistrationAck,
    RoamingAddrCommand,
    RoamingAddrUpdate,
    SystemServiceBroadcast,
    AltControlBroadcast,
    RfssStatusBroadcast,
    NetworkStatusBroadcast,
    AdjacentSiteBroadcast,
    ChannelParamsUpdate,
    ProtectionParamBroadcast,
    ProtectionParamUpdate,
    Reserved,
}

impl TsbkOpcode {
    /// Parse the given 6 bits into an opcode.
    pub fn from_bits(bits: u8) -> Option<TsbkOpcode> {
        use self::TsbkOpcode as Op;

        match bits {
            0b000000 => Some(Op::GroupVoiceGrant),
            0b000010 => Some(Op::GroupVoiceUpdate),
            0b000011 => Some(Op::GroupVoiceUpdateExplicit),
            0b000100 => Some(Op::UnitVoiceGrant),
            0b000101 => Some(Op::UnitCallRequest),
            0b000110 => Some(Op::UnitVoiceUpdate),

            0b001000 => Some(Op::PhoneGrant),
            0b001010 => Some(Op::PhoneCallRequest),

            0b010000 => Some(Op::UnitDataGrant),
            0b010001 => Some(Op::GroupDataGrant),
            0b010010 => Some(Op::GroupDataAnnounce),
            0b010011 => Some(Op::GroupDataAnnounceExplicit),

            0b011000 => Some(Op::UnitStatusUpdate),
            0b011010 => Some(Op::UnitStatusQuery),
            0b011100 => Some(Op::UnitShortMessage),
            0b011101 => Some(Op::UnitMonitor),
            0b011111 => Some(Op::UnitCallAlert),

            0b100000 => Some(Op::AckResponse),
            0b100001 => Some(Op::QueuedResponse),
            0b100100 => Some(Op::ExtendedFunctionResponse),
            0b100111 => Some(Op::DenyResponse),

            0b101000 => Some(Op::GroupAffiliationResponse),
            0b101010 => Some(Op::GroupAffiliationQuery),
            0b101011 => Some(Op::LocRegistrationResponse),
            0b101100 => Some(Op::UnitRegistrationResponse),
            0b101101 => Some(Op::UnitRegistrationCommand),
            0b101110 => Some(Op::AuthCommand),
            0b101111 => Some(Op::DeregistrationAck),

            0b110110 => Some(Op::RoamingAddrCommand),
            0b110111 => Some(Op::RoamingAddrUpdate),

            0b111000 => Some(Op::SystemServiceBroadcast),
            0b111001 => Some(Op::AltControlBroadcast),
            0b111010 => Some(Op::RfssStatusBroadcast),
            0b111011 => Some(Op::NetworkStatusBroadcast),
            0b111100 => Some(Op::AdjacentSiteBroadcast),
            0b111101 => Some(Op::ChannelParamsUpdate),
            0b111110 => Some(Op::ProtectionParamBroadcast),
            0b111111 => Some(Op::ProtectionParamUpdate),

            0b000000..=0b111111 => Some(Op::Reserved),

            _ => None,
        }
    }
}

/// Header fields and payload common to every TSBK.
#[derive(Clone, Debug)]
pub struct TsbkFields {
    /// Data unit (TSBK1/2/3) the block arrived as.
    duid: DataUnitId,
    /// NAC of the system that issued the block.
    nac: NetworkAccessCode,
    /// Decoded payload bits.
    bits: BitBuffer,
}

impl TsbkFields {
    /// Wrap a decoded 98-bit payload received with the given NAC.
    pub fn new(duid: DataUnitId, nac: NetworkAccessCode, bits: BitBuffer) -> TsbkFields {
        assert!(bits.size() == PAYLOAD_BITS);

        TsbkFields { duid, nac, bits }
    }

    /// Data unit the block arrived as.
    pub fn duid(&self) -> DataUnitId {
        self.duid
    }

    /// NAC of the issuing system.
    pub fn nac(&self) -> NetworkAccessCode {
        self.nac
    }

    /// Whether this block ends its TSBK sequence.
    pub fn last_block(&self) -> bool {
        self.bits.get_int(0..1) == 1
    }

    /// Whether the payload is encrypted.
    pub fn protected(&self) -> bool {
        self.bits.get_int(1..2) == 1
    }

    /// Raw 6-bit opcode field.
    pub fn opcode_bits(&self) -> u8 {
        self.bits.get_int(2..8) as u8
    }

    /// Opcode, if recognized.
    pub fn opcode(&self) -> Option<TsbkOpcode> {
        TsbkOpcode::from_bits(self.opcode_bits())
    }

    /// Manufacturer ID.
    pub fn mfg(&self) -> u8 {
        self.bits.get_int(8..16) as u8
    }

    /// Transmitted CRC-16.
    pub fn crc(&self) -> u16 {
        self.bits.get_int(80..96) as u16
    }

    /// Raw payload bits.
    pub fn bits(&self) -> &BitBuffer {
        &self.bits
    }
}

/// Grants a channel for a talkgroup voice call.
#[derive(Clone, Debug)]
pub struct GroupVoiceGrant(TsbkFields);

impl GroupVoiceGrant {
    /// Options requested for the call.
    pub fn opts(&self) -> ServiceOptions {
        ServiceOptions::new(self.0.bits().get_int(16..24) as u8)
    }

    /// Channel granted for the call.
    pub fn channel(&self) -> Channel {
        Channel::new(self.0.bits().get_int(24..40) as u16)
    }

    /// Talkgroup the call is directed to.
    pub fn talk_group(&self) -> TalkGroup {
        TalkGroup::from_bits(self.0.bits().get_int(40..56) as u16)
    }

    /// Unit that requested the call.
    pub fn src_unit(&self) -> u32 {
        self.0.bits().get_int(56..80) as u32
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Announces the channels of calls in progress on other talkgroups.
#[derive(Clone, Debug)]
pub struct GroupVoiceUpdate(TsbkFields);

impl GroupVoiceUpdate {
    pub fn channel_a(&self) -> Channel {
        Channel::new(self.0.bits().get_int(16..32) as u16)
    }

    pub fn talk_group_a(&self) -> TalkGroup {
        TalkGroup::from_bits(self.0.bits().get_int(32..48) as u16)
    }

    pub fn channel_b(&self) -> Channel {
        Channel::new(self.0.bits().get_int(48..64) as u16)
    }

    pub fn talk_group_b(&self) -> TalkGroup {
        TalkGroup::from_bits(self.0.bits().get_int(64..80) as u16)
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Grants a channel for a unit-to-unit voice call.
#[derive(Clone, Debug)]
pub struct UnitVoiceGrant(TsbkFields);

impl UnitVoiceGrant {
    /// Channel granted for the call.
    pub fn channel(&self) -> Channel {
        Channel::new(self.0.bits().get_int(16..32) as u16)
    }

    /// Unit the call is directed to.
    pub fn dest_unit(&self) -> u32 {
        self.0.bits().get_int(32..56) as u32
    }

    /// Unit that requested the call.
    pub fn src_unit(&self) -> u32 {
        self.0.bits().get_int(56..80) as u32
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Grants a channel for a unit-to-unit data call.
#[derive(Clone, Debug)]
pub struct UnitDataGrant(TsbkFields);

impl UnitDataGrant {
    /// Channel granted for the call.
    pub fn channel(&self) -> Channel {
        Channel::new(self.0.bits().get_int(16..32) as u16)
    }

    /// Unit the data is directed to.
    pub fn dest_unit(&self) -> u32 {
        self.0.bits().get_int(32..56) as u32
    }

    /// Unit that requested the grant.
    pub fn src_unit(&self) -> u32 {
        self.0.bits().get_int(56..80) as u32
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Acknowledges a previous request.
#[derive(Clone, Debug)]
pub struct AckResponse(TsbkFields);

impl AckResponse {
    /// Unit the acknowledgement is directed to.
    pub fn dest_unit(&self) -> u32 {
        self.0.bits().get_int(32..56) as u32
    }

    /// Unit that sourced the acknowledgement.
    pub fn src_unit(&self) -> u32 {
        self.0.bits().get_int(56..80) as u32
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Denies a previous request.
#[derive(Clone, Debug)]
pub struct DenyResponse(TsbkFields);

impl DenyResponse {
    /// Reason the request was denied.
    pub fn reason(&self) -> u8 {
        self.0.bits().get_int(24..32) as u8
    }

    /// Unit the denial is directed to.
    pub fn dest_unit(&self) -> u32 {
        self.0.bits().get_int(56..80) as u32
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Describes the current RF subsystem site.
#[derive(Clone, Debug)]
pub struct RfssStatusBroadcast(TsbkFields);

impl RfssStatusBroadcast {
    /// Location registration area of the site.
    pub fn area(&self) -> u8 {
        self.0.bits().get_int(16..24) as u8
    }

    /// System ID within the WACN.
    pub fn system(&self) -> u16 {
        self.0.bits().get_int(28..40) as u16
    }

    /// RF subsystem ID within the system.
    pub fn rfss(&self) -> u8 {
        self.0.bits().get_int(40..48) as u8
    }

    /// Site ID within the RFSS.
    pub fn site(&self) -> u8 {
        self.0.bits().get_int(48..56) as u8
    }

    /// Control channel of the site.
    pub fn channel(&self) -> Channel {
        Channel::new(self.0.bits().get_int(56..72) as u16)
    }

    /// Services advertised by the site.
    pub fn services(&self) -> SystemServices {
        SystemServices::new(self.0.bits().get_int(72..80) as u8)
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Describes the wide-area network the site belongs to.
#[derive(Clone, Debug)]
pub struct NetworkStatusBroadcast(TsbkFields);

impl NetworkStatusBroadcast {
    /// Location registration area of the site.
    pub fn area(&self) -> u8 {
        self.0.bits().get_int(16..24) as u8
    }

    /// Wide area communication network ID.
    pub fn wacn(&self) -> u32 {
        self.0.bits().get_int(24..44) as u32
    }

    /// System ID within the WACN.
    pub fn system(&self) -> u16 {
        self.0.bits().get_int(44..56) as u16
    }

    /// Control channel of the site.
    pub fn channel(&self) -> Channel {
        Channel::new(self.0.bits().get_int(56..72) as u16)
    }

    /// Services advertised by the network.
    pub fn services(&self) -> SystemServices {
        SystemServices::new(self.0.bits().get_int(72..80) as u8)
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// Describes a site adjacent to the current one.
#[derive(Clone, Debug)]
pub struct AdjacentSiteBroadcast(TsbkFields);

impl AdjacentSiteBroadcast {
    /// Location registration area of the adjacent site.
    pub fn area(&self) -> u8 {
        self.0.bits().get_int(16..24) as u8
    }

    /// System ID within the WACN.
    pub fn system(&self) -> u16 {
        self.0.bits().get_int(28..40) as u16
    }

    /// RF subsystem ID within the system.
    pub fn rfss(&self) -> u8 {
        self.0.bits().get_int(40..48) as u8
    }

    /// Site ID within the RFSS.
    pub fn site(&self) -> u8 {
        self.0.bits().get_int(48..56) as u8
    }

    /// Control channel of the adjacent site.
    pub fn channel(&self) -> Channel {
        Channel::new(self.0.bits().get_int(56..72) as u16)
    }

    /// Services advertised by the adjacent site.
    pub fn services(&self) -> SystemServices {
        SystemServices::new(self.0.bits().get_int(72..80) as u8)
    }

    /// Shared header fields.
    pub fn fields(&self) -> &TsbkFields {
        &self.0
    }
}

/// A decoded TSBK, selected by opcode.
///
/// Unknown and unhandled opcodes fall back to `Other`, which preserves the raw
/// payload.
#[derive(Clone, Debug)]
pub enum Tsbk {
    GroupVoiceGrant(GroupVoiceGrant),
    GroupVoiceUpdate(GroupVoiceUpdate),
    UnitVoiceGrant(UnitVoiceGrant),
    UnitDataGrant(UnitDataGrant),
    AckResponse(AckResponse),
    DenyResponse(DenyResponse),
    RfssStatusBroadcast(RfssStatusBroadcast),
    NetworkStatusBroadcast(NetworkStatusBroadcast),
    AdjacentSiteBroadcast(AdjacentSiteBroadcast),
    Other(TsbkFields),
}

impl Tsbk {
    /// Construct the typed message for the given decoded payload.
    pub fn new(fields: TsbkFields) -> Tsbk {
        match fields.opcode() {
            Some(TsbkOpcode::GroupVoiceGrant) => Tsbk::GroupVoiceGrant(GroupVoiceGrant(fields)),
            Some(TsbkOpcode::GroupVoiceUpdate) => Tsbk::GroupVoiceUpdate(GroupVoiceUpdate(fields)),
            Some(TsbkOpcode::UnitVoiceGrant) => Tsbk::UnitVoiceGrant(UnitVoiceGrant(fields)),
            Some(TsbkOpcode::UnitDataGrant) => Tsbk::UnitDataGrant(UnitDataGrant(fields)),
            Some(TsbkOpcode::AckResponse) => Tsbk::AckResponse(AckResponse(fields)),
            Some(TsbkOpcode::DenyResponse) => Tsbk::DenyResponse(DenyResponse(fields)),
            Some(TsbkOpcode::RfssStatusBroadcast) => {
                Tsbk::RfssStatusBroadcast(RfssStatusBroadcast(fields))
            }
            Some(TsbkOpcode::NetworkStatusBroadcast) => {
                Tsbk::NetworkStatusBroadcast(NetworkStatusBroadcast(fields))
            }
            Some(TsbkOpcode::AdjacentSiteBroadcast) => {
                Tsbk::AdjacentSiteBroadcast(AdjacentSiteBroadcast(fields))
            }
            _ => Tsbk::Other(fields),
        }
    }

    /// Shared header fields of any variant.
    pub fn fields(&self) -> &TsbkFields {
        match self {
            Tsbk::GroupVoiceGrant(m) => m.fields(),
            Tsbk::GroupVoiceUpdate(m) => m.fields(),
            Tsbk::UnitVoiceGrant(m) => m.fields(),
            Tsbk::UnitDataGrant(m) => m.fields(),
            Tsbk::AckResponse(m) => m.fields(),
            Tsbk::DenyResponse(m) => m.fields(),
            Tsbk::RfssStatusBroadcast(m) => m.fields(),
            Tsbk::NetworkStatusBroadcast(m) => m.fields(),
            Tsbk::AdjacentSiteBroadcast(m) => m.fields(),
            Tsbk::Other(f) => f,
        }
    }

    /// Whether this block ends its TSBK sequence.
    pub fn is_last_block(&self) -> bool {
        self.fields().last_block()
    }
}
