//! Decode various trunking-related packet fields.

/// Options that can be requested/granted by a service.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ServiceOptions(u8);

impl ServiceOptions {
    /// Create a new `ServiceOptions` from the given 8-bit field.
    pub fn new(opts: u8) -> ServiceOptions {
        ServiceOptions(opts)
    }

    /// Whether the service should be processed as an emergency.
    pub fn emergency(&self) -> bool {
        self.0 >> 7 == 1
    }

    /// Whether the channel should be encrypted.
    pub fn protected(&self) -> bool {
        self.0 >> 6 & 1 == 1
    }

    /// Whether the channel should be full duplex for simultaneous transmit and receive
    /// (otherwise fall back to half duplex.)
    pub fn full_duplex(&self) -> bool {
        self.0 >> 5 & 1 == 1
    }

    /// Whether the service should be packet switched (otherwise fall back to circuit
    /// switched.)
    pub fn packet_switched(&self) -> bool {
        self.0 >> 4 & 1 == 1
    }

    /// Priority assigned to the service, with 1 as lowest and 7 as highest.
    pub fn prio(&self) -> u8 {
        self.0 & 0x7
    }
}

/// Uniquely identifies a channel within a site.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Channel(u16);

impl Channel {
    /// Create a new `Channel` from the given 16-bit field.
    pub fn new(bits: u16) -> Channel {
        Channel(bits)
    }

    /// Channel ID whose parameters to use.
    pub fn id(&self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Individual channel number within the channel ID.
    pub fn number(&self) -> u16 {
        self.0 & 0xFFF
    }
}

/// Identifies which group a message belongs to.
///
/// In a production P25 system, users can set their radios to receive one or more
/// talkgroups, and the radio will only unsquelch if one of those talkgroups is seen.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TalkGroup {
    /// Includes nobody.
    Nobody,
    /// Default talkgroup when no other is selected.
    Default,
    /// Includes everybody.
    Everybody,
    /// Specific group of users.
    Other(u16),
}

impl TalkGroup {
    /// Parse a talkgroup from the given 16 bits.
    pub fn from_bits(bits: u16) -> TalkGroup {
        use self::TalkGroup::*;

        match bits {
            0x0000 => Nobody,
            0x0001 => Default,
            0xFFFF => Everybody,
            _ => Other(bits),
        }
    }
}

/// Services advertised by a site.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SystemServices(u8);

impl SystemServices {
    /// Create a new `SystemServices` from the given 8-bit field.
    pub fn new(ssc: u8) -> SystemServices {
        SystemServices(ssc)
    }

    pub fn is_composite(&self) -> bool {
        self.0 & 0x01 != 0
    }

    pub fn updates_only(&self) -> bool {
        self.0 & 0x02 != 0
    }

    pub fn is_backup(&self) -> bool {
        self.0 & 0x04 != 0
    }

    pub fn has_data(&self) -> bool {
        self.0 & 0x10 != 0
    }

    pub fn has_voice(&self) -> bool {
        self.0 & 0x20 != 0
    }

    pub fn has_registration(&self) -> bool {
        self.0 & 0x40 != 0
    }

    pub fn has_auth(&self) -> bool {
        self.0 & 0x80 != 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_service_options() {
        let opts = ServiceOptions::new(0b10110101);
        assert!(opts.emergency());
        assert!(!opts.protected());
        assert!(opts.full_duplex());
        assert!(opts.packet_switched());
        assert_eq!(opts.prio(), 5);
    }

    #[test]
    fn test_channel() {
        let ch = Channel::new(0x2123);
        assert_eq!(ch.id(), 2);
        assert_eq!(ch.number(), 0x123);
    }

    #[test]
    fn test_talk_group() {
        assert_eq!(TalkGroup::from_bits(0x0000), TalkGroup::Nobody);
        assert_eq!(TalkGroup::from_bits(0x0001), TalkGroup::Default);
        assert_eq!(TalkGroup::from_bits(0xFFFF), TalkGroup::Everybody);
        assert_eq!(TalkGroup::from_bits(0x0A0B), TalkGroup::Other(0x0A0B));
    }

    #[test]
    fn test_system_services() {
        let ssc = SystemServices::new(0b01110001);
        assert!(ssc.is_composite());
        assert!(!ssc.updates_only());
        assert!(ssc.has_data());
        assert!(ssc.has_voice());
        assert!(ssc.has_registration());
        assert!(!ssc.has_auth());
    }
}
