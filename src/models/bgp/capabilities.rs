use num_enum::{FromPrimitive, IntoPrimitive};

/// Optional parameter type of the capabilities advertisement, [RFC5492](https://datatracker.ietf.org/doc/html/rfc5492#section-4).
pub const CAPABILITIES_OPT_PARAM_TYPE: u8 = 2;

#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpCapabilityType {
    MULTIPROTOCOL_EXTENSIONS_FOR_BGP_4 = 1,
    ROUTE_REFRESH_CAPABILITY_FOR_BGP_4 = 2,
    OUTBOUND_ROUTE_FILTERING_CAPABILITY = 3,
    EXTENDED_NEXT_HOP_ENCODING = 5,
    BGP_EXTENDED_MESSAGE = 6,
    BGPSEC_CAPABILITY = 7,
    MULTIPLE_LABELS_CAPABILITY = 8,
    BGP_ROLE = 9,
    GRACEFUL_RESTART_CAPABILITY = 64,
    SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY = 65,
    SUPPORT_FOR_DYNAMIC_CAPABILITY = 67,
    MULTISESSION_BGP_CAPABILITY = 68,
    ADD_PATH_CAPABILITY = 69,
    ENHANCED_ROUTE_REFRESH_CAPABILITY = 70,
    LONG_LIVED_GRACEFUL_RESTART_CAPABILITY = 71,
    ROUTING_POLICY_DISTRIBUTION = 72,
    FQDN_CAPABILITY = 73,

    /// Catch-all type for any deprecated, unassigned, or reserved codes
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// BGP Capability.
///
/// The value is kept opaque; only the four-octet AS number capability is interpreted by this
/// crate.
///
/// ```text
/// +------------------------------+
/// | Capability Code (1 octet)    |
/// +------------------------------+
/// | Capability Length (1 octet)  |
/// +------------------------------+
/// | Capability Value (variable)  |
/// ~                              ~
/// +------------------------------+
/// ```
///
/// - RFC5492: <https://datatracker.ietf.org/doc/html/rfc5492#section-4>
/// - Capability codes: <https://www.iana.org/assignments/capability-codes/capability-codes.xhtml#capability-codes-2>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capability {
    pub code: u8,
    pub value: Vec<u8>,
}

impl Capability {
    pub fn new(code: u8, value: Vec<u8>) -> Self {
        Capability { code, value }
    }

    /// Support for 4-octet AS number capability, [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793#section-3).
    pub fn four_octet_as(asn: u32) -> Self {
        Capability {
            code: BgpCapabilityType::SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY.into(),
            value: asn.to_be_bytes().to_vec(),
        }
    }

    pub fn capability_type(&self) -> BgpCapabilityType {
        BgpCapabilityType::from(self.code)
    }

    pub fn is_four_octet_as(&self) -> bool {
        self.capability_type() == BgpCapabilityType::SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY
    }

    /// The AS number carried by a well-formed four-octet AS capability.
    ///
    /// Returns `None` for other capabilities and for four-octet AS capabilities whose value is not
    /// exactly 4 bytes long.
    pub fn four_octet_asn(&self) -> Option<u32> {
        if !self.is_four_octet_as() {
            return None;
        }
        let bytes: [u8; 4] = self.value.as_slice().try_into().ok()?;
        Some(u32::from_be_bytes(bytes))
    }
}

/// Optional Parameter included in a [BgpOpenMessage](crate::models::BgpOpenMessage).
///
/// ```text
/// 0                   1
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-...
/// |  Parm. Type   | Parm. Length  |  Parameter Value (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-...
/// ```
///
/// Capabilities advertisement is the only optional parameter type in use; any other type is
/// rejected when decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptParam {
    Capabilities(Vec<Capability>),
}

impl OptParam {
    pub const fn param_type(&self) -> u8 {
        match self {
            OptParam::Capabilities(_) => CAPABILITIES_OPT_PARAM_TYPE,
        }
    }
}
