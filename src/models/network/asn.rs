use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Reserved 2-octet AS number used in the OPEN `My Autonomous System` field by speakers whose
/// real AS number does not fit into 16 bits.
///
/// <https://datatracker.ietf.org/doc/html/rfc6793#section-9>
pub const AS_TRANS: u16 = 23456;

/// AS number length: 16 or 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsnLength {
    Bits16,
    Bits32,
}

/// ASN -- Autonomous System Number
#[derive(Debug, Clone, Copy, Eq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asn {
    pub asn: u32,
    pub len: AsnLength,
}

impl Asn {
    /// Constructs a new 2-octet `Asn` with `AsnLength::Bits16`.
    pub const fn new_16bit(asn: u16) -> Self {
        Asn {
            asn: asn as u32,
            len: AsnLength::Bits16,
        }
    }

    /// Constructs a new 4-octet `Asn` with `AsnLength::Bits32`.
    pub const fn new_32bit(asn: u32) -> Self {
        Asn {
            asn,
            len: AsnLength::Bits32,
        }
    }

    /// Whether the AS number needs four octets on the wire.
    pub const fn is_four_octet(&self) -> bool {
        self.asn > u16::MAX as u32
    }

    /// Whether this is the `AS_TRANS` placeholder.
    pub const fn is_as_trans(&self) -> bool {
        self.asn == AS_TRANS as u32
    }

    /// Value to put into a 2-octet AS field: the AS number itself, or [AS_TRANS] when it does not
    /// fit.
    pub const fn to_wire_asn16(&self) -> u16 {
        match self.is_four_octet() {
            true => AS_TRANS,
            false => self.asn as u16,
        }
    }
}

impl PartialEq for Asn {
    fn eq(&self, other: &Self) -> bool {
        self.asn == other.asn
    }
}

impl Hash for Asn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.asn.hash(state);
    }
}

impl PartialEq<u32> for Asn {
    fn eq(&self, other: &u32) -> bool {
        self.asn == *other
    }
}

impl From<u32> for Asn {
    fn from(v: u32) -> Self {
        Asn::new_32bit(v)
    }
}

impl From<u16> for Asn {
    fn from(v: u16) -> Self {
        Asn::new_16bit(v)
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.asn
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asn)
    }
}
