use crate::error::ProtocolError;
use crate::models::bgp::{BgpError, BgpNotificationMessage, Capability, OpenError, OptParam};
use crate::models::network::Asn;
use log::debug;
use std::net::Ipv4Addr;
use std::time::Duration;

pub const BGP_VERSION: u8 = 4;

/// Smallest non-zero hold time a speaker may accept, in seconds.
pub const MIN_HOLD_TIME: u16 = 3;

/// BGP Open Message
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///  +-+-+-+-+-+-+-+-+
///  |    Version    |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |     My Autonomous System      |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |           Hold Time           |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |                         BGP Identifier                        |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  | Opt Parm Len  |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |                                                               |
///  |             Optional Parameters (variable)                    |
///  |                                                               |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `asn` is the 2-octet wire field. Speakers with a 4-octet AS number put
/// [AS_TRANS](crate::models::AS_TRANS) there and carry the real value in a four-octet AS
/// capability, see [BgpOpenMessage::peer_asn].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpOpenMessage {
    pub version: u8,
    pub asn: u16,
    pub hold_time: u16,
    pub bgp_identifier: Ipv4Addr,
    pub opt_params: Vec<OptParam>,
}

impl BgpOpenMessage {
    /// Build the OPEN message a local speaker sends.
    ///
    /// A four-octet AS capability carrying `asn` is always advertised as the first capability; any
    /// four-octet AS capability in `capabilities` is dropped in its favor. The hold time is
    /// truncated to whole seconds and saturates at 65535.
    pub fn new<A: Into<Asn>>(
        asn: A,
        hold_time: Duration,
        bgp_identifier: Ipv4Addr,
        capabilities: Vec<Capability>,
    ) -> Self {
        let asn = asn.into();
        let mut all_caps = Vec::with_capacity(capabilities.len() + 1);
        all_caps.push(Capability::four_octet_as(asn.asn));
        all_caps.extend(
            capabilities
                .into_iter()
                .filter(|cap| !cap.is_four_octet_as()),
        );

        BgpOpenMessage {
            version: BGP_VERSION,
            asn: asn.to_wire_asn16(),
            hold_time: hold_time.as_secs().min(u16::MAX as u64) as u16,
            bgp_identifier,
            opt_params: vec![OptParam::Capabilities(all_caps)],
        }
    }

    /// All capabilities advertised across all optional parameters, in wire order.
    pub fn capabilities(&self) -> impl Iterator<Item = &Capability> {
        self.opt_params.iter().flat_map(|param| match param {
            OptParam::Capabilities(caps) => caps.iter(),
        })
    }

    /// The peer's real AS number: the value of the first well-formed four-octet AS capability if
    /// there is one, the 2-octet field otherwise.
    pub fn peer_asn(&self) -> Asn {
        self.capabilities()
            .find_map(Capability::four_octet_asn)
            .map(Asn::new_32bit)
            .unwrap_or(Asn::new_16bit(self.asn))
    }

    pub fn hold_time_duration(&self) -> Duration {
        Duration::from_secs(self.hold_time as u64)
    }

    /// Check a received OPEN message against the session parameters.
    ///
    /// Implements the OPEN message error handling of
    /// [RFC4271 section 6.2](https://datatracker.ietf.org/doc/html/rfc4271#section-6.2), the BGP
    /// identifier rules of [RFC6286](https://datatracker.ietf.org/doc/html/rfc6286#section-2.2),
    /// and the AS_TRANS handling of [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793).
    /// Checks run in a fixed order and the first failure is returned.
    pub fn validate(
        &self,
        local_id: Ipv4Addr,
        local_asn: u32,
        remote_asn: u32,
    ) -> Result<(), ProtocolError> {
        if self.version != BGP_VERSION {
            return Err(open_error(
                OpenError::UNSUPPORTED_VERSION_NUMBER,
                (BGP_VERSION as u16).to_be_bytes().to_vec(),
            ));
        }

        let as_trans = Asn::new_16bit(self.asn).is_as_trans();
        if !as_trans && self.asn as u32 != remote_asn {
            return Err(open_error(OpenError::BAD_PEER_AS, vec![]));
        }

        if self.hold_time != 0 && self.hold_time < MIN_HOLD_TIME {
            return Err(open_error(OpenError::UNACCEPTABLE_HOLD_TIME, vec![]));
        }

        if !is_global_unicast(&self.bgp_identifier) {
            return Err(open_error(OpenError::BAD_BGP_IDENTIFIER, vec![]));
        }

        // https://tools.ietf.org/html/rfc6286#section-2.2
        if local_asn == remote_asn && local_id == self.bgp_identifier {
            return Err(open_error(OpenError::BAD_BGP_IDENTIFIER, vec![]));
        }

        let mut four_octet_as_found = false;
        for cap in self.capabilities().filter(|cap| cap.is_four_octet_as()) {
            four_octet_as_found = true;
            match cap.four_octet_asn() {
                None => return Err(open_error(OpenError::UNSPECIFIC, vec![])),
                Some(asn) if asn != remote_asn => {
                    return Err(open_error(OpenError::BAD_PEER_AS, vec![]))
                }
                Some(_) => {}
            }
        }

        if as_trans && !four_octet_as_found {
            return Err(open_error(OpenError::BAD_PEER_AS, vec![]));
        }

        debug!(
            "accepted OPEN from AS{} with BGP identifier {}",
            self.peer_asn(),
            self.bgp_identifier
        );
        Ok(())
    }
}

fn open_error(subcode: OpenError, data: Vec<u8>) -> ProtocolError {
    ProtocolError::notify(BgpNotificationMessage::from_error(
        BgpError::OpenError(subcode),
        data,
    ))
}

/// Whether the address is usable as a unicast BGP identifier: not unspecified, loopback,
/// multicast, link-local or the limited broadcast address.
pub fn is_global_unicast(ip: &Ipv4Addr) -> bool {
    !(ip.is_unspecified()
        || ip.is_loopback()
        || ip.is_multicast()
        || ip.is_link_local()
        || ip.is_broadcast())
}
