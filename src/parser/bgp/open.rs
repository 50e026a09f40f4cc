use std::net::Ipv4Addr;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::{debug, warn};

use crate::error::{ParserError, ProtocolError};
use crate::models::*;
use crate::parser::{parse_opt_params, ReadUtils};

/// Fixed part of the OPEN body, up to and including the optional parameters length.
const OPEN_FIXED_LENGTH: usize = 10;

fn read_fixed_fields(input: &mut Bytes) -> Result<(u8, u16, u16, Ipv4Addr, u8), ParserError> {
    input.has_n_remaining(OPEN_FIXED_LENGTH)?;
    Ok((
        input.read_u8()?,
        input.read_u16()?,
        input.read_u16()?,
        input.read_ipv4_address()?,
        input.read_u8()?,
    ))
}

/// Parse BGP OPEN message.
///
/// The parsing of BGP OPEN message also includes decoding the optional parameters and the
/// capabilities they carry. Semantic checks on the decoded fields are left to
/// [BgpOpenMessage::validate].
pub fn parse_bgp_open_message(mut input: Bytes) -> Result<BgpOpenMessage, ProtocolError> {
    let (version, asn, hold_time, bgp_identifier, opt_params_len) =
        read_fixed_fields(&mut input.clone()).map_err(|e| {
            warn!("BGP OPEN message too short: {}", e);
            ProtocolError::notify(BgpNotificationMessage::from_error(
                BgpError::MessageHeaderError(MessageHeaderError::BAD_MESSAGE_LENGTH),
                input.to_vec(),
            ))
        })?;
    input.advance(OPEN_FIXED_LENGTH);
    let opt_params_len = opt_params_len as usize;

    if input.remaining() != opt_params_len {
        warn!(
            "BGP OPEN optional parameters length {} does not match the actual length {}",
            opt_params_len,
            input.remaining()
        );
        return Err(ProtocolError::notify(BgpNotificationMessage::from_error(
            BgpError::OpenError(OpenError::UNSPECIFIC),
            vec![],
        )));
    }

    let opt_params = parse_opt_params(input)?;
    let msg = BgpOpenMessage {
        version,
        asn,
        hold_time,
        bgp_identifier,
        opt_params,
    };
    debug!(
        "received OPEN: AS{} hold time {}s BGP identifier {}",
        msg.peer_asn(),
        msg.hold_time,
        msg.bgp_identifier
    );
    Ok(msg)
}

impl BgpOpenMessage {
    /// Encode the OPEN message body.
    ///
    /// Fails if the encoded optional parameters do not fit into the 1-octet length field.
    pub fn encode(&self) -> Result<Bytes, ParserError> {
        let mut params = BytesMut::new();
        for param in &self.opt_params {
            params.extend_from_slice(&param.encode()?);
        }
        let params_len =
            u8::try_from(params.len()).map_err(|_| ParserError::OptParamsTooLong(params.len()))?;

        let mut buf = BytesMut::with_capacity(OPEN_FIXED_LENGTH + params.len());
        buf.put_u8(self.version);
        buf.put_u16(self.asn);
        buf.put_u16(self.hold_time);
        buf.put_u32(self.bgp_identifier.into());
        buf.put_u8(params_len);
        buf.put_slice(&params);
        Ok(buf.freeze())
    }
}
