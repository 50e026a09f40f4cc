use bytes::Bytes;
use log::{debug, warn};

use crate::error::{ParserError, ProtocolError};
use crate::models::*;
use crate::parser::bgp::header::{prepend_header, strip_header};
use crate::parser::{parse_bgp_notification_message, parse_bgp_open_message};

/// Decode one complete BGP message frame, header included.
///
/// ```rust
/// use bgpkit_wire::parser::parse_bgp_message;
/// use bgpkit_wire::models::BgpMessage;
///
/// let mut raw = vec![0xFF; 16];
/// raw.extend([0, 19, 4]);
/// let msg = parse_bgp_message(raw.into()).unwrap();
/// assert!(matches!(msg, BgpMessage::KeepAlive(_)));
/// ```
pub fn parse_bgp_message(raw: Bytes) -> Result<BgpMessage, ProtocolError> {
    let (msg_type, body) = strip_header(raw)?;
    decode_frame(msg_type, body)
}

/// Decode a message body given its type octet from the common header.
///
/// UPDATE bodies are kept opaque and KEEPALIVE bodies are ignored, so neither fails. An unknown
/// type fails with a Bad Message Type notification carrying the offending type.
pub fn decode_frame(msg_type: u8, body: Bytes) -> Result<BgpMessage, ProtocolError> {
    let msg_type = match BgpMessageType::try_from(msg_type) {
        Ok(t) => t,
        Err(e) => {
            warn!("{}", ParserError::from(e));
            return Err(ProtocolError::notify(BgpNotificationMessage::from_error(
                BgpError::MessageHeaderError(MessageHeaderError::BAD_MESSAGE_TYPE),
                vec![msg_type],
            )));
        }
    };

    Ok(match msg_type {
        BgpMessageType::OPEN => BgpMessage::Open(parse_bgp_open_message(body)?),
        BgpMessageType::UPDATE => {
            debug!("received UPDATE of {} bytes", body.len());
            BgpMessage::Update(BgpUpdateMessage::new(body.to_vec()))
        }
        BgpMessageType::NOTIFICATION => {
            BgpMessage::Notification(parse_bgp_notification_message(body)?)
        }
        BgpMessageType::KEEPALIVE => BgpMessage::KeepAlive(BgpKeepAliveMessage {}),
    })
}

impl BgpUpdateMessage {
    pub fn encode(&self) -> Bytes {
        Bytes::copy_from_slice(&self.data)
    }
}

impl BgpMessage {
    /// Encode the message into a complete frame, header included.
    ///
    /// Fails only for messages that cannot be represented on the wire: an empty capabilities
    /// parameter, a length field overflow, or a frame above 4096 bytes.
    pub fn encode(&self) -> Result<Bytes, ParserError> {
        let msg_bytes = match self {
            BgpMessage::Open(msg) => msg.encode()?,
            BgpMessage::Update(msg) => msg.encode(),
            BgpMessage::Notification(msg) => msg.encode(),
            BgpMessage::KeepAlive(_) => Bytes::new(),
        };
        let bytes = prepend_header(&msg_bytes, self.msg_type())?;
        debug!(
            "encoded {:?} message of {} bytes",
            self.msg_type(),
            bytes.len()
        );
        Ok(bytes)
    }
}
