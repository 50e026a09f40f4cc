use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::warn;

use crate::error::{ParserError, ProtocolError};
use crate::models::{BgpError, BgpMessageType, BgpNotificationMessage, MessageHeaderError};
use crate::parser::ReadUtils;

/// Length of the common message header: 16 bytes marker, 2 bytes length, 1 byte type.
pub const BGP_HEADER_LENGTH: usize = 19;

/// Largest message allowed by [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.1).
pub const BGP_MAX_MESSAGE_LENGTH: usize = 4096;

/// Marker value when no authentication is in use: all ones.
pub const BGP_MARKER: [u8; 16] = [0xFF; 16];

fn header_error(subcode: MessageHeaderError, data: Vec<u8>) -> ProtocolError {
    ProtocolError::notify(BgpNotificationMessage::from_error(
        BgpError::MessageHeaderError(subcode),
        data,
    ))
}

/// Strip the common header off one complete message frame.
///
/// Format:
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                                                               +
/// |                                                               |
/// +                                                               +
/// |                           Marker                              |
/// +                                                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `raw` must hold exactly one message; finding frame boundaries in a TCP stream is up to the
/// caller. Returns the raw type octet and the message body. The type is not checked here, see
/// [decode_frame](crate::parser::decode_frame).
pub fn strip_header(mut raw: Bytes) -> Result<(u8, Bytes), ProtocolError> {
    let total_size = raw.len();
    if let Err(e) = raw.has_n_remaining(BGP_HEADER_LENGTH) {
        warn!("BGP message shorter than the header: {}", e);
        let data = raw.get(16..18).map(<[u8]>::to_vec).unwrap_or_default();
        return Err(header_error(MessageHeaderError::BAD_MESSAGE_LENGTH, data));
    }

    if raw[..16] != BGP_MARKER {
        warn!("BGP message marker is not all ones");
        return Err(header_error(
            MessageHeaderError::CONNECTION_NOT_SYNCHRONIZED,
            vec![],
        ));
    }
    raw.advance(16);

    /*
    The value of the Length field MUST always be at least 19 and no greater than 4096, and MAY be
    further constrained, depending on the message type. "padding" of extra data after the message
    is not allowed.
    */
    let length = raw.get_u16();
    if !(BGP_HEADER_LENGTH..=BGP_MAX_MESSAGE_LENGTH).contains(&(length as usize))
        || length as usize != total_size
    {
        warn!(
            "invalid BGP message length {}, frame has {} bytes",
            length, total_size
        );
        return Err(header_error(
            MessageHeaderError::BAD_MESSAGE_LENGTH,
            length.to_be_bytes().to_vec(),
        ));
    }

    let msg_type = raw.get_u8();
    Ok((msg_type, raw))
}

/// Prepend the common header to an encoded message body.
///
/// Fails with [ParserError::MessageTooLong] if the resulting frame exceeds
/// [BGP_MAX_MESSAGE_LENGTH].
pub fn prepend_header(body: &[u8], msg_type: BgpMessageType) -> Result<Bytes, ParserError> {
    // msg total bytes length = msg bytes + 16 bytes marker + 2 bytes length + 1 byte type
    let length = body.len() + BGP_HEADER_LENGTH;
    if length > BGP_MAX_MESSAGE_LENGTH {
        return Err(ParserError::MessageTooLong(length));
    }

    let mut bytes = BytesMut::with_capacity(length);
    bytes.put_slice(&BGP_MARKER);
    bytes.put_u16(length as u16);
    bytes.put_u8(msg_type.into());
    bytes.put_slice(body);
    Ok(bytes.freeze())
}
