use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::{debug, warn};

use crate::error::ProtocolError;
use crate::models::{BgpError, BgpNotificationMessage, MessageHeaderError};
use crate::parser::ReadUtils;

/// Parse BGP NOTIFICATION message.
///
/// A NOTIFICATION can never be answered with another NOTIFICATION (RFC4271 section 6), so a
/// malformed one yields a [ProtocolError] with `transmit` unset. Unknown error codes are accepted
/// and only produce a warning.
pub fn parse_bgp_notification_message(
    mut input: Bytes,
) -> Result<BgpNotificationMessage, ProtocolError> {
    if let Err(e) = input.has_n_remaining(2) {
        warn!("BGP NOTIFICATION message too short: {}", e);
        return Err(ProtocolError::silent(BgpNotificationMessage::from_error(
            BgpError::MessageHeaderError(MessageHeaderError::BAD_MESSAGE_LENGTH),
            input.to_vec(),
        )));
    }
    let error_code = input.get_u8();
    let error_subcode = input.get_u8();
    let msg = BgpNotificationMessage::new(error_code, error_subcode, input.to_vec());
    debug!("received {}", msg);
    Ok(msg)
}

impl BgpNotificationMessage {
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(2 + self.data.len());
        buf.put_u8(self.error_code);
        buf.put_u8(self.error_subcode);
        buf.put_slice(&self.data);
        buf.freeze()
    }
}
