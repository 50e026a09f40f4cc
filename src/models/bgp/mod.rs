//! BGP messages and relevant structs.

pub mod capabilities;
pub mod error;
pub mod open;

pub use capabilities::*;
pub use error::*;
pub use open::*;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt::{Display, Formatter};

#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpMessageType {
    OPEN = 1,
    UPDATE = 2,
    NOTIFICATION = 3,
    KEEPALIVE = 4,
}

// https://tools.ietf.org/html/rfc4271#section-4
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BgpMessage {
    Open(BgpOpenMessage),
    Update(BgpUpdateMessage),
    Notification(BgpNotificationMessage),
    KeepAlive(BgpKeepAliveMessage),
}

impl BgpMessage {
    pub const fn msg_type(&self) -> BgpMessageType {
        match self {
            BgpMessage::Open(_) => BgpMessageType::OPEN,
            BgpMessage::Update(_) => BgpMessageType::UPDATE,
            BgpMessage::Notification(_) => BgpMessageType::NOTIFICATION,
            BgpMessage::KeepAlive(_) => BgpMessageType::KEEPALIVE,
        }
    }
}

impl From<BgpOpenMessage> for BgpMessage {
    fn from(value: BgpOpenMessage) -> Self {
        BgpMessage::Open(value)
    }
}

impl From<BgpUpdateMessage> for BgpMessage {
    fn from(value: BgpUpdateMessage) -> Self {
        BgpMessage::Update(value)
    }
}

impl From<BgpNotificationMessage> for BgpMessage {
    fn from(value: BgpNotificationMessage) -> Self {
        BgpMessage::Notification(value)
    }
}

/// BGP UPDATE message.
///
/// Path attributes and NLRI are not interpreted here; the message body is kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpUpdateMessage {
    pub data: Vec<u8>,
}

impl BgpUpdateMessage {
    pub fn new(data: Vec<u8>) -> Self {
        BgpUpdateMessage { data }
    }
}

/// BGP NOTIFICATION message.
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Error code    | Error subcode |   Data (variable)             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Codes are kept as raw octets so that any notification received from a peer can be represented;
/// see [BgpNotificationMessage::error_type] for the interpreted value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpNotificationMessage {
    pub error_code: u8,
    pub error_subcode: u8,
    pub data: Vec<u8>,
}

impl BgpNotificationMessage {
    pub fn new(error_code: u8, error_subcode: u8, data: Vec<u8>) -> Self {
        BgpNotificationMessage {
            error_code,
            error_subcode,
            data,
        }
    }

    pub fn from_error(error: BgpError, data: Vec<u8>) -> Self {
        let (error_code, error_subcode) = error.code_and_subcode();
        BgpNotificationMessage {
            error_code,
            error_subcode,
            data,
        }
    }

    pub fn error_type(&self) -> BgpError {
        BgpError::new(self.error_code, self.error_subcode)
    }
}

impl Display for BgpNotificationMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NOTIFICATION {}/{} ({})",
            self.error_code,
            self.error_subcode,
            self.error_type()
        )?;
        if !self.data.is_empty() {
            write!(f, " data {:02x?}", self.data)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpKeepAliveMessage {}
