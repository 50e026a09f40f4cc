/*!
error module defines the error types used in bgpkit-wire.

There are two error channels:

- [ProtocolError]: the peer sent something we cannot accept. It carries the NOTIFICATION message
  the session layer should answer with, and whether it is allowed to answer at all.
- [ParserError]: local errors with no wire representation, e.g. trying to encode a message that
  does not fit into its length fields.
*/
use crate::models::BgpNotificationMessage;
use num_enum::{TryFromPrimitive, TryFromPrimitiveError};
use std::fmt::{Display, Formatter};
use std::{error::Error, fmt};
use thiserror::Error;

/// Error raised while decoding or validating messages received from a peer.
///
/// A [ProtocolError] terminates the session. When `transmit` is `true`, the session layer must
/// send `notification` to the peer before closing the connection. When it is `false` the error was
/// found while decoding a NOTIFICATION message, and RFC4271 forbids answering a NOTIFICATION with
/// another NOTIFICATION: the error should only be reported locally.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolError {
    pub notification: BgpNotificationMessage,
    pub transmit: bool,
}

impl ProtocolError {
    /// Protocol error whose notification must be sent to the peer.
    pub fn notify(notification: BgpNotificationMessage) -> Self {
        ProtocolError {
            notification,
            transmit: true,
        }
    }

    /// Protocol error that must only be reported locally.
    pub fn silent(notification: BgpNotificationMessage) -> Self {
        ProtocolError {
            notification,
            transmit: false,
        }
    }

    /// Returns the notification to send to the peer, if any.
    pub fn to_transmit(&self) -> Option<&BgpNotificationMessage> {
        match self.transmit {
            true => Some(&self.notification),
            false => None,
        }
    }
}

impl Display for ProtocolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let action = match self.transmit {
            true => "notifying peer",
            false => "not notifying peer",
        };
        write!(f, "protocol error, {}: {}", action, self.notification)
    }
}

impl Error for ProtocolError {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// This error represents a [num_enum::TryFromPrimitiveError] error for any of a number of
    /// different types.
    #[error("unrecognized value {value} for {type_name}")]
    UnrecognizedEnumVariant { type_name: &'static str, value: u64 },
    /// Not enough bytes left in the buffer for the requested read.
    #[error("not enough bytes: {needed} needed, {remaining} remaining")]
    IoNotEnoughBytes { needed: usize, remaining: usize },
    /// A type-length-value triple does not fit into the remaining buffer.
    ///
    /// ## Occurs during:
    ///  - Walking OPEN optional parameters
    ///  - Walking capabilities of a capabilities optional parameter
    #[error("truncated TLV: {declared} value bytes declared, {remaining} remaining")]
    TruncatedTlv { declared: usize, remaining: usize },
    /// A capabilities optional parameter must carry at least one capability.
    ///
    /// ## Occurs during:
    ///  - Encoding of an OPEN message
    #[error("empty capabilities in capability optional parameter")]
    EmptyCapabilities,
    /// A capability value, or a capabilities parameter, does not fit into its 1-octet length.
    #[error("capability length {0} exceeds 255 bytes")]
    CapabilityTooLong(usize),
    /// Encoded optional parameters do not fit into the 1-octet OPEN length field.
    #[error("optional parameters length {0} exceeds 255 bytes")]
    OptParamsTooLong(usize),
    /// Encoded message is larger than the 4096-byte BGP maximum.
    #[error("BGP message length {0} exceeds 4096 bytes")]
    MessageTooLong(usize),
}

impl<T> From<TryFromPrimitiveError<T>> for ParserError
where
    T: TryFromPrimitive,
    T::Primitive: Into<u64>,
{
    #[inline]
    fn from(value: TryFromPrimitiveError<T>) -> Self {
        ParserError::UnrecognizedEnumVariant {
            type_name: T::NAME,
            value: value.number.into(),
        }
    }
}
