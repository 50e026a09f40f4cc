/*!
Provides decoding and encoding of BGP messages.
*/
pub mod capabilities;
pub mod header;
pub mod messages;
pub mod notification;
pub mod open;

pub use capabilities::{parse_capabilities, parse_opt_params};
pub use header::{prepend_header, strip_header, BGP_HEADER_LENGTH, BGP_MAX_MESSAGE_LENGTH};
pub use messages::{decode_frame, parse_bgp_message};
pub use notification::parse_bgp_notification_message;
pub use open::parse_bgp_open_message;
