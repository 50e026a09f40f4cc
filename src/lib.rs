/*!
`bgpkit-wire` is the wire-format layer of a BGP speaker: it turns a single BGP message frame
received from a peer into structured data and back, and decides whether a received OPEN message is
acceptable.

Everything that goes wrong with peer input is reported as a [ProtocolError], which carries the
NOTIFICATION message the session should answer with before closing the connection. Local mistakes,
such as trying to encode a message that does not fit into its length fields, are reported as
[ParserError] instead.

# Examples

## Decode and validate an OPEN message

```rust
use bgpkit_wire::models::*;
use bgpkit_wire::parser::parse_bgp_message;
use std::net::Ipv4Addr;
use std::time::Duration;

// what the peer would send
let peer_open = BgpOpenMessage::new(
    70000u32,
    Duration::from_secs(90),
    Ipv4Addr::new(192, 0, 2, 2),
    vec![],
);
let raw = BgpMessage::Open(peer_open).encode().unwrap();

let open = match parse_bgp_message(raw) {
    Ok(BgpMessage::Open(open)) => open,
    _ => unreachable!(),
};
assert_eq!(open.asn, AS_TRANS);
assert_eq!(open.peer_asn(), Asn::new_32bit(70000));

// we are AS 65000 and expect the peer to be AS 70000
match open.validate(Ipv4Addr::new(192, 0, 2, 1), 65000, 70000) {
    Ok(()) => {}
    Err(e) => {
        if let Some(notification) = e.to_transmit() {
            let _bytes = BgpMessage::Notification(notification.clone()).encode().unwrap();
            // send bytes to the peer, then close the session
        }
    }
}
```

## Handle a malformed frame

```rust
use bgpkit_wire::parser::parse_bgp_message;
use bgpkit_wire::models::*;

let mut raw = vec![0xFF; 16];
raw.extend([0, 19, 9]);
let err = parse_bgp_message(raw.into()).unwrap_err();
assert_eq!(
    err.notification.error_type(),
    BgpError::MessageHeaderError(MessageHeaderError::BAD_MESSAGE_TYPE)
);
assert_eq!(err.notification.data, vec![9]);
```

# Supported RFCs

- [X] [RFC 4271](https://datatracker.ietf.org/doc/html/rfc4271): A Border Gateway Protocol 4 (BGP-4), message formats and OPEN/header error handling
- [X] [RFC 5492](https://datatracker.ietf.org/doc/html/rfc5492): Capabilities Advertisement with BGP-4
- [X] [RFC 6286](https://datatracker.ietf.org/doc/html/rfc6286): Autonomous-System-Wide Unique BGP Identifier for BGP-4
- [X] [RFC 6793](https://datatracker.ietf.org/doc/html/rfc6793): BGP Support for Four-Octet Autonomous System (AS) Number Space
- [ ] UPDATE path attributes and NLRI, kept as opaque bytes

*/

pub mod error;
pub mod models;
pub mod parser;

pub use error::{ParserError, ProtocolError};
pub use parser::{decode_frame, parse_bgp_message, prepend_header, strip_header};
