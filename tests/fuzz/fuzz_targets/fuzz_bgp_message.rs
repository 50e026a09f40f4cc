#![no_main]
use bgpkit_wire::models::BgpMessage;
use bgpkit_wire::parser::{decode_frame, parse_bgp_message};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let bytes = Bytes::copy_from_slice(data);
    if let Ok(msg) = parse_bgp_message(bytes.clone()) {
        // anything we accept must encode back to the same frame, except KEEPALIVE padding
        if let (Ok(encoded), false) = (msg.encode(), matches!(msg, BgpMessage::KeepAlive(_))) {
            assert_eq!(encoded, bytes);
        }
    }
    if let Some((msg_type, body)) = data.split_first() {
        let _ = decode_frame(*msg_type, Bytes::copy_from_slice(body));
    }
});
