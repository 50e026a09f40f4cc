use bgpkit_wire::models::*;
use bgpkit_wire::parser::*;
use bgpkit_wire::ProtocolError;
use bytes::Bytes;
use std::net::Ipv4Addr;
use std::time::Duration;

const LOCAL_ID: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);
const PEER_ID: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 2);

/// OPEN captured from a peer in AS 65001 advertising multiprotocol IPv4 unicast, route refresh,
/// and four-octet AS support.
const OPEN_FRAME: &str = "ffffffffffffffffffffffffffffffff002d01\
                          04fde9005a0a000002\
                          10\
                          020e0104000100010200\
                          41040000fde9";

fn hex_frame(s: &str) -> Bytes {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    Bytes::from(hex::decode(cleaned).unwrap())
}

fn notification_of(res: Result<BgpMessage, ProtocolError>) -> (BgpNotificationMessage, bool) {
    let err = res.unwrap_err();
    (err.notification, err.transmit)
}

#[test]
fn test_decode_captured_open() {
    let msg = parse_bgp_message(hex_frame(OPEN_FRAME)).unwrap();
    let open = match msg {
        BgpMessage::Open(open) => open,
        other => panic!("expected OPEN, got {:?}", other),
    };
    assert_eq!(open.version, 4);
    assert_eq!(open.asn, 65001);
    assert_eq!(open.hold_time, 90);
    assert_eq!(open.bgp_identifier, PEER_ID);

    let codes: Vec<u8> = open.capabilities().map(|cap| cap.code).collect();
    assert_eq!(codes, vec![1, 2, 65]);
    assert_eq!(open.peer_asn(), Asn::new_32bit(65001));
    assert!(open.validate(LOCAL_ID, 65000, 65001).is_ok());

    // wrong peer configured
    let err = open.validate(LOCAL_ID, 65000, 65002).unwrap_err();
    assert_eq!(
        err.notification.error_type(),
        BgpError::OpenError(OpenError::BAD_PEER_AS)
    );
}

#[test]
fn test_open_exchange() {
    // speaker with a 4-octet AS talks to a 2-octet AS peer
    let ours = BgpOpenMessage::new(
        4_200_000_000u32,
        Duration::from_secs(180),
        LOCAL_ID,
        vec![Capability::new(2, vec![])],
    );
    let frame = BgpMessage::Open(ours.clone()).encode().unwrap();

    let (msg_type, body) = strip_header(frame.clone()).unwrap();
    assert_eq!(msg_type, 1);
    assert_eq!(body.len() + BGP_HEADER_LENGTH, frame.len());

    let theirs = match decode_frame(msg_type, body).unwrap() {
        BgpMessage::Open(open) => open,
        other => panic!("expected OPEN, got {:?}", other),
    };
    assert_eq!(theirs, ours);
    assert_eq!(theirs.asn, AS_TRANS);
    assert!(theirs.validate(PEER_ID, 65001, 4_200_000_000).is_ok());
}

#[test]
fn test_new_open_four_octet_capability() {
    let open = BgpOpenMessage::new(70000u32, Duration::from_secs(90), PEER_ID, vec![]);
    assert_eq!(open.asn, 23456);
    assert_eq!(
        open.capabilities().collect::<Vec<_>>(),
        vec![&Capability::new(65, 70000u32.to_be_bytes().to_vec())]
    );

    let open = BgpOpenMessage::new(100u32, Duration::from_secs(90), PEER_ID, vec![]);
    assert_eq!(open.asn, 100);
    assert_eq!(
        open.capabilities().collect::<Vec<_>>(),
        vec![&Capability::new(65, vec![0, 0, 0, 100])]
    );
}

#[test]
fn test_as_trans_requires_capability() {
    let open = BgpOpenMessage {
        version: 4,
        asn: AS_TRANS,
        hold_time: 90,
        bgp_identifier: PEER_ID,
        opt_params: vec![],
    };
    let err = open.validate(LOCAL_ID, 65000, 70000).unwrap_err();
    assert!(err.transmit);
    assert_eq!(err.notification, BgpNotificationMessage::new(2, 2, vec![]));

    let open = BgpOpenMessage {
        opt_params: vec![OptParam::Capabilities(vec![Capability::four_octet_as(70000)])],
        ..open
    };
    assert!(open.validate(LOCAL_ID, 65000, 70000).is_ok());
}

#[test]
fn test_unknown_message_type() {
    let mut raw = vec![0xFF; 16];
    raw.extend([0, 19, 9]);
    let (notification, transmit) = notification_of(parse_bgp_message(Bytes::from(raw)));
    assert!(transmit);
    assert_eq!(notification, BgpNotificationMessage::new(1, 3, vec![9]));

    // the reply carries the offending type on the wire
    let reply = BgpMessage::Notification(notification).encode().unwrap();
    assert_eq!(&reply[16..], &[0, 22, 3, 1, 3, 9]);
}

#[test]
fn test_short_frames() {
    let frame = hex_frame(OPEN_FRAME);
    for len in 0..BGP_HEADER_LENGTH {
        let (notification, transmit) = notification_of(parse_bgp_message(frame.slice(..len)));
        assert!(transmit);
        assert_eq!(
            notification.error_type(),
            BgpError::MessageHeaderError(MessageHeaderError::BAD_MESSAGE_LENGTH)
        );
    }
}

#[test]
fn test_truncated_open() {
    // header length adjusted to a 9-byte OPEN body
    let mut raw = hex_frame(OPEN_FRAME)[..28].to_vec();
    raw[17] = 28;
    let (notification, transmit) = notification_of(parse_bgp_message(Bytes::from(raw.clone())));
    assert!(transmit);
    assert_eq!(
        notification,
        BgpNotificationMessage::new(1, 2, raw[19..].to_vec())
    );
}

#[test]
fn test_malformed_notification_is_not_answered() {
    let mut raw = vec![0xFF; 16];
    raw.extend([0, 20, 3, 6]);
    let err = parse_bgp_message(Bytes::from(raw)).unwrap_err();
    assert_eq!(err.to_transmit(), None);
    assert_eq!(
        err.notification.error_type(),
        BgpError::MessageHeaderError(MessageHeaderError::BAD_MESSAGE_LENGTH)
    );
}

#[test]
fn test_notification_round_trip() {
    let cease = BgpNotificationMessage::from_error(
        BgpError::CeaseNotification(CeaseNotification::ADMINISTRATIVE_SHUTDOWN),
        b"maintenance".to_vec(),
    );
    for notification in [
        cease,
        BgpNotificationMessage::new(2, 1, 4u16.to_be_bytes().to_vec()),
        BgpNotificationMessage::new(1, 3, vec![9]),
        BgpNotificationMessage::new(4, 0, vec![]),
    ] {
        let msg = BgpMessage::Notification(notification);
        assert_eq!(parse_bgp_message(msg.encode().unwrap()).unwrap(), msg);
    }
}

#[test]
fn test_update_and_keepalive_pass_through() {
    let update = BgpMessage::Update(BgpUpdateMessage::new(vec![0, 0, 0, 0]));
    let frame = update.encode().unwrap();
    assert_eq!(frame.len(), 23);
    assert_eq!(parse_bgp_message(frame).unwrap(), update);

    let keepalive = BgpMessage::KeepAlive(BgpKeepAliveMessage {});
    let frame = keepalive.encode().unwrap();
    assert_eq!(frame.len(), 19);
    assert_eq!(parse_bgp_message(frame).unwrap(), keepalive);
}

#[test]
fn test_unsupported_optional_parameter() {
    // OPEN with the deprecated authentication parameter (type 1)
    let mut raw = hex_frame(OPEN_FRAME)[..29].to_vec();
    raw[17] = 32;
    raw[28] = 3;
    raw.extend([1, 1, 0]);
    let (notification, transmit) = notification_of(parse_bgp_message(Bytes::from(raw)));
    assert!(transmit);
    assert_eq!(
        notification.error_type(),
        BgpError::OpenError(OpenError::UNSUPPORTED_OPTIONAL_PARAMETER)
    );
}
