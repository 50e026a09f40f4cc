#![no_main]
use arbitrary::Arbitrary;
use bgpkit_wire::models::{BgpOpenMessage, Capability, OptParam};
use libfuzzer_sys::fuzz_target;
use std::net::Ipv4Addr;

#[derive(Arbitrary, Debug)]
struct Input {
    version: u8,
    asn: u16,
    hold_time: u16,
    bgp_identifier: u32,
    capabilities: Vec<(u8, Vec<u8>)>,
    local_id: u32,
    local_asn: u32,
    remote_asn: u32,
}

fuzz_target!(|input: Input| {
    let open = BgpOpenMessage {
        version: input.version,
        asn: input.asn,
        hold_time: input.hold_time,
        bgp_identifier: Ipv4Addr::from(input.bgp_identifier),
        opt_params: vec![OptParam::Capabilities(
            input
                .capabilities
                .into_iter()
                .map(|(code, value)| Capability::new(code, value))
                .collect(),
        )],
    };
    if let Err(e) = open.validate(
        Ipv4Addr::from(input.local_id),
        input.local_asn,
        input.remote_asn,
    ) {
        assert!(e.transmit);
        assert_eq!(e.notification.error_code, 2);
    }
});
