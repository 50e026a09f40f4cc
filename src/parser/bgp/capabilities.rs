use bytes::{BufMut, Bytes, BytesMut};
use log::warn;

use crate::error::{ParserError, ProtocolError};
use crate::models::*;
use crate::parser::TlvIter;

fn open_error(subcode: OpenError) -> ProtocolError {
    ProtocolError::notify(BgpNotificationMessage::from_error(
        BgpError::OpenError(subcode),
        vec![],
    ))
}

/// Parse the optional parameters of an OPEN message.
///
/// <https://datatracker.ietf.org/doc/html/rfc4271#section-4.2>
///
/// Only the capabilities parameter (type 2) is supported; any other parameter type is rejected
/// with an Unsupported Optional Parameter notification.
pub fn parse_opt_params(input: Bytes) -> Result<Vec<OptParam>, ProtocolError> {
    TlvIter::new(input)
        .map(|tlv| -> Result<OptParam, ProtocolError> {
            let (param_type, value) = tlv.map_err(|e| {
                warn!("malformed OPEN optional parameter: {}", e);
                open_error(OpenError::UNSPECIFIC)
            })?;
            match param_type {
                CAPABILITIES_OPT_PARAM_TYPE => {
                    Ok(OptParam::Capabilities(parse_capabilities(value)?))
                }
                t => {
                    warn!("unsupported OPEN optional parameter type {}", t);
                    Err(open_error(OpenError::UNSUPPORTED_OPTIONAL_PARAMETER))
                }
            }
        })
        .collect()
}

/// Parse the value of a capabilities optional parameter into its capabilities, in order.
///
/// <https://datatracker.ietf.org/doc/html/rfc5492#section-4>
pub fn parse_capabilities(input: Bytes) -> Result<Vec<Capability>, ProtocolError> {
    TlvIter::new(input)
        .map(|tlv| match tlv {
            Ok((code, value)) => Ok(Capability::new(code, value.to_vec())),
            Err(e) => {
                warn!("malformed BGP capability: {}", e);
                Err(open_error(OpenError::UNSPECIFIC))
            }
        })
        .collect()
}

impl Capability {
    pub fn encode(&self) -> Result<Bytes, ParserError> {
        let len = u8::try_from(self.value.len())
            .map_err(|_| ParserError::CapabilityTooLong(self.value.len()))?;
        let mut buf = BytesMut::with_capacity(2 + self.value.len());
        buf.put_u8(self.code);
        buf.put_u8(len);
        buf.put_slice(&self.value);
        Ok(buf.freeze())
    }
}

impl OptParam {
    pub fn encode(&self) -> Result<Bytes, ParserError> {
        let value = match self {
            OptParam::Capabilities(caps) => {
                if caps.is_empty() {
                    return Err(ParserError::EmptyCapabilities);
                }
                let mut value = BytesMut::new();
                for cap in caps {
                    value.extend_from_slice(&cap.encode()?);
                }
                value
            }
        };
        let len =
            u8::try_from(value.len()).map_err(|_| ParserError::CapabilityTooLong(value.len()))?;

        let mut buf = BytesMut::with_capacity(2 + value.len());
        buf.put_u8(self.param_type());
        buf.put_u8(len);
        buf.put_slice(&value);
        Ok(buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subcode(err: ProtocolError) -> (u8, u8) {
        assert!(err.transmit);
        (err.notification.error_code, err.notification.error_subcode)
    }

    #[test]
    fn test_parse_capabilities() {
        let caps = parse_capabilities(Bytes::from_static(&[65, 4, 0, 0, 0, 100])).unwrap();
        assert_eq!(caps, vec![Capability::new(65, vec![0, 0, 0, 100])]);

        // declared length exceeds remaining bytes
        let err = parse_capabilities(Bytes::from_static(&[65, 5, 0, 0, 100])).unwrap_err();
        assert_eq!(subcode(err), (2, 0));

        let err = parse_capabilities(Bytes::from_static(&[65, 3, 0, 0])).unwrap_err();
        assert_eq!(subcode(err), (2, 0));

        // a short four-octet AS value is well-formed TLV, OPEN validation rejects it
        let caps = parse_capabilities(Bytes::from_static(&[65, 3, 0, 0, 100])).unwrap();
        assert_eq!(caps, vec![Capability::new(65, vec![0, 0, 100])]);
        assert_eq!(caps[0].four_octet_asn(), None);

        assert!(parse_capabilities(Bytes::new()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_capabilities_duplicates() {
        let caps = parse_capabilities(Bytes::from_static(&[
            65, 4, 0, 0, 0, 100, 2, 0, 65, 4, 0, 0, 0, 200,
        ]))
        .unwrap();
        assert_eq!(
            caps,
            vec![
                Capability::four_octet_as(100),
                Capability::new(2, vec![]),
                Capability::four_octet_as(200),
            ]
        );
    }

    #[test]
    fn test_parse_opt_params() {
        let params = parse_opt_params(Bytes::from_static(&[
            2, 6, 65, 4, 0, 0, 0, 100, 2, 2, 2, 0,
        ]))
        .unwrap();
        assert_eq!(
            params,
            vec![
                OptParam::Capabilities(vec![Capability::four_octet_as(100)]),
                OptParam::Capabilities(vec![Capability::new(2, vec![])]),
            ]
        );

        assert!(parse_opt_params(Bytes::new()).unwrap().is_empty());

        // empty capabilities parameter
        let params = parse_opt_params(Bytes::from_static(&[2, 0])).unwrap();
        assert_eq!(params, vec![OptParam::Capabilities(vec![])]);
    }

    #[test]
    fn test_parse_opt_params_errors() {
        // deprecated authentication parameter
        let err = parse_opt_params(Bytes::from_static(&[1, 1, 0])).unwrap_err();
        assert_eq!(subcode(err), (2, 4));

        // truncated parameter
        let err = parse_opt_params(Bytes::from_static(&[2, 6, 65, 4])).unwrap_err();
        assert_eq!(subcode(err), (2, 0));

        // dangling type byte
        let err = parse_opt_params(Bytes::from_static(&[2, 0, 2])).unwrap_err();
        assert_eq!(subcode(err), (2, 0));

        // truncated capability inside a well-formed parameter
        let err = parse_opt_params(Bytes::from_static(&[2, 3, 65, 4, 0])).unwrap_err();
        assert_eq!(subcode(err), (2, 0));
    }

    #[test]
    fn test_encode_opt_param() {
        let param = OptParam::Capabilities(vec![
            Capability::four_octet_as(70000),
            Capability::new(2, vec![]),
        ]);
        assert_eq!(
            param.encode().unwrap(),
            Bytes::from_static(&[2, 8, 65, 4, 0, 1, 0x11, 0x70, 2, 0])
        );
    }

    #[test]
    fn test_encode_errors() {
        assert_eq!(
            OptParam::Capabilities(vec![]).encode(),
            Err(ParserError::EmptyCapabilities)
        );

        let cap = Capability::new(73, vec![0; 256]);
        assert_eq!(cap.encode(), Err(ParserError::CapabilityTooLong(256)));

        // each capability fits, the parameter does not
        let param = OptParam::Capabilities(vec![
            Capability::new(73, vec![0; 200]),
            Capability::new(73, vec![0; 200]),
        ]);
        assert_eq!(param.encode(), Err(ParserError::CapabilityTooLong(404)));
    }
}
