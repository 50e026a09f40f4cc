/*!
Provides IO utility functions for reading big-endian integers from a buffer, plus an iterator
over type-length-value triples.
*/
use std::iter::FusedIterator;
use std::net::Ipv4Addr;

use bytes::{Buf, Bytes};

use crate::error::ParserError;

impl ReadUtils for Bytes {}

/// Checked reads on top of [Buf]: every read fails with [ParserError::IoNotEnoughBytes] instead of
/// panicking when the buffer is too short.
pub trait ReadUtils: Buf {
    #[inline]
    fn has_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        let remaining = self.remaining();
        if remaining < n {
            Err(ParserError::IoNotEnoughBytes {
                needed: n,
                remaining,
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.has_n_remaining(1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.has_n_remaining(2)?;
        Ok(self.get_u16())
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(4)?;
        Ok(self.get_u32())
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        let addr = self.read_u32()?;
        Ok(Ipv4Addr::from(addr))
    }
}

/// Lazy walk over `type(1) | length(1) | value(length)` triples.
///
/// Yields `(type, value)` pairs until the buffer is exhausted. A triple that does not fit into the
/// remaining bytes is yielded once as [ParserError::TruncatedTlv], after which the iterator is
/// done. An empty buffer yields nothing. Values are zero-copy slices of the input.
#[derive(Debug, Clone)]
pub struct TlvIter {
    data: Bytes,
    failed: bool,
}

impl TlvIter {
    pub fn new(data: Bytes) -> Self {
        TlvIter {
            data,
            failed: false,
        }
    }

    fn next_tlv(&mut self) -> Result<(u8, Bytes), ParserError> {
        if self.data.remaining() < 2 {
            return Err(ParserError::TruncatedTlv {
                declared: 0,
                remaining: self.data.remaining(),
            });
        }
        let tlv_type = self.data.get_u8();
        let length = self.data.get_u8() as usize;
        if self.data.remaining() < length {
            return Err(ParserError::TruncatedTlv {
                declared: length,
                remaining: self.data.remaining(),
            });
        }
        Ok((tlv_type, self.data.split_to(length)))
    }
}

impl Iterator for TlvIter {
    type Item = Result<(u8, Bytes), ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.data.has_remaining() {
            return None;
        }
        let item = self.next_tlv();
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }
}

impl FusedIterator for TlvIter {}
