//! Inbound frame extraction
//!
//! Parses a raw Ethernet frame into a borrowed view of its addressing and
//! payload. Nothing is copied: the view's IP addresses and payload are
//! sub-slices of the caller's frame and live exactly as long as it does.
//! Every offset is validated against the frame length before any field is
//! read.

use std::net::Ipv4Addr;

use super::types::{EtherType, Protocol, TransportHeader};
use super::wire;
use super::{ETHERNET_HEADER_LEN, IPV4_HEADER_LEN, MIN_FRAME_LEN, TCP_HEADER_LEN};
use crate::{Error, Result};

/// Zero-copy view of one extracted frame
#[derive(Debug)]
pub struct ExtractedView<'a> {
    src_ip: &'a [u8],
    dst_ip: &'a [u8],
    transport: TransportHeader,
    payload: &'a [u8],
}

impl<'a> ExtractedView<'a> {
    /// Source IPv4 address bytes (4 bytes, network order)
    pub fn src_ip(&self) -> &'a [u8] {
        self.src_ip
    }

    /// Destination IPv4 address bytes (4 bytes, network order)
    pub fn dst_ip(&self) -> &'a [u8] {
        self.dst_ip
    }

    pub fn src_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(self.src_ip[0], self.src_ip[1], self.src_ip[2], self.src_ip[3])
    }

    pub fn dst_addr(&self) -> Ipv4Addr {
        Ipv4Addr::new(self.dst_ip[0], self.dst_ip[1], self.dst_ip[2], self.dst_ip[3])
    }

    /// Source port in host order
    pub fn src_port(&self) -> u16 {
        self.transport.src_port()
    }

    /// Destination port in host order
    pub fn dst_port(&self) -> u16 {
        self.transport.dst_port()
    }

    pub fn transport(&self) -> &TransportHeader {
        &self.transport
    }

    /// Application payload, borrowed from the frame
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }
}

/// Parse an inbound frame into an [`ExtractedView`].
///
/// Accepts Ethernet-II + IPv4 + TCP/UDP. Frames with any other ethertype
/// fail with [`Error::NotIpv4`], other IP protocols with
/// [`Error::UnsupportedProtocol`] before any transport field is read.
/// A frame whose declared IPv4 total length does not leave room for a
/// payload fails with [`Error::MalformedLength`]; a structurally valid
/// frame with a zero-length payload signals [`Error::EmptyPayload`] so the
/// caller can decide whether that is a no-op or a fault.
pub fn extract(frame: &[u8]) -> Result<ExtractedView<'_>> {
    if frame.len() < MIN_FRAME_LEN {
        return Err(Error::Truncated {
            needed: MIN_FRAME_LEN,
            got: frame.len(),
        });
    }

    let ethertype = wire::read_u16(frame, 12)?;
    if ethertype != EtherType::Ipv4 as u16 {
        return Err(Error::NotIpv4 { ethertype });
    }

    let l3 = ETHERNET_HEADER_LEN;
    let ihl = (wire::read_u8(frame, l3)? & 0x0f) as usize;
    let ip_header_len = ihl * 4;
    let total_length = wire::read_u16(frame, l3 + 2)?;

    if ip_header_len < IPV4_HEADER_LEN {
        return Err(Error::MalformedLength {
            total_length,
            header_len: ip_header_len,
        });
    }
    if frame.len() < l3 + ip_header_len {
        return Err(Error::Truncated {
            needed: l3 + ip_header_len,
            got: frame.len(),
        });
    }

    let protocol = wire::read_u8(frame, l3 + 9)?;
    let l4 = l3 + ip_header_len;

    let transport = match Protocol::from_u8(protocol) {
        Some(Protocol::Tcp) => {
            let data_offset = (wire::read_u8(frame, l4 + 12)? >> 4) as usize;
            let header_len = data_offset * 4;
            if header_len < TCP_HEADER_LEN {
                return Err(Error::MalformedLength {
                    total_length,
                    header_len,
                });
            }
            if frame.len() < l4 + header_len {
                return Err(Error::Truncated {
                    needed: l4 + header_len,
                    got: frame.len(),
                });
            }
            TransportHeader::Tcp {
                src_port: wire::read_u16(frame, l4)?,
                dst_port: wire::read_u16(frame, l4 + 2)?,
                header_len,
            }
        }
        Some(Protocol::Udp) => TransportHeader::Udp {
            src_port: wire::read_u16(frame, l4)?,
            dst_port: wire::read_u16(frame, l4 + 2)?,
            datagram_len: wire::read_u16(frame, l4 + 4)?,
        },
        None => return Err(Error::UnsupportedProtocol { protocol }),
    };

    // Payload length comes from the declared IPv4 total length, never from
    // the buffer size, so an undersized declaration must be caught before
    // the subtraction.
    let payload_offset = ip_header_len + transport.header_len();
    if (total_length as usize) <= payload_offset {
        return Err(Error::MalformedLength {
            total_length,
            header_len: payload_offset,
        });
    }
    let payload_len = total_length as usize - payload_offset;
    if payload_len == 0 {
        return Err(Error::EmptyPayload);
    }

    Ok(ExtractedView {
        src_ip: wire::slice(frame, l3 + 12, 4)?,
        dst_ip: wire::slice(frame, l3 + 16, 4)?,
        transport,
        payload: wire::slice(frame, l3 + payload_offset, payload_len)?,
    })
}
