//! Internet checksums - RFC 1071
//!
//! One's-complement sums for the IPv4 header and the TCP/UDP pseudo-header.
//! The build path leaves these fields zero and records a
//! [`ChecksumDirective`]; [`finalize`] is the software fallback for
//! deployments without hardware offload.

use std::net::Ipv4Addr;

use super::types::ChecksumDirective;
use super::wire;
use super::{ETHERNET_HEADER_LEN, IPV4_HEADER_LEN, TCP_HEADER_LEN, UDP_HEADER_LEN};
use crate::{Error, Result};

fn accumulate(data: &[u8], mut sum: u32) -> u32 {
    for i in (0..data.len()).step_by(2) {
        let word = if i + 1 < data.len() {
            u16::from_be_bytes([data[i], data[i + 1]])
        } else {
            // Pad with zero if odd length
            u16::from_be_bytes([data[i], 0])
        };
        sum = sum.wrapping_add(word as u32);
    }
    sum
}

fn fold(mut sum: u32) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    !(sum as u16)
}

/// IPv4 header checksum over the header bytes. Zero result over a header
/// with a filled-in checksum field means the header is valid.
pub fn ipv4_header(header: &[u8]) -> u16 {
    fold(accumulate(header, 0))
}

/// TCP/UDP checksum including the pseudo-header derived from the IPv4
/// addresses, protocol number, and segment length.
pub fn pseudo_header(src: Ipv4Addr, dst: Ipv4Addr, protocol: u8, segment: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let src = src.octets();
    let dst = dst.octets();

    sum += u16::from_be_bytes([src[0], src[1]]) as u32;
    sum += u16::from_be_bytes([src[2], src[3]]) as u32;
    sum += u16::from_be_bytes([dst[0], dst[1]]) as u32;
    sum += u16::from_be_bytes([dst[2], dst[3]]) as u32;
    sum += protocol as u32;
    sum += segment.len() as u32;

    fold(accumulate(segment, sum))
}

/// Fill in exactly the checksum fields a directive left unset.
///
/// `frame` is a complete Ethernet frame as produced by the build path. For
/// the transport directives the IPv4 header checksum is written as well,
/// mirroring the combined offload the directive stands in for. A UDP sum of
/// zero is transmitted as 0xFFFF since zero on the wire means "no checksum".
pub fn finalize(frame: &mut [u8], directive: ChecksumDirective) -> Result<()> {
    if directive == ChecksumDirective::None {
        return Ok(());
    }

    let l3 = ETHERNET_HEADER_LEN;
    let ip_header_len = ((wire::read_u8(frame, l3)? & 0x0f) as usize) * 4;
    let total_length = wire::read_u16(frame, l3 + 2)? as usize;
    if ip_header_len < IPV4_HEADER_LEN || total_length < ip_header_len {
        return Err(Error::MalformedLength {
            total_length: total_length as u16,
            header_len: ip_header_len,
        });
    }
    // Both the header and the transport segment must fit the buffer.
    wire::slice(frame, l3, total_length)?;

    frame[l3 + 10..l3 + 12].fill(0);
    let ip_sum = ipv4_header(&frame[l3..l3 + ip_header_len]);
    wire::write_u16(frame, l3 + 10, ip_sum)?;

    let src = Ipv4Addr::from(<[u8; 4]>::try_from(&frame[l3 + 12..l3 + 16]).unwrap());
    let dst = Ipv4Addr::from(<[u8; 4]>::try_from(&frame[l3 + 16..l3 + 20]).unwrap());
    let protocol = frame[l3 + 9];
    let l4 = l3 + ip_header_len;
    let segment_len = total_length - ip_header_len;

    match directive {
        ChecksumDirective::HardwareTcp => {
            if segment_len < TCP_HEADER_LEN {
                return Err(Error::Truncated {
                    needed: l4 + TCP_HEADER_LEN,
                    got: l4 + segment_len,
                });
            }
            wire::write_u16(frame, l4 + 16, 0)?;
            let sum = pseudo_header(src, dst, protocol, &frame[l4..l4 + segment_len]);
            wire::write_u16(frame, l4 + 16, sum)?;
        }
        ChecksumDirective::HardwareUdp => {
            if segment_len < UDP_HEADER_LEN {
                return Err(Error::Truncated {
                    needed: l4 + UDP_HEADER_LEN,
                    got: l4 + segment_len,
                });
            }
            wire::write_u16(frame, l4 + 6, 0)?;
            let sum = pseudo_header(src, dst, protocol, &frame[l4..l4 + segment_len]);
            let sum = if sum == 0 { 0xFFFF } else { sum };
            wire::write_u16(frame, l4 + 6, sum)?;
        }
        ChecksumDirective::HardwareIpv4 | ChecksumDirective::None => {}
    }

    Ok(())
}
