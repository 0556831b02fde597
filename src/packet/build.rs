//! Outbound frame construction
//!
//! Builds a complete Ethernet + IPv4 + TCP/UDP frame into a pool-supplied
//! buffer. Checksum fields are left at zero and reported through a
//! [`ChecksumDirective`] for the NIC (or [`super::checksum::finalize`]) to
//! fill in. Construction is all-or-nothing: validation happens before the
//! buffer is acquired and no partially written buffer ever escapes.

use std::net::Ipv4Addr;

use super::types::{ChecksumDirective, EtherType, MacAddr, Transport};
use super::wire;
use super::{ETHERNET_HEADER_LEN, IPV4_HEADER_LEN, UDP_HEADER_LEN};
use crate::engine::pool::{BufferPool, FrameBuffer};
use crate::{Error, Result};

/// Link-layer addressing policy for an outbound frame.
///
/// Address resolution is not this codec's job; callers either supply both
/// addresses or explicitly opt into the broadcast/placeholder pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAddressing {
    /// Destination ff:ff:ff:ff:ff:ff, source [`MacAddr::PLACEHOLDER`]
    BroadcastPlaceholder,
    Explicit { src: MacAddr, dst: MacAddr },
}

impl LinkAddressing {
    fn resolve(&self) -> (MacAddr, MacAddr) {
        match *self {
            LinkAddressing::BroadcastPlaceholder => (MacAddr::PLACEHOLDER, MacAddr::BROADCAST),
            LinkAddressing::Explicit { src, dst } => (src, dst),
        }
    }
}

/// Everything needed to construct one outbound frame
#[derive(Debug, Clone)]
pub struct BuildRequest<'a> {
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
    pub src_port: u16,
    pub dst_port: u16,
    pub transport: Transport,
    pub link: LinkAddressing,
    pub payload: &'a [u8],
}

/// A fully populated frame plus the checksum work left for the transmit path
#[derive(Debug)]
pub struct OutboundFrame {
    buffer: FrameBuffer,
    directive: ChecksumDirective,
}

impl OutboundFrame {
    pub fn directive(&self) -> ChecksumDirective {
        self.directive
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// Compute the deferred checksums in software. After this the frame is
    /// final and the directive reports [`ChecksumDirective::None`].
    pub fn finalize_in_software(&mut self) -> Result<()> {
        super::checksum::finalize(self.buffer.as_mut_slice(), self.directive)?;
        self.directive = ChecksumDirective::None;
        Ok(())
    }

    /// Hand the buffer back to the engine together with the directive.
    pub fn into_parts(self) -> (FrameBuffer, ChecksumDirective) {
        (self.buffer, self.directive)
    }
}

/// Constructs outbound frames with fixed IPv4/TCP defaults
#[derive(Debug, Clone)]
pub struct PacketBuilder {
    ttl: u8,
    tcp_window: u16,
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self {
            ttl: 64,
            tcp_window: 8192,
        }
    }
}

impl PacketBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    /// Initial receive window advertised in TCP headers
    pub fn tcp_window(mut self, window: u16) -> Self {
        self.tcp_window = window;
        self
    }

    /// Build one frame from `request` into a buffer from `pool`.
    ///
    /// The buffer length is exactly Ethernet + IPv4 + transport header plus
    /// payload. Requests the pool cannot satisfy by size fail with
    /// [`Error::InvalidRequest`] before any allocation; an exhausted pool
    /// surfaces as [`Error::AllocationFailed`] and is not retried here.
    pub fn build<P: BufferPool>(&self, pool: &P, request: &BuildRequest<'_>) -> Result<OutboundFrame> {
        let l4_len = request.transport.header_len();
        let ip_total = IPV4_HEADER_LEN + l4_len + request.payload.len();
        let frame_len = ETHERNET_HEADER_LEN + ip_total;

        if ip_total > u16::MAX as usize {
            return Err(Error::InvalidRequest(format!(
                "payload of {} bytes overflows the IPv4 total length",
                request.payload.len()
            )));
        }
        if frame_len > pool.max_frame_size() {
            return Err(Error::InvalidRequest(format!(
                "frame of {} bytes exceeds pool buffer size {}",
                frame_len,
                pool.max_frame_size()
            )));
        }

        let mut buffer = pool.acquire(frame_len)?;
        let frame = buffer.as_mut_slice();

        // Ethernet
        let (src_mac, dst_mac) = request.link.resolve();
        wire::write_bytes(frame, 0, &dst_mac.0)?;
        wire::write_bytes(frame, 6, &src_mac.0)?;
        wire::write_u16(frame, 12, EtherType::Ipv4 as u16)?;

        // IPv4, no options
        let l3 = ETHERNET_HEADER_LEN;
        wire::write_u8(frame, l3, 0x45)?;
        wire::write_u16(frame, l3 + 2, ip_total as u16)?;
        wire::write_u8(frame, l3 + 8, self.ttl)?;
        wire::write_u8(frame, l3 + 9, request.transport.protocol() as u8)?;
        // Checksum at l3+10 stays zero for the offload path.
        wire::write_bytes(frame, l3 + 12, &request.src_ip.octets())?;
        wire::write_bytes(frame, l3 + 16, &request.dst_ip.octets())?;

        // Transport
        let l4 = l3 + IPV4_HEADER_LEN;
        wire::write_u16(frame, l4, request.src_port)?;
        wire::write_u16(frame, l4 + 2, request.dst_port)?;
        let directive = match request.transport {
            Transport::Tcp => {
                wire::write_u8(frame, l4 + 12, 0x50)?; // data offset 5, no options
                wire::write_u16(frame, l4 + 14, self.tcp_window)?;
                ChecksumDirective::HardwareTcp
            }
            Transport::Udp => {
                wire::write_u16(frame, l4 + 4, (UDP_HEADER_LEN + request.payload.len()) as u16)?;
                ChecksumDirective::HardwareUdp
            }
        };

        wire::write_bytes(frame, l4 + l4_len, request.payload)?;

        Ok(OutboundFrame { buffer, directive })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pool::HeapPool;
    use crate::packet::{checksum, extract, wire};

    fn request<'a>(transport: Transport, payload: &'a [u8]) -> BuildRequest<'a> {
        BuildRequest {
            src_ip: Ipv4Addr::new(192, 168, 1, 1),
            dst_ip: Ipv4Addr::new(192, 168, 1, 2),
            src_port: 5000,
            dst_port: 6000,
            transport,
            link: LinkAddressing::BroadcastPlaceholder,
            payload,
        }
    }

    #[test]
    fn test_build_udp_sizing() {
        let pool = HeapPool::new(2048, 4);
        let frame = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, &[1, 2, 3, 4]))
            .unwrap();

        // 14 + 20 + 8 + 4
        assert_eq!(frame.len(), 46);
        assert_eq!(wire::read_u16(frame.as_bytes(), 16).unwrap(), 32);
        assert_eq!(frame.directive(), ChecksumDirective::HardwareUdp);
    }

    #[test]
    fn test_build_tcp_sizing() {
        let pool = HeapPool::new(2048, 4);
        let frame = PacketBuilder::new()
            .build(&pool, &request(Transport::Tcp, b"hello-world!"))
            .unwrap();

        assert_eq!(frame.len(), 14 + 20 + 20 + 12);
        assert_eq!(wire::read_u16(frame.as_bytes(), 16).unwrap(), 52);
        assert_eq!(frame.directive(), ChecksumDirective::HardwareTcp);
    }

    #[test]
    fn test_build_ethernet_header() {
        let pool = HeapPool::new(2048, 4);
        let frame = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, b"x"))
            .unwrap();
        let bytes = frame.as_bytes();

        assert_eq!(&bytes[0..6], &MacAddr::BROADCAST.0);
        assert_eq!(&bytes[6..12], &MacAddr::PLACEHOLDER.0);
        assert_eq!(wire::read_u16(bytes, 12).unwrap(), 0x0800);
    }

    #[test]
    fn test_build_explicit_link_addressing() {
        let pool = HeapPool::new(2048, 4);
        let src = MacAddr([0x02, 0, 0, 0, 0, 0x01]);
        let dst = MacAddr([0x02, 0, 0, 0, 0, 0x02]);
        let mut req = request(Transport::Udp, b"x");
        req.link = LinkAddressing::Explicit { src, dst };

        let frame = PacketBuilder::new().build(&pool, &req).unwrap();
        assert_eq!(&frame.as_bytes()[0..6], &dst.0);
        assert_eq!(&frame.as_bytes()[6..12], &src.0);
    }

    #[test]
    fn test_build_ipv4_header_fields() {
        let pool = HeapPool::new(2048, 4);
        let frame = PacketBuilder::new()
            .ttl(32)
            .build(&pool, &request(Transport::Tcp, b"abc"))
            .unwrap();
        let bytes = frame.as_bytes();

        assert_eq!(bytes[14], 0x45);
        assert_eq!(bytes[14 + 8], 32); // TTL
        assert_eq!(bytes[14 + 9], 6); // TCP
        assert_eq!(wire::read_u16(bytes, 14 + 10).unwrap(), 0); // checksum deferred
        assert_eq!(&bytes[14 + 12..14 + 16], &[192, 168, 1, 1]);
        assert_eq!(&bytes[14 + 16..14 + 20], &[192, 168, 1, 2]);
    }

    #[test]
    fn test_build_tcp_header_fields() {
        let pool = HeapPool::new(2048, 4);
        let frame = PacketBuilder::new()
            .tcp_window(1024)
            .build(&pool, &request(Transport::Tcp, b"abc"))
            .unwrap();
        let bytes = frame.as_bytes();
        let l4 = 34;

        assert_eq!(wire::read_u16(bytes, l4).unwrap(), 5000);
        assert_eq!(wire::read_u16(bytes, l4 + 2).unwrap(), 6000);
        assert_eq!(bytes[l4 + 12], 0x50);
        assert_eq!(wire::read_u16(bytes, l4 + 14).unwrap(), 1024);
        assert_eq!(wire::read_u16(bytes, l4 + 16).unwrap(), 0); // checksum deferred
    }

    #[test]
    fn test_build_udp_header_fields() {
        let pool = HeapPool::new(2048, 4);
        let frame = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, b"ping"))
            .unwrap();
        let bytes = frame.as_bytes();
        let l4 = 34;

        assert_eq!(wire::read_u16(bytes, l4).unwrap(), 5000);
        assert_eq!(wire::read_u16(bytes, l4 + 2).unwrap(), 6000);
        assert_eq!(wire::read_u16(bytes, l4 + 4).unwrap(), 12); // 8 + payload
        assert_eq!(wire::read_u16(bytes, l4 + 6).unwrap(), 0); // checksum deferred
        assert_eq!(&bytes[l4 + 8..], b"ping");
    }

    #[test]
    fn test_build_oversized_payload_rejected_before_allocation() {
        let pool = HeapPool::new(128, 1);
        let payload = vec![0u8; 512];
        let err = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, &payload))
            .unwrap_err();

        assert!(matches!(err, Error::InvalidRequest(_)));
        // No buffer was taken from the pool.
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_build_payload_overflowing_total_length_rejected() {
        let pool = HeapPool::new(128 * 1024, 1);
        let payload = vec![0u8; 70_000];
        let err = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, &payload))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_build_pool_exhaustion() {
        let pool = HeapPool::new(2048, 1);
        let _held = pool.acquire(64).unwrap();
        let err = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, b"x"))
            .unwrap_err();
        assert!(matches!(err, Error::AllocationFailed { .. }));
    }

    #[test]
    fn test_build_empty_payload_allowed() {
        // Keep-alive style frames carry no payload; extraction of such a
        // frame reports EmptyPayload, but construction permits it.
        let pool = HeapPool::new(2048, 1);
        let frame = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, &[]))
            .unwrap();
        assert_eq!(frame.len(), 42);
    }

    #[test]
    fn test_build_then_extract_roundtrip() {
        let pool = HeapPool::new(2048, 4);
        let frame = PacketBuilder::new()
            .build(&pool, &request(Transport::Tcp, b"roundtrip"))
            .unwrap();

        let view = extract(frame.as_bytes()).unwrap();
        assert_eq!(view.src_addr(), Ipv4Addr::new(192, 168, 1, 1));
        assert_eq!(view.dst_addr(), Ipv4Addr::new(192, 168, 1, 2));
        assert_eq!(view.src_port(), 5000);
        assert_eq!(view.dst_port(), 6000);
        assert_eq!(view.payload(), b"roundtrip");
    }

    #[test]
    fn test_finalize_in_software_produces_valid_checksums() {
        let pool = HeapPool::new(2048, 4);
        let mut frame = PacketBuilder::new()
            .build(&pool, &request(Transport::Udp, b"checksum me"))
            .unwrap();
        frame.finalize_in_software().unwrap();
        assert_eq!(frame.directive(), ChecksumDirective::None);

        let bytes = frame.as_bytes();
        assert_eq!(checksum::ipv4_header(&bytes[14..34]), 0);
        assert_eq!(
            checksum::pseudo_header(
                Ipv4Addr::new(192, 168, 1, 1),
                Ipv4Addr::new(192, 168, 1, 2),
                17,
                &bytes[34..],
            ),
            0
        );
    }
}
