//! Common codec types

use std::fmt;
use std::str::FromStr;

use super::{TCP_HEADER_LEN, UDP_HEADER_LEN};

/// MAC address (6 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr([0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    /// Fixed source address used when no link-layer resolution is wired in.
    /// Real address resolution is the I/O engine's concern.
    pub const PLACEHOLDER: MacAddr = MacAddr([0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa]);

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Error type for MAC address parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMacAddrError;

impl fmt::Display for ParseMacAddrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid MAC address")
    }
}

impl std::error::Error for ParseMacAddrError {}

impl FromStr for MacAddr {
    type Err = ParseMacAddrError;

    /// Parse a colon- or hyphen-separated MAC address ("aa:bb:cc:dd:ee:ff")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sep = if s.contains('-') { '-' } else { ':' };
        let mut result = [0u8; 6];
        let mut count = 0;

        for part in s.split(sep) {
            if count == 6 || part.len() != 2 {
                return Err(ParseMacAddrError);
            }
            result[count] = u8::from_str_radix(part, 16).map_err(|_| ParseMacAddrError)?;
            count += 1;
        }

        if count != 6 {
            return Err(ParseMacAddrError);
        }
        Ok(MacAddr(result))
    }
}

/// EtherType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum EtherType {
    Ipv4 = 0x0800,
    Arp = 0x0806,
    Ipv6 = 0x86DD,
}

/// IPv4 protocol numbers understood by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Protocol {
    Tcp = 6,
    Udp = 17,
}

impl Protocol {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            6 => Some(Protocol::Tcp),
            17 => Some(Protocol::Udp),
            _ => None,
        }
    }
}

/// Transport selector for outbound construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Udp,
}

impl Transport {
    pub fn protocol(&self) -> Protocol {
        match self {
            Transport::Tcp => Protocol::Tcp,
            Transport::Udp => Protocol::Udp,
        }
    }

    /// Header size written on the build path (TCP carries no options)
    pub fn header_len(&self) -> usize {
        match self {
            Transport::Tcp => TCP_HEADER_LEN,
            Transport::Udp => UDP_HEADER_LEN,
        }
    }
}

/// Transport header fields recovered during extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportHeader {
    Tcp {
        src_port: u16,
        dst_port: u16,
        /// From the data-offset nibble, in bytes (>= 20)
        header_len: usize,
    },
    Udp {
        src_port: u16,
        dst_port: u16,
        /// UDP length field: header plus payload
        datagram_len: u16,
    },
}

impl TransportHeader {
    pub fn src_port(&self) -> u16 {
        match *self {
            TransportHeader::Tcp { src_port, .. } | TransportHeader::Udp { src_port, .. } => {
                src_port
            }
        }
    }

    pub fn dst_port(&self) -> u16 {
        match *self {
            TransportHeader::Tcp { dst_port, .. } | TransportHeader::Udp { dst_port, .. } => {
                dst_port
            }
        }
    }

    pub fn header_len(&self) -> usize {
        match *self {
            TransportHeader::Tcp { header_len, .. } => header_len,
            TransportHeader::Udp { .. } => UDP_HEADER_LEN,
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            TransportHeader::Tcp { .. } => Protocol::Tcp,
            TransportHeader::Udp { .. } => Protocol::Udp,
        }
    }
}

/// Which checksum fields construction deliberately left unset.
///
/// The transmit path either asks the NIC to fill them in or runs the
/// software fallback ([`crate::packet::checksum::finalize`]) before the
/// frame goes on the wire. The transport variants cover the IPv4 header
/// checksum as well, matching how offload flags combine on real NICs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumDirective {
    /// All checksum fields are final
    #[default]
    None,
    /// IPv4 header checksum is unset
    HardwareIpv4,
    /// IPv4 header and TCP checksums are unset
    HardwareTcp,
    /// IPv4 header and UDP checksums are unset
    HardwareUdp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_addr_constants() {
        assert!(MacAddr::BROADCAST.is_broadcast());
        assert!(MacAddr::BROADCAST.is_multicast());
        assert!(!MacAddr::PLACEHOLDER.is_broadcast());
        assert!(!MacAddr::PLACEHOLDER.is_multicast());
    }

    #[test]
    fn test_mac_addr_display() {
        let mac = MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(mac.to_string(), "00:11:22:33:44:55");
    }

    #[test]
    fn test_mac_addr_parse() {
        let mac: MacAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(mac, MacAddr([0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]));

        let mac: MacAddr = "00-11-22-33-44-55".parse().unwrap();
        assert_eq!(mac, MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]));
    }

    #[test]
    fn test_mac_addr_parse_invalid() {
        assert!("aa:bb:cc:dd:ee".parse::<MacAddr>().is_err());
        assert!("aa:bb:cc:dd:ee:ff:00".parse::<MacAddr>().is_err());
        assert!("aa:bb:cc:dd:ee:gg".parse::<MacAddr>().is_err());
        assert!("aabbccddeeff".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_mac_addr_roundtrip() {
        let original = MacAddr([0xab, 0xcd, 0xef, 0x12, 0x34, 0x56]);
        let parsed: MacAddr = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_protocol_from_u8() {
        assert_eq!(Protocol::from_u8(6), Some(Protocol::Tcp));
        assert_eq!(Protocol::from_u8(17), Some(Protocol::Udp));
        assert_eq!(Protocol::from_u8(1), None);
        assert_eq!(Protocol::from_u8(255), None);
    }

    #[test]
    fn test_transport_selector() {
        assert_eq!(Transport::Tcp.protocol(), Protocol::Tcp);
        assert_eq!(Transport::Tcp.header_len(), 20);
        assert_eq!(Transport::Udp.protocol(), Protocol::Udp);
        assert_eq!(Transport::Udp.header_len(), 8);
    }

    #[test]
    fn test_transport_header_accessors() {
        let tcp = TransportHeader::Tcp {
            src_port: 1234,
            dst_port: 80,
            header_len: 32,
        };
        assert_eq!(tcp.src_port(), 1234);
        assert_eq!(tcp.dst_port(), 80);
        assert_eq!(tcp.header_len(), 32);
        assert_eq!(tcp.protocol(), Protocol::Tcp);

        let udp = TransportHeader::Udp {
            src_port: 5000,
            dst_port: 6000,
            datagram_len: 12,
        };
        assert_eq!(udp.header_len(), 8);
        assert_eq!(udp.protocol(), Protocol::Udp);
    }
}
