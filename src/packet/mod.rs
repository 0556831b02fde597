//! Frame codec
//!
//! Byte-exact parsing and construction of Ethernet-II + IPv4 + TCP/UDP
//! headers. Extraction borrows sub-ranges of the inbound frame; construction
//! fills a pool-supplied buffer and reports which checksums were left for
//! the NIC via [`types::ChecksumDirective`].

pub mod build;
pub mod checksum;
pub mod extract;
pub mod types;
pub mod wire;

pub use build::{BuildRequest, LinkAddressing, OutboundFrame, PacketBuilder};
pub use extract::{extract, ExtractedView};
pub use types::{ChecksumDirective, EtherType, MacAddr, Protocol, Transport, TransportHeader};

/// Ethernet-II header size (no VLAN tag, no FCS)
pub const ETHERNET_HEADER_LEN: usize = 14;
/// IPv4 header size without options
pub const IPV4_HEADER_LEN: usize = 20;
/// TCP header size without options
pub const TCP_HEADER_LEN: usize = 20;
/// UDP header size (fixed)
pub const UDP_HEADER_LEN: usize = 8;
/// Smallest frame the extractor will look at
pub const MIN_FRAME_LEN: usize = ETHERNET_HEADER_LEN + IPV4_HEADER_LEN;
