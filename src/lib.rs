//! Wireline - line-rate header codec
//!
//! Parses inbound Ethernet/IPv4/TCP/UDP frames into zero-copy views and
//! constructs outbound frames from structured fields, deferring checksums
//! to hardware offload where possible. The surrounding packet I/O engine
//! (driver init, polling loops, NIC configuration) is an external
//! collaborator reached through the traits in [`engine`].

pub mod config;
pub mod engine;
pub mod error;
pub mod packet;
pub mod telemetry;

pub use error::{Error, Result};
