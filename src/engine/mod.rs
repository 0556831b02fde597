//! Packet I/O engine seams
//!
//! The codec never owns buffers or devices; it reaches the surrounding
//! I/O engine through these traits. [`pool::HeapPool`] and
//! [`tx::SoftwareTxSink`] are the in-process implementations used by tests,
//! the CLI, and deployments without a NIC-backed pool or checksum offload.

pub mod pool;
pub mod tx;

pub use pool::{BufferPool, FrameBuffer, HeapPool};
pub use tx::{SoftwareTxSink, TransmitSink};
