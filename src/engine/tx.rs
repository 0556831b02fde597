//! Transmit seam
//!
//! A [`TransmitSink`] takes finished frames together with their checksum
//! directives. Hardware-offload deployments forward the directive to the
//! NIC descriptor; [`SoftwareTxSink`] is the fallback that computes the
//! deferred checksums in software before passing the frame on.

use tracing::trace;

use crate::packet::build::OutboundFrame;
use crate::Result;

/// Consumer of completed outbound frames
pub trait TransmitSink {
    fn transmit(&mut self, frame: OutboundFrame) -> Result<()>;
}

/// Wraps a sink for targets without checksum offload: every frame has its
/// deferred checksums filled in before it reaches the inner sink.
#[derive(Debug)]
pub struct SoftwareTxSink<S> {
    inner: S,
}

impl<S: TransmitSink> SoftwareTxSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: TransmitSink> TransmitSink for SoftwareTxSink<S> {
    fn transmit(&mut self, mut frame: OutboundFrame) -> Result<()> {
        trace!(len = frame.len(), directive = ?frame.directive(), "software checksum finalize");
        frame.finalize_in_software()?;
        self.inner.transmit(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::pool::HeapPool;
    use crate::packet::build::{BuildRequest, LinkAddressing, PacketBuilder};
    use crate::packet::types::{ChecksumDirective, Transport};
    use std::net::Ipv4Addr;

    /// Keeps transmitted frames for inspection
    #[derive(Default)]
    struct CaptureSink {
        frames: Vec<OutboundFrame>,
    }

    impl TransmitSink for CaptureSink {
        fn transmit(&mut self, frame: OutboundFrame) -> Result<()> {
            self.frames.push(frame);
            Ok(())
        }
    }

    fn build_one(transport: Transport) -> OutboundFrame {
        let pool = HeapPool::new(2048, 1);
        PacketBuilder::new()
            .build(
                &pool,
                &BuildRequest {
                    src_ip: Ipv4Addr::new(10, 0, 0, 1),
                    dst_ip: Ipv4Addr::new(10, 0, 0, 2),
                    src_port: 1234,
                    dst_port: 80,
                    transport,
                    link: LinkAddressing::BroadcastPlaceholder,
                    payload: b"payload",
                },
            )
            .unwrap()
    }

    #[test]
    fn test_software_sink_finalizes_before_forwarding() {
        let mut sink = SoftwareTxSink::new(CaptureSink::default());
        sink.transmit(build_one(Transport::Tcp)).unwrap();

        let captured = sink.into_inner();
        assert_eq!(captured.frames.len(), 1);
        let frame = &captured.frames[0];
        assert_eq!(frame.directive(), ChecksumDirective::None);
        // IPv4 checksum is no longer zero once computed in software.
        assert_ne!(&frame.as_bytes()[24..26], &[0, 0]);
    }

    #[test]
    fn test_capture_sink_passthrough_keeps_directive() {
        let mut sink = CaptureSink::default();
        sink.transmit(build_one(Transport::Udp)).unwrap();
        assert_eq!(sink.frames[0].directive(), ChecksumDirective::HardwareUdp);
    }
}
