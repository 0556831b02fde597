//! Codec statistics
//!
//! Thread-safe counters for extraction and construction outcomes. Every
//! failure kind gets its own counter so the caller can act on, say, a burst
//! of malformed-length drops separately from pool exhaustion.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::Error;

/// Atomic counter for thread-safe increments
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(&self, val: u64) {
        self.0.fetch_add(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-process codec statistics registry
#[derive(Debug, Default)]
pub struct CodecStats {
    /// Frames successfully extracted
    pub frames_extracted: Counter,
    /// Payload bytes handed to the application
    pub payload_bytes: Counter,
    /// Frames successfully constructed
    pub frames_built: Counter,
    /// Bytes handed to the transmit path
    pub tx_bytes: Counter,

    // Drop counters, one per error kind
    pub truncated: Counter,
    pub not_ipv4: Counter,
    pub unsupported_protocol: Counter,
    pub malformed_length: Counter,
    pub empty_payload: Counter,
    pub invalid_request: Counter,
    pub allocation_failed: Counter,
    pub other_errors: Counter,
}

impl CodecStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful extraction.
    pub fn record_extract(&self, payload_len: usize) {
        self.frames_extracted.inc();
        self.payload_bytes.add(payload_len as u64);
    }

    /// Records a successful construction.
    pub fn record_build(&self, frame_len: usize) {
        self.frames_built.inc();
        self.tx_bytes.add(frame_len as u64);
    }

    /// Records a dropped or rejected packet under its error kind.
    pub fn record_error(&self, err: &Error) {
        match err {
            Error::Truncated { .. } => self.truncated.inc(),
            Error::NotIpv4 { .. } => self.not_ipv4.inc(),
            Error::UnsupportedProtocol { .. } => self.unsupported_protocol.inc(),
            Error::MalformedLength { .. } => self.malformed_length.inc(),
            Error::EmptyPayload => self.empty_payload.inc(),
            Error::InvalidRequest(_) => self.invalid_request.inc(),
            Error::AllocationFailed { .. } => self.allocation_failed.inc(),
            _ => self.other_errors.inc(),
        }
    }

    /// Exports all counters as key-value pairs.
    pub fn export(&self) -> Vec<(String, u64)> {
        vec![
            ("frames_extracted".into(), self.frames_extracted.get()),
            ("payload_bytes".into(), self.payload_bytes.get()),
            ("frames_built".into(), self.frames_built.get()),
            ("tx_bytes".into(), self.tx_bytes.get()),
            ("drops_truncated".into(), self.truncated.get()),
            ("drops_not_ipv4".into(), self.not_ipv4.get()),
            (
                "drops_unsupported_protocol".into(),
                self.unsupported_protocol.get(),
            ),
            ("drops_malformed_length".into(), self.malformed_length.get()),
            ("drops_empty_payload".into(), self.empty_payload.get()),
            ("drops_invalid_request".into(), self.invalid_request.get()),
            ("drops_allocation_failed".into(), self.allocation_failed.get()),
            ("drops_other".into(), self.other_errors.get()),
        ]
    }
}
