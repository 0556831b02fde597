//! Configuration types

use serde::Deserialize;

use crate::packet::MacAddr;
use crate::telemetry::LogConfig;
use crate::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub codec: CodecConfig,
    pub pool: PoolConfig,
    pub log: LogConfig,
}

/// Defaults written into outbound headers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// IPv4 time-to-live
    pub ttl: u8,
    /// Initial TCP receive window
    pub tcp_window: u16,
    /// Source MAC written when no explicit link addressing is given
    pub source_mac: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            ttl: 64,
            tcp_window: 8192,
            source_mac: MacAddr::PLACEHOLDER.to_string(),
        }
    }
}

impl CodecConfig {
    pub fn source_mac(&self) -> Result<MacAddr> {
        self.source_mac
            .parse()
            .map_err(|_| Error::Config(format!("invalid source_mac {:?}", self.source_mac)))
    }
}

/// Heap pool geometry
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Capacity of each buffer; bounds the largest constructible frame
    pub buffer_size: usize,
    /// Number of pre-allocated buffers
    pub buffer_count: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            buffer_size: 2048,
            buffer_count: 1024,
        }
    }
}
