//! Configuration management
//!
//! TOML-backed settings for the codec defaults, the heap pool, and logging.

mod types;

pub use types::*;

use crate::packet::{ETHERNET_HEADER_LEN, IPV4_HEADER_LEN, TCP_HEADER_LEN};
use crate::{Error, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let config: Config = toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// Check settings the type system cannot
pub fn validate(config: &Config) -> Result<()> {
    if config.codec.ttl == 0 {
        return Err(Error::Config("codec.ttl must be nonzero".into()));
    }
    config.codec.source_mac()?;

    let min = ETHERNET_HEADER_LEN + IPV4_HEADER_LEN + TCP_HEADER_LEN;
    if config.pool.buffer_size < min {
        return Err(Error::Config(format!(
            "pool.buffer_size {} cannot hold a {}-byte header frame",
            config.pool.buffer_size, min
        )));
    }
    if config.pool.buffer_count == 0 {
        return Err(Error::Config("pool.buffer_count must be nonzero".into()));
    }
    Ok(())
}
