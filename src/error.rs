use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("frame truncated: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("not an IPv4 frame: ethertype {ethertype:#06x}")]
    NotIpv4 { ethertype: u16 },

    #[error("unsupported transport protocol {protocol}")]
    UnsupportedProtocol { protocol: u8 },

    #[error("IPv4 total length {total_length} inconsistent with {header_len} header bytes")]
    MalformedLength { total_length: u16, header_len: usize },

    #[error("packet carries no payload")]
    EmptyPayload,

    #[error("invalid build request: {0}")]
    InvalidRequest(String),

    #[error("buffer allocation of {requested} bytes failed")]
    AllocationFailed { requested: usize },
}

impl Error {
    /// Stable label for per-kind counters.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Config(_) => "config",
            Error::Truncated { .. } => "truncated",
            Error::NotIpv4 { .. } => "not_ipv4",
            Error::UnsupportedProtocol { .. } => "unsupported_protocol",
            Error::MalformedLength { .. } => "malformed_length",
            Error::EmptyPayload => "empty_payload",
            Error::InvalidRequest(_) => "invalid_request",
            Error::AllocationFailed { .. } => "allocation_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
