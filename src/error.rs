use thiserror::Error;

/// Errors raised by the simulator and its trace handling.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("address {address} is outside the address space (limit {limit})")]
    AddressOutOfRange { address: u64, limit: u64 },

    /// Page eviction was requested while no page is resident.
    #[error("no resident page is available for eviction")]
    NoEvictionCandidate,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("trace line {line}: invalid token `{token}`")]
    Trace { line: usize, token: String },

    #[error("unknown workload case {0}, expected 1-8")]
    UnknownCase(u8),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
