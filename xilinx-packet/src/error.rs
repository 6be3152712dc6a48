use thiserror::Error;

use crate::packet::Record;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DecodeError {
    #[error("sync word not found")]
    SyncNotFound,
    #[error("invalid packet header {} at offset {offset:#x}", hex::encode(.header))]
    InvalidHeader { offset: usize, header: [u8; 4] },
    #[error(
        "stream truncated at offset {offset:#x}: need {needed} bytes, {available} available"
    )]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error(
        "cannot decode payload of packet {} at offset {offset:#x}: {source}",
        hex::encode(.header)
    )]
    BadValue {
        offset: usize,
        header: [u8; 4],
        #[source]
        source: Box<DecodeError>,
    },
    #[error("index {index} out of range for {table} table")]
    OutOfRange { table: &'static str, index: u32 },
    #[error("invalid bit range [{high}:{low}]")]
    InvalidRange { high: u32, low: u32 },
}

/// A failed walk, together with everything emitted before the failure.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{error}")]
pub struct DecodeFailure {
    pub records: Vec<Record>,
    #[source]
    pub error: DecodeError,
}
