use thiserror::Error;

/// A record or envelope failed to serialize via the binary wire format.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to encode value: {0}")]
    Bincode(#[from] bincode::Error),
}

/// The decoded envelope failed its magic check, or the byte stream was
/// too short/malformed to decode at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("envelope magic mismatch: expected {expected:#010x}, found {found:#010x}")]
    MagicMismatch { expected: u32, found: u32 },
    #[error("envelope is truncated or malformed: {0}")]
    Malformed(#[from] bincode::Error),
}

/// An output artifact could not be written, or an input envelope could not be read.
#[derive(Debug, Error)]
pub enum IOError {
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can go wrong rebuilding a [`crate::runtime::Runtime`] from
/// an envelope's bytes: a bad magic/truncated stream, or a `key` option that
/// no longer resolves against the message descriptor it is loaded with.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Schema(#[from] sheetyield_store::SchemaError),
}
