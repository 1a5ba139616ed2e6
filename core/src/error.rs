use thiserror::Error;

/// Failure taxonomy shared by every fallible operation in this crate.
///
/// `IterEnd` is deliberately not a variant here: it is a sentinel returned by
/// token-iteration adapters to mean "no more tokens", not a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed UTF-8, a malformed dictionary/model line, wrong column
    /// count, or a non-positive frequency.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A cut was requested before a base dictionary and HMM model were
    /// loaded.
    #[error("segmenter not initialized: {operation}")]
    NotInitialized { operation: String },

    /// A host requested a charset other than UTF-8.
    #[error("not supported: {message}")]
    NotSupported { message: String },

    /// A documented allocation limit was exceeded.
    #[error("out of memory: {message}")]
    OutOfMemory { message: String },

    /// A post-condition was violated during cutting (a DAG edge pointing
    /// past the span, an empty DAG row, a Viterbi range mismatch).
    #[error("internal invariant violation: {message}")]
    Internal { message: String },
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    pub fn not_initialized(operation: impl Into<String>) -> Self {
        Error::NotInitialized {
            operation: operation.into(),
        }
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Error::NotSupported {
            message: message.into(),
        }
    }

    pub fn out_of_memory(message: impl Into<String>) -> Self {
        Error::OutOfMemory {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
