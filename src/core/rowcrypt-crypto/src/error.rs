//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during primitive operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The output buffer cannot hold the result.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required by the operation.
        needed: usize,
        /// Bytes provided by the caller.
        available: usize,
    },

    /// Invalid key format or size.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Input is not valid in the expected encoding.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}
