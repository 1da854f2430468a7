//! MD5 message digests.
//!
//! MD5 is kept for compatibility with SQL `md5()` callers, not for security.

use md5::{Digest, Md5};

/// Length of a hex-encoded MD5 digest.
pub const DIGEST_HEX_LEN: usize = 32;

/// Incremental MD5 accumulator.
///
/// Absorbs any number of byte spans and finalizes to lowercase hex. The
/// digest of the concatenation equals the digest of the spans fed in order.
#[derive(Clone)]
pub struct Md5Digest {
    hasher: Md5,
}

impl Md5Digest {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self { hasher: Md5::new() }
    }

    /// Absorbs `data`.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Consumes the accumulator and returns the 32-character hex digest.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl Default for Md5Digest {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Md5Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Md5Digest").finish_non_exhaustive()
    }
}

/// Computes the hex MD5 digest of `data` in one step.
pub fn md5_hex(data: &[u8]) -> String {
    let mut digest = Md5Digest::new();
    digest.update(data);
    digest.finalize_hex()
}
