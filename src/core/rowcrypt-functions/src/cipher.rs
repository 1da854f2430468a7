//! `aes_encrypt` and `aes_decrypt`.
//!
//! AES-128-ECB with PKCS#7 padding and no IV; see [`rowcrypt_crypto::aes_ecb`]
//! for how keys of other lengths are folded.
//!
//! The two directions disagree on a missing key. `aes_encrypt` with a null
//! key encrypts under the all-zero key, while `aes_decrypt` returns null for
//! a null or empty key.

use bytes::Bytes;
use rowcrypt_crypto::aes_ecb::{self, BLOCK_SIZE};

use crate::buffer::ByteBuffer;
use crate::context::{complete, ExecutionContext};

/// Encrypts `src` under `key`.
///
/// Returns null if `src` is null or empty. A null `key` is not an error.
/// Storage of `src.len() + 16` bytes is taken from `ctx`; the result is cut
/// to the padded ciphertext length.
pub fn aes_encrypt<C>(ctx: &mut C, src: ByteBuffer<'_>, key: ByteBuffer<'_>) -> Option<Bytes>
where
    C: ExecutionContext + ?Sized,
{
    let src = src.content()?;

    let mut out = ctx.allocate(src.len() + BLOCK_SIZE);
    let status = aes_ecb::encrypt(src, key.as_bytes(), &mut out);
    complete("aes_encrypt", out, status)
}

/// Decrypts `src` under `key`.
///
/// Returns null if `src` or `key` is null or empty, or if the ciphertext
/// does not decrypt to validly padded plaintext.
pub fn aes_decrypt<C>(ctx: &mut C, src: ByteBuffer<'_>, key: ByteBuffer<'_>) -> Option<Bytes>
where
    C: ExecutionContext + ?Sized,
{
    let src = src.content()?;
    let key = key.content()?;

    let mut out = ctx.allocate(src.len());
    let status = aes_ecb::decrypt(src, Some(key), &mut out);
    complete("aes_decrypt", out, status)
}
