//! AES-128-ECB block encryption with PKCS#7 padding.
//!
//! The mode, key size and padding are fixed: existing callers depend on the
//! exact ciphertext bytes, so none of them are configurable. There is no IV.
//!
//! Keys of any length are accepted and folded into 16 bytes by XOR-ing byte
//! `i` into position `i % 16` of an all-zero key, the same scheme MySQL uses
//! for `AES_ENCRYPT`. A missing key therefore encrypts under the zero key.

use ecb::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit};
use zeroize::Zeroizing;

use crate::error::CryptoError;

type Aes128EcbEnc = ecb::Encryptor<aes::Aes128>;
type Aes128EcbDec = ecb::Decryptor<aes::Aes128>;

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of an AES-128 key in bytes.
pub const KEY_SIZE: usize = 16;

/// Folds arbitrary key material into an AES-128 key.
///
/// `None` and an empty slice both produce the all-zero key.
pub fn fold_key(key: Option<&[u8]>) -> Zeroizing<[u8; KEY_SIZE]> {
    let mut folded = Zeroizing::new([0u8; KEY_SIZE]);
    for (i, byte) in key.unwrap_or_default().iter().enumerate() {
        folded[i % KEY_SIZE] ^= byte;
    }
    folded
}

/// Returns the ciphertext length for a plaintext of `len` bytes.
///
/// PKCS#7 always adds between 1 and 16 bytes of padding.
#[inline]
pub fn padded_len(len: usize) -> usize {
    (len / BLOCK_SIZE + 1) * BLOCK_SIZE
}

/// Encrypts `plaintext` into `out` and returns the ciphertext length.
///
/// # Arguments
///
/// * `plaintext` - Data to encrypt
/// * `key` - Raw key material, folded with [`fold_key`]
/// * `out` - Destination, at least [`padded_len`] bytes long
pub fn encrypt(plaintext: &[u8], key: Option<&[u8]>, out: &mut [u8]) -> Result<usize, CryptoError> {
    let needed = padded_len(plaintext.len());
    if out.len() < needed {
        return Err(CryptoError::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let key = fold_key(key);
    let cipher =
        Aes128EcbEnc::new_from_slice(&key[..]).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

    let ciphertext = cipher
        .encrypt_padded_b2b_mut::<Pkcs7>(plaintext, out)
        .map_err(|_| CryptoError::EncryptionFailed("padding error".to_string()))?;

    Ok(ciphertext.len())
}

/// Decrypts `ciphertext` into `out` and returns the plaintext length.
///
/// # Errors
///
/// Fails if the ciphertext is not a whole number of blocks, if the padding
/// does not verify (which is what a wrong key usually produces), or if `out`
/// is shorter than `ciphertext`.
pub fn decrypt(ciphertext: &[u8], key: Option<&[u8]>, out: &mut [u8]) -> Result<usize, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::DecryptionFailed(format!(
            "ciphertext length {} is not a multiple of {}",
            ciphertext.len(),
            BLOCK_SIZE
        )));
    }

    if out.len() < ciphertext.len() {
        return Err(CryptoError::BufferTooSmall {
            needed: ciphertext.len(),
            available: out.len(),
        });
    }

    let key = fold_key(key);
    let cipher =
        Aes128EcbDec::new_from_slice(&key[..]).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;

    let plaintext = cipher
        .decrypt_padded_b2b_mut::<Pkcs7>(ciphertext, &mut out[..ciphertext.len()])
        .map_err(|_| CryptoError::DecryptionFailed("invalid padding".to_string()))?;

    Ok(plaintext.len())
}
