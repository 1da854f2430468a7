//! Base64 encoding and decoding into caller-sized buffers.
//!
//! Uses the RFC 4648 standard alphabet with `=` padding. Decoding is strict:
//! whitespace, URL-safe characters and non-canonical padding are rejected.

use base64::{engine::general_purpose::STANDARD as BASE64, DecodeSliceError, Engine};

use crate::error::CryptoError;

/// Buffer size sufficient to encode `len` bytes, plus one byte of slack.
#[inline]
pub fn encoded_capacity(len: usize) -> usize {
    len.div_ceil(3) * 4 + 1
}

/// Buffer size sufficient to decode `len` encoded bytes.
#[inline]
pub fn decoded_capacity(len: usize) -> usize {
    len + 3
}

/// Encodes `input` into `out` and returns the number of bytes written.
pub fn encode(input: &[u8], out: &mut [u8]) -> Result<usize, CryptoError> {
    BASE64
        .encode_slice(input, out)
        .map_err(|_| CryptoError::BufferTooSmall {
            needed: encoded_capacity(input.len()) - 1,
            available: out.len(),
        })
}

/// Decodes `input` into `out` and returns the number of bytes written.
pub fn decode(input: &[u8], out: &mut [u8]) -> Result<usize, CryptoError> {
    BASE64.decode_slice(input, out).map_err(|e| match e {
        DecodeSliceError::DecodeError(e) => CryptoError::InvalidEncoding(e.to_string()),
        DecodeSliceError::OutputSliceTooSmall => CryptoError::BufferTooSmall {
            needed: decoded_capacity(input.len()),
            available: out.len(),
        },
    })
}
