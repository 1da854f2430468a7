//! # Rowcrypt Crypto
//!
//! Byte-level primitives behind the Rowcrypt scalar functions.
//!
//! This crate provides the building blocks the function layer sizes buffers for:
//! - Block cipher encryption (AES-128-ECB with PKCS#7 padding)
//! - Base64 encoding and decoding (RFC 4648 standard alphabet)
//! - Message digests (MD5, hex encoded)
//!
//! Every primitive writes into a caller-provided buffer or returns an owned
//! value, and reports failure through [`CryptoError`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aes_ecb;
pub mod base64_codec;
pub mod error;
pub mod md5_digest;

pub use error::CryptoError;
pub use md5_digest::{md5_hex, Md5Digest};
