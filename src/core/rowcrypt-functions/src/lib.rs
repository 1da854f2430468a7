//! # Rowcrypt Functions
//!
//! Scalar functions a tabular query engine calls once per row:
//!
//! - `aes_encrypt` / `aes_decrypt` (AES-128-ECB, PKCS#7)
//! - `to_base64` / `from_base64`
//! - `md5` / `md5sum`
//!
//! ## Null Policy
//!
//! Inputs are [`ByteBuffer`]s, which distinguish null from empty. A missing
//! required input yields a null (`None`) result before anything is
//! allocated, and every primitive failure (bad padding, invalid base64, ...)
//! also becomes `None`. Data never makes a function fail loudly; only a
//! malformed call shape (wrong arity, ragged columns) does, through
//! [`FunctionError`].
//!
//! ## Output Storage
//!
//! Outputs are carved out of an [`ExecutionContext`] supplied by the caller,
//! typically a [`RowArena`] scoped to the current batch.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod base64;
pub mod buffer;
pub mod cipher;
pub mod context;
pub mod digest;
pub mod error;
pub mod registry;

pub use crate::base64::{from_base64, to_base64};
pub use buffer::ByteBuffer;
pub use cipher::{aes_decrypt, aes_encrypt};
pub use context::{ArenaConfig, ExecutionContext, RowArena};
pub use digest::{md5, md5sum};
pub use error::FunctionError;
pub use registry::{Arity, ScalarFunction};

pub use bytes::Bytes;
