//! `to_base64` and `from_base64`.

use bytes::Bytes;
use rowcrypt_crypto::base64_codec;

use crate::buffer::ByteBuffer;
use crate::context::{complete, ExecutionContext};

/// Decodes standard, padded base64.
///
/// Returns null if `src` is null or empty, or if it is not valid base64.
/// Scratch of `src.len() + 3` bytes is taken from `ctx`.
pub fn from_base64<C>(ctx: &mut C, src: ByteBuffer<'_>) -> Option<Bytes>
where
    C: ExecutionContext + ?Sized,
{
    let src = src.content()?;

    let mut out = ctx.allocate(base64_codec::decoded_capacity(src.len()));
    let status = base64_codec::decode(src, &mut out);
    complete("from_base64", out, status)
}

/// Encodes `src` as standard, padded base64.
///
/// Returns null if `src` is null or empty.
pub fn to_base64<C>(ctx: &mut C, src: ByteBuffer<'_>) -> Option<Bytes>
where
    C: ExecutionContext + ?Sized,
{
    let src = src.content()?;

    let mut out = ctx.allocate(base64_codec::encoded_capacity(src.len()));
    let status = base64_codec::encode(src, &mut out);
    complete("to_base64", out, status)
}
