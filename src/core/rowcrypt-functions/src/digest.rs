//! `md5` and `md5sum`.
//!
//! Both return the 32-character lowercase hex digest. A fresh accumulator is
//! created per call.

use bytes::Bytes;
use rowcrypt_crypto::md5_digest::{md5_hex, Md5Digest, DIGEST_HEX_LEN};

use crate::buffer::ByteBuffer;
use crate::context::ExecutionContext;

fn emit_hex<C>(ctx: &mut C, hex: String) -> Bytes
where
    C: ExecutionContext + ?Sized,
{
    let mut out = ctx.allocate(DIGEST_HEX_LEN);
    out.copy_from_slice(hex.as_bytes());
    out.freeze()
}

/// Hex MD5 of `src`.
///
/// Returns null only if `src` is null; an empty buffer hashes to the digest
/// of the empty message.
pub fn md5<C>(ctx: &mut C, src: ByteBuffer<'_>) -> Option<Bytes>
where
    C: ExecutionContext + ?Sized,
{
    let src = src.as_bytes()?;
    Some(emit_hex(ctx, md5_hex(src)))
}

/// Hex MD5 of the concatenation of `args`, skipping nulls.
///
/// Never null: no arguments, or only nulls, give the digest of the empty
/// message.
pub fn md5sum<'a, C, I>(ctx: &mut C, args: I) -> Bytes
where
    C: ExecutionContext + ?Sized,
    I: IntoIterator<Item = ByteBuffer<'a>>,
{
    let digest = args
        .into_iter()
        .filter_map(|arg| arg.as_bytes())
        .fold(Md5Digest::new(), |mut digest, span| {
            digest.update(span);
            digest
        });

    emit_hex(ctx, digest.finalize_hex())
}
