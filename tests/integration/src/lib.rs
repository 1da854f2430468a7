//! Integration tests for the Rowcrypt function layer.
//!
//! These tests drive the public API the way a query engine does: one arena
//! per batch, functions resolved by name, nulls flowing through every path.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use anyhow::{bail, Context, Result};
use rowcrypt_functions::{ByteBuffer, Bytes, RowArena, ScalarFunction};

// ============================================================================
// Test Engine
// ============================================================================

/// A minimal stand-in for a query engine: resolves functions by name and
/// evaluates them over owned columns with a per-batch arena.
pub struct TestEngine {
    arena: RowArena,
}

impl TestEngine {
    /// Creates an engine with a fresh arena.
    pub fn new() -> Self {
        Self {
            arena: RowArena::new(),
        }
    }

    /// Calls `name` on one row, where `None` is SQL NULL.
    pub fn call(&mut self, name: &str, args: &[Option<&[u8]>]) -> Result<Option<Bytes>> {
        let function: ScalarFunction = name
            .parse()
            .with_context(|| format!("resolving {name}"))?;
        let args: Vec<ByteBuffer<'_>> = args.iter().copied().map(ByteBuffer::from).collect();
        Ok(function.invoke(&mut self.arena, &args)?)
    }

    /// Calls `name` on one row and requires a non-null result.
    pub fn call_value(&mut self, name: &str, args: &[Option<&[u8]>]) -> Result<Bytes> {
        match self.call(name, args)? {
            Some(value) => Ok(value),
            None => bail!("{name} returned null"),
        }
    }

    /// Evaluates `name` over a batch of owned columns, then resets the arena.
    pub fn evaluate(
        &mut self,
        name: &str,
        num_rows: usize,
        columns: &[Vec<Option<Vec<u8>>>],
    ) -> Result<Vec<Option<Bytes>>> {
        let function: ScalarFunction = name.parse()?;
        let buffers: Vec<Vec<ByteBuffer<'_>>> = columns
            .iter()
            .map(|col| col.iter().map(|v| ByteBuffer::from(v.as_deref())).collect())
            .collect();
        let refs: Vec<&[ByteBuffer<'_>]> = buffers.iter().map(Vec::as_slice).collect();

        let results = function.evaluate(&mut self.arena, num_rows, &refs)?;
        self.arena.reset();
        Ok(results)
    }

    /// Bytes allocated from the arena since the last batch.
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::OsRng, Rng, RngCore};

    const EMPTY_MD5: &[u8] = b"d41d8cd98f00b204e9800998ecf8427e";

    fn v(s: &str) -> Option<&[u8]> {
        Some(s.as_bytes())
    }

    #[test]
    fn test_base64_roundtrip_random() {
        let mut engine = TestEngine::new();
        for _ in 0..64 {
            let len = OsRng.gen_range(1..200);
            let mut data = vec![0u8; len];
            OsRng.fill_bytes(&mut data);

            let encoded = engine.call_value("to_base64", &[Some(&data)]).unwrap();
            let decoded = engine.call_value("from_base64", &[Some(&encoded)]).unwrap();
            assert_eq!(&decoded[..], &data[..]);
        }
    }

    #[test]
    fn test_aes_roundtrip_random() {
        let mut engine = TestEngine::new();
        for _ in 0..64 {
            let len = OsRng.gen_range(1..200);
            let mut data = vec![0u8; len];
            let mut key = [0u8; 16];
            OsRng.fill_bytes(&mut data);
            OsRng.fill_bytes(&mut key);

            let encrypted = engine
                .call_value("aes_encrypt", &[Some(&data), Some(&key)])
                .unwrap();
            assert_eq!(encrypted.len() % 16, 0);
            assert!(encrypted.len() > data.len());

            let decrypted = engine
                .call_value("aes_decrypt", &[Some(&encrypted), Some(&key)])
                .unwrap();
            assert_eq!(&decrypted[..], &data[..]);
        }
    }

    #[test]
    fn test_encrypt_null_policy() {
        let mut engine = TestEngine::new();
        for key in [None, v(""), v("key")] {
            assert!(engine.call("aes_encrypt", &[None, key]).unwrap().is_none());
            assert!(engine.call("aes_encrypt", &[v(""), key]).unwrap().is_none());
        }
        assert_eq!(engine.allocated_bytes(), 0);
    }

    #[test]
    fn test_decrypt_null_policy() {
        let mut engine = TestEngine::new();
        let encrypted = engine.call_value("aes_encrypt", &[v("x"), v("key")]).unwrap();

        assert!(engine
            .call("aes_decrypt", &[Some(&encrypted), None])
            .unwrap()
            .is_none());
        assert!(engine
            .call("aes_decrypt", &[Some(&encrypted), v("")])
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_decrypt_with_wrong_key() {
        let mut engine = TestEngine::new();
        let encrypted = engine
            .call_value("aes_encrypt", &[v("secret"), v("0123456789abcdef")])
            .unwrap();

        let mut nulls = 0;
        for i in 0..64 {
            let wrong_key = format!("key-{i:012}");
            let result = engine
                .call("aes_decrypt", &[Some(&encrypted), v(&wrong_key)])
                .unwrap();
            match result {
                None => nulls += 1,
                Some(garbage) => assert_ne!(&garbage[..], b"secret"),
            }
        }

        // Wrong-key output only occasionally ends in valid padding.
        assert!(nulls >= 56, "only {nulls} of 64 wrong keys gave null");
    }

    #[test]
    fn test_null_key_encryption_is_zero_key() {
        let mut engine = TestEngine::new();
        let zero_key = [0u8; 16];

        let legacy = engine.call_value("aes_encrypt", &[v("legacy"), None]).unwrap();
        let decrypted = engine
            .call_value("aes_decrypt", &[Some(&legacy), Some(&zero_key)])
            .unwrap();
        assert_eq!(&decrypted[..], b"legacy");

        // Matches the primitive directly.
        let mut out = [0u8; 32];
        let n = rowcrypt_crypto::aes_ecb::encrypt(b"legacy", None, &mut out).unwrap();
        assert_eq!(&legacy[..], &out[..n]);
    }

    #[test]
    fn test_md5_properties() {
        let mut engine = TestEngine::new();

        let empty = engine.call_value("md5", &[v("")]).unwrap();
        assert_eq!(&empty[..], EMPTY_MD5);
        assert!(engine.call("md5", &[None]).unwrap().is_none());

        assert_eq!(&engine.call_value("md5sum", &[]).unwrap()[..], EMPTY_MD5);
        assert_eq!(
            &engine.call_value("md5sum", &[None, None]).unwrap()[..],
            EMPTY_MD5
        );

        let ab = engine.call_value("md5", &[v("ab")]).unwrap();
        let sum = engine.call_value("md5sum", &[v("a"), v("b")]).unwrap();
        assert_eq!(ab, sum);
    }

    #[test]
    fn test_base64_properties() {
        let mut engine = TestEngine::new();
        assert_eq!(&engine.call_value("to_base64", &[v("f")]).unwrap()[..], b"Zg==");
        assert_eq!(&engine.call_value("to_base64", &[v("fo")]).unwrap()[..], b"Zm8=");
        assert_eq!(&engine.call_value("to_base64", &[v("foo")]).unwrap()[..], b"Zm9v");
        assert!(engine
            .call("from_base64", &[v("not-valid-base64!!")])
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_batch_pipeline() {
        let mut engine = TestEngine::new();
        let plaintexts: Vec<Option<Vec<u8>>> = vec![
            Some(b"alpha".to_vec()),
            None,
            Some(Vec::new()),
            Some(b"delta".to_vec()),
        ];
        let keys = vec![Some(b"k".to_vec()); plaintexts.len()];

        let encrypted = engine
            .evaluate("aes_encrypt", 4, &[plaintexts.clone(), keys.clone()])
            .unwrap();
        assert_eq!(engine.allocated_bytes(), 0);

        let encrypted: Vec<Option<Vec<u8>>> = encrypted
            .into_iter()
            .map(|c| c.map(|b| b.to_vec()))
            .collect();
        assert!(encrypted[1].is_none());
        assert!(encrypted[2].is_none());

        let decrypted = engine
            .evaluate("aes_decrypt", 4, &[encrypted, keys])
            .unwrap();
        assert_eq!(decrypted[0].as_deref(), Some(&b"alpha"[..]));
        assert!(decrypted[1].is_none());
        assert!(decrypted[2].is_none());
        assert_eq!(decrypted[3].as_deref(), Some(&b"delta"[..]));

        let encoded = engine.evaluate("to_base64", 4, &[plaintexts]).unwrap();
        let encoded: Vec<Option<Vec<u8>>> =
            encoded.into_iter().map(|c| c.map(|b| b.to_vec())).collect();
        let digests = engine.evaluate("md5sum", 4, &[encoded]).unwrap();
        assert!(digests.iter().all(Option::is_some));
        assert_eq!(digests[1].as_deref(), Some(EMPTY_MD5));
    }

    #[test]
    fn test_outputs_outlive_batch() {
        let mut engine = TestEngine::new();
        let results = engine
            .evaluate("md5", 2, &[vec![Some(b"abc".to_vec()), Some(Vec::new())]])
            .unwrap();
        let more = engine
            .evaluate("md5", 1, &[vec![Some(b"a".to_vec())]])
            .unwrap();

        assert_eq!(
            results[0].as_deref(),
            Some(&b"900150983cd24fb0d6963f7d28e17f72"[..])
        );
        assert_eq!(results[1].as_deref(), Some(EMPTY_MD5));
        assert_eq!(
            more[0].as_deref(),
            Some(&b"0cc175b9c0f1b6a831c399e269772661"[..])
        );
    }

    #[test]
    fn test_call_shape_errors() {
        let mut engine = TestEngine::new();
        assert!(engine.call("sha256", &[v("x")]).is_err());
        assert!(engine.call("aes_encrypt", &[v("x")]).is_err());
        assert!(engine
            .evaluate(
                "aes_encrypt",
                2,
                &[vec![None, None], vec![None]]
            )
            .is_err());
    }
}
