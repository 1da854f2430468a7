//! Name-based dispatch and batch evaluation.
//!
//! Engines resolve a function by its SQL name once, then call it per row
//! ([`ScalarFunction::invoke`]) or per batch ([`ScalarFunction::evaluate`]).

use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::base64::{from_base64, to_base64};
use crate::buffer::ByteBuffer;
use crate::cipher::{aes_decrypt, aes_encrypt};
use crate::context::ExecutionContext;
use crate::digest::{md5, md5sum};
use crate::error::FunctionError;

// ============================================================================
// Types
// ============================================================================

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Any number of arguments, including none.
    Variadic,
}

impl Arity {
    /// Returns true if `count` arguments are acceptable.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Exact(n) => *n == count,
            Self::Variadic => true,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{}", n),
            Self::Variadic => write!(f, "any number of"),
        }
    }
}

/// The registered scalar functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarFunction {
    /// `aes_encrypt(src, key)`.
    AesEncrypt,
    /// `aes_decrypt(src, key)`.
    AesDecrypt,
    /// `from_base64(src)`.
    FromBase64,
    /// `to_base64(src)`.
    ToBase64,
    /// `md5(src)`.
    Md5,
    /// `md5sum(args...)`.
    #[serde(rename = "md5sum")]
    Md5Sum,
}

impl ScalarFunction {
    /// Every registered function, in listing order.
    pub const ALL: [ScalarFunction; 6] = [
        Self::AesEncrypt,
        Self::AesDecrypt,
        Self::FromBase64,
        Self::ToBase64,
        Self::Md5,
        Self::Md5Sum,
    ];

    /// SQL name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AesEncrypt => "aes_encrypt",
            Self::AesDecrypt => "aes_decrypt",
            Self::FromBase64 => "from_base64",
            Self::ToBase64 => "to_base64",
            Self::Md5 => "md5",
            Self::Md5Sum => "md5sum",
        }
    }

    /// Accepted argument count.
    pub fn arity(&self) -> Arity {
        match self {
            Self::AesEncrypt | Self::AesDecrypt => Arity::Exact(2),
            Self::FromBase64 | Self::ToBase64 | Self::Md5 => Arity::Exact(1),
            Self::Md5Sum => Arity::Variadic,
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::AesEncrypt => "AES-128-ECB encrypt with PKCS#7 padding; null key uses the zero key",
            Self::AesDecrypt => "AES-128-ECB decrypt; null on missing key or bad padding",
            Self::FromBase64 => "decode standard padded base64; null on invalid input",
            Self::ToBase64 => "encode as standard padded base64",
            Self::Md5 => "hex MD5 digest; empty input is hashed, null stays null",
            Self::Md5Sum => "hex MD5 digest of the concatenated non-null arguments",
        }
    }

    fn check_arity(&self, count: usize) -> Result<(), FunctionError> {
        let arity = self.arity();
        if arity.accepts(count) {
            Ok(())
        } else {
            Err(FunctionError::ArityMismatch {
                function: self.name().to_string(),
                expected: arity.to_string(),
                actual: count,
            })
        }
    }

    // ========================================================================
    // Invocation
    // ========================================================================

    /// Calls the function on one row of arguments.
    ///
    /// # Errors
    ///
    /// Only [`FunctionError::ArityMismatch`]. Data problems yield `Ok(None)`.
    pub fn invoke<C>(
        &self,
        ctx: &mut C,
        args: &[ByteBuffer<'_>],
    ) -> Result<Option<Bytes>, FunctionError>
    where
        C: ExecutionContext + ?Sized,
    {
        self.check_arity(args.len())?;

        let result = match self {
            Self::AesEncrypt => aes_encrypt(ctx, args[0], args[1]),
            Self::AesDecrypt => aes_decrypt(ctx, args[0], args[1]),
            Self::FromBase64 => from_base64(ctx, args[0]),
            Self::ToBase64 => to_base64(ctx, args[0]),
            Self::Md5 => md5(ctx, args[0]),
            Self::Md5Sum => Some(md5sum(ctx, args.iter().copied())),
        };

        Ok(result)
    }

    /// Calls the function once per row of a columnar batch.
    ///
    /// `columns[i][row]` is argument `i` of `row`. Every column must hold
    /// exactly `num_rows` values. Variadic functions may take zero columns,
    /// which is why the row count is passed explicitly.
    pub fn evaluate<C>(
        &self,
        ctx: &mut C,
        num_rows: usize,
        columns: &[&[ByteBuffer<'_>]],
    ) -> Result<Vec<Option<Bytes>>, FunctionError>
    where
        C: ExecutionContext + ?Sized,
    {
        self.check_arity(columns.len())?;

        for (column, values) in columns.iter().enumerate() {
            if values.len() != num_rows {
                return Err(FunctionError::RowCountMismatch {
                    column,
                    expected: num_rows,
                    actual: values.len(),
                });
            }
        }

        let mut row = Vec::with_capacity(columns.len());
        let mut results = Vec::with_capacity(num_rows);
        for i in 0..num_rows {
            row.clear();
            row.extend(columns.iter().map(|values| values[i]));
            results.push(self.invoke(ctx, &row)?);
        }

        Ok(results)
    }
}

impl std::fmt::Display for ScalarFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarFunction {
    type Err = FunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| FunctionError::UnknownFunction(s.to_string()))
    }
}
