//! Execution contexts that own function outputs.
//!
//! The host engine passes a context into every call; the function asks it
//! for storage and hands back a frozen view of what it wrote. The function
//! never frees or keeps that storage.

use bytes::{Bytes, BytesMut};
use rowcrypt_crypto::CryptoError;
use tracing::{debug, trace, warn};

/// Default size of a [`RowArena`] chunk in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest chunk a [`RowArena`] will reserve up front.
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Allocator for function outputs.
///
/// Allocation failure is the context's concern; functions assume the call
/// returns and do not check for it.
pub trait ExecutionContext {
    /// Returns `len` zeroed, writable bytes backed by the context's storage.
    fn allocate(&mut self, len: usize) -> BytesMut;
}

/// Configuration for a [`RowArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Bytes reserved per chunk. Larger requests get a chunk of their own.
    pub chunk_size: usize,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Arena that carves outputs from shared chunks.
///
/// Intended to live for one row batch. Buffers handed out remain valid after
/// [`RowArena::reset`] or drop, since each holds a reference to its chunk.
#[derive(Debug, Default)]
pub struct RowArena {
    config: ArenaConfig,
    chunk: BytesMut,
    allocated_bytes: usize,
    allocation_count: usize,
}

impl RowArena {
    /// Creates an arena with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an arena with the given configuration.
    ///
    /// A chunk size above [`MAX_CHUNK_SIZE`] is lowered to it.
    pub fn with_config(mut config: ArenaConfig) -> Self {
        if config.chunk_size > MAX_CHUNK_SIZE {
            warn!(
                requested = config.chunk_size,
                max = MAX_CHUNK_SIZE,
                "arena chunk size clamped"
            );
            config.chunk_size = MAX_CHUNK_SIZE;
        }

        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the arena configuration.
    pub fn config(&self) -> ArenaConfig {
        self.config
    }

    /// Total bytes handed out since creation or the last reset.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes
    }

    /// Number of allocations since creation or the last reset.
    pub fn allocation_count(&self) -> usize {
        self.allocation_count
    }

    /// Starts a new batch: releases the current chunk and clears counters.
    pub fn reset(&mut self) {
        self.chunk = BytesMut::new();
        self.allocated_bytes = 0;
        self.allocation_count = 0;
    }
}

impl ExecutionContext for RowArena {
    fn allocate(&mut self, len: usize) -> BytesMut {
        self.allocated_bytes += len;
        self.allocation_count += 1;

        if len > self.config.chunk_size {
            trace!(len, "dedicated arena chunk");
            return BytesMut::zeroed(len);
        }

        if self.chunk.capacity() < len {
            trace!(chunk_size = self.config.chunk_size, "new arena chunk");
            self.chunk = BytesMut::with_capacity(self.config.chunk_size);
        }

        self.chunk.resize(len, 0);
        self.chunk.split()
    }
}

/// Turns a primitive's result into a function output.
///
/// On success `out` is cut to the reported length; any error becomes null.
pub(crate) fn complete(
    function: &'static str,
    mut out: BytesMut,
    status: Result<usize, CryptoError>,
) -> Option<Bytes> {
    match status {
        Ok(len) => {
            out.truncate(len);
            Some(out.freeze())
        }
        Err(e) => {
            debug!(function, error = %e, "primitive failed, returning null");
            None
        }
    }
}
