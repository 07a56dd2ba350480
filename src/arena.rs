//! Scratch storage for stream input
//!
//! A [`ChunkBuffer`] is acquired once per stream-input call, refilled on every
//! pull, and released when the call returns. Buffer input never allocates one:
//! the engine reads the caller's memory directly.

use crate::error::{BlastError, Result};
use std::io;

/// Fixed-capacity chunk owned by a single in-flight call
#[derive(Debug)]
pub struct ChunkBuffer {
    data: Box<[u8]>,
    filled: usize,
}

impl ChunkBuffer {
    /// Allocate a chunk of `chunk_size` bytes
    ///
    /// An allocation the system cannot satisfy is reported as an
    /// `OutOfMemory` I/O error.
    pub fn acquire(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(BlastError::InvalidChunkSize(chunk_size));
        }

        let mut data = Vec::new();
        data.try_reserve_exact(chunk_size)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        data.resize(chunk_size, 0);

        Ok(Self {
            data: data.into_boxed_slice(),
            filled: 0,
        })
    }

    /// Capacity of the chunk
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// The whole region, for the next fill. Previous contents are discarded.
    pub fn spare(&mut self) -> &mut [u8] {
        self.filled = 0;
        &mut self.data
    }

    /// Record how many bytes the last fill produced
    pub fn set_filled(&mut self, filled: usize) {
        self.filled = filled.min(self.data.len());
    }

    /// Bytes produced by the last fill
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.filled]
    }
}
