//! Input adapters
//!
//! The engine fetches compressed bytes through the [`Pull`] capability. Each
//! pull makes one run of input visible through [`Pull::chunk`]; the engine
//! keeps its own read position inside that run and pulls again once it has
//! used every byte.

use crate::arena::ChunkBuffer;
use std::io::{self, Read};

/// Source of compressed input for the engine
pub trait Pull {
    /// Make the next run of input available and return its length.
    ///
    /// `Ok(0)` means the input is exhausted. Errors abort the call.
    fn pull(&mut self) -> io::Result<usize>;

    /// The run made available by the last successful pull
    fn chunk(&self) -> &[u8];
}

/// Zero-copy source over caller memory
///
/// The first pull exposes the whole slice. The adapter keeps no cursor into
/// it, so once the engine asks again there is nothing left to hand out and
/// the pull reports `0`. A truncated buffer therefore ends the call with
/// `InputExhausted` instead of feeding the engine the same bytes again.
#[derive(Debug)]
pub struct BufferInput<'a> {
    data: &'a [u8],
    handed_out: bool,
}

impl<'a> BufferInput<'a> {
    /// Wrap an in-memory compressed stream
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            handed_out: false,
        }
    }
}

impl Pull for BufferInput<'_> {
    fn pull(&mut self) -> io::Result<usize> {
        if self.handed_out {
            return Ok(0);
        }
        self.handed_out = true;
        log::trace!("buffer input: exposing {} bytes", self.data.len());
        Ok(self.data.len())
    }

    fn chunk(&self) -> &[u8] {
        if self.handed_out {
            self.data
        } else {
            &[]
        }
    }
}

/// Chunked source over a reader
///
/// Every pull performs exactly one `read` into the chunk buffer. A short read
/// is accepted as-is; the engine pulls again when it needs more.
#[derive(Debug)]
pub struct StreamInput<R> {
    reader: R,
    chunk: ChunkBuffer,
}

impl<R: Read> StreamInput<R> {
    /// Read from `reader` through `chunk`
    pub fn new(reader: R, chunk: ChunkBuffer) -> Self {
        Self { reader, chunk }
    }

    /// Give back the reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Pull for StreamInput<R> {
    fn pull(&mut self) -> io::Result<usize> {
        // Interrupted is not retried: it is how a caller cancels a call.
        let read = self.reader.read(self.chunk.spare())?;
        self.chunk.set_filled(read);
        log::trace!(
            "stream input: read {} of {} bytes",
            read,
            self.chunk.capacity()
        );
        Ok(read)
    }

    fn chunk(&self) -> &[u8] {
        self.chunk.filled()
    }
}
