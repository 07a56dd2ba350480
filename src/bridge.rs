//! The four decompression call shapes
//!
//! [`Decompressor`] pairs an engine with a chunk size and exposes one method
//! per combination of buffer or stream input and buffer or stream output.
//! Each method builds the matching adapters, makes exactly one engine call,
//! and turns a non-zero status into an error.
//!
//! ```
//! use pkblast::Decompressor;
//!
//! let compressed = [0x00, 0x04, 0x82, 0x24, 0x25, 0x8f, 0x80, 0x7f];
//! let (remainder, plain) = Decompressor::new().buffer_to_buffer(&compressed)?;
//! assert_eq!(remainder, 0);
//! assert_eq!(plain, b"AIAIAIAIAIAIA");
//! # Ok::<(), pkblast::BlastError>(())
//! ```

use crate::arena::ChunkBuffer;
use crate::common::DEFAULT_CHUNK_SIZE;
use crate::engine::{Blast, Engine};
use crate::error::{map_status, Result, Status};
use crate::input::{BufferInput, Pull, StreamInput};
use crate::output::{BufferOutput, Push, StreamOutput};
use std::io::{self, Cursor, Read, Write};

/// Counts traffic through a capability for the end-of-call log line
#[derive(Debug)]
struct Metered<T> {
    inner: T,
    calls: usize,
    bytes: usize,
}

impl<T> Metered<T> {
    fn new(inner: T) -> Self {
        Self {
            inner,
            calls: 0,
            bytes: 0,
        }
    }
}

impl<P: Pull> Pull for Metered<P> {
    fn pull(&mut self) -> io::Result<usize> {
        let pulled = self.inner.pull()?;
        self.calls += 1;
        self.bytes += pulled;
        Ok(pulled)
    }

    fn chunk(&self) -> &[u8] {
        self.inner.chunk()
    }
}

impl<P: Push> Push for Metered<P> {
    fn push(&mut self, decoded: &[u8]) -> io::Result<bool> {
        self.calls += 1;
        let accepted = self.inner.push(decoded)?;
        if accepted {
            self.bytes += decoded.len();
        }
        Ok(accepted)
    }
}

/// Front-end that drives an [`Engine`] in any input/output combination
#[derive(Debug, Clone)]
pub struct Decompressor<E = Blast> {
    engine: E,
    chunk_size: usize,
}

impl Decompressor<Blast> {
    /// Create a decompressor using the bundled engine and default chunk size
    pub fn new() -> Self {
        Self::with_engine(Blast)
    }
}

impl Default for Decompressor<Blast> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> Decompressor<E> {
    /// Create a decompressor around a specific engine
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the chunk size used for stream input
    ///
    /// Zero is rejected with `InvalidChunkSize` when a stream call starts.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Chunk size used for stream input
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The engine behind this decompressor
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// One engine call, with the status mapped onto the result
    fn run<I: Pull, O: Push>(&self, input: I, output: O) -> Result<(usize, I, O)> {
        let mut input = Metered::new(input);
        let mut output = Metered::new(output);

        let outcome = self.engine.blast(&mut input, &mut output)?;
        log::debug!(
            "blast finished: status {}, {} pulls ({} bytes), {} pushes ({} bytes), remainder {}",
            outcome.status,
            input.calls,
            input.bytes,
            output.calls,
            output.bytes,
            outcome.remainder
        );

        let status = Status::from_code(outcome.status);
        if status.is_malformed_input() {
            log::debug!("stream rejected as malformed: {:?}", status);
        } else if status.is_resource_exhaustion() {
            log::debug!("call stopped before the end of the stream: {:?}", status);
        }

        map_status(outcome.status)?;
        Ok((outcome.remainder, input.inner, output.inner))
    }

    /// Decompress an in-memory stream into a new vector
    pub fn buffer_to_buffer(&self, input: &[u8]) -> Result<(usize, Vec<u8>)> {
        let mut decoded = Vec::new();
        let (remainder, _, _) = self.run(BufferInput::new(input), BufferOutput::new(&mut decoded))?;
        Ok((remainder, decoded))
    }

    /// Decompress an in-memory stream into a writer
    ///
    /// On failure the writer may already hold a prefix of the output.
    pub fn buffer_to_stream<W: Write>(&self, input: &[u8], sink: W) -> Result<(usize, W)> {
        let (remainder, _, output) = self.run(BufferInput::new(input), StreamOutput::new(sink))?;
        Ok((remainder, output.into_inner()))
    }

    /// Decompress a reader into a new vector
    pub fn stream_to_buffer<R: Read>(&self, source: R) -> Result<(usize, Vec<u8>)> {
        let chunk = ChunkBuffer::acquire(self.chunk_size)?;
        let mut decoded = Vec::new();
        let (remainder, _, _) = self.run(
            StreamInput::new(source, chunk),
            BufferOutput::new(&mut decoded),
        )?;
        Ok((remainder, decoded))
    }

    /// Decompress a reader into a writer
    ///
    /// The remainder counts bytes of the last chunk read from `source` that
    /// follow the compressed stream. On failure the writer may already hold a
    /// prefix of the output.
    pub fn stream_to_stream<R: Read, W: Write>(&self, source: R, sink: W) -> Result<(usize, W)> {
        let chunk = ChunkBuffer::acquire(self.chunk_size)?;
        let (remainder, _, output) =
            self.run(StreamInput::new(source, chunk), StreamOutput::new(sink))?;
        Ok((remainder, output.into_inner()))
    }

    /// Decompress an in-memory stream by reading it through a stream adapter
    ///
    /// Each chunk is copied out of `input` before the engine sees it, so
    /// this is always slower than [`Decompressor::buffer_to_stream`]. It is
    /// here for code that is already written against streams.
    pub fn buffer_chunked_to_stream<W: Write>(
        &self,
        input: &[u8],
        sink: W,
    ) -> Result<(usize, W)> {
        log::warn!("buffer_chunked_to_stream copies its input; prefer buffer_to_stream");
        let chunk_size = self.chunk_size.min(input.len()).max(1);
        self.clone_with_chunk_size(chunk_size)
            .stream_to_stream(Cursor::new(input), sink)
    }

    /// Decompress an in-memory stream into a vector through a stream adapter
    ///
    /// Slower than [`Decompressor::buffer_to_buffer`] for the same reason as
    /// [`Decompressor::buffer_chunked_to_stream`].
    pub fn buffer_chunked_to_buffer(&self, input: &[u8]) -> Result<(usize, Vec<u8>)> {
        log::warn!("buffer_chunked_to_buffer copies its input; prefer buffer_to_buffer");
        let chunk_size = self.chunk_size.min(input.len()).max(1);
        self.clone_with_chunk_size(chunk_size)
            .stream_to_buffer(Cursor::new(input))
    }

    fn clone_with_chunk_size(&self, chunk_size: usize) -> Decompressor<&E> {
        Decompressor {
            engine: &self.engine,
            chunk_size,
        }
    }
}

/// Decompress an in-memory stream into a new vector
pub fn decompress_buffer_to_buffer(input: &[u8]) -> Result<(usize, Vec<u8>)> {
    Decompressor::new().buffer_to_buffer(input)
}

/// Decompress an in-memory stream into a writer
pub fn decompress_buffer_to_stream<W: Write>(input: &[u8], sink: W) -> Result<(usize, W)> {
    Decompressor::new().buffer_to_stream(input, sink)
}

/// Decompress a reader into a new vector, reading `chunk_size` bytes at a time
pub fn decompress_stream_to_buffer<R: Read>(
    source: R,
    chunk_size: usize,
) -> Result<(usize, Vec<u8>)> {
    Decompressor::new()
        .with_chunk_size(chunk_size)
        .stream_to_buffer(source)
}

/// Decompress a reader into a writer, reading `chunk_size` bytes at a time
pub fn decompress_stream_to_stream<R: Read, W: Write>(
    source: R,
    sink: W,
    chunk_size: usize,
) -> Result<(usize, W)> {
    Decompressor::new()
        .with_chunk_size(chunk_size)
        .stream_to_stream(source, sink)
}

/// Decompress an in-memory stream through a stream adapter into a writer
pub fn decompress_buffer_chunked_to_stream<W: Write>(
    input: &[u8],
    sink: W,
    chunk_size: usize,
) -> Result<(usize, W)> {
    Decompressor::new()
        .with_chunk_size(chunk_size)
        .buffer_chunked_to_stream(input, sink)
}

/// Decompress an in-memory stream through a stream adapter into a vector
pub fn decompress_buffer_chunked_to_buffer(
    input: &[u8],
    chunk_size: usize,
) -> Result<(usize, Vec<u8>)> {
    Decompressor::new()
        .with_chunk_size(chunk_size)
        .buffer_chunked_to_buffer(input)
}
