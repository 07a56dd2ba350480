//! pkblast - buffer and stream front-ends for the PKWare DCL decompressor
//!
//! The PKWare Data Compression Library "implode" format (1980s DOS era, still
//! found in game archives and old installers) is decoded by a callback-driven
//! engine: it pulls compressed input and pushes decoded output, one chunk at a
//! time. This crate connects that engine to the shapes Rust code actually has
//! on hand: byte slices, vectors, and `Read`/`Write` streams.
//!
//! # Features
//!
//! - All four call shapes: buffer/stream input × buffer/stream output
//! - Zero-copy reads for in-memory input
//! - Configurable chunk size for stream input (16 KiB by default)
//! - Typed errors for every engine status code, plus I/O failures
//! - A dispatcher that picks the call shape from the arguments
//! - Async wrappers around blocking calls (`async` feature)
//!
//! # Example
//!
//! ```
//! use pkblast::{decompress_buffer_to_buffer, decompress_stream_to_stream};
//!
//! let compressed = [0x00, 0x04, 0x82, 0x24, 0x25, 0x8f, 0x80, 0x7f];
//!
//! // In memory
//! let (remainder, plain) = decompress_buffer_to_buffer(&compressed)?;
//! assert_eq!((remainder, plain.as_slice()), (0, &b"AIAIAIAIAIAIA"[..]));
//!
//! // Streaming, four bytes per read
//! let (_, sink) = decompress_stream_to_stream(&compressed[..], Vec::new(), 4)?;
//! assert_eq!(sink, b"AIAIAIAIAIAIA");
//! # Ok::<(), pkblast::BlastError>(())
//! ```
//!
//! The remainder is the number of bytes that followed the compressed stream
//! in the last chunk the engine was given. For buffer input that is the
//! length of whatever trails the stream in the caller's slice.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod arena;
pub mod bridge;
pub mod common;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod input;
pub mod output;

// Async modules (only available with async feature)
#[cfg(feature = "async")]
pub mod async_batch;
#[cfg(feature = "async")]
pub mod async_convenience;

// Re-export commonly used types
pub use arena::ChunkBuffer;
pub use bridge::{
    decompress_buffer_chunked_to_buffer, decompress_buffer_chunked_to_stream,
    decompress_buffer_to_buffer, decompress_buffer_to_stream, decompress_stream_to_buffer,
    decompress_stream_to_stream, Decompressor,
};
pub use common::{
    CompressionHeader, CompressionMode, DictionarySize, DEFAULT_CHUNK_SIZE, MAX_WINDOW_SIZE,
};
pub use dispatch::{decompress, CallShape, Output, Sink, Source};
pub use engine::{Blast, Engine, Outcome};
pub use error::{map_status, BlastError, Result, Status};
pub use input::{BufferInput, Pull, StreamInput};
pub use output::{BufferOutput, Push, StreamOutput};

// Re-export async types when async feature is enabled
#[cfg(feature = "async")]
pub use async_batch::AsyncBatchProcessor;
#[cfg(feature = "async")]
pub use async_convenience::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        let _ = CompressionMode::Binary;
        let _ = DictionarySize::Size2K;
        let _ = Decompressor::new().with_chunk_size(DEFAULT_CHUNK_SIZE);
        assert_eq!(Status::from_code(0), Status::Ok);
        assert!(map_status(0).is_ok());
    }
}
