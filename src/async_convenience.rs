//! Async convenience functions
//!
//! Decompression is a single blocking call with no suspension points, so
//! these wrappers run each whole call on tokio's blocking thread pool and
//! await its completion.

#[cfg(feature = "async")]
/// Async decompression functions
pub mod functions {
    use crate::{BlastError, Decompressor, Result};
    use bytes::Bytes;
    use std::io::{self, BufWriter, Write};
    use std::path::Path;
    use tokio::io::{AsyncRead, AsyncReadExt};

    /// Run a blocking decompression call off the async runtime's workers
    pub(crate) async fn run_blocking<T, F>(call: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(call)
            .await
            .map_err(|e| BlastError::Io(io::Error::other(e)))?
    }

    /// Decompress an in-memory stream
    pub async fn decompress_bytes_async(data: Bytes) -> Result<(usize, Vec<u8>)> {
        run_blocking(move || Decompressor::new().buffer_to_buffer(&data)).await
    }

    /// Decompress everything an async reader yields
    ///
    /// The compressed input is collected first, then decoded in one call.
    pub async fn decompress_async<R: AsyncRead + Unpin>(mut reader: R) -> Result<(usize, Vec<u8>)> {
        let mut compressed = Vec::new();
        reader.read_to_end(&mut compressed).await?;
        decompress_bytes_async(Bytes::from(compressed)).await
    }

    /// Decompress one file into another, streaming `chunk_size` bytes at a time
    ///
    /// Returns the remainder and the number of bytes written.
    pub async fn decompress_file<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_path: P1,
        output_path: P2,
        chunk_size: usize,
    ) -> Result<(usize, u64)> {
        let input_path = input_path.as_ref().to_path_buf();
        let output_path = output_path.as_ref().to_path_buf();

        run_blocking(move || {
            let input = std::fs::File::open(&input_path)?;
            let output = std::fs::File::create(&output_path)?;

            let (remainder, mut writer) = Decompressor::new()
                .with_chunk_size(chunk_size)
                .stream_to_stream(input, BufWriter::new(output))?;
            writer.flush()?;

            let written = writer.get_ref().metadata()?.len();
            log::debug!(
                "decompressed {} -> {} ({} bytes)",
                input_path.display(),
                output_path.display(),
                written
            );
            Ok((remainder, written))
        })
        .await
    }
}

#[cfg(feature = "async")]
pub use functions::*;
