//! Async batch processing module
//!
//! Decompresses many independent inputs concurrently. Every item is its own
//! blocking call with its own adapters and chunk buffer, so items never share
//! mutable state.

#[cfg(feature = "async")]
/// Concurrent decompression with a configurable concurrency limit
pub mod processor {
    use crate::async_convenience::functions::run_blocking;
    use crate::{Decompressor, Result, DEFAULT_CHUNK_SIZE};
    use bytes::Bytes;
    use futures::stream::{self, StreamExt, TryStreamExt};
    use std::path::{Path, PathBuf};

    /// Concurrent decompressor for batches of buffers or files
    #[derive(Debug, Clone)]
    pub struct AsyncBatchProcessor {
        concurrency_limit: usize,
        chunk_size: usize,
    }

    impl AsyncBatchProcessor {
        /// Create a new batch processor with default settings
        pub fn new() -> Self {
            Self {
                concurrency_limit: num_cpus::get(),
                chunk_size: DEFAULT_CHUNK_SIZE,
            }
        }

        /// Set the concurrency limit (at least 1)
        pub fn with_concurrency(mut self, limit: usize) -> Self {
            self.concurrency_limit = limit.max(1);
            self
        }

        /// Set the chunk size used when reading files
        pub fn with_chunk_size(mut self, size: usize) -> Self {
            self.chunk_size = size;
            self
        }

        /// Concurrency limit in effect
        pub fn concurrency(&self) -> usize {
            self.concurrency_limit
        }

        /// Decompress in-memory streams, returning results in input order
        pub async fn decompress_buffers(
            &self,
            inputs: Vec<Bytes>,
        ) -> Result<Vec<(usize, Vec<u8>)>> {
            stream::iter(inputs.into_iter().map(|data| {
                run_blocking(move || Decompressor::new().buffer_to_buffer(&data))
            }))
            .buffered(self.concurrency_limit)
            .try_collect()
            .await
        }

        /// Decompress files, returning results in input order
        pub async fn decompress_files<P: AsRef<Path>>(
            &self,
            files: Vec<P>,
        ) -> Result<Vec<(PathBuf, usize, Vec<u8>)>> {
            stream::iter(
                files
                    .into_iter()
                    .map(|path| self.decompress_single_file(path.as_ref().to_path_buf())),
            )
            .buffered(self.concurrency_limit)
            .try_collect()
            .await
        }

        /// Stream file results as they complete, in any order
        pub fn decompress_files_streaming<P: AsRef<Path>>(
            &self,
            files: Vec<P>,
        ) -> impl futures::Stream<Item = Result<(PathBuf, usize, Vec<u8>)>> + '_ {
            let paths: Vec<PathBuf> = files.iter().map(|p| p.as_ref().to_path_buf()).collect();
            stream::iter(paths.into_iter().map(move |path| self.decompress_single_file(path)))
                .buffer_unordered(self.concurrency_limit)
        }

        /// Decompress a single file through a stream adapter
        async fn decompress_single_file(&self, path: PathBuf) -> Result<(PathBuf, usize, Vec<u8>)> {
            let chunk_size = self.chunk_size;
            run_blocking(move || {
                let file = std::fs::File::open(&path)?;
                let (remainder, data) = Decompressor::new()
                    .with_chunk_size(chunk_size)
                    .stream_to_buffer(file)?;
                Ok((path, remainder, data))
            })
            .await
        }
    }

    impl Default for AsyncBatchProcessor {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(feature = "async")]
pub use processor::AsyncBatchProcessor;
