//! Output adapters
//!
//! The engine delivers decoded bytes through the [`Push`] capability, at most
//! one window (4 KiB) at a time. A refused push ends the call with
//! `OutputSpaceExhausted`; whatever was delivered before stays in the sink.

use std::io::{self, Write};

/// Target for decoded output
pub trait Push {
    /// Deliver one decoded chunk.
    ///
    /// `Ok(true)` means every byte reached the sink, `Ok(false)` means the
    /// sink refused the chunk. Errors abort the call.
    fn push(&mut self, decoded: &[u8]) -> io::Result<bool>;
}

/// Appends decoded output to a caller-owned vector
#[derive(Debug)]
pub struct BufferOutput<'a> {
    buffer: &'a mut Vec<u8>,
}

impl<'a> BufferOutput<'a> {
    /// Append to `buffer`
    pub fn new(buffer: &'a mut Vec<u8>) -> Self {
        Self { buffer }
    }
}

impl Push for BufferOutput<'_> {
    fn push(&mut self, decoded: &[u8]) -> io::Result<bool> {
        self.buffer
            .try_reserve(decoded.len())
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        self.buffer.extend_from_slice(decoded);
        log::trace!(
            "buffer output: appended {} bytes ({} total)",
            decoded.len(),
            self.buffer.len()
        );
        Ok(true)
    }
}

/// Writes decoded output to a writer, once per push
#[derive(Debug)]
pub struct StreamOutput<W> {
    writer: W,
}

impl<W: Write> StreamOutput<W> {
    /// Write into `writer`
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Push for StreamOutput<W> {
    fn push(&mut self, decoded: &[u8]) -> io::Result<bool> {
        let written = self.writer.write(decoded)?;
        if written < decoded.len() {
            log::debug!(
                "stream output: short write ({} of {} bytes), refusing chunk",
                written,
                decoded.len()
            );
            return Ok(false);
        }
        log::trace!("stream output: wrote {} bytes", written);
        Ok(true)
    }
}
