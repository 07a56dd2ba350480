//! Automatic selection of the call shape
//!
//! [`decompress`] takes a [`Source`] (buffer or stream) and a [`Sink`]
//! (buffer or stream) and routes the call to the matching
//! [`Decompressor`](crate::Decompressor) method. The choice is made once, from
//! the two tags, through a 2-bit selector:
//!
//! | bit 1 (output is buffer) | bit 0 (input is buffer) | shape |
//! |---|---|---|
//! | 0 | 0 | stream → stream |
//! | 0 | 1 | buffer → stream |
//! | 1 | 0 | stream → buffer |
//! | 1 | 1 | buffer → buffer |

use crate::bridge::Decompressor;
use crate::engine::Engine;
use crate::error::Result;
use std::io::{Read, Write};

/// Compressed input, tagged by shape
pub enum Source<'a> {
    /// Complete stream held in memory
    Buffer(&'a [u8]),
    /// Stream of unknown remaining length
    Stream(&'a mut dyn Read),
}

impl<'a> Source<'a> {
    /// Tag a reader as stream input
    pub fn stream<R: Read>(reader: &'a mut R) -> Self {
        Source::Stream(reader)
    }

    /// Whether the input is a buffer
    pub fn is_buffer(&self) -> bool {
        matches!(self, Source::Buffer(_))
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(data: &'a [u8]) -> Self {
        Source::Buffer(data)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Source<'a> {
    fn from(data: &'a [u8; N]) -> Self {
        Source::Buffer(data)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(data: &'a Vec<u8>) -> Self {
        Source::Buffer(data)
    }
}

impl<'a, R: Read> From<&'a mut R> for Source<'a> {
    fn from(reader: &'a mut R) -> Self {
        Source::Stream(reader)
    }
}

impl std::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Buffer(data) => f.debug_tuple("Buffer").field(&data.len()).finish(),
            Source::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// Where decoded output should go
pub enum Sink<'a> {
    /// Collect into a new vector
    Buffer,
    /// Write into a caller stream
    Stream(&'a mut dyn Write),
}

impl<'a> Sink<'a> {
    /// Tag a writer as stream output
    pub fn stream<W: Write>(writer: &'a mut W) -> Self {
        Sink::Stream(writer)
    }

    /// Whether output is collected into a vector
    pub fn is_buffer(&self) -> bool {
        matches!(self, Sink::Buffer)
    }
}

impl<'a, W: Write> From<&'a mut W> for Sink<'a> {
    fn from(writer: &'a mut W) -> Self {
        Sink::Stream(writer)
    }
}

impl<'a, W: Write> From<Option<&'a mut W>> for Sink<'a> {
    fn from(writer: Option<&'a mut W>) -> Self {
        match writer {
            Some(writer) => Sink::Stream(writer),
            None => Sink::Buffer,
        }
    }
}

impl std::fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Buffer => f.write_str("Buffer"),
            Sink::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// Decoded output of a dispatched call
pub enum Output<'a> {
    /// Output collected into a vector
    Buffer(Vec<u8>),
    /// The caller's stream, now holding the output
    Stream(&'a mut dyn Write),
}

impl<'a> Output<'a> {
    /// The collected bytes, if the output was a buffer
    pub fn into_buffer(self) -> Option<Vec<u8>> {
        match self {
            Output::Buffer(data) => Some(data),
            Output::Stream(_) => None,
        }
    }

    /// The caller's stream, if the output was a stream
    pub fn into_stream(self) -> Option<&'a mut dyn Write> {
        match self {
            Output::Buffer(_) => None,
            Output::Stream(writer) => Some(writer),
        }
    }
}

impl std::fmt::Debug for Output<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Buffer(data) => f.debug_tuple("Buffer").field(&data.len()).finish(),
            Output::Stream(_) => f.write_str("Stream"),
        }
    }
}

/// The four call shapes, in selector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// Reader in, writer out
    StreamToStream = 0,
    /// Buffer in, writer out
    BufferToStream = 1,
    /// Reader in, vector out
    StreamToBuffer = 2,
    /// Buffer in, vector out
    BufferToBuffer = 3,
}

const SHAPES: [CallShape; 4] = [
    CallShape::StreamToStream,
    CallShape::BufferToStream,
    CallShape::StreamToBuffer,
    CallShape::BufferToBuffer,
];

impl CallShape {
    /// Shape for a 2-bit selector; bits above bit 1 are ignored
    pub fn from_selector(selector: u8) -> Self {
        SHAPES[(selector & 0b11) as usize]
    }

    /// Shape for the given input and output kinds
    pub fn select(input_is_buffer: bool, output_is_buffer: bool) -> Self {
        Self::from_selector(((output_is_buffer as u8) << 1) | input_is_buffer as u8)
    }

    /// The 2-bit selector for this shape
    pub fn selector(self) -> u8 {
        self as u8
    }
}

impl<E: Engine> Decompressor<E> {
    /// Decompress any source into any sink, picking the matching call shape
    pub fn decompress<'o>(
        &self,
        source: Source<'_>,
        sink: Sink<'o>,
    ) -> Result<(usize, Output<'o>)> {
        let shape = CallShape::select(source.is_buffer(), sink.is_buffer());
        log::debug!(
            "dispatching {:?} -> {:?} as {:?} (selector {})",
            source,
            sink,
            shape,
            shape.selector()
        );

        match (source, sink) {
            (Source::Stream(reader), Sink::Stream(writer)) => {
                debug_assert_eq!(shape, CallShape::StreamToStream);
                let (left, writer) = self.stream_to_stream(reader, writer)?;
                Ok((left, Output::Stream(writer)))
            }
            (Source::Buffer(data), Sink::Stream(writer)) => {
                debug_assert_eq!(shape, CallShape::BufferToStream);
                let (left, writer) = self.buffer_to_stream(data, writer)?;
                Ok((left, Output::Stream(writer)))
            }
            (Source::Stream(reader), Sink::Buffer) => {
                debug_assert_eq!(shape, CallShape::StreamToBuffer);
                let (left, data) = self.stream_to_buffer(reader)?;
                Ok((left, Output::Buffer(data)))
            }
            (Source::Buffer(data), Sink::Buffer) => {
                debug_assert_eq!(shape, CallShape::BufferToBuffer);
                let (left, data) = self.buffer_to_buffer(data)?;
                Ok((left, Output::Buffer(data)))
            }
        }
    }
}

/// Decompress any source into any sink with the bundled engine
///
/// `chunk_size` only applies when the source is a stream.
///
/// ```
/// use pkblast::{decompress, Sink, DEFAULT_CHUNK_SIZE};
///
/// let compressed = [0x00, 0x04, 0x82, 0x24, 0x25, 0x8f, 0x80, 0x7f];
///
/// let (left, output) = decompress(&compressed, Sink::Buffer, DEFAULT_CHUNK_SIZE)?;
/// assert_eq!(left, 0);
/// assert_eq!(output.into_buffer().unwrap(), b"AIAIAIAIAIAIA");
///
/// let mut reader = &compressed[..];
/// let mut plain = Vec::new();
/// decompress(&mut reader, &mut plain, 4)?;
/// assert_eq!(plain, b"AIAIAIAIAIAIA");
/// # Ok::<(), pkblast::BlastError>(())
/// ```
pub fn decompress<'s, 'o>(
    source: impl Into<Source<'s>>,
    sink: impl Into<Sink<'o>>,
    chunk_size: usize,
) -> Result<(usize, Output<'o>)> {
    Decompressor::new()
        .with_chunk_size(chunk_size)
        .decompress(source.into(), sink.into())
}
