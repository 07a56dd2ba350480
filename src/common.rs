//! Common types and constants for the PKWare DCL implode format
//!
//! This module defines the header types and format constants shared by the
//! engine, the bridge, and the command-line tool.

use crate::error::{BlastError, Result};

/// Default chunk size for stream input (16 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 16384;

/// Size of the sliding window, and the largest chunk the engine pushes
pub const MAX_WINDOW_SIZE: usize = 4096;

/// Longest Huffman code in any of the format's tables
pub const MAX_CODE_BITS: usize = 13;

/// Match length that encodes the end of the compressed stream
pub const END_OF_STREAM_LENGTH: u32 = 519;

/// Length of the header in front of the bit stream
pub const HEADER_SIZE: usize = 2;

/// How literals are stored in the compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Binary mode - literals are stored as raw 8-bit values
    Binary = 0,
    /// ASCII mode - literals are Huffman coded
    ASCII = 1,
}

impl CompressionMode {
    /// Create a CompressionMode from the header's literal flag
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(CompressionMode::Binary),
            1 => Ok(CompressionMode::ASCII),
            _ => Err(BlastError::MalformedLiteralFlag),
        }
    }
}

/// Dictionary size declared by the stream header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionarySize {
    /// 1024 bytes (1KB) dictionary
    Size1K = 1024,
    /// 2048 bytes (2KB) dictionary
    Size2K = 2048,
    /// 4096 bytes (4KB) dictionary
    Size4K = 4096,
}

impl DictionarySize {
    /// Number of low distance bits stored verbatim for matches longer than 2
    pub fn bits(&self) -> u8 {
        match self {
            DictionarySize::Size1K => 4,
            DictionarySize::Size2K => 5,
            DictionarySize::Size4K => 6,
        }
    }

    /// Create a DictionarySize from the header's dictionary byte
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            4 => Ok(DictionarySize::Size1K),
            5 => Ok(DictionarySize::Size2K),
            6 => Ok(DictionarySize::Size4K),
            _ => Err(BlastError::InvalidDictionarySize),
        }
    }
}

/// The two header bytes in front of every implode stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionHeader {
    /// Literal coding mode
    pub mode: CompressionMode,
    /// Dictionary size
    pub dict_size: DictionarySize,
}

impl CompressionHeader {
    /// Parse the header from the start of a compressed stream
    pub fn parse(data: &[u8]) -> Result<Self> {
        let [mode, dict, ..] = data else {
            return Err(BlastError::InputExhausted);
        };

        Ok(Self {
            mode: CompressionMode::from_u8(*mode)?,
            dict_size: DictionarySize::from_bits(*dict)?,
        })
    }
}
