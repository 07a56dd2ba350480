//! Shared fixtures for the integration tests and benches
//!
//! `StreamBuilder` writes implode bit streams token by token so tests can
//! build inputs of any size without a compressor.

#![allow(dead_code)]

use std::io::{self, Read, Write};

/// Reference stream: "AI" followed by an 11-byte match at distance 2
pub const AIAI: [u8; 8] = [0x00, 0x04, 0x82, 0x24, 0x25, 0x8f, 0x80, 0x7f];

/// Plaintext of [`AIAI`]
pub const AIAI_PLAIN: &[u8] = b"AIAIAIAIAIAIA";

const LITERAL_LENGTHS: [u8; 98] = [
    11, 124, 8, 7, 28, 7, 188, 13, 76, 4, 10, 8, 12, 10, 12, 10, 8, 23, 8, 9, 7, 6, 7, 8, 7, 6, 55,
    8, 23, 24, 12, 11, 7, 9, 11, 12, 6, 7, 22, 5, 7, 24, 6, 11, 9, 6, 7, 22, 7, 11, 38, 7, 9, 8,
    25, 11, 8, 11, 9, 12, 8, 12, 5, 38, 5, 38, 5, 11, 7, 5, 6, 21, 6, 10, 53, 8, 7, 24, 10, 27,
    44, 253, 253, 253, 252, 252, 252, 13, 12, 45, 12, 45, 12, 61, 12, 45, 44, 173,
];
const LENGTH_LENGTHS: [u8; 6] = [2, 35, 36, 53, 38, 23];
const DISTANCE_LENGTHS: [u8; 7] = [2, 20, 53, 230, 247, 151, 248];
const LENGTH_BASE: [u32; 16] = [3, 2, 4, 5, 6, 7, 8, 9, 10, 12, 16, 24, 40, 72, 136, 264];
const LENGTH_EXTRA: [u32; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];

/// Longest match length that is not the end-of-stream marker
pub const MAX_MATCH_LENGTH: u32 = 518;

/// Canonical (code, length) pairs for a run-length encoded table
fn canonical_codes(compact: &[u8]) -> Vec<(u32, u32)> {
    let mut lengths = Vec::new();
    for &run in compact {
        for _ in 0..=(run >> 4) {
            lengths.push((run & 0x0F) as u32);
        }
    }

    let mut count = [0u32; 14];
    for &len in &lengths {
        count[len as usize] += 1;
    }
    count[0] = 0;

    let mut next = [0u32; 14];
    let mut code = 0;
    for len in 1..14 {
        code = (code + count[len - 1]) << 1;
        next[len] = code;
    }

    lengths
        .iter()
        .map(|&len| {
            let assigned = next[len as usize];
            next[len as usize] += 1;
            (assigned, len)
        })
        .collect()
}

/// Builds a compressed stream one token at a time
pub struct StreamBuilder {
    ascii: bool,
    dict_bits: u32,
    out: Vec<u8>,
    acc: u32,
    filled: u32,
    literal_codes: Vec<(u32, u32)>,
    length_codes: Vec<(u32, u32)>,
    distance_codes: Vec<(u32, u32)>,
}

impl StreamBuilder {
    fn new(ascii: bool, dict_bits: u32) -> Self {
        Self {
            ascii,
            dict_bits,
            out: vec![ascii as u8, dict_bits as u8],
            acc: 0,
            filled: 0,
            literal_codes: canonical_codes(&LITERAL_LENGTHS),
            length_codes: canonical_codes(&LENGTH_LENGTHS),
            distance_codes: canonical_codes(&DISTANCE_LENGTHS),
        }
    }

    /// Stream with uncoded literals
    pub fn binary(dict_bits: u32) -> Self {
        Self::new(false, dict_bits)
    }

    /// Stream with Huffman coded literals
    pub fn ascii(dict_bits: u32) -> Self {
        Self::new(true, dict_bits)
    }

    fn put(&mut self, value: u32, bits: u32) {
        for i in 0..bits {
            self.acc |= ((value >> i) & 1) << self.filled;
            self.filled += 1;
            if self.filled == 8 {
                self.out.push(self.acc as u8);
                self.acc = 0;
                self.filled = 0;
            }
        }
    }

    fn put_code(&mut self, (code, len): (u32, u32)) {
        for i in (0..len).rev() {
            self.put(((code >> i) & 1) ^ 1, 1);
        }
    }

    /// Append one literal byte
    pub fn literal(&mut self, byte: u8) -> &mut Self {
        self.put(0, 1);
        if self.ascii {
            let code = self.literal_codes[byte as usize];
            self.put_code(code);
        } else {
            self.put(byte as u32, 8);
        }
        self
    }

    /// Append literal bytes
    pub fn literals(&mut self, bytes: &[u8]) -> &mut Self {
        for &byte in bytes {
            self.literal(byte);
        }
        self
    }

    fn length(&mut self, length: u32) {
        let symbol = (0..16)
            .find(|&s| {
                LENGTH_BASE[s] <= length && length < LENGTH_BASE[s] + (1 << LENGTH_EXTRA[s])
            })
            .expect("length out of range");
        self.put(1, 1);
        let code = self.length_codes[symbol];
        self.put_code(code);
        self.put(length - LENGTH_BASE[symbol], LENGTH_EXTRA[symbol]);
    }

    /// Append a match of `length` (2..=518) bytes from `distance` back
    pub fn copy(&mut self, length: u32, distance: u32) -> &mut Self {
        assert!((2..=MAX_MATCH_LENGTH).contains(&length));
        self.length(length);

        let low_bits = if length == 2 { 2 } else { self.dict_bits };
        let d = distance - 1;
        let code = self.distance_codes[(d >> low_bits) as usize];
        self.put_code(code);
        self.put(d & ((1 << low_bits) - 1), low_bits);
        self
    }

    /// End the stream and pad to a byte boundary
    pub fn finish(&mut self) -> Vec<u8> {
        self.length(519);
        self.truncated()
    }

    /// The bytes written so far, without an end-of-stream code
    pub fn truncated(&mut self) -> Vec<u8> {
        let mut out = self.out.clone();
        if self.filled > 0 {
            out.push(self.acc as u8);
        }
        out
    }
}

/// Largest distance a match of `length` may use with `dict_bits`
pub fn max_distance(length: u32, dict_bits: u32) -> u32 {
    if length == 2 {
        256
    } else {
        64 << dict_bits
    }
}

/// Apply a match to an expected-output buffer
pub fn apply_copy(out: &mut Vec<u8>, length: u32, distance: u32) {
    for _ in 0..length {
        out.push(out[out.len() - distance as usize]);
    }
}

/// Deterministic text-like payload
pub fn sample_text(size: usize) -> Vec<u8> {
    let base = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ";
    base.iter().copied().cycle().take(size).collect()
}

/// Literal-only stream for `data`
pub fn encode_literals(data: &[u8]) -> Vec<u8> {
    StreamBuilder::binary(6).literals(data).finish()
}

/// A multi-window stream mixing literals and matches, with its plaintext
pub fn mixed_fixture() -> (Vec<u8>, Vec<u8>) {
    let mut builder = StreamBuilder::binary(5);
    let mut plain = Vec::new();

    let text = sample_text(300);
    builder.literals(&text);
    plain.extend_from_slice(&text);

    for round in 0..40u32 {
        let length = 2 + (round * 37) % (MAX_MATCH_LENGTH - 1);
        let distance = 1 + (round * 101) % max_distance(length, 5).min(plain.len() as u32);
        builder.copy(length, distance);
        apply_copy(&mut plain, length, distance);

        let byte = (round * 7 + 3) as u8;
        builder.literal(byte);
        plain.push(byte);
    }

    (builder.finish(), plain)
}

/// Writer that short-writes on its `fail_on`-th call and counts calls
#[derive(Debug)]
pub struct ShortWriteSink {
    pub writes: usize,
    pub fail_on: usize,
    pub data: Vec<u8>,
}

impl ShortWriteSink {
    pub fn new(fail_on: usize) -> Self {
        Self {
            writes: 0,
            fail_on,
            data: Vec::new(),
        }
    }
}

impl Write for ShortWriteSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        let n = if self.writes == self.fail_on {
            buf.len() / 2
        } else {
            buf.len()
        };
        self.data.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reader that yields `good` bytes and then fails
pub struct FailingReader<'a> {
    pub good: &'a [u8],
}

impl Read for FailingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.good.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "source failed"));
        }
        let n = buf.len().min(self.good.len());
        buf[..n].copy_from_slice(&self.good[..n]);
        self.good = &self.good[n..];
        Ok(n)
    }
}
