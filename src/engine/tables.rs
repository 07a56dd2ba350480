//! Static code tables and their canonical Huffman decoders
//!
//! The format fixes three prefix codes. Their code lengths are stored here in
//! run-length form: each byte holds `(repeat - 1) << 4 | length` for a run of
//! consecutive symbols. The decoders built from them are constructed once per
//! process and shared read-only by every call.

use crate::common::MAX_CODE_BITS;
use std::sync::OnceLock;

/// Code lengths for the 256 coded literals (ASCII mode)
const LITERAL_LENGTHS: [u8; 98] = [
    11, 124, 8, 7, 28, 7, 188, 13, 76, 4, 10, 8, 12, 10, 12, 10, 8, 23, 8, 9, 7, 6, 7, 8, 7, 6, 55,
    8, 23, 24, 12, 11, 7, 9, 11, 12, 6, 7, 22, 5, 7, 24, 6, 11, 9, 6, 7, 22, 7, 11, 38, 7, 9, 8,
    25, 11, 8, 11, 9, 12, 8, 12, 5, 38, 5, 38, 5, 11, 7, 5, 6, 21, 6, 10, 53, 8, 7, 24, 10, 27,
    44, 253, 253, 253, 252, 252, 252, 13, 12, 45, 12, 45, 12, 61, 12, 45, 44, 173,
];

/// Code lengths for the 16 match length symbols
const LENGTH_LENGTHS: [u8; 6] = [2, 35, 36, 53, 38, 23];

/// Code lengths for the 64 distance high-bit symbols
const DISTANCE_LENGTHS: [u8; 7] = [2, 20, 53, 230, 247, 151, 248];

/// Base match length for each length symbol
pub const LENGTH_BASE: [u16; 16] = [3, 2, 4, 5, 6, 7, 8, 9, 10, 12, 16, 24, 40, 72, 136, 264];

/// Extra bits following each length symbol
pub const LENGTH_EXTRA: [u8; 16] = [0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];

/// Canonical decoder: code counts per length plus symbols in code order
#[derive(Debug)]
pub struct Huffman {
    /// Number of codes of each length, index 0 unused
    pub count: [u16; MAX_CODE_BITS + 1],
    /// Symbols ordered by code
    pub symbol: Vec<u16>,
}

impl Huffman {
    /// Build a decoder from run-length encoded code lengths
    pub fn from_compact(compact: &[u8]) -> Self {
        let mut lengths = Vec::with_capacity(256);
        for &run in compact {
            let repeat = (run >> 4) as usize + 1;
            let length = run & 0x0F;
            lengths.extend(std::iter::repeat(length).take(repeat));
        }

        let mut count = [0u16; MAX_CODE_BITS + 1];
        for &length in &lengths {
            count[length as usize] += 1;
        }

        // Offsets of the first symbol of each length in the symbol table
        let mut offsets = [0usize; MAX_CODE_BITS + 1];
        for len in 1..MAX_CODE_BITS {
            offsets[len + 1] = offsets[len] + count[len] as usize;
        }

        let mut symbol = vec![0u16; lengths.len()];
        for (sym, &length) in lengths.iter().enumerate() {
            if length != 0 {
                symbol[offsets[length as usize]] = sym as u16;
                offsets[length as usize] += 1;
            }
        }

        Self { count, symbol }
    }

    /// Number of symbols with a code
    pub fn len(&self) -> usize {
        self.count[1..].iter().map(|&c| c as usize).sum()
    }

    /// Whether no symbol has a code
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Codes left unassigned at the longest length; zero for a complete code
    pub fn unused_codes(&self) -> i32 {
        let mut left = 1i32;
        for len in 1..=MAX_CODE_BITS {
            left = (left << 1) - self.count[len] as i32;
        }
        left
    }
}

/// The three decoders used by every call
#[derive(Debug)]
pub struct CodeTables {
    /// Coded literals
    pub literal: Huffman,
    /// Match lengths
    pub length: Huffman,
    /// Distance high bits
    pub distance: Huffman,
}

static TABLES: OnceLock<CodeTables> = OnceLock::new();

/// Process-wide decode tables, built on first use
pub fn code_tables() -> &'static CodeTables {
    TABLES.get_or_init(|| {
        let tables = CodeTables {
            literal: Huffman::from_compact(&LITERAL_LENGTHS),
            length: Huffman::from_compact(&LENGTH_LENGTHS),
            distance: Huffman::from_compact(&DISTANCE_LENGTHS),
        };
        log::debug!(
            "built implode decode tables, unused codes: literal {}, length {}, distance {}",
            tables.literal.unused_codes(),
            tables.length.unused_codes(),
            tables.distance.unused_codes()
        );
        tables
    })
}
