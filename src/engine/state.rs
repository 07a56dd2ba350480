//! Per-call decoder state
//!
//! Everything a call mutates lives here, on the caller's stack: the bit
//! accumulator, the read position inside the current input run, and the
//! sliding window. Nothing is shared between calls except the read-only code
//! tables.

use crate::common::MAX_WINDOW_SIZE;
use crate::input::Pull;
use crate::output::Push;
use std::io;

/// Why decoding stopped before returning a status of its own
#[derive(Debug)]
pub enum Stop {
    /// The source returned no bytes while the decoder needed more
    InputExhausted,
    /// A bit pattern matched no code (only possible with incomplete tables)
    NoCode,
    /// The source or sink failed
    Io(io::Error),
}

impl From<io::Error> for Stop {
    fn from(err: io::Error) -> Self {
        Stop::Io(err)
    }
}

/// Decoder state for one call
pub struct State<'a, I: ?Sized, O: ?Sized> {
    /// Compressed input capability
    pub input: &'a mut I,
    /// Decoded output capability
    pub output: &'a mut O,
    /// Read position inside the current input run
    pub in_pos: usize,
    /// Bytes of the current input run not yet consumed
    pub in_left: usize,
    /// Bit accumulator, least significant bit first
    pub bit_buff: u32,
    /// Number of valid bits in the accumulator
    pub bit_count: u32,
    /// Next write position in the window
    pub next: usize,
    /// Still on the first window, so distances must not reach before 0
    pub first: bool,
    /// Sliding window of decoded output
    pub window: [u8; MAX_WINDOW_SIZE],
}

impl<'a, I: Pull + ?Sized, O: Push + ?Sized> State<'a, I, O> {
    /// Fresh state over the given capabilities
    pub fn new(input: &'a mut I, output: &'a mut O) -> Self {
        Self {
            input,
            output,
            in_pos: 0,
            in_left: 0,
            bit_buff: 0,
            bit_count: 0,
            next: 0,
            first: true,
            window: [0; MAX_WINDOW_SIZE],
        }
    }

    /// Next input byte, pulling a new run when the current one is used up
    pub fn next_byte(&mut self) -> Result<u8, Stop> {
        if self.in_left == 0 {
            let pulled = self.input.pull()?;
            self.in_left = pulled.min(self.input.chunk().len());
            self.in_pos = 0;
            if self.in_left == 0 {
                return Err(Stop::InputExhausted);
            }
        }

        let byte = self.input.chunk()[self.in_pos];
        self.in_pos += 1;
        self.in_left -= 1;
        Ok(byte)
    }

    /// Hand the filled part of the window to the sink.
    ///
    /// Returns `false` when the sink refused it.
    pub fn flush_window(&mut self) -> io::Result<bool> {
        let accepted = self.output.push(&self.window[..self.next])?;
        self.next = 0;
        self.first = false;
        Ok(accepted)
    }
}

impl<I: ?Sized, O: ?Sized> std::fmt::Debug for State<'_, I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("in_pos", &self.in_pos)
            .field("in_left", &self.in_left)
            .field("bit_buff", &self.bit_buff)
            .field("bit_count", &self.bit_count)
            .field("next", &self.next)
            .field("first", &self.first)
            .finish_non_exhaustive()
    }
}
