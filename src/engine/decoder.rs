//! Bit reading, Huffman decoding, and the main decode loop

use super::state::{State, Stop};
use super::tables::{code_tables, Huffman, LENGTH_BASE, LENGTH_EXTRA};
use crate::common::{
    CompressionMode, DictionarySize, END_OF_STREAM_LENGTH, MAX_CODE_BITS, MAX_WINDOW_SIZE,
};
use crate::error::Status;
use crate::input::Pull;
use crate::output::Push;

impl<I: Pull + ?Sized, O: Push + ?Sized> State<'_, I, O> {
    /// Take `need` bits (0..=8) from the stream, least significant first
    pub fn bits(&mut self, need: u32) -> Result<u32, Stop> {
        let mut value = self.bit_buff;
        while self.bit_count < need {
            value |= (self.next_byte()? as u32) << self.bit_count;
            self.bit_count += 8;
        }

        self.bit_buff = value >> need;
        self.bit_count -= need;
        Ok(value & ((1 << need) - 1))
    }

    /// Decode one symbol.
    ///
    /// Codes are stored with their bits inverted, most significant bit first,
    /// so each stream bit is flipped before it is appended to the code.
    pub fn decode(&mut self, huffman: &Huffman) -> Result<usize, Stop> {
        let mut bit_buff = self.bit_buff;
        let mut left = self.bit_count;
        let mut code = 0i32;
        let mut first = 0i32;
        let mut index = 0i32;
        let mut len = 1u32;

        loop {
            while left > 0 {
                left -= 1;
                code |= ((bit_buff & 1) ^ 1) as i32;
                bit_buff >>= 1;

                let count = huffman.count[len as usize] as i32;
                if code < first + count {
                    self.bit_buff = bit_buff;
                    self.bit_count = ((self.bit_count as i32 - len as i32) & 7) as u32;
                    return Ok(huffman.symbol[(index + code - first) as usize] as usize);
                }

                index += count;
                first = (first + count) << 1;
                code <<= 1;
                len += 1;
            }

            left = (MAX_CODE_BITS as u32 + 1) - len;
            if left == 0 {
                return Err(Stop::NoCode);
            }

            bit_buff = self.next_byte()? as u32;
            left = left.min(8);
        }
    }

    /// Decode the whole stream. Returns the engine status code.
    pub fn decompress(&mut self) -> Result<i32, Stop> {
        let tables = code_tables();

        let Ok(mode) = CompressionMode::from_u8(self.bits(8)? as u8) else {
            return Ok(Status::MalformedLiteralFlag.code());
        };
        let Ok(dict_size) = DictionarySize::from_bits(self.bits(8)? as u8) else {
            return Ok(Status::InvalidDictionarySize.code());
        };
        log::trace!("stream header: {:?}, {:?}", mode, dict_size);

        loop {
            if self.bits(1)? == 0 {
                let literal = match mode {
                    CompressionMode::ASCII => self.decode(&tables.literal)? as u8,
                    CompressionMode::Binary => self.bits(8)? as u8,
                };

                self.window[self.next] = literal;
                self.next += 1;
                if self.next == MAX_WINDOW_SIZE && !self.flush_window()? {
                    return Ok(Status::OutputSpaceExhausted.code());
                }
                continue;
            }

            let symbol = self.decode(&tables.length)?;
            let length = LENGTH_BASE[symbol] as u32 + self.bits(LENGTH_EXTRA[symbol] as u32)?;
            if length == END_OF_STREAM_LENGTH {
                return Ok(Status::Ok.code());
            }

            // Two-byte matches always carry two low distance bits
            let low_bits = if length == 2 {
                2
            } else {
                dict_size.bits() as u32
            };
            let mut distance = (self.decode(&tables.distance)? as usize) << low_bits;
            distance += self.bits(low_bits)? as usize;
            distance += 1;

            if self.first && distance > self.next {
                return Ok(Status::DistanceOutOfRange.code());
            }

            if !self.copy_match(distance, length as usize)? {
                return Ok(Status::OutputSpaceExhausted.code());
            }
        }
    }

    /// Copy `length` bytes from `distance` back, wrapping around the window
    /// and flushing it whenever it fills. Returns `false` if a flush was
    /// refused.
    fn copy_match(&mut self, distance: usize, mut length: usize) -> std::io::Result<bool> {
        while length > 0 {
            let to = self.next;
            let (from, limit) = if self.next < distance {
                (to + MAX_WINDOW_SIZE - distance, distance)
            } else {
                (to - distance, MAX_WINDOW_SIZE)
            };

            let copy = (limit - self.next).min(length);
            // Source and target may overlap; copy forward one byte at a time
            for i in 0..copy {
                self.window[to + i] = self.window[from + i];
            }
            length -= copy;
            self.next += copy;

            if self.next == MAX_WINDOW_SIZE && !self.flush_window()? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
