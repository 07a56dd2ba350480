//! The decompression engine seam
//!
//! An [`Engine`] decodes one complete implode stream per call. It pulls input
//! through a [`Pull`] capability, pushes decoded output through a [`Push`]
//! capability, and reports the outcome as a raw status code (see
//! [`crate::error::Status`]) together with the number of unconsumed bytes in
//! the last input run it was given.
//!
//! [`Blast`] is the bundled engine. It holds no state of its own: all
//! per-call state lives on the stack of the call, and the decode tables are
//! built once per process and only read afterwards.

mod decoder;
mod state;
mod tables;

pub use tables::{code_tables, CodeTables, Huffman};

use crate::error::Status;
use crate::input::Pull;
use crate::output::Push;
use state::{State, Stop};
use std::io;

/// Status code reported when the decode tables hit an unassigned code
pub const STATUS_NO_CODE: i32 = -9;

/// What the engine reports when a call finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Raw status code
    pub status: i32,
    /// Bytes of the last input run that were not consumed
    pub remainder: usize,
}

/// A decompression routine driven by pull/push capabilities
///
/// Implementations must be usable from several threads at once, each call
/// with its own capabilities.
pub trait Engine: Send + Sync {
    /// Decode one stream. `Err` means a capability failed and the call was
    /// abandoned; every other outcome is reported through the status code.
    fn blast<I, O>(&self, input: &mut I, output: &mut O) -> io::Result<Outcome>
    where
        I: Pull + ?Sized,
        O: Push + ?Sized;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn blast<I, O>(&self, input: &mut I, output: &mut O) -> io::Result<Outcome>
    where
        I: Pull + ?Sized,
        O: Push + ?Sized,
    {
        (**self).blast(input, output)
    }
}

/// The PKWare DCL implode decompressor
#[derive(Debug, Clone, Copy, Default)]
pub struct Blast;

impl Blast {
    /// Create the engine handle
    pub fn new() -> Self {
        Blast
    }
}

impl Engine for Blast {
    fn blast<I, O>(&self, input: &mut I, output: &mut O) -> io::Result<Outcome>
    where
        I: Pull + ?Sized,
        O: Push + ?Sized,
    {
        let mut state = State::new(input, output);

        let mut status = match state.decompress() {
            Ok(status) => status,
            Err(Stop::InputExhausted) => Status::InputExhausted.code(),
            Err(Stop::NoCode) => STATUS_NO_CODE,
            Err(Stop::Io(err)) => return Err(err),
        };

        // Deliver what is left in the window unless the sink already refused
        // data. A refusal here only overrides success.
        if status != Status::OutputSpaceExhausted.code()
            && state.next > 0
            && !state.flush_window()?
            && status == Status::Ok.code()
        {
            status = Status::OutputSpaceExhausted.code();
        }

        Ok(Outcome {
            status,
            remainder: state.in_left,
        })
    }
}
