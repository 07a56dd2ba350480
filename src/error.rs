//! Error handling for blast operations
//!
//! The engine reports its outcome through a single integer status code. This
//! module translates those codes into [`Status`] values and, for failed calls,
//! into [`BlastError`]. Adapter I/O failures travel separately as
//! [`BlastError::Io`] so they are never confused with a clean end of input.

use thiserror::Error;

/// Outcome reported by the engine for one decompression call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Code `0`: the end-of-stream code was decoded and all output delivered
    Ok,
    /// Code `1`: the output sink refused a decoded chunk
    OutputSpaceExhausted,
    /// Code `2`: the input ran dry before the end-of-stream code
    InputExhausted,
    /// Code `-1`: literal flag byte is neither 0 nor 1
    MalformedLiteralFlag,
    /// Code `-2`: dictionary size byte is outside 4..=6
    InvalidDictionarySize,
    /// Code `-3`: a back-reference points before the start of the output
    DistanceOutOfRange,
    /// Any code outside the engine's documented set
    Unknown(i32),
}

impl Status {
    /// Classify a raw engine status code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Status::Ok,
            1 => Status::OutputSpaceExhausted,
            2 => Status::InputExhausted,
            -1 => Status::MalformedLiteralFlag,
            -2 => Status::InvalidDictionarySize,
            -3 => Status::DistanceOutOfRange,
            other => Status::Unknown(other),
        }
    }

    /// The raw engine code for this status
    pub fn code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::OutputSpaceExhausted => 1,
            Status::InputExhausted => 2,
            Status::MalformedLiteralFlag => -1,
            Status::InvalidDictionarySize => -2,
            Status::DistanceOutOfRange => -3,
            Status::Unknown(code) => code,
        }
    }

    /// Positive codes mean the input or output side ran out
    pub fn is_resource_exhaustion(self) -> bool {
        self.code() > 0
    }

    /// Negative codes mean the compressed data itself is bad
    pub fn is_malformed_input(self) -> bool {
        self.code() < 0
    }

    /// Turn the status into the result of a call
    pub fn into_result(self) -> Result<()> {
        match self {
            Status::Ok => Ok(()),
            Status::OutputSpaceExhausted => Err(BlastError::OutputSpaceExhausted),
            Status::InputExhausted => Err(BlastError::InputExhausted),
            Status::MalformedLiteralFlag => Err(BlastError::MalformedLiteralFlag),
            Status::InvalidDictionarySize => Err(BlastError::InvalidDictionarySize),
            Status::DistanceOutOfRange => Err(BlastError::DistanceOutOfRange),
            Status::Unknown(code) => Err(BlastError::UnknownEngineStatus(code)),
        }
    }
}

impl From<Status> for i32 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

/// Map a raw engine status code onto the result of a call
pub fn map_status(code: i32) -> Result<()> {
    Status::from_code(code).into_result()
}

/// Error type for blast operations
#[derive(Debug, Error)]
pub enum BlastError {
    /// The sink stopped accepting data before all output was delivered
    #[error("Output space exhausted: the sink refused decoded data")]
    OutputSpaceExhausted,

    /// The source ended before the end-of-stream code
    #[error("Input exhausted before the end of the compressed stream")]
    InputExhausted,

    /// Literal flag in the header is neither 0 nor 1
    #[error("Invalid literal flag (expected 0 or 1)")]
    MalformedLiteralFlag,

    /// Dictionary size in the header is not 4, 5, or 6
    #[error("Invalid dictionary size (expected 4, 5, or 6 bits)")]
    InvalidDictionarySize,

    /// Back-reference distance reaches before the first output byte
    #[error("Distance is too far back")]
    DistanceOutOfRange,

    /// The engine returned a code outside its documented set
    #[error("Unknown engine status code: {0}")]
    UnknownEngineStatus(i32),

    /// A stream chunk size of zero was requested
    #[error("Invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    /// I/O error raised by the source or sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BlastError {
    /// The engine status behind this error, if it came from the engine
    pub fn status(&self) -> Option<Status> {
        match self {
            BlastError::OutputSpaceExhausted => Some(Status::OutputSpaceExhausted),
            BlastError::InputExhausted => Some(Status::InputExhausted),
            BlastError::MalformedLiteralFlag => Some(Status::MalformedLiteralFlag),
            BlastError::InvalidDictionarySize => Some(Status::InvalidDictionarySize),
            BlastError::DistanceOutOfRange => Some(Status::DistanceOutOfRange),
            BlastError::UnknownEngineStatus(code) => Some(Status::Unknown(*code)),
            BlastError::InvalidChunkSize(_) | BlastError::Io(_) => None,
        }
    }
}

/// Result type alias for blast operations
pub type Result<T> = std::result::Result<T, BlastError>;

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINED: [i32; 6] = [0, 1, 2, -1, -2, -3];

    #[test]
    fn test_status_codes_round_trip() {
        for code in DEFINED {
            let status = Status::from_code(code);
            assert_eq!(Status::from_code(status.code()), status);
            assert_eq!(status.code(), code);
            assert!(!matches!(status, Status::Unknown(_)));
        }
    }

    #[test]
    fn test_unknown_codes_are_never_ok() {
        for code in [3, 7, -4, -9, i32::MIN, i32::MAX] {
            assert_eq!(Status::from_code(code), Status::Unknown(code));
            match map_status(code) {
                Err(BlastError::UnknownEngineStatus(c)) => assert_eq!(c, code),
                other => panic!("code {code} mapped to {other:?}"),
            }
        }
    }

    #[test]
    fn test_map_status() {
        assert!(map_status(0).is_ok());
        assert!(matches!(map_status(1), Err(BlastError::OutputSpaceExhausted)));
        assert!(matches!(map_status(2), Err(BlastError::InputExhausted)));
        assert!(matches!(map_status(-1), Err(BlastError::MalformedLiteralFlag)));
        assert!(matches!(map_status(-2), Err(BlastError::InvalidDictionarySize)));
        assert!(matches!(map_status(-3), Err(BlastError::DistanceOutOfRange)));
    }

    #[test]
    fn test_error_status_matches_code() {
        for code in DEFINED.into_iter().filter(|&c| c != 0) {
            let err = map_status(code).unwrap_err();
            assert_eq!(err.status().map(Status::code), Some(code));
        }
        let io = BlastError::from(std::io::Error::other("boom"));
        assert_eq!(io.status(), None);
    }

    #[test]
    fn test_sign_classification() {
        assert!(Status::OutputSpaceExhausted.is_resource_exhaustion());
        assert!(Status::InputExhausted.is_resource_exhaustion());
        assert!(Status::DistanceOutOfRange.is_malformed_input());
        assert!(!Status::Ok.is_resource_exhaustion());
        assert!(!Status::Ok.is_malformed_input());
    }
}
