//! Error types for the LAME binding
//!
//! Every failure is reported synchronously to the caller. None of them is
//! fatal to the encoder instance: callers may reconfigure and try again.

use std::fmt;
use thiserror::Error;

/// Main error type for the encoder adapter
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Handle acquisition or parameter finalization failed
    #[error("Initialization error: {0}")]
    Init(#[from] InitError),

    /// A setter or reporter registration was rejected by the library
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input data validation errors
    #[error("Input data error: {0}")]
    InputData(#[from] InputDataError),

    /// Operation not legal in the current stream state
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// The library reported a failure while producing output
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

/// Initialization errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitError {
    /// `lame_init` returned a null handle
    #[error("Failed to initialize LAME encoder")]
    HandleUnavailable,

    /// `lame_init_params` returned a negative status
    #[error("Error initializing the encoder (status {code})")]
    ParamsRejected { code: i32 },
}

/// Parameters forwarded to the library by the setters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Channels,
    Bitrate,
    InSampleRate,
    OutSampleRate,
    Quality,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::Channels => "channels",
            Parameter::Bitrate => "bit rate",
            Parameter::InSampleRate => "input sample rate",
            Parameter::OutSampleRate => "output sample rate",
            Parameter::Quality => "quality",
        };
        f.write_str(name)
    }
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The library refused a parameter value
    #[error("Unable to set the {parameter} to {value} (status {code})")]
    Rejected {
        parameter: Parameter,
        value: i32,
        code: i32,
    },

    /// One of the report callbacks could not be installed
    #[error("Unable to redirect output to silent function (status {code})")]
    Reporter { code: i32 },
}

/// Input data validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputDataError {
    /// Empty input data
    #[error("Input data must be a non-empty 1D array of 16-bit PCM samples")]
    EmptyInput,

    /// Sample count is not a multiple of the channel count
    #[error("The input data must be interleaved 16-bit PCM: {len} samples do not split into {channels} channels")]
    NotInterleaved { len: usize, channels: usize },

    /// More samples per channel than the library can take in one call
    #[error("Too many samples for a single call: {len}")]
    TooLong { len: usize },

    /// The host handed over a strided buffer
    #[error("Input data must be contiguous")]
    NotContiguous,
}

/// Stream state errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `flush` called while no stream is open
    #[error("Not currently encoding")]
    NotEncoding,
}

/// Encoding process errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// `lame_encode_buffer*` returned a negative byte count
    #[error("LAME encoding error (status {code})")]
    Library { code: i32 },

    /// `lame_encode_flush` returned a negative byte count
    #[error("LAME flush error (status {code})")]
    Flush { code: i32 },
}

pub type Result<T> = std::result::Result<T, EncoderError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_parameter() {
        let err = ConfigError::Rejected {
            parameter: Parameter::InSampleRate,
            value: -1,
            code: -1,
        };
        assert_eq!(
            err.to_string(),
            "Unable to set the input sample rate to -1 (status -1)"
        );
    }

    #[test]
    fn test_category_wrapping() {
        let err: EncoderError = StateError::NotEncoding.into();
        assert!(matches!(err, EncoderError::State(StateError::NotEncoding)));
        assert_eq!(err.to_string(), "State error: Not currently encoding");

        let err: EncoderError = InputDataError::NotInterleaved { len: 3, channels: 2 }.into();
        assert!(err.to_string().starts_with("Input data error: "));
    }
}
