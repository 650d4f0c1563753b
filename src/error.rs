//! The error kinds reported by the codecs and the command line driver.

use thiserror::Error;

/// Errors that can be returned by the bit streams, the codecs and the driver.
#[derive(Error, Debug)]
pub enum Error {
    /// The writer was asked to write a value that does not fit in 'width'
    /// bits.
    #[error("value {value:#x} does not fit in {width} bits")]
    InvalidWidth { value: u64, width: u32 },

    /// The reader ran out of bits. The read position is left unchanged.
    #[error("end of buffer: requested {requested} bits, {remaining} remaining")]
    EndOfBuffer { requested: usize, remaining: usize },

    /// The encoded stream is inconsistent with any stream that the encoder
    /// could have produced.
    #[error("malformed stream: {0}")]
    MalformedStream(&'static str),

    /// A code tree can't be built from an empty frequency table.
    #[error("empty input")]
    EmptyInput,

    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
