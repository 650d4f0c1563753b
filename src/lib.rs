pub mod bitstream;
pub mod coding;
pub mod error;
pub mod registry;
pub mod rle;

pub use error::{Error, Result};

/// A trait that defines the interface for encoding buffers.
pub trait Encoder<'a> {
    /// Creates a new Encoder that reads from 'input' and writes into 'output'.
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self;

    /// Encode the whole input buffer and return the number of bytes that were
    /// written into the output stream.
    fn encode(&mut self) -> Result<usize>;
}

/// A trait that defines the interface for decoding buffers.
pub trait Decoder<'a> {
    /// Creates a new Decoder that reads from 'input' and writes into 'output'.
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self;

    /// Try to decode the buffer 'input', and return the number of input bytes
    /// that were consumed followed by the number of bytes written. Nothing
    /// that was decoded before a failure is left in the output.
    fn decode(&mut self) -> Result<(usize, usize)>;
}
