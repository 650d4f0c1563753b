//! The table of the available compression algorithms. Each entry binds a name
//! to its encoder, decoder and the extension of the files that it writes.

use crate::coding::huffman::{HuffmanDecoder, HuffmanEncoder};
use crate::rle::{RleDecoder, RleEncoder};
use crate::{Decoder, Encoder, Error, Result};

/// Encodes 'input' into 'output' and returns the number of bytes written.
pub type EncodeHandlerTy = fn(input: &[u8], output: &mut Vec<u8>) -> Result<usize>;
/// Decodes 'input' into 'output' and returns the number of bytes read and
/// written.
pub type DecodeHandlerTy =
    fn(input: &[u8], output: &mut Vec<u8>) -> Result<(usize, usize)>;

pub struct Algorithm {
    pub name: &'static str,
    /// The extension of compressed files, including the dot.
    pub extension: &'static str,
    pub encode: EncodeHandlerTy,
    pub decode: DecodeHandlerTy,
}

fn huffman_encode(input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
    HuffmanEncoder::new(input, output).encode()
}

fn huffman_decode(input: &[u8], output: &mut Vec<u8>) -> Result<(usize, usize)> {
    HuffmanDecoder::new(input, output).decode()
}

fn rle_encode(input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
    RleEncoder::new(input, output).encode()
}

fn rle_decode(input: &[u8], output: &mut Vec<u8>) -> Result<(usize, usize)> {
    RleDecoder::new(input, output).decode()
}

pub static ALGORITHMS: [Algorithm; 2] = [
    Algorithm {
        name: "huffman",
        extension: ".huff",
        encode: huffman_encode,
        decode: huffman_decode,
    },
    Algorithm {
        name: "rle",
        extension: ".rle",
        encode: rle_encode,
        decode: rle_decode,
    },
];

/// Returns the names of all of the registered algorithms.
pub fn names() -> impl Iterator<Item = &'static str> {
    ALGORITHMS.iter().map(|a| a.name)
}

/// Find the algorithm called 'name'.
pub fn select(name: &str) -> Result<&'static Algorithm> {
    ALGORITHMS
        .iter()
        .find(|a| a.name == name)
        .ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))
}
