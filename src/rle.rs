//! Implements run length encoding. The encoded stream is a sequence of
//! (count, byte) pairs. Runs that are longer than 255 bytes are split into
//! several pairs.

use crate::{Decoder, Encoder, Error, Result};

/// The longest run that a single pair can describe.
pub const MAX_RUN: usize = 255;

/// Iterates over the maximal runs of identical bytes and returns
/// (byte, run length) pairs.
pub struct RLEIterator<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> RLEIterator<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }
}

impl<'a> Iterator for RLEIterator<'a> {
    type Item = (u8, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let val = *self.input.get(self.pos)?;
        let len = self.input[self.pos..]
            .iter()
            .take_while(|b| **b == val)
            .count();
        self.pos += len;
        Some((val, len))
    }
}

// A helper function for writing an RLE chunk into a stream.
fn write_rle(mut len: usize, val: u8, stream: &mut Vec<u8>) -> usize {
    let mut wrote = 0;
    while len > MAX_RUN {
        stream.push(MAX_RUN as u8);
        stream.push(val);
        len -= MAX_RUN;
        wrote += 2;
    }
    if len > 0 {
        stream.push(len as u8);
        stream.push(val);
        wrote += 2;
    }
    wrote
}

pub struct RleEncoder<'a> {
    /// The uncompressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
}

impl<'a> Encoder<'a> for RleEncoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        RleEncoder { input, output }
    }

    fn encode(&mut self) -> Result<usize> {
        let mut wrote = 0;
        for (val, len) in RLEIterator::new(self.input) {
            wrote += write_rle(len, val, self.output);
        }
        log::debug!("RLE: {} bytes into {} bytes", self.input.len(), wrote);
        Ok(wrote)
    }
}

pub struct RleDecoder<'a> {
    /// The compressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
}

impl<'a> Decoder<'a> for RleDecoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        RleDecoder { input, output }
    }

    fn decode(&mut self) -> Result<(usize, usize)> {
        if self.input.len() % 2 != 0 {
            return Err(Error::MalformedStream("odd number of RLE bytes"));
        }
        let mut wrote = 0;
        for pair in self.input.chunks_exact(2) {
            let (rl, val) = (pair[0] as usize, pair[1]);
            self.output.extend(std::iter::repeat(val).take(rl));
            wrote += rl;
        }
        Ok((self.input.len(), wrote))
    }
}

/// Compress 'input' into a new buffer.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    RleEncoder::new(input, &mut output).encode()?;
    Ok(output)
}

/// Decompress 'input' into a new buffer.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    RleDecoder::new(input, &mut output).decode()?;
    Ok(output)
}
