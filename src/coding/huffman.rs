//! A static Huffman encoder and decoder.
//!
//! The encoded stream starts with a 16-bit header: the length of the
//! serialized code tree in bits (13 bits) and the number of zero padding bits
//! at the end of the stream (3 bits). The serialized tree follows, and then the
//! packed codes of the input symbols. The tree and the data are packed back to
//! back, so only the last byte of the stream is padded. An empty input is
//! encoded as an empty stream.

use crate::bitstream::{BitReader, BitWriter};
use crate::coding::hist::Histogram;
use crate::coding::tree::{CodeTable, Node, Tree};
use crate::{Decoder, Encoder, Error, Result};

/// The width of the tree length field.
pub const TREE_LEN_BITS: u32 = 13;
/// The width of the padding field.
pub const PADDING_BITS: u32 = 3;
/// The longest tree that the header can describe.
pub const MAX_TREE_BITS: usize = (1 << TREE_LEN_BITS) - 1;

pub struct HuffmanEncoder<'a> {
    /// The uncompressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
}

impl<'a> HuffmanEncoder<'a> {
    /// Write the code of every input symbol into 'writer'.
    fn encode_data(&self, code: &CodeTable, writer: &mut BitWriter) -> Result<()> {
        for sym in self.input {
            let Some(c) = code.get(*sym) else {
                return Err(Error::MalformedStream("symbol has no code"));
            };
            writer.write_bits(c.value, c.len)?;
        }
        Ok(())
    }

    fn encode_impl(&mut self) -> Result<usize> {
        if self.input.is_empty() {
            return Ok(0);
        }

        let hist = Histogram::from_data(self.input);
        let tree = Tree::from_histogram(&hist)?;
        let code = tree.construct_code();
        log::debug!(
            "Huffman: {} bytes, {} distinct symbols",
            self.input.len(),
            hist.distinct()
        );

        let mut tree_writer = BitWriter::new();
        tree.encode(&mut tree_writer)?;
        let tree_padding = tree_writer.flush();
        let tree_bits = tree_writer.bit_len() - tree_padding as usize;
        debug_assert!(tree_bits <= MAX_TREE_BITS);

        let mut data_writer = BitWriter::new();
        self.encode_data(&code, &mut data_writer)?;
        let data_padding = data_writer.flush();

        let total_padding = (tree_padding + data_padding) % 8;
        log::trace!(
            "Huffman: tree of {} bits, padding {}+{}",
            tree_bits,
            tree_padding,
            data_padding
        );

        let mut out = BitWriter::new();
        out.write_bits(tree_bits as u64, TREE_LEN_BITS)?;
        out.write_bits(total_padding as u64, PADDING_BITS)?;
        out.write_bytes(tree_writer.bytes(), tree_padding)?;
        out.write_bytes(data_writer.bytes(), data_padding)?;
        let padding = out.flush();
        debug_assert_eq!(padding, total_padding);

        let encoded = out.into_bytes();
        self.output.extend_from_slice(&encoded);
        Ok(encoded.len())
    }
}

impl<'a> Encoder<'a> for HuffmanEncoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        HuffmanEncoder { input, output }
    }

    fn encode(&mut self) -> Result<usize> {
        self.encode_impl()
    }
}

pub struct HuffmanDecoder<'a> {
    /// The compressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
}

impl<'a> HuffmanDecoder<'a> {
    /// Decode one symbol by walking from the root to a leaf. 'limit' is the
    /// number of bits that must be left unread.
    fn decode_symbol(
        root: &Node,
        reader: &mut BitReader,
        limit: usize,
    ) -> Result<u8> {
        let mut node = root;
        loop {
            if reader.bits_remaining() <= limit {
                return Err(Error::MalformedStream("code cut by the padding"));
            }
            let bit = reader.read_bit()?;

            // A tree that is a single leaf encodes each symbol as '0'.
            if let Node::Leaf { symbol, .. } = root {
                if bit != 0 {
                    return Err(Error::MalformedStream("unknown bit sequence"));
                }
                return Ok(*symbol);
            }

            node = node
                .child(bit)
                .ok_or(Error::MalformedStream("unknown bit sequence"))?;
            if let Node::Leaf { symbol, .. } = node {
                return Ok(*symbol);
            }
        }
    }

    /// Decode the packed symbols until only the padding is left.
    fn decode_data(
        tree: &Tree,
        reader: &mut BitReader,
        padding: usize,
    ) -> Result<Vec<u8>> {
        if reader.bits_remaining() < padding {
            return Err(Error::MalformedStream("padding exceeds the stream"));
        }

        let mut decoded = Vec::new();
        while reader.bits_remaining() > padding {
            decoded.push(Self::decode_symbol(tree.root(), reader, padding)?);
        }

        if reader.read_bits(padding as u32)? != 0 {
            return Err(Error::MalformedStream("non-zero padding"));
        }
        Ok(decoded)
    }

    fn decode_impl(&mut self) -> Result<(usize, usize)> {
        if self.input.is_empty() {
            return Ok((0, 0));
        }

        let mut reader = BitReader::new(self.input);
        let tree_bits = reader.read_bits(TREE_LEN_BITS)? as usize;
        let padding = reader.read_bits(PADDING_BITS)? as usize;

        if tree_bits > reader.bits_remaining() {
            return Err(Error::MalformedStream("tree exceeds the stream"));
        }

        let start = reader.position();
        let tree = Tree::decode(&mut reader)?;
        if reader.position() - start != tree_bits {
            return Err(Error::MalformedStream("tree length mismatch"));
        }

        let decoded = Self::decode_data(&tree, &mut reader, padding)?;
        log::debug!(
            "Huffman: decoded {} bytes from {} bytes",
            decoded.len(),
            self.input.len()
        );
        self.output.extend_from_slice(&decoded);
        Ok((self.input.len(), decoded.len()))
    }
}

impl<'a> Decoder<'a> for HuffmanDecoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>) -> Self {
        HuffmanDecoder { input, output }
    }

    fn decode(&mut self) -> Result<(usize, usize)> {
        self.decode_impl()
    }
}

/// Compress 'input' into a new buffer.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffmanEncoder::new(input, &mut output).encode()?;
    Ok(output)
}

/// Decompress 'input' into a new buffer.
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    HuffmanDecoder::new(input, &mut output).decode()?;
    Ok(output)
}

#[test]
fn test_header_layout() {
    // 'b' is the only symbol: the tree is [0, 1 'b', 1 'c'] (19 bits) and
    // each symbol is a single '0' bit.
    let encoded = encode(b"bb").unwrap();
    // 16 + 19 + 2 = 37 bits, so 3 bits of padding.
    assert_eq!(encoded.len(), 5);
    assert_eq!(encoded[0], 19 >> 5);
    assert_eq!(encoded[1], ((19 & 0x1f) << 3) | 3);
    assert_eq!(decode(&encoded).unwrap(), b"bb");
}
