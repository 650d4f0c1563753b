//! The Huffman code tree. Leaves hold symbols and the path from the root to a
//! leaf is the code of the symbol: taking the left child appends a zero bit and
//! taking the right child appends a one bit.
//!
//! The tree is serialized in pre-order. A leaf is written as a '1' bit followed
//! by the 8-bit symbol, and an internal node is written as a '0' bit followed by
//! the left and then the right subtrees.

use std::collections::HashMap;

use crate::bitstream::{BitReader, BitWriter};
use crate::coding::hist::{Histogram, ALPHABET};
use crate::{Error, Result};

/// The deepest tree that the decoder accepts. A tree over the byte alphabet
/// is never deeper than 255 levels.
pub const MAX_TREE_DEPTH: usize = ALPHABET;

/// The longest code that fits in 'Code::value'. Reaching this length takes an
/// input with a Fibonacci-like histogram of more than 10^13 bytes.
pub const MAX_CODE_LEN: u32 = 64;

/// A prefix code. The first bit of the path is the most significant bit of
/// 'value'. Codes of different lengths may share a value, so lookups must use
/// the whole pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    pub value: u64,
    pub len: u32,
}

impl Code {
    /// Returns true if 'self' is a proper prefix of 'other'.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len < other.len
            && other.value.checked_shr(other.len - self.len).unwrap_or(0)
                == self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: u8, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Create a parent node for 'left' and 'right'.
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Returns the left child for bit 0 and the right child for bit 1.
    pub fn child(&self, bit: u8) -> Option<&Node> {
        match (self, bit) {
            (Node::Internal { left, .. }, 0) => Some(left),
            (Node::Internal { right, .. }, 1) => Some(right),
            _ => None,
        }
    }

    /// Serialize the subtree into 'writer' in pre-order.
    pub fn encode(&self, writer: &mut BitWriter) -> Result<()> {
        match self {
            Node::Leaf { symbol, .. } => {
                writer.write_bits(1, 1)?;
                writer.write_bits(*symbol as u64, 8)
            }
            Node::Internal { left, right, .. } => {
                writer.write_bits(0, 1)?;
                left.encode(writer)?;
                right.encode(writer)
            }
        }
    }

    /// Load a subtree that starts at the reader's cursor. The cursor is left
    /// right after the last bit of the subtree. Decoded nodes have no weight.
    pub fn decode(reader: &mut BitReader) -> Result<Node> {
        Self::decode_at_depth(reader, 0)
    }

    fn decode_at_depth(reader: &mut BitReader, depth: usize) -> Result<Node> {
        if depth >= MAX_TREE_DEPTH {
            return Err(Error::MalformedStream("code tree is too deep"));
        }
        if reader.read_bit()? == 1 {
            let symbol = reader.read_bits(8)? as u8;
            return Ok(Node::leaf(symbol, 0));
        }
        let left = Self::decode_at_depth(reader, depth + 1)?;
        let right = Self::decode_at_depth(reader, depth + 1)?;
        Ok(Node::Internal {
            weight: 0,
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Maps each symbol to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET],
}

impl CodeTable {
    pub fn get(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// Returns the (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(sym, code)| code.map(|c| (sym as u8, c)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Maps a (value, length) pair back to its symbol.
pub type InverseCodeTable = HashMap<Code, u8>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Build the Huffman tree for the histogram. The two lightest nodes are
    /// merged until a single node is left. Ties are broken by list order: the
    /// leaves start in symbol order and merged nodes are placed after nodes of
    /// equal weight.
    pub fn from_histogram(hist: &Histogram) -> Result<Tree> {
        let symbols: Vec<(u8, u64)> = hist.symbols().collect();
        match symbols[..] {
            [] => return Err(Error::EmptyInput),
            [(symbol, count)] => {
                // A lone leaf would get an empty code. Give it a sibling that
                // is never emitted, so that the symbol is encoded as '0'.
                let sibling = Node::leaf(symbol.wrapping_add(1), 0);
                let root = Node::merge(Node::leaf(symbol, count), sibling);
                return Ok(Tree::new(root));
            }
            _ => {}
        }

        let mut nodes: Vec<Node> = symbols
            .into_iter()
            .map(|(sym, cnt)| Node::leaf(sym, cnt))
            .collect();
        nodes.sort_by_key(Node::weight);
        while nodes.len() > 1 {
            let left = nodes.remove(0);
            let right = nodes.remove(0);
            let merged = Node::merge(left, right);
            let weight = merged.weight();
            let pos = nodes.partition_point(|n| n.weight() <= weight);
            nodes.insert(pos, merged);
        }

        let root = nodes.remove(0);
        Ok(Tree::new(root))
    }

    /// Serialize the tree into 'writer'.
    pub fn encode(&self, writer: &mut BitWriter) -> Result<()> {
        self.root.encode(writer)
    }

    /// Load a tree from the reader's cursor.
    pub fn decode(reader: &mut BitReader) -> Result<Tree> {
        Ok(Tree::new(Node::decode(reader)?))
    }

    /// Visit every leaf with its code. A tree that is a single leaf gives the
    /// leaf the one-bit code '0'.
    fn visit_codes(&self, visit: &mut impl FnMut(u8, Code)) {
        fn walk(node: &Node, code: Code, visit: &mut impl FnMut(u8, Code)) {
            match node {
                Node::Leaf { symbol, .. } => visit(*symbol, code),
                Node::Internal { left, right, .. } => {
                    debug_assert!(code.len < MAX_CODE_LEN, "Code is too long");
                    let value = code.value << 1;
                    let len = code.len + 1;
                    walk(left, Code { value, len }, &mut *visit);
                    walk(right, Code { value: value | 1, len }, &mut *visit);
                }
            }
        }

        match &self.root {
            Node::Leaf { symbol, .. } => visit(*symbol, Code { value: 0, len: 1 }),
            root => walk(root, Code { value: 0, len: 0 }, visit),
        }
    }

    /// Build the table that maps symbols to codes.
    pub fn construct_code(&self) -> CodeTable {
        let mut codes = [None; ALPHABET];
        self.visit_codes(&mut |sym, code| codes[sym as usize] = Some(code));
        CodeTable { codes }
    }

    /// Build the table that maps codes to symbols.
    pub fn construct_inverse_code(&self) -> InverseCodeTable {
        let mut inverse = HashMap::new();
        self.visit_codes(&mut |sym, code| {
            inverse.insert(code, sym);
        });
        inverse
    }
}

#[test]
fn test_code_prefix() {
    let one = Code { value: 1, len: 1 };
    let zero_one = Code { value: 1, len: 2 };
    let one_one = Code { value: 3, len: 2 };
    assert!(!one.is_prefix_of(&zero_one));
    assert!(one.is_prefix_of(&one_one));
    assert!(!one_one.is_prefix_of(&one));
    assert_ne!(one, zero_one);
}
