//! This module contains the Huffman coder and the structures that it is built on.

pub mod hist;
pub mod huffman;
pub mod tree;
