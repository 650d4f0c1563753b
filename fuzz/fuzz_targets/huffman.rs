#![no_main]

use libfuzzer_sys::fuzz_target;
use squash::coding::huffman::{HuffmanDecoder, HuffmanEncoder};
use squash::{Decoder, Encoder};

fuzz_target!(|data: &[u8]| {
    let mut compressed = Vec::new();
    let mut decompressed = Vec::new();

    let written = HuffmanEncoder::new(data, &mut compressed).encode().unwrap();
    assert_eq!(written, compressed.len());

    let (read, written) = HuffmanDecoder::new(&compressed, &mut decompressed)
        .decode()
        .unwrap();
    assert_eq!(decompressed, data);
    assert_eq!(read, compressed.len());
    assert_eq!(written, decompressed.len());
});
