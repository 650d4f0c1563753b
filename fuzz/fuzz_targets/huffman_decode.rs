#![no_main]

use libfuzzer_sys::fuzz_target;
use squash::coding::huffman::HuffmanDecoder;
use squash::Decoder;

fuzz_target!(|data: &[u8]| {
    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = HuffmanDecoder::new(data, &mut decompressed);
        let _ = decoder.decode();
    }
});
