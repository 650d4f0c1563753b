use squash::coding::huffman::{self, HuffmanDecoder, HuffmanEncoder};
use squash::{Decoder, Encoder, Error};

use rand_distr::Distribution;

fn round_trip(input: &[u8]) {
    let mut compressed: Vec<u8> = Vec::new();
    {
        let mut encoder = HuffmanEncoder::new(input, &mut compressed);
        let written = encoder.encode().unwrap();
        assert_eq!(written, compressed.len());
    }

    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = HuffmanDecoder::new(&compressed, &mut decompressed);
        let (consumed, written) = decoder.decode().unwrap();
        assert_eq!(consumed, compressed.len());
        assert_eq!(written, input.len());
    }
    assert_eq!(decompressed, input);
}

#[test]
fn test_huffman_round_trip() {
    round_trip(&[]);
    round_trip(&[0]);
    round_trip(&[255]);
    round_trip(&[0, 0, 0, 0]);
    round_trip(&[0, 0, 1, 1, 2, 3]);
    round_trip(&[1, 251, 255, 0, 245, 32, 32, 142]);
    round_trip(b"aaabbbccc");
    round_trip(b"entropy encoding is typically the last stage of a pipeline");

    let all: Vec<u8> = (0..=255).collect();
    round_trip(&all);
    let mut twice = all.clone();
    twice.extend(all.iter().rev());
    round_trip(&twice);
}

#[test]
fn test_empty_input() {
    assert!(huffman::encode(&[]).unwrap().is_empty());
    assert!(huffman::decode(&[]).unwrap().is_empty());
}

#[test]
fn test_single_symbol() {
    let input = vec![b'a'; 1000];
    let encoded = huffman::encode(&input).unwrap();
    // 16 header bits, 19 tree bits and one bit per symbol.
    assert_eq!(encoded.len(), (16 + 19 + 1000 + 7) / 8);
    assert_eq!(huffman::decode(&encoded).unwrap(), input);
}

#[test]
fn test_compresses_skewed_input() {
    let mut input = vec![b'e'; 4000];
    input.extend_from_slice(b"the rest of the text");
    let encoded = huffman::encode(&input).unwrap();
    assert!(encoded.len() < input.len() / 4);
    assert_eq!(huffman::decode(&encoded).unwrap(), input);
}

#[test]
fn test_known_encoding() {
    // Tree: 0 1'c' 0 1'a' 1'b' (29 bits). Codes: c=0, a=10, b=11.
    // Data: 10 11 0 (5 bits). 16 + 29 + 5 = 50 bits, 6 bits of padding.
    let encoded = huffman::encode(b"abc").unwrap();
    assert_eq!(encoded.len(), 7);
    assert_eq!(encoded[0], 0);
    assert_eq!(encoded[1], (29 << 3) | 6);
    assert_eq!(*encoded.last().unwrap() & 0x3f, 0);
    assert_eq!(huffman::decode(&encoded).unwrap(), b"abc");
}

#[test]
fn test_deterministic() {
    let input = b"she sells sea shells by the sea shore";
    let first = huffman::encode(input).unwrap();
    let second = huffman::encode(input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_random_round_trip() {
    use rand::thread_rng;
    use rand_distr::{Geometric, Uniform};

    let mut rng = thread_rng();
    let uniform = Uniform::new_inclusive(0, 255);
    let geometric = Geometric::new(0.2).unwrap();

    for i in 1..40 {
        let mut input = Vec::new();
        for _ in 0..i * 97 {
            input.push(uniform.sample(&mut rng) as u8);
        }
        round_trip(&input);

        let mut input = Vec::new();
        for _ in 0..i * 131 {
            input.push(geometric.sample(&mut rng).min(255) as u8);
        }
        round_trip(&input);
    }
}

#[test]
fn test_tree_length_beyond_buffer() {
    // The header claims a tree of 8191 bits.
    let res = huffman::decode(&[0xff, 0xf8, 0x80]);
    assert!(matches!(res, Err(Error::MalformedStream(_))));

    let encoded = huffman::encode(b"abc").unwrap();
    let res = huffman::decode(&encoded[..2]);
    assert!(matches!(res, Err(Error::MalformedStream(_))));
    let res = huffman::decode(&encoded[..1]);
    assert!(matches!(res, Err(Error::EndOfBuffer { .. })));
}

#[test]
fn test_truncated_data() {
    let encoded = huffman::encode(b"abc").unwrap();
    // Only 3 data bits are left, but the header declares 6 bits of padding.
    let res = huffman::decode(&encoded[..6]);
    assert!(matches!(res, Err(Error::MalformedStream(_))));
}

#[test]
fn test_tree_length_mismatch() {
    let mut encoded = huffman::encode(b"abc").unwrap();
    // Claim a tree of 30 bits instead of 29.
    encoded[1] = (30 << 3) | 6;
    let res = huffman::decode(&encoded);
    assert!(matches!(res, Err(Error::MalformedStream(_))));
}

#[test]
fn test_nonzero_padding() {
    let mut encoded = huffman::encode(b"abc").unwrap();
    *encoded.last_mut().unwrap() |= 1;
    let res = huffman::decode(&encoded);
    assert!(matches!(res, Err(Error::MalformedStream(_))));
}

#[test]
fn test_decoder_does_not_write_on_failure() {
    let encoded = huffman::encode(b"abc").unwrap();
    let mut output = Vec::new();
    let res = HuffmanDecoder::new(&encoded[..6], &mut output).decode();
    assert!(res.is_err());
    assert!(output.is_empty());
}

#[test]
fn test_decoder_random_input() {
    use rand::thread_rng;
    use rand_distr::Uniform;

    let mut rng = thread_rng();
    let distr = Uniform::new_inclusive(0, 255);

    // Decoding garbage must fail or succeed, but never panic.
    for i in 1..200 {
        let mut input = Vec::new();
        for _ in 0..i * 7 {
            input.push(distr.sample(&mut rng) as u8);
        }
        let mut decoded = Vec::new();
        if let Ok((read, written)) =
            HuffmanDecoder::new(&input, &mut decoded).decode()
        {
            assert_eq!(read, input.len());
            assert_eq!(written, decoded.len());
        }
    }
}
