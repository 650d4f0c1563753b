use squash::rle::{self, RLEIterator, RleDecoder, RleEncoder};
use squash::{Decoder, Encoder, Error};

fn round_trip(input: &[u8]) {
    let mut compressed: Vec<u8> = Vec::new();
    {
        let mut encoder = RleEncoder::new(input, &mut compressed);
        let written = encoder.encode().unwrap();
        assert_eq!(written, compressed.len());
    }

    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = RleDecoder::new(&compressed, &mut decompressed);
        let (consumed, written) = decoder.decode().unwrap();
        assert_eq!(consumed, compressed.len());
        assert_eq!(written, input.len());
    }
    assert_eq!(decompressed, input);
}

#[test]
fn test_rle_round_trip() {
    round_trip(&[]);
    round_trip(&[7]);
    round_trip(&[1, 2, 3, 1, 0, 0, 0, 0, 2, 2, 2, 2, 0, 0, 0]);
    round_trip(&[0; 1000]);
    let all: Vec<u8> = (0..=255).collect();
    round_trip(&all);
}

#[test]
fn test_rle_iterator() {
    let runs: Vec<(u8, usize)> =
        RLEIterator::new(&[99, 99, 99, 103, 104, 79, 79]).collect();
    assert_eq!(runs, vec![(99, 3), (103, 1), (104, 1), (79, 2)]);
    assert_eq!(RLEIterator::new(&[]).count(), 0);
}

#[test]
fn test_rle_example() {
    let encoded = rle::encode(b"aaabbbccc").unwrap();
    assert_eq!(encoded, [0x03, 0x61, 0x03, 0x62, 0x03, 0x63]);
    let decoded = rle::decode(&[0x03, 0x61, 0x03, 0x62, 0x03, 0x63]).unwrap();
    assert_eq!(decoded, b"aaabbbccc");
}

#[test]
fn test_rle_long_run() {
    let input = vec![0x42; 300];
    let encoded = rle::encode(&input).unwrap();
    assert_eq!(encoded, [255, 0x42, 45, 0x42]);
    assert_eq!(rle::decode(&encoded).unwrap(), input);

    let encoded = rle::encode(&[9; 510]).unwrap();
    assert_eq!(encoded, [255, 9, 255, 9]);
}

#[test]
fn test_rle_empty() {
    assert!(rle::encode(&[]).unwrap().is_empty());
    assert!(rle::decode(&[]).unwrap().is_empty());
}

#[test]
fn test_rle_zero_count() {
    assert_eq!(rle::decode(&[0, 1, 2, 3]).unwrap(), [3, 3]);
}

#[test]
fn test_rle_odd_length() {
    let res = rle::decode(&[3, 0x61, 3]);
    assert!(matches!(res, Err(Error::MalformedStream(_))));

    let mut output = Vec::new();
    assert!(RleDecoder::new(&[3, 0x61, 3], &mut output).decode().is_err());
    assert!(output.is_empty());
}
