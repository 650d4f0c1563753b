use squash::registry::{self, ALGORITHMS};
use squash::Error;

#[test]
fn test_select() {
    let huffman = registry::select("huffman").unwrap();
    assert_eq!(huffman.name, "huffman");
    assert_eq!(huffman.extension, ".huff");

    let rle = registry::select("rle").unwrap();
    assert_eq!(rle.extension, ".rle");

    let res = registry::select("lzw");
    assert!(matches!(res, Err(Error::UnknownAlgorithm(name)) if name == "lzw"));
}

#[test]
fn test_names() {
    let names: Vec<&str> = registry::names().collect();
    assert_eq!(names, vec!["huffman", "rle"]);
}

#[test]
fn test_all_algorithms_round_trip() {
    let input = b"aaaaaaaabbbbbbbbbbbbbbbbcccccccccccccccccccccccccccccccccd";
    for algo in ALGORITHMS.iter() {
        let mut encoded = Vec::new();
        let written = (algo.encode)(input, &mut encoded).unwrap();
        assert_eq!(written, encoded.len());
        assert!(written < input.len(), "{} did not compress", algo.name);

        let mut decoded = Vec::new();
        let (read, written) = (algo.decode)(&encoded, &mut decoded).unwrap();
        assert_eq!(read, encoded.len());
        assert_eq!(written, input.len());
        assert_eq!(decoded, input);
    }
}
