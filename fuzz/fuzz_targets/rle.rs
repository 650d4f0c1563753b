#![no_main]

use libfuzzer_sys::fuzz_target;
use squash::rle;

fuzz_target!(|data: &[u8]| {
    let compressed = rle::encode(data).unwrap();
    assert_eq!(compressed.len() % 2, 0);
    let decompressed = rle::decode(&compressed).unwrap();
    assert_eq!(decompressed, data);
    let _ = rle::decode(data);
});
