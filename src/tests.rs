use voxell_rng::rng::XorShift128;

use crate::{
    compressor::Compressor,
    huffman::{compress, decompress, decompress_with_tree, tree::HuffmanTree},
};

const SHORT_DATA: &[u8] = b"Hello, World!";
const LONG_DATA: &[u8] =
    b"This is a longer string to test the huffman coding algorithm. It should be able to handle various lengths and characters.";
const RNG_DATA: &[u8] = &const {
    let mut arr = [0u8; 1000];
    let mut rng = XorShift128::new(0xdeadcafe);
    let mut i = 0;
    while i < 1000 {
        let data = rng.peek_next_u64();
        arr[i] = (data & 0xFF) as u8;
        rng = XorShift128::new(data);
        i += 1;
    }
    arr
};
const REPEATING_DATA: &[u8] = b"a baba da babble da dabble babble doo bee babble dabble dooble dee boo dooble daddle boo";
const SINGLE_BYTE_DATA: &[u8] = &[0x42; 300];
const ALL_BYTES_DATA: &[u8] = &const {
    let mut arr = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        arr[i] = i as u8;
        i += 1;
    }
    arr
};
const EMPTY_DATA: &[u8] = &[];

const TEST_CASES: &[(&[u8], &str)] = &[
    (REPEATING_DATA, "repeating data"),
    (SHORT_DATA, "short data"),
    (LONG_DATA, "long data"),
    (RNG_DATA, "rng data"),
    (SINGLE_BYTE_DATA, "single byte data"),
    (ALL_BYTES_DATA, "all bytes data"),
    (EMPTY_DATA, "empty data"),
];

pub fn roundtrip_test<C: Compressor>(mut compressor: C) {
    for &(test_case, test_name) in TEST_CASES {
        match compressor.test_roundtrip(test_case) {
            Ok(eq) => {
                eprintln!(
                    "Compression ratio for {} with {}: {:.2}%",
                    test_name,
                    compressor.compressor_name(),
                    eq.ratio() * 100.0
                );

                assert!(
                    eq.is_successful(),
                    "Roundtrip test for {} failed at {}:\n\tExpected: {:?}\n\tGot: {:?}\n\tCompressed: {:?}",
                    compressor.compressor_name(),
                    test_name,
                    eq.get_original(),
                    eq.get_decompressed(),
                    eq.get_compressed(),
                );
            }
            Err(e) => {
                panic!(
                    "Fatal error while trying to compress/decompress {} with {}: {}",
                    test_name,
                    compressor.compressor_name(),
                    e
                );
            }
        }
    }
}

/// Round-trips every case through the headerless payload, both with the persisted
/// table and with a tree rebuilt from the original input.
pub fn core_roundtrip_test() {
    for &(test_case, test_name) in TEST_CASES {
        let (table, payload) =
            compress(test_case).unwrap_or_else(|e| panic!("compress failed for {}: {}", test_name, e));
        assert!(table.is_prefix_free(), "codes for {} are not prefix-free", test_name);

        let bits = table.encoded_bit_len(test_case).unwrap();
        assert_eq!(payload.len(), bits.div_ceil(8), "payload size for {}", test_name);

        let from_table = decompress(&table, &payload).unwrap();
        assert_eq!(from_table, test_case, "table roundtrip failed for {}", test_name);

        let tree = HuffmanTree::from_bytes(test_case).unwrap();
        assert_eq!(tree.weight(), test_case.len() as u64 + 1, "root weight for {}", test_name);
        let from_tree = decompress_with_tree(&tree, &payload).unwrap();
        assert_eq!(from_tree, test_case, "tree roundtrip failed for {}", test_name);
    }
}
