use proptest::prelude::*;
use sorensen::{decode, decode_record, encode_bytes, Config, Decoder};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_random(data in proptest::collection::vec(any::<u8>(), 0..=2)) {
        let descriptor = encode_bytes(&data);
        prop_assert!(descriptor.set_bits <= descriptor.total_bits);
        prop_assert_eq!(descriptor.total_bits % 8, 0);
        prop_assert_eq!(decode(&descriptor).unwrap(), data);
    }
}

/// Three or four bytes with at most two bits differing from all-zero
/// (sparse) or all-one (dense), keeping the search space under C(32, 2).
fn skewed_word() -> impl Strategy<Value = Vec<u8>> {
    (3usize..=4, proptest::collection::vec(0usize..32, 0..=2), any::<bool>()).prop_map(
        |(len, positions, dense)| {
            let mut data = vec![0u8; len];
            for pos in positions {
                let pos = pos % (len * 8);
                data[pos / 8] |= 1 << (pos % 8);
            }
            if dense {
                data.iter_mut().for_each(|b| *b = !*b);
            }
            data
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_skewed_words(data in skewed_word()) {
        let descriptor = encode_bytes(&data);
        prop_assert!(descriptor.set_bits <= 2 || descriptor.total_bits - descriptor.set_bits <= 2);
        prop_assert_eq!(decode(&descriptor).unwrap(), data);
    }
}

#[test]
fn roundtrip_sparse_and_dense_words() {
    let cases: [&[u8]; 6] = [
        &[0x00, 0x10, 0x00],
        &[0xFF, 0xEF, 0xFF],
        &[0x03, 0x00, 0x80],
        &[0x00, 0x00, 0x00, 0x01],
        &[0xFF, 0xFF, 0xFF, 0x7F],
        &[0x01, 0x00, 0x00, 0x80],
    ];
    for data in cases {
        let record = encode_bytes(data).to_bytes();
        assert_eq!(decode_record(&record).unwrap(), data);
    }
}

#[test]
fn empty_input_roundtrip() {
    let d = encode_bytes(&[]);
    assert_eq!((d.total_bits, d.set_bits), (0, 0));
    assert!(decode(&d).unwrap().is_empty());
}

#[test]
fn uniform_inputs_resolve_on_first_candidate() {
    let cfg = Config {
        candidate_limit: Some(1),
        ..Config::default()
    };
    for data in [vec![0x00; 6], vec![0xFF; 6]] {
        let d = encode_bytes(&data);
        assert!(d.set_bits == 0 || d.set_bits == d.total_bits);
        assert_eq!(Decoder::new(cfg.clone()).decode(&d).unwrap(), data);
    }
}
