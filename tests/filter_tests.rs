use pdf_graph::filter::{Codec, FilterChain, FilterKind, FilterParams, Flate};
use pdf_graph::{Dictionary, Error, FilterError, Name, Object, Options, Stage, Stream};

fn digits() -> Vec<u8> {
    b"0123456789".repeat(1024)
}

fn round_trip(chain: &FilterChain, data: &[u8]) {
    let raw = chain.encode(data).unwrap();
    let decoded = chain.decode(&raw, &Options::default()).unwrap();
    assert_eq!(decoded.len(), data.len());
    assert_eq!(decoded, data);
}

fn single(kind: FilterKind, params: FilterParams) -> FilterChain {
    FilterChain::new().with(kind, params)
}

#[test]
fn test_digits_buffer_size() {
    assert_eq!(digits().len(), 10_240);
}

#[test]
fn test_flate_round_trip() {
    round_trip(&single(FilterKind::Flate, FilterParams::default()), &digits());
}

#[test]
fn test_flate_png_predictors_round_trip() {
    for predictor in 10..=14 {
        let params = FilterParams::default()
            .with_predictor(predictor)
            .with_columns(16);
        let chain = single(FilterKind::Flate, params);
        let raw = chain.encode(&digits()).unwrap();
        assert_eq!(
            chain.decode(&raw, &Options::default()).unwrap(),
            digits(),
            "predictor {predictor}"
        );
    }
}

#[test]
fn test_flate_optimum_and_tiff_predictors_round_trip() {
    let rgb = FilterParams::default().with_colors(3).with_columns(10);
    round_trip(&single(FilterKind::Flate, rgb.with_predictor(15)), &digits());
    round_trip(&single(FilterKind::Flate, rgb.with_predictor(2)), &digits());

    let deep = FilterParams::default()
        .with_predictor(2)
        .with_bits_per_component(16)
        .with_columns(8);
    round_trip(&single(FilterKind::Flate, deep), &digits());
}

#[test]
fn test_ascii_hex_round_trip() {
    round_trip(&single(FilterKind::AsciiHex, FilterParams::default()), &digits());
}

#[test]
fn test_ascii85_round_trip() {
    round_trip(&single(FilterKind::Ascii85, FilterParams::default()), &digits());
}

#[test]
fn test_run_length_round_trip() {
    round_trip(&single(FilterKind::RunLength, FilterParams::default()), &digits());
}

#[test]
fn test_lzw_round_trip() {
    round_trip(&single(FilterKind::Lzw, FilterParams::default()), &digits());
    round_trip(
        &single(FilterKind::Lzw, FilterParams::default().with_early_change(false)),
        &digits(),
    );
}

#[test]
fn test_lzw_with_predictor_round_trip() {
    let params = FilterParams::default().with_predictor(12).with_columns(20);
    round_trip(&single(FilterKind::Lzw, params), &digits());
}

#[test]
fn test_long_chain_round_trip() {
    let chain = FilterChain::new()
        .with(FilterKind::Ascii85, FilterParams::default())
        .with(FilterKind::AsciiHex, FilterParams::default())
        .with(FilterKind::RunLength, FilterParams::default())
        .with(FilterKind::Flate, FilterParams::default().with_predictor(11).with_columns(7))
        .with(FilterKind::Lzw, FilterParams::default());
    round_trip(&chain, &digits());
    round_trip(&chain, b"");
}

#[test]
fn test_edge_buffers_round_trip() {
    let all_bytes: Vec<u8> = (0..=255).collect();
    let zeros = vec![0u8; 1000];
    for kind in [
        FilterKind::Flate,
        FilterKind::Lzw,
        FilterKind::AsciiHex,
        FilterKind::Ascii85,
        FilterKind::RunLength,
    ] {
        let chain = single(kind, FilterParams::default());
        round_trip(&chain, b"");
        round_trip(&chain, b"x");
        round_trip(&chain, &all_bytes);
        round_trip(&chain, &zeros);
    }
}

#[test]
fn test_known_encodings() {
    let hex = single(FilterKind::AsciiHex, FilterParams::default());
    assert_eq!(hex.decode(b"48 65 6c 6C 6f>", &Options::default()).unwrap(), b"Hello");

    let a85 = single(FilterKind::Ascii85, FilterParams::default());
    assert_eq!(a85.encode(b"\0\0\0\0").unwrap(), b"z~>");
    assert_eq!(a85.decode(b"87cURD]i,\"Ebo80~>", &Options::default()).unwrap(), b"Hello World!");

    let rl = single(FilterKind::RunLength, FilterParams::default());
    assert_eq!(rl.decode(&[254, b'a', 1, b'b', b'c', 128], &Options::default()).unwrap(), b"aaabc");
}

#[test]
fn test_malformed_inputs_name_codec_and_stage() {
    let options = Options::default();
    let cases: [(FilterKind, &[u8]); 5] = [
        (FilterKind::Flate, b"definitely not zlib"),
        (FilterKind::Lzw, &[0x80, 0x4B, 0x00, 0x00]),
        (FilterKind::AsciiHex, b"4G>"),
        (FilterKind::Ascii85, b"ab\x01cd~>"),
        (FilterKind::RunLength, &[5, b'a']),
    ];
    for (kind, input) in cases {
        let err = single(kind, FilterParams::default())
            .decode(input, &options)
            .unwrap_err();
        assert_eq!(err.codec(), kind);
        assert!(
            matches!(err, FilterError::Malformed { stage: Stage::Decode, .. }),
            "{kind}: {err}"
        );
    }
}

#[test]
fn test_odd_hex_digit_count_fails() {
    let err = single(FilterKind::AsciiHex, FilterParams::default())
        .decode(b"414>", &Options::default())
        .unwrap_err();
    assert_eq!(err.codec(), FilterKind::AsciiHex);
}

#[test]
fn test_unsupported_predictor() {
    let params = FilterParams::default().with_predictor(7);
    let err = single(FilterKind::Flate, params).encode(b"abc").unwrap_err();
    assert!(matches!(err, FilterError::UnsupportedParams { codec: FilterKind::Flate, .. }));
}

#[test]
fn test_oversized_predictor_rows_fail_cleanly() {
    let source = b"<< /Filter /FlateDecode /DecodeParms << /Predictor 12 /Columns 4611686018427387904 /Colors 4 >> >>";
    let dict: Dictionary = pdf_graph::from_slice(source).unwrap().try_into().unwrap();
    assert!(matches!(
        FilterChain::from_dict(&dict),
        Err(Error::Filter(FilterError::UnsupportedParams { codec: FilterKind::Flate, .. }))
    ));

    let params = FilterParams::default()
        .with_predictor(12)
        .with_columns(usize::MAX / 4)
        .with_colors(4);
    let chain = single(FilterKind::Flate, FilterParams::default());
    let raw = chain.encode(&digits()).unwrap();
    let err = single(FilterKind::Flate, params)
        .decode(&raw, &Options::default())
        .unwrap_err();
    assert!(matches!(err, FilterError::UnsupportedParams { codec: FilterKind::Flate, .. }));
}

#[test]
fn test_permissive_flate_recovers_prefix() {
    let data = digits();
    let compressed = single(FilterKind::Flate, FilterParams::default())
        .encode(&data)
        .unwrap();
    let truncated = &compressed[..compressed.len() / 2];

    let strict = Flate::default();
    assert!(strict.decode(truncated, &FilterParams::default()).is_err());

    let lenient = Flate { recover_partial: true };
    let partial = lenient.decode(truncated, &FilterParams::default()).unwrap();
    assert!(data.starts_with(&partial));

    let options = Options::new().with_ignore_compression_errors(true);
    let via_chain = single(FilterKind::Flate, FilterParams::default())
        .decode(truncated, &options)
        .unwrap();
    assert_eq!(via_chain, partial);
}

#[test]
fn test_permissive_flag_does_not_cover_other_codecs() {
    let options = Options::new().with_ignore_compression_errors(true);
    assert!(single(FilterKind::AsciiHex, FilterParams::default())
        .decode(b"zz>", &options)
        .is_err());
}

#[test]
fn test_stream_reads_chain_from_dictionary() {
    let source = b"<< /Filter [/AHx /Fl] /DecodeParms [null << /Predictor 12 /Columns 10 >>] >>";
    let dict = pdf_graph::from_slice(source).unwrap();
    let dict: Dictionary = dict.try_into().unwrap();
    let chain = dict_chain(&dict);

    let raw = chain.encode(&digits()).unwrap();
    let mut stream = Stream::from_raw(dict, raw.clone());
    assert_eq!(stream.data(&Options::default()).unwrap(), digits().as_slice());
    assert_eq!(
        stream.dict().get("Length").and_then(Object::as_i64),
        Some(raw.len() as i64)
    );
}

fn dict_chain(dict: &Dictionary) -> FilterChain {
    FilterChain::from_dict(dict).unwrap()
}

#[test]
fn test_stream_with_unknown_filter_fails_to_decode() {
    let mut dict = Dictionary::new();
    dict.insert("Filter", Name::new("DCTDecode"));
    let mut stream = Stream::from_raw(dict, vec![0xFF, 0xD8]);
    assert!(matches!(
        stream.data(&Options::default()),
        Err(Error::Custom(_))
    ));
}
