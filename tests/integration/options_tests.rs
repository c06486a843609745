//! Dynamic options integration tests.
//!
//! Tests verify that options given as JSON values drive the service the same
//! way typed options do, and that malformed values are rejected as invalid
//! arguments without reaching the codec.

use serde_json::{json, Value};

use jpeg_turbo::{
    max_compressed_size, DecodeOptions, EncodeOptions, ErrorKind, JpegService, PixelFormat,
    Subsampling,
};

use super::test_utils::{counting_service, fixture_jpeg};

fn malformed() -> Vec<Value> {
    vec![
        Value::Null,
        json!(42),
        json!("options"),
        json!(true),
        json!([1, 2, 3]),
        json!({}),
    ]
}

#[test]
fn test_buffer_size_rejects_malformed() {
    let service = JpegService::new();
    for value in malformed() {
        let err = service.buffer_size_value(&value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", value);
    }

    for value in [
        json!({"width": "10", "height": 10}),
        json!({"width": 10.5, "height": 10}),
        json!({"width": 10, "height": 10, "subsampling": 9}),
        json!({"width": 10, "height": 10, "subsampling": "411"}),
    ] {
        assert!(service.buffer_size_value(&value).is_err(), "{}", value);
    }
}

#[test]
fn test_buffer_size_from_value() {
    let service = JpegService::new();

    let omitted = service
        .buffer_size_value(&json!({"width": 1000, "height": 500}))
        .unwrap();
    let explicit = service
        .buffer_size_value(&json!({"width": 1000, "height": 500, "subsampling": 2}))
        .unwrap();
    let named = service
        .buffer_size_value(&json!({"width": 1000, "height": 500, "subsampling": "4:2:0"}))
        .unwrap();
    assert_eq!(omitted, explicit);
    assert_eq!(omitted, named);
    assert!(omitted > 100_000 && omitted < 4_000_000);

    let unbounded = service
        .buffer_size_value(&json!({"width": 0, "height": 500}))
        .unwrap();
    assert_eq!(unbounded, u32::MAX);

    let null_mode = service
        .buffer_size_value(&json!({"width": 64, "height": 64, "subsampling": null}))
        .unwrap();
    assert_eq!(null_mode, max_compressed_size(64, 64, Subsampling::S420));
}

#[test]
fn test_encode_options_drive_compress() {
    let service = counting_service();

    let options =
        EncodeOptions::from_value(&json!({"width": 20, "height": 10, "format": 8})).unwrap();
    assert_eq!(options.format, PixelFormat::Bgra);
    let compressed = service.compress_sync(vec![0u8; 800], None, &options).unwrap();
    assert!(compressed.size > 0);

    let options = EncodeOptions::from_value(&json!({
        "width": 20,
        "height": 10,
        "format": "gray",
        "subsampling": "gray",
        "quality": 60,
        "stride": 24,
    }))
    .unwrap();
    assert!(service.compress_sync(vec![0u8; 240], None, &options).is_ok());
    assert_eq!(service.codec().encode_calls(), 2);
}

#[test]
fn test_encode_options_reject_malformed() {
    for value in malformed() {
        let err = EncodeOptions::from_value(&value).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", value);
    }

    for value in [
        json!({"width": 10, "height": 10}),
        json!({"width": 10, "height": 10, "format": 11}),
        json!({"width": 10, "height": 10, "format": -1}),
        json!({"width": 10, "height": 10, "format": "cmyk"}),
        json!({"width": "ten", "height": 10, "format": 0}),
        json!({"width": 10, "height": 10, "format": 0, "quality": "high"}),
    ] {
        assert!(EncodeOptions::from_value(&value).is_err(), "{}", value);
    }
}

#[test]
fn test_decode_options_default_when_absent() {
    let service = JpegService::new();
    for value in [None, Some(Value::Null)] {
        let options = DecodeOptions::from_value(value.as_ref()).unwrap();
        let decoded = service
            .decompress_sync(fixture_jpeg(), None, Some(&options))
            .unwrap();
        assert_eq!(decoded.format, PixelFormat::Rgb);
    }

    let options = DecodeOptions::from_value(Some(&json!({"format": 1}))).unwrap();
    assert_eq!(options.format, Some(PixelFormat::Bgr));
    assert!(DecodeOptions::from_value(Some(&json!(3))).is_err());
    assert!(DecodeOptions::from_value(Some(&json!({"format": 42}))).is_err());
}
