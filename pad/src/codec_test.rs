use tiny_skia::{Color, Pixmap};

use super::*;

/// 4×2 8-bit greyscale PNG without alpha: top row black-black-white-white,
/// bottom row white.
const GREY_PNG_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAQAAAACCAAAAABawyK/AAAAEUlEQVR4nGNgYPj/H4j+/wcAFvMF+5wtMOgAAAAASUVORK5CYII=";

fn sample_pixmap() -> Pixmap {
    let mut pixmap = Pixmap::new(16, 8).unwrap();
    pixmap.fill(Color::from_rgba8(30, 41, 59, 255));
    pixmap
}

// =============================================================
// encode
// =============================================================

#[test]
fn encode_is_png_data_url() {
    let encoded = encode(&sample_pixmap()).unwrap();
    assert!(encoded.starts_with("data:image/png;base64,"));
    assert!(encoded.len() > "data:image/png;base64,".len());
}

#[test]
fn encode_is_deterministic() {
    let pixmap = sample_pixmap();
    assert_eq!(encode(&pixmap).unwrap(), encode(&pixmap).unwrap());
}

#[test]
fn encode_blank_is_not_empty_string() {
    let blank = Pixmap::new(4, 4).unwrap();
    assert!(!encode(&blank).unwrap().is_empty());
}

#[test]
fn decode_of_encode_is_pixel_exact() {
    let pixmap = sample_pixmap();
    let decoded = decode(&encode(&pixmap).unwrap()).unwrap();
    assert_eq!(decoded.width(), 16);
    assert_eq!(decoded.height(), 8);
    assert_eq!(decoded.data(), pixmap.data());
}

// =============================================================
// decode: accepted inputs
// =============================================================

#[test]
fn decode_external_greyscale_png() {
    let decoded = decode(&format!("data:image/png;base64,{GREY_PNG_B64}")).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 2));
    let black = decoded.pixel(0, 0).unwrap();
    let white = decoded.pixel(3, 0).unwrap();
    assert_eq!((black.red(), black.alpha()), (0, 255));
    assert_eq!((white.red(), white.green(), white.blue(), white.alpha()), (255, 255, 255, 255));
    assert_eq!(decoded.pixel(0, 1).unwrap().red(), 255);
}

#[test]
fn decode_is_case_insensitive_on_scheme_and_mime() {
    let decoded = decode(&format!("DATA:Image/PNG;BASE64,{GREY_PNG_B64}")).unwrap();
    assert_eq!(decoded.width(), 4);
}

#[test]
fn decode_tolerates_whitespace_and_extra_params() {
    let (a, b) = GREY_PNG_B64.split_at(20);
    let wrapped = format!("  data:image/png;charset=binary;base64,{a}\n  {b}\n");
    assert!(decode(&wrapped).is_ok());
}

// =============================================================
// decode: rejected inputs
// =============================================================

#[test]
fn decode_empty_is_empty() {
    assert!(matches!(decode(""), Err(CodecError::Empty)));
    assert!(matches!(decode("   \n"), Err(CodecError::Empty)));
}

#[test]
fn decode_plain_text_is_not_data_url() {
    assert!(matches!(decode("signature"), Err(CodecError::NotDataUrl)));
    assert!(matches!(decode("data:image/png;base64"), Err(CodecError::NotDataUrl)));
}

#[test]
fn decode_other_mime_is_unsupported() {
    match decode("data:image/jpeg;base64,AAAA") {
        Err(CodecError::UnsupportedMime(mime)) => assert_eq!(mime, "image/jpeg"),
        other => panic!("expected UnsupportedMime, got {other:?}"),
    }
}

#[test]
fn decode_without_base64_marker() {
    assert!(matches!(decode("data:image/png,abcd"), Err(CodecError::NotBase64)));
}

#[test]
fn decode_corrupt_base64() {
    assert!(matches!(decode("data:image/png;base64,@@@@"), Err(CodecError::Base64(_))));
}

#[test]
fn decode_non_png_payload() {
    // "hello world" in base64
    assert!(matches!(
        decode("data:image/png;base64,aGVsbG8gd29ybGQ="),
        Err(CodecError::DecodePng(_))
    ));
}

// =============================================================
// parse_data_url
// =============================================================

#[test]
fn parse_data_url_returns_mime_and_bytes() {
    let url = parse_data_url("data:text/plain;base64,aGk=").unwrap();
    assert_eq!(url.mime, "text/plain");
    assert_eq!(url.bytes, b"hi".to_vec());
}

#[test]
fn data_url_to_url_round_trips() {
    let url = DataUrl { mime: "image/png".to_string(), bytes: vec![1, 2, 3] };
    assert_eq!(url.to_url(), "data:image/png;base64,AQID");
    assert_eq!(parse_data_url(&url.to_url()).unwrap(), url);
}
