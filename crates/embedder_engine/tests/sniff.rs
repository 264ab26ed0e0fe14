use embedder_engine::{classify, Sniffed, ACCEPT_IMAGE_TYPES};
use pretty_assertions::assert_eq;

#[test]
fn recognizes_canonical_jpeg_header() {
    assert_eq!(classify(&[0xFF, 0xD8, 0xFF, 0xE0]), Sniffed::Jpeg);
    // The two-byte SOI marker alone is enough.
    assert_eq!(classify(&[0xFF, 0xD8]), Sniffed::Jpeg);
}

#[test]
fn recognizes_canonical_png_header() {
    let header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    assert_eq!(classify(&header), Sniffed::Png);
}

#[test]
fn recognizes_webp_riff_container() {
    let mut header = Vec::new();
    header.extend_from_slice(b"RIFF");
    header.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
    header.extend_from_slice(b"WEBP");
    assert_eq!(classify(&header), Sniffed::Webp);
}

#[test]
fn riff_without_webp_fourcc_is_unsupported() {
    let mut header = Vec::new();
    header.extend_from_slice(b"RIFF");
    header.extend_from_slice(&[0x24, 0x00, 0x00, 0x00]);
    header.extend_from_slice(b"WAVE");
    assert_eq!(classify(&header), Sniffed::Unsupported);
}

#[test]
fn short_buffers_never_panic_and_are_unsupported() {
    assert_eq!(classify(&[]), Sniffed::Unsupported);
    assert_eq!(classify(&[0xFF]), Sniffed::Unsupported);
    assert_eq!(classify(&[0x89, 0x50, 0x4E]), Sniffed::Unsupported);
    assert_eq!(classify(b"RIFF1234WEB"), Sniffed::Unsupported);
}

#[test]
fn zero_bytes_are_unsupported() {
    assert_eq!(classify(&[0u8; 64]), Sniffed::Unsupported);
}

#[test]
fn accept_header_lists_the_three_supported_types() {
    assert_eq!(ACCEPT_IMAGE_TYPES, "image/jpeg,image/png,image/webp");
}
