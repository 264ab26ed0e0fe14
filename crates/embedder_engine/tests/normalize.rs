use std::io::Cursor;

use embedder_engine::{normalize, NormalizeError, NormalizeSettings};
use pretty_assertions::assert_eq;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([40, 80, 120, 255]),
    ));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn dimensions(png: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(png).unwrap();
    (img.width(), img.height())
}

#[test]
fn square_source_stays_square_at_target_width() {
    let out = normalize(&png_bytes(100, 100), &NormalizeSettings::default()).unwrap();
    assert_eq!(dimensions(&out), (300, 300));
}

#[test]
fn two_to_one_source_keeps_its_aspect_ratio() {
    let out = normalize(&png_bytes(200, 100), &NormalizeSettings::default()).unwrap();
    assert_eq!(dimensions(&out), (300, 150));
}

#[test]
fn odd_ratio_height_is_rounded() {
    // 300 * 100 / 640 = 46.875 -> 47
    let out = normalize(&png_bytes(640, 100), &NormalizeSettings::default()).unwrap();
    assert_eq!(dimensions(&out), (300, 47));
}

#[test]
fn target_width_follows_the_inch_dpi_product() {
    let settings = NormalizeSettings {
        target_width_inches: 0.5,
        dpi: 200,
    };
    let out = normalize(&png_bytes(50, 50), &settings).unwrap();
    assert_eq!(dimensions(&out), (100, 100));
}

#[test]
fn output_is_png_regardless_of_input_codec() {
    let out = normalize(&png_bytes(10, 10), &NormalizeSettings::default()).unwrap();
    assert_eq!(embedder_engine::classify(&out), embedder_engine::Sniffed::Png);
}

#[test]
fn garbage_bytes_fail_with_decode_error() {
    let err = normalize(b"definitely not an image", &NormalizeSettings::default()).unwrap_err();
    assert!(matches!(err, NormalizeError::Decode(_)));
}

#[test]
fn normalization_is_deterministic() {
    let src = png_bytes(123, 77);
    let settings = NormalizeSettings::default();
    let first = normalize(&src, &settings).unwrap();
    let second = normalize(&src, &settings).unwrap();
    assert_eq!(first, second);
}
