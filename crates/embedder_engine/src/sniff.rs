/// Accept header sent with every image request.
pub const ACCEPT_IMAGE_TYPES: &str = "image/jpeg,image/png,image/webp";

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Result of magic-number classification of a raw byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniffed {
    Jpeg,
    Png,
    Webp,
    Unsupported,
}

/// Classify a byte buffer by its magic number.
///
/// Runs before any decode attempt so that wrong-format payloads are rejected
/// up front rather than by decoder failure. Buffers shorter than the relevant
/// prefix, or matching none of the three signatures, are `Unsupported`.
pub fn classify(bytes: &[u8]) -> Sniffed {
    // JPEG: SOI marker.
    if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xD8 {
        return Sniffed::Jpeg;
    }
    if bytes.len() >= 8 && bytes[..8] == PNG_SIGNATURE {
        return Sniffed::Png;
    }
    // WEBP: RIFF container with a WEBP fourcc at offset 8.
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Sniffed::Webp;
    }
    Sniffed::Unsupported
}
