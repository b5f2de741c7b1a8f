//! Minimal well-formed upload payloads for file intake tests.
//!
//! Each helper returns bytes whose leading signature matches the claimed
//! format, which is all the intake guard inspects.

/// Bytes that pass the PDF signature check.
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n%test fixture\n%%EOF\n".to_vec()
}

/// Bytes that pass the JPEG signature check.
pub fn jpeg_bytes() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.extend_from_slice(b"JFIF fixture");
    bytes
}

/// Bytes that pass the PNG signature check.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(b"IHDR fixture");
    bytes
}

/// Bytes that match no allowed signature.
pub fn unknown_bytes() -> Vec<u8> {
    b"MZ this is not a document".to_vec()
}
