//! Entry adapter for base64-encoded image payloads.

use base64::{prelude::BASE64_STANDARD, Engine};

use crate::error::PipelineError;

/// Decodes a base64 image payload into raw bytes.
///
/// Browser clients send data-URI strings (`data:image/png;base64,<payload>`);
/// the header up to the first comma is stripped before decoding. A bare
/// base64 string is decoded as-is.
pub fn decode_base64_image(payload: &str) -> Result<Vec<u8>, PipelineError> {
    let encoded = match payload.split_once(',') {
        Some((header, rest)) if header.starts_with("data:image") => rest,
        _ => payload,
    };
    Ok(BASE64_STANDARD.decode(encoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG, the smallest well-formed payload browsers produce.
    const TINY_PNG_B64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn strips_data_uri_prefix() {
        let payload = format!("data:image/png;base64,{}", TINY_PNG_B64);
        let bytes = decode_base64_image(&payload).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn decodes_bare_base64() {
        let bytes = decode_base64_image(TINY_PNG_B64).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn malformed_base64_fails_with_invalid_encoding() {
        let err = decode_base64_image("not-base64!!").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidEncoding(_)));
    }
}
