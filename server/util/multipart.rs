//! Minimal multipart/form-data parsing for the prediction service.
//!
//! The service only ever needs one thing out of a multipart body: the raw
//! bytes of a named file field. Boundary handling follows RFC 2046 closely
//! enough for browser and curl uploads.

/// Returns the index of the first occurrence of `needle` in `haystack`.
fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, returning the pieces
/// between occurrences (excluding the needle itself).
fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
}

/// Extracts the raw bytes of the file part named `field_name` from a
/// multipart/form-data body. Returns `None` when the field is missing or the
/// body does not parse.
pub fn extract_file_field(body: &[u8], boundary: &str, field_name: &str) -> Option<Vec<u8>> {
    let delimiter = format!("--{}", boundary);
    let parts = split_on(body, delimiter.as_bytes());

    for part in parts {
        let sep = b"\r\n\r\n";
        if let Some(sep_pos) = find_subsequence(part, sep) {
            let headers = String::from_utf8_lossy(&part[..sep_pos]);
            let has_name = headers.contains(&format!("name=\"{}\"", field_name));
            let has_filename = headers.contains("filename=");
            if has_name && has_filename {
                let raw = &part[sep_pos + sep.len()..];
                let trimmed = raw.strip_suffix(b"\r\n").unwrap_or(raw);
                return Some(trimmed.to_vec());
            }
        }
    }
    None
}
