//! Byte-to-text decoding for pages read from disk.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// 1. UTF-8 first (a BOM is handled by encoding_rs)
/// 2. If malformed, the hint encoding (see [`sniff_charset`])
/// 3. Windows-1252 as the last resort
///
/// ```ignore
/// assert_eq!(decode_text("Hello".as_bytes(), None), "Hello");
/// assert_eq!(decode_text(b"caf\xe9", Some("iso-8859-1")), "café");
/// ```
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find a declared charset near the start of a page.
///
/// Looks at the first 1024 bytes for `<?xml ... encoding="..."?>` or a
/// `<meta charset="...">` / `<meta ... content="text/html; charset=...">`.
pub fn sniff_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];
    extract_xml_encoding(prefix).or_else(|| extract_meta_charset(prefix))
}

/// The charset named in a `<meta http-equiv>` `content` value, such as
/// `text/html; charset=ISO-8859-1`.
pub fn content_charset(content: &str) -> Option<&str> {
    extract_meta_charset(content.as_bytes())
}

/// Whether an encoding label names UTF-8 (`utf-8`, `UTF8`, `unicode-1-1-utf-8`...).
pub fn is_utf8_label(label: &str) -> bool {
    encoding_rs::Encoding::for_label(label.trim().as_bytes()) == Some(encoding_rs::UTF_8)
}

fn extract_xml_encoding(prefix: &[u8]) -> Option<&str> {
    let xml_start = find(prefix, b"<?xml")?;
    let after_xml = &prefix[xml_start..];
    let enc_pos = find_ignore_case(after_xml, b"encoding=")?;
    quoted_value(&after_xml[enc_pos + 9..])
}

fn extract_meta_charset(prefix: &[u8]) -> Option<&str> {
    let pos = find_ignore_case(prefix, b"charset=")?;
    let after = &prefix[pos + 8..];
    match after.first()? {
        b'"' | b'\'' => quoted_value(after),
        _ => {
            let end = after
                .iter()
                .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
                .unwrap_or(after.len());
            std::str::from_utf8(&after[..end]).ok().filter(|s| !s.is_empty())
        }
    }
}

fn quoted_value(bytes: &[u8]) -> Option<&str> {
    let quote = *bytes.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = bytes[1..].iter().position(|&b| b == quote)? + 1;
    std::str::from_utf8(&bytes[1..end]).ok()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn find_ignore_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
