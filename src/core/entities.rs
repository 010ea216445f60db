//! HTML Entity Decoding
//!
//! Handles decoding of character references in rendered HTML:
//! - Named entities: &lt; &gt; &amp; &quot; plus the common HTML set
//! - Numeric character references: &#123; &#x7B;
//!
//! Uses Cow for zero-copy when no entities are present. Unknown entities
//! pass through unchanged; rendered output is processed leniently and
//! nothing here ever fails.

use memchr::memchr;
use std::borrow::Cow;

/// Decode text content, handling entity references
///
/// Returns Borrowed if no entities present (zero-copy),
/// returns Owned if entities were decoded.
#[inline]
pub fn decode_text(input: &[u8]) -> Cow<'_, [u8]> {
    // Fast path: check if there are any entities using SIMD
    if memchr(b'&', input).is_none() {
        return Cow::Borrowed(input);
    }
    // Slow path: decode entities
    Cow::Owned(decode_entities(input))
}

/// Decode all entity references in the input
pub fn decode_entities(input: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let mut pos = 0;

    while pos < input.len() {
        if let Some(amp_pos) = memchr(b'&', &input[pos..]) {
            // Copy everything before the entity
            result.extend_from_slice(&input[pos..pos + amp_pos]);
            pos += amp_pos;

            // Find the semicolon
            if let Some(semi_offset) = memchr(b';', &input[pos..]) {
                let entity = &input[pos + 1..pos + semi_offset];

                if let Some(decoded) = decode_entity(entity) {
                    result.extend_from_slice(decoded.as_bytes());
                    pos += semi_offset + 1;
                } else {
                    // Unknown entity, keep as-is
                    result.push(b'&');
                    pos += 1;
                }
            } else {
                // No semicolon found, keep the ampersand
                result.push(b'&');
                pos += 1;
            }
        } else {
            // No more entities, copy the rest
            result.extend_from_slice(&input[pos..]);
            break;
        }
    }

    result
}

/// Decode a single entity (without & and ;)
fn decode_entity(entity: &[u8]) -> Option<String> {
    if entity.is_empty() {
        return None;
    }

    // Numeric character reference
    if entity[0] == b'#' {
        return decode_numeric_entity(&entity[1..]);
    }

    // Named entity
    match entity {
        b"lt" => Some("<".to_string()),
        b"gt" => Some(">".to_string()),
        b"amp" => Some("&".to_string()),
        b"quot" => Some("\"".to_string()),
        b"apos" => Some("'".to_string()),
        // HTML named entities (common ones)
        b"nbsp" => Some("\u{00A0}".to_string()),
        b"copy" => Some("\u{00A9}".to_string()),
        b"reg" => Some("\u{00AE}".to_string()),
        b"trade" => Some("\u{2122}".to_string()),
        b"mdash" => Some("\u{2014}".to_string()),
        b"ndash" => Some("\u{2013}".to_string()),
        b"lsquo" => Some("\u{2018}".to_string()),
        b"rsquo" => Some("\u{2019}".to_string()),
        b"ldquo" => Some("\u{201C}".to_string()),
        b"rdquo" => Some("\u{201D}".to_string()),
        b"hellip" => Some("\u{2026}".to_string()),
        b"rarr" => Some("\u{2192}".to_string()),
        b"larr" => Some("\u{2190}".to_string()),
        _ => None,
    }
}

/// Decode a numeric character reference
fn decode_numeric_entity(entity: &[u8]) -> Option<String> {
    if entity.is_empty() {
        return None;
    }

    let codepoint = if entity[0] == b'x' || entity[0] == b'X' {
        // Hexadecimal: &#xHHHH;
        let hex = std::str::from_utf8(&entity[1..]).ok()?;
        u32::from_str_radix(hex, 16).ok()?
    } else {
        // Decimal: &#DDDD;
        let dec = std::str::from_utf8(entity).ok()?;
        dec.parse::<u32>().ok()?
    };

    // Convert codepoint to character
    char::from_u32(codepoint).map(|c| c.to_string())
}

/// Escape text for HTML output
pub fn encode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if any escaping needed
    if !input.bytes().any(|b| matches!(b, b'<' | b'>' | b'&')) {
        return Cow::Borrowed(input);
    }

    // Slow path: escape
    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Escape text for use in double-quoted HTML attribute values
pub fn encode_attribute(input: &str) -> Cow<'_, str> {
    if !input.bytes().any(|b| matches!(b, b'<' | b'&' | b'"')) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities() {
        let input = b"Hello, World!";
        let result = decode_text(input);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), b"Hello, World!");
    }

    #[test]
    fn test_basic_entities() {
        let input = b"&lt;hello&gt; &amp; &quot;world&quot;";
        let result = decode_text(input);
        assert_eq!(result.as_ref(), b"<hello> & \"world\"");
    }

    #[test]
    fn test_numeric_decimal() {
        let input = b"&#65;&#66;&#67;";
        let result = decode_text(input);
        assert_eq!(result.as_ref(), b"ABC");
    }

    #[test]
    fn test_numeric_hex() {
        let input = b"&#x41;&#x42;&#x43;";
        let result = decode_text(input);
        assert_eq!(result.as_ref(), b"ABC");
    }

    #[test]
    fn test_unicode_entity() {
        let input = b"&#x1F600;"; // 😀
        let result = decode_text(input);
        assert_eq!(std::str::from_utf8(result.as_ref()).unwrap(), "😀");
    }

    #[test]
    fn test_unknown_entity() {
        let input = b"&unknown;";
        let result = decode_text(input);
        assert_eq!(result.as_ref(), b"&unknown;");
    }

    #[test]
    fn test_named_html_entity() {
        let result = decode_text(b"a&nbsp;b");
        assert_eq!(std::str::from_utf8(result.as_ref()).unwrap(), "a\u{00A0}b");
    }

    #[test]
    fn test_encode_text() {
        let input = "<hello> & world";
        let result = encode_text(input);
        assert_eq!(result.as_ref(), "&lt;hello&gt; &amp; world");
    }

    #[test]
    fn test_encode_text_borrowed_when_clean() {
        let result = encode_text("plain text");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_encode_attribute() {
        let input = "say \"hi\" & go";
        let result = encode_attribute(input);
        assert_eq!(result.as_ref(), "say &quot;hi&quot; &amp; go");
    }
}
