//! Href Classification and Base-Path Utilities
//!
//! Syntactic href handling: no network, no resolution, no percent-coding.
//! Classification is a pure function of the string; the base-path helpers
//! implement the normalization and joining rules used by the link rebaser.

/// Syntactic classification of an href value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HrefKind {
    /// Has a scheme: https://example.com/x, mailto:a@b
    Absolute,
    /// Scheme-relative: //example.com/x
    ProtocolRelative,
    /// Site-root-relative: /guide
    RootRelative,
    /// Fragment-only: #section
    Fragment,
    /// Query-only: ?page=2
    Query,
    /// Document-relative: ./x, ../x, x/y, or empty
    Relative,
}

/// Classify an href by syntax alone
pub fn classify(href: &str) -> HrefKind {
    if href.starts_with("//") {
        return HrefKind::ProtocolRelative;
    }
    if href.starts_with('/') {
        return HrefKind::RootRelative;
    }
    if href.starts_with('#') {
        return HrefKind::Fragment;
    }
    if href.starts_with('?') {
        return HrefKind::Query;
    }
    if has_scheme(href) {
        return HrefKind::Absolute;
    }
    HrefKind::Relative
}

/// Check for an RFC 3986 scheme prefix: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn has_scheme(href: &str) -> bool {
    let bytes = href.as_bytes();
    if !bytes.first().map_or(false, u8::is_ascii_alphabetic) {
        return false;
    }
    for &b in &bytes[1..] {
        match b {
            b':' => return true,
            b if b.is_ascii_alphanumeric() => {}
            b'+' | b'-' | b'.' => {}
            _ => return false,
        }
    }
    false
}

/// Normalize a configured base path
///
/// Ensures a leading '/', strips trailing '/' unless the result is exactly
/// "/". Idempotent: normalizing an already-normalized base is a no-op.
pub fn normalize_base(raw: &str) -> String {
    let mut base = if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    };
    while base.len() > 1 && base.ends_with('/') {
        base.pop();
    }
    base
}

/// Join a normalized base path with a root-relative path
///
/// A base of "/" returns the path unchanged: prefixing would produce a
/// protocol-relative "//..." for paths that already start with '/'.
pub fn with_base(base: &str, path: &str) -> String {
    if base == "/" {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_absolute() {
        assert_eq!(classify("https://example.com/x"), HrefKind::Absolute);
        assert_eq!(classify("mailto:a@b.c"), HrefKind::Absolute);
    }

    #[test]
    fn test_classify_protocol_relative() {
        assert_eq!(classify("//example.com/x"), HrefKind::ProtocolRelative);
    }

    #[test]
    fn test_classify_root_relative() {
        assert_eq!(classify("/guide"), HrefKind::RootRelative);
        assert_eq!(classify("/"), HrefKind::RootRelative);
    }

    #[test]
    fn test_classify_fragment_and_query() {
        assert_eq!(classify("#section"), HrefKind::Fragment);
        assert_eq!(classify("?page=2"), HrefKind::Query);
    }

    #[test]
    fn test_classify_relative() {
        assert_eq!(classify("./x"), HrefKind::Relative);
        assert_eq!(classify("../x"), HrefKind::Relative);
        assert_eq!(classify("guide/intro"), HrefKind::Relative);
        assert_eq!(classify(""), HrefKind::Relative);
    }

    #[test]
    fn test_classify_colon_in_path_is_not_scheme() {
        // A ':' after a '/' is path content, not a scheme delimiter
        assert_eq!(classify("a/b:c"), HrefKind::Relative);
    }

    #[test]
    fn test_normalize_base_forms() {
        assert_eq!(normalize_base("docs"), "/docs");
        assert_eq!(normalize_base("/docs"), "/docs");
        assert_eq!(normalize_base("/docs/"), "/docs");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base(""), "/");
    }

    #[test]
    fn test_normalize_base_idempotent() {
        for raw in ["docs", "/docs", "/docs/", "/", "", "/a/b/"] {
            let once = normalize_base(raw);
            assert_eq!(normalize_base(&once), once);
        }
    }

    #[test]
    fn test_with_base() {
        assert_eq!(with_base("/docs", "/guide"), "/docs/guide");
        assert_eq!(with_base("/docs", "guide"), "/docs/guide");
        assert_eq!(with_base("/", "/guide"), "/guide");
    }
}
