//! HTML Tokenizer
//!
//! Pull tokenizer for rendered HTML. Yields events over a byte slice with
//! zero-copy payloads where no entity decoding is needed.
//!
//! Lenient by design: rendered-output HTML is processed as-is, stray
//! markup degrades to text or is skipped, and tokenizing never fails.

use super::attributes::{parse_attributes, Attribute};
use super::entities::decode_text;
use super::scanner::Scanner;
use memchr::{memchr, memmem};
use std::borrow::Cow;

/// HTML tokenizer event
#[derive(Debug, Clone)]
pub enum HtmlEvent<'a> {
    /// Start of an element: <name attrs...>
    StartTag(StartTag<'a>),
    /// End of an element: </name>
    EndTag { name: &'a [u8] },
    /// Text content between tags (entities decoded)
    Text(Cow<'a, [u8]>),
    /// Contents of a raw-text element (script, style, textarea, title), verbatim
    RawText(Cow<'a, [u8]>),
    /// Comment content (between <!-- and -->)
    Comment(Cow<'a, [u8]>),
    /// Declaration content (between <! and >), e.g. "DOCTYPE html"
    Doctype(Cow<'a, [u8]>),
}

/// Start tag event data
#[derive(Debug, Clone)]
pub struct StartTag<'a> {
    /// Element name as written
    pub name: &'a [u8],
    /// Element attributes
    pub attributes: Vec<Attribute<'a>>,
    /// Whether the tag was written self-closing: <name/>
    pub self_closing: bool,
}

impl<'a> StartTag<'a> {
    /// Get the name as a string
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Get an attribute value by name
    pub fn get_attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name_str() == Some(name))
            .and_then(|a| a.value_str())
    }
}

/// Check whether a tag name is a raw-text element
/// Their contents are tokenized verbatim up to the matching close tag
fn is_raw_text_element(name: &[u8]) -> bool {
    name.eq_ignore_ascii_case(b"script")
        || name.eq_ignore_ascii_case(b"style")
        || name.eq_ignore_ascii_case(b"textarea")
        || name.eq_ignore_ascii_case(b"title")
}

/// Pull tokenizer over a byte slice
pub struct Tokenizer<'a> {
    input: &'a [u8],
    scanner: Scanner<'a>,
    /// Lowercased name of the raw-text element whose close tag ends raw mode
    raw_until: Option<Vec<u8>>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            input,
            scanner: Scanner::new(input),
            raw_until: None,
        }
    }

    /// Get the next event, or None at end of input
    pub fn next_event(&mut self) -> Option<HtmlEvent<'a>> {
        loop {
            if let Some(name) = self.raw_until.take() {
                if let Some(event) = self.read_raw_text(&name) {
                    return Some(event);
                }
                // Empty raw content: fall through to the close tag
                continue;
            }

            if self.scanner.is_eof() {
                return None;
            }

            let pos = self.scanner.position();
            if self.scanner.peek() == Some(b'<') && self.tag_opens_at(pos) {
                match self.read_markup() {
                    Some(event) => return Some(event),
                    // Skipped construct (e.g. <?...>), keep going
                    None => continue,
                }
            }

            if let Some(event) = self.read_text() {
                return Some(event);
            }
        }
    }

    /// Check whether a '<' at pos opens a markup construct
    fn tag_opens_at(&self, pos: usize) -> bool {
        match self.input.get(pos + 1).copied() {
            Some(b) => b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'),
            None => false,
        }
    }

    /// Find the next '<' that opens a markup construct, at or after `from`
    fn find_tag_open(&self, mut from: usize) -> Option<usize> {
        while from < self.input.len() {
            let i = from + memchr(b'<', &self.input[from..])?;
            if self.tag_opens_at(i) {
                return Some(i);
            }
            from = i + 1;
        }
        None
    }

    /// Read a text run up to the next markup construct
    fn read_text(&mut self) -> Option<HtmlEvent<'a>> {
        let start = self.scanner.position();
        // A '<' at start did not open a tag; include it in the text run
        let from = if self.input.get(start) == Some(&b'<') {
            start + 1
        } else {
            start
        };
        let end = self.find_tag_open(from).unwrap_or(self.input.len());
        self.scanner.set_position(end);
        if end == start {
            return None;
        }
        Some(HtmlEvent::Text(decode_text(&self.input[start..end])))
    }

    /// Read a markup construct starting at '<'
    /// Returns None for constructs that produce no event (skipped)
    fn read_markup(&mut self) -> Option<HtmlEvent<'a>> {
        let pos = self.scanner.position();
        match self.input.get(pos + 1).copied() {
            Some(b'!') => {
                if self.scanner.starts_with(b"<!--") {
                    self.read_comment()
                } else {
                    self.read_declaration()
                }
            }
            Some(b'?') => {
                // Processing instructions are not HTML; skip to '>'
                match self.scanner.find_byte(b'>') {
                    Some(gt) => self.scanner.set_position(gt + 1),
                    None => self.scanner.set_position(self.input.len()),
                }
                None
            }
            Some(b'/') => self.read_end_tag(),
            _ => self.read_start_tag(),
        }
    }

    /// Read a comment: <!-- ... -->
    fn read_comment(&mut self) -> Option<HtmlEvent<'a>> {
        let content_start = self.scanner.position() + 4;
        match memmem::find(&self.input[content_start..], b"-->") {
            Some(rel) => {
                let content = &self.input[content_start..content_start + rel];
                self.scanner.set_position(content_start + rel + 3);
                Some(HtmlEvent::Comment(Cow::Borrowed(content)))
            }
            None => {
                // Unterminated comment runs to end of input
                let content = &self.input[content_start..];
                self.scanner.set_position(self.input.len());
                Some(HtmlEvent::Comment(Cow::Borrowed(content)))
            }
        }
    }

    /// Read a declaration: <!DOCTYPE html> and friends
    fn read_declaration(&mut self) -> Option<HtmlEvent<'a>> {
        let content_start = self.scanner.position() + 2;
        match self.scanner.find_tag_end_quoted() {
            Some(gt) => {
                let content = &self.input[content_start..gt];
                self.scanner.set_position(gt + 1);
                Some(HtmlEvent::Doctype(Cow::Borrowed(content)))
            }
            None => {
                let content = &self.input[content_start..];
                self.scanner.set_position(self.input.len());
                Some(HtmlEvent::Doctype(Cow::Borrowed(content)))
            }
        }
    }

    /// Read an end tag: </name>
    fn read_end_tag(&mut self) -> Option<HtmlEvent<'a>> {
        self.scanner.advance(2); // Skip '</'
        let name = self.scanner.read_name();
        match self.scanner.find_byte(b'>') {
            Some(gt) => self.scanner.set_position(gt + 1),
            None => self.scanner.set_position(self.input.len()),
        }
        name.map(|name| HtmlEvent::EndTag { name })
    }

    /// Read a start tag: <name attrs...> or <name attrs.../>
    fn read_start_tag(&mut self) -> Option<HtmlEvent<'a>> {
        let gt = match self.scanner.find_tag_end_quoted() {
            Some(gt) => gt,
            None => {
                // Unterminated tag at end of input; drop it
                self.scanner.set_position(self.input.len());
                return None;
            }
        };

        self.scanner.advance(1); // Skip '<'
        let name = match self.scanner.read_name() {
            Some(name) => name,
            None => {
                self.scanner.set_position(gt + 1);
                return None;
            }
        };
        let name_end = self.scanner.position();

        let self_closing = gt > 0 && self.input[gt - 1] == b'/';
        let attr_end = if self_closing { gt - 1 } else { gt };
        let attributes = if name_end < attr_end {
            parse_attributes(&self.input[name_end..attr_end])
        } else {
            Vec::new()
        };

        self.scanner.set_position(gt + 1);

        if !self_closing && is_raw_text_element(name) {
            self.raw_until = Some(name.to_ascii_lowercase());
        }

        Some(HtmlEvent::StartTag(StartTag {
            name,
            attributes,
            self_closing,
        }))
    }

    /// Read raw text up to the close tag of the given (lowercased) element
    /// Leaves the scanner at the '<' of the close tag
    fn read_raw_text(&mut self, name: &[u8]) -> Option<HtmlEvent<'a>> {
        let start = self.scanner.position();
        let mut search = start;
        let end = loop {
            match memmem::find(&self.input[search..], b"</") {
                Some(rel) => {
                    let at = search + rel;
                    let after = &self.input[at + 2..];
                    if after.len() >= name.len() && after[..name.len()].eq_ignore_ascii_case(name) {
                        match after.get(name.len()).copied() {
                            None | Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n')
                            | Some(b'\r') | Some(b'/') => break at,
                            _ => {}
                        }
                    }
                    search = at + 2;
                }
                None => break self.input.len(),
            }
        };
        self.scanner.set_position(end);
        if end == start {
            return None;
        }
        Some(HtmlEvent::RawText(Cow::Borrowed(&self.input[start..end])))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = HtmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}
