//! basehref - HTML post-processing for sites deployed under a subpath
//!
//! Stages:
//! A: Parse rendered HTML into an arena DOM (HtmlDocument::parse)
//! B: Transform the tree (LinkRebaser, CodeBlockTagger, Pipeline)
//! C: Serialize back to HTML (to_html)
//! D: Batch independent pages in parallel (apply_parallel)
//!
//! The reason this crate exists is the link rebaser: a site built for "/"
//! breaks when served from "/docs/" because every root-relative href still
//! points at the domain root. Running pages through a LinkRebaser fixes
//! exactly those hrefs and nothing else.

pub mod core;

pub mod dom;
pub mod mem;
pub mod serialize;
pub mod transform;
pub mod url;
pub mod visit;

pub use dom::{HtmlAttribute, HtmlDocument, HtmlNode, NodeId, NodeKind};
pub use serialize::to_html;
pub use transform::{apply_parallel, CodeBlockTagger, LinkRebaser, Pipeline, Transform};
pub use url::{classify, normalize_base, with_base, HrefKind};
pub use visit::{visit_elements, visit_elements_named};

/// Parse a page, rebase root-relative hrefs under the base path, serialize
///
/// The one-call form of the crate. A base of None leaves every href
/// untouched; the output is still serializer-normalized (quoting, entity
/// spellings).
pub fn rebase(html: &str, base: Option<&str>) -> String {
    let mut doc = HtmlDocument::parse(html);
    LinkRebaser::new(base).apply(&mut doc);
    to_html(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebase_page() {
        let html = "<!DOCTYPE html><html><body>\
                    <a href=\"/guide\">guide</a> \
                    <a href=\"https://example.com/x\">ext</a> \
                    <a href=\"#top\">top</a>\
                    </body></html>";
        let out = rebase(html, Some("/docs"));
        assert!(out.contains("href=\"/docs/guide\""));
        assert!(out.contains("href=\"https://example.com/x\""));
        assert!(out.contains("href=\"#top\""));
        assert!(out.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_rebase_without_base() {
        let out = rebase("<a href=\"/guide\">guide</a>", None);
        assert_eq!(out, "<a href=\"/guide\">guide</a>");
    }

    #[test]
    fn test_rebase_twice_stable() {
        let once = rebase("<a href=\"/guide\">guide</a>", Some("/docs"));
        let twice = rebase(&once, Some("/docs"));
        assert_eq!(once, twice);
    }
}
