//! Code Block Tagging
//!
//! Markdown renderers emit fenced code as <pre><code class="language-x">.
//! This transform lifts the language into a data-language attribute on the
//! code element and its enclosing pre, so highlighters and copy buttons
//! can target blocks without re-parsing class lists.

use crate::dom::HtmlDocument;
use crate::transform::Transform;
use crate::visit::visit_elements_named;

/// Tags code blocks with their fence language
pub struct CodeBlockTagger;

impl CodeBlockTagger {
    /// Extract the fence language from a class list
    fn language_of(class: &str) -> Option<&str> {
        class
            .split_ascii_whitespace()
            .find_map(|c| c.strip_prefix("language-"))
            .filter(|lang| !lang.is_empty())
    }
}

impl Transform for CodeBlockTagger {
    fn name(&self) -> &'static str {
        "tag-code-blocks"
    }

    fn apply(&self, doc: &mut HtmlDocument) {
        visit_elements_named(doc, "code", |doc, id| {
            let lang = match doc.get_attribute(id, "class").and_then(Self::language_of) {
                Some(lang) => lang.to_string(),
                None => return,
            };
            let parent = doc.get_node(id).and_then(|n| n.parent);

            doc.set_attribute(id, "data-language", &lang);

            if let Some(parent_id) = parent {
                let parent_is_pre = doc
                    .node_name(parent_id)
                    .map_or(false, |n| n.eq_ignore_ascii_case("pre"));
                if parent_is_pre {
                    doc.set_attribute(parent_id, "data-language", &lang);
                }
            }
        });
    }
}
