//! HTML Document - Arena-based DOM representation
//!
//! Efficient DOM storage with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - String interning for names, text, and attribute values
//! - In-place attribute mutation for tree transforms
//!
//! Parsing is lenient and total: rendered-output HTML always produces a
//! document. Void elements take no children, an end tag closes the nearest
//! matching open element, and anything left open is closed at end of input.

use super::node::{is_void_element, HtmlAttribute, HtmlNode, NodeId, NodeKind};
use super::strings::StringPool;
use crate::core::tokenizer::{HtmlEvent, StartTag, Tokenizer};

/// An HTML document stored in arena format
pub struct HtmlDocument {
    /// Arena of nodes (node 0 is the document root)
    nodes: Vec<HtmlNode>,
    /// Arena of attributes
    attributes: Vec<HtmlAttribute>,
    /// Interned strings
    pub strings: StringPool,
    /// Root element node ID (not document node)
    root_element: Option<NodeId>,
}

impl HtmlDocument {
    /// Parse an HTML document (lenient; never fails)
    pub fn parse(input: &str) -> Self {
        let mut doc = HtmlDocument {
            nodes: Vec::with_capacity(256),
            attributes: Vec::with_capacity(128),
            strings: StringPool::new(),
            root_element: None,
        };

        // Create document root node
        doc.nodes.push(HtmlNode::document());

        doc.build_from_events(input.as_bytes());

        doc
    }

    /// Build DOM from tokenizer events
    fn build_from_events(&mut self, input: &[u8]) {
        let mut tokenizer = Tokenizer::new(input);
        let mut stack: Vec<NodeId> = vec![0]; // Start with document node

        while let Some(event) = tokenizer.next_event() {
            match event {
                HtmlEvent::StartTag(tag) => {
                    self.handle_start_tag(tag, &mut stack);
                }

                HtmlEvent::EndTag { name } => {
                    // Close the nearest matching open element, implicitly
                    // closing anything opened inside it; unmatched end tags
                    // are ignored
                    let matched = stack.iter().rposition(|&id| {
                        id != 0
                            && self
                                .node_name(id)
                                .map_or(false, |n| n.as_bytes().eq_ignore_ascii_case(name))
                    });
                    if let Some(pos) = matched {
                        stack.truncate(pos);
                    }
                }

                HtmlEvent::Text(content) => {
                    let parent_id = *stack.last().unwrap_or(&0);
                    let depth = stack.len() as u16;

                    let text_id = self.strings.intern(content.as_ref());
                    let node = HtmlNode::text(text_id, Some(parent_id), depth);

                    let node_id = self.nodes.len() as NodeId;
                    self.nodes.push(node);
                    self.link_child(parent_id, node_id);
                }

                HtmlEvent::RawText(content) => {
                    let parent_id = *stack.last().unwrap_or(&0);
                    let depth = stack.len() as u16;

                    let text_id = self.strings.intern(content.as_ref());
                    let node = HtmlNode::raw_text(text_id, Some(parent_id), depth);

                    let node_id = self.nodes.len() as NodeId;
                    self.nodes.push(node);
                    self.link_child(parent_id, node_id);
                }

                HtmlEvent::Comment(content) => {
                    let parent_id = *stack.last().unwrap_or(&0);
                    let depth = stack.len() as u16;

                    let text_id = self.strings.intern(content.as_ref());
                    let node = HtmlNode::comment(text_id, Some(parent_id), depth);

                    let node_id = self.nodes.len() as NodeId;
                    self.nodes.push(node);
                    self.link_child(parent_id, node_id);
                }

                HtmlEvent::Doctype(content) => {
                    let parent_id = *stack.last().unwrap_or(&0);
                    let depth = stack.len() as u16;

                    let text_id = self.strings.intern(content.as_ref());
                    let node = HtmlNode::doctype(text_id, Some(parent_id), depth);

                    let node_id = self.nodes.len() as NodeId;
                    self.nodes.push(node);
                    self.link_child(parent_id, node_id);
                }
            }
        }
        // Anything still open is implicitly closed at end of input
    }

    /// Handle a start tag event
    fn handle_start_tag(&mut self, tag: StartTag<'_>, stack: &mut Vec<NodeId>) {
        let parent_id = *stack.last().unwrap_or(&0);
        let depth = stack.len() as u16;

        // Intern element name
        let name_id = self.strings.intern(tag.name);

        let mut node = HtmlNode::element(name_id, Some(parent_id), depth);

        // Store attributes
        let attr_start = self.attributes.len() as u32;
        for attr in &tag.attributes {
            let attr_name_id = self.strings.intern(attr.name);
            let attr_value_id = self.strings.intern(attr.value.as_ref());
            self.attributes
                .push(HtmlAttribute::new(attr_name_id, attr_value_id));
        }
        node.attr_start = attr_start;
        node.attr_count = tag.attributes.len().min(u16::MAX as usize) as u16;

        // Add node to arena and link to parent
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        self.link_child(parent_id, node_id);

        // Track root element
        if self.root_element.is_none() && parent_id == 0 {
            self.root_element = Some(node_id);
        }

        let is_void = std::str::from_utf8(tag.name).map_or(false, is_void_element);
        if !tag.self_closing && !is_void {
            stack.push(node_id);
        }
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            // Link to previous sibling
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            // First child
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Get the document root node (index 0)
    pub fn document_node(&self) -> &HtmlNode {
        &self.nodes[0]
    }

    /// Get root element ID
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&HtmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get element name as string
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.is_element() {
            self.strings.get_str(node.name_id)
        } else {
            None
        }
    }

    /// Get text payload of a non-element node (text, raw text, comment, doctype)
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind {
            NodeKind::Text | NodeKind::RawText | NodeKind::Comment | NodeKind::Doctype => {
                self.strings.get_str(node.name_id)
            }
            _ => None,
        }
    }

    /// Get attributes for an element
    pub fn attributes(&self, id: NodeId) -> &[HtmlAttribute] {
        if let Some(node) = self.get_node(id) {
            let start = node.attr_start as usize;
            let end = start + node.attr_count as usize;
            if end <= self.attributes.len() {
                &self.attributes[start..end]
            } else {
                &[]
            }
        } else {
            &[]
        }
    }

    /// Get attribute value by name (names compared ASCII case-insensitively)
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        for attr in self.attributes(node_id) {
            let attr_name = self.strings.get_str(attr.name_id)?;
            if attr_name.eq_ignore_ascii_case(name) {
                return self.strings.get_str(attr.value_id);
            }
        }
        None
    }

    /// Get all attribute names and values for a node
    pub fn get_attribute_values(&self, node_id: NodeId) -> Vec<(&str, &str)> {
        self.attributes(node_id)
            .iter()
            .filter_map(|attr| {
                let name = self.strings.get_str(attr.name_id)?;
                let value = self.strings.get_str(attr.value_id)?;
                Some((name, value))
            })
            .collect()
    }

    /// Set an attribute on an element
    ///
    /// An existing attribute (name compared ASCII case-insensitively) has
    /// its value replaced in place. A new attribute is added by relocating
    /// the element's attribute block to the end of the arena; the old block
    /// becomes garbage, which is fine for a per-page arena.
    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: &str) {
        let (start, count) = match self.get_node(node_id) {
            Some(node) if node.is_element() => {
                (node.attr_start as usize, node.attr_count as usize)
            }
            _ => return,
        };

        let value_id = self.strings.intern(value.as_bytes());

        // In-place swap when the name already exists
        for i in start..start + count {
            let matches = self
                .strings
                .get_str(self.attributes[i].name_id)
                .map_or(false, |n| n.eq_ignore_ascii_case(name));
            if matches {
                self.attributes[i].value_id = value_id;
                return;
            }
        }

        // Absent: relocate the block to the arena tail and append
        let name_id = self.strings.intern(name.as_bytes());
        let new_start = self.attributes.len() as u32;
        for i in start..start + count {
            let attr = self.attributes[i];
            self.attributes.push(attr);
        }
        self.attributes.push(HtmlAttribute::new(name_id, value_id));

        if let Some(node) = self.nodes.get_mut(node_id as usize) {
            if node.attr_count == u16::MAX {
                return;
            }
            node.attr_start = new_start;
            node.attr_count += 1;
        }
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over all descendants of a node (depth-first, document order)
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d HtmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'d> {
    doc: &'d HtmlDocument,
    stack: Vec<NodeId>,
}

impl<'d> Iterator for DescendantIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Add children to stack in reverse order (so first child is processed first)
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = HtmlDocument::parse("<html><body>hello</body></html>");
        assert_eq!(doc.document_node().kind, NodeKind::Document);
        assert!(doc.root_element_id().is_some());
        assert_eq!(doc.node_name(doc.root_element_id().unwrap()), Some("html"));
    }

    #[test]
    fn test_parse_nested() {
        let doc = HtmlDocument::parse("<main><nav><a href=\"/\">x</a></nav></main>");
        let root = doc.root_element_id().unwrap();
        let children: Vec<_> = doc.children(root).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.node_name(children[0]), Some("nav"));
    }

    #[test]
    fn test_descendants() {
        let doc = HtmlDocument::parse("<div><p></p><ul><li></li></ul></div>");
        let root = doc.root_element_id().unwrap();
        let descendants: Vec<_> = doc.descendants(root).collect();
        // p, ul, li
        assert_eq!(descendants.len(), 3);
    }

    #[test]
    fn test_void_element_siblings() {
        let doc = HtmlDocument::parse("<p>one<br>two</p>");
        let p = doc.root_element_id().unwrap();
        let children: Vec<_> = doc.children(p).collect();
        assert_eq!(children.len(), 3);
        assert_eq!(doc.text_content(children[0]), Some("one"));
        assert_eq!(doc.node_name(children[1]), Some("br"));
        assert_eq!(doc.text_content(children[2]), Some("two"));
    }

    #[test]
    fn test_implicit_close_at_eof() {
        let doc = HtmlDocument::parse("<div><p>unclosed");
        let div = doc.root_element_id().unwrap();
        let children: Vec<_> = doc.children(div).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.node_name(children[0]), Some("p"));
    }

    #[test]
    fn test_mismatched_end_tag_ignored() {
        // </span> never opened; must not panic or derail the tree
        let doc = HtmlDocument::parse("<div>a</span>b</div>");
        let div = doc.root_element_id().unwrap();
        let texts: Vec<_> = doc
            .children(div)
            .filter_map(|id| doc.text_content(id))
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_end_tag_closes_through() {
        // </ul> implicitly closes the open <li>
        let doc = HtmlDocument::parse("<ul><li>one</ul><p>after</p>");
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("ul"));
        let doc_children: Vec<_> = doc.children(0).collect();
        assert_eq!(doc_children.len(), 2);
        assert_eq!(doc.node_name(doc_children[1]), Some("p"));
    }

    #[test]
    fn test_get_attribute() {
        let doc = HtmlDocument::parse("<a href=\"/guide\" class=\"x\">go</a>");
        let a = doc.root_element_id().unwrap();
        assert_eq!(doc.get_attribute(a, "href"), Some("/guide"));
        assert_eq!(doc.get_attribute(a, "HREF"), Some("/guide"));
        assert_eq!(doc.get_attribute(a, "rel"), None);
    }

    #[test]
    fn test_set_attribute_existing() {
        let mut doc = HtmlDocument::parse("<a href=\"/guide\" class=\"x\">go</a>");
        let a = doc.root_element_id().unwrap();
        doc.set_attribute(a, "href", "/docs/guide");
        assert_eq!(doc.get_attribute(a, "href"), Some("/docs/guide"));
        // Other attributes untouched
        assert_eq!(doc.get_attribute(a, "class"), Some("x"));
        assert_eq!(doc.attributes(a).len(), 2);
    }

    #[test]
    fn test_set_attribute_new() {
        let mut doc = HtmlDocument::parse("<code class=\"language-rust\">x</code>");
        let code = doc.root_element_id().unwrap();
        doc.set_attribute(code, "data-language", "rust");
        assert_eq!(doc.get_attribute(code, "data-language"), Some("rust"));
        assert_eq!(doc.get_attribute(code, "class"), Some("language-rust"));
        assert_eq!(doc.attributes(code).len(), 2);
    }

    #[test]
    fn test_set_attribute_on_text_is_noop() {
        let mut doc = HtmlDocument::parse("<p>text</p>");
        let p = doc.root_element_id().unwrap();
        let text = doc.children(p).next().unwrap();
        doc.set_attribute(text, "href", "/x");
        assert_eq!(doc.attributes(text).len(), 0);
    }

    #[test]
    fn test_doctype_node() {
        let doc = HtmlDocument::parse("<!DOCTYPE html><html></html>");
        let children: Vec<_> = doc.children(0).collect();
        assert_eq!(children.len(), 2);
        assert_eq!(
            doc.get_node(children[0]).map(|n| n.kind),
            Some(NodeKind::Doctype)
        );
        assert_eq!(doc.node_name(children[1]), Some("html"));
    }
}
