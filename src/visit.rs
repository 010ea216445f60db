//! Element Tree Traversal
//!
//! Worklist-based, document-order walks handing each element to a caller
//! callback. Transforms use these instead of hand-rolling their own walks;
//! the callback may mutate attributes on the node it is handed.

use crate::dom::{HtmlDocument, NodeId};

/// Visit every element node in document order
///
/// A node's children are recorded before the callback runs, so attribute
/// mutation during the walk is safe.
pub fn visit_elements<F>(doc: &mut HtmlDocument, mut f: F)
where
    F: FnMut(&mut HtmlDocument, NodeId),
{
    let mut stack: Vec<NodeId> = Vec::new();
    push_children_rev(doc, 0, &mut stack);

    while let Some(id) = stack.pop() {
        push_children_rev(doc, id, &mut stack);
        if doc.get_node(id).map_or(false, |n| n.is_element()) {
            f(doc, id);
        }
    }
}

/// Visit every element with the given tag name (ASCII case-insensitive)
pub fn visit_elements_named<F>(doc: &mut HtmlDocument, name: &str, mut f: F)
where
    F: FnMut(&mut HtmlDocument, NodeId),
{
    visit_elements(doc, |doc, id| {
        let matches = doc
            .node_name(id)
            .map_or(false, |n| n.eq_ignore_ascii_case(name));
        if matches {
            f(doc, id);
        }
    });
}

/// Push children onto the stack last-first so pops come out in document order
fn push_children_rev(doc: &HtmlDocument, id: NodeId, stack: &mut Vec<NodeId>) {
    let mut child = doc.get_node(id).and_then(|n| n.last_child);
    while let Some(cid) = child {
        stack.push(cid);
        child = doc.get_node(cid).and_then(|n| n.prev_sibling);
    }
}
