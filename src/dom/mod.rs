//! DOM Module - Arena-based HTML Document
//!
//! Implements an efficient DOM representation using:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for element/attribute names and values
//! - In-place attribute mutation for transforms

pub mod document;
pub mod node;
pub mod strings;

pub use document::HtmlDocument;
pub use node::{is_void_element, HtmlAttribute, HtmlNode, NodeId, NodeKind};
pub use strings::StringPool;
