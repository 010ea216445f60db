//! String Interning Pool
//!
//! Efficient string storage with deduplication for element names,
//! attribute names, attribute values, and text content.
//!
//! Uses hash-based lookup to avoid storing duplicate string data. All
//! entries are owned by the pool: attribute values are rewritten after
//! parse, so nothing here may borrow the original input.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// String interning pool
///
/// Memory layout:
/// - `entries`: (offset, length) into `data` for each interned string ID
/// - `data`: flat buffer holding all string bytes
/// - `hash_index`: hash -> list of IDs (handles rare collisions)
#[derive(Debug, Default)]
pub struct StringPool {
    /// (offset, length) entries indexed by string ID
    entries: Vec<(u32, u32)>,
    /// Buffer for string bytes
    data: Vec<u8>,
    /// Hash of string content -> list of IDs with that hash
    hash_index: HashMap<u64, Vec<u32>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        let mut pool = StringPool {
            entries: Vec::with_capacity(256),
            data: Vec::with_capacity(4096),
            hash_index: HashMap::new(),
        };
        // Entry 0 is reserved for the empty string
        pool.entries.push((0, 0));
        pool
    }

    /// Compute hash of byte slice
    #[inline]
    fn compute_hash(s: &[u8]) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning its ID
    ///
    /// Duplicate content returns the existing ID.
    pub fn intern(&mut self, s: &[u8]) -> u32 {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);

        // Check for existing entry with same content
        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get(id) == Some(s) {
                    return id;
                }
            }
        }

        // Copy to data buffer
        let offset = self.data.len() as u32;
        let len = s.len() as u32;
        self.data.extend_from_slice(s);

        let id = self.entries.len() as u32;
        self.entries.push((offset, len));
        self.hash_index.entry(hash).or_default().push(id);

        id
    }

    /// Get a string by ID
    pub fn get(&self, id: u32) -> Option<&[u8]> {
        if id == 0 {
            return Some(b"");
        }
        let &(offset, len) = self.entries.get(id as usize)?;
        let start = offset as usize;
        let end = start + len as usize;
        if end <= self.data.len() {
            Some(&self.data[start..end])
        } else {
            None
        }
    }

    /// Get a string by ID as UTF-8 str
    pub fn get_str(&self, id: u32) -> Option<&str> {
        self.get(id).and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Get the number of unique strings stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1 // Entry 0 is reserved
    }

    /// Get total bytes used for string storage
    pub fn bytes_used(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern() {
        let mut pool = StringPool::new();
        let id = pool.intern(b"hello");
        assert!(id > 0);
        assert_eq!(pool.get(id), Some(b"hello" as &[u8]));
    }

    #[test]
    fn test_intern_duplicate() {
        let mut pool = StringPool::new();
        let id1 = pool.intern(b"hello");
        let id2 = pool.intern(b"hello");
        assert_eq!(id1, id2);
    }

    #[test]
    fn test_intern_different() {
        let mut pool = StringPool::new();
        let id1 = pool.intern(b"hello");
        let id2 = pool.intern(b"world");
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_empty_string() {
        let mut pool = StringPool::new();
        let id = pool.intern(b"");
        assert_eq!(id, 0);
        assert_eq!(pool.get(0), Some(b"" as &[u8]));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_get_str() {
        let mut pool = StringPool::new();
        let id = pool.intern(b"hello");
        assert_eq!(pool.get_str(id), Some("hello"));
    }
}
