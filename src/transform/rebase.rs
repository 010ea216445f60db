//! Link Rebasing
//!
//! Rewrites root-relative hrefs so generated links stay correct when the
//! site is served from a subpath (e.g. /docs/ instead of /). Only hrefs
//! that start with '/' and do not already carry the base are touched;
//! absolute, protocol-relative, document-relative, fragment, and query
//! hrefs are left alone. Re-applying the transform changes nothing.

use crate::dom::{HtmlDocument, NodeId};
use crate::transform::Transform;
use crate::url::{classify, normalize_base, with_base, HrefKind};
use crate::visit::visit_elements;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

/// Rebased-href cache capacity
///
/// Docs sites repeat the same nav/sidebar hrefs on every page, so a small
/// cache covers nearly all rewrites across a build.
const HREF_CACHE_CAPACITY: usize = 256;

/// Rewrites root-relative anchor hrefs under a deployment base path
///
/// Constructed once per build with the configured base path (None means
/// unconfigured: every apply is a no-op). One instance may be shared
/// across pages and threads.
pub struct LinkRebaser {
    /// Normalized base path; None when rebasing is not configured
    base: Option<String>,
    /// href -> rebased href, shared across pages
    cache: Mutex<LruCache<String, String>>,
}

impl LinkRebaser {
    /// Create a rebaser for the given base path
    ///
    /// The base is normalized here, once: a missing leading '/' is added
    /// and a trailing '/' is stripped unless the base is exactly "/".
    pub fn new(base: Option<&str>) -> Self {
        let capacity = NonZeroUsize::new(HREF_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        LinkRebaser {
            base: base.map(normalize_base),
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Get the normalized base path, if configured
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Rebase one qualifying href, consulting the shared cache
    fn rebased(&self, base: &str, href: &str) -> String {
        // A poisoned cache only ever holds complete entries; keep using it
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(hit) = cache.get(href) {
            return hit.clone();
        }
        let rebased = with_base(base, href);
        cache.put(href.to_string(), rebased.clone());
        rebased
    }

    /// Check whether an element is a hyperlink
    fn is_hyperlink(doc: &HtmlDocument, id: NodeId) -> bool {
        doc.node_name(id).map_or(false, |name| {
            name.eq_ignore_ascii_case("a") || name.eq_ignore_ascii_case("area")
        })
    }
}

impl Transform for LinkRebaser {
    fn name(&self) -> &'static str {
        "rebase-links"
    }

    fn apply(&self, doc: &mut HtmlDocument) {
        // Unconfigured: whole-tree no-op, checked once
        let base = match &self.base {
            Some(base) => base.as_str(),
            None => return,
        };

        visit_elements(doc, |doc, id| {
            if !Self::is_hyperlink(doc, id) {
                return;
            }
            let href = match doc.get_attribute(id, "href") {
                Some(href) => href,
                None => return,
            };
            // Only root-relative hrefs not already under the base qualify
            if classify(href) != HrefKind::RootRelative || href.starts_with(base) {
                return;
            }
            let rebased = self.rebased(base, href);
            doc.set_attribute(id, "href", &rebased);
        });
    }
}
