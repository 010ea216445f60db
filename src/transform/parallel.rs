//! Parallel Batch Application
//!
//! Uses Rayon to apply one pipeline to many pages concurrently. Each page
//! owns its own document and the pipeline's transforms are Sync, so there
//! is no shared mutable state between tasks.

use crate::dom::HtmlDocument;
use crate::transform::Pipeline;
use rayon::prelude::*;

/// Apply a pipeline to every document in parallel
///
/// Equivalent to running the pipeline over each document sequentially;
/// only the wall-clock time differs.
pub fn apply_parallel(pipeline: &Pipeline, docs: &mut [HtmlDocument]) {
    docs.par_iter_mut().for_each(|doc| pipeline.run(doc));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::to_html;
    use crate::transform::{CodeBlockTagger, LinkRebaser};

    fn page(i: usize) -> String {
        format!(
            "<nav><a href=\"/guide\">guide</a><a href=\"/page/{i}\">p{i}</a></nav>\
             <pre><code class=\"language-rust\">let x = {i};</code></pre>"
        )
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Box::new(LinkRebaser::new(Some("/docs"))));
        pipeline.push(Box::new(CodeBlockTagger));

        let pages: Vec<String> = (0..16).map(page).collect();

        let mut sequential: Vec<HtmlDocument> =
            pages.iter().map(|p| HtmlDocument::parse(p)).collect();
        for doc in &mut sequential {
            pipeline.run(doc);
        }

        let mut parallel: Vec<HtmlDocument> =
            pages.iter().map(|p| HtmlDocument::parse(p)).collect();
        apply_parallel(&pipeline, &mut parallel);

        for (a, b) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(to_html(a), to_html(b));
        }
    }

    #[test]
    fn test_parallel_rebases_every_page() {
        let mut pipeline = Pipeline::new();
        pipeline.push(Box::new(LinkRebaser::new(Some("/docs"))));

        let pages: Vec<String> = (0..8).map(page).collect();
        let mut docs: Vec<HtmlDocument> = pages.iter().map(|p| HtmlDocument::parse(p)).collect();
        apply_parallel(&pipeline, &mut docs);

        for doc in &docs {
            assert!(to_html(doc).contains("href=\"/docs/guide\""));
        }
    }
}
