use crate::catalog::{CatalogEntry, PatternCatalog};
use crate::detector::MatchSpan;
use crate::types::{Detection, LineRange};
use rayon::prelude::*;

/// Applies a catalog to file contents.
pub struct PatternMatcher<'a> {
    catalog: &'a PatternCatalog,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(catalog: &'a PatternCatalog) -> Self {
        Self { catalog }
    }

    /// Detections for one file, at most one per pattern, in catalog order.
    pub fn scan_file(&self, path: &str, content: &str) -> Vec<Detection> {
        self.catalog
            .entries()
            .iter()
            .filter(|entry| entry.applies_to(path))
            .filter_map(|entry| detect(entry, path, content))
            .collect()
    }

    /// Scan `(path, content)` pairs in parallel.
    ///
    /// The result is sorted by path, start line and pattern id, so it does not
    /// depend on how the work was scheduled.
    pub fn scan_files<P, C>(&self, files: &[(P, C)]) -> Vec<Detection>
    where
        P: AsRef<str> + Sync,
        C: AsRef<str> + Sync,
    {
        let mut detections: Vec<Detection> = files
            .par_iter()
            .flat_map_iter(|(path, content)| self.scan_file(path.as_ref(), content.as_ref()))
            .collect();

        sort_detections(&mut detections);
        log::info!(
            "Pattern scan: {} files, {} detections",
            files.len(),
            detections.len()
        );
        detections
    }
}

pub fn sort_detections(detections: &mut [Detection]) {
    detections.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

fn detect(entry: &CatalogEntry, path: &str, content: &str) -> Option<Detection> {
    let span = entry.detector().find(path, content)?;
    let definition = entry.definition();
    Some(Detection {
        file_path: path.to_string(),
        line_range: line_range_for(content, span),
        pattern_category: definition.id.clone(),
        confidence_score: definition.confidence_base,
        domain: definition.domain,
    })
}

/// 1-based lines covered by `span`; a trailing newline in the match does not
/// extend it onto the next line.
pub fn line_range_for(content: &str, span: MatchSpan) -> LineRange {
    let bytes = content.as_bytes();
    let start = span.start.min(bytes.len());
    let end = span.end.clamp(start, bytes.len());

    let start_line = count_newlines(&bytes[..start]) + 1;
    let matched = &bytes[start..end];
    let matched = matched.strip_suffix(b"\n").unwrap_or(matched);
    LineRange::new(start_line, start_line + count_newlines(matched))
}

fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|b| **b == b'\n').count()
}
