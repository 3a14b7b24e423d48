//! Line diff pipeline.
//!
//! Text is split into lines, diffed into a classified edit script, folded into
//! display items and, for the split view, grouped into side-by-side rows.
//! [`DiffEngine`] wires the stages together with optional host capabilities.

mod adapter;
mod compute;
mod fold;
mod rows;
mod split;
mod stats;
mod types;

pub use adapter::{ChunkTag, DiffChunk, LcsDiffer, LineDiffer, SimilarDiffer, classify_chunks};
pub use compute::{Strategy, compute_diff_lines, diff_line_slices, select_strategy};
pub use fold::{create_folded_diff, expand_fold};
pub use rows::build_side_by_side_rows;
pub use split::split_lines;
pub use stats::DiffStats;
pub use types::{ClassifiedLine, DisplayItem, Fold, FoldMarker, LineKind, Row, RowKind};

use crate::config::DiffConfig;
use crate::highlight::{Highlighter, highlight_line};
use serde::Serialize;

/// Everything the presentation layer needs for one comparison
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub lines: Vec<ClassifiedLine>,
    pub items: Vec<DisplayItem>,
    pub stats: DiffStats,
}

/// Composition root for the pipeline.
///
/// Holds the config and the optional differ and highlighter chosen by the caller.
/// Calls share no mutable state, so one engine can serve many threads.
pub struct DiffEngine {
    config: DiffConfig,
    differ: Option<Box<dyn LineDiffer>>,
    highlighter: Option<Box<dyn Highlighter>>,
}

impl DiffEngine {
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            differ: None,
            highlighter: None,
        }
    }

    pub fn with_differ(mut self, differ: impl LineDiffer + 'static) -> Self {
        self.differ = Some(Box::new(differ));
        self
    }

    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Some(Box::new(highlighter));
        self
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff with the configured differ, falling back to the built-in algorithm
    pub fn diff_lines(&self, original: &str, modified: &str) -> Vec<ClassifiedLine> {
        if let Some(differ) = &self.differ {
            match differ.diff_lines(original, modified, &self.config) {
                Some(lines) if !lines.is_empty() => return lines,
                _ => tracing::debug!("Differ returned nothing usable, using built-in diff"),
            }
        }
        compute_diff_lines(original, modified, &self.config)
    }

    pub fn compute(&self, original: &str, modified: &str) -> DiffResult {
        let lines = self.diff_lines(original, modified);
        let items = create_folded_diff(&lines, &self.config);
        let stats = DiffStats::from_lines(&lines);
        DiffResult {
            lines,
            items,
            stats,
        }
    }

    pub fn side_by_side(&self, result: &DiffResult) -> Vec<Row> {
        build_side_by_side_rows(&result.items, &self.config)
    }

    pub fn highlight(&self, line: &str, language: &str) -> String {
        highlight_line(line, language, &self.config, self.highlighter.as_deref())
    }
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(DiffConfig::default())
    }
}
