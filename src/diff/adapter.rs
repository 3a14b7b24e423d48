//! Pluggable line differs.
//!
//! A [`LineDiffer`] turns two texts into classified lines. [`LcsDiffer`] wraps the
//! built-in algorithm and is always available; [`SimilarDiffer`] delegates to the
//! `similar` crate and normalizes its chunked output through [`classify_chunks`].

use super::compute::{LineNumbering, compute_diff_lines};
use super::split::split_lines;
use super::types::{ClassifiedLine, LineKind};
use crate::config::DiffConfig;
use similar::{ChangeTag, TextDiff};

pub trait LineDiffer: Send + Sync {
    /// Diff two texts. `None` or an empty result means "nothing usable", and the
    /// engine falls back to the built-in algorithm.
    fn diff_lines(
        &self,
        original: &str,
        modified: &str,
        config: &DiffConfig,
    ) -> Option<Vec<ClassifiedLine>>;
}

/// The built-in LCS differ
#[derive(Debug, Default, Clone, Copy)]
pub struct LcsDiffer;

impl LineDiffer for LcsDiffer {
    fn diff_lines(
        &self,
        original: &str,
        modified: &str,
        config: &DiffConfig,
    ) -> Option<Vec<ClassifiedLine>> {
        Some(compute_diff_lines(original, modified, config))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTag {
    Added,
    Removed,
    Unchanged,
}

/// A run of lines sharing one tag, as produced by chunk-based diff libraries.
/// `value` holds one or more `\n`-terminated lines; the last may lack its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffChunk {
    pub tag: ChunkTag,
    pub value: String,
}

impl DiffChunk {
    pub fn new(tag: ChunkTag, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }
}

/// Convert chunks into classified lines with the usual numbering scheme.
///
/// Each chunk's final `\n` terminates its last line rather than starting a new
/// one, so `"a\n"` is one line and `"\n"` is one empty line. The trailing-line
/// policy belongs to whoever split the whole texts, not to individual chunks.
pub fn classify_chunks(chunks: &[DiffChunk], config: &DiffConfig) -> Vec<ClassifiedLine> {
    let mut numbering = LineNumbering::new(config.line_number_start);
    let mut lines = Vec::new();

    for chunk in chunks {
        if chunk.value.is_empty() {
            continue;
        }
        let kind = match chunk.tag {
            ChunkTag::Added => LineKind::Add,
            ChunkTag::Removed => LineKind::Remove,
            ChunkTag::Unchanged => LineKind::Context,
        };
        let body = chunk.value.strip_suffix('\n').unwrap_or(&chunk.value);
        for text in body.split('\n') {
            let text = text.strip_suffix('\r').unwrap_or(text);
            lines.push(numbering.next(kind, text));
        }
    }

    lines
}

/// Differ backed by `similar`'s line diff
#[derive(Debug, Default, Clone, Copy)]
pub struct SimilarDiffer;

impl SimilarDiffer {
    /// Group `similar`'s per-line changes into tagged chunks.
    ///
    /// Both texts go through [`split_lines`] first, so line terminators and the
    /// trailing-line policy match the built-in algorithm.
    pub fn chunks(original: &str, modified: &str, config: &DiffConfig) -> Vec<DiffChunk> {
        let old = split_lines(original, config);
        let new = split_lines(modified, config);
        let diff = TextDiff::from_slices(&old, &new);
        let mut chunks: Vec<DiffChunk> = Vec::new();

        for change in diff.iter_all_changes() {
            let tag = match change.tag() {
                ChangeTag::Delete => ChunkTag::Removed,
                ChangeTag::Insert => ChunkTag::Added,
                ChangeTag::Equal => ChunkTag::Unchanged,
            };

            let line = format!("{}\n", change.value());
            match chunks.last_mut() {
                Some(last) if last.tag == tag => last.value.push_str(&line),
                _ => chunks.push(DiffChunk::new(tag, line)),
            }
        }

        chunks
    }
}

impl LineDiffer for SimilarDiffer {
    fn diff_lines(
        &self,
        original: &str,
        modified: &str,
        config: &DiffConfig,
    ) -> Option<Vec<ClassifiedLine>> {
        let chunks = Self::chunks(original, modified, config);
        if chunks.is_empty() {
            return None;
        }
        Some(classify_chunks(&chunks, config))
    }
}
