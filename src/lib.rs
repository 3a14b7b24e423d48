//! linediff library
//!
//! Line-level diffing with context folding, side-by-side row building, per-line
//! highlighting and accept/reject payloads.

pub mod action;
pub mod config;
pub mod constant;
pub mod diff;
pub mod highlight;

pub use action::{
    DiffAction, DiffActionData, DiffActionPayload, ViewMode, build_diff_action_payload,
};
pub use config::{ConfigError, DiffConfig};
pub use diff::{
    ClassifiedLine, DiffEngine, DiffResult, DiffStats, DisplayItem, Fold, LineKind, Row, RowKind,
    build_side_by_side_rows, compute_diff_lines, create_folded_diff, split_lines,
};
pub use highlight::{Highlighter, SyntectHighlighter, highlight_line, resolve_language_from_path};
