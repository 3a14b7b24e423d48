use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Context,
    Add,
    Remove,
}

/// One line of an edit script.
///
/// `Context` lines carry both line numbers, `Add` only the new one and
/// `Remove` only the old one. Numbers are 1-based by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedLine {
    pub kind: LineKind,
    pub content: Arc<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line_number: Option<usize>,
}

impl ClassifiedLine {
    pub fn context(content: impl Into<Arc<str>>, old: usize, new: usize) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line_number: Some(old),
            new_line_number: Some(new),
        }
    }

    pub fn add(content: impl Into<Arc<str>>, new: usize) -> Self {
        Self {
            kind: LineKind::Add,
            content: content.into(),
            old_line_number: None,
            new_line_number: Some(new),
        }
    }

    pub fn remove(content: impl Into<Arc<str>>, old: usize) -> Self {
        Self {
            kind: LineKind::Remove,
            content: content.into(),
            old_line_number: Some(old),
            new_line_number: None,
        }
    }

    pub fn is_context(&self) -> bool {
        self.kind == LineKind::Context
    }
}

/// A collapsed run of context lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fold {
    /// Unique within one folding pass, used as the expand/collapse key
    pub id: usize,
    pub count: usize,
    pub hidden_lines: Vec<ClassifiedLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayItem {
    Line { line: ClassifiedLine },
    Fold(Fold),
}

impl DisplayItem {
    pub fn as_line(&self) -> Option<&ClassifiedLine> {
        match self {
            DisplayItem::Line { line } => Some(line),
            DisplayItem::Fold(_) => None,
        }
    }

    /// The wrapped line, if it has the given kind
    pub fn line_of_kind(&self, kind: LineKind) -> Option<&ClassifiedLine> {
        self.as_line().filter(|line| line.kind == kind)
    }
}

impl From<ClassifiedLine> for DisplayItem {
    fn from(line: ClassifiedLine) -> Self {
        DisplayItem::Line { line }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Context,
    Add,
    Remove,
    Modify,
    Fold,
}

/// Reference from a fold row back to the fold it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldMarker {
    pub id: usize,
    pub count: usize,
}

/// One row of the side-by-side view.
///
/// `Modify` rows always hold a removed line on the left and an added line on
/// the right; `Fold` rows hold neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub kind: RowKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<ClassifiedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<ClassifiedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold: Option<FoldMarker>,
}
