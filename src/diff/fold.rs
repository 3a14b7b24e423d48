use super::types::{ClassifiedLine, DisplayItem, Fold};
use crate::config::DiffConfig;

/// Collapse long runs of context lines.
///
/// A run strictly longer than `fold_threshold` keeps `fold_context` lines on each
/// side and hides the rest behind a [`Fold`]. Changed lines are never folded.
pub fn create_folded_diff(lines: &[ClassifiedLine], config: &DiffConfig) -> Vec<DisplayItem> {
    let mut folder = Folder::new(config);

    for line in lines {
        if line.is_context() {
            folder.buffer.push(line);
        } else {
            folder.flush();
            folder.items.push(line.clone().into());
        }
    }
    folder.flush();

    folder.items
}

/// Replace the fold with the given id by its hidden lines.
///
/// Unknown ids leave the items unchanged.
pub fn expand_fold(items: &[DisplayItem], fold_id: usize) -> Vec<DisplayItem> {
    let mut expanded = Vec::with_capacity(items.len());
    for item in items {
        match item {
            DisplayItem::Fold(fold) if fold.id == fold_id => {
                expanded.extend(fold.hidden_lines.iter().cloned().map(DisplayItem::from));
            }
            other => expanded.push(other.clone()),
        }
    }
    expanded
}

struct Folder<'a> {
    threshold: usize,
    context: usize,
    next_id: usize,
    buffer: Vec<&'a ClassifiedLine>,
    items: Vec<DisplayItem>,
}

impl<'a> Folder<'a> {
    fn new(config: &DiffConfig) -> Self {
        Self {
            threshold: config.fold_threshold,
            context: config.fold_context,
            next_id: 0,
            buffer: Vec::new(),
            items: Vec::new(),
        }
    }

    fn flush(&mut self) {
        let run = std::mem::take(&mut self.buffer);
        if run.len() <= self.threshold {
            self.items.extend(run.into_iter().cloned().map(DisplayItem::from));
            return;
        }

        // Head and tail never overlap, even when fold_context is large for the threshold
        let head = self.context.min(run.len());
        let tail = self.context.min(run.len() - head);
        let hidden_end = run.len() - tail;

        let hidden_lines: Vec<ClassifiedLine> =
            run[head..hidden_end].iter().map(|&line| line.clone()).collect();

        self.items
            .extend(run[..head].iter().map(|&line| DisplayItem::from(line.clone())));
        self.items.push(DisplayItem::Fold(Fold {
            id: self.next_id,
            count: hidden_lines.len(),
            hidden_lines,
        }));
        self.items
            .extend(run[hidden_end..].iter().map(|&line| DisplayItem::from(line.clone())));
        self.next_id += 1;
    }
}
