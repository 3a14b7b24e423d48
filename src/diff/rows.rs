use super::types::{DisplayItem, FoldMarker, LineKind, Row, RowKind};
use crate::config::DiffConfig;

/// Group display items into rows for the side-by-side view.
///
/// A removed line is merged with the item exactly `pair_window` positions ahead
/// into a `Modify` row when that item is an added line. Nothing scans further,
/// so a run of removals followed by additions pairs at most once per window.
pub fn build_side_by_side_rows(items: &[DisplayItem], config: &DiffConfig) -> Vec<Row> {
    let mut rows = Vec::with_capacity(items.len());
    let mut i = 0usize;

    while i < items.len() {
        let line = match &items[i] {
            DisplayItem::Fold(fold) => {
                rows.push(Row {
                    id: row_id(RowKind::Fold, i),
                    kind: RowKind::Fold,
                    left: None,
                    right: None,
                    fold: Some(FoldMarker {
                        id: fold.id,
                        count: fold.count,
                    }),
                });
                i += 1;
                continue;
            }
            DisplayItem::Line { line } => line,
        };

        if line.kind == LineKind::Remove {
            let partner = i
                .checked_add(config.pair_window)
                .and_then(|j| items.get(j))
                .and_then(|item| item.line_of_kind(LineKind::Add));

            if let Some(added) = partner {
                rows.push(Row {
                    id: row_id(RowKind::Modify, i),
                    kind: RowKind::Modify,
                    left: Some(line.clone()),
                    right: Some(added.clone()),
                    fold: None,
                });
                i += config.pair_window + 1;
                continue;
            }
        }

        let (kind, left, right) = match line.kind {
            LineKind::Add => (RowKind::Add, None, Some(line.clone())),
            LineKind::Remove => (RowKind::Remove, Some(line.clone()), None),
            LineKind::Context => (RowKind::Context, Some(line.clone()), Some(line.clone())),
        };
        rows.push(Row {
            id: row_id(kind, i),
            kind,
            left,
            right,
            fold: None,
        });
        i += 1;
    }

    rows
}

fn row_id(kind: RowKind, position: usize) -> String {
    let prefix = match kind {
        RowKind::Context => "context",
        RowKind::Add => "add",
        RowKind::Remove => "remove",
        RowKind::Modify => "modify",
        RowKind::Fold => "fold",
    };
    format!("{}-{}", prefix, position)
}
