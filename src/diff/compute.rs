use super::split::split_lines;
use super::types::{ClassifiedLine, LineKind};
use crate::config::DiffConfig;

/// Which algorithm produced an edit script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Minimal script from the LCS table
    Lcs,
    /// Index-by-index comparison, valid but not minimal
    Positional,
}

/// Edit operation before line numbers are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditOp<'a> {
    Equal(&'a str),
    Remove(&'a str),
    Add(&'a str),
}

/// Pick the algorithm for inputs of the given sizes.
///
/// The LCS table needs `|A| * |B|` cells, so anything above
/// `max_matrix_cells` takes the positional path.
pub fn select_strategy(old_len: usize, new_len: usize, config: &DiffConfig) -> Strategy {
    if old_len.saturating_mul(new_len) > config.max_matrix_cells {
        Strategy::Positional
    } else {
        Strategy::Lcs
    }
}

/// Compute the classified edit script turning `original` into `modified`
pub fn compute_diff_lines(
    original: &str,
    modified: &str,
    config: &DiffConfig,
) -> Vec<ClassifiedLine> {
    let old_lines = split_lines(original, config);
    let new_lines = split_lines(modified, config);
    diff_line_slices(&old_lines, &new_lines, config)
}

/// Same as [`compute_diff_lines`] for inputs that are already split
pub fn diff_line_slices(old: &[&str], new: &[&str], config: &DiffConfig) -> Vec<ClassifiedLine> {
    let ops = match select_strategy(old.len(), new.len(), config) {
        Strategy::Lcs => {
            let table = lcs_table(old, new);
            lcs_backtrack(&table, old, new)
        }
        Strategy::Positional => {
            tracing::debug!(
                old_lines = old.len(),
                new_lines = new.len(),
                max_cells = config.max_matrix_cells,
                "LCS table too large, using positional diff"
            );
            positional_ops(old, new)
        }
    };

    number_lines(&ops, config.line_number_start)
}

/// Build the LCS length table for two sequences of lines.
fn lcs_table(old: &[&str], new: &[&str]) -> Vec<Vec<usize>> {
    let m = old.len();
    let n = new.len();
    let mut table = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            if old[i - 1] == new[j - 1] {
                table[i][j] = table[i - 1][j - 1] + 1;
            } else {
                table[i][j] = table[i - 1][j].max(table[i][j - 1]);
            }
        }
    }

    table
}

/// Walk the LCS table backwards, then reverse into reading order.
///
/// On ties the walk steps over a removal before an addition. Since the walk
/// runs backwards, a replaced line therefore comes out as add-then-remove.
fn lcs_backtrack<'a>(table: &[Vec<usize>], old: &[&'a str], new: &[&'a str]) -> Vec<EditOp<'a>> {
    let mut ops = Vec::with_capacity(old.len() + new.len());
    let mut i = old.len();
    let mut j = new.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            ops.push(EditOp::Equal(old[i - 1]));
            i -= 1;
            j -= 1;
        } else if i > 0 && (j == 0 || table[i - 1][j] >= table[i][j - 1]) {
            ops.push(EditOp::Remove(old[i - 1]));
            i -= 1;
        } else {
            ops.push(EditOp::Add(new[j - 1]));
            j -= 1;
        }
    }

    ops.reverse();
    ops
}

/// Compare both sides index by index.
///
/// Linear in time and memory, but an insertion near the top makes every
/// following line show up as changed.
fn positional_ops<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<EditOp<'a>> {
    let len = old.len().max(new.len());
    let mut ops = Vec::with_capacity(len * 2);

    for i in 0..len {
        match (old.get(i).copied(), new.get(i).copied()) {
            (Some(a), Some(b)) if a == b => ops.push(EditOp::Equal(a)),
            (a, b) => {
                if let Some(a) = a {
                    ops.push(EditOp::Remove(a));
                }
                if let Some(b) = b {
                    ops.push(EditOp::Add(b));
                }
            }
        }
    }

    ops
}

fn number_lines(ops: &[EditOp<'_>], start: usize) -> Vec<ClassifiedLine> {
    let mut numbering = LineNumbering::new(start);
    ops.iter()
        .map(|op| match *op {
            EditOp::Equal(text) => numbering.next(LineKind::Context, text),
            EditOp::Remove(text) => numbering.next(LineKind::Remove, text),
            EditOp::Add(text) => numbering.next(LineKind::Add, text),
        })
        .collect()
}

/// Running old/new counters shared by every path that builds classified lines
pub(crate) struct LineNumbering {
    old: usize,
    new: usize,
}

impl LineNumbering {
    /// Line numbers are 1-based, so a start of 0 counts from 1
    pub(crate) fn new(start: usize) -> Self {
        let start = start.max(1);
        Self {
            old: start,
            new: start,
        }
    }

    pub(crate) fn next(&mut self, kind: LineKind, content: &str) -> ClassifiedLine {
        let line = match kind {
            LineKind::Context => ClassifiedLine::context(content, self.old, self.new),
            LineKind::Remove => ClassifiedLine::remove(content, self.old),
            LineKind::Add => ClassifiedLine::add(content, self.new),
        };
        if kind != LineKind::Add {
            self.old += 1;
        }
        if kind != LineKind::Remove {
            self.new += 1;
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lines: &[ClassifiedLine]) -> Vec<LineKind> {
        lines.iter().map(|l| l.kind).collect()
    }

    fn side(lines: &[ClassifiedLine], keep: LineKind) -> Vec<String> {
        lines
            .iter()
            .filter(|l| l.kind == LineKind::Context || l.kind == keep)
            .map(|l| l.content.to_string())
            .collect()
    }

    fn assert_strictly_increasing(numbers: impl Iterator<Item = usize>) {
        let numbers: Vec<usize> = numbers.collect();
        for pair in numbers.windows(2) {
            assert!(pair[0] < pair[1], "line numbers not increasing: {:?}", numbers);
        }
    }

    #[test]
    fn identical_input_is_all_context() {
        let text = "one\ntwo\nthree\n";
        let lines = compute_diff_lines(text, text, &DiffConfig::default());

        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.kind, LineKind::Context);
            assert_eq!(line.old_line_number, line.new_line_number);
        }
    }

    #[test]
    fn appended_line_is_numbered_on_new_side() {
        let original = "alpha\nbeta\ncharlie";
        let modified = format!("{}\ndelta", original);
        let lines = compute_diff_lines(original, &modified, &DiffConfig::default());

        let last = lines.last().unwrap();
        assert_eq!(last.kind, LineKind::Add);
        assert_eq!(&*last.content, "delta");
        assert_eq!(last.new_line_number, Some(4));
        assert_eq!(last.old_line_number, None);
    }

    #[test]
    fn replaced_line_comes_out_add_before_remove() {
        let lines = compute_diff_lines("a\nx\nc", "a\ny\nc", &DiffConfig::default());

        assert_eq!(
            kinds(&lines),
            vec![
                LineKind::Context,
                LineKind::Add,
                LineKind::Remove,
                LineKind::Context
            ]
        );
        assert_eq!(lines[1], ClassifiedLine::add("y", 2));
        assert_eq!(lines[2], ClassifiedLine::remove("x", 2));
        assert_eq!(lines[3], ClassifiedLine::context("c", 3, 3));
    }

    #[test]
    fn lcs_output_is_minimal_for_small_input() {
        let config = DiffConfig::default();
        let original = "a\nb\nc\nd\ne";
        let modified = "a\nc\nd\nx\ne";
        assert_eq!(select_strategy(5, 5, &config), Strategy::Lcs);

        let lines = compute_diff_lines(original, modified, &config);
        let changed = lines.iter().filter(|l| !l.is_context()).count();
        assert_eq!(changed, 2, "one removal and one addition");
        assert_eq!(lines[1], ClassifiedLine::remove("b", 2));
        assert_eq!(lines[4], ClassifiedLine::add("x", 4));
    }

    #[test]
    fn guard_trips_strictly_above_cell_limit() {
        let config = DiffConfig {
            max_matrix_cells: 12,
            ..DiffConfig::default()
        };
        assert_eq!(select_strategy(3, 4, &config), Strategy::Lcs);
        assert_eq!(select_strategy(4, 4, &config), Strategy::Positional);
        assert_eq!(select_strategy(usize::MAX, 2, &config), Strategy::Positional);
    }

    #[test]
    fn positional_fallback_pairs_by_index() {
        let config = DiffConfig {
            max_matrix_cells: 1,
            ..DiffConfig::default()
        };
        let lines = compute_diff_lines("a\nb\nc", "x\nb", &config);

        assert_eq!(
            lines,
            vec![
                ClassifiedLine::remove("a", 1),
                ClassifiedLine::add("x", 1),
                ClassifiedLine::context("b", 2, 2),
                ClassifiedLine::remove("c", 3),
            ]
        );
    }

    #[test]
    fn positional_fallback_is_not_minimal() {
        let config = DiffConfig {
            max_matrix_cells: 1,
            ..DiffConfig::default()
        };
        let lines = compute_diff_lines("b\nc", "a\nb\nc", &config);

        // A single insertion at the top shifts every line
        assert_eq!(lines.iter().filter(|l| l.is_context()).count(), 0);
        assert_eq!(side(&lines, LineKind::Remove), vec!["b", "c"]);
        assert_eq!(side(&lines, LineKind::Add), vec!["a", "b", "c"]);
    }

    #[test]
    fn both_sides_are_reconstructed() {
        let original = "fn main() {\n    a();\n    b();\n}\n";
        let modified = "fn main() {\n    b();\n    c();\n    d();\n}\n";
        for max_matrix_cells in [40_000, 1] {
            let config = DiffConfig {
                max_matrix_cells,
                ..DiffConfig::default()
            };
            let lines = compute_diff_lines(original, modified, &config);

            assert_eq!(side(&lines, LineKind::Remove), split_lines(original, &config));
            assert_eq!(side(&lines, LineKind::Add), split_lines(modified, &config));
            assert_strictly_increasing(lines.iter().filter_map(|l| l.old_line_number));
            assert_strictly_increasing(lines.iter().filter_map(|l| l.new_line_number));
        }
    }

    #[test]
    fn line_numbers_honor_configured_start() {
        let config = DiffConfig {
            line_number_start: 10,
            ..DiffConfig::default()
        };
        let lines = compute_diff_lines("a\nb", "a\nc", &config);

        assert_eq!(lines[0], ClassifiedLine::context("a", 10, 10));
        assert_eq!(lines[1], ClassifiedLine::add("c", 11));
        assert_eq!(lines[2], ClassifiedLine::remove("b", 11));
    }

    #[test]
    fn zero_start_is_clamped_to_one() {
        let config = DiffConfig {
            line_number_start: 0,
            ..DiffConfig::default()
        };
        let lines = compute_diff_lines("a\nb", "a\nc", &config);

        assert_eq!(lines[0], ClassifiedLine::context("a", 1, 1));
        assert_eq!(lines[1], ClassifiedLine::add("c", 2));
        assert_eq!(lines[2], ClassifiedLine::remove("b", 2));
    }

    #[test]
    fn empty_inputs_are_total() {
        let config = DiffConfig::default();
        assert_eq!(
            compute_diff_lines("", "", &config),
            vec![ClassifiedLine::context("", 1, 1)]
        );

        let lines = compute_diff_lines("", "x", &config);
        assert_eq!(side(&lines, LineKind::Remove), vec![""]);
        assert_eq!(side(&lines, LineKind::Add), vec!["x"]);
        assert!(diff_line_slices(&[], &[], &config).is_empty());
    }
}
