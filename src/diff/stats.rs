use super::types::{ClassifiedLine, LineKind};
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub added_count: usize,
    pub removed_count: usize,
    pub unchanged_count: usize,
}

impl DiffStats {
    /// Count added, removed and unchanged lines
    pub fn from_lines(lines: &[ClassifiedLine]) -> Self {
        let mut stats = DiffStats::default();
        for line in lines {
            match line.kind {
                LineKind::Add => stats.added_count += 1,
                LineKind::Remove => stats.removed_count += 1,
                LineKind::Context => stats.unchanged_count += 1,
            }
        }
        stats
    }

    pub fn has_changes(&self) -> bool {
        self.added_count > 0 || self.removed_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_kind() {
        let lines = vec![
            ClassifiedLine::context("a", 1, 1),
            ClassifiedLine::add("b", 2),
            ClassifiedLine::add("c", 3),
            ClassifiedLine::remove("d", 2),
        ];
        let stats = DiffStats::from_lines(&lines);

        assert_eq!(stats.added_count, 2);
        assert_eq!(stats.removed_count, 1);
        assert_eq!(stats.unchanged_count, 1);
        assert!(stats.has_changes());
    }

    #[test]
    fn context_only_has_no_changes() {
        let lines = vec![ClassifiedLine::context("a", 1, 1)];
        assert!(!DiffStats::from_lines(&lines).has_changes());
        assert!(!DiffStats::from_lines(&[]).has_changes());
    }
}
