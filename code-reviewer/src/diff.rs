//! Line-level diff between original and revised code.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTag {
    Equal,
    Insert,
    Delete,
}

impl From<ChangeTag> for LineTag {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Equal => LineTag::Equal,
            ChangeTag::Insert => LineTag::Insert,
            ChangeTag::Delete => LineTag::Delete,
        }
    }
}

/// One line of the diff. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    pub tag: LineTag,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDiff {
    pub lines: Vec<DiffLine>,
    pub added: usize,
    pub removed: usize,
    /// Unified diff with 3 lines of context.
    pub unified: String,
}

impl LineDiff {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

pub fn line_diff(original: &str, revised: &str) -> LineDiff {
    let diff = TextDiff::from_lines(original, revised);

    let mut added = 0;
    let mut removed = 0;
    let lines: Vec<DiffLine> = diff
        .iter_all_changes()
        .map(|change| {
            match change.tag() {
                ChangeTag::Insert => added += 1,
                ChangeTag::Delete => removed += 1,
                ChangeTag::Equal => {}
            }
            DiffLine {
                tag: change.tag().into(),
                old_line: change.old_index().map(|i| i + 1),
                new_line: change.new_index().map(|i| i + 1),
                text: change.value().trim_end_matches(['\r', '\n']).to_string(),
            }
        })
        .collect();

    let unified = diff
        .unified_diff()
        .context_radius(3)
        .header("original", "revised")
        .to_string();

    LineDiff {
        lines,
        added,
        removed,
        unified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_inserted_and_removed_lines() {
        let d = line_diff("a\nb\nc\n", "a\nB\nc\nd\n");
        assert_eq!(d.added, 2);
        assert_eq!(d.removed, 1);
        assert!(!d.is_unchanged());

        let deleted = d.lines.iter().find(|l| l.tag == LineTag::Delete).unwrap();
        assert_eq!(deleted.text, "b");
        assert_eq!(deleted.old_line, Some(2));
        assert_eq!(deleted.new_line, None);

        assert!(d.unified.contains("-b"));
        assert!(d.unified.contains("+B"));
    }

    #[test]
    fn identical_text_is_unchanged() {
        let d = line_diff("x\ny\n", "x\ny\n");
        assert!(d.is_unchanged());
        assert_eq!(d.lines.len(), 2);
        assert!(d.lines.iter().all(|l| l.tag == LineTag::Equal));
    }
}
