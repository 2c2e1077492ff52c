//! Markdown export of a review.

use review_history::{HistoryItem, ReviewKind};

/// `src/app/main.py` → `main.py.review.md`; `acme/widgets` (repo) → `widgets.review.md`.
pub fn export_file_name(path: &str) -> String {
    let base = path
        .trim()
        .trim_end_matches('/')
        .rsplit(['/', '\\'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("review");
    format!("{base}.review.md")
}

/// Markdown document for a recorded review.
pub fn render_markdown(item: &HistoryItem) -> String {
    let subject = match item.kind {
        ReviewKind::File => "File",
        ReviewKind::Repo => "Repository",
    };
    let mut s = format!(
        "# Code review: {}\n\n- {subject}: `{}`\n- Language: {}\n- Mode: {}\n- Date: {}\n\n",
        item.file_name,
        item.file_name,
        item.language,
        item.mode,
        item.timestamp.to_rfc3339()
    );
    s.push_str(item.feedback.trim_end());
    s.push('\n');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_basename() {
        assert_eq!(export_file_name("src/app/main.py"), "main.py.review.md");
        assert_eq!(export_file_name("main.py"), "main.py.review.md");
        assert_eq!(export_file_name("acme/widgets/"), "widgets.review.md");
        assert_eq!(export_file_name(""), "review.review.md");
    }

    #[test]
    fn markdown_contains_feedback_and_metadata() {
        let item = HistoryItem::new(
            ReviewKind::File,
            "src/lib.rs",
            "Rust",
            "security",
            "fn x() {}",
            "## Findings\nNone.\n\n",
        );
        let md = render_markdown(&item);
        assert!(md.starts_with("# Code review: src/lib.rs"));
        assert!(md.contains("- Mode: security"));
        assert!(md.ends_with("## Findings\nNone.\n"));
    }
}
