//! Markdown summary of a changelog history.

use crate::diff::model::{Change, Changelog};

/// Render the changelog history as Markdown, newest run first
///
/// Inside one run, changes are listed by type, category and name. Structural
/// diffs are shown in fenced `diff` blocks under their change.
pub fn render_changelog_markdown(changelogs: &[Changelog]) -> String {
    if changelogs.iter().all(Changelog::is_empty) {
        return "_No changes recorded._\n".to_string();
    }

    let mut out = String::new();
    for changelog in changelogs.iter().rev().filter(|c| !c.is_empty()) {
        out.push_str(&format!(
            "### {}\n\n",
            changelog.date.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        let mut changes: Vec<&Change> = changelog.changes.iter().collect();
        changes.sort_by(|a, b| {
            a.change_type
                .as_str()
                .cmp(b.change_type.as_str())
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
                .then_with(|| a.name.cmp(&b.name))
        });

        for change in changes {
            out.push_str(&format!(
                "- **{}** {} `{}`",
                change.change_type, change.category, change.name
            ));
            if !change.details.is_empty() {
                out.push_str(&format!(": {}", change.details));
            }
            out.push('\n');
            if !change.diff.is_empty() {
                out.push_str("\n  ```diff\n");
                for line in change.diff.lines() {
                    out.push_str(&format!("  {}\n", line));
                }
                out.push_str("  ```\n\n");
            }
        }
        out.push('\n');
    }

    out
}
