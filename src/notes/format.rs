//! Rendering of release note lines.
use tera::{Context, Tera};

use crate::{
    Result, forge::request::PullRequest, notes::scanner::ReleaseWindow,
};

/// Default note line: `   * <title> (#<number>, @<author>)`.
pub const DEFAULT_NOTE_TEMPLATE: &str =
    "   * {{ title }} (#{{ number }}, @{{ author }})";

const NOTE_TEMPLATE_NAME: &str = "note";

/// Renders one bullet line per pull request from a tera template. The
/// template sees `title`, `number` and `author`.
#[derive(Debug)]
pub struct NoteFormatter {
    tera: Tera,
}

impl NoteFormatter {
    pub fn new(template: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(NOTE_TEMPLATE_NAME, template)?;
        Ok(Self { tera })
    }

    /// Rendered line, newline terminated.
    pub fn render(&self, pr: &PullRequest) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", &pr.title);
        context.insert("number", &pr.number);
        context.insert("author", &pr.author);

        let mut line = self.tera.render(NOTE_TEMPLATE_NAME, &context)?;
        line.push('\n');
        Ok(line)
    }
}

/// Stable sort by merge time, oldest first. Unmerged PRs sort first.
pub fn sort_by_merge_time(prs: &mut [PullRequest]) {
    prs.sort_by_key(|pr| pr.merged_at);
}

/// Keeps PRs merged strictly inside the window, preserving order.
pub fn within_window(
    prs: Vec<PullRequest>,
    window: &ReleaseWindow,
) -> Vec<PullRequest> {
    prs.into_iter()
        .filter(|pr| pr.merged_at.is_some_and(|at| window.contains(at)))
        .collect()
}

/// Heading printed above the note lines.
pub fn header(window: &ReleaseWindow, base_branch: &str) -> String {
    format!(
        "Release notes for PRs between #{} and #{} against branch {:?}:",
        window.last, window.current, base_branch
    )
}
