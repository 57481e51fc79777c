//! Unified diffs of proposed changes, with terminal coloring.

use console::Style;
use similar::TextDiff;

const CONTEXT_LINES: usize = 3;

/// Unified diff from `original` to `replacement`, one entry per output line.
///
/// Lines carry no trailing newline. Identical inputs produce no lines.
pub fn unified_diff(original: &str, replacement: &str) -> Vec<String> {
    let diff = TextDiff::from_lines(original, replacement);
    let rendered = diff
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header("original", "replacement")
        .to_string();
    rendered.lines().map(str::to_string).collect()
}

/// Color each diff line by its prefix without changing its text.
///
/// File headers are blue, hunk markers magenta, additions green and
/// deletions red. Everything else is passed through.
pub fn colorize(lines: &[String]) -> Vec<String> {
    let header = Style::new().blue().force_styling(true);
    let hunk = Style::new().magenta().force_styling(true);
    let added = Style::new().green().force_styling(true);
    let removed = Style::new().red().force_styling(true);

    lines
        .iter()
        .map(|line| {
            let style = match LineClass::of(line) {
                LineClass::Header => &header,
                LineClass::Hunk => &hunk,
                LineClass::Added => &added,
                LineClass::Removed => &removed,
                LineClass::Other => return line.clone(),
            };
            style.apply_to(line).to_string()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Header,
    Hunk,
    Added,
    Removed,
    Other,
}

impl LineClass {
    fn of(line: &str) -> Self {
        if line.starts_with("+++") || line.starts_with("---") {
            LineClass::Header
        } else if line.starts_with("@@") {
            LineClass::Hunk
        } else if line.starts_with('+') {
            LineClass::Added
        } else if line.starts_with('-') {
            LineClass::Removed
        } else {
            LineClass::Other
        }
    }
}
