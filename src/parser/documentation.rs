const DOC_MARKER: &str = "///";

/// Collect the `///` block directly above `decl_index`.
///
/// Walks upward and stops at the first line that is not a doc comment,
/// blank lines included. Returns the trimmed lines joined with `\n`.
pub fn scan_documentation<S: AsRef<str>>(lines: &[S], decl_index: usize) -> String {
    let start = lines[..decl_index.min(lines.len())]
        .iter()
        .rposition(|line| !line.as_ref().trim().starts_with(DOC_MARKER))
        .map_or(0, |i| i + 1);

    lines[start..decl_index.min(lines.len())]
        .iter()
        .map(|line| line.as_ref().trim())
        .collect::<Vec<_>>()
        .join("\n")
}
