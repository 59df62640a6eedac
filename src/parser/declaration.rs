use super::{DeclarationHeader, ElementKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Modifier run, optional second `static`, optional return type, name,
/// flat parameter list, optional `{` or `;`.
static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*(?:static|public|private|protected|internal|void)",
        r"\s+(?:static\s+)?",
        r"(?:[\w<>\[\]]+\s+)?",
        r"(?P<name>\w+)",
        r"\s*\([^)]*\)",
        r"\s*(?:\{|;)?",
    ))
    .expect("declaration pattern is valid")
});

/// Decide whether a trimmed line opens a function-like declaration.
///
/// Purely textual: keywords inside strings or comments match too, and a
/// header split over several lines is never recognized.
pub fn classify(line: &str) -> Option<DeclarationHeader> {
    let captures = DECLARATION.captures(line)?;
    let name = captures.name("name")?.as_str().to_string();
    let header_end = captures.get(0).map_or(0, |m| m.end());

    Some(DeclarationHeader {
        name,
        kind: ElementKind::Function,
        header_end,
    })
}
