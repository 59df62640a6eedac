pub mod body;
pub mod code_parser;
pub mod declaration;
pub mod documentation;

use serde::Serialize;
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

/// A function-like unit extracted from a source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceElement {
    pub name: String,
    pub kind: ElementKind,
    pub enclosing_type: String,
    pub documentation: String,
    pub body_text: String,
    pub referenced_names: HashSet<String>,
}

impl SourceElement {
    /// Human-readable dump used for diagnostics
    pub fn transcript(&self) -> String {
        let mut out = format!("\n{}: {}\n", self.kind.label(), self.name);
        if !self.documentation.is_empty() {
            out.push_str("\nXML Comment:\n");
            out.push_str(&self.documentation);
            out.push('\n');
        }
        out.push_str("\nCode:\n");
        out.push_str(&self.body_text);
        if !self.body_text.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&"-".repeat(30));
        out
    }
}

/// Type of extracted element. The line matcher only produces `Function`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Function,
    Field,
    Class,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Function => "function",
            ElementKind::Field => "field",
            ElementKind::Class => "class",
        }
    }

    /// Capitalized tag for headings
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Function => "Function",
            ElementKind::Field => "Field",
            ElementKind::Class => "Class",
        }
    }
}

/// A line recognized as the start of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationHeader {
    pub name: String,
    pub kind: ElementKind,
    /// Byte offset, within the trimmed line, just past the matched header
    pub header_end: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read source file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            ParseError::FileAccess { path, .. } => path,
        }
    }
}
