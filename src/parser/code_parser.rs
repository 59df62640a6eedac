use super::body::extract_body;
use super::declaration::classify;
use super::documentation::scan_documentation;
use super::{ParseError, SourceElement};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-file results of a batch parse. Failed files are kept in
/// `failures` and never abort the batch.
#[derive(Debug, Default)]
pub struct ParsedFiles {
    pub files: BTreeMap<String, Vec<SourceElement>>,
    pub failures: Vec<ParseError>,
}

impl ParsedFiles {
    pub fn element_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }
}

/// Line-oriented structural parser for C-family sources
///
/// Stateless between calls; one instance can parse any number of files.
#[derive(Debug, Clone, Default)]
pub struct CodeParser;

impl CodeParser {
    pub fn new() -> Self {
        Self
    }

    /// Read a file and extract its elements in file order
    pub fn parse_file(&self, file_path: &Path) -> Result<Vec<SourceElement>, ParseError> {
        let content = std::fs::read_to_string(file_path).map_err(|source| {
            ParseError::FileAccess {
                path: file_path.to_path_buf(),
                source,
            }
        })?;

        Ok(self.parse_source(&enclosing_type(file_path), &content))
    }

    /// Extract elements from in-memory source text
    pub fn parse_source(&self, enclosing_type: &str, content: &str) -> Vec<SourceElement> {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();
        let mut elements = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let raw = lines[i];
            let trimmed = raw.trim();
            let Some(header) = classify(trimmed) else {
                i += 1;
                continue;
            };

            // Header offsets are relative to the trimmed line
            let indent = raw.len() - raw.trim_start().len();
            let documentation = scan_documentation(&lines, i);
            let body = extract_body(&lines, i, indent + header.header_end);

            if body.reached_eof {
                tracing::debug!(
                    "Body of {} never closed, consumed to end of file",
                    header.name
                );
            }

            let element = SourceElement {
                name: header.name,
                kind: header.kind,
                enclosing_type: enclosing_type.to_string(),
                documentation,
                body_text: body.text,
                referenced_names: body.calls,
            };
            tracing::debug!("{}", element.transcript());

            elements.push(element);
            i = body.end;
        }

        elements
    }

    /// Parse every path independently, isolating per-file failures.
    ///
    /// Entries whose keys collide overwrite earlier ones.
    pub fn parse_files<P: AsRef<Path>>(&self, paths: &[P]) -> ParsedFiles {
        let mut parsed = ParsedFiles::default();

        for path in paths {
            let path = path.as_ref();
            match self.parse_file(path) {
                Ok(elements) => {
                    let key = file_key(path);
                    if parsed.files.insert(key.clone(), elements).is_some() {
                        tracing::warn!("Duplicate file key {}, replaced by {:?}", key, path);
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {:?}: {}", path, e);
                    parsed.failures.push(e);
                }
            }
        }

        parsed
    }
}

/// Base name truncated at its first period (`Foo.Designer.cs` -> `Foo`)
pub fn file_key(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

fn enclosing_type(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ElementKind;
    use std::collections::HashSet;

    const CALCULATOR: &str = "\
using System;

public class Calculator
{
    /// <summary>Adds two numbers.</summary>
    public int Add(int a, int b) {
        return Helper(a) + b;
    }

    private int Helper(int x)
    {
        if (x > 0) {
            return Math.Abs(x);
        }
        return x;
    }

    public static void Main(string[] args) { Console.WriteLine(Add(1, 2)); }
}
";

    #[test]
    fn test_parse_functions_in_order() {
        let parser = CodeParser::new();
        let elements = parser.parse_source("Calculator", CALCULATOR);

        let names: Vec<&str> = elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Add", "Helper", "Main"]);
        assert!(elements.iter().all(|e| e.kind == ElementKind::Function));
        assert!(elements.iter().all(|e| e.enclosing_type == "Calculator"));
    }

    #[test]
    fn test_element_contents() {
        let elements = CodeParser::new().parse_source("Calculator", CALCULATOR);

        let add = &elements[0];
        assert_eq!(add.documentation, "/// <summary>Adds two numbers.</summary>");
        assert_eq!(
            add.body_text,
            "    public int Add(int a, int b) {\n        return Helper(a) + b;\n    }\n"
        );
        assert_eq!(add.referenced_names, HashSet::from(["Helper".to_string()]));

        let helper = &elements[1];
        assert_eq!(helper.documentation, "");
        assert!(helper.body_text.starts_with("    private int Helper(int x)\n"));
        assert!(helper.body_text.ends_with("        return x;\n    }\n"));
        assert_eq!(helper.referenced_names, HashSet::from(["Abs".to_string()]));

        let main = &elements[2];
        assert_eq!(
            main.referenced_names,
            HashSet::from(["WriteLine".to_string(), "Add".to_string()])
        );
    }

    #[test]
    fn test_declarations_inside_bodies_are_not_rescanned() {
        let source = "\
void Outer() {
    void Inner() {
    }
}
";
        let elements = CodeParser::new().parse_source("Nested", source);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].name, "Outer");
        assert_eq!(elements[0].body_text, source);
    }

    #[test]
    fn test_crlf_line_endings_are_kept_in_body() {
        let source = "/// Adds.\r\npublic int Add(int a, int b) {\r\n    return Helper(a);\r\n}\r\n";
        let elements = CodeParser::new().parse_source("Math", source);

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].documentation, "/// Adds.");
        assert_eq!(
            elements[0].body_text,
            "public int Add(int a, int b) {\r\n    return Helper(a);\r\n}\r\n"
        );
        assert_eq!(elements[0].referenced_names, HashSet::from(["Helper".to_string()]));
    }

    #[test]
    fn test_no_declarations() {
        let elements = CodeParser::new().parse_source("Empty", "namespace X {\n}\n");
        assert!(elements.is_empty());
    }

    #[test]
    fn test_semicolon_declaration_consumes_rest_of_file() {
        let source = "public void Foo();\npublic void Bar() {\n}\n";
        let elements = CodeParser::new().parse_source("IThing", source);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].name, "Foo");
        assert_eq!(elements[0].body_text, source);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let parser = CodeParser::new();
        assert_eq!(
            parser.parse_source("Calculator", CALCULATOR),
            parser.parse_source("Calculator", CALCULATOR)
        );
    }

    #[test]
    fn test_file_key() {
        assert_eq!(file_key(Path::new("src/Player.cs")), "Player");
        assert_eq!(file_key(Path::new("ui/Form1.Designer.cs")), "Form1");
        assert_eq!(file_key(Path::new("Makefile")), "Makefile");
    }

    #[test]
    fn test_enclosing_type_drops_last_extension() {
        assert_eq!(enclosing_type(Path::new("a/Form1.Designer.cs")), "Form1.Designer");
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let err = CodeParser::new()
            .parse_file(Path::new("/nonexistent/Nope.cs"))
            .unwrap_err();
        assert_eq!(err.path(), Path::new("/nonexistent/Nope.cs"));
        assert!(err.to_string().contains("/nonexistent/Nope.cs"));
    }
}
