use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// An identifier immediately followed by `(`
static CALL_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z_]\w*)\(").expect("call pattern is valid"));

/// Control-flow keywords that look like calls
const NON_CALLS: &[&str] = &["if", "for", "while", "switch", "catch"];

/// Result of scanning one declaration body
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedBody {
    pub text: String,
    pub calls: HashSet<String>,
    /// Index of the first line after the body
    pub end: usize,
    /// True when end of file was reached before the braces balanced
    pub reached_eof: bool,
}

/// Brace tracking state while consuming a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    /// No `{` seen yet; closing braces may still push depth below zero
    Scanning(i64),
    InBody(i64),
}

impl BodyState {
    fn advance(self, line: &str) -> Self {
        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;

        match self {
            BodyState::Scanning(depth) if opens > 0 => BodyState::InBody(depth + opens - closes),
            BodyState::Scanning(depth) => BodyState::Scanning(depth - closes),
            BodyState::InBody(depth) => BodyState::InBody(depth + opens - closes),
        }
    }

    fn is_closed(self) -> bool {
        matches!(self, BodyState::InBody(depth) if depth <= 0)
    }
}

/// Consume lines from `start` until the braces opened by the declaration
/// balance back to zero or below.
///
/// `skip` is a byte offset into the first line; call tokens before it (the
/// declaration's own name) are ignored. If no brace ever opens, the rest
/// of the file becomes the body.
pub fn extract_body<S: AsRef<str>>(lines: &[S], start: usize, skip: usize) -> ExtractedBody {
    let mut state = BodyState::Scanning(0);
    let mut text = String::new();
    let mut calls = HashSet::new();

    for (i, line) in lines.iter().enumerate().skip(start) {
        let line = line.as_ref();
        state = state.advance(line);
        text.push_str(line);

        let scanned = if i == start {
            line.get(skip..).unwrap_or("")
        } else {
            line
        };
        collect_calls(scanned, &mut calls);

        if state.is_closed() {
            return ExtractedBody {
                text,
                calls,
                end: i + 1,
                reached_eof: false,
            };
        }
    }

    ExtractedBody {
        text,
        calls,
        end: lines.len(),
        reached_eof: true,
    }
}

/// Add every call-like token in `text` to `calls`
pub fn collect_calls(text: &str, calls: &mut HashSet<String>) {
    for captures in CALL_TOKEN.captures_iter(text) {
        let name = &captures[1];
        if !NON_CALLS.contains(&name) {
            calls.insert(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_multi_line_body() {
        let lines = [
            "public int Add(int a, int b) {\n",
            "    return Helper(a) + b;\n",
            "}\n",
            "public void Next() {}\n",
        ];
        let body = extract_body(&lines, 0, "public int Add(int a, int b) {".len());
        assert_eq!(body.text, lines[..3].concat());
        assert_eq!(body.end, 3);
        assert_eq!(body.calls, set(&["Helper"]));
        assert!(!body.reached_eof);
    }

    #[test]
    fn test_nested_braces() {
        let lines = [
            "void Run() {\n",
            "    if (ready) {\n",
            "        Go();\n",
            "    }\n",
            "}\n",
            "trailing\n",
        ];
        let body = extract_body(&lines, 0, 0);
        assert_eq!(body.end, 5);
        assert_eq!(body.text, lines[..5].concat());
    }

    #[test]
    fn test_brace_on_following_line() {
        let lines = ["void Run()\n", "{\n", "    Go();\n", "}\n"];
        let body = extract_body(&lines, 0, 0);
        assert_eq!(body.end, 4);
        assert_eq!(body.calls, set(&["Run", "Go"]));
    }

    #[test]
    fn test_single_line_body() {
        let line = "public int Two() { return Make(2); }";
        let body = extract_body(&[line], 0, "public int Two() {".len());
        assert_eq!(body.end, 1);
        assert_eq!(body.text, line);
        assert_eq!(body.calls, set(&["Make"]));
    }

    #[test]
    fn test_control_flow_keywords_are_filtered() {
        let lines = [
            "void Loop() {\n",
            "    if(x) Foo(x);\n",
            "    for(;;) {}\n",
            "    while(true) {}\n",
            "    switch(k) {}\n",
            "    try {} catch(Exception e) {}\n",
            "}\n",
        ];
        let body = extract_body(&lines, 0, "void Loop() {".len());
        assert_eq!(body.calls, set(&["Foo"]));
    }

    #[test]
    fn test_spaced_keywords_yield_only_calls() {
        let lines = ["void F() {\n", "    if (x) Foo(x); for (;;) {}\n", "}\n"];
        let body = extract_body(&lines, 0, "void F() {".len());
        assert_eq!(body.calls, set(&["Foo"]));
    }

    #[test]
    fn test_member_access_calls() {
        let mut calls = HashSet::new();
        collect_calls("Console.WriteLine(list.Count()); new Thing(1);", &mut calls);
        assert_eq!(calls, set(&["WriteLine", "Count", "Thing"]));
    }

    #[test]
    fn test_semicolon_declaration_falls_back_to_eof() {
        let lines = ["public void Foo();\n", "int x = 1;\n", "}\n"];
        let body = extract_body(&lines, 0, "public void Foo();".len());
        // The stray `}` is seen before any `{`, so the body never opens.
        assert!(body.reached_eof);
        assert_eq!(body.end, 3);
        assert_eq!(body.text, lines.concat());
    }

    #[test]
    fn test_over_closed_body_stops() {
        let lines = ["void F() {\n", "}}\n", "after\n"];
        let body = extract_body(&lines, 0, 0);
        assert_eq!(body.end, 2);
    }

    #[test]
    fn test_start_in_middle_of_file() {
        let lines = ["x\n", "void F() {\n", "}\n"];
        let body = extract_body(&lines, 1, 0);
        assert_eq!(body.text, "void F() {\n}\n");
        assert_eq!(body.end, 3);
    }
}
