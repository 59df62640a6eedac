pub mod ollama;
pub mod openai;

use crate::parser::SourceElement;
use anyhow::Result;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes code and generates examples.";

/// Language-model backend producing prose summaries
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, element: &SourceElement, references: &[String]) -> Result<String>;
}

/// Build the user prompt for one element
pub fn build_prompt(element: &SourceElement, references: &[String]) -> String {
    let kind = element.kind.as_str();
    let reference_text = if references.is_empty() {
        "No references found.".to_string()
    } else {
        format!(
            "The following files reference this {}: {}",
            kind,
            references.join(", ")
        )
    };

    format!(
        "Below is a {kind} named '{name}' from {owner}. Use the provided XML comment and code snippet as context.

### XML Comment:
{comment}

### Code Snippet:
{code}

### Function References:
{reference_text}

### Task:
1. Summarize this {kind}.
2. If it's a function, generate an example usage snippet based on the Function References,
   if there are none generate an example based on the XML Comment and the actual function code using your own knowledge.

### Summary:
",
        name = element.name,
        owner = element.enclosing_type,
        comment = element.documentation,
        code = element.body_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ElementKind;
    use std::collections::HashSet;

    fn element() -> SourceElement {
        SourceElement {
            name: "Add".to_string(),
            kind: ElementKind::Function,
            enclosing_type: "Calculator".to_string(),
            documentation: "/// <summary>Adds two numbers.</summary>".to_string(),
            body_text: "public int Add(int a, int b) {\n    return a + b;\n}\n".to_string(),
            referenced_names: HashSet::new(),
        }
    }

    #[test]
    fn test_prompt_contains_sections() {
        let prompt = build_prompt(&element(), &[]);
        assert!(prompt.contains("a function named 'Add' from Calculator"));
        assert!(prompt.contains("### XML Comment:\n/// <summary>Adds two numbers.</summary>"));
        assert!(prompt.contains("### Code Snippet:\npublic int Add(int a, int b) {"));
        assert!(prompt.contains("### Function References:\nNo references found."));
        assert!(prompt.ends_with("### Summary:\n"));
    }

    #[test]
    fn test_prompt_lists_references() {
        let refs = vec!["Program.Main".to_string(), "Shop.Total".to_string()];
        let prompt = build_prompt(&element(), &refs);
        assert!(prompt
            .contains("The following files reference this function: Program.Main, Shop.Total"));
    }
}
