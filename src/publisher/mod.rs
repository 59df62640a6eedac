pub mod confluence;

use crate::parser::SourceElement;
use anyhow::Result;

/// A rendered documentation page for one source file
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub body: String,
    /// Raw summaries in element order, for plain-text sinks
    pub summaries: Vec<String>,
}

/// Destination for generated pages
#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, page: &Page) -> Result<()>;
}

/// Render a page in Confluence storage format
pub fn render_page(title: &str, entries: &[(SourceElement, String)]) -> Page {
    let mut body = format!(
        "<h1>{}</h1><p>Auto-generated documentation.</p>",
        escape_html(title)
    );

    for (element, summary) in entries {
        body.push_str(&format!(
            "<h2>{}: {}</h2>",
            element.kind.label(),
            escape_html(&element.name)
        ));
        body.push_str(&format!(
            "<p><b>XML Comment:</b> {}</p>",
            escape_html(&element.documentation)
        ));
        body.push_str(&format!(
            "<p><b>LLM Summary:</b> {}</p>",
            escape_html(summary)
        ));
    }

    Page {
        title: title.to_string(),
        body,
        summaries: entries.iter().map(|(_, s)| s.clone()).collect(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Prints pages to stdout when no wiki is configured
pub struct StdoutPublisher;

#[async_trait::async_trait]
impl Publisher for StdoutPublisher {
    async fn publish(&self, page: &Page) -> Result<()> {
        println!("File: {}", page.title);
        for summary in &page.summaries {
            println!("Response: {}", summary);
            println!("{}", "-".repeat(100));
        }
        Ok(())
    }
}
