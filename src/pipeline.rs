use crate::parser::code_parser::{CodeParser, ParsedFiles};
use crate::publisher::{render_page, Publisher};
use crate::references::{ElementId, ReferenceIndex};
use crate::summarizer::Summarizer;
use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome counters of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub files: usize,
    pub elements: usize,
    pub published: usize,
    pub failures: usize,
}

/// Source files under `root` with one of `extensions`, sorted
pub fn discover_sources(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("Solution directory does not exist: {}", root.display());
    }

    let walker = WalkBuilder::new(root).standard_filters(true).build();

    let mut files: Vec<PathBuf> = walker
        .flatten()
        .filter(|entry| entry.file_type().map_or(false, |ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect();
    files.sort();

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |ext| extensions.iter().any(|x| x == ext))
}

/// Parse, summarize and publish a source tree
pub struct Pipeline {
    summarizer: Arc<dyn Summarizer>,
    publisher: Arc<dyn Publisher>,
    code_parser: CodeParser,
    extensions: Vec<String>,
}

impl Pipeline {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        publisher: Arc<dyn Publisher>,
        extensions: Vec<String>,
    ) -> Self {
        Self {
            summarizer,
            publisher,
            code_parser: CodeParser::new(),
            extensions,
        }
    }

    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        discover_sources(root, &self.extensions)
    }

    /// Parse every discovered file without summarizing
    pub fn parse(&self, root: &Path) -> Result<ParsedFiles> {
        let files = self.discover(root)?;
        tracing::info!("Parsing {} files under {}", files.len(), root.display());
        Ok(self.code_parser.parse_files(&files))
    }

    pub async fn run(&self, root: &Path) -> Result<RunReport> {
        let parsed = self.parse(root)?;
        let index = ReferenceIndex::build(&parsed);

        let mut report = RunReport {
            files: parsed.files.len(),
            elements: parsed.element_count(),
            failures: parsed.failures.len(),
            ..Default::default()
        };

        for (file_key, elements) in &parsed.files {
            let mut entries = Vec::with_capacity(elements.len());
            let mut failed = false;

            for (i, element) in elements.iter().enumerate() {
                let own = format!("{}.{}", file_key, element.name);
                let references = index.callers_of(&element.name, &ElementId::new(file_key, i));

                match self.summarizer.summarize(element, &references).await {
                    Ok(summary) => entries.push((element.clone(), summary)),
                    Err(e) => {
                        tracing::warn!("Failed to summarize {}: {:#}", own, e);
                        failed = true;
                        break;
                    }
                }
            }

            if failed {
                report.failures += 1;
                continue;
            }

            let page = render_page(file_key, &entries);
            match self.publisher.publish(&page).await {
                Ok(()) => report.published += 1,
                Err(e) => {
                    tracing::warn!("Failed to publish {}: {:#}", file_key, e);
                    report.failures += 1;
                }
            }
        }

        tracing::info!(
            "Processed {} files, {} elements, {} pages published, {} failures",
            report.files,
            report.elements,
            report.published,
            report.failures
        );

        Ok(report)
    }
}
