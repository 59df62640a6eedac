//! Line-oriented extraction of C# functions, their `///` documentation and
//! call-like tokens, plus the summarize/publish pipeline that consumes them.
//!
//! - `parser`: declaration matching, doc scanning, brace-tracked bodies
//! - `references`: callers of each element across a parsed batch
//! - `summarizer`: language-model backends (OpenAI, Ollama)
//! - `publisher`: page rendering and sinks (Confluence, stdout)
//! - `checkout`: Plastic SCM workspace update
//! - `config`: environment and `.env` configuration
//! - `pipeline`: orchestration
//! - `cli`: command-line arguments and the parse-only mode

pub mod checkout;
pub mod cli;
pub mod config;
pub mod parser;
pub mod pipeline;
pub mod publisher;
pub mod references;
pub mod summarizer;

pub use parser::code_parser::{file_key, CodeParser, ParsedFiles};
pub use parser::declaration::classify;
pub use parser::{DeclarationHeader, ElementKind, ParseError, SourceElement};
pub use pipeline::{Pipeline, RunReport};
