//! pydocmd - Generate Markdown API docs from Python docstrings and type hints
//!
//! Walks a Python source tree, extracts module, class and function docstrings
//! together with argument and return annotations, and writes them out as a
//! single Markdown document. Also converts Jupyter notebooks to MDX.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod notebook;
pub mod output;
pub mod parser;

// Re-export main types
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use extract::{DocExtractor, Documentation, Scanner};
pub use notebook::NotebookConverter;
pub use output::render_markdown;
pub use parser::{ClassDoc, FileDoc, FunctionDoc, PythonParser};
