// Output generation module

pub mod markdown;

pub use markdown::render_markdown;

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::extract::Documentation;
use std::path::Path;

/// Render documentation in the requested format
pub fn render(docs: &Documentation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(docs)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(docs)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render and write documentation, creating parent directories as needed
pub fn write_document(docs: &Documentation, path: &Path, format: OutputFormat) -> Result<()> {
    let content = render(docs, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    })?;

    Ok(())
}
