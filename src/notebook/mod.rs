//! Jupyter notebook to MDX conversion
//!
//! Markdown cells are copied through, code cells become fenced blocks wrapped
//! in a `<CodeGroup>` together with their outputs.

use crate::error::Result;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::info;

/// A notebook document, reduced to the fields the converter reads
#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub cells: Vec<Cell>,
}

impl Notebook {
    /// Parse notebook JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `metadata.date`, or empty
    pub fn date(&self) -> &str {
        self.metadata.get("date").and_then(Value::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default)]
    pub source: MultilineText,
    #[serde(default)]
    pub outputs: Vec<CellOutput>,
}

/// Notebook text fields are either one string or a list of lines
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MultilineText {
    Text(String),
    Lines(Vec<String>),
}

impl Default for MultilineText {
    fn default() -> Self {
        MultilineText::Text(String::new())
    }
}

impl MultilineText {
    pub fn joined(&self) -> String {
        match self {
            MultilineText::Text(text) => text.clone(),
            MultilineText::Lines(lines) => lines.concat(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CellOutput {
    /// Stream output
    pub text: Option<MultilineText>,
    /// Rich output keyed by MIME type
    pub data: Option<Map<String, Value>>,
}

/// Converts notebooks to MDX documents
pub struct NotebookConverter {
    ansi: Regex,
}

impl NotebookConverter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            ansi: Regex::new(r"\x1b\[[0-9;]*m")?,
        })
    }

    /// Convert `input` and write the result to `output`, or next to the input
    /// with an `.mdx` extension. Returns the path written.
    pub fn convert_file(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf> {
        let json = std::fs::read_to_string(input)?;
        let notebook = Notebook::from_json(&json)?;

        let title = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let mdx = self.to_mdx(&notebook, &title);

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| input.with_extension("mdx"));
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&output, mdx)?;

        info!(
            "Converted {} ({} cells) to {}",
            input.display(),
            notebook.cells.len(),
            output.display()
        );
        Ok(output)
    }

    /// Render a notebook as MDX
    pub fn to_mdx(&self, notebook: &Notebook, title: &str) -> String {
        let mut parts: Vec<String> = vec![
            "---".to_string(),
            format!("title: \"{}\"", title),
            format!("date: \"{}\"", notebook.date()),
            "---\n".to_string(),
        ];

        for cell in &notebook.cells {
            let source = self.strip_ansi(&cell.source.joined());

            match cell.cell_type.as_str() {
                "markdown" => {
                    parts.push(source.trim().to_string());
                    parts.push("\n".to_string());
                }
                "code" => {
                    let has_output = !cell.outputs.is_empty();
                    if has_output {
                        parts.push("<CodeGroup>".to_string());
                    }

                    parts.push("```python Code\n".to_string());
                    parts.push(source.trim().to_string());
                    parts.push("```".to_string());

                    for output in &cell.outputs {
                        render_output(output, &mut parts);
                    }

                    if has_output {
                        parts.push("</CodeGroup>".to_string());
                    }
                    parts.push("\n".to_string());
                }
                _ => {}
            }
        }

        parts.join("\n")
    }

    fn strip_ansi(&self, text: &str) -> String {
        self.ansi.replace_all(text, "").into_owned()
    }
}

fn render_output(output: &CellOutput, parts: &mut Vec<String>) {
    if let Some(text) = &output.text {
        push_output_block(parts, text.joined().trim());
    } else if let Some(data) = &output.data {
        if let Some(plain) = data.get("text/plain") {
            push_output_block(parts, value_text(plain).trim());
        }
        if data.contains_key("image/png") {
            push_output_block(parts, "*[Image output]*");
        }
    }
}

fn push_output_block(parts: &mut Vec<String>, body: &str) {
    parts.push("```output Output\n".to_string());
    parts.push(body.to_string());
    parts.push("```".to_string());
}

/// Text of a MIME bundle entry given as a string or a list of strings
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    const NOTEBOOK: &str = r##"{
  "metadata": {"date": "2024-05-01", "kernelspec": {"name": "python3"}},
  "nbformat": 4,
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Intro\n", "Some text.\n"]},
    {"cell_type": "code", "metadata": {}, "outputs": [], "source": "x = 1\n"},
    {
      "cell_type": "code",
      "metadata": {},
      "source": ["print(x)\n"],
      "outputs": [
        {"output_type": "stream", "name": "stdout", "text": ["\u001b[31m1\u001b[0m\n"]},
        {"output_type": "execute_result", "data": {"text/plain": ["42"], "image/png": "iVBOR"}}
      ]
    },
    {"cell_type": "raw", "metadata": {}, "source": "ignored"}
  ]
}"##;

    fn converter() -> NotebookConverter {
        NotebookConverter::new().unwrap()
    }

    #[test]
    fn test_parse_notebook() {
        let nb = Notebook::from_json(NOTEBOOK).unwrap();
        assert_eq!(nb.cells.len(), 4);
        assert_eq!(nb.date(), "2024-05-01");
        assert_eq!(nb.cells[0].source.joined(), "# Intro\nSome text.\n");
    }

    #[test]
    fn test_missing_metadata_gives_empty_date() {
        let nb = Notebook::from_json(r#"{"cells": []}"#).unwrap();
        assert_eq!(nb.date(), "");
        let mdx = converter().to_mdx(&nb, "empty");
        assert_eq!(mdx, "---\ntitle: \"empty\"\ndate: \"\"\n---\n");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Notebook::from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_to_mdx_layout() {
        let nb = Notebook::from_json(NOTEBOOK).unwrap();
        let mdx = converter().to_mdx(&nb, "demo");

        let expected = [
            "---",
            "title: \"demo\"",
            "date: \"2024-05-01\"",
            "---\n",
            "# Intro\nSome text.",
            "\n",
            "```python Code\n",
            "x = 1",
            "```",
            "\n",
            "<CodeGroup>",
            "```python Code\n",
            "print(x)",
            "```",
            "```output Output\n",
            "\u{1b}[31m1\u{1b}[0m",
            "```",
            "```output Output\n",
            "42",
            "```",
            "```output Output\n",
            "*[Image output]*",
            "```",
            "</CodeGroup>",
            "\n",
        ]
        .join("\n");
        assert_eq!(mdx, expected);
    }

    #[test]
    fn test_ansi_stripped_from_source() {
        let json = r#"{"cells": [{"cell_type": "markdown", "source": "\u001b[1;32mGreen\u001b[0m"}]}"#;
        let nb = Notebook::from_json(json).unwrap();
        let mdx = converter().to_mdx(&nb, "t");
        assert!(mdx.contains("\nGreen\n"));
        assert!(!mdx.contains('\u{1b}'));
    }

    #[test]
    fn test_convert_file_default_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("demo.ipynb");
        std::fs::write(&input, NOTEBOOK).unwrap();

        let output = converter().convert_file(&input, None).unwrap();
        assert_eq!(output, dir.path().join("demo.mdx"));
        let mdx = std::fs::read_to_string(&output).unwrap();
        assert!(mdx.starts_with("---\ntitle: \"demo\"\n"));
    }

    #[test]
    fn test_convert_file_explicit_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("demo.ipynb");
        std::fs::write(&input, NOTEBOOK).unwrap();
        let target = dir.path().join("site").join("notebook.mdx");

        let output = converter().convert_file(&input, Some(&target)).unwrap();
        assert_eq!(output, target);
        assert!(target.exists());
    }

    #[test]
    fn test_convert_missing_file() {
        let result = converter().convert_file(Path::new("/nonexistent/nb.ipynb"), None);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
