//! CLI module for pydocmd

mod args;

pub use args::{Args, Command};

use crate::config::{Config, OutputFormat};
use crate::error::{Error, Result};
use crate::extract::DocExtractor;
use crate::logging::build_dispatch;
use crate::notebook::NotebookConverter;
use std::path::Path;
use std::process::ExitCode;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "pydocmd.toml";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<()> {
    match args.command {
        Command::Extract {
            path,
            output,
            format,
            title,
            exclude,
            extension,
            config,
            progress,
            verbose,
        } => {
            let mut cfg = load_config(config.as_deref())?;

            let format = format
                .map(|name| {
                    OutputFormat::from_name(&name)
                        .ok_or_else(|| Error::other(format!("Unknown format: {}", name)))
                })
                .transpose()?;

            // Merge CLI arguments (CLI takes precedence)
            cfg.merge_cli(output, exclude, format, title, extension);
            cfg.validate()?;

            if !path.exists() {
                return Err(Error::PathNotFound(path));
            }

            let dispatch = build_dispatch(&cfg.logging, verbose)?;
            let output_file = cfg.output.file.clone();

            let mut extractor = DocExtractor::new(path, cfg)?
                .with_dispatch(dispatch)
                .with_progress(progress);
            let docs = extractor.save_documentation(&output_file)?;

            println!(
                "Documented {} files: {} classes, {} methods, {} functions",
                docs.files.len(),
                docs.class_count(),
                docs.method_count(),
                docs.function_count()
            );
            println!("Documentation written to: {}", output_file.display());

            Ok(())
        }

        Command::Convert {
            input,
            output,
            verbose,
        } => {
            if !input.exists() {
                return Err(Error::PathNotFound(input));
            }

            let cfg = load_config(None)?;
            let dispatch = build_dispatch(&cfg.logging, verbose)?;
            let converter = NotebookConverter::new()?;

            let written = tracing::dispatcher::with_default(&dispatch, || {
                converter.convert_file(&input, output.as_deref())
            })?;
            println!("Created MDX file: {}", written.display());

            Ok(())
        }

        Command::Version => {
            println!("pydocmd {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load an explicit config file, or the default one when it is present
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    }
}
