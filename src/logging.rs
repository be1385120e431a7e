//! Logger handle construction
//!
//! The binary builds one [`Dispatch`] at startup and hands it to the
//! extractor, which scopes its work with it. Nothing here installs a global
//! default subscriber.

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use std::io::IsTerminal;
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Build the stderr logger handle.
///
/// Level precedence: `verbose` forces debug, then `RUST_LOG`, then the
/// configured level.
pub fn build_dispatch(config: &LoggingConfig, verbose: bool) -> Result<Dispatch> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => parse_filter(&config.level)?,
        }
    };

    let ansi = std::io::stderr().is_terminal();
    Ok(dispatch_with_writer(filter, std::io::stderr, ansi))
}

/// Build a logger handle writing `timestamp LEVEL message` lines to `writer`
pub fn dispatch_with_writer<W>(filter: EnvFilter, writer: W, ansi: bool) -> Dispatch
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish();

    Dispatch::new(subscriber)
}

/// Parse a filter directive such as `info` or `pydocmd=debug`
pub fn parse_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level.trim())
        .map_err(|e| Error::logging(format!("invalid log level '{}': {}", level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_parse_filter_plain_level() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter(" warn ").is_ok());
    }

    #[test]
    fn test_parse_filter_directive() {
        assert!(parse_filter("pydocmd=debug,warn").is_ok());
    }

    #[test]
    fn test_build_dispatch_verbose() {
        let dispatch = build_dispatch(&LoggingConfig::default(), true);
        assert!(dispatch.is_ok());
    }

    #[test]
    fn test_dispatch_writes_level_and_message() {
        let buffer = Buffer::default();
        let dispatch = dispatch_with_writer(EnvFilter::new("info"), buffer.clone(), false);

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!("Found 3 Python files to process");
            tracing::debug!("filtered out");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"));
        assert!(output.contains("Found 3 Python files to process"));
        assert!(!output.contains("filtered out"));
    }

    #[test]
    fn test_dispatch_is_scoped() {
        let buffer = Buffer::default();
        let dispatch = dispatch_with_writer(EnvFilter::new("info"), buffer.clone(), false);

        tracing::dispatcher::with_default(&dispatch, || tracing::info!("inside"));
        tracing::info!("outside");

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("inside"));
        assert!(!output.contains("outside"));
    }
}
