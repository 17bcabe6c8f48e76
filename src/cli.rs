//! Command line parsing
//!
//! Produces either a [`Config`] to serve or an [`ExitReport`] describing what to
//! print and which code to exit with. Nothing here prints or exits; `main` does.

use crate::config::{self, Config};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Serve local directories as a mock HTTP backend.
#[derive(Debug, Parser)]
#[command(name = "mokk")]
struct Cli {
    /// Port number the server listens on
    #[arg(short, long, value_name = "LISTEN_PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// File names tried when the URL ends with `/`; separate several with `/`
    #[arg(short, long, value_name = "NAMES", default_value = config::DEFAULT_INDEX)]
    index: String,

    /// Settings file (host, logging, timeouts)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Entries of the form LOCATION=PATH, e.g. /location/to/resource=path/to/file/or/directory.
    ///
    /// LOCATION must start with `/`. Relative paths are resolved from the current
    /// directory; a leading `$/` is the home directory; `$ENV` or `${ENV}` insert an
    /// environment variable; `$$` is a literal `$`. Entries are searched in the
    /// order given and the first file found is returned.
    #[arg(value_name = "ENTRY")]
    entries: Vec<String>,
}

/// Exit code reported for invalid command lines
pub const EXIT_INVALID: i32 = -1;

/// What the binary should print before terminating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitReport {
    pub code: i32,
    /// Error messages, one per line, for stderr
    pub messages: Vec<String>,
    /// Usage text for stdout
    pub usage: Option<String>,
}

/// Result of parsing the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Serve(Config),
    Exit(ExitReport),
}

/// Parse arguments (without the program name)
pub fn parse_options<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv = std::iter::once(OsString::from("mokk")).chain(args.into_iter().map(Into::into));

    let cli = match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            return Invocation::Exit(ExitReport {
                code: 0,
                messages: Vec::new(),
                usage: Some(err.render().to_string()),
            });
        }
        Err(err) => {
            return Invocation::Exit(ExitReport {
                code: EXIT_INVALID,
                messages: vec![err.render().to_string().trim_end().to_string()],
                usage: Some(usage()),
            });
        }
    };

    match config::parse_entries(&cli.entries) {
        Ok(routes) => Invocation::Serve(Config {
            port: cli.port,
            index_files: config::split_index_files(&cli.index),
            routes,
            settings_file: cli.config,
        }),
        Err(err) => Invocation::Exit(ExitReport {
            code: EXIT_INVALID,
            messages: err.messages,
            usage: Some(usage()),
        }),
    }
}

/// Rendered help text
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::pathspec::resolve;
    use crate::config::Entry;

    fn serve(args: &[&str]) -> Config {
        match parse_options(args) {
            Invocation::Serve(config) => config,
            Invocation::Exit(report) => panic!("unexpected exit: {report:?}"),
        }
    }

    fn exit(args: &[&str]) -> ExitReport {
        match parse_options(args) {
            Invocation::Exit(report) => report,
            Invocation::Serve(config) => panic!("unexpected config: {config:?}"),
        }
    }

    #[test]
    fn test_minimum() {
        let config = serve(&["/=."]);
        assert_eq!(config.port, 50000);
        assert_eq!(config.index_files, vec!["index.html", "index.htm"]);
        assert_eq!(config.routes.entries(), &[Entry::new("/", resolve("."))]);
        assert_eq!(config.settings_file, None);
    }

    #[test]
    fn test_port() {
        assert_eq!(serve(&["--port", "80", "/=."]).port, 80);
        assert_eq!(serve(&["-p", "80", "/=."]).port, 80);
    }

    #[test]
    fn test_index() {
        assert_eq!(serve(&["--index", "test.html", "/=."]).index_files, vec!["test.html"]);
        assert_eq!(
            serve(&["-i", "test.html/test.htm", "/=."]).index_files,
            vec!["test.html", "test.htm"]
        );
    }

    #[test]
    fn test_help_exits_zero() {
        for flag in ["--help", "-h"] {
            let report = exit(&[flag]);
            assert_eq!(report.code, 0);
            assert!(report.messages.is_empty());
            assert!(report.usage.unwrap().contains("--port"));
        }
    }

    #[test]
    fn test_no_entry() {
        let report = exit(&[]);
        assert_eq!(report.code, EXIT_INVALID);
        assert_eq!(report.messages, vec!["no entries supplied".to_string()]);
        assert!(report.usage.is_some());
    }

    #[test]
    fn test_validation_failures_exit_invalid() {
        for entry in ["test", "=test", "test=", "test=test", "/test=test/not-exist"] {
            let report = exit(&[entry]);
            assert_eq!(report.code, EXIT_INVALID, "entry {entry}");
            assert_eq!(report.messages.len(), 1, "entry {entry}");
            assert!(report.messages[0].ends_with(entry), "entry {entry}");
        }
    }

    #[test]
    fn test_bad_port_is_reported() {
        let report = exit(&["--port", "notanumber", "/=."]);
        assert_eq!(report.code, EXIT_INVALID);
        assert_eq!(report.messages.len(), 1);
    }

    #[test]
    fn test_config_flag() {
        let config = serve(&["--config", "mokk.toml", "/=."]);
        assert_eq!(config.settings_file, Some(PathBuf::from("mokk.toml")));
    }
}
