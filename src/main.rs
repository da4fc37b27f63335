// LogTally - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading
// 3. Logging initialisation (debug mode support)
// 4. Running the analysis and setting the exit status

use clap::Parser;
use logtally::app::analyze::{self, AnalyzeRequest};
use logtally::core::render::OutputFormat;
use logtally::platform::config;
use logtally::util::constants;
use logtally::util::error::LogTallyError;
use logtally::util::logging;
use std::io::Write;
use std::path::PathBuf;

/// LogTally - count log entries per level and list the entries of one level.
///
/// Reads a log file whose lines look like
/// `2024-01-01 10:00:05 ERROR Connection failed` and prints a per-level
/// summary. Lines in any other layout are skipped.
#[derive(Parser, Debug)]
#[command(name = "logtally", version, about)]
struct Cli {
    /// Log file to analyse.
    file: PathBuf,

    /// Also list every entry of this level (INFO, DEBUG, ERROR, WARNING; any case).
    level: Option<String>,

    /// Output format: table or json.
    #[arg(short = 'f', long = "format")]
    format: Option<OutputFormat>,

    /// Write the listed entries to this file (.json for JSON, otherwise CSV).
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,

    /// Read configuration from this file instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let (app_config, config_warnings) = match config::load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            logging::init(cli.debug, None);
            exit_with_error(&LogTallyError::from(e));
        }
    };

    logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "LogTally starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    let request = AnalyzeRequest {
        path: cli.file,
        level: cli.level,
        format: cli.format.unwrap_or(app_config.output_format),
        max_file_size: app_config.max_file_size,
        export_path: cli.export,
    };

    let output = match analyze::run(&request) {
        Ok(output) => output,
        Err(e) => exit_with_error(&e),
    };

    if let Err(code) = write_report(std::io::stdout().lock(), &output) {
        std::process::exit(code);
    }
}

/// Write the finished report, mapping a failed write to an exit code.
///
/// A closed pipe (`logtally app.log | head`) means the reader has seen all it
/// wants; that is a clean exit, not an error.
fn write_report<W: Write>(mut out: W, report: &str) -> Result<(), i32> {
    match out.write_all(report.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed by reader");
            Err(0)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to write report to stdout");
            Err(constants::EXIT_FAILURE)
        }
    }
}

/// Report a terminal error on stderr and exit non-zero.
fn exit_with_error(error: &LogTallyError) -> ! {
    tracing::debug!(error = ?error, "Run failed");
    eprintln!("Error: {error}");
    std::process::exit(constants::EXIT_FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Writer that fails every call with the given error kind.
    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(self.0))
        }
    }

    #[test]
    fn test_write_report_success() {
        let mut buf = Vec::new();
        assert_eq!(write_report(&mut buf, "Total | 0\n"), Ok(()));
        assert_eq!(buf, b"Total | 0\n");
    }

    #[test]
    fn test_broken_pipe_exits_cleanly() {
        let result = write_report(FailingWriter(io::ErrorKind::BrokenPipe), "report\n");
        assert_eq!(result, Err(0));
    }

    #[test]
    fn test_other_write_errors_exit_with_failure() {
        let result = write_report(FailingWriter(io::ErrorKind::Other), "report\n");
        assert_eq!(result, Err(constants::EXIT_FAILURE));
    }
}
