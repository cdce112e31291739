//! BayesElo invocation
//!
//! BayesElo has no batch mode: it reads commands from stdin like an
//! interactive shell. We feed it a fixed script and keep everything it
//! prints (stdout and stderr interleaved) for the parser.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{InputKind, RateError, Result};

/// Default location of the BayesElo binary, relative to the repo root
pub const DEFAULT_BAYESELO: &str = "tools/bin/bayeselo";

/// Handle to a BayesElo executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BayesElo {
    path: PathBuf,
}

impl BayesElo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Command session sent to BayesElo: load games, fit, print table, quit
    pub fn script(pgn: &Path) -> String {
        format!("readpgn {}\nelo\nmm\nratings\nx\n", pgn.display())
    }

    /// Check that the executable exists and can be launched
    pub fn ensure_executable(&self) -> Result<()> {
        let meta = fs::metadata(&self.path).map_err(|e| {
            RateError::input_not_found(InputKind::Backend, &self.path, e.to_string())
        })?;
        if !meta.is_file() {
            return Err(RateError::input_not_found(
                InputKind::Backend,
                &self.path,
                "not a regular file",
            ));
        }
        if !is_executable(&meta) {
            return Err(RateError::input_not_found(
                InputKind::Backend,
                &self.path,
                "not executable",
            ));
        }
        Ok(())
    }

    /// Run one BayesElo session over `pgn` and return its combined output
    ///
    /// Blocks until the process exits. There is no timeout: a BayesElo that
    /// never reads `x` keeps the caller waiting.
    pub fn run(&self, pgn: &Path) -> Result<String> {
        let script = Self::script(pgn);
        debug!(
            backend = %self.path.display(),
            pgn = %pgn.display(),
            "starting BayesElo session"
        );

        // One pipe shared by stdout and stderr keeps their relative order
        let (mut combined, writer) = io::pipe()?;
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(err) = stdin.write_all(script.as_bytes()) {
                if err.kind() != io::ErrorKind::BrokenPipe {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(err.into());
                }
                debug!("BayesElo closed stdin before the script was fully written");
            }
        }

        let mut raw = Vec::new();
        combined.read_to_end(&mut raw)?;
        let status = child.wait()?;
        let output = decode_output(&raw);

        debug!(%status, bytes = raw.len(), "BayesElo session finished");

        if !status.success() {
            return Err(RateError::BackendFailure { status, output });
        }
        Ok(output)
    }

    fn spawn_error(&self, err: io::Error) -> RateError {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                RateError::input_not_found(InputKind::Backend, &self.path, err.to_string())
            }
            _ => RateError::Io(err),
        }
    }
}

impl Default for BayesElo {
    fn default() -> Self {
        Self::new(DEFAULT_BAYESELO)
    }
}

/// Check that the results log is a readable regular file
pub fn ensure_results_log(pgn: &Path) -> Result<()> {
    let meta = fs::metadata(pgn)
        .map_err(|e| RateError::input_not_found(InputKind::ResultsLog, pgn, e.to_string()))?;
    if !meta.is_file() {
        return Err(RateError::input_not_found(
            InputKind::ResultsLog,
            pgn,
            "not a regular file",
        ));
    }
    Ok(())
}

/// Decode BayesElo output without losing bytes
///
/// PGN tags are Latin-1 by standard and BayesElo echoes names byte for byte,
/// so anything that is not valid UTF-8 is read as Latin-1.
pub fn decode_output(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("BayesElo output is not UTF-8; decoding as Latin-1");
            raw.iter().map(|&b| char::from(b)).collect()
        }
    }
}

#[cfg(unix)]
fn is_executable(meta: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &fs::Metadata) -> bool {
    true
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
