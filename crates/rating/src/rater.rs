//! Rating pipeline: BayesElo → parser → mean-centering → report

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::backend::{ensure_results_log, BayesElo};
use crate::error::{InputKind, RateError, Result};
use crate::normalize::mean_center;
use crate::parser::parse_ratings;
use crate::report::{assemble, Report};

/// Runs one rating pass per call; keeps no state between runs
#[derive(Debug, Clone, Default)]
pub struct Rater {
    backend: BayesElo,
}

impl Rater {
    pub fn new(backend: BayesElo) -> Self {
        Self { backend }
    }

    /// Rate the games in `pgn`, optionally reporting only `engine`
    pub fn rate(&self, pgn: &Path, engine: Option<&str>) -> Result<Report> {
        ensure_results_log(pgn)?;
        self.rate_as(pgn, &pgn.display().to_string(), engine)
    }

    /// Rate PGN text that is not on disk yet
    ///
    /// The bytes are written untouched to a temporary file for BayesElo, so a
    /// Latin-1 PGN behaves as it would from disk. `label` stands in for the
    /// path in the report.
    pub fn rate_pgn_text(
        &self,
        text: impl AsRef<[u8]>,
        label: &str,
        engine: Option<&str>,
    ) -> Result<Report> {
        let text = text.as_ref();
        if text.iter().all(u8::is_ascii_whitespace) {
            return Err(RateError::input_not_found(
                InputKind::ResultsLog,
                label,
                "no games in PGN text",
            ));
        }
        let mut file = tempfile::Builder::new()
            .prefix("rate_")
            .suffix(".pgn")
            .tempfile()?;
        file.write_all(text)?;
        file.flush()?;
        self.rate_as(file.path(), label, engine)
    }

    fn rate_as(&self, pgn: &Path, source: &str, engine: Option<&str>) -> Result<Report> {
        self.backend.ensure_executable()?;

        info!(pgn = source, backend = %self.backend.path().display(), "running BayesElo");
        let raw = self.backend.run(pgn)?;

        let table = parse_ratings(&raw)?;
        info!(players = table.len(), "parsed ratings table");

        let relative = mean_center(table);
        assemble(&relative, source, engine)
    }
}

#[cfg(test)]
#[path = "rater_tests.rs"]
mod tests;
