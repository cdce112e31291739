//! Ratings table recognition
//!
//! BayesElo's `ratings` layout is not a stable contract; it differs between
//! builds and versions. Rows are matched against a short ordered list of
//! line shapes, first match wins. Total mismatch is an error, never an
//! empty table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RateError, Result};

/// Header words that mark the start of the ratings table
pub const NAME_MARKER: &str = "Name";
pub const ELO_MARKER: &str = "Elo";

/// How many trailing output lines a parse failure carries
pub const FAILURE_TAIL_LINES: usize = 40;

/// One engine's rating as reported by BayesElo (or after recentering)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub name: String,
    #[serde(rename = "elo")]
    pub rating: f64,
    #[serde(rename = "sigma")]
    pub uncertainty: f64,
}

impl RatingRecord {
    pub fn new(name: impl Into<String>, rating: f64, uncertainty: f64) -> Self {
        Self {
            name: name.into(),
            rating,
            uncertainty,
        }
    }
}

/// Ratings keyed by engine name
///
/// Records keep the position where their name was first seen, so callers
/// that need a deterministic order can fall back to parse order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTable {
    records: Vec<RatingRecord>,
    index: HashMap<String, usize>,
}

impl RatingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, overwriting any earlier record with the same name
    ///
    /// Returns the replaced record, if there was one.
    pub fn insert(&mut self, record: RatingRecord) -> Option<RatingRecord> {
        match self.index.get(&record.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RatingRecord> {
        self.index.get(name).map(|&slot| &self.records[slot])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &RatingRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    /// Apply `f` to every rating, keeping names, order and uncertainty
    pub(crate) fn map_ratings(self, f: impl Fn(f64) -> f64) -> Self {
        let records = self
            .records
            .into_iter()
            .map(|r| RatingRecord {
                rating: f(r.rating),
                ..r
            })
            .collect();
        Self {
            records,
            index: self.index,
        }
    }
}

impl FromIterator<RatingRecord> for RatingTable {
    fn from_iter<I: IntoIterator<Item = RatingRecord>>(iter: I) -> Self {
        let mut table = RatingTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

/// Row shapes recognized in BayesElo output, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseRule {
    /// `rank name elo err ...` as printed by `ratings`
    RankedColumns,
    /// `name : elo +/- err`
    ColonForm,
    /// `name elo err` with nothing else on the line
    BareColumns,
}

static RANKED_COLUMNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\d+\s+(.+?)\s+(-?\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\b")
        .expect("ranked columns pattern")
});
static COLON_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(.+?)\s*:\s*(-?\d+(?:\.\d+)?)\s*\+/-\s*(\d+(?:\.\d+)?)\s*$")
        .expect("colon form pattern")
});
static BARE_COLUMNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(.+?)\s+(-?\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s*$")
        .expect("bare columns pattern")
});

impl ParseRule {
    pub const ORDERED: [ParseRule; 3] = [
        ParseRule::RankedColumns,
        ParseRule::ColonForm,
        ParseRule::BareColumns,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            ParseRule::RankedColumns => &*RANKED_COLUMNS,
            ParseRule::ColonForm => &*COLON_FORM,
            ParseRule::BareColumns => &*BARE_COLUMNS,
        }
    }

    /// Try this rule alone on one line
    pub fn extract(self, line: &str) -> Option<RatingRecord> {
        let caps = self.pattern().captures(line)?;
        let name = caps.get(1)?.as_str().trim();
        if name.is_empty() {
            return None;
        }
        let rating = caps.get(2)?.as_str().parse().ok()?;
        let uncertainty = caps.get(3)?.as_str().parse().ok()?;
        Some(RatingRecord::new(name, rating, uncertainty))
    }
}

/// Try every rule in order on one line; first match wins
pub fn extract_record(line: &str) -> Option<(ParseRule, RatingRecord)> {
    ParseRule::ORDERED
        .iter()
        .find_map(|&rule| rule.extract(line).map(|record| (rule, record)))
}

/// Index of the first line after the table header, or 0 if there is none
pub fn table_start(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|line| line.contains(NAME_MARKER) && line.contains(ELO_MARKER))
        .map_or(0, |header| header + 1)
}

/// Parse BayesElo output into a rating table
///
/// Lines that match no rule are skipped. If a name shows up twice the later
/// row wins. Fails with [`RateError::ParseFailure`] if nothing matched.
pub fn parse_ratings(output: &str) -> Result<RatingTable> {
    let lines: Vec<&str> = output.lines().collect();
    let start = table_start(&lines);
    debug!(start, total = lines.len(), "scanning BayesElo output");

    let mut table = RatingTable::new();
    for line in &lines[start..] {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        let Some((rule, record)) = extract_record(line) else {
            continue;
        };
        debug!(?rule, name = %record.name, "matched ratings row");
        if let Some(previous) = table.insert(record) {
            warn!(
                name = %previous.name,
                "engine listed more than once in BayesElo output; keeping the later row"
            );
        }
    }

    if table.is_empty() {
        let tail_start = lines.len().saturating_sub(FAILURE_TAIL_LINES);
        return Err(RateError::ParseFailure {
            tail: lines[tail_start..].join("\n"),
        });
    }
    Ok(table)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
