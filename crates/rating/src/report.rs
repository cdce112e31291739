//! Relative rating report

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RateError, Result};
use crate::normalize::NormalizedTable;
use crate::parser::RatingRecord;

/// Report format version
pub const REPORT_VERSION: &str = "0";

/// Only within-run standing is reported
pub const MODE_RELATIVE_ONLY: &str = "relative-only";

pub const NOTES_FULL: &str = "Relative Elo, mean-centered; not calibrated to any external scale.";
pub const NOTES_SINGLE: &str = "Relative Elo, mean-centered; not calibrated.";

/// Rows of a report: the whole leaderboard or one engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportBody {
    Ratings(Vec<RatingRecord>),
    Engine(RatingRecord),
}

/// Report for one rating run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub version: String,
    pub mode: String,
    /// The PGN the ratings were computed from
    pub pgn: String,
    #[serde(flatten)]
    pub body: ReportBody,
    pub notes: String,
}

/// How to lay out the JSON report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonStyle {
    /// Pretty leaderboard, single-line engine row
    #[default]
    Auto,
    Pretty,
    Compact,
}

impl FromStr for JsonStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(JsonStyle::Auto),
            "pretty" => Ok(JsonStyle::Pretty),
            "compact" => Ok(JsonStyle::Compact),
            other => Err(format!(
                "unknown JSON style '{}' (use auto|pretty|compact)",
                other
            )),
        }
    }
}

impl fmt::Display for JsonStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonStyle::Auto => write!(f, "auto"),
            JsonStyle::Pretty => write!(f, "pretty"),
            JsonStyle::Compact => write!(f, "compact"),
        }
    }
}

impl Report {
    /// Rows in report order; a single-engine report has exactly one
    pub fn rows(&self) -> &[RatingRecord] {
        match &self.body {
            ReportBody::Ratings(rows) => rows,
            ReportBody::Engine(row) => std::slice::from_ref(row),
        }
    }

    pub fn is_single(&self) -> bool {
        matches!(self.body, ReportBody::Engine(_))
    }

    /// Serialize to JSON
    pub fn to_json(&self, style: JsonStyle) -> Result<String> {
        let pretty = match style {
            JsonStyle::Auto => !self.is_single(),
            JsonStyle::Pretty => true,
            JsonStyle::Compact => false,
        };
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Rows sorted by descending delta; equal deltas keep parse order
pub fn leaderboard(table: &NormalizedTable) -> Vec<RatingRecord> {
    let mut rows: Vec<RatingRecord> = table.iter().cloned().collect();
    rows.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    rows
}

/// Build the report for `table`, optionally reduced to one engine
///
/// `source` is echoed verbatim as the report's `pgn` field.
pub fn assemble(table: &NormalizedTable, source: &str, engine: Option<&str>) -> Result<Report> {
    let rows = leaderboard(table);

    let (body, notes) = match engine {
        None => (ReportBody::Ratings(rows), NOTES_FULL),
        Some(name) => {
            let known: Vec<String> = rows.iter().map(|r| r.name.clone()).collect();
            let row = rows.into_iter().find(|r| r.name == name).ok_or_else(|| {
                RateError::ParticipantNotFound {
                    name: name.to_string(),
                    known,
                }
            })?;
            (ReportBody::Engine(row), NOTES_SINGLE)
        }
    };

    Ok(Report {
        version: REPORT_VERSION.to_string(),
        mode: MODE_RELATIVE_ONLY.to_string(),
        pgn: source.to_string(),
        body,
        notes: notes.to_string(),
    })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
