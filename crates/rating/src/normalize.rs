//! Mean-centering of BayesElo ratings
//!
//! BayesElo anchors its scale on whatever mix of players and games a PGN
//! happens to contain, so absolute numbers from two runs cannot be
//! compared. Subtracting the mean leaves only relative standing.

use crate::parser::{RatingRecord, RatingTable};

/// Rating table whose `rating` fields are offsets from the table mean
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    table: RatingTable,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Records in parse order; `rating` holds the delta
    pub fn iter(&self) -> impl Iterator<Item = &RatingRecord> {
        self.table.iter()
    }

    pub fn get(&self, name: &str) -> Option<&RatingRecord> {
        self.table.get(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.table.names()
    }

    /// Sum of all deltas (zero up to rounding for a non-empty table)
    pub fn delta_sum(&self) -> f64 {
        self.table.iter().map(|r| r.rating).sum()
    }
}

/// Arithmetic mean of all ratings, `None` for an empty table
pub fn mean_rating(table: &RatingTable) -> Option<f64> {
    if table.is_empty() {
        return None;
    }
    let sum: f64 = table.iter().map(|r| r.rating).sum();
    Some(sum / table.len() as f64)
}

/// Shift every rating by the table mean; uncertainties pass through
///
/// An empty table comes back empty.
pub fn mean_center(table: RatingTable) -> NormalizedTable {
    let table = match mean_rating(&table) {
        Some(mean) => table.map_ratings(|rating| rating - mean),
        None => table,
    };
    NormalizedTable { table }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
