//! Relative Elo ratings for ML-chess engines
//!
//! This crate turns a PGN of finished engine games into a relative,
//! mean-centered Elo table:
//! - Driving BayesElo through its interactive command session
//! - Recognizing the ratings table in whatever layout BayesElo printed
//! - Recentering ratings so only within-run standing remains
//! - Emitting a JSON report, optionally reduced to a single engine
//!
//! # Usage
//!
//! ```bash
//! # Rate every engine in a gauntlet PGN
//! cargo run -p rating -- --pgn runs/gauntlet_20240101_120000.pgn
//!
//! # Only report one engine's row
//! cargo run -p rating -- --pgn runs/gauntlet.pgn --engine-name EUT
//! ```
//!
//! Values are not calibrated to any external scale: a rating of `+40`
//! means "40 Elo above the average participant of this PGN", nothing more.

mod backend;
mod config;
mod error;
mod normalize;
mod parser;
mod rater;
mod report;

pub use backend::*;
pub use config::*;
pub use error::*;
pub use normalize::*;
pub use parser::*;
pub use rater::*;
pub use report::*;

#[cfg(test)]
mod test_support;
