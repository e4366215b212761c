//! Attention Board - Rank NFL defenders by model attention and counterfactual impact
//!
//! A trajectory model attends to defenders while predicting plays. Two
//! upstream jobs summarise that: per-defender attention metrics, and
//! counterfactual runs where a defender is removed (or frozen, slowed,
//! misdirected) and the prediction shift is recorded. This crate joins those
//! outputs with roster and team metadata and turns them into a ranked,
//! filterable leaderboard.
//!
//! # Overview
//!
//! Four CSV tables go in. Join keys are normalized, attention rows are joined
//! to player and team metadata, raw positions are grouped into LB / CB / S /
//! Other, and intervention results are averaged per defender. The result is
//! the full enriched table, held by a [`Board`].
//!
//! # Quick Start
//!
//! ```no_run
//! use attention_board::config::{DataPaths, Overrides};
//! use attention_board::{load_tables, Board, ViewParams};
//! use std::path::Path;
//!
//! let paths = DataPaths::discover(Path::new("data"), Overrides::default())?;
//! let board = Board::new(load_tables(&paths)?)?;
//!
//! for ranked in &board.view(&ViewParams::default()).rows {
//!     let row = &ranked.row;
//!     println!(
//!         "#{} {} {:.2}% [{}]",
//!         ranked.rank,
//!         row.display_name.as_deref().unwrap_or("Unknown"),
//!         row.impact_removal_mean * 100.0,
//!         board.category(row)
//!     );
//! }
//! # Ok::<(), attention_board::Error>(())
//! ```
//!
//! # Categories
//!
//! Each defender falls into a quadrant relative to the medians of the full
//! table, never of the filtered view:
//!
//! | Attention | Impact | Label |
//! |-----------|--------|-------|
//! | ≥ median | ≥ median | High/High |
//! | < median | ≥ median | Low/High |
//! | ≥ median | < median | High/Low |
//! | < median | < median | Low/Low |
//!
//! # Modules
//!
//! - [`load`] / [`config`]: CSV ingestion and input file discovery
//! - [`pipeline`]: Join, position grouping and intervention aggregation
//! - [`view`]: Filtered, sorted, ranked projections
//! - [`category`]: Median-split quadrant labels
//! - [`report`]: Output formatters (HTML, JSON, CSV)
//! - [`serve`]: Interactive page over HTTP

pub mod board;
pub mod category;
pub mod config;
pub mod error;
pub mod labels;
pub mod load;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod serve;
pub mod source;
pub mod tables;
pub mod view;

pub use board::Board;
pub use category::{Category, CategoryClassifier};
pub use error::{Error, Result};
pub use load::load_tables;
pub use pipeline::{EnrichedPlayerRow, InterventionStats, PositionGroup};
pub use tables::{InterventionType, Tables};
pub use view::{RankedRow, RankedView, ViewParams};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PUBLIC API TESTS
    // ==========================================================================
    //
    // These tests verify the public API surface is correct and documented.
    // ==========================================================================

    #[test]
    fn test_public_exports() {
        // Core types are re-exported from crate root
        let board = Board::new(Tables::default()).unwrap();
        let view: RankedView = board.view(&ViewParams::default());
        assert!(view.is_empty());
        assert_eq!(board.intervention_kind(), InterventionType::Removal);
    }

    #[test]
    fn test_empty_board_has_zero_medians() {
        let board = Board::new(Tables::default()).unwrap();
        let c: &CategoryClassifier = board.classifier();
        assert_eq!(c.attention_median, 0.0);
        assert_eq!(c.impact_median, 0.0);
        assert!(board.max_impact().is_none());
    }

    #[test]
    fn test_category_from_flags_covers_every_variant() {
        assert_eq!(Category::from_flags(true, true), Category::HighHigh);
        assert_eq!(Category::from_flags(false, true), Category::LowHigh);
        assert_eq!(Category::from_flags(true, false), Category::HighLow);
        assert_eq!(Category::from_flags(false, false), Category::LowLow);
    }
}
