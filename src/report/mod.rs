//! Report generation for ranked views
//!
//! This module renders one [`RankedView`] of a [`Board`] in multiple formats:
//!
//! - **HTML**: Leaderboard page with rank medals, team-coloured badges and metric bars
//! - **JSON**: Machine-readable format for programmatic consumption
//! - **CSV**: Spreadsheet-compatible format, one row per ranked player
//!
//! # Usage
//!
//! ```ignore
//! use attention_board::report;
//!
//! // Automatically picks format based on extension
//! report::generate("board.html", &board, &view)?;  // HTML
//! report::generate("board.json", &board, &view)?;  // JSON
//! report::generate("board.csv", &board, &view)?;   // CSV
//! ```

pub mod csv;
pub mod html;
pub mod json;

use crate::board::Board;
use crate::category::Category;
use crate::view::RankedView;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, board: &Board, view: &RankedView) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "html" | "htm" => html::write(&mut file, board, view),
        "json" => json::write(&mut file, board, view),
        _ => csv::write(&mut file, board, view),
    }
}

/// Headline counts for one view
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    /// Players in the full table
    pub total: usize,
    /// Players left after filtering
    pub shown: usize,
    pub high_high: usize,
    pub low_high: usize,
    pub high_low: usize,
    pub low_low: usize,
    /// Shown players per position group
    pub groups: BTreeMap<&'static str, usize>,
}

impl Summary {
    pub fn from_view(board: &Board, view: &RankedView) -> Self {
        let mut summary = Self {
            total: view.total,
            shown: view.len(),
            ..Self::default()
        };

        for ranked in &view.rows {
            match board.category(&ranked.row) {
                Category::HighHigh => summary.high_high += 1,
                Category::LowHigh => summary.low_high += 1,
                Category::HighLow => summary.high_low += 1,
                Category::LowLow => summary.low_low += 1,
            }
            *summary.groups.entry(ranked.row.position_group.as_str()).or_insert(0) += 1;
        }

        summary
    }
}
