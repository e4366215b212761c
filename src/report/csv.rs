//! CSV report output

use crate::board::Board;
use crate::view::RankedView;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    player_id: &'a str,
    display_name: &'a str,
    position: &'a str,
    position_group: &'static str,
    latest_team: &'a str,
    play_count: u32,
    avg_attention: f64,
    high_attention_pct: f64,
    intervention_removal_count: u32,
    impact_removal_mean: f64,
    category: &'static str,
}

pub fn write<W: Write>(writer: &mut W, board: &Board, view: &RankedView) -> io::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for ranked in &view.rows {
        let row = &ranked.row;
        wtr.serialize(CsvRow {
            rank: ranked.rank,
            player_id: &row.player_id,
            display_name: row.display_name.as_deref().unwrap_or(""),
            position: row.position.as_deref().unwrap_or(""),
            position_group: row.position_group.as_str(),
            latest_team: row.latest_team.as_deref().unwrap_or(""),
            play_count: row.play_count,
            avg_attention: row.avg_attention,
            high_attention_pct: row.high_attention_pct,
            intervention_removal_count: row.intervention_removal_count,
            impact_removal_mean: row.impact_removal_mean,
            category: board.category(row).label(),
        })?;
    }

    wtr.flush()
}
