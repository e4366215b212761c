//! The enrichment pipeline
//!
//! Raw tables go through four stages, always in this order:
//!
//! 1. **Normalize** join keys to canonical strings ([`crate::normalize`])
//! 2. **Join** attention rows to player and team metadata ([`join`])
//! 3. **Group** raw positions into LB / CB / S / Other ([`position`])
//! 4. **Aggregate** intervention results per defender ([`interventions`])
//!
//! The output is the full enriched table: one row per attention record.
//! Views and category labels are derived from it, never the other way round.

pub mod interventions;
pub mod join;
pub mod position;

pub use interventions::InterventionStats;
pub use position::PositionGroup;

use crate::error::Result;
use crate::normalize::normalize;
use crate::tables::{InterventionType, Tables};
use serde::Serialize;

/// One defender with metadata, position group and intervention stats.
///
/// Metadata fields are `None` when the player or team lookup missed; the
/// row itself is always kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPlayerRow {
    pub player_id: String,
    pub display_name: Option<String>,
    pub position: Option<String>,
    pub latest_team: Option<String>,
    pub headshot: Option<String>,
    pub team_color: Option<String>,
    pub team_color2: Option<String>,
    pub team_logo_squared: Option<String>,
    pub team_wordmark: Option<String>,
    pub total_attention: f64,
    pub avg_attention: f64,
    pub max_attention: f64,
    pub std_attention: f64,
    pub median_attention: f64,
    pub play_count: u32,
    pub frame_count: u32,
    pub high_attention_pct: f64,
    pub position_group: PositionGroup,
    /// Runs of the aggregated intervention kind (removal unless configured otherwise).
    pub intervention_removal_count: u32,
    /// Mean impact over those runs, 0.0 when there were none.
    pub impact_removal_mean: f64,
}

/// Run the full pipeline on raw tables, aggregating interventions of `kind`.
pub fn build_enriched(tables: &Tables, kind: InterventionType) -> Result<Vec<EnrichedPlayerRow>> {
    enrich_normalized(&normalize(tables), kind)
}

/// Join, group and aggregate tables whose keys are already canonical.
pub fn enrich_normalized(tables: &Tables, kind: InterventionType) -> Result<Vec<EnrichedPlayerRow>> {
    let mut rows = join::join(&tables.attention, &tables.players, &tables.teams)?;
    for row in rows.iter_mut() {
        row.position_group = PositionGroup::from_raw(row.position.as_deref());
    }
    let stats = interventions::aggregate(&tables.interventions, kind);
    interventions::apply(&mut rows, &stats);

    log::debug!("enriched {} players ({} interventions)", rows.len(), kind);
    Ok(rows)
}
