//! Filtered, sorted, ranked projections of the enriched table
//!
//! A [`RankedView`] is rebuilt from scratch for every parameter change. The
//! builder is a pure function of the full table and a [`ViewParams`] value,
//! so the same parameters always produce the same ranks.

use crate::pipeline::{EnrichedPlayerRow, PositionGroup};
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PositionFilter {
    #[default]
    All,
    Group(PositionGroup),
}

impl PositionFilter {
    pub fn accepts(&self, group: PositionGroup) -> bool {
        match self {
            PositionFilter::All => true,
            PositionFilter::Group(g) => *g == group,
        }
    }
}

/// Minimum play volume, as a percentage of the busiest remaining player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PlayVolume {
    Any,
    Pct20,
    #[default]
    Pct50,
    Pct80,
}

impl PlayVolume {
    pub const ALL: [PlayVolume; 4] = [PlayVolume::Any, PlayVolume::Pct20, PlayVolume::Pct50, PlayVolume::Pct80];

    pub fn percent(&self) -> u32 {
        match self {
            PlayVolume::Any => 0,
            PlayVolume::Pct20 => 20,
            PlayVolume::Pct50 => 50,
            PlayVolume::Pct80 => 80,
        }
    }

    pub fn from_percent(pct: u32) -> Option<Self> {
        PlayVolume::ALL.into_iter().find(|v| v.percent() == pct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SortKey {
    #[default]
    Impact,
    AvgAttention,
    HighAttentionPct,
    PlayCount,
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Impact,
        SortKey::AvgAttention,
        SortKey::HighAttentionPct,
        SortKey::PlayCount,
        SortKey::Name,
    ];

    /// Only names sort A to Z; every metric sorts high to low.
    pub fn ascending(&self) -> bool {
        matches!(self, SortKey::Name)
    }

    fn compare(&self, a: &EnrichedPlayerRow, b: &EnrichedPlayerRow) -> Ordering {
        match self {
            SortKey::Impact => desc_f64(a.impact_removal_mean, b.impact_removal_mean),
            SortKey::AvgAttention => desc_f64(a.avg_attention, b.avg_attention),
            SortKey::HighAttentionPct => desc_f64(a.high_attention_pct, b.high_attention_pct),
            SortKey::PlayCount => b.play_count.cmp(&a.play_count),
            SortKey::Name => asc_name(a.display_name.as_deref(), b.display_name.as_deref()),
        }
    }
}

/// High to low, NaN last.
fn desc_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.total_cmp(&a),
    }
}

/// A to Z, missing names last.
fn asc_name(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Everything that shapes one view. Built fresh per interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ViewParams {
    pub position: PositionFilter,
    pub plays: PlayVolume,
    pub sort: SortKey,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    /// 1-based position in the final order
    pub rank: usize,
    #[serde(flatten)]
    pub row: EnrichedPlayerRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedView {
    pub params: ViewParams,
    /// Size of the unfiltered table the view was cut from
    pub total: usize,
    pub rows: Vec<RankedRow>,
}

impl RankedView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Play-count cutoff for `plays` over `rows`, or `None` when the filter
/// does not apply (no threshold or nothing left to measure against).
pub fn play_cutoff(rows: &[&EnrichedPlayerRow], plays: PlayVolume) -> Option<f64> {
    if plays == PlayVolume::Any {
        return None;
    }
    let max = rows.iter().map(|r| r.play_count).max()?;
    Some(plays.percent() as f64 / 100.0 * max as f64)
}

/// Filter, sort and rank `rows` according to `params`.
pub fn build(rows: &[EnrichedPlayerRow], params: &ViewParams) -> RankedView {
    let mut subset: Vec<&EnrichedPlayerRow> = rows
        .iter()
        .filter(|r| params.position.accepts(r.position_group))
        .collect();

    // Cutoff is measured against the position-filtered subset, not the full table
    if let Some(cutoff) = play_cutoff(&subset, params.plays) {
        subset.retain(|r| r.play_count as f64 >= cutoff);
        log::debug!("play cutoff {:.1} leaves {} players", cutoff, subset.len());
    }

    // sort_by is stable: ties keep input order
    subset.sort_by(|a, b| params.sort.compare(a, b));

    let rows_out = subset
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankedRow { rank: i + 1, row: r.clone() })
        .collect();

    RankedView { params: *params, total: rows.len(), rows: rows_out }
}
