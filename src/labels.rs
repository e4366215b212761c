//! Lookup tables between view parameters and their outside spellings
//!
//! Two spellings exist for every option: a short code used on the command
//! line and in query strings (`lb`, `50`, `impact`) and the dropdown label
//! shown on the page. Both are resolved here; the rest of the crate only
//! ever sees the typed values.

use crate::pipeline::PositionGroup;
use crate::view::{PlayVolume, PositionFilter, SortKey};
use std::str::FromStr;

pub const POSITION_OPTIONS: &[(PositionFilter, &str, &str)] = &[
    (PositionFilter::All, "all", "All Positions"),
    (PositionFilter::Group(PositionGroup::LB), "lb", "LB (Linebackers)"),
    (PositionFilter::Group(PositionGroup::CB), "cb", "CB (Cornerbacks)"),
    (PositionFilter::Group(PositionGroup::S), "s", "S (Safeties)"),
    (PositionFilter::Group(PositionGroup::Other), "other", "Other Positions"),
];

pub const PLAY_OPTIONS: &[(PlayVolume, &str, &str)] = &[
    (PlayVolume::Any, "0", "No Filter"),
    (PlayVolume::Pct20, "20", "≥ 20% of Max Plays"),
    (PlayVolume::Pct50, "50", "≥ 50% of Max Plays"),
    (PlayVolume::Pct80, "80", "≥ 80% of Max Plays"),
];

pub const SORT_OPTIONS: &[(SortKey, &str, &str)] = &[
    (SortKey::Impact, "impact", "Impact (High to Low)"),
    (SortKey::AvgAttention, "attention", "Avg Attention (High to Low)"),
    (SortKey::HighAttentionPct, "high-pct", "High Attention % (High to Low)"),
    (SortKey::PlayCount, "plays", "Play Count (High to Low)"),
    (SortKey::Name, "name", "Player Name (A-Z)"),
];

fn lookup<T: Copy + PartialEq>(table: &[(T, &'static str, &'static str)], value: T) -> (&'static str, &'static str) {
    table
        .iter()
        .find(|(v, _, _)| *v == value)
        .map(|(_, code, label)| (*code, *label))
        .unwrap_or(("", ""))
}

fn parse<T: Copy>(table: &[(T, &'static str, &'static str)], s: &str, what: &str) -> Result<T, String> {
    let s = s.trim();
    table
        .iter()
        .find(|(_, code, label)| code.eq_ignore_ascii_case(s) || *label == s)
        .map(|(v, _, _)| *v)
        .ok_or_else(|| {
            let codes: Vec<&str> = table.iter().map(|(_, c, _)| *c).collect();
            format!("unknown {} '{}' (expected one of: {})", what, s, codes.join(", "))
        })
}

/// Short code and display label of a parameter value.
pub trait OptionLabel: Sized + Copy {
    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

impl OptionLabel for PositionFilter {
    fn code(&self) -> &'static str {
        lookup(POSITION_OPTIONS, *self).0
    }
    fn label(&self) -> &'static str {
        lookup(POSITION_OPTIONS, *self).1
    }
}

impl OptionLabel for PlayVolume {
    fn code(&self) -> &'static str {
        lookup(PLAY_OPTIONS, *self).0
    }
    fn label(&self) -> &'static str {
        lookup(PLAY_OPTIONS, *self).1
    }
}

impl OptionLabel for SortKey {
    fn code(&self) -> &'static str {
        lookup(SORT_OPTIONS, *self).0
    }
    fn label(&self) -> &'static str {
        lookup(SORT_OPTIONS, *self).1
    }
}

impl FromStr for PositionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(POSITION_OPTIONS, s, "position")
    }
}

impl FromStr for PlayVolume {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(PLAY_OPTIONS, s, "play volume")
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(SORT_OPTIONS, s, "sort key")
    }
}
