//! Coarse defensive position groups

use serde::Serialize;
use std::fmt;

/// Defensive role bucket derived from the raw roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PositionGroup {
    LB,
    CB,
    S,
    Other,
}

/// Checked in this order; the first group with a matching token wins.
const RULES: &[(PositionGroup, &[&str])] = &[
    (PositionGroup::LB, &["LB", "ILB", "MLB", "OLB"]),
    (PositionGroup::CB, &["CB", "DB"]),
    (PositionGroup::S, &["S", "SAF"]),
];

impl PositionGroup {
    pub const ALL: [PositionGroup; 4] = [
        PositionGroup::LB,
        PositionGroup::CB,
        PositionGroup::S,
        PositionGroup::Other,
    ];

    /// Classify a raw position string by substring membership.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(pos) = raw else {
            return PositionGroup::Other;
        };
        RULES
            .iter()
            .find(|(_, tokens)| tokens.iter().any(|t| pos.contains(t)))
            .map(|(group, _)| *group)
            .unwrap_or(PositionGroup::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionGroup::LB => "LB",
            PositionGroup::CB => "CB",
            PositionGroup::S => "S",
            PositionGroup::Other => "Other",
        }
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
