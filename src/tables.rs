//! Input tables consumed by the pipeline
//!
//! All four tables are produced upstream (the attention model and the
//! counterfactual intervention runs) and are treated as immutable once
//! loaded. Optional metadata stays `None` when absent so presentation code
//! can tell "no data" apart from an empty string.

use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Season-aggregate attention metrics for one defender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerAttentionRecord {
    pub player_id: String,
    pub total_attention: f64,
    pub avg_attention: f64,
    pub max_attention: f64,
    pub std_attention: f64,
    pub median_attention: f64,
    pub play_count: u32,
    pub frame_count: u32,
    /// Percentage (0-100) of frames where the defender was among the most attended.
    pub high_attention_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMeta {
    pub player_id: String,
    pub display_name: Option<String>,
    pub position: Option<String>,
    pub latest_team: Option<String>,
    pub headshot: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMeta {
    pub team_abbr: String,
    pub team_color: Option<String>,
    pub team_color2: Option<String>,
    pub team_logo_squared: Option<String>,
    pub team_wordmark: Option<String>,
}

/// Kind of counterfactual applied to a defender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterventionType {
    Removal,
    Freeze,
    Slowdown,
    Misdirection,
}

impl InterventionType {
    pub const ALL: [InterventionType; 4] = [
        InterventionType::Removal,
        InterventionType::Freeze,
        InterventionType::Slowdown,
        InterventionType::Misdirection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionType::Removal => "removal",
            InterventionType::Freeze => "freeze",
            InterventionType::Slowdown => "slowdown",
            InterventionType::Misdirection => "misdirection",
        }
    }
}

impl fmt::Display for InterventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterventionType {
    type Err = Error;

    /// Upstream files have used both "removal" and "REMOVAL".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "removal" => Ok(InterventionType::Removal),
            "freeze" => Ok(InterventionType::Freeze),
            "slowdown" => Ok(InterventionType::Slowdown),
            "misdirection" => Ok(InterventionType::Misdirection),
            _ => Err(Error::UnknownIntervention(s.to_string())),
        }
    }
}

/// One counterfactual run for one defender on one play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionRecord {
    pub game_id: String,
    pub play_id: String,
    pub defender_id: String,
    pub intervention_type: InterventionType,
    pub original_prediction: f64,
    pub counterfactual_prediction: f64,
    /// original - counterfactual, sign convention set upstream
    pub impact_score: f64,
}

/// The four raw inputs, bundled.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub attention: Vec<PlayerAttentionRecord>,
    pub players: Vec<PlayerMeta>,
    pub teams: Vec<TeamMeta>,
    pub interventions: Vec<InterventionRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervention_type_case_insensitive() {
        assert_eq!("removal".parse::<InterventionType>().unwrap(), InterventionType::Removal);
        assert_eq!("REMOVAL".parse::<InterventionType>().unwrap(), InterventionType::Removal);
        assert_eq!(" Freeze ".parse::<InterventionType>().unwrap(), InterventionType::Freeze);
        assert_eq!("slowdown".parse::<InterventionType>().unwrap(), InterventionType::Slowdown);
        assert_eq!("MisDirection".parse::<InterventionType>().unwrap(), InterventionType::Misdirection);
    }

    #[test]
    fn test_intervention_type_unknown() {
        let err = "teleport".parse::<InterventionType>().unwrap_err();
        assert!(matches!(err, Error::UnknownIntervention(ref s) if s == "teleport"));
    }

    #[test]
    fn test_intervention_type_display_round_trip() {
        for kind in InterventionType::ALL {
            assert_eq!(kind.to_string().parse::<InterventionType>().unwrap(), kind);
        }
    }
}
