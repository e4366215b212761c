//! CSV ingestion for the four input tables
//!
//! Each loader checks the header row before deserializing so a missing column
//! fails fast with the table and column named, instead of surfacing as a
//! confusing per-row error. Unknown extra columns are ignored. Malformed rows
//! are errors: nothing is dropped silently.

use crate::config::DataPaths;
use crate::error::{Error, Result};
use crate::tables::{
    InterventionRecord, PlayerAttentionRecord, PlayerMeta, Tables, TeamMeta,
};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ATTENTION_TABLE: &str = "attention";
pub const PLAYERS_TABLE: &str = "players";
pub const TEAMS_TABLE: &str = "teams";
pub const INTERVENTIONS_TABLE: &str = "interventions";

/// A required column and the header spellings accepted for it.
type Column = (&'static str, &'static [&'static str]);

const ATTENTION_COLUMNS: &[Column] = &[
    ("nfl_id", &["nfl_id", "player_id"]),
    ("total_attention", &["total_attention"]),
    ("avg_attention", &["avg_attention"]),
    ("max_attention", &["max_attention"]),
    ("std_attention", &["std_attention"]),
    ("median_attention", &["median_attention"]),
    ("play_count", &["play_count"]),
    ("frame_count", &["frame_count"]),
    ("high_attention_pct", &["high_attention_pct"]),
];

const PLAYER_COLUMNS: &[Column] = &[
    ("nfl_id", &["nfl_id", "player_id"]),
    ("display_name", &["display_name"]),
    ("position", &["position"]),
    ("latest_team", &["latest_team"]),
    ("headshot", &["headshot"]),
];

const TEAM_COLUMNS: &[Column] = &[
    ("team_abbr", &["team_abbr"]),
    ("team_color", &["team_color"]),
    ("team_color2", &["team_color2"]),
    ("team_logo_squared", &["team_logo_squared"]),
    ("team_wordmark", &["team_wordmark"]),
];

const INTERVENTION_COLUMNS: &[Column] = &[
    ("game_id", &["game_id"]),
    ("play_id", &["play_id"]),
    ("defender_nfl_id", &["defender_nfl_id", "defender_id"]),
    ("intervention_type", &["intervention_type"]),
    ("original_prediction", &["original_prediction"]),
    ("counterfactual_prediction", &["counterfactual_prediction"]),
    ("impact_score", &["impact_score"]),
];

// ============================================================================
// Raw CSV rows
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawAttention {
    #[serde(alias = "player_id")]
    nfl_id: String,
    #[serde(deserialize_with = "de_float")]
    total_attention: f64,
    #[serde(deserialize_with = "de_float")]
    avg_attention: f64,
    #[serde(deserialize_with = "de_float")]
    max_attention: f64,
    #[serde(deserialize_with = "de_float")]
    std_attention: f64,
    #[serde(deserialize_with = "de_float")]
    median_attention: f64,
    #[serde(deserialize_with = "de_count")]
    play_count: u32,
    #[serde(deserialize_with = "de_count")]
    frame_count: u32,
    #[serde(deserialize_with = "de_float")]
    high_attention_pct: f64,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(alias = "player_id")]
    nfl_id: String,
    display_name: Option<String>,
    position: Option<String>,
    latest_team: Option<String>,
    headshot: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    team_abbr: String,
    team_color: Option<String>,
    team_color2: Option<String>,
    team_logo_squared: Option<String>,
    team_wordmark: Option<String>,
}

/// Intervention floats stay strict: an empty impact would turn the
/// defender's mean into NaN, so it is a load error instead.
#[derive(Debug, Deserialize)]
struct RawIntervention {
    game_id: String,
    play_id: String,
    #[serde(alias = "defender_id")]
    defender_nfl_id: String,
    intervention_type: String,
    original_prediction: f64,
    counterfactual_prediction: f64,
    impact_score: f64,
}

/// Counts arrive as "12" or, from float-typed exports, "12.0".
fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_count(&raw).ok_or_else(|| D::Error::custom(format!("invalid count '{}'", raw)))
}

/// Metric cells left empty by the exporter (pandas writes NaN that way)
/// load as NaN; anything else must parse as a float.
fn de_float<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_float(&raw).ok_or_else(|| D::Error::custom(format!("invalid number '{}'", raw)))
}

fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(f64::NAN);
    }
    s.parse().ok()
}

fn parse_count(raw: &str) -> Option<u32> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    let f: f64 = s.parse().ok()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

// ============================================================================
// Reader-based loaders
// ============================================================================

fn open_checked<R: Read>(
    rdr: R,
    path: &Path,
    table: &'static str,
    columns: &[Column],
) -> Result<csv::Reader<R>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(rdr);
    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    for (column, accepted) in columns {
        if !headers.iter().any(|h| accepted.contains(&h)) {
            return Err(Error::MissingColumn { table, column });
        }
    }
    Ok(reader)
}

fn csv_error(path: &Path, source: csv::Error) -> Error {
    Error::Csv { path: path.to_path_buf(), source }
}

pub fn read_attention<R: Read>(rdr: R, path: &Path) -> Result<Vec<PlayerAttentionRecord>> {
    let mut reader = open_checked(rdr, path, ATTENTION_TABLE, ATTENTION_COLUMNS)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawAttention>() {
        let raw = result.map_err(|e| csv_error(path, e))?;
        rows.push(PlayerAttentionRecord {
            player_id: raw.nfl_id,
            total_attention: raw.total_attention,
            avg_attention: raw.avg_attention,
            max_attention: raw.max_attention,
            std_attention: raw.std_attention,
            median_attention: raw.median_attention,
            play_count: raw.play_count,
            frame_count: raw.frame_count,
            high_attention_pct: raw.high_attention_pct,
        });
    }
    Ok(rows)
}

pub fn read_players<R: Read>(rdr: R, path: &Path) -> Result<Vec<PlayerMeta>> {
    let mut reader = open_checked(rdr, path, PLAYERS_TABLE, PLAYER_COLUMNS)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawPlayer>() {
        let raw = result.map_err(|e| csv_error(path, e))?;
        rows.push(PlayerMeta {
            player_id: raw.nfl_id,
            display_name: raw.display_name,
            position: raw.position,
            latest_team: raw.latest_team,
            headshot: raw.headshot,
        });
    }
    Ok(rows)
}

pub fn read_teams<R: Read>(rdr: R, path: &Path) -> Result<Vec<TeamMeta>> {
    let mut reader = open_checked(rdr, path, TEAMS_TABLE, TEAM_COLUMNS)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawTeam>() {
        let raw = result.map_err(|e| csv_error(path, e))?;
        rows.push(TeamMeta {
            team_abbr: raw.team_abbr,
            team_color: raw.team_color,
            team_color2: raw.team_color2,
            team_logo_squared: raw.team_logo_squared,
            team_wordmark: raw.team_wordmark,
        });
    }
    Ok(rows)
}

pub fn read_interventions<R: Read>(rdr: R, path: &Path) -> Result<Vec<InterventionRecord>> {
    let mut reader = open_checked(rdr, path, INTERVENTIONS_TABLE, INTERVENTION_COLUMNS)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawIntervention>() {
        let raw = result.map_err(|e| csv_error(path, e))?;
        rows.push(InterventionRecord {
            game_id: raw.game_id,
            play_id: raw.play_id,
            defender_id: raw.defender_nfl_id,
            intervention_type: raw.intervention_type.parse()?,
            original_prediction: raw.original_prediction,
            counterfactual_prediction: raw.counterfactual_prediction,
            impact_score: raw.impact_score,
        });
    }
    Ok(rows)
}

// ============================================================================
// Path-based loaders
// ============================================================================

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}

/// Load all configured tables from disk.
///
/// A missing intervention file is allowed: every player then carries the
/// zero-count defaults.
pub fn load_tables(paths: &DataPaths) -> Result<Tables> {
    let attention = read_attention(open_file(&paths.attention)?, &paths.attention)?;
    let players = read_players(open_file(&paths.players)?, &paths.players)?;
    let teams = read_teams(open_file(&paths.teams)?, &paths.teams)?;
    let interventions = match &paths.interventions {
        Some(path) => read_interventions(open_file(path)?, path)?,
        None => {
            log::warn!("no intervention results configured; impact defaults to 0");
            Vec::new()
        }
    };

    log::info!(
        "loaded {} attention rows, {} players, {} teams, {} interventions",
        attention.len(),
        players.len(),
        teams.len(),
        interventions.len()
    );

    Ok(Tables { attention, players, teams, interventions })
}
