//! Locating the input files
//!
//! A data directory is searched recursively for the conventional file names;
//! any of them can be overridden with an explicit path.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const ATTENTION_FILE: &str = "player_attention_metrics.csv";
pub const PLAYERS_FILE: &str = "nfl_players.csv";
pub const TEAMS_FILE: &str = "nfl_teams.csv";
pub const INTERVENTIONS_FILE: &str = "detailed_results.csv";

/// Resolved locations of the four input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub attention: PathBuf,
    pub players: PathBuf,
    pub teams: PathBuf,
    /// Optional: without it every player gets zero interventions.
    pub interventions: Option<PathBuf>,
}

/// Explicit per-file paths that win over discovery.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub attention: Option<PathBuf>,
    pub players: Option<PathBuf>,
    pub teams: Option<PathBuf>,
    pub interventions: Option<PathBuf>,
}

impl DataPaths {
    /// Search `dir` for the default file names, applying overrides first.
    pub fn discover(dir: &Path, overrides: Overrides) -> Result<Self> {
        let found = scan(dir);
        let pick = |explicit: Option<PathBuf>, name: &'static str| {
            explicit.or_else(|| found.iter().find(|p| file_name_is(p, name)).cloned())
        };

        let attention = pick(overrides.attention, ATTENTION_FILE)
            .ok_or(Error::MissingInput { name: ATTENTION_FILE })?;
        let players = pick(overrides.players, PLAYERS_FILE)
            .ok_or(Error::MissingInput { name: PLAYERS_FILE })?;
        let teams = pick(overrides.teams, TEAMS_FILE)
            .ok_or(Error::MissingInput { name: TEAMS_FILE })?;
        let interventions = pick(overrides.interventions, INTERVENTIONS_FILE);

        log::debug!(
            "data paths: attention={} players={} teams={} interventions={:?}",
            attention.display(),
            players.display(),
            teams.display(),
            interventions
        );

        Ok(Self { attention, players, teams, interventions })
    }

    /// All configured files, in a fixed order.
    pub fn files(&self) -> Vec<&Path> {
        let mut files = vec![self.attention.as_path(), self.players.as_path(), self.teams.as_path()];
        if let Some(ref p) = self.interventions {
            files.push(p.as_path());
        }
        files
    }
}

/// CSV files under `dir`, shallowest first so a top-level file beats a
/// copy buried in a subfolder.
fn scan(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .map(|e| (e.depth(), e.path().to_path_buf()))
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .map(|(_, p)| p)
        .collect()
}

fn file_name_is(path: &Path, name: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.eq_ignore_ascii_case(name))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discover_finds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(ATTENTION_FILE));
        touch(&dir.path().join(PLAYERS_FILE));
        touch(&dir.path().join("meta").join(TEAMS_FILE));
        touch(&dir.path().join(INTERVENTIONS_FILE));

        let paths = DataPaths::discover(dir.path(), Overrides::default()).unwrap();
        assert_eq!(paths.attention, dir.path().join(ATTENTION_FILE));
        assert_eq!(paths.teams, dir.path().join("meta").join(TEAMS_FILE));
        assert_eq!(paths.interventions, Some(dir.path().join(INTERVENTIONS_FILE)));
        assert_eq!(paths.files().len(), 4);
    }

    #[test]
    fn test_discover_prefers_shallow_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a").join(ATTENTION_FILE));
        touch(&dir.path().join(ATTENTION_FILE));
        touch(&dir.path().join(PLAYERS_FILE));
        touch(&dir.path().join(TEAMS_FILE));

        let paths = DataPaths::discover(dir.path(), Overrides::default()).unwrap();
        assert_eq!(paths.attention, dir.path().join(ATTENTION_FILE));
    }

    #[test]
    fn test_discover_interventions_optional() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(ATTENTION_FILE));
        touch(&dir.path().join(PLAYERS_FILE));
        touch(&dir.path().join(TEAMS_FILE));

        let paths = DataPaths::discover(dir.path(), Overrides::default()).unwrap();
        assert_eq!(paths.interventions, None);
        assert_eq!(paths.files().len(), 3);
    }

    #[test]
    fn test_discover_missing_required() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(ATTENTION_FILE));
        touch(&dir.path().join(TEAMS_FILE));

        let err = DataPaths::discover(dir.path(), Overrides::default()).unwrap_err();
        assert!(matches!(err, Error::MissingInput { name } if name == PLAYERS_FILE));
    }

    #[test]
    fn test_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(ATTENTION_FILE));
        touch(&dir.path().join(PLAYERS_FILE));
        touch(&dir.path().join(TEAMS_FILE));
        let custom = dir.path().join("roster_2023.csv");
        touch(&custom);

        let overrides = Overrides { players: Some(custom.clone()), ..Default::default() };
        let paths = DataPaths::discover(dir.path(), overrides).unwrap();
        assert_eq!(paths.players, custom);
    }
}
