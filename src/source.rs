//! Reloading the board when input files change
//!
//! The serve loop asks for the current board on every request. Building it
//! is cheap, reading four CSVs on every request is not, so the built board is
//! kept until any input file's fingerprint (modified time + length) changes.
//! Any change reloads everything.

use crate::board::Board;
use crate::config::DataPaths;
use crate::error::{Error, Result};
use crate::load::load_tables;
use crate::tables::InterventionType;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Fingerprint {
    path: PathBuf,
    modified: Option<SystemTime>,
    len: u64,
}

fn fingerprint(path: &Path) -> Result<Fingerprint> {
    let meta = std::fs::metadata(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    Ok(Fingerprint { path: path.to_path_buf(), modified: meta.modified().ok(), len: meta.len() })
}

pub struct TableSource {
    paths: DataPaths,
    kind: InterventionType,
    cached: Option<(Vec<Fingerprint>, Board)>,
}

impl TableSource {
    pub fn new(paths: DataPaths, kind: InterventionType) -> Self {
        Self { paths, kind, cached: None }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    fn fingerprints(&self) -> Result<Vec<Fingerprint>> {
        self.paths.files().into_iter().map(fingerprint).collect()
    }

    /// The board for the current file contents, rebuilding if stale.
    pub fn board(&mut self) -> Result<&Board> {
        let current = self.fingerprints()?;
        let entry = match self.cached.take() {
            Some((prints, board)) if prints == current => (prints, board),
            previous => {
                if previous.is_some() {
                    log::info!("input files changed, reloading");
                }
                let tables = load_tables(&self.paths)?;
                (current, Board::with_intervention(tables, self.kind)?)
            }
        };
        Ok(&self.cached.insert(entry).1)
    }

    /// Drop the cached board so the next call reloads.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ATTENTION_HEADER: &str = "nfl_id,total_attention,avg_attention,max_attention,std_attention,median_attention,play_count,frame_count,high_attention_pct\n";

    fn write_inputs(dir: &Path, attention_rows: &str) -> DataPaths {
        let paths = DataPaths {
            attention: dir.join("player_attention_metrics.csv"),
            players: dir.join("nfl_players.csv"),
            teams: dir.join("nfl_teams.csv"),
            interventions: None,
        };
        fs::write(&paths.attention, format!("{}{}", ATTENTION_HEADER, attention_rows)).unwrap();
        fs::write(&paths.players, "nfl_id,display_name,position,latest_team,headshot\n1,Alice,LB,KC,\n").unwrap();
        fs::write(&paths.teams, "team_abbr,team_color,team_color2,team_logo_squared,team_wordmark\nKC,#E31837,#FFB81C,,\n").unwrap();
        paths
    }

    #[test]
    fn test_board_cached_until_change() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_inputs(dir.path(), "1,3,0.3,0.5,0.1,0.3,100,900,40\n");
        let mut source = TableSource::new(paths.clone(), InterventionType::Removal);

        assert_eq!(source.board().unwrap().enriched().len(), 1);
        assert_eq!(source.board().unwrap().enriched().len(), 1);

        // Length changes even if the mtime resolution is coarse
        fs::write(
            &paths.attention,
            format!("{}1,3,0.3,0.5,0.1,0.3,100,900,40\n2,1,0.1,0.2,0.1,0.1,20,200,10\n", ATTENTION_HEADER),
        )
        .unwrap();
        assert_eq!(source.board().unwrap().enriched().len(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_inputs(dir.path(), "1,3,0.3,0.5,0.1,0.3,100,900,40\n");
        let mut source = TableSource::new(paths, InterventionType::Removal);
        assert!(source.board().is_ok());
        source.invalidate();
        assert!(source.cached.is_none());
        assert!(source.board().is_ok());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_inputs(dir.path(), "");
        fs::remove_file(&paths.teams).unwrap();
        let mut source = TableSource::new(paths, InterventionType::Removal);
        assert!(matches!(source.board(), Err(Error::Io { .. })));
    }
}
