//! Identity and team join
//!
//! Attention rows are left-joined to player metadata on player id, then to
//! team metadata on the player's latest team. Both metadata tables must be
//! unique per key: a duplicate would fan one attention row out into several,
//! so it is rejected outright rather than resolved by position in the file.

use super::position::PositionGroup;
use super::EnrichedPlayerRow;
use crate::error::{Error, Result};
use crate::load::{PLAYERS_TABLE, TEAMS_TABLE};
use crate::tables::{PlayerAttentionRecord, PlayerMeta, TeamMeta};
use std::collections::HashMap;

/// Index `rows` by `key`, failing on the first repeated key.
///
/// Rows with a blank key can never match and are left out of the index, so
/// any number of them is allowed.
pub fn index_unique<'a, T>(
    rows: &'a [T],
    table: &'static str,
    key: impl Fn(&T) -> &str,
) -> Result<HashMap<&'a str, &'a T>> {
    let mut index = HashMap::with_capacity(rows.len());
    let mut blank = 0usize;
    for row in rows {
        let k = key(row);
        if k.is_empty() {
            blank += 1;
            continue;
        }
        if index.insert(k, row).is_some() {
            return Err(Error::DuplicateKey { table, key: k.to_string() });
        }
    }
    if blank > 0 {
        log::debug!("{}: skipped {} rows with a blank key", table, blank);
    }
    Ok(index)
}

/// One enriched row per attention record, in attention order.
pub fn join(
    attention: &[PlayerAttentionRecord],
    players: &[PlayerMeta],
    teams: &[TeamMeta],
) -> Result<Vec<EnrichedPlayerRow>> {
    let players_by_id = index_unique(players, PLAYERS_TABLE, |p| p.player_id.as_str())?;
    let teams_by_abbr = index_unique(teams, TEAMS_TABLE, |t| t.team_abbr.as_str())?;

    let mut unmatched_players = 0usize;
    let mut unmatched_teams = 0usize;

    let rows: Vec<EnrichedPlayerRow> = attention
        .iter()
        .map(|a| {
            let player = players_by_id.get(a.player_id.as_str()).copied();
            if player.is_none() {
                unmatched_players += 1;
            }
            let team = player
                .and_then(|p| p.latest_team.as_deref())
                .and_then(|abbr| teams_by_abbr.get(abbr).copied());
            if player.is_some() && team.is_none() {
                unmatched_teams += 1;
            }
            build_row(a, player, team)
        })
        .collect();

    if unmatched_players > 0 {
        log::warn!("{} attention rows have no player metadata", unmatched_players);
    }
    if unmatched_teams > 0 {
        log::debug!("{} players have no team metadata", unmatched_teams);
    }

    Ok(rows)
}

fn build_row(
    a: &PlayerAttentionRecord,
    player: Option<&PlayerMeta>,
    team: Option<&TeamMeta>,
) -> EnrichedPlayerRow {
    EnrichedPlayerRow {
        player_id: a.player_id.clone(),
        display_name: player.and_then(|p| p.display_name.clone()),
        position: player.and_then(|p| p.position.clone()),
        latest_team: player.and_then(|p| p.latest_team.clone()),
        headshot: player.and_then(|p| p.headshot.clone()),
        team_color: team.and_then(|t| t.team_color.clone()),
        team_color2: team.and_then(|t| t.team_color2.clone()),
        team_logo_squared: team.and_then(|t| t.team_logo_squared.clone()),
        team_wordmark: team.and_then(|t| t.team_wordmark.clone()),
        total_attention: a.total_attention,
        avg_attention: a.avg_attention,
        max_attention: a.max_attention,
        std_attention: a.std_attention,
        median_attention: a.median_attention,
        play_count: a.play_count,
        frame_count: a.frame_count,
        high_attention_pct: a.high_attention_pct,
        position_group: PositionGroup::Other,
        intervention_removal_count: 0,
        impact_removal_mean: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{attention, player, team};

    #[test]
    fn test_left_join_keeps_every_attention_row() {
        let a = vec![attention("1", 0.3, 100), attention("2", 0.1, 20), attention("3", 0.2, 50)];
        let p = vec![player("1", "Alice", "LB", "KC"), player("2", "Bob", "CB", "BUF")];
        let t = vec![team("KC", "#E31837", "#FFB81C")];

        let rows = join(&a, &p, &t).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].display_name.as_deref(), Some("Alice"));
        assert_eq!(rows[0].team_color.as_deref(), Some("#E31837"));
        // Player known, team not
        assert_eq!(rows[1].display_name.as_deref(), Some("Bob"));
        assert_eq!(rows[1].latest_team.as_deref(), Some("BUF"));
        assert_eq!(rows[1].team_color, None);
        // Neither known
        assert_eq!(rows[2].player_id, "3");
        assert_eq!(rows[2].display_name, None);
        assert_eq!(rows[2].latest_team, None);
    }

    #[test]
    fn test_join_preserves_attention_order() {
        let a = vec![attention("9", 0.1, 1), attention("3", 0.2, 2), attention("5", 0.3, 3)];
        let rows = join(&a, &[], &[]).unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.player_id.as_str()).collect();
        assert_eq!(ids, vec!["9", "3", "5"]);
    }

    #[test]
    fn test_duplicate_player_key_rejected() {
        let a = vec![attention("1", 0.3, 100)];
        let p = vec![player("1", "Alice", "LB", "KC"), player("1", "Alice B", "LB", "KC")];
        let err = join(&a, &p, &[]).unwrap_err();
        match err {
            Error::DuplicateKey { table, key } => {
                assert_eq!(table, "players");
                assert_eq!(key, "1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_team_key_rejected() {
        let t = vec![team("KC", "#000", "#111"), team("KC", "#222", "#333")];
        let err = join(&[], &[], &t).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { table: "teams", .. }));
    }

    #[test]
    fn test_blank_keys_are_not_duplicates() {
        let a = vec![attention("1", 0.3, 100), attention("", 0.2, 10)];
        let p = vec![
            player("1", "Alice", "LB", "KC"),
            player("", "No Id One", "CB", ""),
            player("", "No Id Two", "S", ""),
        ];
        let t = vec![team("KC", "#E31837", "#FFB81C"), team("", "#000", "#111"), team("", "#222", "#333")];

        let rows = join(&a, &p, &t).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].display_name.as_deref(), Some("Alice"));
        assert_eq!(rows[0].team_color.as_deref(), Some("#E31837"));
        // A blank attention id never picks up a blank-keyed player
        assert_eq!(rows[1].display_name, None);
        assert_eq!(rows[1].team_color, None);
    }

    #[test]
    fn test_index_unique_skips_blank_keys() {
        let p = vec![player("", "A", "LB", "KC"), player("", "B", "LB", "KC"), player("7", "C", "LB", "KC")];
        let index = index_unique(&p, "players", |p| p.player_id.as_str()).unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.contains_key("7"));
    }

    #[test]
    fn test_attention_fields_carried() {
        let a = vec![attention("1", 0.25, 77)];
        let rows = join(&a, &[], &[]).unwrap();
        assert_eq!(rows[0].play_count, 77);
        assert!((rows[0].avg_attention - 0.25).abs() < 1e-12);
        assert_eq!(rows[0].intervention_removal_count, 0);
        assert_eq!(rows[0].impact_removal_mean, 0.0);
    }
}
