//! Canonical join keys
//!
//! Ids reach us from several exporters: one writes `43290`, another that
//! went through a nullable float column writes `43290.0`. Every key used in
//! a join is rewritten to one canonical string before joining.

use crate::tables::Tables;

/// Canonical string form of a join key.
///
/// Trims whitespace and collapses integral float renderings (`"43290.0"`,
/// `"43290.00"`) to the integer text. Everything else passes through.
pub fn canonical_key(raw: &str) -> String {
    let s = raw.trim();
    if let Some((int, frac)) = s.split_once('.') {
        let int_ok = !int.is_empty()
            && int.trim_start_matches('-').chars().all(|c| c.is_ascii_digit())
            && int != "-";
        let frac_zero = !frac.is_empty() && frac.chars().all(|c| c == '0');
        if int_ok && frac_zero {
            return int.to_string();
        }
    }
    s.to_string()
}

/// Returns a copy of `tables` with every join key canonicalised.
///
/// Intervention types are already case-normalised at parse time, so only the
/// id columns need rewriting here.
pub fn normalize(tables: &Tables) -> Tables {
    let mut out = tables.clone();
    for row in &mut out.attention {
        row.player_id = canonical_key(&row.player_id);
    }
    for row in &mut out.players {
        row.player_id = canonical_key(&row.player_id);
        row.latest_team = row.latest_team.as_deref().map(canonical_key);
    }
    for row in &mut out.teams {
        row.team_abbr = canonical_key(&row.team_abbr);
    }
    for row in &mut out.interventions {
        row.defender_id = canonical_key(&row.defender_id);
    }
    out
}
