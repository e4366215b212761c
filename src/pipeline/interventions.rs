//! Per-defender intervention statistics
//!
//! The counterfactual runs are grouped by defender for one intervention kind
//! and folded into count + mean impact. Defenders without any run of that
//! kind get an explicit 0 / 0.0, never a missing value: sorting and bar
//! widths downstream rely on every row carrying a number.

use super::EnrichedPlayerRow;
use crate::tables::{InterventionRecord, InterventionType};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InterventionStats {
    pub count: u32,
    pub mean_impact: f64,
}

/// Group `records` of the given kind by defender id.
pub fn aggregate(
    records: &[InterventionRecord],
    kind: InterventionType,
) -> HashMap<String, InterventionStats> {
    let mut sums: HashMap<&str, (u32, f64)> = HashMap::new();
    for r in records.iter().filter(|r| r.intervention_type == kind) {
        let entry = sums.entry(r.defender_id.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.impact_score;
    }

    sums.into_iter()
        .map(|(id, (count, total))| {
            (
                id.to_string(),
                InterventionStats { count, mean_impact: total / count as f64 },
            )
        })
        .collect()
}

/// Left-join removal statistics onto `rows` by player id.
pub fn apply(rows: &mut [EnrichedPlayerRow], stats: &HashMap<String, InterventionStats>) {
    let mut matched = 0usize;
    for row in rows.iter_mut() {
        let s = stats.get(&row.player_id).copied().unwrap_or_default();
        if s.count > 0 {
            matched += 1;
        }
        row.intervention_removal_count = s.count;
        row.impact_removal_mean = s.mean_impact;
    }
    log::debug!("{} of {} players have intervention results", matched, rows.len());
}

/// Stats for every intervention kind for one defender, including kinds
/// with no runs.
pub fn breakdown(
    records: &[InterventionRecord],
    defender_id: &str,
) -> BTreeMap<InterventionType, InterventionStats> {
    let mut out: BTreeMap<InterventionType, InterventionStats> = InterventionType::ALL
        .iter()
        .map(|k| (*k, InterventionStats::default()))
        .collect();
    let mut totals: BTreeMap<InterventionType, f64> = BTreeMap::new();

    for r in records.iter().filter(|r| r.defender_id == defender_id) {
        if let Some(s) = out.get_mut(&r.intervention_type) {
            s.count += 1;
        }
        *totals.entry(r.intervention_type).or_insert(0.0) += r.impact_score;
    }

    for (kind, total) in totals {
        if let Some(s) = out.get_mut(&kind) {
            s.mean_impact = total / s.count as f64;
        }
    }
    out
}

/// Largest single impact score of the given kind, if any.
///
/// Used to scale impact bars so the strongest single removal spans the
/// full width.
pub fn max_impact(records: &[InterventionRecord], kind: InterventionType) -> Option<f64> {
    records
        .iter()
        .filter(|r| r.intervention_type == kind)
        .map(|r| r.impact_score)
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{attention, intervention};
    use crate::pipeline::join::join;

    #[test]
    fn test_removal_mean_and_count() {
        let records = vec![
            intervention("P1", InterventionType::Removal, 0.08),
            intervention("P1", InterventionType::Removal, 0.04),
            intervention("P2", InterventionType::Freeze, 0.5),
        ];
        let stats = aggregate(&records, InterventionType::Removal);
        let p1 = stats["P1"];
        assert_eq!(p1.count, 2);
        assert!((p1.mean_impact - 0.06).abs() < 1e-12);
        assert!(!stats.contains_key("P2"));
    }

    #[test]
    fn test_aggregate_other_kind() {
        let records = vec![
            intervention("P1", InterventionType::Removal, 0.08),
            intervention("P2", InterventionType::Freeze, 0.5),
            intervention("P2", InterventionType::Freeze, 0.3),
        ];
        let stats = aggregate(&records, InterventionType::Freeze);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats["P2"].count, 2);
        assert!((stats["P2"].mean_impact - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_apply_defaults_to_zero() {
        let mut rows = join(&[attention("P1", 0.3, 100), attention("P2", 0.1, 20)], &[], &[]).unwrap();
        let records = vec![
            intervention("P1", InterventionType::Removal, 0.08),
            intervention("P1", InterventionType::Removal, 0.04),
            intervention("P2", InterventionType::Freeze, 0.5),
        ];
        apply(&mut rows, &aggregate(&records, InterventionType::Removal));

        assert_eq!(rows[0].intervention_removal_count, 2);
        assert!((rows[0].impact_removal_mean - 0.06).abs() < 1e-12);
        assert_eq!(rows[1].intervention_removal_count, 0);
        assert_eq!(rows[1].impact_removal_mean, 0.0);
        assert!(!rows[1].impact_removal_mean.is_nan());
    }

    #[test]
    fn test_negative_impacts_average() {
        let records = vec![
            intervention("P1", InterventionType::Removal, -0.02),
            intervention("P1", InterventionType::Removal, 0.04),
        ];
        let stats = aggregate(&records, InterventionType::Removal);
        assert!((stats["P1"].mean_impact - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_breakdown_covers_all_kinds() {
        let records = vec![
            intervention("P1", InterventionType::Removal, 0.10),
            intervention("P1", InterventionType::Slowdown, 0.02),
            intervention("P1", InterventionType::Slowdown, 0.04),
            intervention("P2", InterventionType::Removal, 0.50),
        ];
        let b = breakdown(&records, "P1");
        assert_eq!(b.len(), 4);
        assert_eq!(b[&InterventionType::Removal].count, 1);
        assert_eq!(b[&InterventionType::Slowdown].count, 2);
        assert!((b[&InterventionType::Slowdown].mean_impact - 0.03).abs() < 1e-12);
        assert_eq!(b[&InterventionType::Freeze], InterventionStats::default());
        assert_eq!(b[&InterventionType::Misdirection].count, 0);
    }

    #[test]
    fn test_max_impact() {
        let records = vec![
            intervention("P1", InterventionType::Removal, 0.10),
            intervention("P2", InterventionType::Removal, 0.07),
            intervention("P3", InterventionType::Freeze, 0.90),
        ];
        assert_eq!(max_impact(&records, InterventionType::Removal), Some(0.10));
        assert_eq!(max_impact(&records, InterventionType::Misdirection), None);
        assert_eq!(max_impact(&[], InterventionType::Removal), None);
    }
}
