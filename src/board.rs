//! The leaderboard core handed to presentation code
//!
//! A [`Board`] owns the full enriched table and everything derived from it
//! once (category medians, impact scale). Presentation code asks it for the
//! full table, for a ranked view, or for a row's category; it never touches
//! the raw tables.

use crate::category::{Category, CategoryClassifier};
use crate::error::Result;
use crate::normalize::{canonical_key, normalize};
use crate::pipeline::interventions::{self, InterventionStats};
use crate::pipeline::{enrich_normalized, EnrichedPlayerRow, PositionGroup};
use crate::tables::{InterventionType, Tables};
use crate::view::{self, RankedView, ViewParams};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Board {
    kind: InterventionType,
    rows: Vec<EnrichedPlayerRow>,
    classifier: CategoryClassifier,
    max_impact: Option<f64>,
    /// Normalized copy of the inputs
    tables: Tables,
}

impl Board {
    /// Build a board that aggregates removal interventions.
    pub fn new(tables: Tables) -> Result<Self> {
        Self::with_intervention(tables, InterventionType::Removal)
    }

    /// Build a board that aggregates interventions of `kind`.
    pub fn with_intervention(tables: Tables, kind: InterventionType) -> Result<Self> {
        let tables = normalize(&tables);
        let rows = enrich_normalized(&tables, kind)?;
        let classifier = CategoryClassifier::from_rows(&rows);
        let max_impact = interventions::max_impact(&tables.interventions, kind);
        Ok(Self { kind, rows, classifier, max_impact, tables })
    }

    pub fn intervention_kind(&self) -> InterventionType {
        self.kind
    }

    /// The full enriched table, in attention-input order.
    pub fn enriched(&self) -> &[EnrichedPlayerRow] {
        &self.rows
    }

    pub fn view(&self, params: &ViewParams) -> RankedView {
        view::build(&self.rows, params)
    }

    /// Quadrant label, always relative to the full table.
    pub fn category(&self, row: &EnrichedPlayerRow) -> Category {
        self.classifier.classify(row)
    }

    pub fn classifier(&self) -> &CategoryClassifier {
        &self.classifier
    }

    /// Largest single impact score of the aggregated kind.
    pub fn max_impact(&self) -> Option<f64> {
        self.max_impact
    }

    pub fn find(&self, player_id: &str) -> Option<&EnrichedPlayerRow> {
        let id = canonical_key(player_id);
        self.rows.iter().find(|r| r.player_id == id)
    }

    /// Per-kind intervention stats for one player.
    pub fn breakdown(&self, player_id: &str) -> BTreeMap<InterventionType, InterventionStats> {
        interventions::breakdown(&self.tables.interventions, &canonical_key(player_id))
    }

    /// Player counts per position group over the full table.
    pub fn group_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> =
            PositionGroup::ALL.iter().map(|g| (g.as_str(), 0)).collect();
        for row in &self.rows {
            *counts.entry(row.position_group.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::*;
    use crate::view::{PlayVolume, PositionFilter, SortKey};

    #[test]
    fn test_board_api() {
        let mut tables = alice_and_bob();
        tables.interventions = vec![
            intervention("P1", InterventionType::Removal, 0.08),
            intervention("P1", InterventionType::Removal, 0.04),
            intervention("P2", InterventionType::Freeze, 0.5),
        ];
        let board = Board::new(tables).unwrap();

        assert_eq!(board.enriched().len(), 2);
        assert_eq!(board.intervention_kind(), InterventionType::Removal);
        assert_eq!(board.max_impact(), Some(0.08));

        let view = board.view(&ViewParams {
            position: PositionFilter::All,
            plays: PlayVolume::Any,
            sort: SortKey::Impact,
        });
        assert_eq!(view.rows[0].row.player_id, "P1");

        let alice = board.find("P1").unwrap();
        assert_eq!(board.category(alice), Category::HighHigh);
    }

    #[test]
    fn test_breakdown_and_find_normalize_id() {
        let mut tables = alice_and_bob();
        tables.attention[0].player_id = "42".into();
        tables.players[0].player_id = "42".into();
        tables.interventions = vec![
            intervention("42.0", InterventionType::Freeze, 0.3),
            intervention("42", InterventionType::Removal, 0.1),
        ];
        let board = Board::new(tables).unwrap();

        assert!(board.find("42.0").is_some());
        let b = board.breakdown("42");
        assert_eq!(b[&InterventionType::Freeze].count, 1);
        assert_eq!(b[&InterventionType::Removal].count, 1);
    }

    #[test]
    fn test_with_other_intervention_kind() {
        let mut tables = alice_and_bob();
        tables.interventions = vec![intervention("P2", InterventionType::Freeze, 0.5)];
        let board = Board::with_intervention(tables, InterventionType::Freeze).unwrap();
        let bob = board.find("P2").unwrap();
        assert_eq!(bob.intervention_removal_count, 1);
        assert!((bob.impact_removal_mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_board_rows_match_raw_pipeline() {
        let mut tables = alice_and_bob();
        tables.attention[1].player_id = " P2".into();
        tables.interventions = vec![intervention("P2 ", InterventionType::Removal, 0.03)];
        let expected = crate::pipeline::build_enriched(&tables, InterventionType::Removal).unwrap();

        let board = Board::new(tables).unwrap();
        assert_eq!(board.enriched(), expected.as_slice());
        assert_eq!(board.find("P2").unwrap().intervention_removal_count, 1);
    }

    #[test]
    fn test_group_counts() {
        let board = Board::new(alice_and_bob()).unwrap();
        let counts = board.group_counts();
        assert_eq!(counts["LB"], 1);
        assert_eq!(counts["CB"], 1);
        assert_eq!(counts["S"], 0);
        assert_eq!(counts["Other"], 0);
    }
}
