//! Attention x impact quadrants
//!
//! Each defender lands in one of four quadrants depending on whether their
//! average attention and removal impact sit at or above the median of the
//! **full** enriched table. The medians are fixed when the classifier is
//! built, so narrowing the view with filters never moves a player between
//! quadrants.

use crate::pipeline::EnrichedPlayerRow;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// High attention, high impact
    HighHigh,
    /// Low attention, high impact
    LowHigh,
    /// High attention, low impact
    HighLow,
    /// Low attention, low impact
    LowLow,
}

impl Category {
    pub fn from_flags(high_attention: bool, high_impact: bool) -> Self {
        match (high_attention, high_impact) {
            (true, true) => Category::HighHigh,
            (false, true) => Category::LowHigh,
            (true, false) => Category::HighLow,
            (false, false) => Category::LowLow,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::HighHigh => "High/High",
            Category::LowHigh => "Low/High",
            Category::HighLow => "High/Low",
            Category::LowLow => "Low/Low",
        }
    }

    /// Short description used in report tooltips.
    pub fn description(&self) -> &'static str {
        match self {
            Category::HighHigh => "Model watches them and removing them changes the outcome",
            Category::LowHigh => "Quietly influential: removal matters more than attention suggests",
            Category::HighLow => "Draws attention without moving the prediction much",
            Category::LowLow => "Rarely a factor in the model's view",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Median of `values`, ignoring NaN. Even counts average the middle pair.
pub fn median(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut v: Vec<f64> = values.into_iter().filter(|x| !x.is_nan()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.total_cmp(b));
    let mid = v.len() / 2;
    if v.len() % 2 == 0 {
        Some((v[mid - 1] + v[mid]) / 2.0)
    } else {
        Some(v[mid])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryClassifier {
    pub attention_median: f64,
    pub impact_median: f64,
}

impl CategoryClassifier {
    /// Fix both medians from the full enriched table. An empty table gives
    /// medians of 0.0.
    pub fn from_rows(rows: &[EnrichedPlayerRow]) -> Self {
        Self {
            attention_median: median(rows.iter().map(|r| r.avg_attention)).unwrap_or(0.0),
            impact_median: median(rows.iter().map(|r| r.impact_removal_mean)).unwrap_or(0.0),
        }
    }

    pub fn classify(&self, row: &EnrichedPlayerRow) -> Category {
        Category::from_flags(
            row.avg_attention >= self.attention_median,
            row.impact_removal_mean >= self.impact_median,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::build_enriched;
    use crate::pipeline::test_support::*;
    use crate::tables::{InterventionType, Tables};
    use crate::view::{build, PlayVolume, PositionFilter, SortKey, ViewParams};
    use crate::pipeline::PositionGroup;
    use std::collections::HashMap;

    fn four_players() -> Tables {
        Tables {
            attention: vec![
                attention("A", 0.40, 100),
                attention("B", 0.30, 90),
                attention("C", 0.20, 15),
                attention("D", 0.10, 80),
            ],
            players: vec![
                player("A", "Ava", "OLB", "T"),
                player("B", "Ben", "CB", "T"),
                player("C", "Cal", "FS", "T"),
                player("D", "Dee", "CB", "T"),
            ],
            interventions: vec![
                intervention("A", InterventionType::Removal, 0.09),
                intervention("B", InterventionType::Removal, 0.01),
                intervention("C", InterventionType::Removal, 0.07),
                intervention("D", InterventionType::Removal, 0.02),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_median_odd_even_empty() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(Vec::<f64>::new()), None);
        assert_eq!(median(vec![f64::NAN, 5.0]), Some(5.0));
    }

    #[test]
    fn test_quadrants() {
        let rows = build_enriched(&four_players(), InterventionType::Removal).unwrap();
        let c = CategoryClassifier::from_rows(&rows);
        assert!((c.attention_median - 0.25).abs() < 1e-12);
        assert!((c.impact_median - 0.045).abs() < 1e-12);

        let labels: Vec<Category> = rows.iter().map(|r| c.classify(r)).collect();
        assert_eq!(
            labels,
            vec![Category::HighHigh, Category::HighLow, Category::LowHigh, Category::LowLow]
        );
    }

    #[test]
    fn test_at_median_counts_as_high() {
        let tables = Tables {
            attention: vec![attention("A", 0.1, 1), attention("B", 0.2, 1), attention("C", 0.3, 1)],
            ..Default::default()
        };
        let rows = build_enriched(&tables, InterventionType::Removal).unwrap();
        let c = CategoryClassifier::from_rows(&rows);
        // B sits exactly on the attention median; every impact is 0.0 = median
        assert_eq!(c.classify(&rows[1]), Category::HighHigh);
        assert_eq!(c.classify(&rows[0]), Category::LowHigh);
    }

    #[test]
    fn test_labels_stable_under_filtering() {
        let rows = build_enriched(&four_players(), InterventionType::Removal).unwrap();
        let c = CategoryClassifier::from_rows(&rows);
        let full: HashMap<String, Category> =
            rows.iter().map(|r| (r.player_id.clone(), c.classify(r))).collect();

        let params = ViewParams {
            position: PositionFilter::Group(PositionGroup::CB),
            plays: PlayVolume::Pct50,
            sort: SortKey::Impact,
        };
        let view = build(&rows, &params);
        assert_eq!(view.len(), 2);
        for ranked in &view.rows {
            assert_eq!(c.classify(&ranked.row), full[&ranked.row.player_id]);
        }

        // A classifier built from the filtered subset would disagree
        let subset: Vec<EnrichedPlayerRow> = view.rows.iter().map(|r| r.row.clone()).collect();
        let wrong = CategoryClassifier::from_rows(&subset);
        assert_ne!(wrong, c);
    }

    #[test]
    fn test_empty_table_medians_zero() {
        let c = CategoryClassifier::from_rows(&[]);
        assert_eq!(c.attention_median, 0.0);
        assert_eq!(c.impact_median, 0.0);
    }

    #[test]
    fn test_label_text() {
        assert_eq!(Category::HighHigh.to_string(), "High/High");
        assert_eq!(Category::LowHigh.label(), "Low/High");
        assert_eq!(Category::from_flags(true, false), Category::HighLow);
    }
}
