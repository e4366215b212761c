//! JSON report output, shared with the `/api/view` endpoint

use crate::board::Board;
use crate::category::CategoryClassifier;
use crate::labels::OptionLabel;
use crate::report::Summary;
use crate::view::{RankedRow, RankedView, ViewParams};
use serde::Serialize;
use std::io::{self, Write};

/// View parameters in their short-code spelling
#[derive(Debug, Clone, Serialize)]
pub struct ParamCodes {
    pub position: &'static str,
    pub plays: &'static str,
    pub sort: &'static str,
}

impl From<&ViewParams> for ParamCodes {
    fn from(p: &ViewParams) -> Self {
        Self { position: p.position.code(), plays: p.plays.code(), sort: p.sort.code() }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerEntry<'a> {
    #[serde(flatten)]
    pub ranked: &'a RankedRow,
    pub category: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ViewReport<'a> {
    pub generated: String,
    pub intervention: &'static str,
    pub params: ParamCodes,
    pub summary: Summary,
    pub medians: CategoryClassifier,
    pub max_impact: Option<f64>,
    pub players: Vec<PlayerEntry<'a>>,
}

impl<'a> ViewReport<'a> {
    pub fn new(board: &Board, view: &'a RankedView) -> Self {
        let players = view
            .rows
            .iter()
            .map(|ranked| PlayerEntry { ranked, category: board.category(&ranked.row).label() })
            .collect();

        Self {
            generated: chrono::Local::now().to_rfc3339(),
            intervention: board.intervention_kind().as_str(),
            params: ParamCodes::from(&view.params),
            summary: Summary::from_view(board, view),
            medians: *board.classifier(),
            max_impact: board.max_impact(),
            players,
        }
    }
}

pub fn write<W: Write>(writer: &mut W, board: &Board, view: &RankedView) -> io::Result<()> {
    let report = ViewReport::new(board, view);
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)
}
