//! Diagnostic dump of one defender: joined metadata, quadrant and every intervention kind

use attention_board::config::{DataPaths, Overrides};
use attention_board::{load_tables, Board};
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: player_detail <data_dir> <player_id> [player_id...]");
        std::process::exit(1);
    }

    let board = match load_board(Path::new(&args[1])) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for id in &args[2..] {
        println!("\n{}", "=".repeat(60));
        println!("PLAYER: {}", id);
        println!("{}", "=".repeat(60));
        show_player(&board, id);
    }
}

fn load_board(dir: &Path) -> attention_board::Result<Board> {
    let paths = DataPaths::discover(dir, Overrides::default())?;
    Board::new(load_tables(&paths)?)
}

fn show_player(board: &Board, id: &str) {
    let row = match board.find(id) {
        Some(row) => row,
        None => {
            println!("Not in the attention table");
            return;
        }
    };

    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "n/a".to_string());

    println!("Name:      {}", or_na(&row.display_name));
    println!("Position:  {} ({})", or_na(&row.position), row.position_group);
    println!("Team:      {}  colours {} / {}", or_na(&row.latest_team), or_na(&row.team_color), or_na(&row.team_color2));
    println!("Headshot:  {}", or_na(&row.headshot));

    println!("\n--- Attention ---");
    println!("  plays={} frames={}", row.play_count, row.frame_count);
    println!(
        "  avg={:.4} median={:.4} max={:.4} std={:.4} total={:.2}",
        row.avg_attention, row.median_attention, row.max_attention, row.std_attention, row.total_attention
    );
    println!("  high attention: {:.1}% of frames", row.high_attention_pct);

    let classifier = board.classifier();
    let category = board.category(row);
    println!("\n--- Category ---");
    println!(
        "  {} (attention median {:.4}, impact median {:.4})",
        category, classifier.attention_median, classifier.impact_median
    );
    println!("  {}", category.description());

    println!("\n--- Interventions ---");
    println!("{:<14} {:>6} {:>12}", "KIND", "COUNT", "MEAN IMPACT");
    for (kind, stats) in board.breakdown(id) {
        let marker = if kind == board.intervention_kind() { "*" } else { " " };
        println!("{}{:<13} {:>6} {:>12.5}", marker, kind.as_str(), stats.count, stats.mean_impact);
    }

    // Where this player lands in each position-neutral ranking
    println!("\n--- Ranks (all positions, no play filter) ---");
    for sort in attention_board::view::SortKey::ALL {
        let view = board.view(&attention_board::ViewParams {
            position: attention_board::view::PositionFilter::All,
            plays: attention_board::view::PlayVolume::Any,
            sort,
        });
        if let Some(ranked) = view.rows.iter().find(|r| r.row.player_id == row.player_id) {
            println!("  {:<32} #{} of {}", attention_board::labels::OptionLabel::label(&sort), ranked.rank, view.len());
        }
    }
}
