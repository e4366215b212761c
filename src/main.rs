use attention_board::config::{DataPaths, Overrides};
use attention_board::labels::{OptionLabel, POSITION_OPTIONS};
use attention_board::report::Summary;
use attention_board::view::{PlayVolume, PositionFilter, RankedView, SortKey, ViewParams};
use attention_board::{load_tables, Board, Category, InterventionType};
use chrono::Local;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "attention_board")]
#[command(author, version, about = "Rank defenders by model attention and counterfactual impact")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding the input CSVs (optional in GUI mode)
    data_dir: Option<PathBuf>,

    /// Launch GUI folder picker (auto-enabled when double-clicked)
    #[arg(long)]
    gui: bool,

    #[command(flatten)]
    inputs: InputArgs,

    /// Position filter: all, lb, cb, s, other
    #[arg(long, default_value = "all")]
    position: PositionFilter,

    /// Minimum play volume as % of max plays: 0, 20, 50, 80
    #[arg(long, default_value = "50")]
    plays: PlayVolume,

    /// Sort key: impact, attention, high-pct, plays, name
    #[arg(long, default_value = "impact")]
    sort: SortKey,

    /// Output report file (.html, .json, .csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for auto-generated reports
    #[arg(long, default_value = "attention-reports")]
    report_dir: PathBuf,

    /// Don't auto-generate HTML report
    #[arg(long)]
    no_report: bool,

    /// Don't prompt to open report
    #[arg(long)]
    no_open: bool,

    /// Also write one report per position group
    #[arg(long)]
    split: bool,

    /// Number of parallel workers for --split (default: number of CPUs)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Debug logging and per-player detail
    #[arg(short, long)]
    verbose: bool,

    /// Only show summary
    #[arg(short, long)]
    quiet: bool,
}

/// Per-file overrides and the intervention kind to aggregate
#[derive(clap::Args, Debug, Clone)]
struct InputArgs {
    /// Attention metrics CSV (default: <DATA_DIR>/player_attention_metrics.csv)
    #[arg(long, global = true)]
    attention: Option<PathBuf>,

    /// Player metadata CSV (default: <DATA_DIR>/nfl_players.csv)
    #[arg(long, global = true)]
    players: Option<PathBuf>,

    /// Team metadata CSV (default: <DATA_DIR>/nfl_teams.csv)
    #[arg(long, global = true)]
    teams: Option<PathBuf>,

    /// Intervention results CSV (default: <DATA_DIR>/detailed_results.csv)
    #[arg(long, global = true)]
    interventions: Option<PathBuf>,

    /// Intervention kind to aggregate: removal, freeze, slowdown, misdirection
    #[arg(long, global = true, default_value = "removal")]
    intervention: InterventionType,
}

impl InputArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            attention: self.attention.clone(),
            players: self.players.clone(),
            teams: self.teams.clone(),
            interventions: self.interventions.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start interactive leaderboard page
    Serve {
        /// Directory holding the input CSVs
        data_dir: PathBuf,

        /// Port to listen on
        #[arg(short, long, default_value = "3002")]
        port: u16,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn discover_or_exit(dir: &Path, inputs: &InputArgs) -> DataPaths {
    match DataPaths::discover(dir, inputs.overrides()) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    // Handle subcommands first
    if let Some(Command::Serve { ref data_dir, port }) = args.command {
        let paths = discover_or_exit(data_dir, &args.inputs);
        if let Err(e) = attention_board::serve::start(port, paths, args.inputs.intervention) {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // With GUI feature: launch GUI if --gui flag OR no data dir provided
    #[cfg(feature = "gui")]
    let use_gui = args.gui || args.data_dir.is_none();

    #[cfg(not(feature = "gui"))]
    let use_gui = false;

    let data_dir = match args.data_dir.clone() {
        Some(dir) if !use_gui => dir,
        _ => match pick_dir(use_gui) {
            Some(dir) => dir,
            None => std::process::exit(if use_gui { 0 } else { 1 }),
        },
    };

    let paths = discover_or_exit(&data_dir, &args.inputs);

    let board = match load_tables(&paths).and_then(|t| Board::with_intervention(t, args.inputs.intervention)) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let params = ViewParams { position: args.position, plays: args.plays, sort: args.sort };
    let view = board.view(&params);

    if !args.quiet {
        eprintln!("\x1b[1mDefender Attention Leaderboard\x1b[0m");
        eprintln!("{}", "─".repeat(88));
        eprintln!(
            "{} · {} · {} · {} impact\n",
            params.position.label(),
            params.plays.label(),
            params.sort.label(),
            board.intervention_kind()
        );
        print_table(&board, &view, args.verbose);
    }

    // Summary
    let summary = Summary::from_view(&board, &view);
    if !args.quiet {
        eprintln!("\n{}", "─".repeat(88));
        eprintln!("\x1b[1mSummary:\x1b[0m {} of {} players shown", summary.shown, summary.total);
        eprintln!("  \x1b[32mHigh/High:\x1b[0m {}", summary.high_high);
        eprintln!("  \x1b[35mLow/High:\x1b[0m  {}", summary.low_high);
        eprintln!("  \x1b[33mHigh/Low:\x1b[0m  {}", summary.high_low);
        eprintln!("  \x1b[90mLow/Low:\x1b[0m   {}", summary.low_low);
    }

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();

    // Determine report path
    let report_path = if let Some(ref output) = args.output {
        Some(output.clone())
    } else if !args.no_report {
        std::fs::create_dir_all(&args.report_dir).ok();
        Some(args.report_dir.join(format!("attention_board_{}.html", timestamp)))
    } else {
        None
    };

    if args.split {
        if let Some(jobs) = args.jobs {
            rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global().ok();
        }
        write_split_reports(&board, &params, &args.report_dir, &timestamp, args.quiet);
    }

    // Generate report
    if let Some(ref output_path) = report_path {
        if let Err(e) = attention_board::report::generate(output_path, &board, &view) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }

        if !args.no_open {
            if use_gui {
                // In GUI mode, auto-open the report (no prompt)
                let _ = open::that(output_path);
            } else if !args.quiet {
                eprint!("\nOpen report in browser? [Y/n] ");
                io::stderr().flush().ok();

                let mut input = String::new();
                if io::stdin().read_line(&mut input).is_ok() {
                    let input = input.trim().to_lowercase();
                    if input.is_empty() || input == "y" || input == "yes" {
                        if let Err(e) = open::that(output_path) {
                            eprintln!("Failed to open report: {}", e);
                        }
                    }
                }
            }
        }
    }
}

fn category_color(category: Category) -> &'static str {
    match category {
        Category::HighHigh => "\x1b[32m", // Green
        Category::LowHigh => "\x1b[35m",  // Magenta
        Category::HighLow => "\x1b[33m",  // Yellow
        Category::LowLow => "\x1b[90m",   // Gray
    }
}

fn print_table(board: &Board, view: &RankedView, verbose: bool) {
    if view.is_empty() {
        eprintln!("No players match your current filters.");
        return;
    }

    println!(
        "{:>4}  {:<24} {:<6} {:<5} {:>5}  {:>7}  {:>7}  {:>8}  {}",
        "#", "PLAYER", "GROUP", "TEAM", "PLAYS", "HIGH%", "AVG%", "IMPACT%", "CATEGORY"
    );
    let reset = "\x1b[0m";
    for ranked in &view.rows {
        let r = &ranked.row;
        let category = board.category(r);
        println!(
            "{:>4}  {:<24} {:<6} {:<5} {:>5}  {:>6.1}%  {:>6.1}%  {:>7.2}%  {}{}{}",
            ranked.rank,
            truncate(r.display_name.as_deref().unwrap_or("Unknown"), 24),
            r.position_group.as_str(),
            r.latest_team.as_deref().unwrap_or("N/A"),
            r.play_count,
            r.high_attention_pct,
            r.avg_attention * 100.0,
            r.impact_removal_mean * 100.0,
            category_color(category),
            category,
            reset
        );

        if verbose {
            eprintln!(
                "      id={} position={} interventions={} max_attention={:.3} std={:.3}",
                r.player_id,
                r.position.as_deref().unwrap_or("N/A"),
                r.intervention_removal_count,
                r.max_attention,
                r.std_attention
            );
        }
    }
}

/// One HTML report per position filter, rendered in parallel.
fn write_split_reports(board: &Board, params: &ViewParams, dir: &Path, timestamp: &str, quiet: bool) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Failed to create {}: {}", dir.display(), e);
        return;
    }

    let pb = if !quiet {
        let pb = ProgressBar::new(POSITION_OPTIONS.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    } else {
        None
    };

    let written: Vec<(PathBuf, io::Result<()>)> = POSITION_OPTIONS
        .par_iter()
        .map(|(position, code, _)| {
            let view = board.view(&ViewParams { position: *position, ..*params });
            let path = dir.join(format!("attention_board_{}_{}.html", code, timestamp));
            let result = attention_board::report::generate(&path, board, &view);
            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(code.to_string());
            }
            (path, result)
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    for (path, result) in written {
        match result {
            Ok(()) if !quiet => eprintln!("  \x1b[90m{}\x1b[0m", path.display()),
            Ok(()) => {}
            Err(e) => eprintln!("Failed to write {}: {}", path.display(), e),
        }
    }
}

fn pick_dir(use_gui: bool) -> Option<PathBuf> {
    #[cfg(feature = "gui")]
    if use_gui {
        let picked = rfd::FileDialog::new()
            .set_title("Select folder with attention and metadata CSVs")
            .pick_folder();
        if picked.is_none() {
            eprintln!("No folder selected.");
        }
        return picked;
    }

    let _ = use_gui;
    eprintln!("Usage: attention_board <DATA_DIR>");
    eprintln!("Run 'attention_board --help' for more options.");
    None
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
