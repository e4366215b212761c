//! HTML leaderboard page
//!
//! Used both for the written report and for the page served by
//! `attention_board serve`. The served page carries a dropdown form; the
//! written report lists the active filters instead.

use crate::board::Board;
use crate::category::Category;
use crate::labels::{OptionLabel, PLAY_OPTIONS, POSITION_OPTIONS, SORT_OPTIONS};
use crate::pipeline::EnrichedPlayerRow;
use crate::report::Summary;
use crate::view::{RankedRow, RankedView};
use std::io::{self, Write};

pub const DEFAULT_PRIMARY: &str = "#374151";
pub const DEFAULT_SECONDARY: &str = "#6b7280";

pub const EMPTY_MESSAGE: &str =
    "No players match your current filters. Try widening the position or play volume filters.";

pub fn write<W: Write>(writer: &mut W, board: &Board, view: &RankedView) -> io::Result<()> {
    writer.write_all(render(board, view, false).as_bytes())
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Up to two initials from a display name, `??` when there is none.
pub fn initials(name: Option<&str>) -> String {
    let letters: String = name
        .unwrap_or("")
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();
    if letters.is_empty() {
        "??".to_string()
    } else {
        letters
    }
}

/// Bar width in percent, clamped to 0..=100.
pub fn bar_width(value: f64, full_scale: f64) -> f64 {
    if !(full_scale > 0.0) || value.is_nan() {
        return 0.0;
    }
    (value / full_scale * 100.0).clamp(0.0, 100.0)
}

fn rank_badge(rank: usize) -> (&'static str, String) {
    let medal = |m: &str| format!(r#"{}<span class="medal">{}</span>"#, rank, m);
    match rank {
        1 => ("rank gold", medal("🥇")),
        2 => ("rank silver", medal("🥈")),
        3 => ("rank bronze", medal("🥉")),
        n => ("rank", format!("#{}", n)),
    }
}

fn category_class(category: Category) -> &'static str {
    match category {
        Category::HighHigh => "cat hh",
        Category::LowHigh => "cat lh",
        Category::HighLow => "cat hl",
        Category::LowLow => "cat ll",
    }
}

fn team_colors(row: &EnrichedPlayerRow) -> (&str, &str) {
    (
        row.team_color.as_deref().filter(|c| !c.is_empty()).unwrap_or(DEFAULT_PRIMARY),
        row.team_color2.as_deref().filter(|c| !c.is_empty()).unwrap_or(DEFAULT_SECONDARY),
    )
}

fn avatar(row: &EnrichedPlayerRow) -> String {
    let (primary, secondary) = team_colors(row);
    match row.headshot.as_deref().filter(|h| !h.is_empty()) {
        Some(url) => format!(
            r#"<img class="headshot" src="{}" alt="{}" style="border-color: {}">"#,
            escape(url),
            escape(row.display_name.as_deref().unwrap_or("Unknown")),
            escape(primary)
        ),
        None => format!(
            r#"<div class="headshot initials" style="background: {}; border-color: {}">{}</div>"#,
            escape(primary),
            escape(secondary),
            escape(&initials(row.display_name.as_deref()))
        ),
    }
}

fn bar(class: &str, width: f64, text: &str) -> String {
    format!(
        r#"<div class="metric"><div class="bar"><div class="fill {}" style="width: {:.1}%"></div></div><span class="mono">{}</span></div>"#,
        class, width, text
    )
}

fn player_row(board: &Board, ranked: &RankedRow) -> String {
    let row = &ranked.row;
    let (badge_class, badge) = rank_badge(ranked.rank);
    let (primary, secondary) = team_colors(row);
    let category = board.category(row);

    let avg_pct = row.avg_attention * 100.0;
    let impact_pct = row.impact_removal_mean * 100.0;
    let impact_width = board.max_impact().map_or(0.0, |m| bar_width(row.impact_removal_mean, m));

    format!(
        r#"            <tr>
                <td><span class="{badge_class}">{badge}</span></td>
                <td>
                    <div class="player">
                        {avatar}
                        <div>
                            <div class="name">{name}</div>
                            <div class="meta">
                                <span class="pos">{position}</span>
                                <span class="team" style="background: {primary}; color: #fff; border-color: {secondary}">{team}</span>
                                <span class="dim">{plays} plays</span>
                            </div>
                        </div>
                    </div>
                </td>
                <td>{high}</td>
                <td>{avg}</td>
                <td>{impact}</td>
                <td><span class="{cat_class}" title="{cat_desc}">{cat}</span></td>
            </tr>
"#,
        badge_class = badge_class,
        badge = badge,
        avatar = avatar(row),
        name = escape(row.display_name.as_deref().unwrap_or("Unknown")),
        position = escape(row.position.as_deref().unwrap_or("N/A")),
        primary = escape(primary),
        secondary = escape(secondary),
        team = escape(row.latest_team.as_deref().unwrap_or("N/A")),
        plays = row.play_count,
        high = bar("high", bar_width(row.high_attention_pct, 100.0), &format!("{:.1}%", row.high_attention_pct)),
        avg = bar("avg", bar_width(avg_pct, 100.0), &format!("{:.1}%", avg_pct)),
        impact = bar(
            "impact",
            impact_width,
            &format!("{:.2}% ({})", impact_pct, row.intervention_removal_count)
        ),
        cat_class = category_class(category),
        cat_desc = escape(category.description()),
        cat = category.label(),
    )
}

fn select<T: OptionLabel + PartialEq>(name: &str, options: &[(T, &str, &str)], current: T) -> String {
    let mut html = format!(r#"<select name="{}" onchange="this.form.submit()">"#, name);
    for (value, code, label) in options {
        let selected = if *value == current { " selected" } else { "" };
        html.push_str(&format!(r#"<option value="{}"{}>{}</option>"#, code, selected, escape(label)));
    }
    html.push_str("</select>");
    html
}

fn controls(view: &RankedView, interactive: bool) -> String {
    let p = &view.params;
    if interactive {
        format!(
            r#"<form class="controls" method="get" action="/">
            <label>Position {}</label>
            <label>Play Volume {}</label>
            <label>Sort By {}</label>
            <noscript><button type="submit">Apply</button></noscript>
        </form>"#,
            select("position", POSITION_OPTIONS, p.position),
            select("plays", PLAY_OPTIONS, p.plays),
            select("sort", SORT_OPTIONS, p.sort),
        )
    } else {
        format!(
            r#"<div class="controls dim">{} &middot; {} &middot; {}</div>"#,
            escape(p.position.label()),
            escape(p.plays.label()),
            escape(p.sort.label())
        )
    }
}

/// Render the full page.
pub fn render(board: &Board, view: &RankedView, interactive: bool) -> String {
    let summary = Summary::from_view(board, view);
    let medians = board.classifier();

    let body = if view.is_empty() {
        format!(r#"<div class="empty">{}</div>"#, EMPTY_MESSAGE)
    } else {
        let rows: String = view.rows.iter().map(|r| player_row(board, r)).collect();
        format!(
            r#"<table>
            <thead>
                <tr>
                    <th>Rank</th>
                    <th>Player</th>
                    <th>High Attention %</th>
                    <th>Avg Attention</th>
                    <th>Impact ({kind})</th>
                    <th>Category</th>
                </tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>"#,
            kind = board.intervention_kind(),
            rows = rows
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Defender Attention Leaderboard</title>
    <style>
        :root {{
            --bg: #0d1117;
            --card: #161b22;
            --border: #30363d;
            --text: #e6edf3;
            --dim: #7d8590;
            --accent: #58a6ff;
            --hh: #3fb950;
            --lh: #a371f7;
            --hl: #d29922;
            --ll: #6e7681;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1400px; margin: 0 auto; padding: 2rem; }}
        .header {{ margin-bottom: 1.5rem; padding-bottom: 1rem; border-bottom: 1px solid var(--border); }}
        .logo {{ font-size: 2rem; font-weight: 800; color: var(--accent); }}
        .subtitle {{ color: var(--dim); }}
        .stats {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }}
        .stat {{ background: var(--card); border: 1px solid var(--border); border-radius: 8px; padding: 1rem; }}
        .stat-value {{ font-size: 1.75rem; font-weight: 700; }}
        .stat-label {{ color: var(--dim); font-size: 0.8rem; }}
        .controls {{ display: flex; gap: 1rem; margin-bottom: 1rem; flex-wrap: wrap; }}
        .controls select {{ margin-left: 0.5rem; background: var(--card); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: 0.3rem; }}
        table {{ width: 100%; border-collapse: collapse; background: var(--card); border: 1px solid var(--border); border-radius: 8px; }}
        th, td {{ padding: 0.6rem 0.8rem; border-bottom: 1px solid var(--border); text-align: left; }}
        th {{ color: var(--dim); font-size: 0.75rem; text-transform: uppercase; }}
        .rank {{ font-weight: 700; color: var(--dim); }}
        .rank.gold {{ color: #f2c94c; }}
        .rank.silver {{ color: #c0c7d0; }}
        .rank.bronze {{ color: #cd7f32; }}
        .medal {{ margin-left: 0.3rem; font-size: 1.2rem; }}
        .player {{ display: flex; align-items: center; gap: 0.75rem; }}
        .headshot {{ width: 44px; height: 44px; border-radius: 50%; border: 2px solid; object-fit: cover; }}
        .initials {{ display: flex; align-items: center; justify-content: center; font-weight: 700; color: #fff; }}
        .name {{ font-weight: 600; }}
        .meta {{ display: flex; gap: 0.4rem; font-size: 0.75rem; align-items: center; }}
        .pos, .team {{ padding: 0.1rem 0.4rem; border-radius: 4px; border: 1px solid var(--border); }}
        .metric {{ display: flex; align-items: center; gap: 0.5rem; }}
        .bar {{ width: 90px; height: 8px; background: rgba(255,255,255,0.1); border-radius: 4px; overflow: hidden; }}
        .fill {{ height: 100%; border-radius: 4px; }}
        .fill.high {{ background: #f85149; }}
        .fill.avg {{ background: var(--accent); }}
        .fill.impact {{ background: var(--hh); }}
        .cat {{ padding: 0.2rem 0.5rem; border-radius: 12px; font-size: 0.75rem; font-weight: 600; }}
        .cat.hh {{ background: rgba(63,185,80,0.15); color: var(--hh); }}
        .cat.lh {{ background: rgba(163,113,247,0.15); color: var(--lh); }}
        .cat.hl {{ background: rgba(210,153,34,0.15); color: var(--hl); }}
        .cat.ll {{ background: rgba(110,118,129,0.15); color: var(--ll); }}
        .empty {{ padding: 3rem; text-align: center; color: var(--dim); background: var(--card); border: 1px dashed var(--border); border-radius: 8px; }}
        .mono {{ font-family: 'SF Mono', monospace; font-size: 0.85rem; }}
        .dim {{ color: var(--dim); }}
        .footer {{ margin-top: 2rem; color: var(--dim); font-size: 0.8rem; text-align: center; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <div class="logo">Defender Attention Leaderboard</div>
            <div class="subtitle">Model attention vs. {kind} impact per defender</div>
        </div>

        <div class="stats">
            <div class="stat"><div class="stat-value">{shown} / {total}</div><div class="stat-label">Players Shown</div></div>
            <div class="stat"><div class="stat-value">{hh}</div><div class="stat-label">High/High</div></div>
            <div class="stat"><div class="stat-value">{lh}</div><div class="stat-label">Low/High</div></div>
            <div class="stat"><div class="stat-value">{hl}</div><div class="stat-label">High/Low</div></div>
            <div class="stat"><div class="stat-value">{ll}</div><div class="stat-label">Low/Low</div></div>
        </div>

        {controls}

        {body}

        <div class="footer">
            Categories split at the full-table medians: avg attention {att_median:.1}%, impact {imp_median:.2}%.
            Generated {generated}.
        </div>
    </div>
</body>
</html>
"#,
        kind = board.intervention_kind(),
        shown = summary.shown,
        total = summary.total,
        hh = summary.high_high,
        lh = summary.low_high,
        hl = summary.high_low,
        ll = summary.low_low,
        controls = controls(view, interactive),
        body = body,
        att_median = medians.attention_median * 100.0,
        imp_median = medians.impact_median * 100.0,
        generated = chrono::Local::now().format("%Y-%m-%d %H:%M"),
    )
}
