//! Text (terminal) reporter with colors and formatting

use crate::analytics::{BatchReport, IndexStats, LocationRanking};
use crate::engine::{IndexResult, Metal, RiskLevel};
use anyhow::Result;

/// Risk colors (ANSI escape codes)
fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => "\x1b[31m", // Red
        RiskLevel::High => "\x1b[91m",     // Light red
        RiskLevel::Moderate => "\x1b[33m", // Yellow
        RiskLevel::Low => "\x1b[34m",      // Blue
        RiskLevel::Minimal => "\x1b[32m",  // Green
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

fn rule() -> String {
    format!("{DIM}──────────────────────────────────────{RESET}\n")
}

/// Render a single sample's indices
pub fn render_result(result: &IndexResult) -> Result<String> {
    let c = risk_color(result.health_risk);
    let mut out = String::new();
    out.push_str(&format!(
        "HPI: {BOLD}{:.2}{RESET}  HEI: {BOLD}{:.2}{RESET}  Cd: {BOLD}{:.2}{RESET}\n",
        result.hpi, result.hei, result.cd
    ));
    out.push_str(&format!(
        "Health risk: {c}{BOLD}{}{RESET}\n",
        result.health_risk
    ));
    Ok(out)
}

/// Render the limit table
pub fn render_limits() -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("{DIM}  METAL       LIMIT (mg/L)  WEIGHT{RESET}\n"));
    for metal in Metal::ALL {
        out.push_str(&format!(
            "  {:<10}  {:>12}  {:>6}\n",
            metal.as_str(),
            metal.permissible_limit(),
            metal.hpi_weight()
        ));
    }
    Ok(out)
}

/// Render report as formatted terminal output
pub fn render(report: &BatchReport) -> Result<String> {
    let mut out = String::new();

    // Header
    let s = &report.summary;
    out.push_str(&format!("\n{BOLD}HMPI Batch Report{RESET}\n"));
    out.push_str(&rule());
    out.push_str(&format!(
        "Samples: {}  Locations: {}  Rejected: {}\n\n",
        s.total_measurements,
        s.total_locations,
        report.rejected.len()
    ));

    // Index statistics
    out.push_str(&format!("{BOLD}INDICES{RESET}\n"));
    for (name, stats) in [("HPI", &s.hpi), ("HEI", &s.hei), ("Cd", &s.cd)] {
        out.push_str(&format!("  {:<4} {}\n", name, format_stats(stats.as_ref())));
    }
    out.push('\n');

    // Risk distribution
    if !report.risk_distribution.is_empty() {
        out.push_str(&format!("{BOLD}HEALTH RISK{RESET}\n"));
        let parts: Vec<String> = report
            .risk_distribution
            .iter()
            .map(|r| format!("{}{} {}{RESET}", risk_color(r.health_risk), r.count, r.health_risk))
            .collect();
        out.push_str(&format!("  {}\n\n", parts.join(" | ")));
    }

    render_leaderboard(&mut out, "MOST POLLUTED", &report.most_polluted);
    render_leaderboard(&mut out, "CLEANEST", &report.cleanest);

    // Trends
    if !report.trends.is_empty() {
        out.push_str(&format!(
            "{BOLD}TRENDS{RESET} {DIM}(since {}){RESET}\n",
            report.trend_since
        ));
        out.push_str(&format!(
            "{DIM}  DATE        AVG HPI   AVG HEI   AVG CD  SAMPLES{RESET}\n"
        ));
        for t in &report.trends {
            out.push_str(&format!(
                "  {}  {:>7.2}  {:>8.2}  {:>7.2}  {:>7}\n",
                t.date, t.avg_hpi, t.avg_hei, t.avg_cd, t.sample_count
            ));
        }
        out.push('\n');
    }

    // Metals
    if !report.metal_distribution.is_empty() {
        out.push_str(&format!("{BOLD}METALS{RESET} {DIM}(mg/L){RESET}\n"));
        out.push_str(&format!(
            "{DIM}  METAL            AVG        MAX      LIMIT{RESET}\n"
        ));
        for m in &report.metal_distribution {
            let over = if m.max > m.metal.permissible_limit() {
                format!("{}!{RESET}", risk_color(RiskLevel::Critical))
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  {:<10}  {:>9.4}  {:>9.4}  {:>9.4} {}\n",
                m.metal.as_str(),
                m.avg,
                m.max,
                m.metal.permissible_limit(),
                over
            ));
        }
        out.push('\n');
    }

    // Rejected rows
    if !report.rejected.is_empty() {
        out.push_str(&format!(
            "{BOLD}REJECTED{RESET} ({} rows)\n",
            report.rejected.len()
        ));
        for r in &report.rejected {
            out.push_str(&format!(
                "  {DIM}row {}{RESET} {}: {}\n",
                r.row, r.location, r.error
            ));
        }
        out.push('\n');
    }

    if s.total_measurements == 0 {
        out.push_str(&format!("{DIM}No samples evaluated.{RESET}\n"));
    }

    Ok(out)
}

fn format_stats(stats: Option<&IndexStats>) -> String {
    match stats {
        Some(st) => format!(
            "avg {BOLD}{:>8.2}{RESET}  min {:>8.2}  max {:>8.2}",
            st.avg, st.min, st.max
        ),
        None => format!("{DIM}n/a{RESET}"),
    }
}

fn render_leaderboard(out: &mut String, title: &str, rows: &[LocationRanking]) {
    if rows.is_empty() {
        return;
    }

    out.push_str(&format!("{BOLD}{}{RESET}\n", title));
    out.push_str(&format!(
        "{DIM}  #   LOCATION                  AVG HPI   AVG HEI  SAMPLES  LAST SAMPLE{RESET}\n"
    ));

    for (i, r) in rows.iter().enumerate() {
        // Truncate on chars, not bytes
        let name: String = r.location.name.chars().take(24).collect();
        out.push_str(&format!(
            "  {:<3} {:<24}  {:>7.2}  {:>8.2}  {:>7}  {}\n",
            i + 1,
            name,
            r.avg_hpi,
            r.avg_hei,
            r.sample_count,
            r.last_sample
        ));
    }
    out.push('\n');
}
