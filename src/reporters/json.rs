//! JSON reporter
//!
//! Pretty-printed JSON for piping to jq or feeding a dashboard.

use crate::analytics::BatchReport;
use crate::engine::{IndexResult, Metal};
use anyhow::Result;
use serde::Serialize;

/// Render report as JSON
pub fn render(report: &BatchReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render one result as `{hpi, hei, cd, healthRisk}`
pub fn render_result(result: &IndexResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[derive(Serialize)]
struct LimitRow {
    metal: Metal,
    permissible_limit: f64,
    weight: u32,
}

/// Render the limit table
pub fn render_limits() -> Result<String> {
    let rows: Vec<LimitRow> = Metal::ALL
        .into_iter()
        .map(|metal| LimitRow {
            metal,
            permissible_limit: metal.permissible_limit(),
            weight: metal.hpi_weight(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        assert_eq!(parsed["summary"]["total_measurements"], 2);
        assert_eq!(parsed["most_polluted"][0]["location"]["name"], "Tannery Outfall");
        assert_eq!(parsed["rejected"][0]["row"], 3);
        assert_eq!(parsed["measurements"][0]["indices"]["healthRisk"], "Critical");
        assert_eq!(parsed["risk_distribution"][0]["health_risk"], "Critical");
    }

    #[test]
    fn test_json_result() {
        let result = IndexResult {
            hpi: 200.0,
            hei: 2.0,
            cd: 2.0,
            health_risk: crate::engine::RiskLevel::Critical,
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&render_result(&result).expect("render")).expect("parse JSON");
        assert_eq!(parsed["hpi"], 200.0);
        assert_eq!(parsed["cd"], 2.0);
        assert_eq!(parsed["healthRisk"], "Critical");
    }

    #[test]
    fn test_json_limits() {
        let parsed: serde_json::Value =
            serde_json::from_str(&render_limits().expect("render")).expect("parse JSON");
        let rows = parsed.as_array().expect("limit rows");
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0]["metal"], "lead");
        assert_eq!(rows[0]["permissible_limit"], 0.01);
        assert_eq!(rows[0]["weight"], 5);
    }
}
