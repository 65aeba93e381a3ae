use anyhow::Result;
use override_guard::report::AnalysisReport;
use serde_json::json;

pub fn print(report: &AnalysisReport) -> Result<()> {
    let output = json!({
        "tool": "override-guard",
        "version": env!("CARGO_PKG_VERSION"),
        "report": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
