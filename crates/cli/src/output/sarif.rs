use std::collections::BTreeSet;

use anyhow::Result;
use override_guard::checker::CheckerRegistry;
use override_guard::report::AnalysisReport;
use serde_json::json;

/// Print SARIF 2.1.0 output for GitHub Code Scanning integration
pub fn print(report: &AnalysisReport, registry: &CheckerRegistry) -> Result<()> {
    // One rule per check that produced diagnostics, described from the checker
    let rules: Vec<serde_json::Value> = report
        .diagnostics
        .iter()
        .map(|d| d.check.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|name| {
            let checker = registry.checkers().iter().find(|c| c.name() == name);
            json!({
                "id": name,
                "shortDescription": {
                    "text": checker.map_or(name, |c| c.description())
                },
                "properties": {
                    "interface": checker.map_or("", |c| c.interface())
                },
                "defaultConfiguration": {
                    "level": "warning"
                }
            })
        })
        .collect();

    let results: Vec<serde_json::Value> = report
        .diagnostics
        .iter()
        .map(|d| {
            json!({
                "ruleId": d.check,
                "level": "warning",
                "message": {
                    "text": d.message
                },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": d.location.file.display().to_string()
                        },
                        "region": {
                            "startLine": d.location.line,
                            "startColumn": d.location.column.max(1)
                        }
                    },
                    "logicalLocations": [{
                        "name": d.type_name,
                        "fullyQualifiedName": format!("{}.{}", d.unit, d.type_name),
                        "kind": "type"
                    }]
                }]
            })
        })
        .collect();

    let sarif = json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "override-guard",
                    "version": env!("CARGO_PKG_VERSION"),
                    "informationUri": "https://github.com/safestackai/override-guard",
                    "rules": rules
                }
            },
            "results": results
        }]
    });

    let json = serde_json::to_string_pretty(&sarif)?;
    println!("{json}");
    Ok(())
}
