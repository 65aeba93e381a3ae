use std::path::{Path, PathBuf};

use anyhow::Result;

use override_guard::analysis::analyze_path;
use override_guard::cache::CacheManager;
use override_guard::checker::CheckerRegistry;
use override_guard::config::{apply_suppressions, Config};
use override_guard::contract::InterfaceContract;
use override_guard::report::AnalysisReport;

use super::{available_contracts, is_default, load_config};
use crate::output;
use crate::OutputFormat;

#[allow(clippy::too_many_arguments)]
pub fn run(
    path: &Path,
    format: Option<OutputFormat>,
    contracts: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    config: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    trace: bool,
    quiet: bool,
    no_color: bool,
) -> Result<()> {
    let config = load_config(config)?;

    // 1. Pick the contracts to check
    let selected = select_contracts(&config, contracts.as_deref(), exclude.as_deref())?;
    let mut registry = CheckerRegistry::new();
    registry.register_contracts(selected);
    tracing::debug!(contracts = ?registry.list_checkers(), "selected contracts");

    // 2. Analyze every unit under the path (cache misses run in parallel)
    let mut cache = cache_dir.map(CacheManager::open).transpose()?;
    let analysis = analyze_path(path, &registry, trace || config.global.trace, cache.as_mut())?;

    if !quiet {
        eprintln!(
            "Analyzed {} units with {} contracts",
            analysis.units.len(),
            registry.list_checkers().len()
        );
    }

    if trace {
        for unit in &analysis.units {
            let origin = if unit.cached { " (cached)" } else { "" };
            eprintln!("trace {} [{}]{}", unit.unit, unit.source.display(), origin);
            for event in &unit.trace {
                eprintln!("  {event}");
            }
        }
    }

    // 3. Apply config suppressions
    let units = analysis.unit_files();
    let advisories = analysis.advisories();
    let diagnostics = apply_suppressions(analysis.diagnostics, &config);

    // 4. Build report
    let report = AnalysisReport::from_diagnostics(units, diagnostics, advisories);

    // 5. Output
    match format.unwrap_or_else(|| configured_format(&config)) {
        OutputFormat::Json => output::json::print(&report)?,
        OutputFormat::Sarif => output::sarif::print(&report, &registry)?,
        OutputFormat::Text => output::text::print(&report, quiet, no_color)?,
    }

    // 6. Exit code
    if report.total_diagnostics > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Explicit selection, or the default set, minus exclusions and disabled checks
fn select_contracts(
    config: &Config,
    only: Option<&[String]>,
    exclude: Option<&[String]>,
) -> Result<Vec<InterfaceContract>> {
    let available = available_contracts(config)?;

    let mut selected: Vec<InterfaceContract> = match only {
        Some(ids) => {
            let known: Vec<String> = available.iter().map(|c| c.id()).collect();
            if let Some(unknown) = ids.iter().find(|id| !known.contains(id)) {
                anyhow::bail!("Unknown contract: {unknown}");
            }
            available
                .into_iter()
                .filter(|c| ids.contains(&c.id()))
                .collect()
        }
        None => available
            .into_iter()
            .filter(|c| is_default(c, config))
            .collect(),
    };

    if let Some(ids) = exclude {
        selected.retain(|c| !ids.contains(&c.id()));
    }
    selected.retain(|c| config.is_check_enabled(&c.id()));

    if selected.is_empty() {
        anyhow::bail!("No contracts selected");
    }
    Ok(selected)
}

fn configured_format(config: &Config) -> OutputFormat {
    match config.global.output_format.to_lowercase().as_str() {
        "json" => OutputFormat::Json,
        "sarif" => OutputFormat::Sarif,
        _ => OutputFormat::Text,
    }
}
