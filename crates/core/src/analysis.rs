use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cache::{CacheManager, CachedUnitArtifact};
use crate::checker::{AnalysisContext, CheckerRegistry};
use crate::diagnostic::Diagnostic;
use crate::model::{discover_unit_files, parse_unit_source, CompilationUnit};
use crate::report::reporter::normalize;
use crate::trace::{RunTrace, TraceEvent, TraceLevel};

/// Result of one pipeline run over one unit
#[derive(Debug, Clone)]
pub struct UnitRun {
    pub diagnostics: Vec<Diagnostic>,
    pub trace: Vec<TraceEvent>,
}

impl UnitRun {
    pub fn advisories(&self) -> Vec<String> {
        self.trace
            .iter()
            .filter(|e| e.level == TraceLevel::Advisory)
            .map(|e| e.message.clone())
            .collect()
    }
}

/// Per-file outcome of analyzing a path
#[derive(Debug, Clone)]
pub struct UnitAnalysis {
    pub source: PathBuf,
    pub unit: String,
    pub diagnostics: Vec<Diagnostic>,
    pub advisories: Vec<String>,
    /// Empty when the result came from the cache
    pub trace: Vec<TraceEvent>,
    pub cached: bool,
}

/// Result of analyzing every unit under a path
#[derive(Debug)]
pub struct Analysis {
    /// Sorted by unit name, then source file
    pub units: Vec<UnitAnalysis>,
    /// Normalized: by unit, then position
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn unit_files(&self) -> Vec<PathBuf> {
        self.units.iter().map(|u| u.source.clone()).collect()
    }

    pub fn advisories(&self) -> Vec<String> {
        self.units
            .iter()
            .flat_map(|u| u.advisories.iter().cloned())
            .collect()
    }
}

/// Run every registered checker over one unit with a fresh trace
pub fn analyze_unit(
    unit: &CompilationUnit,
    registry: &CheckerRegistry,
    trace_enabled: bool,
) -> UnitRun {
    let trace = RunTrace::new(trace_enabled);
    let diagnostics = {
        let _span = tracing::debug_span!("unit", package = %unit.package).entered();
        let ctx = AnalysisContext::for_unit(unit, &trace);
        registry.run_all(&ctx)
    };
    UnitRun {
        diagnostics,
        trace: trace.into_events(),
    }
}

/// Analyze all unit facts under `path` with optional unit-level caching.
///
/// Units are independent, so cache misses are analyzed in parallel; the merged
/// result is sorted afterwards and does not depend on scheduling. A traced
/// run neither reads nor writes the cache: every unit is parsed and checked.
pub fn analyze_path(
    path: &Path,
    registry: &CheckerRegistry,
    trace_enabled: bool,
    cache: Option<&mut CacheManager>,
) -> Result<Analysis> {
    let mut cache = match cache {
        Some(_) if trace_enabled => {
            tracing::debug!("tracing enabled, cache bypassed");
            None
        }
        cache => cache,
    };
    let files = discover_unit_files(path)?;
    let fingerprint = registry.fingerprint();

    let mut units: Vec<UnitAnalysis> = Vec::new();
    let mut misses: Vec<(PathBuf, String, String)> = Vec::new();

    for file in files {
        let source = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read: {}", file.display()))?;
        let hash = CacheManager::hash_contents(&fingerprint, &source);

        let cached = cache.as_deref().and_then(|c| c.lookup(&file, &hash));
        match cached {
            Some(artifact) => {
                tracing::debug!(file = %file.display(), "cache hit");
                units.push(UnitAnalysis {
                    source: file,
                    unit: artifact.unit,
                    diagnostics: artifact.diagnostics,
                    advisories: artifact.advisories,
                    trace: Vec::new(),
                    cached: true,
                });
            }
            None => misses.push((file, source, hash)),
        }
    }

    let fresh: Vec<(UnitAnalysis, String)> = misses
        .into_par_iter()
        .map(|(file, source, hash)| -> Result<(UnitAnalysis, String)> {
            let unit = parse_unit_source(&source)
                .with_context(|| format!("Failed to parse: {}", file.display()))?;
            let run = analyze_unit(&unit, registry, trace_enabled);
            let analysis = UnitAnalysis {
                source: file,
                unit: unit.package,
                advisories: run.advisories(),
                diagnostics: run.diagnostics,
                trace: run.trace,
                cached: false,
            };
            Ok((analysis, hash))
        })
        .collect::<Result<Vec<_>>>()?;

    for (analysis, hash) in fresh {
        if let Some(c) = cache.as_deref_mut() {
            let artifact = CachedUnitArtifact {
                unit: analysis.unit.clone(),
                diagnostics: analysis.diagnostics.clone(),
                advisories: analysis.advisories.clone(),
            };
            // Non-fatal: log but keep the fresh result
            if let Err(err) = c.store(&analysis.source, &hash, &artifact) {
                tracing::warn!("cache write failed for {}: {err}", analysis.source.display());
            }
        }
        units.push(analysis);
    }

    if let Some(c) = cache {
        if let Err(err) = c.flush() {
            tracing::warn!("cache flush failed: {err}");
        }
    }

    units.sort_by(|a, b| a.unit.cmp(&b.unit).then_with(|| a.source.cmp(&b.source)));
    let diagnostics = normalize(
        units
            .iter()
            .flat_map(|u| u.diagnostics.iter().cloned())
            .collect(),
    );

    Ok(Analysis { units, diagnostics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Receiver;
    use crate::test_support::*;

    fn registry() -> CheckerRegistry {
        let mut registry = CheckerRegistry::new();
        registry.register_contracts(vec![full_contract()]);
        registry
    }

    fn write_units(dir: &Path) {
        let _ = std::fs::remove_dir_all(dir);
        std::fs::create_dir_all(dir).unwrap();

        let mut beta = slog_unit("beta");
        beta.types.push(embedding_handler("BetaHandler", 7, vec![]));
        let mut alpha = slog_unit("alpha");
        alpha.types.push(embedding_handler(
            "AlphaHandler",
            3,
            vec![with_attrs(Receiver::Pointer)],
        ));

        // File order deliberately differs from unit order
        std::fs::write(dir.join("a.json"), serde_json::to_string(&beta).unwrap()).unwrap();
        std::fs::write(dir.join("b.json"), serde_json::to_string(&alpha).unwrap()).unwrap();
    }

    #[test]
    fn test_analyze_unit_collects_advisories() {
        let mut unit = CompilationUnit::new("handlers");
        unit.types.push(embedding_handler("TraceHandler", 10, vec![]));

        let run = analyze_unit(&unit, &registry(), false);
        assert!(run.diagnostics.is_empty());
        assert_eq!(run.advisories().len(), 1);
    }

    #[test]
    fn test_analyze_path_orders_by_unit() {
        let dir = std::env::temp_dir().join("override-guard-analysis-order");
        write_units(&dir);

        let analysis = analyze_path(&dir, &registry(), false, None).unwrap();
        let order: Vec<(String, String)> = analysis
            .diagnostics
            .iter()
            .map(|d| (d.unit.clone(), d.method.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("alpha".to_string(), "WithGroup".to_string()),
                ("beta".to_string(), "WithAttrs".to_string()),
                ("beta".to_string(), "WithGroup".to_string()),
            ]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cached_run_matches_fresh_run() {
        let dir = std::env::temp_dir().join("override-guard-analysis-cache");
        let cache_dir = std::env::temp_dir().join("override-guard-analysis-cache-store");
        write_units(&dir);
        let _ = std::fs::remove_dir_all(&cache_dir);

        let registry = registry();
        let mut cache = CacheManager::open(cache_dir.clone()).unwrap();
        let first = analyze_path(&dir, &registry, false, Some(&mut cache)).unwrap();
        assert!(first.units.iter().all(|u| !u.cached));

        let second = analyze_path(&dir, &registry, false, Some(&mut cache)).unwrap();
        assert!(second.units.iter().all(|u| u.cached));
        assert_eq!(first.diagnostics, second.diagnostics);

        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::remove_dir_all(&cache_dir);
    }

    #[test]
    fn test_traced_run_bypasses_cache() {
        let dir = std::env::temp_dir().join("override-guard-analysis-trace");
        let cache_dir = std::env::temp_dir().join("override-guard-analysis-trace-store");
        write_units(&dir);
        let _ = std::fs::remove_dir_all(&cache_dir);

        let registry = registry();
        let mut cache = CacheManager::open(cache_dir.clone()).unwrap();
        let untraced = analyze_path(&dir, &registry, false, Some(&mut cache)).unwrap();

        let traced = analyze_path(&dir, &registry, true, Some(&mut cache)).unwrap();
        assert!(traced.units.iter().all(|u| !u.cached && !u.trace.is_empty()));
        assert_eq!(traced.diagnostics, untraced.diagnostics);

        let _ = std::fs::remove_dir_all(&dir);
        let _ = std::fs::remove_dir_all(&cache_dir);
    }
}
