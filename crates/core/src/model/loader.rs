use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use super::types::CompilationUnit;

/// Parse unit facts from the JSON a front end emits
pub fn parse_unit_source(source: &str) -> Result<CompilationUnit> {
    serde_json::from_str(source).map_err(|e| anyhow::anyhow!("Parse error: {}", e))
}

/// Discover all unit facts files (`*.json`) under a path, sorted
pub fn discover_unit_files(path: &Path) -> Result<Vec<PathBuf>> {
    // A single file is taken as is
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No unit facts (.json) found in: {}", path.display());
    }

    Ok(files)
}
