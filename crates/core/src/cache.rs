use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::diagnostic::Diagnostic;

/// Bump when `CachedUnitArtifact` or `UnitIndex` change shape
const SCHEMA_VERSION: u32 = 2;

const INDEX_FILE: &str = "units.json";
const ARTIFACT_DIR: &str = "artifacts";

/// What one unit's run left behind: its diagnostics and advisories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedUnitArtifact {
    pub unit: String,
    pub diagnostics: Vec<Diagnostic>,
    pub advisories: Vec<String>,
}

/// Unit facts file -> key of its last stored result
#[derive(Serialize, Deserialize)]
struct UnitIndex {
    schema_version: u32,
    units: HashMap<PathBuf, UnitEntry>,
}

impl Default for UnitIndex {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            units: HashMap::new(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct UnitEntry {
    key: String,
    artifact: String,
}

/// Per-unit result cache keyed by the unit's facts and the checker set
pub struct CacheManager {
    root: PathBuf,
    index: UnitIndex,
}

impl CacheManager {
    /// Open the cache under `root`, creating it if needed. An unreadable or
    /// outdated index starts the cache empty.
    pub fn open(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(root.join(ARTIFACT_DIR))
            .with_context(|| format!("Failed to create cache dir: {}", root.display()))?;

        let index = fs::read_to_string(root.join(INDEX_FILE))
            .ok()
            .and_then(|data| serde_json::from_str::<UnitIndex>(&data).ok())
            .filter(|index| index.schema_version == SCHEMA_VERSION)
            .unwrap_or_default();

        Ok(Self { root, index })
    }

    /// Cache key for a unit: SHA-256 over the checker fingerprint and the
    /// unit's facts, hex encoded
    pub fn hash_contents(fingerprint: &str, contents: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(fingerprint.as_bytes());
        hasher.update([0u8]);
        hasher.update(contents.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Stored result for `file`, if it was produced under the same key
    pub fn lookup(&self, file: &Path, key: &str) -> Option<CachedUnitArtifact> {
        let entry = self.index.units.get(file).filter(|e| e.key == key)?;
        let data = fs::read(self.artifact_path(&entry.artifact)).ok()?;
        bincode::deserialize(&data).ok()
    }

    pub fn store(&mut self, file: &Path, key: &str, artifact: &CachedUnitArtifact) -> Result<()> {
        let name = format!("{}.bin", key.get(..16).unwrap_or(key));
        fs::write(self.artifact_path(&name), bincode::serialize(artifact)?)?;
        self.index.units.insert(
            file.to_path_buf(),
            UnitEntry {
                key: key.to_string(),
                artifact: name,
            },
        );
        Ok(())
    }

    /// Write the index so the next run can see what was stored
    pub fn flush(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.index)?;
        fs::write(self.root.join(INDEX_FILE), data)?;
        Ok(())
    }

    fn artifact_path(&self, name: &str) -> PathBuf {
        self.root.join(ARTIFACT_DIR).join(name)
    }
}
