pub mod analyze;
pub mod init;
pub mod list;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use override_guard::config::Config;
use override_guard::contract::InterfaceContract;

const DEFAULT_CONFIG: &str = ".override-guard.toml";

/// Load and validate the config at `path`, or the default location
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let config = Config::load(Path::new(&path))?;
    config.validate()?;
    Ok(config)
}

/// Built-in contracts (unless disabled) followed by configured ones
pub fn available_contracts(config: &Config) -> Result<Vec<InterfaceContract>> {
    let mut all = if config.global.builtin_contracts {
        override_guard_contracts::all_contracts()
    } else {
        Vec::new()
    };
    all.extend(config.contracts.iter().cloned());

    let mut ids = HashSet::new();
    for contract in &all {
        if !ids.insert(contract.id()) {
            anyhow::bail!("Contract id `{}` is defined more than once", contract.id());
        }
    }
    Ok(all)
}

/// Whether a contract runs when no explicit selection is given
pub fn is_default(contract: &InterfaceContract, config: &Config) -> bool {
    config.contracts.contains(contract)
        || override_guard_contracts::DEFAULT_CONTRACTS.contains(&contract.id().as_str())
}
