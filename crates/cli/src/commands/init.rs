use std::path::Path;

use anyhow::Result;
use override_guard::config::Config;

pub fn run(force: bool) -> Result<()> {
    let path = Path::new(super::DEFAULT_CONFIG);
    if path.exists() && !force {
        eprintln!("Config file already exists: {} (use --force to overwrite)", path.display());
        return Ok(());
    }
    std::fs::write(path, Config::default_toml())?;
    println!("Created {}", path.display());
    Ok(())
}
