use std::path::PathBuf;

use anyhow::Result;
use override_guard::contract::DetectionMode;

use super::{available_contracts, is_default, load_config};

pub fn run(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let contracts = available_contracts(&config)?;

    println!(
        "{:<28} {:<16} {:<24} {:<8} Required",
        "Name", "Interface", "Detection", "Default"
    );
    println!("{}", "-".repeat(100));

    for c in &contracts {
        let detection: Vec<&str> = c
            .detection
            .iter()
            .map(|m| match m {
                DetectionMode::Embedding => "embedding",
                DetectionMode::Conformance => "conformance",
            })
            .collect();
        let required: Vec<&str> = c.required_methods.iter().map(|m| m.name.as_str()).collect();
        println!(
            "{:<28} {:<16} {:<24} {:<8} {}",
            c.id(),
            c.display_name(),
            detection.join(","),
            if is_default(c, &config) { "yes" } else { "no" },
            required.join(", ")
        );
    }

    println!("\nTotal: {} contracts", contracts.len());
    Ok(())
}
