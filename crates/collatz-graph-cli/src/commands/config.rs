//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;

use crate::config::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("Collatz Graph CLI Configuration");
    println!("{:-<40}", "");
    println!("Layout:          {}", config.graph.layout);
    println!("Range:           {}..={}", config.start, config.end);
    println!("Max steps:       {}", config.max_steps);
    println!("Node radius:     {}", config.graph.node_radius);
    println!("Light:           {}", config.graph.light_position);
    println!(
        "Seed:            {}",
        config
            .graph
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(random)".to_string())
    );
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Print the settings file location.
pub fn path() -> Result<()> {
    match Config::config_file_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(no config file path available)"),
    }
    Ok(())
}

/// Write a settings file with every default spelled out.
pub fn init(force: bool) -> Result<()> {
    if let Some(path) = Config::config_file_path() {
        if path.exists() && !force {
            anyhow::bail!(
                "Config file already exists at {}. Use --force to overwrite it.",
                path.display()
            );
        }
    }
    Config::default().save()?;
    println!("✅ Wrote default configuration");
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
