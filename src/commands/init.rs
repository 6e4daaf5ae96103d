use std::path::Path;

use anyhow::{Context, Result};

use roastme::config::Config;

pub fn run(path: &Path) -> Result<()> {
    let created = Config::create_default(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if created {
        println!("Created default config file: {}", path.display());
    } else {
        println!("Config file {} already exists.", path.display());
    }
    Ok(())
}
