use anyhow::Result;

use pagestack_core::PagestackConfig;

pub fn run(config: &PagestackConfig) -> Result<()> {
    println!("# {}", PagestackConfig::config_path().display());
    print!("{}", config.to_toml()?);
    Ok(())
}
