//! Config subcommands handler

use std::path::PathBuf;

use anyhow::Result;

use scrubline::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Print the path the configuration is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(override_path: Option<&PathBuf>) -> Result<()> {
    let path = match override_path {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    println!("{}", path.display());
    Ok(())
}
