use std::path::Path;

use anyhow::Result;

use logoslider_core::AppConfig;

pub fn run(config: &AppConfig, config_path: &Path) -> Result<()> {
    let state = if config_path.exists() {
        "found"
    } else {
        "not found, using defaults"
    };
    println!("Config file: {} ({})", config_path.display(), state);
    println!("Log file:    {}", config.log_path().display());
    println!();

    let mut shown = config.clone();
    if shown.source.access_token.is_some() {
        shown.source.access_token = Some("********".to_string());
    }
    print!("{}", toml::to_string_pretty(&shown)?);

    Ok(())
}
