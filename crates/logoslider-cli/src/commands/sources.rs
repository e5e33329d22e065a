use anyhow::Result;

use logoslider_core::source::{DataSource, SharePointClient};
use logoslider_core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let client = SharePointClient::new(&config.source)?;
    let sources = client.list_sources().await?;

    if sources.is_empty() {
        println!("No lists found on {}", config.source.site_url);
        return Ok(());
    }

    let selected = config.source.selected_list();
    println!("Lists on {} ({}):\n", config.source.site_url, sources.len());
    for source in &sources {
        let marker = if selected == Some(source.key.as_str()) {
            "*"
        } else {
            " "
        };
        println!("  {} {}", marker, source.text);
    }

    if selected.is_none() {
        println!("\nTo show a list, run:");
        println!("  logoslider --list <name>");
    }

    Ok(())
}
