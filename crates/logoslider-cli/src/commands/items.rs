use anyhow::{anyhow, Result};

use logoslider_core::source::{DataSource, SharePointClient};
use logoslider_core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let name = config.source.selected_list().ok_or_else(|| {
        anyhow!(
            "No list selected.\nPass --list <name> or set source.list_name in {}",
            AppConfig::config_path().display()
        )
    })?;

    let client = SharePointClient::new(&config.source)?;
    let items = client.list_items(name).await?;

    if items.is_empty() {
        println!("List \"{}\" has no logos.", name);
        return Ok(());
    }

    println!("Logos in \"{}\" ({}):\n", name, items.len());
    for item in &items {
        let title = if item.title.is_empty() {
            "(no title)"
        } else {
            item.title.as_str()
        };
        println!("  {}", title);
        println!("    Link: {}", item.link_url);
        println!("    Logo: {}", item.logo_image_url);
        println!();
    }

    Ok(())
}
