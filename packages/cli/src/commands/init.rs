use super::Context;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_store::DocumentStore;
use std::fs;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Store file location written to the config
    #[arg(short, long, default_value = "data/db.json")]
    pub store_path: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, context: &Context) -> Result<()> {
    let config_path = context.cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Folio store...".bright_blue().bold());

    let config = Config {
        store_path: args.store_path,
        ..context.config.clone()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let store_path = config.get_store_path(&context.cwd);
    if !store_path.exists() {
        folio_store::JsonFileStore::new(&store_path).save_document(&Default::default())?;
        println!("  {} Created {}", "✓".green(), config.store_path);
    }

    println!();
    println!("{} Folio store initialized", "✅".green());

    Ok(())
}
