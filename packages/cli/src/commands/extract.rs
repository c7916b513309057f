use super::Context;
use anyhow::{anyhow, Result};
use clap::Args;
use folio_editor::extract_text;
use folio_store::load_normalized;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Post id
    pub post_id: String,
}

pub fn extract(args: ExtractArgs, context: &Context) -> Result<()> {
    let loaded = load_normalized(&context.store())?;
    let post = loaded
        .collection
        .find(&args.post_id)
        .ok_or_else(|| anyhow!("Post not found: {}", args.post_id))?;

    // Posts with undecodable legacy data only have their stored content.
    match post.blocks() {
        Some(blocks) => println!("{}", extract_text(blocks)),
        None => println!("{}", post.content),
    }

    Ok(())
}
