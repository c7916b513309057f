use super::Context;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{normalize_in_place, repair, validate, StoredPost};
use folio_store::DocumentStore;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Resize columns and clamp heading levels, then save
    #[arg(long)]
    pub fix: bool,
}

pub fn check(args: CheckArgs, context: &Context) -> Result<()> {
    let store = context.store();
    let mut collection = store.load_document()?;

    let mut violation_count = 0;
    let mut repaired = 0;

    for entry in &mut collection.entries {
        let post = match entry {
            StoredPost::Post(post) => post,
            StoredPost::Malformed { error, .. } => {
                violation_count += 1;
                eprintln!("  {} malformed post - {}", "✗".red(), error);
                continue;
            }
        };

        // Check what consumers would see; the store is only written with --fix.
        normalize_in_place(post);

        let Some(blocks) = post.blocks_mut() else {
            continue;
        };

        if args.fix {
            let fixed = repair(blocks);
            if fixed > 0 {
                let blocks = blocks.clone();
                post.set_blocks(blocks);
                repaired += fixed;
                println!("  {} {} - repaired {} blocks", "✓".green(), post.id, fixed);
            }
        }

        let Some(blocks) = post.blocks() else {
            continue;
        };
        for violation in validate(blocks) {
            violation_count += 1;
            eprintln!("  {} {} - {}", "✗".red(), post.id, violation);
        }
    }

    if repaired > 0 {
        store.save_document(&collection)?;
    }

    println!();
    if violation_count == 0 {
        println!(
            "{} {} posts checked, no violations",
            "✅".green(),
            collection.len()
        );
        Ok(())
    } else {
        Err(anyhow!("{} invariant violations found", violation_count))
    }
}
