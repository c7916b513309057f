use super::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{normalize_collection, MigrationReport};
use folio_store::{load_normalized, DocumentStore};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Report what would change without writing the store
    #[arg(long)]
    pub dry_run: bool,
}

pub fn migrate(args: MigrateArgs, context: &Context) -> Result<()> {
    let store = context.store();
    println!(
        "{} {}",
        "🔄 Normalizing".bright_blue().bold(),
        store.path().display()
    );

    let (report, persisted) = if args.dry_run {
        let mut collection = store.load_document()?;
        (normalize_collection(&mut collection), false)
    } else {
        let loaded = load_normalized(&store)?;
        (loaded.report, loaded.persisted)
    };

    print_report(&report);

    println!();
    if !report.has_changes() {
        println!("{} Store already canonical", "✅".green());
    } else if persisted {
        println!(
            "{} Rewrote {} posts",
            "✅".green(),
            report.changed.len()
        );
    } else {
        println!(
            "{} {} posts would be rewritten (dry run)",
            "ℹ️".bright_blue(),
            report.changed.len()
        );
    }

    Ok(())
}

fn print_report(report: &MigrationReport) {
    for id in &report.changed {
        println!("  {} {}", "✓".green(), id);
    }
    for (id, error) in &report.failures {
        eprintln!("  {} {} - {}", "✗".red(), id, error.red());
    }
}
