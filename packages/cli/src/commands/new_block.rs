use super::Context;
use anyhow::Result;
use clap::Args;
use folio_editor::{BlockFactory, TimeRandomIdGenerator};

#[derive(Debug, Args)]
pub struct NewBlockArgs {
    /// Block type (heading, paragraph, image, columns, grid)
    pub block_type: String,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
}

pub fn new_block(args: NewBlockArgs, context: &Context) -> Result<()> {
    let mut factory = BlockFactory::new(TimeRandomIdGenerator::new(&context.config.id_prefix));
    let block = factory.create(&args.block_type, &[])?;

    let json = if args.compact {
        serde_json::to_string(&block)?
    } else {
        serde_json::to_string_pretty(&block)?
    };
    println!("{}", json);

    Ok(())
}
