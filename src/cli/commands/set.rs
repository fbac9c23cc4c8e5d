//! `bumpkin set <VERSION>`

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use super::common::{run_operation, CommandContext};
use crate::cli::types::MultiModuleArgs;
use crate::services::operations::SetOperation;
use crate::services::DefaultSelection;

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Version to write, e.g. 1.2.3 or v2.0.0-rc.1
    pub version: String,

    #[command(flatten)]
    pub common: MultiModuleArgs,
}

pub async fn execute(args: SetArgs, ctx: &CommandContext) -> Result<()> {
    // Parsed before discovery so a typo never touches any file.
    let operation = SetOperation::new(&args.version)?;
    run_operation(ctx, &args.common, Arc::new(operation), DefaultSelection::Prompt).await
}
