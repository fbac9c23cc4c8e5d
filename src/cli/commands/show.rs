//! `bumpkin show`

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use super::common::{run_operation, CommandContext};
use crate::cli::types::MultiModuleArgs;
use crate::services::operations::ShowOperation;
use crate::services::DefaultSelection;

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub common: MultiModuleArgs,
}

pub async fn execute(args: ShowArgs, ctx: &CommandContext) -> Result<()> {
    run_operation(ctx, &args.common, Arc::new(ShowOperation), DefaultSelection::All).await
}
