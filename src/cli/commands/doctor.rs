//! `bumpkin doctor`

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use super::common::{run_operation, CommandContext};
use crate::cli::types::MultiModuleArgs;
use crate::services::operations::ValidateOperation;
use crate::services::DefaultSelection;

#[derive(Args, Debug)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub common: MultiModuleArgs,
}

pub async fn execute(args: DoctorArgs, ctx: &CommandContext) -> Result<()> {
    run_operation(ctx, &args.common, Arc::new(ValidateOperation), DefaultSelection::All).await
}
