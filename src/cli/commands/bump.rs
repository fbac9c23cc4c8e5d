//! `bumpkin bump <KIND>`

use std::sync::Arc;

use anyhow::Result;
use clap::Args;

use super::common::{run_operation, CommandContext};
use crate::cli::types::MultiModuleArgs;
use crate::domain::models::BumpKind;
use crate::services::operations::{BumpOperation, BumpOptions};
use crate::services::DefaultSelection;

#[derive(Args, Debug)]
pub struct BumpArgs {
    /// Bump kind: patch, minor, major, release or auto
    pub kind: BumpKind,

    /// Pre-release label applied after bumping, e.g. rc.1
    #[arg(long, value_name = "LABEL")]
    pub pre: Option<String>,

    /// Build metadata applied after bumping
    #[arg(long, value_name = "BUILD")]
    pub meta: Option<String>,

    /// Keep existing build metadata when --meta is not given
    #[arg(long)]
    pub preserve_meta: bool,

    #[command(flatten)]
    pub common: MultiModuleArgs,
}

impl BumpArgs {
    fn options(&self) -> BumpOptions {
        BumpOptions {
            pre: self.pre.clone(),
            meta: self.meta.clone(),
            preserve_meta: self.preserve_meta,
        }
    }
}

pub async fn execute(args: BumpArgs, ctx: &CommandContext) -> Result<()> {
    let operation = BumpOperation::new(args.kind, args.options());
    run_operation(ctx, &args.common, Arc::new(operation), DefaultSelection::Prompt).await
}
