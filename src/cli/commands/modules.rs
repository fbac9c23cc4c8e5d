//! `bumpkin modules ...`: workspace inspection.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;

use super::common::CommandContext;
use crate::cli::output::{output, render_modules, CommandOutput, OutputFormat};
use crate::domain::models::{DetectedContext, Module};

#[derive(Subcommand, Debug)]
pub enum ModulesCommands {
    /// List discovered modules
    List {
        /// Output format: text, json or table
        #[arg(long, value_name = "FORMAT", default_value = "text")]
        format: OutputFormat,

        /// Show version file paths
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show discovery settings, the detected mode and the modules found
    Discover {
        /// Output format: text or json
        #[arg(long, value_name = "FORMAT", default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Serialize)]
pub struct DiscoverOutput {
    pub root: String,
    pub enabled: bool,
    pub recursive: bool,
    pub max_depth: i32,
    pub explicit_modules: bool,
    pub exclude: Vec<String>,
    pub mode: String,
    pub modules: Vec<Module>,
}

impl CommandOutput for DiscoverOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Root:      {}", self.root),
            format!(
                "Discovery: {} (recursive: {}, max depth: {})",
                if self.enabled { "enabled" } else { "disabled" },
                self.recursive,
                self.max_depth
            ),
        ];
        if self.explicit_modules {
            lines.push("Modules are declared explicitly in configuration".to_string());
        }
        lines.push(format!("Exclude:   {}", self.exclude.join(", ")));
        lines.push(format!("Mode:      {}", self.mode));
        lines.push(String::new());
        lines.push(render_modules(&self.modules, OutputFormat::Text, true));
        lines.join("\n")
    }

    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(command: ModulesCommands, ctx: &CommandContext) -> Result<()> {
    match command {
        ModulesCommands::List { format, verbose } => {
            let modules = ctx.detector().discover(&ctx.root)?;
            println!("{}", render_modules(&modules, format, verbose));
        }
        ModulesCommands::Discover { format } => {
            let modules = ctx.detector().discover(&ctx.root)?;
            let discovery = ctx.config.discovery();
            let result = DiscoverOutput {
                root: ctx.root.display().to_string(),
                enabled: discovery.enabled,
                recursive: discovery.recursive,
                max_depth: discovery.max_depth,
                explicit_modules: ctx.config.has_explicit_modules(),
                exclude: ctx.config.exclude_patterns(),
                mode: DetectedContext::from_modules(modules.clone()).mode().to_string(),
                modules,
            };
            output(&result, format == OutputFormat::Json);
        }
    }
    Ok(())
}
