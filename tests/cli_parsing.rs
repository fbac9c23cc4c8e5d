use std::path::PathBuf;

use bumpkin::cli::commands::modules::ModulesCommands;
use bumpkin::cli::output::OutputFormat;
use bumpkin::cli::{Cli, Commands};
use bumpkin::BumpKind;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["bumpkin"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn test_parse_show_defaults() {
    let cli = parse(&["show"]);
    assert!(cli.config.is_none());
    match cli.command {
        Commands::Show(args) => {
            let common = args.common;
            assert!(!common.all);
            assert!(!common.parallel);
            assert!(common.fail_fast);
            assert!(!common.continue_on_error);
            assert_eq!(common.format, OutputFormat::Text);
            assert!(common.max_concurrency.is_none());
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_bump_with_flags() {
    let cli = parse(&[
        "bump",
        "minor",
        "--pre",
        "rc.1",
        "--preserve-meta",
        "-a",
        "--parallel",
        "--continue-on-error",
        "--max-concurrency",
        "4",
        "--format",
        "json",
        "-q",
    ]);
    match cli.command {
        Commands::Bump(args) => {
            assert_eq!(args.kind, BumpKind::Minor);
            assert_eq!(args.pre.as_deref(), Some("rc.1"));
            assert!(args.meta.is_none());
            assert!(args.preserve_meta);
            assert!(args.common.all);
            assert!(args.common.quiet);
            assert_eq!(args.common.format, OutputFormat::Json);

            let options = args.common.executor_options();
            assert!(options.parallel);
            assert!(!options.effective_fail_fast());
            assert_eq!(options.max_concurrency, Some(4));
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_module_selectors_merge() {
    let cli = parse(&["set", "2.0.0", "-m", "api", "--modules", "web,worker", "--pattern", "svc-*"]);
    match cli.command {
        Commands::Set(args) => {
            assert_eq!(args.version, "2.0.0");
            let selectors = args.common.selectors();
            assert_eq!(selectors.module_names(), vec!["api", "web", "worker"]);
            assert_eq!(selectors.pattern.as_deref(), Some("svc-*"));
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_fail_fast_accepts_explicit_value() {
    match parse(&["show", "--fail-fast=false"]).command {
        Commands::Show(args) => assert!(!args.common.fail_fast),
        _ => panic!("Wrong command"),
    }
    match parse(&["show", "--fail-fast"]).command {
        Commands::Show(args) => assert!(args.common.fail_fast),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_global_flags() {
    let cli = parse(&["doctor", "--config", "ci.yaml", "--log-level", "debug", "-p", "VERSION"]);
    assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    match cli.command {
        Commands::Doctor(args) => assert_eq!(args.common.path, Some(PathBuf::from("VERSION"))),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_modules_list() {
    match parse(&["modules", "list", "--format", "table", "-v"]).command {
        Commands::Modules(ModulesCommands::List { format, verbose }) => {
            assert_eq!(format, OutputFormat::Table);
            assert!(verbose);
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_rejects_unknown_format_and_kind() {
    assert!(Cli::try_parse_from(["bumpkin", "show", "--format", "yaml"]).is_err());
    assert!(Cli::try_parse_from(["bumpkin", "bump", "sideways"]).is_err());
    assert!(Cli::try_parse_from(["bumpkin", "show", "--max-concurrency", "0"]).is_err());
}
