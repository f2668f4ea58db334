//! Tests for the fetch subcommand and global flags.

use super::{parse, parse_cli};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["modfetch", "fetch"]) {
        CliCommand::Fetch {
            mod_path,
            out,
            concurrency,
            dry_run,
        } => {
            assert_eq!(mod_path, Path::new("tts_mod.json"));
            assert_eq!(out, Path::new("assets"));
            assert!(concurrency.is_none());
            assert!(!dry_run);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_all_flags() {
    match parse(&[
        "modfetch",
        "fetch",
        "--mod",
        "saves/gunslinger.json",
        "--out",
        "/tmp/assets",
        "--concurrency",
        "4",
        "--dry-run",
    ]) {
        CliCommand::Fetch {
            mod_path,
            out,
            concurrency,
            dry_run,
        } => {
            assert_eq!(mod_path, Path::new("saves/gunslinger.json"));
            assert_eq!(out, Path::new("/tmp/assets"));
            assert_eq!(concurrency, Some(4));
            assert!(dry_run);
        }
        _ => panic!("expected Fetch with flags"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse_cli(&["modfetch", "fetch", "-v", "--log-file"]);
    assert!(cli.verbose);
    assert!(cli.log_file);

    let cli = parse_cli(&["modfetch", "fetch"]);
    assert!(!cli.verbose);
    assert!(!cli.log_file);
}

#[test]
fn cli_parse_fetch_rejects_bad_concurrency() {
    assert!(Cli::try_parse_from(["modfetch", "fetch", "--concurrency", "many"]).is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["modfetch"]).is_err());
}
