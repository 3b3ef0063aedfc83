//! Tests for extract, schema and featurize.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_extract() {
    match parse(&["urlsift", "extract", "https://bit.ly/xyz"]) {
        CliCommand::Extract { url, json } => {
            assert_eq!(url, "https://bit.ly/xyz");
            assert!(!json);
        }
        _ => panic!("expected Extract"),
    }
}

#[test]
fn cli_parse_extract_json() {
    match parse(&["urlsift", "extract", "--json", "example.com"]) {
        CliCommand::Extract { url, json } => {
            assert_eq!(url, "example.com");
            assert!(json);
        }
        _ => panic!("expected Extract with --json"),
    }
}

#[test]
fn cli_parse_extract_empty_string() {
    match parse(&["urlsift", "extract", ""]) {
        CliCommand::Extract { url, .. } => assert_eq!(url, ""),
        _ => panic!("expected Extract"),
    }
}

#[test]
fn cli_parse_schema() {
    match parse(&["urlsift", "schema"]) {
        CliCommand::Schema { json } => assert!(!json),
        _ => panic!("expected Schema"),
    }
}

#[test]
fn cli_parse_featurize() {
    match parse(&["urlsift", "featurize", "data.csv", "--out", "/tmp/x.csv"]) {
        CliCommand::Featurize { dataset, out } => {
            assert_eq!(dataset, std::path::Path::new("data.csv"));
            assert_eq!(out.as_deref(), Some(std::path::Path::new("/tmp/x.csv")));
        }
        _ => panic!("expected Featurize"),
    }
}

#[test]
fn cli_global_config_flag() {
    let cli = Cli::try_parse_from(["urlsift", "schema", "--config", "/etc/urlsift.toml"]).unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/urlsift.toml"))
    );
}

#[test]
fn cli_rejects_missing_url() {
    assert!(Cli::try_parse_from(["urlsift", "extract"]).is_err());
}
