//! Unit tests for CLI commands

use crate::cli::{Cli, Commands, ServeArgs};
use crate::config::AppConfig;
use crate::logging::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_serve_command_with_flags() {
    let cli = Cli::try_parse_from([
        "kittymux",
        "serve",
        "--addr",
        "127.0.0.1:9000",
        "--config",
        "kitty.yaml",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.addr.as_deref(), Some("127.0.0.1:9000"));
            assert_eq!(args.config, Some(PathBuf::from("kitty.yaml")));
            assert_eq!(args.log_level.as_deref(), Some("debug"));
            assert_eq!(args.log_format.as_deref(), Some("json"));
        }
        Commands::Routes => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_defaults_to_no_overrides() {
    let cli = Cli::try_parse_from(["kittymux", "serve"]).unwrap();
    match cli.command {
        Commands::Serve(args) => assert_eq!(args, ServeArgs::default()),
        Commands::Routes => panic!("Expected Serve command"),
    }
}

#[test]
fn test_routes_command_exists() {
    let cli = Cli::try_parse_from(["kittymux", "routes"]).unwrap();
    assert!(matches!(cli.command, Commands::Routes));
}

#[test]
fn test_unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["kittymux", "generate"]).is_err());
}

#[test]
fn test_flags_override_config() {
    let args = ServeArgs {
        addr: Some("127.0.0.1:1234".into()),
        log_format: Some("json".into()),
        ..ServeArgs::default()
    };
    let config = args.apply(AppConfig::default());
    assert_eq!(config.server.addr, "127.0.0.1:1234");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "info");
}
