//! Unit tests for CLI commands

use crate::cli::{Cli, Commands};
use crate::demo::DemoApp;
use clap::Parser;

#[test]
fn test_serve_command_with_flags() {
    let cli = Cli::try_parse_from([
        "minirouter",
        "serve",
        "--app",
        "typed",
        "--addr",
        "127.0.0.1:9000",
        "--types",
        "false",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve { app, addr } => {
            assert_eq!(app.app, DemoApp::Typed);
            assert_eq!(addr.as_deref(), Some("127.0.0.1:9000"));
            assert_eq!(app.types, Some(false));
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_call_command_defaults_to_get() {
    let cli = Cli::try_parse_from(["minirouter", "call", "--app", "hello", "/hello"]).unwrap();

    match cli.command {
        Commands::Call { app, method, path } => {
            assert_eq!(app.app, DemoApp::Hello);
            assert_eq!(method, "GET");
            assert_eq!(path, "/hello");
        }
        _ => panic!("Expected Call command"),
    }
}

#[test]
fn test_flags_override_config() {
    let cli = Cli::try_parse_from([
        "minirouter",
        "routes",
        "--app",
        "params",
        "--name",
        "Shelf",
        "--types",
        "true",
    ])
    .unwrap();

    let Commands::Routes { app, json } = cli.command else {
        panic!("Expected Routes command");
    };
    assert!(!json);
    let (router, config) = app.build().unwrap();
    assert_eq!(config.name, "Shelf");
    assert_eq!(router.name(), "Shelf");
    assert!(router.types_enabled());
}

#[test]
fn test_unknown_app_is_rejected() {
    assert!(Cli::try_parse_from(["minirouter", "routes", "--app", "petstore"]).is_err());
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["minirouter", "serve", "--app", "hello"],
        vec!["minirouter", "routes", "--app", "multi", "--json"],
        vec!["minirouter", "call", "--app", "typed", "-m", "post", "/book/1"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}
