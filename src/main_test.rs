use clap::CommandFactory;

use super::*;
use crate::logs::LogKind;
use crate::resources::ResourceKind;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("docflow").chain(args.iter().copied())).expect("valid arguments")
}

#[test]
fn command_tree_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn resource_toggle_parses() {
    let cli = parse(&["--base-url", "http://host:8080", "resource", "access-rights", "toggle", "12"]);
    assert_eq!(cli.base_url, "http://host:8080");
    let Command::Resource(command) = cli.command else {
        panic!("expected resource command");
    };
    let rendered = format!("{command:?}");
    assert!(rendered.contains(&format!("{:?}", ResourceKind::AccessRights)));
    assert!(rendered.contains("Toggle { id: 12 }"));
}

#[test]
fn logs_follow_parses_kind_and_flags() {
    let cli = parse(&["logs", "system", "--follow", "--filter", "error", "--max-events", "3"]);
    let Command::Logs(args) = cli.command else {
        panic!("expected logs command");
    };
    let rendered = format!("{args:?}");
    assert!(rendered.contains(&format!("{:?}", LogKind::System)));
    assert!(rendered.contains("follow: true"));
    assert!(rendered.contains("max_events: Some(3)"));
}

#[test]
fn remote_process_requires_instance() {
    let err = Cli::try_parse_from(["docflow", "remote", "process", "--initiator", "desk"]).expect_err("missing --instance");
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn unknown_resource_kind_is_rejected() {
    let err = Cli::try_parse_from(["docflow", "resource", "boards", "list"]).expect_err("unknown kind");
    assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
}
