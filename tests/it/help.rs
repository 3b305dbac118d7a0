use std::{io::Write, sync::Arc};

use argtree::{App, Command, Flag, HelpConfig, Hook, Matches, Outcome};
use expect_test::{expect, Expect};

use crate::pkg;

fn check_help<T>(app: &App<T>, args: &str, expect: Expect) {
    let mut out = Vec::new();
    let res = app.run(args.split_ascii_whitespace(), &mut out).unwrap();
    assert!(matches!(res, Outcome::Help));
    let text = String::from_utf8(out).unwrap().replace('\t', " | ");
    expect.assert_eq(&text);
}

#[test]
fn root_help() {
    check_help(
        &pkg(),
        "--help",
        expect![[r#"
            pkg 0.1.0
              Package manager

            Usage:
              pkg <serve|install|remote|copy>

            Commands:
              serve, s   | Serve the registry
              install, i | Install packages
              remote     | Manage remotes
              copy       | Copy files

            Options:
              -h, --help              | Print this help message
              -v, --verbose           | Chatty output
              -c, --config <argument> | Config file
        "#]],
    );
}

#[test]
fn leaf_help() {
    check_help(
        &pkg(),
        "serve -h",
        expect![[r#"
            pkg 0.1.0
              Package manager

            Usage:
              pkg serve [options] <port>

            Description:
              Serve the registry

            Arguments:
              <port> | Port to listen on

            Options:
              -b, --bind-addr <argument> | Address to bind
              -h, --help                 | Print this help message
              -v, --verbose              | Chatty output
              -c, --config <argument>    | Config file
        "#]],
    );
}

#[test]
fn help_for_node_with_action_and_children() {
    check_help(
        &pkg(),
        "remote --help",
        expect![[r#"
            pkg 0.1.0
              Package manager

            Usage:
              pkg remote [options]
              pkg remote [add|remove]

            Description:
              Manage remotes

            Commands:
              add        | Add a remote
              remove, rm | Remove a remote

            Options:
              -h, --help              | Print this help message
              -v, --verbose           | Chatty output
              -c, --config <argument> | Config file
        "#]],
    );
}

#[test]
fn no_action_means_help() {
    let mut out = Vec::new();
    let res = pkg().run(Vec::<String>::new(), &mut out).unwrap();
    assert_eq!(res, Outcome::Help);
    assert!(String::from_utf8(out).unwrap().starts_with("pkg 0.1.0\n"));
}

#[test]
fn prolog_and_epilog() {
    let prolog: Hook = Arc::new(|m: &Matches, out: &mut dyn Write| {
        writeln!(out, "== {} ==", m.commands.join(" "))
    });
    let epilog: Hook = Arc::new(|_: &Matches, out: &mut dyn Write| writeln!(out, "bye"));
    let app = App::<()>::new("Hooks")
        .name("hooks")
        .help(HelpConfig { auto: false, color: false, prolog: Some(prolog), epilog: Some(epilog) })
        .subcommand(Command::new("sub").flag(Flag::switch('q', "quiet", "Say less")));

    check_help(
        &app,
        "sub -h",
        expect![[r#"
            == hooks sub ==
            bye
        "#]],
    );
}

#[test]
fn color_is_inherited_at_attach_time() {
    let app = App::<()>::new("Colors")
        .name("colors")
        .subcommand(Command::new("early").subcommand(Command::new("nested")))
        .help(HelpConfig::plain())
        .subcommand(Command::new("late"))
        .subcommand(Command::new("own").help(HelpConfig::default()));

    let color_of = |args: &[&str]| {
        app.parse(args.iter().copied()).unwrap().command.help_config().color
    };
    assert!(!color_of(&[]));
    assert!(color_of(&["early"]));
    assert!(color_of(&["early", "nested"]));
    assert!(!color_of(&["late"]));
    assert!(color_of(&["own"]));

    let mut out = Vec::new();
    app.run(["early", "--help"], &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("\u{1b}["));

    let mut out = Vec::new();
    app.run(["late", "--help"], &mut out).unwrap();
    assert!(!String::from_utf8(out).unwrap().contains("\u{1b}["));
}

#[test]
fn parent_config_set_after_attach_stays_with_parent() {
    let app = App::<()>::new("Colors")
        .name("colors")
        .subcommand(
            Command::new("remote")
                .subcommand(Command::new("add").subcommand(Command::new("url")))
                .help(HelpConfig::plain())
                .subcommand(Command::new("remove")),
        );

    let color_of = |args: &[&str]| {
        app.parse(args.iter().copied()).unwrap().command.help_config().color
    };
    assert!(!color_of(&["remote"]));
    assert!(color_of(&["remote", "add"]));
    assert!(color_of(&["remote", "add", "url"]));
    assert!(!color_of(&["remote", "remove"]));
}
