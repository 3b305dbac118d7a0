use argtree::{App, Arg, Command, Flag, Typecast};
use expect_test::expect;

use crate::{check, pkg};

#[test]
fn leaf_with_global_flag() {
    check(
        &pkg(),
        "serve 8080 --verbose",
        expect![[r#"
            command: pkg serve
            port = Int(8080)
            verbose = Bool(true)
        "#]],
    );
    check(
        &pkg(),
        "s -b 0.0.0.0 80",
        expect![[r#"
            command: pkg serve
            bindAddr = Str("0.0.0.0")
            port = Int(80)
        "#]],
    );
}

#[test]
fn missing_required_argument() {
    check(
        &pkg(),
        "serve",
        expect!["missing required argument `port`: expected at least 1 value(s)"],
    );
    check(
        &pkg(),
        "install --force",
        expect!["missing required argument `packages`: expected at least 1 value(s)"],
    );
    check(
        &pkg(),
        "copy a",
        expect!["missing required argument `src`: expected at least 2 value(s)"],
    );
}

#[test]
fn bad_typecast() {
    check(&pkg(), "serve http", expect!["Can't parse `port`, invalid digit found in string"]);
}

#[test]
fn help_skips_argument_errors() {
    check(
        &pkg(),
        "serve --help",
        expect![[r#"
            command: pkg serve
            help = Bool(true)
        "#]],
    );
    check(
        &pkg(),
        "--help",
        expect![[r#"
            command: pkg
            help = Bool(true)
        "#]],
    );
}

#[test]
fn help_skips_flag_value_errors() {
    let app = App::<()>::new("Builder")
        .name("build")
        .global_flag(Flag::value('t', "threads", "Worker threads").typecast(Typecast::int()))
        .subcommand(
            Command::new("make")
                .alias("m")
                .flag(Flag::value('j', "jobs", "Parallel jobs").typecast(Typecast::int()))
                .arg(Arg::new("target").required()),
        );

    check(
        &app,
        "m --help -jx",
        expect![[r#"
            command: build make
            help = Bool(true)
        "#]],
    );
    check(
        &app,
        "-t x --help m -j 2 t",
        expect![[r#"
            command: build make
            help = Bool(true)
            jobs = Int(2)
            target = Str("t")
        "#]],
    );
    check(&app, "m -jx t", expect!["Can't parse `--jobs`, invalid digit found in string"]);
    check(&app, "-t x m t", expect!["Can't parse `--threads`, invalid digit found in string"]);
}

#[test]
fn local_flags_anywhere_after_the_command() {
    check(
        &pkg(),
        "install -f a b --dry-run c",
        expect![[r#"
            command: pkg install
            dryRun = Bool(true)
            force = Bool(true)
            packages = List([Str("a"), Str("b"), Str("c")])
        "#]],
    );
}

#[test]
fn repeated_flag_is_left_over() {
    check(
        &pkg(),
        "serve 8080 --verbose --verbose",
        expect![[r#"
            command: pkg serve
            port = Int(8080)
            verbose = Bool(true)
            argv = ["--verbose"]
        "#]],
    );
}

#[test]
fn global_value_flag_spellings() {
    let spellings = [
        "-c/etc/pkg.toml serve 1",
        "--config=/etc/pkg.toml serve 1",
        "serve --config /etc/pkg.toml 1",
    ];
    for args in spellings {
        let app = pkg();
        let dispatch = app.parse(args.split(' ')).unwrap();
        assert_eq!(dispatch.matches.value::<String>("config").unwrap(), "/etc/pkg.toml", "{args}");
        assert_eq!(dispatch.matches.value::<u16>("port").unwrap(), 1, "{args}");
    }
    check(
        &pkg(),
        "serve 8080 -c",
        expect![[r#"
            command: pkg serve
            config = Undefined
            port = Int(8080)
        "#]],
    );
}

#[test]
fn nested_dispatch() {
    check(
        &pkg(),
        "remote add origin https://example.com",
        expect![[r#"
            command: pkg remote add
            name = Str("origin")
            url = Str("https://example.com")
        "#]],
    );
    check(
        &pkg(),
        "remote rm origin extra",
        expect![[r#"
            command: pkg remote remove
            name = Str("origin")
            argv = ["extra"]
        "#]],
    );
    check(
        &pkg(),
        "remote --verbose add x y",
        expect![[r#"
            command: pkg remote add
            name = Str("x")
            url = Str("y")
            verbose = Bool(true)
        "#]],
    );
}

#[test]
fn dispatch_stops_at_unknown_token() {
    check(
        &pkg(),
        "remote",
        expect![[r#"
            command: pkg remote
        "#]],
    );
    check(
        &pkg(),
        "remote origin",
        expect![[r#"
            command: pkg remote
            argv = ["origin"]
        "#]],
    );
    check(
        &pkg(),
        "remote -x add a b",
        expect![[r#"
            command: pkg remote
            argv = ["-x", "add", "a", "b"]
        "#]],
    );
    // the second `--verbose` is not global anymore and stops dispatch
    check(
        &pkg(),
        "--verbose remote --verbose add x y",
        expect![[r#"
            command: pkg remote
            verbose = Bool(true)
            argv = ["--verbose", "add", "x", "y"]
        "#]],
    );
}

#[test]
fn fixed_and_optional_arities() {
    check(
        &pkg(),
        "copy a b c",
        expect![[r#"
            command: pkg copy
            dest = Str("c")
            src = List([Str("a"), Str("b")])
        "#]],
    );
    check(
        &pkg(),
        "copy a b",
        expect![[r#"
            command: pkg copy
            src = List([Str("a"), Str("b")])
        "#]],
    );
}

#[test]
fn matches_bookkeeping() {
    let app = pkg();
    let dispatch = app.parse(["remote", "rm", "origin"]).unwrap();
    assert_eq!(dispatch.command.name(), "remove");
    assert_eq!(dispatch.matches.commands, ["pkg", "remote", "remove"]);
    assert_eq!(dispatch.matches.root.version.as_deref(), Some("0.1.0"));
    assert_eq!(dispatch.matches.root.description.as_deref(), Some("Package manager"));
    assert!(!dispatch.help);
}
