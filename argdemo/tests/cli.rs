use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

use test_driver::TestSession;

const BIN: &str = env!("CARGO_BIN_EXE_parse-demo");

const USAGE_80: &str = "usage: parse-demo [-i INPUT] [-q] [-c [CONFIG]] [-v] [-o OFFSET] [--name NAME]\n \
                        [--dry-run] ARGNAME LENGTH [FILTER]\n";

const USAGE_40: &str = "usage: parse-demo [-i INPUT] [-q]\n \
                        [-c [CONFIG]] [-v] [-o OFFSET]\n \
                        [--name NAME] [--dry-run] ARGNAME\n \
                        LENGTH [FILTER]\n";

fn session(args: &[&str]) -> TestSession {
    TestSession::new(BIN, args)
}

fn report(stdout: &str) -> &str {
    stdout
        .split_once("------------\n")
        .map(|(_, rest)| rest)
        .unwrap_or_else(|| panic!("no separator in:\n{stdout}"))
}

// -- help / version --

#[test]
fn help_exits_zero() {
    let out = session(&["--help"]).wait_exit(0);
    let body = report(&out.stdout);
    assert!(
        body.starts_with("usage: parse-demo [OPTION]... ARGNAME LENGTH [FILTER]\nParse the command line"),
        "{body}"
    );
    assert!(body.ends_with("\n\nparse-demo: table-driven argument parsing\n"), "{body}");
    assert_eq!(out.stderr, "");
}

#[test]
fn short_help_in_cluster() {
    let out = session(&["-vh", "arg"]).wait_exit(0);
    assert!(report(&out.stdout).starts_with("usage: parse-demo [OPTION]..."));
}

#[test]
fn version_uses_canonical_name() {
    let out = session(&["a", "1", "--version"]).wait_exit(0);
    assert_eq!(
        report(&out.stdout),
        format!(
            "argtable-demo version: {}\nargtable-demo - table-driven argument parsing\n",
            env!("CARGO_PKG_VERSION")
        )
    );
}

// -- failures --

#[test]
fn unknown_option() {
    let out = session(&["--bogus", "a", "1"]).wait_exit(1);
    assert_eq!(
        out.stderr,
        "error: unknown argument [--bogus].\nTry parse-demo --help for more information.\n"
    );
}

#[test]
fn unknown_short_in_cluster() {
    let out = session(&["-qz", "a", "1"]).wait_exit(1);
    assert_eq!(
        out.stderr,
        "error: unknown argument [-z].\nTry parse-demo --help for more information.\n"
    );
}

#[test]
fn missing_option_value() {
    let out = session(&["a", "1", "--name"]).wait_exit(1);
    assert_eq!(
        out.stderr,
        "error: missing argument for [--name].\nTry parse-demo --help for more information.\n"
    );
}

#[test]
fn missing_positional_prints_usage() {
    let out = session(&["arg"]).wait_exit(1);
    assert_eq!(
        out.stderr,
        "error: missing argument for [LENGTH].\nusage: parse-demo [OPTION]... ARGNAME LENGTH [FILTER]\n"
    );
}

#[test]
fn invalid_values() {
    let out = session(&["-o", "4x", "a", "1"]).wait_exit(1);
    assert_eq!(out.stderr, "error: parse-demo: invalid value [4x] for -o/--offset.\n");

    let out = session(&["a", "4x"]).wait_exit(1);
    assert_eq!(out.stderr, "error: parse-demo: invalid value [4x] for LENGTH.\n");
}

#[test]
fn non_unicode_argument() {
    let out = TestSession::new(BIN, &["a", "1"])
        .arg_os(OsStr::from_bytes(b"\xff"))
        .wait_exit(1);
    assert_eq!(
        out.stderr,
        "error: parse-demo: argument [\u{FFFD}] is not valid Unicode.\n"
    );
}

// -- usage wrapping --

#[test]
fn usage_falls_back_to_80_columns() {
    let out = session(&["a", "1"]).wait_exit(0);
    assert!(out.stdout.starts_with(USAGE_80), "{}", out.stdout);
}

#[test]
fn usage_follows_terminal_width() {
    let out = session(&["a", "1"]).columns(40).wait_exit(0);
    assert!(out.stdout.starts_with(USAGE_40), "{}", out.stdout);

    let out = session(&["a", "1"]).columns(200).wait_exit(0);
    let first = out.stdout.lines().next().unwrap_or_default();
    assert!(first.ends_with("[--dry-run] ARGNAME LENGTH [FILTER]"), "{first}");
}

// -- successful runs --

#[test]
fn full_report() {
    let out = session(&["arg", "4k", "extra", "more", "--", "-x"]).wait_exit(0);
    assert_eq!(
        out.stdout,
        format!(
            "{USAGE_80}------------\n\
             Input file: []\n\
             Quietness: [0]\n\
             Config file: [default] (count: 0)\n\
             Verboseness: [0]\n\
             File offset: [0]\n\
             Name: []\n\
             Dry runs: [0]\n\
             Argument name: [arg]\n\
             File length: [4096]\n\
             Filter: [extra] (count: 1)\n\
             Remaining arguments:\n\
             more\n\
             -x\n"
        )
    );
    assert_eq!(out.stderr, "");
}

#[test]
fn options_anywhere() {
    let out = session(&[
        "-q", "arg", "-c", "--offset", "1k", "64", "--name=n", "-qv", "--dry-run", "--dry-run",
    ])
    .wait_exit(0);
    let body = report(&out.stdout);
    assert!(body.contains("Quietness: [2]\n"), "{body}");
    assert!(body.contains("Config file: [default] (count: 1)\n"), "{body}");
    assert!(body.contains("Verboseness: [1]\n"), "{body}");
    assert!(body.contains("File offset: [1024]\n"), "{body}");
    assert!(body.contains("Name: [n]\n"), "{body}");
    assert!(body.contains("Dry runs: [2]\n"), "{body}");
    assert!(body.contains("File length: [64]\n"), "{body}");
    assert!(body.ends_with("Remaining arguments:\n"), "{body}");
}

#[test]
fn logging_goes_to_stderr_only() {
    let out = session(&["a", "1"])
        .env("PARSE_DEMO_LOG", "debug")
        .wait_exit(0);
    assert!(out.stdout.starts_with(USAGE_80));
    assert!(!out.stdout.contains("scan complete"));
    assert!(out.stderr.contains("scan complete"), "{}", out.stderr);
}
