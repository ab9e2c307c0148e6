use std::fs;
use std::path::PathBuf;

use docopt_grammar_parser::{
    CompileConfig, Error, ExpandLimits, GrammarError, Token, balance_and_expand, compile_help,
    compile_help_with_config, parse_options, parse_usage, split_sections,
};

#[test]
fn test_naval_fate_compiles_every_invocation() {
    let help = compile_help(&fixture("naval_fate.txt")).expect("fixture should compile");
    assert_eq!(help.binary, "naval_fate");
    assert_eq!(help.usages.len(), 6);

    let counts: Vec<usize> = help.usages.iter().map(|usage| usage.variants.len()).collect();
    assert_eq!(counts, [1, 2, 1, 6, 2, 1]);

    let variants: Vec<String> = help.variants().map(ToString::to_string).collect();
    assert_eq!(variants.len(), 13);
    assert_eq!(variants[0], "ship new <name>...");
    assert_eq!(variants[1], "ship <name> move <x> <y>");
    assert_eq!(variants[2], "ship <name> move <x> <y> --speed=<kn>");
    assert_eq!(
        &variants[4..10],
        [
            "mine set <x> <y>",
            "mine set <x> <y> --moored",
            "mine set <x> <y> --drifting",
            "mine remove <x> <y>",
            "mine remove <x> <y> --moored",
            "mine remove <x> <y> --drifting",
        ]
    );
    assert_eq!(&variants[10..], ["-h", "--help", "--version"]);
}

#[test]
fn test_naval_fate_options() {
    let help = compile_help(&fixture("naval_fate.txt")).expect("fixture should compile");
    assert_eq!(help.options.len(), 5);

    let speed = help.find_option("--speed").expect("--speed is documented");
    assert!(speed.has_argument());
    assert_eq!(speed.value.as_deref(), Some("<kn>"));
    assert_eq!(speed.default_value().as_deref(), Some("10"));

    let help_flag = help.find_option("-h").expect("-h is documented");
    assert_eq!(help_flag.names, ["-h", "--help"]);
    assert_eq!(help_flag.description(), "Show this screen.");
    assert!(help_flag.default_value().is_none());
}

#[test]
fn test_variants_are_flat_and_reexpand_to_themselves() {
    let help = compile_help(&fixture("naval_fate.txt")).expect("fixture should compile");
    for variant in help.variants() {
        assert!(variant.is_flat(), "{variant}");
        let again = variant.expand().expect("flat grammar expands");
        assert_eq!(again, [variant.clone()]);
    }
}

#[test]
fn test_deploy_continuation_lines_join_one_variant() {
    let sections = split_sections(&fixture("deploy.txt")).expect("fixture has usage");
    let usage = parse_usage(&sections.usage).expect("usage should parse");
    assert_eq!(usage.binary, "deploy");
    assert_eq!(usage.variants.len(), 3);
    assert_eq!(
        usage.variants[0].to_string(),
        "push <service> [--env=<name>] [--tag=<tag>] [--dry-run]"
    );
    assert_eq!(usage.variants[2].last(), Some(&Token::close(false)));
}

#[test]
fn test_deploy_expansion_counts() {
    let help = compile_help(&fixture("deploy.txt")).expect("fixture should compile");
    let counts: Vec<usize> = help.usages.iter().map(|usage| usage.variants.len()).collect();
    assert_eq!(counts, [8, 2, 4]);

    let last: Vec<String> = help.usages[2].variants.iter().map(ToString::to_string).collect();
    assert_eq!(
        last,
        ["status", "status <service>...", "logs", "logs <service>..."]
    );
}

#[test]
fn test_deploy_options() {
    let help = compile_help(&fixture("deploy.txt")).expect("fixture should compile");
    let names: Vec<&str> = help.options.iter().map(|option| option.canonical_name()).collect();
    assert_eq!(names, ["--env", "--tag", "--dry-run", "--to", "--help"]);

    let env = help.find_option("-e").expect("-e is documented");
    assert_eq!(env.value.as_deref(), Some("NAME"));
    assert_eq!(env.default_value().as_deref(), Some("staging"));

    let to = help.find_option("--to").expect("--to is documented");
    assert!(to.description().starts_with("Revision to roll back to."));
    assert!(to.description().ends_with("Defaults to the previous release."));

    assert!(!help.find_option("--dry-run").expect("documented").has_argument());
}

#[test]
fn test_deploy_variant_limit() {
    let config = CompileConfig {
        limits: ExpandLimits::bounded(4),
    };
    let err = compile_help_with_config(&fixture("deploy.txt"), &config).unwrap_err();
    assert_eq!(
        err,
        Error::Grammar {
            variant: 0,
            source: GrammarError::TooManyVariants { limit: 4 },
        }
    );
}

#[test]
fn test_mismatched_brackets_report_positions() {
    let err = compile_help(&fixture("broken_group.txt")).unwrap_err();
    assert_eq!(
        err,
        Error::Grammar {
            variant: 0,
            source: GrammarError::MismatchedGroup { open: 2, close: 6 },
        }
    );
    assert_eq!(
        err.to_string(),
        "usage variant 0: opened group at position 2 does not match 6"
    );
}

#[test]
fn test_alternation_branches_expand_independently() {
    for (section, expected) in [
        ("prog (ship [--x] | mine)", &["ship", "ship --x", "mine"][..]),
        ("prog ((a|b)|c)", &["a", "b", "c"][..]),
        ("prog [-q] run | stop", &["run", "-q run", "stop"][..]),
    ] {
        let usage = parse_usage(section).expect("usage should parse");
        let variants: Vec<String> = balance_and_expand(&usage.variants[0])
            .expect("usage should expand")
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(variants, expected, "{section}");
    }
}

#[test]
fn test_wrapped_description_starting_with_dash_stays_in_record() {
    let options = parse_options("  --limit=<n>  Max items.\n                -1 means unlimited.")
        .expect("options should parse");
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].names, ["--limit"]);
    assert_eq!(options[0].description(), "Max items.\n-1 means unlimited.");
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture should be readable")
}
