//! Help document compilation example.
//!
//! Demonstrates how to use `compile_help()` to turn a docopt help text into
//! expanded usage variants and option records, and how parse failures are
//! reported.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p docopt-grammar-parser --example compile_help
//! ```

use docopt_grammar_parser::{Error, compile_help};

fn main() {
    let help_text = r#"
Naval Fate.

Usage:
  naval_fate ship new <name>...
  naval_fate ship <name> move <x> <y> [--speed=<kn>]
  naval_fate mine (set|remove) <x> <y> [--moored|--drifting]
  naval_fate -h | --help

Options:
  -h --help     Show this screen.
  --speed=<kn>  Speed in knots [default: 10].
  --moored      Moored (anchored) mine.
  --drifting    Drifting mine.
"#;

    let help = match compile_help(help_text) {
        Ok(help) => help,
        Err(err) => {
            eprintln!("Failed to compile help text: {err}");
            return;
        }
    };

    println!("Binary: {}", help.binary);

    for (index, usage) in help.usages.iter().enumerate() {
        println!("\nUsage line {index}: {}", usage.source);
        for variant in &usage.variants {
            println!("  {} {variant}", help.binary);
        }
    }

    println!("\nOptions ({}):", help.options.len());
    for option in &help.options {
        let value = option.value.as_deref().unwrap_or("");
        let default = option
            .default_value()
            .map(|value| format!(" (default: {value})"))
            .unwrap_or_default();
        println!(
            "  {:<12} {:<6} {}{default}",
            option.names.join(", "),
            value,
            option.description()
        );
    }

    // Malformed input is rejected with a positioned message
    for broken in ["usage: prog (|)", "usage: prog (a]", "-h  Help without usage."] {
        match compile_help(broken) {
            Ok(_) => println!("\nUnexpectedly compiled: {broken}"),
            Err(Error::Parse(failure)) => {
                println!("\n{failure}");
                println!("  column {} ({:?})", failure.column(), failure.kind);
            }
            Err(err) => println!("\n{err}"),
        }
    }

    match serde_json::to_string_pretty(&help.usages[0].variants) {
        Ok(json) => println!("\nFirst usage line as JSON:\n{json}"),
        Err(err) => eprintln!("Failed to serialize variants: {err}"),
    }
}
