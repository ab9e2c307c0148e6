//! Docopt usage and options compiler.
//!
//! This crate turns the human-written sections of a docopt help document
//! into the structural model defined in [`docopt_grammar_core`]:
//!
//! - [`parse_usage`]: a `usage:` section into a [`Usage`] with one unbalanced
//!   [`Grammar`] per invocation line.
//! - [`parse_options`]: an options section into [`OptionSpec`] records.
//! - [`balance_and_expand`]: one grammar into every flat grammar it allows.
//! - [`compile_help`]: all of the above for a complete help document.
//!
//! Parsing is line oriented. Precompiled anchored matchers ([`PATTERNS`]) are
//! tried against the unconsumed tail of each line, and failures carry the
//! line and cursor position ([`ParseFailure`]).
//!
//! # Example
//!
//! ```
//! use docopt_grammar_parser::compile_help;
//!
//! let doc = "\
//! Naval Fate.
//!
//! Usage:
//!   naval_fate ship (move|shoot) <x> <y>
//!   naval_fate mine (set|remove) <x> <y> [--moored|--drifting]
//!
//! Options:
//!   --moored    Moored (anchored) mine.
//!   --drifting  Drifting mine.
//! ";
//!
//! let help = compile_help(doc).unwrap();
//! assert_eq!(help.binary, "naval_fate");
//!
//! let variants: Vec<String> = help.variants().map(ToString::to_string).collect();
//! assert_eq!(variants.len(), 2 + 6);
//! assert_eq!(variants[0], "ship move <x> <y>");
//! assert_eq!(variants[3], "mine set <x> <y> --moored");
//! assert_eq!(help.options.len(), 2);
//! ```

mod compile;
mod error;
mod matcher;
mod options;
mod scanner;
mod sections;
mod usage;

pub use compile::{CompileConfig, CompiledHelp, CompiledUsage, compile_help, compile_help_with_config};
pub use docopt_grammar_core::{
    BranchLink, ExpandLimits, Grammar, GrammarError, GroupBoundary, OptionSpec, Token, Usage,
};
pub use error::{CURSOR_SIGN, Error, ParseFailure, ParseFailureKind, Result};
pub use matcher::{Matcher, PATTERNS, Patterns};
pub use options::parse_options;
pub use sections::{HelpSections, split_sections};
pub use usage::parse_usage;

/// Balances `grammar` and expands it into flat grammars, in source order.
///
/// The input is left untouched; balancing happens on a copy.
///
/// # Errors
///
/// Returns a [`GrammarError`] when the brackets are unbalanced or mismatched.
///
/// # Examples
///
/// ```
/// use docopt_grammar_parser::{balance_and_expand, parse_usage};
///
/// let usage = parse_usage("blah (create|list|destroy)").unwrap();
/// let variants: Vec<String> = balance_and_expand(&usage.variants[0])
///     .unwrap()
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(variants, ["create", "list", "destroy"]);
/// ```
pub fn balance_and_expand(grammar: &Grammar) -> std::result::Result<Vec<Grammar>, GrammarError> {
    grammar.expand()
}
