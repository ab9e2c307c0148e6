//! End-to-end compilation of a help document.

use docopt_grammar_core::{ExpandLimits, Grammar, GrammarError, OptionSpec};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::options::parse_options;
use crate::sections::split_sections;
use crate::usage::parse_usage;

/// Settings for [`compile_help_with_config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileConfig {
    /// Bound applied to each usage line's expansion.
    pub limits: ExpandLimits,
}

/// One usage line together with its expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledUsage {
    /// The line as parsed, before balancing.
    pub source: Grammar,
    /// Flat grammars the line expands to, in source order.
    pub variants: Vec<Grammar>,
}

/// A fully compiled help document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledHelp {
    pub binary: String,
    pub usages: Vec<CompiledUsage>,
    pub options: Vec<OptionSpec>,
}

impl CompiledHelp {
    /// Iterates every flat variant of every usage line, in order.
    pub fn variants(&self) -> impl Iterator<Item = &Grammar> {
        self.usages.iter().flat_map(|usage| usage.variants.iter())
    }

    /// Finds the option record that has `name` among its aliases.
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.matches(name))
    }
}

/// Compiles a help document with the default (unbounded) configuration.
///
/// # Errors
///
/// See [`compile_help_with_config`].
///
/// # Examples
///
/// ```
/// use docopt_grammar_parser::compile_help;
///
/// let help = compile_help("\
/// Usage: prog (run | test) [--fast]
///
/// Options:
///   --fast  Skip slow checks.
/// ").unwrap();
///
/// let variants: Vec<String> = help.variants().map(ToString::to_string).collect();
/// assert_eq!(variants, ["run", "run --fast", "test", "test --fast"]);
/// assert!(help.find_option("--fast").is_some());
/// ```
pub fn compile_help(doc: &str) -> Result<CompiledHelp> {
    compile_help_with_config(doc, &CompileConfig::default())
}

/// Splits `doc` into sections, parses both, and expands every usage line.
///
/// # Errors
///
/// - [`Error::MissingUsageSection`] when there is no `usage:` header.
/// - [`Error::Parse`] for lexical, emptiness or malformed-option failures.
/// - [`Error::Grammar`] when a usage line has unbalanced brackets or its
///   expansion exceeds `config.limits`.
pub fn compile_help_with_config(doc: &str, config: &CompileConfig) -> Result<CompiledHelp> {
    let sections = split_sections(doc)?;
    let usage = parse_usage(&sections.usage)?;

    let mut usages = Vec::with_capacity(usage.variants.len());
    for (index, source) in usage.variants.into_iter().enumerate() {
        let variants = source
            .expand_with_limits(config.limits)
            .map_err(|err| {
                if let GrammarError::TooManyVariants { limit } = err {
                    warn!(variant = index, limit, "Usage line exceeds variant limit");
                }
                Error::Grammar {
                    variant: index,
                    source: err,
                }
            })?;
        debug!(variant = index, expanded = variants.len(), "Expanded usage line");
        usages.push(CompiledUsage { source, variants });
    }

    let options = match sections.options.as_deref() {
        Some(section) => parse_options(section)?,
        None => Vec::new(),
    };

    let help = CompiledHelp {
        binary: usage.binary,
        usages,
        options,
    };

    debug!(
        binary = %help.binary,
        usages = help.usages.len(),
        variants = help.variants().count(),
        options = help.options.len(),
        "Compiled help document"
    );

    Ok(help)
}
