//! Help-text section splitting.
//!
//! Locates the `usage:` block and the options block inside a full help
//! document so each can be handed to its parser.

use tracing::debug;

use crate::error::{Error, Result};
use crate::matcher::PATTERNS;

/// The raw sections of a help document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpSections {
    /// Text after the `usage:` header up to the first blank line.
    pub usage: String,
    /// Option definitions following the usage block, if any.
    pub options: Option<String>,
}

/// Splits a help document into its usage and options sections.
///
/// The usage section is whatever follows the case-insensitive `usage:`
/// header on its line, plus the following lines up to the first blank one.
/// The options section starts at the first later line whose first word is an
/// option name, and runs until a non-blank line at column 0 that does not
/// start with one. Blank lines inside it are kept.
///
/// # Errors
///
/// Returns [`Error::MissingUsageSection`] when the document has no `usage:`
/// header.
///
/// # Examples
///
/// ```
/// use docopt_grammar_parser::split_sections;
///
/// let sections = split_sections("\
/// Usage: prog [-q] <file>
///
/// Options:
///   -q  Quiet.
/// ").unwrap();
///
/// assert_eq!(sections.usage, "prog [-q] <file>");
/// assert_eq!(sections.options.as_deref(), Some("  -q  Quiet."));
/// ```
pub fn split_sections(doc: &str) -> Result<HelpSections> {
    let mut lines = doc.lines();

    let header_rest = lines
        .by_ref()
        .find_map(|line| PATTERNS.usage_header.matches(line).map(|(_, rest)| rest))
        .ok_or(Error::MissingUsageSection)?;

    let mut usage = vec![header_rest];
    for line in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }
        usage.push(line);
    }

    let mut options: Vec<&str> = Vec::new();
    for line in lines {
        let trimmed = line.trim_start();
        let defines_option = PATTERNS.option_name.matches(trimmed).is_some();

        if options.is_empty() {
            if defines_option {
                options.push(line);
            }
            continue;
        }

        let unindented = !trimmed.is_empty() && trimmed.len() == line.len();
        if unindented && !defines_option {
            break;
        }
        options.push(line);
    }

    // Trailing blank lines belong to no section.
    while options.last().is_some_and(|line| line.trim().is_empty()) {
        options.pop();
    }

    debug!(
        usage_lines = usage.len(),
        options_lines = options.len(),
        "Split help sections"
    );

    Ok(HelpSections {
        usage: usage.join("\n").trim().to_string(),
        options: (!options.is_empty()).then(|| options.join("\n")),
    })
}
