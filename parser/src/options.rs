//! Options section parser.
//!
//! Each line that starts with one or more option names opens a new
//! [`OptionSpec`]. Names are separated by a comma or a single space; two or
//! more spaces (or a tab) start the description. Lines without option names
//! continue the description of the most recent record.

use docopt_grammar_core::OptionSpec;
use tracing::debug;

use crate::error::{ParseFailure, ParseFailureKind};
use crate::matcher::PATTERNS;
use crate::scanner::Scanner;

/// Parses an options section into option records, in source order.
///
/// Text before the first option definition (such as an `Options:` header)
/// is ignored.
///
/// # Errors
///
/// Returns a [`ParseFailure`] of kind [`ParseFailureKind::MalformedOption`]
/// when an option name is followed by neither an alias, a description
/// separator, nor the end of the line.
///
/// # Examples
///
/// ```
/// use docopt_grammar_parser::parse_options;
///
/// let options = parse_options("\
///   -s KN, --speed=KN  Speed in knots
///                      [default: 10].
/// ").unwrap();
///
/// assert_eq!(options.len(), 1);
/// assert_eq!(options[0].names, ["-s", "--speed"]);
/// assert_eq!(options[0].value.as_deref(), Some("KN"));
/// assert_eq!(options[0].default_value().as_deref(), Some("10"));
/// ```
pub fn parse_options(section: &str) -> Result<Vec<OptionSpec>, ParseFailure> {
    let mut scanner = Scanner::new(section);
    let mut options: Vec<OptionSpec> = Vec::new();
    // Column where the latest record's inline description starts.
    let mut description_column: Option<usize> = None;

    while scanner.scan() {
        let level = scanner
            .accept(&PATTERNS.indent)
            .and_then(|caps| caps.get(1))
            .map_or(0, |m| m.len());

        // Text aligned with the description is wrapped prose, even `-1 ...`.
        let wrapped = description_column.is_some_and(|column| level >= column);
        let mut opened = false;

        while let Some(caps) = (!wrapped)
            .then(|| scanner.accept(&PATTERNS.option))
            .flatten()
        {
            if !opened {
                options.push(OptionSpec::new(level, scanner.line_number()));
                description_column = None;
                opened = true;
            }

            let Some(option) = options.last_mut() else {
                break;
            };
            option.names.push(caps[1].to_string());
            if let Some(value) = caps.get(2) {
                option.value = Some(value.as_str().to_string());
            }

            if scanner.accept(&PATTERNS.description_separator).is_some() {
                description_column = Some(scanner.column());
                break;
            }
            if scanner.accept(&PATTERNS.end_of_line).is_some() {
                break;
            }

            if scanner.accept(&PATTERNS.option_separator).is_none() {
                return Err(scanner.failure(
                    ParseFailureKind::MalformedOption,
                    "expected two or more spaces or option definition, but none found",
                ));
            }
        }

        // Lines without option names continue the latest record.
        if let Some(option) = options.last_mut() {
            option.description.push(scanner.tail().trim_end().to_string());
        }
    }

    debug!(options = options.len(), "Parsed options section");

    Ok(options)
}
