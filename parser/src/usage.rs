//! Usage section parser.
//!
//! Turns the lines of a `usage:` section into a [`Usage`]: the binary name
//! plus one flat, unbalanced [`Grammar`] per invocation line. A line whose
//! first word repeats the binary name starts a new variant; any other
//! non-blank line continues the current one.
//!
//! Empty groups, empty alternatives and repeat markers with nothing to repeat
//! are rejected while tokenizing. Bracket balance is left to
//! [`Grammar::balance`].

use docopt_grammar_core::{Grammar, Token, Usage};
use tracing::debug;

use crate::error::{ParseFailure, ParseFailureKind};
use crate::matcher::PATTERNS;
use crate::scanner::Scanner;

/// Parses a usage section (the text after `usage:`) into a [`Usage`].
///
/// # Errors
///
/// Returns a [`ParseFailure`] when no binary name can be established, when a
/// position matches no token, or when a group, alternative or repeat is empty.
///
/// # Examples
///
/// ```
/// use docopt_grammar_parser::parse_usage;
///
/// let usage = parse_usage("naval_fate ship new <name>...\nnaval_fate --version").unwrap();
/// assert_eq!(usage.binary, "naval_fate");
/// assert_eq!(usage.variants.len(), 2);
/// assert_eq!(usage.variants[0].to_string(), "ship new <name>...");
/// ```
pub fn parse_usage(section: &str) -> Result<Usage, ParseFailure> {
    let mut scanner = Scanner::new(section);
    let mut binary: Option<&str> = None;
    let mut variants: Vec<Grammar> = Vec::new();
    // Branch bar left at the end of the previous line; fatal unless a
    // continuation line supplies the alternative.
    let mut dangling: Option<ParseFailure> = None;

    while scanner.scan() {
        scanner.accept(&PATTERNS.indent);
        if scanner.accept(&PATTERNS.end_of_line).is_some() {
            continue;
        }

        let first = scanner
            .peek(&PATTERNS.binary_name)
            .and_then(|caps| caps.get(0))
            .map(|m| m.as_str());

        let starts_variant = match (binary, first) {
            (None, Some(name)) => {
                binary = Some(name);
                true
            }
            (None, None) => {
                return Err(scanner.failure(
                    ParseFailureKind::MissingBinaryName,
                    "expected binary name",
                ));
            }
            (Some(known), Some(name)) => known == name,
            (Some(_), None) => false,
        };

        if starts_variant {
            if let Some(failure) = dangling.take() {
                return Err(failure);
            }
            scanner.accept(&PATTERNS.binary_name);
            variants.push(Grammar::new());
        }

        let Some(grammar) = variants.last_mut() else {
            return Err(scanner.failure(
                ParseFailureKind::MissingBinaryName,
                "expected binary name",
            ));
        };

        dangling = parse_line(&mut scanner, grammar, !starts_variant)?;
    }

    if let Some(failure) = dangling {
        return Err(failure);
    }

    let Some(binary) = binary else {
        return Err(scanner.failure(
            ParseFailureKind::MissingBinaryName,
            "expected binary name",
        ));
    };

    debug!(binary = %binary, variants = variants.len(), "Parsed usage section");

    Ok(Usage {
        binary: binary.to_string(),
        variants,
    })
}

/// Tokenizes the rest of the current line into `grammar`.
///
/// Returns the failure to raise if the line ends in a branch bar and no
/// continuation follows.
fn parse_line(
    scanner: &mut Scanner<'_>,
    grammar: &mut Grammar,
    continuation: bool,
) -> Result<Option<ParseFailure>, ParseFailure> {
    let mut spaced = continuation;

    loop {
        if scanner.accept(&PATTERNS.whitespace).is_some() {
            spaced = true;
        }
        if scanner.accept(&PATTERNS.end_of_line).is_some() {
            break;
        }

        let before = scanner.tail();
        let token = next_token(scanner)?;

        if let Some(message) = misplaced(grammar.last(), &token) {
            return Err(scanner.failure_at(before, ParseFailureKind::Emptiness, message));
        }

        if spaced && separates(grammar.last(), &token) {
            grammar.push(Token::Separator);
        }
        grammar.push(token);
        spaced = false;
    }

    Ok(match grammar.last() {
        Some(Token::Branch(_)) => Some(scanner.failure(
            ParseFailureKind::Emptiness,
            "empty alternative not allowed",
        )),
        _ => None,
    })
}

/// Recognizes one token at the head of the tail.
///
/// Options win over positionals, which win over static words.
fn next_token(scanner: &mut Scanner<'_>) -> Result<Token, ParseFailure> {
    if scanner.accept(&PATTERNS.required_group_start).is_some() {
        return Ok(Token::open(true));
    }
    if scanner.accept(&PATTERNS.optional_group_start).is_some() {
        return Ok(Token::open(false));
    }
    if scanner.accept(&PATTERNS.required_group_end).is_some() {
        return Ok(Token::close(true));
    }
    if scanner.accept(&PATTERNS.optional_group_end).is_some() {
        return Ok(Token::close(false));
    }
    if scanner.accept(&PATTERNS.branch).is_some() {
        return Ok(Token::branch());
    }
    if scanner.accept(&PATTERNS.repeat).is_some() {
        return Ok(Token::Repeat);
    }
    if let Some(caps) = scanner.accept(&PATTERNS.option) {
        return Ok(Token::Option {
            name: caps[1].to_string(),
            value: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }
    if let Some(caps) = scanner.accept(&PATTERNS.argument) {
        return Ok(Token::positional(&caps[1]));
    }
    if let Some(caps) = scanner.accept(&PATTERNS.word) {
        return Ok(Token::word(&caps[0]));
    }

    Err(scanner.failure(
        ParseFailureKind::Lexical,
        "expected option, argument, one of the structural symbols, or none found",
    ))
}

/// Emptiness violation caused by placing `next` right after `previous`.
fn misplaced(previous: Option<&Token>, next: &Token) -> Option<&'static str> {
    let after_open = matches!(previous, Some(Token::Group(g)) if g.opened);
    let after_branch = matches!(previous, Some(Token::Branch(_)));

    match next {
        Token::Group(g) if !g.opened && after_open => Some("empty groups not allowed"),
        Token::Group(g) if !g.opened && after_branch => Some("empty alternative not allowed"),
        Token::Branch(_) if previous.is_none() || after_open || after_branch => {
            Some("empty alternative not allowed")
        }
        Token::Repeat
            if previous.is_none()
                || after_open
                || after_branch
                || matches!(previous, Some(Token::Repeat)) =>
        {
            Some("nothing to repeat")
        }
        _ => None,
    }
}

/// Whether whitespace between `previous` and `next` is significant.
///
/// Separators sit between elements only: never inside a bracket edge and
/// never around a branch bar or before a repeat marker.
fn separates(previous: Option<&Token>, next: &Token) -> bool {
    let ends_element = match previous {
        Some(Token::Group(g)) => !g.opened,
        Some(Token::Branch(_)) | Some(Token::Separator) | None => false,
        Some(_) => true,
    };
    let starts_element = match next {
        Token::Group(g) => g.opened,
        Token::Branch(_) | Token::Repeat | Token::Separator => false,
        _ => true,
    };
    ends_element && starts_element
}
