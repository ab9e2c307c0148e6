//! Anchored pattern matchers.
//!
//! A [`Matcher`] only matches at the very start of its input. Larger matchers
//! are composed by interpolating the unanchored source of smaller ones, so the
//! `option` matcher is `option_name` plus an optional `argument`. All matchers
//! are compiled once into [`PATTERNS`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Regex wrapper that matches only at the start of the text.
#[derive(Debug, Clone)]
pub struct Matcher {
    source: String,
    regex: Regex,
}

impl Matcher {
    /// Compiles `pattern` anchored at the start of the input.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regular expression. Patterns are
    /// static, so a failure is a programming error.
    pub fn new(pattern: &str) -> Self {
        Self {
            source: pattern.to_string(),
            regex: Regex::new(&format!("^(?:{pattern})")).expect("static regex must compile"),
        }
    }

    /// The unanchored pattern, for composing into larger matchers.
    pub fn pattern(&self) -> &str {
        &self.source
    }

    /// Matches at the start of `text`, returning the captures and the
    /// unconsumed remainder.
    pub fn matches<'t>(&self, text: &'t str) -> Option<(Captures<'t>, &'t str)> {
        let captures = self.regex.captures(text)?;
        let consumed = captures.get(0).map_or(0, |m| m.end());
        Some((captures, &text[consumed..]))
    }
}

/// Process-wide matchers shared by every parse.
pub static PATTERNS: LazyLock<Patterns> = LazyLock::new(Patterns::new);

pub struct Patterns {
    // Layout
    pub indent: Matcher,
    pub whitespace: Matcher,
    pub end_of_line: Matcher,

    // Usage elements
    pub binary_name: Matcher,
    pub option_name: Matcher,
    pub argument: Matcher,
    pub option: Matcher,
    pub word: Matcher,
    pub required_group_start: Matcher,
    pub optional_group_start: Matcher,
    pub required_group_end: Matcher,
    pub optional_group_end: Matcher,
    pub branch: Matcher,
    pub repeat: Matcher,

    // Options section
    pub option_separator: Matcher,
    pub description_separator: Matcher,

    // Help document sections
    pub usage_header: Matcher,
}

impl Patterns {
    fn new() -> Self {
        // --long-name or -x; names stop at structural characters and dots
        let option_name = Matcher::new(r"(--[^\s=<|()\[\].,]+|-[^\s=<|()\[\].,-])");
        // <name> or NAME; the word boundary keeps `Another` a plain word
        let argument = Matcher::new(r"(<[^>]+>|[[:upper:]][[:upper:][:digit:]_-]*\b)");
        let option = Matcher::new(&format!(
            "{}(?:[= ]?{})?",
            option_name.pattern(),
            argument.pattern()
        ));

        Self {
            indent: Matcher::new(r"([ \t]*)"),
            whitespace: Matcher::new(r"[ \t]+"),
            end_of_line: Matcher::new(r"[ \t]*$"),

            // `./prog` and `../bin/prog` are names; a bare `...` is not
            binary_name: Matcher::new(r"(?:\.{1,2}/)?[^\s\[\]()|<>.-][^\s\[\]()|<>]*"),
            option_name,
            argument,
            option,
            word: Matcher::new(r"[^\s\[\]()|<.]+(?:\.[^\s\[\]()|<.]+)*"),
            required_group_start: Matcher::new(r"\("),
            optional_group_start: Matcher::new(r"\["),
            required_group_end: Matcher::new(r"\)"),
            optional_group_end: Matcher::new(r"\]"),
            branch: Matcher::new(r"\|"),
            repeat: Matcher::new(r"\.\.\."),

            option_separator: Matcher::new(r", *| "),
            description_separator: Matcher::new(r" {2,}|\t+"),

            usage_header: Matcher::new(r"(?i)[ \t]*usage:[ \t]*"),
        }
    }
}
