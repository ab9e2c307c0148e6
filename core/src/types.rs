//! Grammar type definitions for usage pattern modeling.
//!
//! This module defines the data model produced by the usage and options
//! parsers. The recursive bracket/alternation structure of a usage pattern is
//! kept as a flat [`Grammar`] of [`Token`]s whose group and branch tokens carry
//! explicit indices into the same sequence. The types are designed for
//! serialization with [`serde`] so compiled grammars can be cached as JSON.

use std::fmt;
use std::ops::Index;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\[default:\s*([^\]]+)\]").expect("static regex must compile"));

/// One half of a bracketed region: `(`/`)` when required, `[`/`]` otherwise.
///
/// `pair` is `None` until [`Grammar::balance`] links it to the index of the
/// matching half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBoundary {
    pub opened: bool,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<usize>,
}

/// An alternation bar (`|`).
///
/// After balancing, `start` is the index of the enclosing group's opening
/// half (`None` for a top-level alternation, meaning the sequence start) and
/// `next` is the index of the next bar of the same chain, or the enclosing
/// group's closing half for the last bar (`None` at top level, meaning the
/// sequence end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BranchLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<usize>,
}

/// Lexical and structural unit of a usage line.
///
/// # Examples
///
/// ```
/// use docopt_grammar_core::Token;
///
/// assert_eq!(Token::option_with_value("--speed", "<kn>").to_string(), "--speed=<kn>");
/// assert_eq!(Token::open(false).to_string(), "[");
/// assert!(Token::branch().is_structural());
/// assert!(!Token::word("ship").is_structural());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// Mandatory whitespace boundary between two adjacent elements.
    Separator,
    /// Literal word typed verbatim.
    StaticWord { name: String },
    /// Flag reference; `value` is set when the usage line inlines a value.
    Option {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    /// Value slot written as `<name>` or `NAME`.
    PositionalArgument { placeholder: String },
    Group(GroupBoundary),
    Branch(BranchLink),
    /// Trailing `...` on the preceding element.
    Repeat,
}

impl Token {
    pub fn word(name: impl Into<String>) -> Self {
        Self::StaticWord { name: name.into() }
    }

    pub fn option(name: impl Into<String>) -> Self {
        Self::Option {
            name: name.into(),
            value: None,
        }
    }

    pub fn option_with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Option {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn positional(placeholder: impl Into<String>) -> Self {
        Self::PositionalArgument {
            placeholder: placeholder.into(),
        }
    }

    /// Opening half of an unlinked group.
    pub fn open(required: bool) -> Self {
        Self::Group(GroupBoundary {
            opened: true,
            required,
            pair: None,
        })
    }

    /// Closing half of an unlinked group.
    pub fn close(required: bool) -> Self {
        Self::Group(GroupBoundary {
            opened: false,
            required,
            pair: None,
        })
    }

    /// Unlinked alternation bar.
    pub fn branch() -> Self {
        Self::Branch(BranchLink::default())
    }

    /// Returns `true` for group and branch tokens, the ones expansion removes.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Group(_) | Self::Branch(_))
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Separator => f.write_str(" "),
            Self::StaticWord { name } => f.write_str(name),
            Self::Option { name, value: None } => f.write_str(name),
            Self::Option {
                name,
                value: Some(value),
            } => write!(f, "{name}={value}"),
            Self::PositionalArgument { placeholder } => f.write_str(placeholder),
            Self::Group(group) => f.write_str(match (group.opened, group.required) {
                (true, true) => "(",
                (false, true) => ")",
                (true, false) => "[",
                (false, false) => "]",
            }),
            Self::Branch(_) => f.write_str("|"),
            Self::Repeat => f.write_str("..."),
        }
    }
}

/// Ordered token sequence describing one invocation form.
///
/// Before expansion a grammar may hold [`Token::Group`] and [`Token::Branch`]
/// tokens; every grammar returned by [`Grammar::expand`] is flat.
///
/// # Examples
///
/// ```
/// use docopt_grammar_core::{Grammar, Token};
///
/// let grammar = Grammar::from(vec![
///     Token::word("ship"),
///     Token::Separator,
///     Token::positional("<name>"),
///     Token::Repeat,
/// ]);
/// assert!(grammar.is_flat());
/// assert_eq!(grammar.to_string(), "ship <name>...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grammar {
    tokens: Vec<Token>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Returns `true` when no group or branch token remains.
    pub fn is_flat(&self) -> bool {
        !self.tokens.iter().any(Token::is_structural)
    }
}

impl From<Vec<Token>> for Grammar {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<Token> for Grammar {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl Extend<Token> for Grammar {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Grammar {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl Index<usize> for Grammar {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// A parsed usage section: the binary name plus one grammar per invocation
/// line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Usage {
    /// First word of the first invocation line (e.g. `naval_fate`).
    pub binary: String,
    /// One grammar per line that starts with the binary name.
    pub variants: Vec<Grammar>,
}

impl Usage {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            variants: Vec::new(),
        }
    }
}

/// Structural description of one option from the options section.
///
/// Aliases written on one line (`-h, --help`) share a record. The raw
/// description fragments are kept as written; [`description`](Self::description)
/// joins them on demand.
///
/// # Examples
///
/// ```
/// use docopt_grammar_core::OptionSpec;
///
/// let mut option = OptionSpec::new(2, 1);
/// option.names = vec!["-s".into(), "--speed".into()];
/// option.value = Some("<kn>".into());
/// option.description = vec!["Speed in knots".into(), "[default: 10].".into()];
///
/// assert!(option.has_argument());
/// assert_eq!(option.canonical_name(), "--speed");
/// assert_eq!(option.description(), "Speed in knots\n[default: 10].");
/// assert_eq!(option.default_value().as_deref(), Some("10"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Aliased names in source order (e.g. `-h`, `--help`).
    pub names: Vec<String>,
    /// Value placeholder (`<file>`, `FILE`) when the option takes an argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Indentation width of the defining line.
    pub level: usize,
    /// Raw description fragments, one per source line.
    pub description: Vec<String>,
    /// 1-based line inside the options section where the record started.
    pub line_number: usize,
}

impl OptionSpec {
    pub fn new(level: usize, line_number: usize) -> Self {
        Self {
            level,
            line_number,
            ..Self::default()
        }
    }

    pub fn has_argument(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` if `name` is one of this option's aliases.
    pub fn matches(&self, name: &str) -> bool {
        self.names.iter().any(|alias| alias == name)
    }

    /// Returns the first long name, falling back to the first name.
    pub fn canonical_name(&self) -> &str {
        self.names
            .iter()
            .find(|name| name.starts_with("--"))
            .or(self.names.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Joins the description fragments into one string.
    ///
    /// Fragments are joined with a single space, except that an empty
    /// fragment or one starting with a non-word character begins a new line.
    pub fn description(&self) -> String {
        let mut out = String::new();
        for fragment in &self.description {
            if out.is_empty() {
                out.push_str(fragment);
                continue;
            }
            let paragraph = fragment
                .chars()
                .next()
                .is_none_or(|ch| !(ch.is_alphanumeric() || ch == '_'));
            out.push(if paragraph { '\n' } else { ' ' });
            out.push_str(fragment);
        }
        out.trim().to_string()
    }

    /// Extracts the value of the last `[default: X]` annotation.
    pub fn default_value(&self) -> Option<String> {
        let description = self.description();
        let captures = DEFAULT_RE.captures_iter(&description).last()?;
        let value = captures.get(1)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}
