//! Core grammar types for docopt usage patterns.
//!
//! This crate defines the structural model a usage section compiles into:
//!
//! - [`Token`]: the closed set of lexical/structural units of a usage line
//!   (separator, static word, option, positional, group half, branch bar,
//!   repeat marker).
//! - [`Grammar`]: a flat, ordered token sequence. Group and branch tokens
//!   carry indices into the same sequence instead of forming a tree.
//! - [`Usage`]: the binary name plus one grammar per invocation line.
//! - [`OptionSpec`]: one option record from the options section.
//!
//! Balancing ([`Grammar::balance`]) validates bracket structure and links
//! pairs and branch chains. Expansion ([`Grammar::expand`]) enumerates every
//! concrete flat grammar a pattern allows, optionally bounded by
//! [`ExpandLimits`].
//!
//! # Example
//!
//! ```
//! use docopt_grammar_core::*;
//!
//! // naval_fate mine (set|remove) <x>
//! let grammar = Grammar::from(vec![
//!     Token::word("mine"),
//!     Token::Separator,
//!     Token::open(true),
//!     Token::word("set"),
//!     Token::branch(),
//!     Token::word("remove"),
//!     Token::close(true),
//!     Token::Separator,
//!     Token::positional("<x>"),
//! ]);
//!
//! let variants = grammar.expand().unwrap();
//! assert_eq!(variants.len(), 2);
//! assert_eq!(variants[0].to_string(), "mine set <x>");
//! assert_eq!(variants[1].to_string(), "mine remove <x>");
//! assert!(variants.iter().all(Grammar::is_flat));
//! ```

mod expand;
mod types;
mod validate;

pub use expand::ExpandLimits;
pub use types::*;
pub use validate::GrammarError;
