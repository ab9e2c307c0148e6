//! Grammar balancing.
//!
//! Validates the bracket structure of a flat grammar and links every group
//! half to its partner and every alternation bar to its chain. Balancing is a
//! single left-to-right pass with a stack of pending group openings.
//!
//! # Examples
//!
//! ```
//! use docopt_grammar_core::*;
//!
//! let mut grammar = Grammar::from(vec![
//!     Token::open(true),
//!     Token::word("run"),
//!     Token::branch(),
//!     Token::word("test"),
//!     Token::close(true),
//! ]);
//! grammar.balance().unwrap();
//!
//! assert!(matches!(grammar[0], Token::Group(GroupBoundary { pair: Some(4), .. })));
//! assert!(matches!(grammar[2], Token::Branch(BranchLink { start: Some(0), next: Some(4) })));
//!
//! // A closing bracket of the wrong kind is rejected
//! let mut bad = Grammar::from(vec![Token::open(true), Token::word("x"), Token::close(false)]);
//! assert_eq!(
//!     bad.balance(),
//!     Err(GrammarError::MismatchedGroup { open: 0, close: 2 })
//! );
//! ```

use thiserror::Error;

use crate::{Grammar, Token};

/// Structural errors found while balancing or expanding a grammar.
///
/// Positions are token indices within the grammar being balanced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A closing bracket appeared with no group open.
    #[error("unbalanced group end at position {position}")]
    UnbalancedGroupEnd { position: usize },
    /// `(` closed by `]` or `[` closed by `)`.
    #[error("opened group at position {open} does not match {close}")]
    MismatchedGroup { open: usize, close: usize },
    /// Input ended with groups still open.
    #[error("one or more required or optional groups is not closed")]
    UnclosedGroup,
    /// Expansion produced more variants than the configured limit.
    #[error("expansion exceeds the limit of {limit} variants")]
    TooManyVariants { limit: usize },
}

impl Grammar {
    /// Links group pairs and branch chains in place.
    ///
    /// Running it again on a balanced grammar is a no-op.
    pub fn balance(&mut self) -> Result<(), GrammarError> {
        let tokens = self.tokens_mut();
        let mut open_groups: Vec<usize> = Vec::new();
        // Last bar seen per nesting level; slot 0 is the top level.
        let mut chains: Vec<Option<usize>> = vec![None];

        for index in 0..tokens.len() {
            match &tokens[index] {
                Token::Group(group) if group.opened => {
                    open_groups.push(index);
                    chains.push(None);
                }
                Token::Group(group) => {
                    let required = group.required;
                    let Some(open) = open_groups.pop() else {
                        return Err(GrammarError::UnbalancedGroupEnd { position: index });
                    };
                    if let Token::Group(start) = &mut tokens[open] {
                        if start.required != required {
                            return Err(GrammarError::MismatchedGroup { open, close: index });
                        }
                        start.pair = Some(index);
                    }
                    if let Token::Group(end) = &mut tokens[index] {
                        end.pair = Some(open);
                    }
                    if let Some(Some(last)) = chains.pop() {
                        link_next(tokens, last, index);
                    }
                }
                Token::Branch(_) => {
                    let start = open_groups.last().copied();
                    let previous = chains.last_mut().and_then(|slot| slot.replace(index));
                    if let Some(previous) = previous {
                        link_next(tokens, previous, index);
                    }
                    if let Token::Branch(link) = &mut tokens[index] {
                        link.start = start;
                        link.next = None;
                    }
                }
                _ => {}
            }
        }

        if !open_groups.is_empty() {
            return Err(GrammarError::UnclosedGroup);
        }

        Ok(())
    }
}

fn link_next(tokens: &mut [Token], branch: usize, next: usize) {
    if let Token::Branch(link) = &mut tokens[branch] {
        link.next = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BranchLink, GroupBoundary};

    fn group_at(grammar: &Grammar, index: usize) -> GroupBoundary {
        match &grammar[index] {
            Token::Group(group) => *group,
            other => panic!("expected group at {index}, found {other:?}"),
        }
    }

    fn branch_at(grammar: &Grammar, index: usize) -> BranchLink {
        match &grammar[index] {
            Token::Branch(link) => *link,
            other => panic!("expected branch at {index}, found {other:?}"),
        }
    }

    #[test]
    fn test_balance_matches_group_pairs() {
        let mut grammar = Grammar::from(vec![
            Token::word("report"),
            Token::open(false),
            Token::word("verbose"),
            Token::close(false),
        ]);
        grammar.balance().unwrap();

        assert_eq!(group_at(&grammar, 1).pair, Some(3));
        assert_eq!(group_at(&grammar, 3).pair, Some(1));
    }

    #[test]
    fn test_balance_pairs_are_symmetric_for_nested_groups() {
        let mut grammar = Grammar::from(vec![
            Token::open(true),
            Token::open(false),
            Token::word("a"),
            Token::close(false),
            Token::open(false),
            Token::open(true),
            Token::word("b"),
            Token::close(true),
            Token::close(false),
            Token::close(true),
        ]);
        grammar.balance().unwrap();

        for (index, token) in grammar.iter().enumerate() {
            if let Token::Group(group) = token {
                let pair = group.pair.expect("balanced group must have a pair");
                let partner = group_at(&grammar, pair);
                assert_eq!(partner.pair, Some(index));
                assert_eq!(partner.required, group.required);
                assert_ne!(partner.opened, group.opened);
            }
        }
    }

    #[test]
    fn test_balance_threads_branch_chain_to_group_close() {
        let mut grammar = Grammar::from(vec![
            Token::word("x"),
            Token::open(true),
            Token::word("create"),
            Token::branch(),
            Token::word("list"),
            Token::branch(),
            Token::word("destroy"),
            Token::close(true),
        ]);
        grammar.balance().unwrap();

        assert_eq!(
            branch_at(&grammar, 3),
            BranchLink {
                start: Some(1),
                next: Some(5)
            }
        );
        assert_eq!(
            branch_at(&grammar, 5),
            BranchLink {
                start: Some(1),
                next: Some(7)
            }
        );
    }

    #[test]
    fn test_balance_top_level_branch_ends_at_sequence_end() {
        let mut grammar = Grammar::from(vec![
            Token::option("-h"),
            Token::branch(),
            Token::open(false),
            Token::word("a"),
            Token::branch(),
            Token::word("b"),
            Token::close(false),
            Token::branch(),
            Token::option("--help"),
        ]);
        grammar.balance().unwrap();

        assert_eq!(
            branch_at(&grammar, 1),
            BranchLink {
                start: None,
                next: Some(7)
            }
        );
        assert_eq!(
            branch_at(&grammar, 4),
            BranchLink {
                start: Some(2),
                next: Some(6)
            }
        );
        assert_eq!(branch_at(&grammar, 7), BranchLink::default());
    }

    #[test]
    fn test_balance_is_idempotent() {
        let mut grammar = Grammar::from(vec![
            Token::open(true),
            Token::word("a"),
            Token::branch(),
            Token::word("b"),
            Token::close(true),
        ]);
        grammar.balance().unwrap();
        let once = grammar.clone();
        grammar.balance().unwrap();
        assert_eq!(grammar, once);
    }

    #[test]
    fn test_balance_rejects_unbalanced_group_end() {
        let mut grammar = Grammar::from(vec![Token::word("a"), Token::close(true)]);
        assert_eq!(
            grammar.balance(),
            Err(GrammarError::UnbalancedGroupEnd { position: 1 })
        );
    }

    #[test]
    fn test_balance_rejects_unclosed_group() {
        let mut grammar = Grammar::from(vec![Token::open(false), Token::word("a")]);
        let err = grammar.balance().unwrap_err();
        assert_eq!(err, GrammarError::UnclosedGroup);
        assert_eq!(
            err.to_string(),
            "one or more required or optional groups is not closed"
        );
    }

    #[test]
    fn test_balance_reports_mismatch_positions() {
        let mut grammar = Grammar::from(vec![
            Token::word("a"),
            Token::open(false),
            Token::word("b"),
            Token::close(true),
        ]);
        let err = grammar.balance().unwrap_err();
        assert_eq!(err.to_string(), "opened group at position 1 does not match 3");
    }
}
