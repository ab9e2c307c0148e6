//! Grammar expansion.
//!
//! Enumerates every concrete token sequence a balanced grammar allows. Each
//! optional group is independently included or excluded, and each alternation
//! independently selects one branch. Work items are slot vectors where removed
//! tokens become `None`, so the indices recorded during balancing stay valid
//! until a fully resolved item is compacted.
//!
//! # Examples
//!
//! ```
//! use docopt_grammar_core::*;
//!
//! // report [verbose]
//! let grammar = Grammar::from(vec![
//!     Token::word("report"),
//!     Token::Separator,
//!     Token::open(false),
//!     Token::word("verbose"),
//!     Token::close(false),
//! ]);
//!
//! let variants: Vec<String> = grammar
//!     .expand()
//!     .unwrap()
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(variants, ["report", "report verbose"]);
//! ```

use crate::{BranchLink, Grammar, GrammarError, GroupBoundary, Token};

/// Upper bound on the number of variants an expansion may produce.
///
/// Expansion is exponential in the number of independent decision points, so
/// callers compiling untrusted patterns should set a bound.
///
/// # Examples
///
/// ```
/// use docopt_grammar_core::ExpandLimits;
///
/// assert_eq!(ExpandLimits::default().max_variants, None);
/// assert_eq!(ExpandLimits::bounded(64).max_variants, Some(64));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandLimits {
    pub max_variants: Option<usize>,
}

impl ExpandLimits {
    pub fn bounded(max_variants: usize) -> Self {
        Self {
            max_variants: Some(max_variants),
        }
    }
}

type Slots = Vec<Option<Token>>;

/// First unresolved structural token of a work item.
enum Decision {
    Group(usize, GroupBoundary),
    Branch(usize, BranchLink),
}

impl Grammar {
    /// Balances a copy of this grammar and expands it into flat grammars.
    ///
    /// Variants come out in source order: for an optional group the variant
    /// without it precedes the one with it, alternation branches keep their
    /// left-to-right order, and outer decisions vary slowest.
    pub fn expand(&self) -> Result<Vec<Grammar>, GrammarError> {
        self.expand_with_limits(ExpandLimits::default())
    }

    /// Like [`expand`](Self::expand), failing with
    /// [`GrammarError::TooManyVariants`] once the limit would be exceeded.
    pub fn expand_with_limits(&self, limits: ExpandLimits) -> Result<Vec<Grammar>, GrammarError> {
        let mut balanced = self.clone();
        balanced.balance()?;

        let mut stack: Vec<Slots> = vec![balanced.into_tokens().into_iter().map(Some).collect()];
        let mut variants = Vec::new();

        while let Some(slots) = stack.pop() {
            // A top-level alternation spans everything, so it is decided first.
            if let Some((bar, link)) = chain_head(&slots, None) {
                stack.extend(alternatives(&slots, bar, link));
                continue;
            }

            let decision = slots.iter().enumerate().find_map(|(index, slot)| match slot {
                Some(Token::Group(group)) => Some(Decision::Group(index, *group)),
                Some(Token::Branch(link)) => Some(Decision::Branch(index, *link)),
                _ => None,
            });

            match decision {
                None => {
                    if let Some(limit) = limits.max_variants.filter(|&limit| variants.len() >= limit) {
                        return Err(GrammarError::TooManyVariants { limit });
                    }
                    variants.push(compact(slots));
                }
                Some(Decision::Group(index, group)) => {
                    let pair = group.pair.ok_or(GrammarError::UnclosedGroup)?;
                    let (open, close) = (index.min(pair), index.max(pair));
                    if !group.required {
                        let mut end = close;
                        if matches!(slots.get(close + 1), Some(Some(Token::Repeat))) {
                            end += 1;
                        }
                        stack.push(cut(&slots, open, end));
                    }
                    // A group holding bars is itself the alternation point.
                    match chain_head(&slots, Some(open)) {
                        Some((bar, link)) => stack.extend(alternatives(&slots, bar, link)),
                        None => {
                            let mut kept = cut(&slots, open, open);
                            kept[close] = None;
                            stack.push(kept);
                        }
                    }
                }
                Some(Decision::Branch(index, link)) => {
                    stack.extend(alternatives(&slots, index, link));
                }
            }
        }

        // Items finish in reverse of the order they were pushed.
        variants.reverse();
        Ok(variants)
    }
}

/// First remaining bar of the chain opened at `start` (`None` for top level).
fn chain_head(slots: &Slots, start: Option<usize>) -> Option<(usize, BranchLink)> {
    slots.iter().enumerate().find_map(|(index, slot)| match slot {
        Some(Token::Branch(link)) if link.start == start => Some((index, *link)),
        _ => None,
    })
}

/// Builds one work item per branch of the chain starting at `first`,
/// dropping the enclosing group's boundaries from each.
fn alternatives(slots: &Slots, first: usize, link: BranchLink) -> Vec<Slots> {
    let mut bars = vec![first];
    let mut terminal = link.next;
    while let Some(index) = terminal {
        match &slots[index] {
            Some(Token::Branch(link)) => {
                bars.push(index);
                terminal = link.next;
            }
            _ => break,
        }
    }

    let head = link.start.unwrap_or(0);
    let tail = terminal.unwrap_or(slots.len() - 1);

    (0..=bars.len())
        .map(|choice| {
            let mut item = slots.clone();
            if let Some(open) = link.start {
                item[open] = None;
            }
            if choice > 0 {
                clear(&mut item, head, bars[choice - 1]);
            }
            match bars.get(choice) {
                Some(&bar) => clear(&mut item, bar, tail),
                None => {
                    if let Some(close) = terminal {
                        item[close] = None;
                    }
                }
            }
            item
        })
        .collect()
}

fn cut(slots: &Slots, begin: usize, end: usize) -> Slots {
    let mut item = slots.clone();
    clear(&mut item, begin, end);
    item
}

fn clear(slots: &mut Slots, begin: usize, end: usize) {
    for slot in &mut slots[begin..=end] {
        *slot = None;
    }
}

/// Drops removed slots and collapses separators left adjacent or dangling.
fn compact(slots: Slots) -> Grammar {
    let mut tokens: Vec<Token> = Vec::with_capacity(slots.len());
    for token in slots.into_iter().flatten() {
        if token.is_separator() && tokens.last().is_none_or(Token::is_separator) {
            continue;
        }
        tokens.push(token);
    }
    if tokens.last().is_some_and(Token::is_separator) {
        tokens.pop();
    }
    Grammar::from(tokens)
}
