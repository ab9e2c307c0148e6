//! Line scanner feeding matchers.
//!
//! Holds the current line and a shrinking tail. Matchers run against the
//! tail; a successful match consumes text, a failed one leaves the tail
//! untouched so callers can try alternatives in any order.

use std::str::Lines;

use regex::Captures;

use crate::error::{ParseFailure, ParseFailureKind};
use crate::matcher::Matcher;

pub(crate) struct Scanner<'a> {
    lines: Lines<'a>,
    line: &'a str,
    tail: &'a str,
    line_number: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            line: "",
            tail: "",
            line_number: 0,
        }
    }

    /// Advances to the next line, returning `false` at end of input.
    pub(crate) fn scan(&mut self) -> bool {
        match self.lines.next() {
            Some(line) => {
                self.line = line;
                self.tail = line;
                self.line_number += 1;
                true
            }
            None => false,
        }
    }

    pub(crate) fn tail(&self) -> &'a str {
        self.tail
    }

    pub(crate) fn line_number(&self) -> usize {
        self.line_number
    }

    /// Byte offset of the tail within the current line.
    pub(crate) fn column(&self) -> usize {
        self.line.len() - self.tail.len()
    }

    /// Applies `matcher` to the tail, consuming the match on success.
    pub(crate) fn accept(&mut self, matcher: &Matcher) -> Option<Captures<'a>> {
        let (captures, rest) = matcher.matches(self.tail)?;
        self.tail = rest;
        Some(captures)
    }

    /// Applies `matcher` to the tail without consuming anything.
    pub(crate) fn peek(&self, matcher: &Matcher) -> Option<Captures<'a>> {
        matcher.matches(self.tail).map(|(captures, _)| captures)
    }

    /// Snapshots the current position as a failure.
    pub(crate) fn failure(&self, kind: ParseFailureKind, message: impl Into<String>) -> ParseFailure {
        self.failure_at(self.tail, kind, message)
    }

    /// Like [`failure`](Self::failure), positioned at an earlier `tail` of the
    /// current line.
    pub(crate) fn failure_at(
        &self,
        tail: &str,
        kind: ParseFailureKind,
        message: impl Into<String>,
    ) -> ParseFailure {
        ParseFailure {
            kind,
            message: message.into(),
            line: self.line.to_string(),
            tail: tail.to_string(),
            line_number: self.line_number,
        }
    }
}
