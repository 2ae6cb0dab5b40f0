// Copyright 2025 the Itinerary Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Route pattern compiler.
//!
//! A pattern is literal text with three kinds of placeholders:
//!
//! - `:name` captures one or more characters of a single path segment (no `/`).
//! - `*name` captures the remainder greedily, slashes included; it may be empty.
//! - `( ... )` makes the enclosed text optional. Groups may nest.
//!
//! `:` or `*` not followed by a name character (`[A-Za-z0-9_]`) is literal, as is
//! every other character. A pattern always matches the whole path.
//!
//! Patterns compile once into a small backtracking program. Matching records
//! which `(instruction, offset)` pairs were already explored, so a lookup is
//! bounded by `program length × path length` however the pattern is written.
//!
//! ```rust
//! use itinerary::RoutePattern;
//!
//! let pattern = RoutePattern::parse("docs/:section(/*rest)").unwrap();
//! assert_eq!(pattern.param_names(), ["section", "rest"]);
//!
//! let params = pattern.captures("docs/guide/a/b").unwrap();
//! assert_eq!(params, [Some("guide".to_owned()), Some("a/b".to_owned())]);
//!
//! let params = pattern.captures("docs/guide").unwrap();
//! assert_eq!(params, [Some("guide".to_owned()), None]);
//!
//! assert!(pattern.captures("docs").is_none());
//! ```

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::PatternError;

/// Captured parameter values, one per placeholder in left-to-right order.
///
/// A placeholder inside an optional group that did not take part in the match
/// is `None`. A splat that matched nothing is `Some("")`.
pub type Params = Vec<Option<String>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Inst {
    /// Consume exactly this character.
    Literal(char),
    /// Consume one character other than `/`.
    Segment,
    /// Consume any one character.
    Any,
    /// Record the current offset in a capture slot.
    Save(usize),
    /// Try the first target, then the second.
    Split(usize, usize),
    Jump(usize),
    /// Succeed if the whole path was consumed.
    Match,
}

enum Frame {
    Step { pc: usize, at: usize },
    Restore { slot: usize, value: Option<usize> },
}

/// A compiled route pattern.
#[derive(Clone)]
pub struct RoutePattern {
    source: String,
    names: Vec<String>,
    program: Vec<Inst>,
}

impl RoutePattern {
    /// Compiles `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the optional-group parentheses are
    /// unbalanced.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let mut program = Vec::new();
        let mut names = Vec::new();
        // (split instruction, byte offset of the `(`)
        let mut groups: Vec<(usize, usize)> = Vec::new();
        let mut chars = source.char_indices().peekable();

        while let Some((at, c)) = chars.next() {
            match c {
                ':' | '*' => {
                    let start = at + c.len_utf8();
                    let mut end = start;
                    while let Some(&(i, n)) = chars.peek() {
                        if !is_name_char(n) {
                            break;
                        }
                        end = i + n.len_utf8();
                        chars.next();
                    }
                    if end == start {
                        program.push(Inst::Literal(c));
                        continue;
                    }

                    let slot = names.len() * 2;
                    names.push(source[start..end].to_owned());
                    program.push(Inst::Save(slot));
                    if c == ':' {
                        let segment = program.len();
                        program.push(Inst::Segment);
                        program.push(Inst::Split(segment, segment + 2));
                    } else {
                        let split = program.len();
                        program.push(Inst::Split(split + 1, split + 3));
                        program.push(Inst::Any);
                        program.push(Inst::Jump(split));
                    }
                    program.push(Inst::Save(slot + 1));
                }
                '(' => {
                    groups.push((program.len(), at));
                    // Patched once the group closes.
                    program.push(Inst::Split(0, 0));
                }
                ')' => {
                    let Some((split, _)) = groups.pop() else {
                        return Err(PatternError::UnexpectedClose { position: at });
                    };
                    let after = program.len();
                    program[split] = Inst::Split(split + 1, after);
                }
                _ => program.push(Inst::Literal(c)),
            }
        }
        if let Some(&(_, position)) = groups.last() {
            return Err(PatternError::UnclosedGroup { position });
        }
        program.push(Inst::Match);

        Ok(Self {
            source: source.to_owned(),
            names,
            program,
        })
    }

    /// Returns the pattern text this was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the placeholder names in capture order.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.names
    }

    /// Returns `true` if `path` matches.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.run(path).is_some()
    }

    /// Matches `path` and returns the captured values, or `None` if the
    /// pattern does not match.
    ///
    /// With the `decode` feature (on by default) each value is
    /// percent-decoded; a value that does not decode to UTF-8 is returned as
    /// written.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Params> {
        let slots = self.run(path)?;
        let params = slots
            .chunks_exact(2)
            .map(|pair| match *pair {
                [Some(start), Some(end)] => path.get(start..end).map(decode),
                _ => None,
            })
            .collect();
        Some(params)
    }

    fn run(&self, path: &str) -> Option<Vec<Option<usize>>> {
        let width = path.len() + 1;
        let mut visited = vec![false; self.program.len() * width];
        let mut slots = vec![None; self.names.len() * 2];
        let mut stack = vec![Frame::Step { pc: 0, at: 0 }];

        while let Some(frame) = stack.pop() {
            let (mut pc, mut at) = match frame {
                Frame::Step { pc, at } => (pc, at),
                Frame::Restore { slot, value } => {
                    slots[slot] = value;
                    continue;
                }
            };
            loop {
                let seen = &mut visited[pc * width + at];
                if *seen {
                    break;
                }
                *seen = true;

                let next = path[at..].chars().next();
                match self.program[pc] {
                    Inst::Literal(c) if next == Some(c) => {
                        at += c.len_utf8();
                        pc += 1;
                    }
                    Inst::Segment | Inst::Any => match next {
                        Some('/') if self.program[pc] == Inst::Segment => break,
                        Some(c) => {
                            at += c.len_utf8();
                            pc += 1;
                        }
                        None => break,
                    },
                    Inst::Save(slot) => {
                        stack.push(Frame::Restore {
                            slot,
                            value: slots[slot],
                        });
                        slots[slot] = Some(at);
                        pc += 1;
                    }
                    Inst::Split(first, second) => {
                        stack.push(Frame::Step { pc: second, at });
                        pc = first;
                    }
                    Inst::Jump(target) => pc = target,
                    Inst::Match if at == path.len() => return Some(slots),
                    Inst::Literal(_) | Inst::Match => break,
                }
            }
        }
        None
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(feature = "decode")]
fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |decoded| decoded.into_owned())
}

#[cfg(not(feature = "decode"))]
fn decode(raw: &str) -> String {
    raw.to_owned()
}

impl FromStr for RoutePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for RoutePattern {}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutePattern")
            .field("source", &self.source)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
