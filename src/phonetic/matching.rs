//! Pattern and context matching over symbol strings.
//!
//! A compiled context is a union of sequences. Each sequence is a run of
//! [`ContextItem`]s that must sit immediately next to the rewritten span:
//! left sequences end at the span start, right sequences begin at the span
//! end. Boundaries are zero-width; they test a position and consume nothing.
//!
//! # Functions
//!
//! - [`pattern_matches_at`] - Pattern matching at a position
//! - [`CompiledContext::matches_left`] / [`CompiledContext::matches_right`] - Context satisfaction

use super::alphabet::Symbol;
use smallvec::SmallVec;

/// A set of symbols, any one of which satisfies a context position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolClass {
    /// Sorted and deduplicated
    members: SmallVec<[Symbol; 8]>,
}

impl SymbolClass {
    /// Build a class from arbitrary symbols.
    pub fn new<I: IntoIterator<Item = Symbol>>(symbols: I) -> Self {
        let mut members: SmallVec<[Symbol; 8]> = symbols.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self { members }
    }

    /// Returns true if `symbol` is a member.
    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.members.binary_search(&symbol).is_ok()
    }

    /// Number of members.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the class has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One position of a compiled context sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextItem {
    /// One symbol from the class
    Class(SymbolClass),
    /// BOS on the left, EOS on the right
    Boundary,
}

/// A context compiled against an alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledContext {
    /// Alternatives; an empty sequence is always satisfied.
    sequences: Vec<Vec<ContextItem>>,
}

impl CompiledContext {
    /// The always-satisfied context.
    pub fn anywhere() -> Self {
        Self {
            sequences: vec![Vec::new()],
        }
    }

    pub(crate) fn from_sequences(sequences: Vec<Vec<ContextItem>>) -> Self {
        Self { sequences }
    }

    /// Returns true if the context never restricts a match.
    #[inline]
    pub fn is_anywhere(&self) -> bool {
        self.sequences.iter().any(Vec::is_empty)
    }

    /// Longest sequence, in symbols and boundaries.
    pub fn width(&self) -> usize {
        self.sequences.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check whether the context holds immediately before `pos`.
    ///
    /// Items are read right to left starting at `pos - 1`; a boundary holds
    /// when the cursor has reached 0.
    pub fn matches_left(&self, s: &[Symbol], pos: usize) -> bool {
        self.sequences.iter().any(|seq| {
            let mut cursor = pos;
            seq.iter().rev().all(|item| match item {
                ContextItem::Boundary => cursor == 0,
                ContextItem::Class(class) => {
                    if cursor == 0 || !class.contains(s[cursor - 1]) {
                        return false;
                    }
                    cursor -= 1;
                    true
                }
            })
        })
    }

    /// Check whether the context holds starting at `pos`.
    ///
    /// Items are read left to right; a boundary holds when the cursor has
    /// reached `s.len()`.
    pub fn matches_right(&self, s: &[Symbol], pos: usize) -> bool {
        self.sequences.iter().any(|seq| {
            let mut cursor = pos;
            seq.iter().all(|item| match item {
                ContextItem::Boundary => cursor == s.len(),
                ContextItem::Class(class) => match s.get(cursor) {
                    Some(&symbol) if class.contains(symbol) => {
                        cursor += 1;
                        true
                    }
                    _ => false,
                },
            })
        })
    }
}

/// Check if `pattern` occurs in `s` starting at `pos`.
///
/// An empty pattern matches everywhere; the compiler never produces one.
#[inline]
pub fn pattern_matches_at(pattern: &[Symbol], s: &[Symbol], pos: usize) -> bool {
    s.get(pos..pos + pattern.len())
        .is_some_and(|window| window == pattern)
}
