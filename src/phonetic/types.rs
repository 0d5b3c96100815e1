//! Declarative types for context-dependent rewrite rules.
//!
//! A rule is written in the classic `φ → ψ / λ _ ρ` notation: every
//! alternative `φ → ψ` of a stage fires wherever its pattern occurs between a
//! left context `λ` and a right context `ρ`.
//!
//! These types hold plain strings. They are resolved against an
//! [`Alphabet`](super::Alphabet) by the [compiler](super::compiler), which is
//! where unknown symbols and malformed contexts are rejected.
//!
//! ```text
//! Context ::= Anywhere
//!           | Boundary                 -- BOS on the left, EOS on the right
//!           | OneOf(symbol, ...)       -- exactly one symbol from a set
//!           | Sequence(Context, ...)   -- consecutive items, read left to right
//!           | Union(Context, ...)      -- any of the alternatives
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side of the rewritten span a context constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// Left context; a boundary here means beginning of string
    Left,
    /// Right context; a boundary here means end of string
    Right,
}

/// Context restriction on one side of a rewrite.
///
/// # Variants
///
/// - `Anywhere` - Always satisfied
/// - `Boundary` - The string edge on this side (BOS or EOS)
/// - `OneOf(Vec<String>)` - One symbol drawn from the set
/// - `Sequence(Vec<Context>)` - Items matched one after another
/// - `Union(Vec<Context>)` - Any one of the alternatives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Context {
    /// No context restriction
    Anywhere,
    /// Beginning of string (left) or end of string (right)
    Boundary,
    /// Exactly one symbol from the set
    OneOf(Vec<String>),
    /// Consecutive items, written in reading order
    Sequence(Vec<Context>),
    /// Any of the alternatives
    Union(Vec<Context>),
}

impl Context {
    /// One symbol out of `symbols`.
    pub fn one_of<S: AsRef<str>>(symbols: &[S]) -> Self {
        Context::OneOf(symbols.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// The literal `symbol` followed by the string edge, e.g. `s#`.
    ///
    /// Reads as "`symbol` then EOS" on the right and "BOS then `symbol`" on
    /// the left.
    pub fn symbol_at_edge(symbol: &str, side: Side) -> Self {
        let class = Context::OneOf(vec![symbol.to_string()]);
        match side {
            Side::Left => Context::Sequence(vec![Context::Boundary, class]),
            Side::Right => Context::Sequence(vec![class, Context::Boundary]),
        }
    }

    /// Returns true if the context constrains nothing.
    #[inline]
    pub fn is_anywhere(&self) -> bool {
        matches!(self, Context::Anywhere)
    }
}

/// One `pattern → replacement` pair of a stage.
///
/// An empty replacement deletes the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alternative {
    /// Text to match (one symbol or a digraph)
    pub pattern: String,
    /// Text to substitute
    pub replacement: String,
}

impl Alternative {
    /// Create an alternative rewriting `pattern` as `replacement`.
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// An obligatory context-dependent rewrite rule: one stage of a cascade.
///
/// All alternatives share `left` and `right` and apply simultaneously in a
/// single left-to-right pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewriteRule {
    /// Human-readable name, used in errors and logs
    pub rule_name: String,
    /// Alternatives applied together
    pub alternatives: Vec<Alternative>,
    /// Context required immediately left of the pattern
    pub left: Context,
    /// Context required immediately right of the pattern
    pub right: Context,
}

impl RewriteRule {
    /// Create a rule with the given alternatives and no context restriction.
    pub fn new<I>(rule_name: impl Into<String>, alternatives: I) -> Self
    where
        I: IntoIterator<Item = Alternative>,
    {
        Self {
            rule_name: rule_name.into(),
            alternatives: alternatives.into_iter().collect(),
            left: Context::Anywhere,
            right: Context::Anywhere,
        }
    }

    /// Restrict the left context.
    pub fn after(mut self, left: Context) -> Self {
        self.left = left;
        self
    }

    /// Restrict the right context.
    pub fn before(mut self, right: Context) -> Self {
        self.right = right;
        self
    }
}

// ============================================================================
// Display implementations
// ============================================================================

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Anywhere => Ok(()),
            Context::Boundary => write!(f, "#"),
            Context::OneOf(symbols) if symbols.len() == 1 => write!(f, "{}", symbols[0]),
            Context::OneOf(symbols) => write!(f, "[{}]", symbols.concat()),
            Context::Sequence(items) => items.iter().try_for_each(|item| write!(f, "{}", item)),
            Context::Union(alts) => {
                write!(f, "{{")?;
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", alt)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.replacement.is_empty() {
            write!(f, "{} → ∅", self.pattern)
        } else {
            write!(f, "{} → {}", self.pattern, self.replacement)
        }
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alt) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", alt)?;
        }
        write!(f, " / {}_{}", self.left, self.right)
    }
}
