//! Error types for rule compilation and rewriting.
//!
//! Two failure families exist:
//!
//! - [`ConfigurationError`] - raised while an [`Alphabet`](super::Alphabet) or a
//!   [`Cascade`](super::Cascade) is built. Fatal for that construction.
//! - [`RewriteError`] - raised by a single `transduce` call. The cascade stays
//!   valid for later calls.
//!
//! [`Error`] unites both for the crate-level [`transduce`](crate::transduce),
//! which may have to build the shared cascade on first use.

use super::types::Side;
use thiserror::Error;

/// Errors detected while building an alphabet or compiling a rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A pattern, replacement or context mentions a symbol the alphabet lacks.
    #[error("rule `{rule}` references {symbol:?}, which is outside the alphabet")]
    UnknownSymbol {
        /// Name of the offending rule
        rule: String,
        /// The text that could not be segmented into alphabet symbols
        symbol: String,
    },

    /// An alternative has an empty pattern.
    ///
    /// Empty patterns would be insertions at every position, which obligatory
    /// rewriting cannot express without looping.
    #[error("rule `{rule}` has an alternative with an empty pattern")]
    EmptyPattern {
        /// Name of the offending rule
        rule: String,
    },

    /// A rule was declared without any alternatives.
    #[error("rule `{rule}` has no alternatives")]
    NoAlternatives {
        /// Name of the offending rule
        rule: String,
    },

    /// A `OneOf` context was declared with no members and could never match.
    #[error("rule `{rule}` has an empty symbol class in its {side} context")]
    EmptyContextClass {
        /// Name of the offending rule
        rule: String,
        /// Which context the class appears in
        side: Side,
    },

    /// A boundary appears somewhere other than the outer edge of a context.
    #[error("rule `{rule}` places a boundary inside its {side} context")]
    MisplacedBoundary {
        /// Name of the offending rule
        rule: String,
        /// Which context the boundary appears in
        side: Side,
    },

    /// Two alternatives of one stage rewrite the same span differently.
    #[error("rule `{rule}` rewrites {pattern:?} both as {first:?} and as {second:?}")]
    AmbiguousAlternatives {
        /// Name of the offending rule
        rule: String,
        /// The shared pattern
        pattern: String,
        /// Replacement of the first alternative
        first: String,
        /// Replacement of the conflicting alternative
        second: String,
    },

    /// An alphabet symbol was given as the empty string.
    #[error("alphabet symbols must not be empty")]
    EmptySymbol,

    /// The alphabet has more symbols than a [`Symbol`](super::Symbol) can index.
    #[error("alphabet exceeds the maximum of {max} symbols")]
    AlphabetTooLarge {
        /// Maximum supported alphabet size
        max: usize,
    },
}

/// Errors raised while rewriting one input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// The input contains text that no alphabet symbol matches.
    #[error("unsupported symbol {found:?} at byte offset {offset}")]
    UnsupportedSymbol {
        /// First character that could not be matched
        found: char,
        /// Byte offset of `found` in the input
        offset: usize,
    },

    /// A pre-segmented symbol was issued by a different, larger alphabet.
    #[error("symbol #{index} at position {position} is not in the cascade's alphabet")]
    ForeignSymbol {
        /// Index carried by the foreign symbol
        index: usize,
        /// Position of the symbol in the input sequence
        position: usize,
    },

    /// A stage could not determine a unique rewrite for the input.
    #[error("non-unique rewrite in rule `{rule}` at symbol position {position}")]
    Ambiguous {
        /// Name of the stage that failed
        rule: String,
        /// Symbol index in the stage input
        position: usize,
    },
}

/// Any failure of the crate-level [`transduce`](crate::transduce).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The shared rule cascade could not be built.
    #[error("rule cascade configuration error")]
    Configuration(#[from] ConfigurationError),

    /// The input could not be rewritten.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

/// A specialized `Result` type for rule compilation.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
