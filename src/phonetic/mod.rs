//! Context-dependent phonological rewrite rules.
//!
//! This module compiles rules written in `φ → ψ / λ _ ρ` notation into
//! single-pass scanners and composes them into ordered cascades.
//!
//! # Pipeline
//!
//! ```text
//! &str ──tokenize──▶ [Symbol] ──stage 1──▶ … ──stage n──▶ [Symbol] ──render──▶ String
//! ```
//!
//! 1. [`Alphabet`] segments text into [`Symbol`]s, longest match first, and
//!    rejects anything it does not know.
//! 2. [`compile`] turns each [`RewriteRule`] into a [`CompiledRule`], checking
//!    every symbol against the alphabet and proving the stage deterministic.
//! 3. [`Cascade`] applies the stages in order.
//!
//! # Usage
//!
//! ```rust
//! use portuguese_g2p::phonetic::{porto_alegre_rules, Alphabet, CascadeBuilder};
//!
//! let cascade = CascadeBuilder::new(Alphabet::portuguese())
//!     .rules(porto_alegre_rules())
//!     .build()?;
//!
//! assert_eq!(cascade.transduce("casa")?, "kaza");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Matching Semantics
//!
//! Every stage is obligatory and scans left to right. Matches never overlap,
//! the longest alternative wins at a position, and contexts are read from the
//! stage input. See [`application`] for details.

pub mod alphabet;
pub mod application;
pub mod cascade;
pub mod compiler;
pub mod error;
pub mod matching;
pub mod rules;
pub mod types;

mod properties;

pub use alphabet::{Alphabet, Symbol, SymbolSeq, PORTUGUESE_IPA};
pub use cascade::{Cascade, CascadeBuilder, StageTrace};
pub use compiler::{compile, CompiledAlternative, CompiledRule};
pub use error::{ConfigurationError, Error, RewriteError};
pub use matching::{pattern_matches_at, CompiledContext, ContextItem, SymbolClass};
pub use rules::porto_alegre_rules;
pub use types::{Alternative, Context, RewriteRule, Side};
