//! # portuguese-g2p
//!
//! Grapheme-to-phoneme transcription for the Porto Alegre dialect of
//! Brazilian Portuguese.
//!
//! Orthographic input is rewritten into an IPA phonemic transcription by an
//! ordered cascade of obligatory, context-dependent rewrite rules in the
//! style of Chomsky & Halle:
//!
//! > φ → ψ / λ _ ρ
//!
//! Each rule is compiled into a deterministic single-pass scanner over a
//! fixed alphabet, and the cascade pipes every stage's output into the next.
//!
//! ## Example
//!
//! ```rust
//! assert_eq!(portuguese_g2p::transduce("casa")?, "kaza");
//! assert_eq!(portuguese_g2p::transduce("verdade")?, "veɾdadʒi");
//! # Ok::<(), portuguese_g2p::Error>(())
//! ```
//!
//! Custom rule sets can be assembled with
//! [`CascadeBuilder`](phonetic::CascadeBuilder); see [`phonetic`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dialect;
pub mod phonetic;

pub use phonetic::Error;

/// Transcribe `input` with the shared Porto Alegre cascade.
///
/// # Errors
///
/// - [`Error::Rewrite`] if `input` contains a symbol outside the alphabet
///   or a stage cannot determine a unique result
/// - [`Error::Configuration`] if the built-in rule set fails to compile
pub fn transduce(input: &str) -> Result<String, Error> {
    let cascade = dialect::porto_alegre()?;
    Ok(cascade.transduce(input)?)
}

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::dialect::porto_alegre;
    pub use crate::phonetic::{
        porto_alegre_rules, Alphabet, Alternative, Cascade, CascadeBuilder, ConfigurationError,
        Context, RewriteError, RewriteRule, Side,
    };
    pub use crate::transduce;
}
