//! Process-wide Porto Alegre cascade.
//!
//! The cascade is compiled on first use and shared by reference afterwards.
//! Initialisation goes through [`OnceLock`], so concurrent first callers
//! block only until one of them has finished building; later calls are a
//! plain load.

use crate::phonetic::{porto_alegre_rules, Alphabet, Cascade, CascadeBuilder, ConfigurationError};
use std::sync::OnceLock;

static PORTO_ALEGRE: OnceLock<Result<Cascade, ConfigurationError>> = OnceLock::new();

/// The shared Porto Alegre cascade.
///
/// # Errors
///
/// The [`ConfigurationError`] of the built-in rule set, if it fails to
/// compile. The outcome is cached, so every caller sees the same error.
pub fn porto_alegre() -> Result<&'static Cascade, ConfigurationError> {
    PORTO_ALEGRE
        .get_or_init(|| {
            CascadeBuilder::new(Alphabet::portuguese())
                .rules(porto_alegre_rules())
                .build()
        })
        .as_ref()
        .map_err(Clone::clone)
}
