//! Ordered composition of compiled rewrite stages.
//!
//! A [`Cascade`] pipes the output of stage `i` into stage `i + 1`. Stage
//! order is part of the rule set's meaning: later stages see the surface
//! left by earlier ones, and swapping two stages can change the result.
//!
//! Cascades are immutable once built and hold no per-call state, so one
//! instance can serve any number of threads without locking.

use super::alphabet::{Alphabet, Symbol};
use super::compiler::{compile, CompiledRule};
use super::error::{ConfigurationError, RewriteError};
use super::types::RewriteRule;
use log::{debug, log_enabled, trace, Level};

/// Builder for constructing a [`Cascade`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use portuguese_g2p::phonetic::{Alphabet, Alternative, CascadeBuilder, Context, RewriteRule};
///
/// let cascade = CascadeBuilder::new(Alphabet::portuguese())
///     .rule(RewriteRule::new("c → s / _[ie]", [Alternative::new("c", "s")])
///         .before(Context::one_of(&["i", "e"])))
///     .rule(RewriteRule::new("c → k", [Alternative::new("c", "k")]))
///     .build()?;
///
/// assert_eq!(cascade.transduce("cico")?, "siko");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CascadeBuilder {
    alphabet: Alphabet,
    rules: Vec<RewriteRule>,
}

impl CascadeBuilder {
    /// Create a builder over `alphabet` with no stages.
    pub fn new(alphabet: Alphabet) -> Self {
        CascadeBuilder {
            alphabet,
            rules: Vec::new(),
        }
    }

    /// Append one stage.
    pub fn rule(mut self, rule: RewriteRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several stages, keeping their order.
    pub fn rules<I: IntoIterator<Item = RewriteRule>>(mut self, rules: I) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Compile every stage in order.
    ///
    /// # Errors
    ///
    /// The [`ConfigurationError`] of the first stage that fails to compile.
    pub fn build(self) -> Result<Cascade, ConfigurationError> {
        let stages = self
            .rules
            .iter()
            .map(|rule| compile(rule, &self.alphabet))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "built cascade: {} stage(s) over {} symbol(s)",
            stages.len(),
            self.alphabet.len()
        );

        Ok(Cascade {
            alphabet: self.alphabet,
            stages,
        })
    }
}

/// Output of one stage that changed the string, as recorded by [`Cascade::trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTrace {
    /// Zero-based stage index
    pub stage: usize,
    /// Name of the stage's rule
    pub rule_name: String,
    /// Number of spans the stage rewrote
    pub rewrites: usize,
    /// Rendered stage output
    pub output: String,
}

/// An ordered, immutable sequence of compiled stages over one alphabet.
#[derive(Debug, Clone)]
pub struct Cascade {
    alphabet: Alphabet,
    stages: Vec<CompiledRule>,
}

impl Cascade {
    /// Start building a cascade over `alphabet`.
    pub fn builder(alphabet: Alphabet) -> CascadeBuilder {
        CascadeBuilder::new(alphabet)
    }

    /// The alphabet every stage was compiled against.
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Compiled stages in application order.
    #[inline]
    pub fn stages(&self) -> &[CompiledRule] {
        &self.stages
    }

    /// Number of stages.
    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the cascade has no stages (the identity transduction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Rewrite `input` through every stage.
    ///
    /// The input is segmented first, so an unsupported symbol is reported
    /// before any stage runs. No partial output is returned on failure.
    ///
    /// # Errors
    ///
    /// - [`RewriteError::UnsupportedSymbol`] if `input` leaves the alphabet
    /// - [`RewriteError::Ambiguous`] if a stage cannot decide
    pub fn transduce(&self, input: &str) -> Result<String, RewriteError> {
        let symbols = self.alphabet.tokenize(input)?;
        let output = self.transduce_symbols(&symbols)?;
        Ok(self.alphabet.render(&output))
    }

    /// Rewrite already segmented symbols through every stage.
    ///
    /// # Errors
    ///
    /// - [`RewriteError::ForeignSymbol`] if a symbol lies outside
    ///   [`Cascade::alphabet`]; checked before any stage runs
    /// - [`RewriteError::Ambiguous`] if a stage cannot decide
    pub fn transduce_symbols(&self, symbols: &[Symbol]) -> Result<Vec<Symbol>, RewriteError> {
        if let Some((position, symbol)) = symbols
            .iter()
            .enumerate()
            .find(|(_, &symbol)| !self.alphabet.contains(symbol))
        {
            return Err(RewriteError::ForeignSymbol {
                index: symbol.index(),
                position,
            });
        }

        let mut current = symbols.to_vec();

        for stage in &self.stages {
            let (next, fired) = stage.apply_counted(&current)?;
            if fired > 0 && log_enabled!(Level::Trace) {
                trace!(
                    "{}: {} -> {}",
                    stage.name(),
                    self.alphabet.render(&current),
                    self.alphabet.render(&next)
                );
            }
            current = next;
        }

        Ok(current)
    }

    /// Rewrite `input` and record every stage that changed it.
    ///
    /// The last record's `output` equals [`Cascade::transduce`]'s result
    /// whenever at least one stage fired.
    pub fn trace(&self, input: &str) -> Result<Vec<StageTrace>, RewriteError> {
        let mut current = self.alphabet.tokenize(input)?;
        let mut steps = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            let (next, fired) = stage.apply_counted(&current)?;
            if fired > 0 {
                steps.push(StageTrace {
                    stage: i,
                    rule_name: stage.name().to_string(),
                    rewrites: fired,
                    output: self.alphabet.render(&next),
                });
            }
            current = next;
        }

        Ok(steps)
    }

    /// Rewrite a batch of records independently.
    ///
    /// Each record gets its own `Result`; a failure does not affect the
    /// records around it.
    pub fn transduce_all<'a, I, S>(
        &'a self,
        inputs: I,
    ) -> impl Iterator<Item = Result<String, RewriteError>> + 'a
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: 'a,
        S: AsRef<str> + 'a,
    {
        inputs
            .into_iter()
            .map(move |input| self.transduce(input.as_ref()))
    }
}
