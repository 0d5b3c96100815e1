//! Rule compiler: declarative [`RewriteRule`]s to executable stages.
//!
//! Compilation resolves every string of a rule against an [`Alphabet`],
//! flattens both contexts into unions of symbol-class sequences, and indexes
//! the alternatives by their first pattern symbol with the longest pattern
//! first. The resulting [`CompiledRule`] is immutable and can be shared
//! freely across threads.
//!
//! # Determinism
//!
//! All alternatives of a stage share one pair of contexts, and the scanner
//! always prefers the longest pattern. Two alternatives can therefore only
//! compete for the same span when their patterns are identical. The compiler
//! rejects that case with [`ConfigurationError::AmbiguousAlternatives`]
//! unless the replacements agree too, so every compiled stage is
//! deterministic by construction.

use super::alphabet::{Alphabet, Symbol, SymbolSeq};
use super::error::{ConfigurationError, Result};
use super::matching::{CompiledContext, ContextItem, SymbolClass};
use super::types::{Context, RewriteRule, Side};
use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// One `pattern → replacement` pair resolved to symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledAlternative {
    /// Symbols consumed, never empty
    pub pattern: SymbolSeq,
    /// Symbols emitted, empty for deletion
    pub replacement: SymbolSeq,
}

/// A rewrite stage ready to be applied.
///
/// See [`CompiledRule::apply`] for the matching semantics.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub(crate) source: RewriteRule,
    pub(crate) alternatives: Vec<CompiledAlternative>,
    /// First pattern symbol → alternative indices, longest pattern first
    pub(crate) by_first: FxHashMap<Symbol, SmallVec<[usize; 4]>>,
    pub(crate) left: CompiledContext,
    pub(crate) right: CompiledContext,
}

impl CompiledRule {
    /// Name of the rule this stage was compiled from.
    #[inline]
    pub fn name(&self) -> &str {
        &self.source.rule_name
    }

    /// The declarative rule this stage was compiled from.
    #[inline]
    pub fn source(&self) -> &RewriteRule {
        &self.source
    }

    /// Alternatives after duplicate removal, in declaration order.
    #[inline]
    pub fn alternatives(&self) -> &[CompiledAlternative] {
        &self.alternatives
    }

    /// Compiled left context.
    #[inline]
    pub fn left(&self) -> &CompiledContext {
        &self.left
    }

    /// Compiled right context.
    #[inline]
    pub fn right(&self) -> &CompiledContext {
        &self.right
    }
}

impl fmt::Display for CompiledRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

/// Compile `rule` against `alphabet`.
///
/// # Errors
///
/// - [`ConfigurationError::NoAlternatives`] for a rule without alternatives
/// - [`ConfigurationError::EmptyPattern`] for an empty pattern
/// - [`ConfigurationError::UnknownSymbol`] for text outside the alphabet
/// - [`ConfigurationError::AmbiguousAlternatives`] for one pattern with two replacements
/// - [`ConfigurationError::EmptyContextClass`] / [`ConfigurationError::MisplacedBoundary`]
///   for malformed contexts
///
/// # Examples
///
/// ```rust
/// use portuguese_g2p::phonetic::{compile, Alphabet, Alternative, Context, RewriteRule};
///
/// let alphabet = Alphabet::portuguese();
/// let rule = RewriteRule::new("z → s / _#", [Alternative::new("z", "s")])
///     .before(Context::Boundary);
/// let stage = compile(&rule, &alphabet).unwrap();
///
/// let out = stage.apply(&alphabet.tokenize("vez").unwrap()).unwrap();
/// assert_eq!(alphabet.render(&out), "ves");
/// ```
pub fn compile(rule: &RewriteRule, alphabet: &Alphabet) -> Result<CompiledRule> {
    if rule.alternatives.is_empty() {
        return Err(ConfigurationError::NoAlternatives {
            rule: rule.rule_name.clone(),
        });
    }

    let mut alternatives: Vec<CompiledAlternative> = Vec::with_capacity(rule.alternatives.len());
    let mut seen: FxHashMap<SymbolSeq, usize> = FxHashMap::default();

    for alt in &rule.alternatives {
        let pattern = resolve(rule, alphabet, &alt.pattern)?;
        if pattern.is_empty() {
            return Err(ConfigurationError::EmptyPattern {
                rule: rule.rule_name.clone(),
            });
        }
        let replacement = resolve(rule, alphabet, &alt.replacement)?;

        if let Some(&earlier) = seen.get(&pattern) {
            let first = &alternatives[earlier].replacement;
            if *first != replacement {
                return Err(ConfigurationError::AmbiguousAlternatives {
                    rule: rule.rule_name.clone(),
                    pattern: alt.pattern.clone(),
                    first: alphabet.render(first),
                    second: alt.replacement.clone(),
                });
            }
            warn!(
                "rule `{}`: dropping duplicate alternative {}",
                rule.rule_name, alt
            );
            continue;
        }

        seen.insert(pattern.clone(), alternatives.len());
        alternatives.push(CompiledAlternative {
            pattern,
            replacement,
        });
    }

    let mut by_first: FxHashMap<Symbol, SmallVec<[usize; 4]>> = FxHashMap::default();
    for (i, alt) in alternatives.iter().enumerate() {
        by_first.entry(alt.pattern[0]).or_default().push(i);
    }
    for indices in by_first.values_mut() {
        // Stable: equal lengths keep declaration order
        indices.sort_by(|&a, &b| {
            alternatives[b]
                .pattern
                .len()
                .cmp(&alternatives[a].pattern.len())
        });
    }

    let left = compile_context(rule, alphabet, &rule.left, Side::Left)?;
    let right = compile_context(rule, alphabet, &rule.right, Side::Right)?;

    debug!(
        "compiled rule `{}`: {} alternative(s), context widths {}/{}",
        rule.rule_name,
        alternatives.len(),
        left.width(),
        right.width()
    );

    Ok(CompiledRule {
        source: rule.clone(),
        alternatives,
        by_first,
        left,
        right,
    })
}

/// Segment a rule fragment, naming the rule if it leaves the alphabet.
fn resolve(rule: &RewriteRule, alphabet: &Alphabet, text: &str) -> Result<SymbolSeq> {
    alphabet
        .tokenize_fragment(text)
        .ok_or_else(|| ConfigurationError::UnknownSymbol {
            rule: rule.rule_name.clone(),
            symbol: text.to_string(),
        })
}

/// Flatten a declarative context and check boundary placement.
fn compile_context(
    rule: &RewriteRule,
    alphabet: &Alphabet,
    context: &Context,
    side: Side,
) -> Result<CompiledContext> {
    let sequences = flatten(rule, alphabet, context, side)?;

    for seq in &sequences {
        let misplaced = seq.iter().enumerate().any(|(i, item)| {
            let at_edge = match side {
                Side::Left => i == 0,
                Side::Right => i + 1 == seq.len(),
            };
            matches!(item, ContextItem::Boundary) && !at_edge
        });
        if misplaced {
            return Err(ConfigurationError::MisplacedBoundary {
                rule: rule.rule_name.clone(),
                side,
            });
        }
    }

    Ok(CompiledContext::from_sequences(sequences))
}

fn flatten(
    rule: &RewriteRule,
    alphabet: &Alphabet,
    context: &Context,
    side: Side,
) -> Result<Vec<Vec<ContextItem>>> {
    match context {
        Context::Anywhere => Ok(vec![Vec::new()]),
        Context::Boundary => Ok(vec![vec![ContextItem::Boundary]]),
        Context::OneOf(symbols) => {
            if symbols.is_empty() {
                return Err(ConfigurationError::EmptyContextClass {
                    rule: rule.rule_name.clone(),
                    side,
                });
            }
            let members = symbols
                .iter()
                .map(|text| {
                    alphabet
                        .symbol(text)
                        .ok_or_else(|| ConfigurationError::UnknownSymbol {
                            rule: rule.rule_name.clone(),
                            symbol: text.clone(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(vec![vec![ContextItem::Class(SymbolClass::new(members))]])
        }
        Context::Sequence(items) => {
            let mut acc: Vec<Vec<ContextItem>> = vec![Vec::new()];
            for item in items {
                let tails = flatten(rule, alphabet, item, side)?;
                acc = acc
                    .iter()
                    .flat_map(|head| {
                        tails.iter().map(move |tail| {
                            let mut seq = head.clone();
                            seq.extend(tail.iter().cloned());
                            seq
                        })
                    })
                    .collect();
            }
            Ok(acc)
        }
        Context::Union(alts) => {
            if alts.is_empty() {
                return Err(ConfigurationError::EmptyContextClass {
                    rule: rule.rule_name.clone(),
                    side,
                });
            }
            let mut out = Vec::new();
            for alt in alts {
                out.extend(flatten(rule, alphabet, alt, side)?);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::types::Alternative;

    fn alphabet() -> Alphabet {
        Alphabet::portuguese()
    }

    #[test]
    fn test_compile_simple_rule() {
        let rule = RewriteRule::new("c → k", [Alternative::new("c", "k")])
            .before(Context::one_of(&["a", "o", "u"]));
        let stage = compile(&rule, &alphabet()).unwrap();
        assert_eq!(stage.name(), "c → k");
        assert_eq!(stage.alternatives().len(), 1);
        assert!(stage.left().is_anywhere());
        assert!(!stage.right().is_anywhere());
        assert_eq!(stage.to_string(), "c → k / _[aou]");
        assert_eq!(stage.source(), &rule);
    }

    #[test]
    fn test_compile_orders_longest_first() {
        let a = alphabet();
        let rule = RewriteRule::new(
            "s cluster",
            [Alternative::new("s", "z"), Alternative::new("ss", "s")],
        );
        let stage = compile(&rule, &a).unwrap();
        let s = a.symbol("s").unwrap();
        let order: Vec<usize> = stage.by_first[&s].iter().copied().collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_compile_rejects_unknown_pattern_symbol() {
        let rule = RewriteRule::new("bad", [Alternative::new("ß", "s")]);
        assert_eq!(
            compile(&rule, &alphabet()).unwrap_err(),
            ConfigurationError::UnknownSymbol {
                rule: "bad".to_string(),
                symbol: "ß".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_rejects_unknown_replacement_symbol() {
        let rule = RewriteRule::new("bad", [Alternative::new("s", "θ")]);
        assert!(matches!(
            compile(&rule, &alphabet()),
            Err(ConfigurationError::UnknownSymbol { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_unknown_context_symbol() {
        let rule = RewriteRule::new("bad", [Alternative::new("s", "z")])
            .after(Context::one_of(&["a", "E"]));
        assert_eq!(
            compile(&rule, &alphabet()).unwrap_err(),
            ConfigurationError::UnknownSymbol {
                rule: "bad".to_string(),
                symbol: "E".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_rejects_empty_pattern_and_no_alternatives() {
        let rule = RewriteRule::new("insert", [Alternative::new("", "e")]);
        assert!(matches!(
            compile(&rule, &alphabet()),
            Err(ConfigurationError::EmptyPattern { .. })
        ));

        let rule = RewriteRule::new("nothing", []);
        assert!(matches!(
            compile(&rule, &alphabet()),
            Err(ConfigurationError::NoAlternatives { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_ambiguous_alternatives() {
        let rule = RewriteRule::new(
            "clash",
            [Alternative::new("x", "s"), Alternative::new("x", "\u{283}")],
        );
        assert_eq!(
            compile(&rule, &alphabet()).unwrap_err(),
            ConfigurationError::AmbiguousAlternatives {
                rule: "clash".to_string(),
                pattern: "x".to_string(),
                first: "s".to_string(),
                second: "\u{283}".to_string(),
            }
        );
    }

    #[test]
    fn test_compile_drops_exact_duplicates() {
        let rule = RewriteRule::new(
            "dup",
            [Alternative::new("ã", "ɐ̃"), Alternative::new("ã", "ɐ̃")],
        );
        let stage = compile(&rule, &alphabet()).unwrap();
        assert_eq!(stage.alternatives().len(), 1);
    }

    #[test]
    fn test_compile_rejects_misplaced_boundary() {
        let rule = RewriteRule::new("bad", [Alternative::new("e", "i")]).before(
            Context::Sequence(vec![Context::Boundary, Context::one_of(&["s"])]),
        );
        assert_eq!(
            compile(&rule, &alphabet()).unwrap_err(),
            ConfigurationError::MisplacedBoundary {
                rule: "bad".to_string(),
                side: Side::Right,
            }
        );

        let rule = RewriteRule::new("bad", [Alternative::new("e", "i")])
            .after(Context::symbol_at_edge("s", Side::Right));
        assert!(matches!(
            compile(&rule, &alphabet()),
            Err(ConfigurationError::MisplacedBoundary { side: Side::Left, .. })
        ));
    }

    #[test]
    fn test_compile_rejects_empty_class() {
        let rule = RewriteRule::new("bad", [Alternative::new("e", "i")])
            .before(Context::OneOf(vec![]));
        assert!(matches!(
            compile(&rule, &alphabet()),
            Err(ConfigurationError::EmptyContextClass { side: Side::Right, .. })
        ));

        let rule = RewriteRule::new("bad", [Alternative::new("e", "i")])
            .after(Context::Union(vec![]));
        assert!(matches!(
            compile(&rule, &alphabet()),
            Err(ConfigurationError::EmptyContextClass { side: Side::Left, .. })
        ));
    }

    #[test]
    fn test_flatten_sequence_of_unions() {
        let a = alphabet();
        let rule = RewriteRule::new("r", [Alternative::new("e", "i")]);
        let ctx = Context::Sequence(vec![
            Context::Union(vec![Context::one_of(&["s"]), Context::one_of(&["z"])]),
            Context::Boundary,
        ]);
        let seqs = flatten(&rule, &a, &ctx, Side::Right).unwrap();
        assert_eq!(seqs.len(), 2);
        assert!(seqs.iter().all(|s| s.len() == 2));
    }
}
