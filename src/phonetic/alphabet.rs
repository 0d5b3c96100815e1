//! Symbol alphabet shared by every stage of a cascade.
//!
//! Rules operate on [`Symbol`]s rather than on `char`s because several IPA
//! symbols span more than one Unicode scalar value: `ɐ̃` is U+0250 followed by
//! the combining tilde U+0303, and so is `w̃`. Input text is segmented with
//! greedy longest match, so `w̃` is one symbol while a bare `w` is another.
//!
//! No normalization is performed. A decomposed `ã` (`a` + U+0303) is not the
//! precomposed `ã` (U+00E3) and is rejected as unsupported.

use super::error::{ConfigurationError, RewriteError};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// `ʒ` voiced postalveolar fricative
pub const EZH: &str = "\u{292}";
/// `ʃ` voiceless postalveolar fricative
pub const ESH: &str = "\u{283}";
/// `ç` c-cedilla
pub const C_CEDILLA: &str = "\u{e7}";
/// `á` stressed a
pub const A_ACUTE: &str = "\u{e1}";
/// `ʎ` palatal lateral
pub const TURNED_Y: &str = "\u{28e}";
/// `ʁ` uvular fricative
pub const INVERTED_R: &str = "\u{281}";
/// `ɾ` alveolar tap
pub const FISHHOOK_R: &str = "\u{27e}";
/// `ɲ` palatal nasal
pub const LEFT_HOOK_N: &str = "\u{272}";
/// `ɐ̃` nasal near-open central vowel
pub const NASAL_TURNED_A: &str = "\u{250}\u{303}";
/// `ã` a-tilde
pub const A_TILDE: &str = "\u{e3}";
/// `â` a-circumflex
pub const A_CIRCUMFLEX: &str = "\u{e2}";
/// `õ` o-tilde
pub const O_TILDE: &str = "\u{f5}";
/// `ũ` u-tilde
pub const U_TILDE: &str = "\u{169}";
/// `w̃` nasal labio-velar glide
pub const NASAL_W: &str = "w\u{303}";

/// The non-ASCII symbols of the Porto Alegre rule set, inputs and outputs.
pub const PORTUGUESE_IPA: &[&str] = &[
    EZH,
    ESH,
    C_CEDILLA,
    A_ACUTE,
    TURNED_Y,
    INVERTED_R,
    FISHHOOK_R,
    LEFT_HOOK_N,
    NASAL_TURNED_A,
    A_TILDE,
    A_CIRCUMFLEX,
    O_TILDE,
    U_TILDE,
    NASAL_W,
];

/// Index of a symbol within its [`Alphabet`].
///
/// Symbols are only meaningful together with the alphabet that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u16);

impl Symbol {
    /// Position of the symbol in its alphabet.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Symbol sequence with inline storage for short patterns and digraphs.
pub type SymbolSeq = SmallVec<[Symbol; 4]>;

/// An ordered, deduplicated set of symbols.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, Symbol>,
    /// Longest symbol, in chars; bounds the tokenizer's lookahead
    max_chars: usize,
}

impl Alphabet {
    /// Build an alphabet from symbol strings. Duplicates are ignored.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::EmptySymbol`] if any symbol is `""`
    /// - [`ConfigurationError::AlphabetTooLarge`] past `u16::MAX` symbols
    pub fn new<I, S>(symbols: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut alphabet = Alphabet {
            symbols: Vec::new(),
            lookup: FxHashMap::default(),
            max_chars: 0,
        };

        for symbol in symbols {
            let symbol = symbol.as_ref();
            if symbol.is_empty() {
                return Err(ConfigurationError::EmptySymbol);
            }
            if alphabet.lookup.contains_key(symbol) {
                continue;
            }
            let id = u16::try_from(alphabet.symbols.len()).map_err(|_| {
                ConfigurationError::AlphabetTooLarge {
                    max: u16::MAX as usize,
                }
            })?;
            let boxed: Box<str> = symbol.into();
            alphabet.max_chars = alphabet.max_chars.max(symbol.chars().count());
            alphabet.lookup.insert(boxed.clone(), Symbol(id));
            alphabet.symbols.push(boxed);
        }

        Ok(alphabet)
    }

    /// ASCII lowercase letters plus the IPA symbols of [`PORTUGUESE_IPA`].
    pub fn portuguese() -> Self {
        let mut symbols: Vec<Box<str>> = ('a'..='z').map(|c| c.to_string().into()).collect();
        symbols.extend(PORTUGUESE_IPA.iter().map(|&s| Box::<str>::from(s)));

        let lookup = symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), Symbol(i as u16)))
            .collect();
        let max_chars = symbols.iter().map(|s| s.chars().count()).max().unwrap_or(0);

        Alphabet {
            symbols,
            lookup,
            max_chars,
        }
    }

    /// Number of symbols.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the alphabet has no symbols.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up a single symbol by its exact text.
    #[inline]
    pub fn symbol(&self, text: &str) -> Option<Symbol> {
        self.lookup.get(text).copied()
    }

    /// Returns true if `text` is exactly one symbol of this alphabet.
    #[inline]
    pub fn contains_str(&self, text: &str) -> bool {
        self.lookup.contains_key(text)
    }

    /// Returns true if `symbol` was issued by an alphabet of this size.
    #[inline]
    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol.index() < self.symbols.len()
    }

    /// Text of a symbol.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was issued by a larger alphabet.
    #[inline]
    pub fn as_str(&self, symbol: Symbol) -> &str {
        &self.symbols[symbol.index()]
    }

    /// Iterate over all symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (Symbol(i as u16), s.as_ref()))
    }

    /// Segment `text` into symbols, longest match first.
    ///
    /// # Errors
    ///
    /// [`RewriteError::UnsupportedSymbol`] at the first position where no
    /// symbol matches.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Symbol>, RewriteError> {
        let mut out = Vec::with_capacity(text.len());
        let mut rest = text;

        while !rest.is_empty() {
            let (symbol, len) = self.longest_prefix(rest).ok_or_else(|| {
                let offset = text.len() - rest.len();
                // `rest` is non-empty
                let found = rest.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                RewriteError::UnsupportedSymbol { found, offset }
            })?;
            out.push(symbol);
            rest = &rest[len..];
        }

        Ok(out)
    }

    /// Segment a rule fragment; `None` if any part is outside the alphabet.
    pub(crate) fn tokenize_fragment(&self, text: &str) -> Option<SymbolSeq> {
        let mut out = SymbolSeq::new();
        let mut rest = text;
        while !rest.is_empty() {
            let (symbol, len) = self.longest_prefix(rest)?;
            out.push(symbol);
            rest = &rest[len..];
        }
        Some(out)
    }

    /// Concatenate the text of `symbols`.
    pub fn render(&self, symbols: &[Symbol]) -> String {
        let mut out = String::with_capacity(symbols.len() * 2);
        for &symbol in symbols {
            out.push_str(self.as_str(symbol));
        }
        out
    }

    /// Longest symbol that prefixes `text`, with its byte length.
    fn longest_prefix(&self, text: &str) -> Option<(Symbol, usize)> {
        // Byte offsets of the first `max_chars` char boundaries after 0.
        let ends: SmallVec<[usize; 4]> = text
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .take(self.max_chars)
            .collect();

        ends.iter()
            .rev()
            .find_map(|&end| self.lookup.get(&text[..end]).map(|&s| (s, end)))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::portuguese()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.symbols.iter()).finish()
    }
}
