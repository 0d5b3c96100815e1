//! The Porto Alegre grapheme-to-phoneme rule set.
//!
//! Thirteen obligatory stages, applied in the order returned by
//! [`porto_alegre_rules()`]. The order is load-bearing:
//!
//! - `o → w̃ / ã_` must run before nasalization rewrites `ã` to `ɐ̃`,
//!   otherwise "não" ends in `u` instead of `w̃`.
//! - Final `e → i` runs before `c → s / _[ie]` and before `t, d` palatalization,
//!   which is what turns "verdade" into `veɾdadʒi`.
//! - Intervocalic `s → z` runs before `ss → s`, so a geminate `ss` never has
//!   a vowel on both sides of either `s`.
//!
//! Final `s` is treated as plural marking throughout ("cases" → `kazis`);
//! lexical final `s` is not distinguished.

use super::alphabet::{
    A_ACUTE, A_CIRCUMFLEX, A_TILDE, C_CEDILLA, ESH, EZH, FISHHOOK_R, INVERTED_R, LEFT_HOOK_N,
    NASAL_TURNED_A, NASAL_W, O_TILDE, TURNED_Y, U_TILDE,
};
use super::types::{Alternative, Context, RewriteRule, Side};

/// Oral vowels used by the intervocalic context
const VOWELS: &[&str] = &["a", "e", "i", "o", "u"];

/// Symbols before which `r` is a tap
const TAP_CONTEXT: &[&str] = &[
    "a", "e", "i", "b", "c", "d", "f", "g", "l", "m", "n", "p", "q", "s", "t",
];

/// End of string, optionally after a final (plural) `s`.
fn word_final_or_plural() -> Context {
    Context::Union(vec![
        Context::Boundary,
        Context::symbol_at_edge("s", Side::Right),
    ])
}

/// Stage 1: digraphs, silent h and stressed á.
///
/// Example: "chato" → "ʃato", "filho" → "fiʎo", "homem" → "omem"
fn rule_digraphs() -> RewriteRule {
    RewriteRule::new(
        "digraphs, silent h, á",
        [
            Alternative::new("ch", ESH),
            Alternative::new("lh", TURNED_Y),
            Alternative::new("nh", LEFT_HOOK_N),
            Alternative::new("h", ""),
            Alternative::new(A_ACUTE, "a"),
        ],
    )
}

/// Stage 2: o → w̃ after ã.
///
/// Example: "não" → "nãw̃"
fn rule_nasal_glide() -> RewriteRule {
    RewriteRule::new("o → w̃ / ã_", [Alternative::new("o", NASAL_W)])
        .after(Context::one_of(&[A_TILDE]))
}

/// Stage 3: nasal vowels; vowel + n collapses into one nasal vowel.
///
/// Example: "anta" → "ɐ̃ta", "maçã" → "maçɐ̃"
fn rule_nasalization() -> RewriteRule {
    RewriteRule::new(
        "nasalization",
        [
            Alternative::new(A_TILDE, NASAL_TURNED_A),
            Alternative::new(A_CIRCUMFLEX, NASAL_TURNED_A),
            Alternative::new("an", NASAL_TURNED_A),
            Alternative::new("on", O_TILDE),
            Alternative::new("un", U_TILDE),
        ],
    )
}

/// Stage 4: e → i word-finally, including plurals.
///
/// Example: "verdade" → "verdadi", "partes" → "partis"
fn rule_final_e() -> RewriteRule {
    RewriteRule::new("e → i / _{#,s#}", [Alternative::new("e", "i")])
        .before(word_final_or_plural())
}

/// Stage 5: o → u word-finally, including plurals.
///
/// Example: "chato" → "chatu", "amigos" → "amigus"
fn rule_final_o() -> RewriteRule {
    RewriteRule::new("o → u / _{#,s#}", [Alternative::new("o", "u")])
        .before(word_final_or_plural())
}

/// Stage 6: c → s before front vowels.
///
/// Example: "cimento" → "simento"
fn rule_soft_c() -> RewriteRule {
    RewriteRule::new("c → s / _[ie]", [Alternative::new("c", "s")])
        .before(Context::one_of(&["i", "e"]))
}

/// Stage 7: c → k before back vowels.
///
/// Example: "casa" → "kasa"
fn rule_hard_c() -> RewriteRule {
    RewriteRule::new("c → k / _[aou]", [Alternative::new("c", "k")])
        .before(Context::one_of(&["a", "o", "u"]))
}

/// Stage 8: word-final z → s.
///
/// Example: "vez" → "ves", "luz" → "lus"
fn rule_final_z() -> RewriteRule {
    RewriteRule::new("z → s / _#", [Alternative::new("z", "s")]).before(Context::Boundary)
}

/// Stage 9: word-initial r → ʁ.
///
/// Example: "rápido" → "ʁapidu" (after stage 1 removed the accent)
fn rule_initial_r() -> RewriteRule {
    RewriteRule::new("r → ʁ / #_", [Alternative::new("r", INVERTED_R)]).after(Context::Boundary)
}

/// Stage 10: r → ɾ before a, e, i and most consonants.
///
/// Example: "verdade" → "veɾdade", "braço" → "bɾaço"
fn rule_tap_r() -> RewriteRule {
    RewriteRule::new("r → ɾ / _[aeibcdfglmnpqst]", [Alternative::new("r", FISHHOOK_R)])
        .before(Context::one_of(TAP_CONTEXT))
}

/// Stage 11: intervocalic s → z.
///
/// Example: "casa" → "caza"
fn rule_intervocalic_s() -> RewriteRule {
    RewriteRule::new("s → z / V_V", [Alternative::new("s", "z")])
        .after(Context::one_of(VOWELS))
        .before(Context::one_of(VOWELS))
}

/// Stage 12: t → tʃ, d → dʒ before i.
///
/// Example: "partis" → "partʃis", "verdadi" → "verdadʒi"
fn rule_palatalization() -> RewriteRule {
    RewriteRule::new(
        "t → tʃ, d → dʒ / _i",
        [
            Alternative::new("t", format!("t{}", ESH)),
            Alternative::new("d", format!("d{}", EZH)),
        ],
    )
    .before(Context::one_of(&["i"]))
}

/// Stage 13: remaining clusters and ç.
///
/// Example: "nasço" → "naso", "carro" → "caʁo", "interesse" → "interese"
fn rule_clusters() -> RewriteRule {
    RewriteRule::new(
        "sç, ss, rr, ç",
        [
            Alternative::new(format!("s{}", C_CEDILLA), "s"),
            Alternative::new("ss", "s"),
            Alternative::new("rr", INVERTED_R),
            Alternative::new(C_CEDILLA, "s"),
        ],
    )
}

/// The complete Porto Alegre cascade, in application order.
pub fn porto_alegre_rules() -> Vec<RewriteRule> {
    vec![
        rule_digraphs(),
        rule_nasal_glide(),
        rule_nasalization(),
        rule_final_e(),
        rule_final_o(),
        rule_soft_c(),
        rule_hard_c(),
        rule_final_z(),
        rule_initial_r(),
        rule_tap_r(),
        rule_intervocalic_s(),
        rule_palatalization(),
        rule_clusters(),
    ]
}
