//! Cascade-level properties: ordering, atomicity, determinism and closure.

use portuguese_g2p::phonetic::{
    compile, porto_alegre_rules, Alphabet, Alternative, CascadeBuilder, RewriteRule,
};
use portuguese_g2p::prelude::*;
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_swapping_glide_and_nasalization_changes_nao() {
    init_logger();
    let mut rules = porto_alegre_rules();
    rules.swap(1, 2);
    let swapped = CascadeBuilder::new(Alphabet::portuguese())
        .rules(rules)
        .build()
        .unwrap();

    let canonical = porto_alegre().unwrap().transduce("não").unwrap();
    let reordered = swapped.transduce("não").unwrap();
    assert_eq!(canonical, "nɐ̃w̃");
    assert_eq!(reordered, "nɐ̃u");
    assert_ne!(canonical, reordered);
}

#[test]
fn test_ch_digraph_is_atomic() {
    init_logger();
    let alphabet = Alphabet::portuguese();
    let stage = compile(&porto_alegre_rules()[0], &alphabet).unwrap();
    let out = stage.apply(&alphabet.tokenize("chato").unwrap()).unwrap();
    assert_eq!(alphabet.render(&out), "ʃato");

    // Splitting the digraph into separate stages gives a different answer:
    // silent h first leaves a bare c that is later read as k.
    let split = CascadeBuilder::new(Alphabet::portuguese())
        .rule(RewriteRule::new("h → ∅", [Alternative::new("h", "")]))
        .rule(RewriteRule::new("ch → ʃ", [Alternative::new("ch", "ʃ")]))
        .build()
        .unwrap();
    assert_eq!(split.transduce("chato").unwrap(), "cato");
    assert_eq!(transduce("chato").unwrap(), "ʃatu");
}

#[test]
fn test_plural_s_is_not_disambiguated() {
    // Lexical final s is treated like a plural marker
    assert_eq!(transduce("lapis").unwrap(), "lapis");
    assert_eq!(transduce("ontes").unwrap(), "õtʃis");
}

#[test]
fn test_concurrent_callers_agree() {
    let words = ["casa", "carro", "não", "verdade", "rápido", "maçã"];
    let expected: Vec<String> = words.iter().map(|w| transduce(w).unwrap()).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| words.iter().map(|w| transduce(w).unwrap()).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_transduce_all_batch() {
    let cascade = porto_alegre().unwrap();
    let results: Vec<_> = cascade
        .transduce_all(["vez", "", "x y", "luz"])
        .collect();
    assert_eq!(results[0].as_deref(), Ok("ves"));
    assert_eq!(results[1].as_deref(), Ok(""));
    assert!(matches!(
        results[2],
        Err(RewriteError::UnsupportedSymbol { found: ' ', offset: 1 })
    ));
    assert_eq!(results[3].as_deref(), Ok("lus"));
}

#[cfg(feature = "serde")]
#[test]
fn test_rules_roundtrip_through_json() {
    let rules = porto_alegre_rules();
    let json = serde_json::to_string(&rules).unwrap();
    let loaded: Vec<RewriteRule> = serde_json::from_str(&json).unwrap();
    let cascade = CascadeBuilder::new(Alphabet::portuguese())
        .rules(loaded)
        .build()
        .unwrap();
    for (stage, rule) in cascade.stages().iter().zip(&rules) {
        assert_eq!(stage.source(), rule);
    }
    assert_eq!(cascade.transduce("carro").unwrap(), "kaʁu");
}

proptest! {
    #[test]
    fn prop_repeated_calls_identical(word in "[a-zçáãâ]{0,20}") {
        let first = transduce(&word);
        let second = transduce(&word);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_output_symbols_in_alphabet(word in "[a-zçáãâ]{0,20}") {
        let cascade = porto_alegre().unwrap();
        let output = cascade.transduce(&word).unwrap();
        prop_assert!(cascade.alphabet().tokenize(&output).is_ok());
    }

    #[test]
    fn prop_trace_ends_at_transduce_output(word in "[a-zçáãâ]{1,20}") {
        let cascade = porto_alegre().unwrap();
        let output = cascade.transduce(&word).unwrap();
        let steps = cascade.trace(&word).unwrap();
        let last = steps.last().map(|s| s.output.clone()).unwrap_or_else(|| word.clone());
        prop_assert_eq!(last, output);
    }

    #[test]
    fn prop_no_orthographic_residue(word in "[a-zçáãâ]{0,20}") {
        // Symbols every stage consumes unconditionally never survive
        let output = transduce(&word).unwrap();
        for gone in ["h", "á", "ã", "â", "ç"] {
            prop_assert!(!output.contains(gone), "{:?} -> {:?}", word, output);
        }
    }
}
