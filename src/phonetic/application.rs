//! Single-pass application of a compiled rewrite stage.
//!
//! # Semantics
//!
//! A stage rewrites its input in one left-to-right scan:
//!
//! - **Obligatory**: every position where an alternative matches is rewritten.
//! - **Leftmost, non-overlapping**: after a match the scan resumes right after
//!   the consumed *source* span; replacement text is never rescanned.
//! - **Longest alternative wins** at a position, so digraphs such as `ch` take
//!   precedence over a single-symbol alternative such as `h`.
//! - **Contexts read the stage input**: a rewrite made earlier in the same
//!   pass never enables or blocks a later match.
//!
//! # Functions
//!
//! - [`CompiledRule::can_apply_at`] - Check a single alternative at a position
//! - [`CompiledRule::find_match_at`] - Select the alternative that fires at a position
//! - [`CompiledRule::find_first_match_from`] - Scan for the next firing position
//! - [`CompiledRule::apply`] - Rewrite a whole string

use super::alphabet::Symbol;
use super::compiler::{CompiledAlternative, CompiledRule};
use super::error::RewriteError;
use super::matching::pattern_matches_at;

impl CompiledRule {
    /// Check if `alt` matches at `pos` with both contexts satisfied.
    #[inline]
    pub fn can_apply_at(&self, alt: &CompiledAlternative, s: &[Symbol], pos: usize) -> bool {
        pattern_matches_at(&alt.pattern, s, pos)
            && self.left.matches_left(s, pos)
            && self.right.matches_right(s, pos + alt.pattern.len())
    }

    /// Select the alternative that fires at `pos`, if any.
    ///
    /// Candidates are tried longest first. Should two candidates of the same
    /// length match with different replacements, the stage cannot decide and
    /// reports [`RewriteError::Ambiguous`]. Compilation rules that out; the
    /// check stays as a guard.
    pub fn find_match_at(
        &self,
        s: &[Symbol],
        pos: usize,
    ) -> Result<Option<&CompiledAlternative>, RewriteError> {
        let Some(candidates) = s.get(pos).and_then(|first| self.by_first.get(first)) else {
            return Ok(None);
        };

        let mut best: Option<&CompiledAlternative> = None;
        for &i in candidates {
            let alt = &self.alternatives[i];
            if let Some(found) = best {
                if alt.pattern.len() < found.pattern.len() {
                    break;
                }
            }
            if !self.can_apply_at(alt, s, pos) {
                continue;
            }
            match best {
                None => best = Some(alt),
                Some(found) if found.replacement == alt.replacement => {}
                Some(_) => {
                    return Err(RewriteError::Ambiguous {
                        rule: self.name().to_string(),
                        position: pos,
                    })
                }
            }
        }

        Ok(best)
    }

    /// Find the first position `>= start_pos` where the stage fires.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((pos, alt)))` for the leftmost firing position
    /// - `Ok(None)` if nothing fires from `start_pos` onward
    pub fn find_first_match_from(
        &self,
        s: &[Symbol],
        start_pos: usize,
    ) -> Result<Option<(usize, &CompiledAlternative)>, RewriteError> {
        for pos in start_pos..s.len() {
            if let Some(alt) = self.find_match_at(s, pos)? {
                return Ok(Some((pos, alt)));
            }
        }
        Ok(None)
    }

    /// Rewrite `s`, returning the stage output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use portuguese_g2p::phonetic::{compile, Alphabet, Alternative, RewriteRule};
    ///
    /// let alphabet = Alphabet::portuguese();
    /// let rule = RewriteRule::new(
    ///     "digraphs",
    ///     [Alternative::new("ch", "ʃ"), Alternative::new("h", "")],
    /// );
    /// let stage = compile(&rule, &alphabet).unwrap();
    ///
    /// let out = stage.apply(&alphabet.tokenize("chaho").unwrap()).unwrap();
    /// assert_eq!(alphabet.render(&out), "ʃao");
    /// ```
    pub fn apply(&self, s: &[Symbol]) -> Result<Vec<Symbol>, RewriteError> {
        self.apply_counted(s).map(|(out, _)| out)
    }

    /// Rewrite `s` and report how many spans were rewritten.
    pub fn apply_counted(&self, s: &[Symbol]) -> Result<(Vec<Symbol>, usize), RewriteError> {
        let mut out = Vec::with_capacity(s.len() + 4);
        let mut pos = 0;
        let mut fired = 0;

        while let Some((at, alt)) = self.find_first_match_from(s, pos)? {
            out.extend_from_slice(&s[pos..at]);
            out.extend_from_slice(&alt.replacement);
            pos = at + alt.pattern.len();
            fired += 1;
        }
        out.extend_from_slice(&s[pos..]);

        Ok((out, fired))
    }
}
