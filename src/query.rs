//! Builds a [`Pattern`] from a raw query string and the CLI-level matching
//! flags (`-e`, `-i`/`+i`) that select how atoms are parsed.

use needlefind_matcher::{CaseMatching, Normalization, Pattern};

/// How bare (unprefixed) query tokens are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Tokens without `'`/`^`/`$` run the fuzzy algorithm (the default).
    #[default]
    Fuzzy,
    /// `-e`/`--exact`: bare tokens run the substring algorithm instead.
    Exact,
}

/// Resolved case-matching policy; mirrors `-i`/`+i`/default-smart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    ForceIgnore,
    ForceRespect,
    #[default]
    Smart,
}

impl From<CaseMode> for CaseMatching {
    fn from(mode: CaseMode) -> Self {
        match mode {
            CaseMode::ForceIgnore => CaseMatching::Ignore,
            CaseMode::ForceRespect => CaseMatching::Respect,
            CaseMode::Smart => CaseMatching::Smart,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryConfig {
    pub case: CaseMode,
    pub mode: MatchMode,
}

impl QueryConfig {
    /// Parses `raw` into a [`Pattern`], splitting on unescaped whitespace
    /// and resolving each token's `!`/`'`/`^`/`$` modifiers per
    /// [`Atom::parse`](needlefind_matcher::Atom::parse) — unless `-e` forces
    /// every bare token to run as a literal substring match.
    pub fn parse(&self, raw: &str) -> Pattern {
        match self.mode {
            MatchMode::Fuzzy => Pattern::parse(self.case.into(), Normalization::Smart, raw),
            MatchMode::Exact => {
                let mut pattern = Pattern::parse(self.case.into(), Normalization::Smart, raw);
                for atom in &mut pattern.atoms {
                    if atom.kind == needlefind_matcher::AtomKind::Fuzzy {
                        let needle: String = atom.needle_text().chars().collect();
                        *atom = needlefind_matcher::Atom::new(
                            &needle,
                            self.case.into(),
                            Normalization::Smart,
                            needlefind_matcher::AtomKind::Substring,
                            false,
                        );
                    }
                }
                pattern
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use needlefind_matcher::AtomKind;

    #[test]
    fn fuzzy_mode_keeps_bare_tokens_fuzzy() {
        let config = QueryConfig::default();
        let pattern = config.parse("foo");
        assert_eq!(pattern.atoms[0].kind, AtomKind::Fuzzy);
    }

    #[test]
    fn exact_mode_downgrades_bare_tokens_to_substring() {
        let config = QueryConfig { mode: MatchMode::Exact, ..QueryConfig::default() };
        let pattern = config.parse("foo");
        assert_eq!(pattern.atoms[0].kind, AtomKind::Substring);
    }

    #[test]
    fn exact_mode_leaves_explicit_operators_alone() {
        let config = QueryConfig { mode: MatchMode::Exact, ..QueryConfig::default() };
        let pattern = config.parse("^foo");
        assert_eq!(pattern.atoms[0].kind, AtomKind::Prefix);
    }
}
