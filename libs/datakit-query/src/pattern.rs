//! Pattern escaping codec for LIKE-style text matching.
//!
//! Patterns are stored in a canonical three-symbol language: `_` matches a
//! single character, `%` matches any run of characters, and an escape
//! character (canonically `\`) makes the following character literal. The
//! factories either escape literal text fully ([`Pattern::literal`],
//! [`Pattern::prefix`], [`Pattern::suffix`], [`Pattern::substring`]) or
//! translate a caller-supplied wildcard alphabet into the canonical one
//! ([`Pattern::translated`]).

use std::fmt;

use crate::errors::Error;

/// Canonical single-character wildcard.
pub const CHAR_WILDCARD: char = '_';

/// Canonical multi-character wildcard.
pub const STRING_WILDCARD: char = '%';

/// Canonical escape character.
pub const DEFAULT_ESCAPE: char = '\\';

/// An immutable, canonically escaped text pattern.
///
/// Invariant: every literal occurrence of `_`, `%`, and the escape character
/// appears escape-prefixed in [`as_str`](Pattern::as_str). Escaping is not
/// idempotent; callers must not feed an already-canonical pattern back
/// through [`Pattern::literal`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pattern: String,
    escape: char,
}

impl Pattern {
    /// A pattern matching exactly `text` and nothing else.
    ///
    /// Every wildcard and escape character in `text` is escaped, so no
    /// wildcard matching is possible in the result.
    pub fn literal(text: impl AsRef<str>) -> Self {
        Self {
            pattern: escape_literal(text.as_ref(), DEFAULT_ESCAPE),
            escape: DEFAULT_ESCAPE,
        }
    }

    /// A pattern matching values that start with `text`.
    pub fn prefix(text: impl AsRef<str>) -> Self {
        let mut pattern = escape_literal(text.as_ref(), DEFAULT_ESCAPE);
        pattern.push(STRING_WILDCARD);
        Self {
            pattern,
            escape: DEFAULT_ESCAPE,
        }
    }

    /// A pattern matching values that end with `text`.
    pub fn suffix(text: impl AsRef<str>) -> Self {
        let mut pattern = String::with_capacity(text.as_ref().len() + 1);
        pattern.push(STRING_WILDCARD);
        pattern.push_str(&escape_literal(text.as_ref(), DEFAULT_ESCAPE));
        Self {
            pattern,
            escape: DEFAULT_ESCAPE,
        }
    }

    /// A pattern matching values that contain `text` anywhere.
    pub fn substring(text: impl AsRef<str>) -> Self {
        let mut pattern = String::with_capacity(text.as_ref().len() + 2);
        pattern.push(STRING_WILDCARD);
        pattern.push_str(&escape_literal(text.as_ref(), DEFAULT_ESCAPE));
        pattern.push(STRING_WILDCARD);
        Self {
            pattern,
            escape: DEFAULT_ESCAPE,
        }
    }

    /// A pattern already written in the canonical alphabet.
    ///
    /// `_`, `%`, and `\` keep their canonical meaning; the input is stored
    /// unchanged.
    pub fn wildcard(raw: impl Into<String>) -> Self {
        Self {
            pattern: raw.into(),
            escape: DEFAULT_ESCAPE,
        }
    }

    /// Translate a pattern written with caller-chosen wildcard characters
    /// into the canonical alphabet.
    ///
    /// `char_wildcard` emits `_`, `string_wildcard` emits `%`; canonical
    /// reserved characters appearing literally in `raw` are escaped in the
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdenticalWildcards`] when both wildcard roles are
    /// given the same character.
    pub fn translated(
        raw: impl AsRef<str>,
        char_wildcard: char,
        string_wildcard: char,
    ) -> Result<Self, Error> {
        Self::translated_with_escape(raw, char_wildcard, string_wildcard, DEFAULT_ESCAPE)
    }

    /// Like [`Pattern::translated`] but producing a pattern that uses a
    /// custom escape character.
    ///
    /// The original wildcarded text is recoverable through
    /// [`unescaped`](Pattern::unescaped) only when `escape` is the canonical
    /// `\`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IdenticalWildcards`] when both wildcard roles are
    /// given the same character, and [`Error::EscapeIsWildcard`] when the
    /// escape character collides with either wildcard.
    pub fn translated_with_escape(
        raw: impl AsRef<str>,
        char_wildcard: char,
        string_wildcard: char,
        escape: char,
    ) -> Result<Self, Error> {
        if char_wildcard == string_wildcard {
            return Err(Error::IdenticalWildcards(char_wildcard));
        }
        if escape == char_wildcard || escape == string_wildcard {
            return Err(Error::EscapeIsWildcard(escape));
        }
        let mut pattern = String::with_capacity(raw.as_ref().len());
        for c in raw.as_ref().chars() {
            if c == char_wildcard {
                pattern.push(CHAR_WILDCARD);
            } else if c == string_wildcard {
                pattern.push(STRING_WILDCARD);
            } else {
                if c == CHAR_WILDCARD || c == STRING_WILDCARD || c == escape {
                    pattern.push(escape);
                }
                pattern.push(c);
            }
        }
        Ok(Self { pattern, escape })
    }

    /// The canonical escaped pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The escape character in effect within [`as_str`](Pattern::as_str).
    #[must_use]
    pub fn escape(&self) -> char {
        self.escape
    }

    /// Recover the wildcarded text with escape prefixes removed.
    ///
    /// Available only when the escape character is the canonical `\`; for a
    /// custom escape the translation is lossy (a literal backslash and a
    /// re-escaped one are indistinguishable), so `None` is returned rather
    /// than a guess.
    #[must_use]
    pub fn unescaped(&self) -> Option<String> {
        if self.escape != DEFAULT_ESCAPE {
            return None;
        }
        let mut out = String::with_capacity(self.pattern.len());
        let mut chars = self.pattern.chars();
        while let Some(c) = chars.next() {
            if c == self.escape {
                match chars.next() {
                    Some(next) => out.push(next),
                    None => out.push(c),
                }
            } else {
                out.push(c);
            }
        }
        Some(out)
    }

    /// Case-sensitive reference match of `text` against this pattern.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.matches_folded(text, false)
    }

    /// Reference match with optional ASCII case folding.
    ///
    /// This is the oracle for the canonical wildcard semantics, not an
    /// execution engine: `%` backtracks over any run of characters, `_`
    /// consumes exactly one, and the escape character takes the next pattern
    /// character literally.
    #[must_use]
    pub fn matches_folded(&self, text: &str, ignore_case: bool) -> bool {
        let pat: Vec<char> = self.pattern.chars().collect();
        let txt: Vec<char> = text.chars().collect();
        match_inner(&pat, &txt, 0, 0, self.escape, ignore_case)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.pattern)
    }
}

fn escape_literal(text: &str, escape: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == CHAR_WILDCARD || c == STRING_WILDCARD || c == escape {
            out.push(escape);
        }
        out.push(c);
    }
    out
}

fn chars_equal(a: char, b: char, ignore_case: bool) -> bool {
    if ignore_case {
        a.eq_ignore_ascii_case(&b)
    } else {
        a == b
    }
}

fn match_inner(
    pat: &[char],
    txt: &[char],
    mut pi: usize,
    mut ti: usize,
    escape: char,
    ignore_case: bool,
) -> bool {
    while pi < pat.len() {
        let pc = pat[pi];

        if pc == escape {
            // Next pattern char is literal.
            pi += 1;
            if pi >= pat.len() || ti >= txt.len() {
                return false;
            }
            if !chars_equal(pat[pi], txt[ti], ignore_case) {
                return false;
            }
            pi += 1;
            ti += 1;
            continue;
        }

        match pc {
            STRING_WILDCARD => {
                while pi < pat.len() && pat[pi] == STRING_WILDCARD {
                    pi += 1;
                }
                if pi >= pat.len() {
                    return true;
                }
                for start in ti..=txt.len() {
                    if match_inner(pat, txt, pi, start, escape, ignore_case) {
                        return true;
                    }
                }
                return false;
            }
            CHAR_WILDCARD => {
                if ti >= txt.len() {
                    return false;
                }
                pi += 1;
                ti += 1;
            }
            _ => {
                if ti >= txt.len() || !chars_equal(pc, txt[ti], ignore_case) {
                    return false;
                }
                pi += 1;
                ti += 1;
            }
        }
    }
    ti >= txt.len()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn literal_escapes_reserved_characters() {
        let p = Pattern::literal("50%_off\\now");
        assert_eq!(p.as_str(), "50\\%\\_off\\\\now");
    }

    #[test]
    fn prefix_renders_quoted() {
        assert_eq!(Pattern::prefix("Hibernate").to_string(), "'Hibernate%'");
    }

    #[test]
    fn suffix_and_substring_place_wildcards() {
        assert_eq!(Pattern::suffix("Data").as_str(), "%Data");
        assert_eq!(Pattern::substring("kit").as_str(), "%kit%");
    }

    #[test]
    fn wildcard_keeps_canonical_pattern_unchanged() {
        assert_eq!(Pattern::wildcard("JHM___E%").as_str(), "JHM___E%");
    }

    #[test]
    fn translated_maps_custom_wildcards() {
        let p = Pattern::translated("JHM???F*", '?', '*').unwrap();
        assert_eq!(p.as_str(), "JHM___F%");
    }

    #[test]
    fn translated_escapes_reserved_output_characters() {
        let p = Pattern::translated("100%?", '?', '*').unwrap();
        assert_eq!(p.as_str(), "100\\%_");
    }

    #[test]
    fn identical_wildcards_are_rejected_eagerly() {
        assert_eq!(
            Pattern::translated("x", '?', '?').unwrap_err(),
            Error::IdenticalWildcards('?')
        );
    }

    #[test]
    fn escape_colliding_with_wildcard_is_rejected() {
        let err = Pattern::translated_with_escape("x", '?', '*', '?').unwrap_err();
        assert_eq!(err, Error::EscapeIsWildcard('?'));
    }

    #[test]
    fn unescaped_round_trips_literals() {
        for text in ["plain", "50%_off", "a\\b", "", "___"] {
            assert_eq!(Pattern::literal(text).unescaped().unwrap(), text);
        }
    }

    #[test]
    fn unescaped_unavailable_for_custom_escape() {
        let p = Pattern::translated_with_escape("a?b", '?', '*', '!').unwrap();
        assert_eq!(p.unescaped(), None);
    }

    #[test]
    fn escaped_literal_matches_only_itself() {
        let p = Pattern::literal("50%_off");
        assert!(p.matches("50%_off"));
        assert!(!p.matches("50x_off"));
        assert!(!p.matches("50%xoff"));
        assert!(!p.matches("50% off extended"));
    }

    #[test]
    fn wildcards_match_per_canonical_semantics() {
        let p = Pattern::wildcard("JHM___E%");
        assert!(p.matches("JHM123E"));
        assert!(p.matches("JHM123Experiment"));
        assert!(!p.matches("JHM12E"));

        assert!(Pattern::prefix("Hib").matches("Hibernate"));
        assert!(Pattern::suffix("ate").matches("Hibernate"));
        assert!(Pattern::substring("berna").matches("Hibernate"));
        assert!(!Pattern::substring("berna").matches("Hiberate"));
    }

    #[test]
    fn matching_can_fold_ascii_case() {
        let p = Pattern::prefix("hib");
        assert!(!p.matches("Hibernate"));
        assert!(p.matches_folded("Hibernate", true));
    }

    #[test]
    fn consecutive_string_wildcards_collapse() {
        assert!(Pattern::wildcard("a%%b").matches("ab"));
        assert!(Pattern::wildcard("a%%b").matches("axyzb"));
    }
}
