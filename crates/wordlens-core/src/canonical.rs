use regex::Regex;

use crate::types::Definition;

const PLURAL_MARKER: &str = "Plural form of ";
const REFERENCE_PATTERN: &str = r"^See also ([\w ]+)[.,]";

/// Outcome of inspecting a definition set for one queried word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The queried word is itself the authoritative entry.
    Canonical,
    /// First definition is a "plural form of X" stub pointing at the lemma.
    RedirectPlural { target: String },
    /// First definition is a "see also X" cross-reference.
    RedirectReference { target: String },
    /// No definitions at all; the word should be discarded, not redirected.
    Empty,
}

impl Classification {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Classification::RedirectPlural { target }
            | Classification::RedirectReference { target } => Some(target),
            _ => None,
        }
    }
}

/// The two redirect marker patterns, held as data so synthetic rule sets
/// can be swapped in for tests.
pub struct RedirectRules {
    plural_marker: String,
    reference: Regex,
}

impl RedirectRules {
    pub fn new(plural_marker: &str, reference_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            plural_marker: plural_marker.to_string(),
            reference: Regex::new(reference_pattern)?,
        })
    }

    /// Classify a word against its definition set. Pure, no I/O.
    ///
    /// Only the first definition's text is inspected; whether a redirect is
    /// actually followed (target differs from the queried word by exact
    /// string comparison) is the caller's decision.
    pub fn classify(&self, _word: &str, definitions: &[Definition]) -> Classification {
        let Some(first) = definitions.first() else {
            return Classification::Empty;
        };

        if let Some(rest) = first.text.strip_prefix(&self.plural_marker) {
            if let Some(lemma) = first_lemma_token(rest) {
                return Classification::RedirectPlural {
                    target: lemma.to_string(),
                };
            }
        }

        if let Some(caps) = self.reference.captures(&first.text) {
            return Classification::RedirectReference {
                target: caps[1].to_string(),
            };
        }

        Classification::Canonical
    }
}

impl Default for RedirectRules {
    fn default() -> Self {
        // Both patterns are fixed and known-valid.
        Self::new(PLURAL_MARKER, REFERENCE_PATTERN).unwrap()
    }
}

/// First whitespace-delimited token with trailing punctuation stripped.
fn first_lemma_token(rest: &str) -> Option<&str> {
    let token = rest.split_whitespace().next()?;
    let lemma = token.trim_end_matches(|c: char| c.is_ascii_punctuation());
    (!lemma.is_empty()).then_some(lemma)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs(text: &str) -> Vec<Definition> {
        vec![Definition::new(text, Some("noun"))]
    }

    #[test]
    fn plural_stub_redirects_to_lemma() {
        let rules = RedirectRules::default();
        let classification = rules.classify("cacti", &defs("Plural form of cactus."));
        assert_eq!(
            classification,
            Classification::RedirectPlural {
                target: "cactus".to_string()
            }
        );
    }

    #[test]
    fn plural_target_keeps_inner_punctuation() {
        let rules = RedirectRules::default();
        let classification = rules.classify("will-o'-wisps", &defs("Plural form of will-o'-wisp."));
        assert_eq!(
            classification.redirect_target(),
            Some("will-o'-wisp"),
            "only trailing punctuation is stripped"
        );
    }

    #[test]
    fn see_also_redirects_to_captured_span() {
        let rules = RedirectRules::default();
        let classification = rules.classify(
            "bactrian-ref",
            &[Definition::new("See also dromedary.", None)],
        );
        assert_eq!(
            classification,
            Classification::RedirectReference {
                target: "dromedary".to_string()
            }
        );
    }

    #[test]
    fn see_also_capture_may_span_words() {
        let rules = RedirectRules::default();
        let classification = rules.classify("x", &defs("See also sea otter, a mustelid."));
        assert_eq!(classification.redirect_target(), Some("sea otter"));
    }

    #[test]
    fn ordinary_prose_is_canonical() {
        let rules = RedirectRules::default();
        let classification = rules.classify("cactus", &defs("A succulent plant of arid regions."));
        assert_eq!(classification, Classification::Canonical);
    }

    #[test]
    fn marker_must_be_a_prefix() {
        let rules = RedirectRules::default();
        let classification = rules.classify("x", &defs("The plural form of a noun."));
        assert_eq!(classification, Classification::Canonical);
    }

    #[test]
    fn only_first_definition_is_inspected() {
        let rules = RedirectRules::default();
        let definitions = vec![
            Definition::new("A spiny plant.", Some("noun")),
            Definition::new("Plural form of cactus.", Some("noun")),
        ];
        assert_eq!(rules.classify("cacti", &definitions), Classification::Canonical);
    }

    #[test]
    fn empty_set_is_empty_regardless_of_word() {
        let rules = RedirectRules::default();
        assert_eq!(rules.classify("anything", &[]), Classification::Empty);
        assert_eq!(rules.classify("", &[]), Classification::Empty);
    }

    #[test]
    fn custom_rules_are_data_not_code() {
        let rules = RedirectRules::new("Variant of ", r"^Compare ([\w ]+)[.,]").unwrap();
        assert_eq!(
            rules.classify("gray", &defs("Variant of grey.")).redirect_target(),
            Some("grey")
        );
        assert_eq!(
            rules.classify("x", &defs("Compare cheese.")).redirect_target(),
            Some("cheese")
        );
    }
}
