//! Slang lexicon override
//!
//! Idioms such as "crushing it" or a skull emoji are routinely mis-scored by
//! both the classifier and the similarity check. These exact-match lists run
//! last and force the sentiment when a phrase appears anywhere in the
//! lower-cased text. The positive list is checked first and wins ties.

use crate::types::Sentiment;
use journal_common::config::LexiconConfig;

/// Built-in positive-coded phrases
pub const POSITIVE_SLANG: &[&str] = &[
    "killing it", "killed it", "kill it", "crushing it", "crushed it", "crush it",
    "slay", "slayed", "slaying", "fire", "🔥", "on fire", "went crazy", "go crazy",
    "going crazy", "pop off", "popped off", "popping off", "ate", "ate that",
    "ate it up", "ate and left no crumbs", "slayed so hard", "so proud of myself",
    "i did amazing", "i’ll do amazing", "i’m about to crush it", "i’m about to kill it",
    "winning today", "i won today", "today was a win", "feeling unstoppable",
    "feeling great", "feeling good", "good vibes", "big w", "major w", "huge w",
];

/// Built-in negative-coded phrases
pub const NEGATIVE_SLANG: &[&str] = &[
    "done with today", "so done", "i'm done", "im done", "i’m so done", "over this",
    "over it", "fed up", "can’t do this", "cant do this", "💀", "dead", "i'm dead",
    "had me crying", "i'm losing it", "losing it", "lost it today", "i can't anymore",
    "cant anymore", "i can't", "i literally can't", "bad vibes", "today was an l",
    "took an l", "taking an l", "huge l", "major l", "burnt out", "so stressed",
    "i hate today", "today sucked", "it sucked", "this sucks", "sucks so bad",
    "feels awful", "feeling terrible", "having a rough one", "rough day",
    "today bodied me", "i got wrecked today",
];

/// Ordered positive/negative phrase lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlangLexicon {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl SlangLexicon {
    /// Build from phrase lists (phrases are lower-cased; blanks dropped)
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        let normalize = |phrases: Vec<String>| -> Vec<String> {
            phrases
                .into_iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.trim().is_empty())
                .collect()
        };
        Self {
            positive: normalize(positive),
            negative: normalize(negative),
        }
    }

    /// The built-in lists
    pub fn builtin() -> Self {
        let owned = |phrases: &[&str]| phrases.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        Self::new(owned(POSITIVE_SLANG), owned(NEGATIVE_SLANG))
    }

    /// Built-in lists, with either side replaced when configured
    pub fn from_config(config: &LexiconConfig) -> Self {
        let builtin = Self::builtin();
        Self::new(
            config.positive.clone().unwrap_or(builtin.positive),
            config.negative.clone().unwrap_or(builtin.negative),
        )
    }

    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    /// Forced sentiment for already lower-cased text, if any phrase matches
    pub fn override_for(&self, lowered: &str) -> Option<Sentiment> {
        if self.positive.iter().any(|p| lowered.contains(p.as_str())) {
            Some(Sentiment::Positive)
        } else if self.negative.iter().any(|p| lowered.contains(p.as_str())) {
            Some(Sentiment::Negative)
        } else {
            None
        }
    }
}

impl Default for SlangLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_phrase_matches() {
        let lexicon = SlangLexicon::builtin();
        assert_eq!(
            lexicon.override_for("i'm killing it today"),
            Some(Sentiment::Positive)
        );
        assert_eq!(lexicon.override_for("that set was 🔥"), Some(Sentiment::Positive));
    }

    #[test]
    fn test_negative_phrase_matches() {
        let lexicon = SlangLexicon::builtin();
        assert_eq!(
            lexicon.override_for("bro i'm done with today 💀"),
            Some(Sentiment::Negative)
        );
        assert_eq!(lexicon.override_for("so stressed rn"), Some(Sentiment::Negative));
    }

    #[test]
    fn test_positive_wins_when_both_match() {
        let lexicon = SlangLexicon::builtin();
        assert_eq!(
            lexicon.override_for("feeling good but also burnt out"),
            Some(Sentiment::Positive)
        );
    }

    #[test]
    fn test_no_match() {
        let lexicon = SlangLexicon::builtin();
        assert_eq!(lexicon.override_for("went for a walk by the river"), None);
    }

    #[test]
    fn test_config_replaces_one_side_only() {
        let config = LexiconConfig {
            positive: Some(vec!["Banger".to_string(), "  ".to_string()]),
            negative: None,
        };
        let lexicon = SlangLexicon::from_config(&config);

        assert_eq!(lexicon.positive(), &["banger".to_string()]);
        assert_eq!(lexicon.negative().len(), NEGATIVE_SLANG.len());
        assert_eq!(lexicon.override_for("this song is a banger"), Some(Sentiment::Positive));
        assert_eq!(lexicon.override_for("killing it"), None);
    }
}
