// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Word vocabulary shared by the search normalizer and the chord parser.
//!
//! Both passes rewrite spelled-out words ("sharp", "minor", ...) into
//! symbols. They differ only in the target form, so one table carries both.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// Which caller the replacement targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Search index keys
    Search,
    /// Chord tokens
    Chord,
}

/// A spelled-out word and its symbolic forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordForm {
    pub word: &'static str,
    pub search: &'static str,
    pub chord: &'static str,
    /// Accidental words attach to a note letter
    pub accidental: bool,
}

impl WordForm {
    /// Replacement for the given style
    pub fn target(&self, style: Style) -> &'static str {
        match style {
            Style::Search => self.search,
            Style::Chord => self.chord,
        }
    }
}

/// Replacement table, applied in order
pub const VOCABULARY: [WordForm; 6] = [
    WordForm { word: "sharp", search: "#", chord: "#", accidental: true },
    WordForm { word: "flat", search: "b", chord: "b", accidental: true },
    WordForm { word: "major", search: "maj", chord: "maj", accidental: false },
    WordForm { word: "minor", search: "m", chord: "m", accidental: false },
    WordForm { word: "diminished", search: "dim", chord: "dim", accidental: false },
    WordForm { word: "augmented", search: "+", chord: "aug", accidental: false },
];

static WORD_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn word_patterns() -> &'static [Regex] {
    WORD_PATTERNS.get_or_init(|| {
        VOCABULARY
            .iter()
            .map(|form| {
                Regex::new(&format!("(?i){}", regex::escape(form.word)))
                    .expect("invalid vocabulary pattern")
            })
            .collect()
    })
}

/// Look up a word (case-insensitive)
pub fn lookup(word: &str) -> Option<&'static WordForm> {
    VOCABULARY
        .iter()
        .find(|form| form.word.eq_ignore_ascii_case(word))
}

/// Replace every vocabulary word in `text`, case-insensitively.
///
/// Accidental words are skipped unless `include_accidentals` is set.
pub fn replace_words(text: &str, style: Style, include_accidentals: bool) -> String {
    let mut out = text.to_string();
    for (form, pattern) in VOCABULARY.iter().zip(word_patterns()) {
        if form.accidental && !include_accidentals {
            continue;
        }
        out = pattern
            .replace_all(&out, NoExpand(form.target(style)))
            .into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_differ_only_for_augmented() {
        for form in VOCABULARY.iter() {
            if form.word == "augmented" {
                assert_ne!(form.target(Style::Search), form.target(Style::Chord));
            } else {
                assert_eq!(form.target(Style::Search), form.target(Style::Chord));
            }
        }
    }

    #[test]
    fn test_replace_words() {
        assert_eq!(replace_words("CMajor7", Style::Chord, true), "Cmaj7");
        assert_eq!(replace_words("a augmented", Style::Search, false), "a +");
        assert_eq!(replace_words("a augmented", Style::Chord, false), "a aug");
        assert_eq!(replace_words("F sharp", Style::Chord, true), "F #");
        assert_eq!(replace_words("F sharp", Style::Search, false), "F sharp");
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("FLAT").map(|f| f.search), Some("b"));
        assert!(lookup("sus").is_none());
    }
}
