// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord-name parsing and search-query normalization.
//!
//! The predictive parser reads half-typed accidentals ("gsh", "bfl") as
//! complete ones. Because "b" is both a letter and a flat, and "s"/"f" can
//! start a quality suffix, the predictive patterns are tried in a fixed
//! order and only the first match is applied.

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::vocabulary::{lookup, replace_words, Style};
use crate::error::{Result, TheoryError};
use crate::music::pitch::normalize_accidentals;

/// Prefix patterns for partially typed accidentals, sharps first
const PREDICTIVE_PATTERNS: [(&str, &str); 4] = [
    (r"(?i)^([a-g])s(?:harp|har|ha|h)?", "#"),
    (r"(?i)^([a-g]) s(?:harp|har|ha|h)?", "#"),
    (r"(?i)^([a-g])f(?:lat|la|l)?", "b"),
    (r"(?i)^([a-g]) f(?:lat|la|l)?", "b"),
];

const ROOT_PATTERN: &str = r"^([A-Ga-g](?:bb|##|b|#)?)(.*)$";

static PREDICTIVE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
static ROOT: OnceLock<Regex> = OnceLock::new();
static SEPARATORS: OnceLock<Regex> = OnceLock::new();
static SPELLED_ACCIDENTAL: OnceLock<Regex> = OnceLock::new();

fn predictive_patterns() -> &'static [(Regex, &'static str)] {
    PREDICTIVE.get_or_init(|| {
        PREDICTIVE_PATTERNS
            .iter()
            .map(|(pattern, accidental)| {
                (Regex::new(pattern).expect("invalid predictive pattern"), *accidental)
            })
            .collect()
    })
}

fn root_regex() -> &'static Regex {
    ROOT.get_or_init(|| Regex::new(ROOT_PATTERN).expect("invalid root pattern"))
}

fn separators_regex() -> &'static Regex {
    SEPARATORS.get_or_init(|| Regex::new(r"[-_.,\s]+").expect("invalid separator pattern"))
}

fn spelled_accidental_regex() -> &'static Regex {
    SPELLED_ACCIDENTAL.get_or_init(|| {
        Regex::new(r"\b([a-g]) ?(sharp|flat)").expect("invalid accidental pattern")
    })
}

/// A chord token split into root and quality
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedChord {
    /// Capitalized letter plus accidental, e.g. "Bb"
    pub root: String,
    /// Everything after the root, e.g. "m7"
    pub quality: String,
}

impl ParsedChord {
    /// Full chord name
    pub fn name(&self) -> String {
        format!("{}{}", self.root, self.quality)
    }
}

impl fmt::Display for ParsedChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality)
    }
}

/// Rewrite the first matching half-typed accidental, if any
fn apply_predictive(text: &str) -> String {
    for (pattern, accidental) in predictive_patterns() {
        if let Some(caps) = pattern.captures(text) {
            let end = caps.get(0).map_or(0, |m| m.end());
            return format!("{}{}{}", &caps[1], accidental, &text[end..]);
        }
    }
    text.to_string()
}

fn capitalize_root(root: &str) -> String {
    let mut chars = root.chars();
    match chars.next() {
        Some(letter) => format!("{}{}", letter.to_ascii_uppercase(), chars.as_str().to_lowercase()),
        None => String::new(),
    }
}

/// Parse one chord token, reporting why it failed.
///
/// An "s" or "f" right after the root letter is always read as a half-typed
/// accidental, so "Csus4" parses as root "C#" with quality "us4". Suspended
/// chords therefore do not survive parsing or transposition intact.
pub fn try_parse_chord(token: &str) -> Result<ParsedChord> {
    let text = normalize_accidentals(token.trim());
    if text.is_empty() {
        return Err(TheoryError::UnparseableChord(token.to_string()));
    }

    let text = apply_predictive(&text);
    let text = replace_words(&text, Style::Chord, true);

    let caps = root_regex()
        .captures(&text)
        .ok_or_else(|| TheoryError::UnparseableChord(token.to_string()))?;

    let parsed = ParsedChord {
        root: capitalize_root(&caps[1]),
        quality: caps[2].to_string(),
    };
    debug!(token, root = %parsed.root, quality = %parsed.quality, "parsed chord");
    Ok(parsed)
}

/// Parse one chord token; `None` means the token is not a chord.
///
/// Same reading as [`try_parse_chord`]: "Csus4" yields root "C#", quality "us4".
pub fn parse_chord(token: &str) -> Option<ParsedChord> {
    try_parse_chord(token).ok()
}

fn normalize_once(query: &str) -> String {
    let text = normalize_accidentals(&query.to_lowercase());
    let text = separators_regex().replace_all(&text, " ");
    let text = spelled_accidental_regex().replace_all(text.trim(), |caps: &Captures| {
        let symbol = lookup(&caps[2]).map_or("", |form| form.target(Style::Search));
        format!("{}{}", &caps[1], symbol)
    });
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    replace_words(&text, Style::Search, false)
}

/// Normalize free text into a search key.
///
/// Lossy on purpose: "C Sharp Minor", "c#m" and "C♯ minor" all become "c#m".
/// The result is a fixed point, so normalizing it again changes nothing.
pub fn normalize_search_query(query: &str) -> String {
    let mut current = normalize_once(query);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(token: &str) -> (String, String) {
        let chord = parse_chord(token).unwrap();
        (chord.root, chord.quality)
    }

    #[test]
    fn test_predictive_sharp() {
        assert_eq!(parsed("gsh"), ("G#".to_string(), String::new()));
        assert_eq!(parsed("cShArP"), ("C#".to_string(), String::new()));
        assert_eq!(parsed("fsharpm7"), ("F#".to_string(), "m7".to_string()));
        assert_eq!(parsed("as"), ("A#".to_string(), String::new()));
    }

    #[test]
    fn test_predictive_flat() {
        assert_eq!(parsed("bfl7"), ("Bb".to_string(), "7".to_string()));
        assert_eq!(parsed("eflatm"), ("Eb".to_string(), "m".to_string()));
        assert_eq!(parsed("Af"), ("Ab".to_string(), String::new()));
    }

    #[test]
    fn test_predictive_with_space() {
        assert_eq!(parsed("c sharp"), ("C#".to_string(), String::new()));
        assert_eq!(parsed("d fla"), ("Db".to_string(), String::new()));
    }

    #[test]
    fn test_first_match_wins() {
        // "s" right after the letter always reads as a sharp
        assert_eq!(parsed("Csus4"), ("C#".to_string(), "us4".to_string()));
        // Only one predictive rewrite is applied
        assert_eq!(parsed("bfsh"), ("Bb".to_string(), "sh".to_string()));
    }

    #[test]
    fn test_plain_chords() {
        assert_eq!(parsed("C#maj7"), ("C#".to_string(), "maj7".to_string()));
        assert_eq!(parsed("Bbm7"), ("Bb".to_string(), "m7".to_string()));
        assert_eq!(parsed("F##"), ("F##".to_string(), String::new()));
        assert_eq!(parsed("Abb"), ("Abb".to_string(), String::new()));
        assert_eq!(parsed("am"), ("A".to_string(), "m".to_string()));
        assert_eq!(parsed("E♭7"), ("Eb".to_string(), "7".to_string()));
    }

    #[test]
    fn test_word_replacements() {
        assert_eq!(parsed("Cminor"), ("C".to_string(), "m".to_string()));
        assert_eq!(parsed("DMAJOR7"), ("D".to_string(), "maj7".to_string()));
        assert_eq!(parsed("Gaugmented"), ("G".to_string(), "aug".to_string()));
        assert_eq!(parsed("Bdiminished"), ("B".to_string(), "dim".to_string()));
    }

    #[test]
    fn test_not_a_chord() {
        assert!(parse_chord("").is_none());
        assert!(parse_chord("   ").is_none());
        assert!(parse_chord("|").is_none());
        assert!(parse_chord("N.C.").is_none());
        assert_eq!(
            try_parse_chord("xyz"),
            Err(TheoryError::UnparseableChord("xyz".to_string()))
        );
    }

    #[test]
    fn test_parsed_chord_name() {
        let chord = parse_chord("bfl7").unwrap();
        assert_eq!(chord.name(), "Bb7");
        assert_eq!(chord.to_string(), "Bb7");
    }

    #[test]
    fn test_normalize_search_query() {
        assert_eq!(normalize_search_query("C Sharp Minor"), "c#m");
        assert_eq!(normalize_search_query("c#m"), "c#m");
        assert_eq!(normalize_search_query("C♯ minor"), "c#m");
        assert_eq!(normalize_search_query("B-flat major 7"), "bbmaj7");
        assert_eq!(normalize_search_query("F_diminished"), "fdim");
        assert_eq!(normalize_search_query("E augmented"), "e+");
        assert_eq!(normalize_search_query("  a,  b.  c  "), "abc");
        // Spelled accidentals directly followed by a suffix
        assert_eq!(normalize_search_query("B flat7"), "bb7");
        assert_eq!(normalize_search_query("bflat7"), "bb7");
        assert_eq!(normalize_search_query("Bb7"), "bb7");
        assert_eq!(normalize_search_query("fsharpminor"), "f#m");
        assert_eq!(normalize_search_query(""), "");
    }

    #[test]
    fn test_normalize_search_query_idempotent() {
        let inputs = [
            "C Sharp Minor",
            "B-flat major 7",
            "minorinor",
            "majorjor",
            "g  FLAT  augmented",
            "D♭ dim",
            "Am7/G",
            "csharp",
            "B flat7",
            "bflat7",
            "fsharpminor",
            "weird---input__here",
        ];
        for input in inputs {
            let once = normalize_search_query(input);
            assert_eq!(normalize_search_query(&once), once, "{}", input);
        }
    }
}
