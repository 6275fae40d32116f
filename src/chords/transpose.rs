// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord progression transposition.
//!
//! Re-roots every chord token of a progression from one key to another.
//! Tokens that do not parse as chords pass through untouched, and a missing
//! dictionary entry only costs the token its note list.

use serde::Serialize;
use tracing::{debug, warn};

use super::dictionary::ChordDictionary;
use super::parser::parse_chord;
use crate::error::Result;
use crate::music::pitch::{
    interval, normalize_accidentals, note_to_pitch_class, pitch_class_to_note,
    should_show_alternate_spelling,
};
use crate::music::tables::prefers_flats;

/// One transposed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransposedChord {
    /// New chord name, or the original token if it was not a chord
    pub name: String,
    /// Notes from the dictionary, empty when unknown
    pub notes: Vec<String>,
    /// Enharmonic alternative from the dictionary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_notes: Option<Vec<String>>,
}

impl TransposedChord {
    fn passthrough(token: &str) -> Self {
        Self {
            name: token.to_string(),
            notes: Vec::new(),
            alt_notes: None,
        }
    }

    /// Whether the alternate spelling is worth displaying
    pub fn show_alternate(&self) -> bool {
        self.alt_notes
            .as_deref()
            .map_or(false, |alt| should_show_alternate_spelling(self.notes.as_slice(), alt))
    }
}

/// Semitones from one key to another (0-11)
pub fn semitone_delta(from_key: &str, to_key: &str) -> Result<i32> {
    let from = normalize_accidentals(from_key.trim());
    let to = normalize_accidentals(to_key.trim());
    interval(&from, &to).map(i32::from)
}

fn transpose_token<D>(token: &str, delta: i32, prefer_flats: bool, dictionary: &D) -> TransposedChord
where
    D: ChordDictionary + ?Sized,
{
    let Some(chord) = parse_chord(token) else {
        debug!(token, "not a chord, passing through");
        return TransposedChord::passthrough(token);
    };
    let Ok(root) = note_to_pitch_class(&chord.root) else {
        return TransposedChord::passthrough(token);
    };

    let new_root = pitch_class_to_note(root.transpose(delta), prefer_flats);
    let name = format!("{}{}", new_root, chord.quality);

    match dictionary.find_by_name(&name) {
        Some(entry) => TransposedChord {
            name,
            notes: entry.notes,
            alt_notes: entry.notes_enharmonic_alt,
        },
        None => {
            debug!(chord = %name, "no dictionary entry");
            TransposedChord {
                name,
                notes: Vec::new(),
                alt_notes: None,
            }
        }
    }
}

/// Transpose a whitespace-separated progression from `from_key` to `to_key`.
///
/// Chord roots move by the key distance and are respelled with flats when
/// the destination is a flat key; quality suffixes are kept verbatim.
pub fn transpose_progression<D>(
    raw_text: &str,
    from_key: &str,
    to_key: &str,
    dictionary: &D,
) -> Vec<TransposedChord>
where
    D: ChordDictionary + ?Sized,
{
    let text = normalize_accidentals(raw_text);
    if text.trim().is_empty() {
        return Vec::new();
    }

    let tokens = text.split_whitespace();
    let delta = match semitone_delta(from_key, to_key) {
        Ok(delta) => delta,
        Err(e) => {
            warn!(from_key, to_key, error = %e, "cannot transpose between these keys");
            return tokens.map(TransposedChord::passthrough).collect();
        }
    };
    let prefer_flats = prefers_flats(&normalize_accidentals(to_key));
    debug!(delta, prefer_flats, "transposing progression");

    tokens
        .map(|token| transpose_token(token, delta, prefer_flats, dictionary))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chords::dictionary::{ChordEntry, ChordLibrary};
    use std::collections::HashMap;

    fn names(chords: &[TransposedChord]) -> Vec<&str> {
        chords.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_transpose_c_to_d() {
        let library = ChordLibrary::builtin();
        let result = transpose_progression("C G Am F", "C", "D", &library);
        assert_eq!(names(&result), vec!["D", "A", "Bm", "G"]);
        assert_eq!(result[0].notes, vec!["D", "F#", "A"]);
        assert_eq!(result[2].notes, vec!["B", "D", "F#"]);
    }

    #[test]
    fn test_flat_destination() {
        let library = ChordLibrary::builtin();
        let result = transpose_progression("C Am7 Dm G7", "C", "Eb", &library);
        assert_eq!(names(&result), vec!["Eb", "Cm7", "Fm", "Bb7"]);
    }

    #[test]
    fn test_sharp_destination_respells_flats() {
        let empty: HashMap<String, ChordEntry> = HashMap::new();
        let result = transpose_progression("Bb Eb", "F", "G", &empty);
        assert_eq!(names(&result), vec!["C", "F"]);

        let result = transpose_progression("Db", "C", "D", &empty);
        assert_eq!(names(&result), vec!["D#"]);
    }

    #[test]
    fn test_dictionary_miss_keeps_name() {
        let mut dict = HashMap::new();
        dict.insert("D".to_string(), ChordEntry::new(["D", "F#", "A"]));
        let result = transpose_progression("C G", "C", "D", &dict);
        assert_eq!(result[0].notes, vec!["D", "F#", "A"]);
        assert_eq!(result[1].name, "A");
        assert!(result[1].notes.is_empty());
    }

    #[test]
    fn test_unparseable_tokens_pass_through() {
        let library = ChordLibrary::builtin();
        let result = transpose_progression("C | G N.C.", "C", "F", &library);
        assert_eq!(names(&result), vec!["F", "|", "C", "N.C."]);
        assert!(result[1].notes.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let library = ChordLibrary::builtin();
        assert!(transpose_progression("", "C", "D", &library).is_empty());
        assert!(transpose_progression("   \n ", "C", "D", &library).is_empty());
    }

    #[test]
    fn test_unicode_and_predictive_tokens() {
        let library = ChordLibrary::builtin();
        let result = transpose_progression("B♭ fshm", "C", "C", &library);
        assert_eq!(names(&result), vec!["A#", "F#m"]);
    }

    #[test]
    fn test_invalid_key_passes_everything_through() {
        let library = ChordLibrary::builtin();
        let result = transpose_progression("C G", "C", "Q", &library);
        assert_eq!(names(&result), vec!["C", "G"]);
        assert!(result.iter().all(|c| c.notes.is_empty()));
    }

    #[test]
    fn test_alternate_spelling_flag() {
        let library = ChordLibrary::builtin();
        let result = transpose_progression("C# C", "C", "D", &library);
        assert_eq!(result[0].name, "D#");
        assert!(result[0].show_alternate());
        assert!(!result[1].show_alternate());
    }

    #[test]
    fn test_sus_chord_reads_as_sharp() {
        let library = ChordLibrary::builtin();
        let result = transpose_progression("Csus4", "C", "D", &library);
        assert_eq!(names(&result), vec!["D#us4"]);
        assert!(result[0].notes.is_empty());
    }

    #[test]
    fn test_semitone_delta() {
        assert_eq!(semitone_delta("C", "D"), Ok(2));
        assert_eq!(semitone_delta("D", "C"), Ok(10));
        assert_eq!(semitone_delta("E♭", "G"), Ok(4));
        assert!(semitone_delta("C", "").is_err());
    }
}
