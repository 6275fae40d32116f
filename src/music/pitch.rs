// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch-class arithmetic and note spelling.
//!
//! Converts spellings such as "F#", "Bb", "F##" or "Dbb" to pitch classes
//! and back, and provides the letter-preserving accidental arithmetic the
//! scale builder relies on.

use std::fmt;

use crate::error::{Result, TheoryError};

/// Semitone offset type
pub type Semitones = i32;

/// Note letters in scale order, starting from C
pub const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// One of the twelve pitch classes, C = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Create a pitch class from any integer, normalized into 0-11
    pub fn new(n: i32) -> Self {
        PitchClass(n.rem_euclid(12) as u8)
    }

    /// Get the numeric value (0-11)
    pub fn value(self) -> u8 {
        self.0
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Get interval in semitones to another pitch class (ascending)
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 as i32 - self.0 as i32).rem_euclid(12) as u8
    }

    /// Spell with a single accidental, sharps or flats as requested
    pub fn spelling(self, prefer_flats: bool) -> &'static str {
        if prefer_flats {
            FLAT_NAMES[self.0 as usize]
        } else {
            SHARP_NAMES[self.0 as usize]
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semitone value of a natural letter
fn natural_value(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Render a signed accidental count as a suffix.
///
/// Counts beyond a double accidental repeat the symbol.
pub fn accidental_suffix(accidental: i32) -> String {
    match accidental {
        -2 => "bb".to_string(),
        -1 => "b".to_string(),
        0 => String::new(),
        1 => "#".to_string(),
        2 => "##".to_string(),
        n if n < 0 => "b".repeat(n.unsigned_abs() as usize),
        n => "#".repeat(n as usize),
    }
}

/// A note spelling split into its letter and signed accidental count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spelling {
    /// Uppercase letter A-G
    pub letter: char,
    /// Accidental count, negative for flats
    pub accidental: i32,
}

impl Spelling {
    /// Parse a letter followed by at most one of `##`, `bb`, `#`, `b`
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || TheoryError::InvalidNote(s.to_string());

        let mut chars = s.chars();
        let letter = chars
            .next()
            .filter(|c| natural_value(*c).is_some())
            .ok_or_else(invalid)?
            .to_ascii_uppercase();

        let accidental = match chars.as_str() {
            "" => 0,
            "#" => 1,
            "##" => 2,
            "b" => -1,
            "bb" => -2,
            _ => return Err(invalid()),
        };

        Ok(Self { letter, accidental })
    }

    /// Get the pitch class this spelling denotes
    pub fn pitch_class(self) -> PitchClass {
        PitchClass::new(natural_value(self.letter).unwrap_or(0) + self.accidental)
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, accidental_suffix(self.accidental))
    }
}

/// Replace unicode accidentals with their ascii forms
pub fn normalize_accidentals(s: &str) -> String {
    s.replace('𝄪', "##")
        .replace('𝄫', "bb")
        .replace('♯', "#")
        .replace('♭', "b")
}

/// Parse a note spelling into its pitch class
pub fn note_to_pitch_class(spelling: &str) -> Result<PitchClass> {
    Spelling::parse(spelling).map(Spelling::pitch_class)
}

/// Lenient parse for display collaborators: single accidentals only,
/// unicode sharps and flats accepted.
pub fn simple_pitch_class(spelling: &str) -> Option<PitchClass> {
    let normalized = normalize_accidentals(spelling.trim());
    let mut chars = normalized.chars();
    let base = natural_value(chars.next()?)?;
    let offset = match chars.as_str() {
        "" => 0,
        "#" => 1,
        "b" => -1,
        _ => return None,
    };
    Some(PitchClass::new(base + offset))
}

/// Spell a pitch class with a single accidental
pub fn pitch_class_to_note(pc: PitchClass, prefer_flats: bool) -> &'static str {
    pc.spelling(prefer_flats)
}

/// Ascending semitone distance from `root` to `note` (0-11)
pub fn interval(root: &str, note: &str) -> Result<u8> {
    let root = note_to_pitch_class(root)?;
    let note = note_to_pitch_class(note)?;
    Ok(root.interval_to(note))
}

/// Move a spelling by `semitones` while keeping its letter.
///
/// `G` raised by one becomes `G#`, never `Ab`.
pub fn raise_same_letter(note: &str, semitones: Semitones) -> Result<String> {
    let spelling = Spelling::parse(note)?;
    Ok(format!(
        "{}{}",
        spelling.letter,
        accidental_suffix(spelling.accidental + semitones)
    ))
}

/// Letter reached by walking `steps` letters up from `letter`
pub fn letter_above(letter: char, steps: usize) -> char {
    let start = LETTERS
        .iter()
        .position(|&l| l == letter.to_ascii_uppercase())
        .unwrap_or(0);
    LETTERS[(start + steps) % LETTERS.len()]
}

/// Spell `pc` using the given letter, if it needs at most a double accidental
pub fn spell_with_letter(letter: char, pc: PitchClass) -> Option<String> {
    let natural = natural_value(letter)?;
    let mut accidental = (pc.value() as i32 - natural).rem_euclid(12);
    if accidental > 6 {
        accidental -= 12;
    }
    if accidental.abs() > 2 {
        return None;
    }
    Some(format!(
        "{}{}",
        letter.to_ascii_uppercase(),
        accidental_suffix(accidental)
    ))
}

/// Whether a spelling carries `##` or `bb` after its letter
pub fn is_double_accidental(note: &str) -> bool {
    note.get(1..)
        .map(|rest| rest.contains("##") || rest.contains("bb"))
        .unwrap_or(false)
}

/// Whether an alternate enharmonic spelling is worth showing.
///
/// True only when the primary notes contain a double accidental and the
/// alternate list actually differs from them.
pub fn should_show_alternate_spelling<S: AsRef<str>, T: AsRef<str>>(
    notes: &[S],
    alt_notes: &[T],
) -> bool {
    if alt_notes.is_empty() {
        return false;
    }
    if !notes.iter().any(|n| is_double_accidental(n.as_ref())) {
        return false;
    }
    notes.len() != alt_notes.len()
        || notes
            .iter()
            .zip(alt_notes)
            .any(|(a, b)| a.as_ref() != b.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_to_pitch_class() {
        assert_eq!(note_to_pitch_class("C").unwrap().value(), 0);
        assert_eq!(note_to_pitch_class("F#").unwrap().value(), 6);
        assert_eq!(note_to_pitch_class("Bb").unwrap().value(), 10);
        assert_eq!(note_to_pitch_class("F##").unwrap().value(), 7);
        assert_eq!(note_to_pitch_class("Dbb").unwrap().value(), 0);
        assert_eq!(note_to_pitch_class("Cb").unwrap().value(), 11);
        assert_eq!(note_to_pitch_class("B#").unwrap().value(), 0);
        assert_eq!(note_to_pitch_class("g").unwrap().value(), 7);
    }

    #[test]
    fn test_invalid_notes() {
        assert!(note_to_pitch_class("").is_err());
        assert!(note_to_pitch_class("H").is_err());
        assert!(note_to_pitch_class("C#b").is_err());
        assert!(note_to_pitch_class("C###").is_err());
        assert!(note_to_pitch_class("Cx").is_err());
        assert_eq!(
            note_to_pitch_class("X"),
            Err(TheoryError::InvalidNote("X".to_string()))
        );
    }

    #[test]
    fn test_round_trip() {
        for n in 0..12 {
            let pc = PitchClass::new(n);
            for prefer_flats in [false, true] {
                let name = pitch_class_to_note(pc, prefer_flats);
                assert_eq!(note_to_pitch_class(name).unwrap(), pc, "{}", name);
            }
        }
    }

    #[test]
    fn test_pitch_class_normalizes() {
        assert_eq!(PitchClass::new(-1).value(), 11);
        assert_eq!(PitchClass::new(14).value(), 2);
        assert_eq!(PitchClass::new(0).transpose(-13).value(), 11);
    }

    #[test]
    fn test_interval() {
        assert_eq!(interval("C", "G"), Ok(7));
        assert_eq!(interval("G", "C"), Ok(5));
        assert_eq!(interval("A", "A"), Ok(0));
        assert_eq!(interval("E", "F##"), Ok(3));
        assert!(interval("C", "Q").is_err());
    }

    #[test]
    fn test_simple_pitch_class() {
        assert_eq!(simple_pitch_class("F♯").map(|p| p.value()), Some(6));
        assert_eq!(simple_pitch_class("B♭").map(|p| p.value()), Some(10));
        assert_eq!(simple_pitch_class(" a ").map(|p| p.value()), Some(9));
        assert_eq!(simple_pitch_class("F##"), None);
        assert_eq!(simple_pitch_class(""), None);
    }

    #[test]
    fn test_raise_same_letter() {
        assert_eq!(raise_same_letter("G", 1).unwrap(), "G#");
        assert_eq!(raise_same_letter("G#", 1).unwrap(), "G##");
        assert_eq!(raise_same_letter("Ab", 1).unwrap(), "A");
        assert_eq!(raise_same_letter("Bbb", -1).unwrap(), "Bbbb");
        assert!(raise_same_letter("?", 1).is_err());
    }

    #[test]
    fn test_spell_with_letter() {
        assert_eq!(spell_with_letter('F', PitchClass::new(7)), Some("F##".to_string()));
        assert_eq!(spell_with_letter('C', PitchClass::new(11)), Some("Cb".to_string()));
        assert_eq!(spell_with_letter('E', PitchClass::new(4)), Some("E".to_string()));
        assert_eq!(spell_with_letter('C', PitchClass::new(4)), None);
        assert_eq!(letter_above('A', 2), 'C');
        assert_eq!(letter_above('B', 6), 'A');
    }

    #[test]
    fn test_alternate_spelling_policy() {
        assert!(should_show_alternate_spelling(
            &["F##", "A", "C#"],
            &["G", "A", "C#"]
        ));
        assert!(!should_show_alternate_spelling(
            &["F#", "A", "C#"],
            &["F#", "A", "C#"]
        ));
        assert!(!should_show_alternate_spelling(
            &["Bbb", "D", "F"],
            &["Bbb", "D", "F"]
        ));
        assert!(!should_show_alternate_spelling::<&str, &str>(&["F##"], &[]));
        assert!(!is_double_accidental("Bb"));
        assert!(is_double_accidental("Ebb"));
    }
}
