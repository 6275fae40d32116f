// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Static key tables: strict major-scale spellings, the circle of fifths,
//! relative minors, key signatures and the diatonic step pattern.

use serde::Serialize;

use super::pitch::{note_to_pitch_class, PitchClass, Spelling};
use crate::error::{Result, TheoryError};

/// Strict spelling of every major key, signatures from +7 to -7
pub static MAJOR_SCALES: [(&str, [&str; 7]); 15] = [
    ("C", ["C", "D", "E", "F", "G", "A", "B"]),
    ("G", ["G", "A", "B", "C", "D", "E", "F#"]),
    ("D", ["D", "E", "F#", "G", "A", "B", "C#"]),
    ("A", ["A", "B", "C#", "D", "E", "F#", "G#"]),
    ("E", ["E", "F#", "G#", "A", "B", "C#", "D#"]),
    ("B", ["B", "C#", "D#", "E", "F#", "G#", "A#"]),
    ("F#", ["F#", "G#", "A#", "B", "C#", "D#", "E#"]),
    ("C#", ["C#", "D#", "E#", "F#", "G#", "A#", "B#"]),
    ("F", ["F", "G", "A", "Bb", "C", "D", "E"]),
    ("Bb", ["Bb", "C", "D", "Eb", "F", "G", "A"]),
    ("Eb", ["Eb", "F", "G", "Ab", "Bb", "C", "D"]),
    ("Ab", ["Ab", "Bb", "C", "Db", "Eb", "F", "G"]),
    ("Db", ["Db", "Eb", "F", "Gb", "Ab", "Bb", "C"]),
    ("Gb", ["Gb", "Ab", "Bb", "Cb", "Db", "Eb", "F"]),
    ("Cb", ["Cb", "Db", "Eb", "Fb", "Gb", "Ab", "Bb"]),
];

/// Circle of fifths, clockwise, one spelling per pitch class
pub static CIRCLE_OF_FIFTHS: [&str; 12] = [
    "C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F",
];

/// Major tonic to relative minor tonic
pub static RELATIVE_MINORS: [(&str, &str); 15] = [
    ("C", "A"),
    ("G", "E"),
    ("D", "B"),
    ("A", "F#"),
    ("E", "C#"),
    ("B", "G#"),
    ("F#", "D#"),
    ("Db", "Bb"),
    ("Ab", "F"),
    ("Eb", "C"),
    ("Bb", "G"),
    ("F", "D"),
    ("Gb", "Eb"),
    ("Cb", "Ab"),
    ("C#", "A#"),
];

/// Signed key signatures: sharps positive, flats negative
pub static KEY_SIGNATURES: [(&str, i8); 15] = [
    ("C", 0),
    ("G", 1),
    ("D", 2),
    ("A", 3),
    ("E", 4),
    ("B", 5),
    ("F#", 6),
    ("C#", 7),
    ("F", -1),
    ("Bb", -2),
    ("Eb", -3),
    ("Ab", -4),
    ("Db", -5),
    ("Gb", -6),
    ("Cb", -7),
];

/// Semitone steps between consecutive degrees of the major scale (W-W-H-W-W-W-H)
pub const MODE_STEPS: [i32; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Mode names in order of their starting degree
pub const MODE_NAMES: [&str; 7] = [
    "Ionian",
    "Dorian",
    "Phrygian",
    "Lydian",
    "Mixolydian",
    "Aeolian",
    "Locrian",
];

/// Keys whose transposed chords are spelled with flats
pub const FLAT_KEYS: [&str; 7] = ["F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb"];

/// Canonical form of a spelling ("f#" -> "F#"), if it parses
pub fn canonical_spelling(s: &str) -> Option<String> {
    Spelling::parse(s.trim()).ok().map(|sp| sp.to_string())
}

/// Strict scale spelling for a major key
pub fn major_scale(key: &str) -> Option<&'static [&'static str; 7]> {
    let key = canonical_spelling(key)?;
    MAJOR_SCALES
        .iter()
        .find(|(tonic, _)| *tonic == key)
        .map(|(_, scale)| scale)
}

/// Relative minor tonic of a major key
pub fn relative_minor(major: &str) -> Option<&'static str> {
    let major = canonical_spelling(major)?;
    RELATIVE_MINORS
        .iter()
        .find(|(maj, _)| *maj == major)
        .map(|(_, min)| *min)
}

/// Parent major of a minor tonic (reverse relative-minor lookup)
pub fn relative_major(minor: &str) -> Option<&'static str> {
    let minor = canonical_spelling(minor)?;
    RELATIVE_MINORS
        .iter()
        .find(|(_, min)| *min == minor)
        .map(|(maj, _)| *maj)
}

/// Signed key signature of a major key
pub fn key_signature(key: &str) -> Option<i8> {
    let key = canonical_spelling(key)?;
    KEY_SIGNATURES
        .iter()
        .find(|(tonic, _)| *tonic == key)
        .map(|(_, sig)| *sig)
}

/// Position (0-11) on the circle of fifths, by pitch class
pub fn circle_position(key: &str) -> Option<usize> {
    let pc = note_to_pitch_class(key.trim()).ok()?;
    CIRCLE_OF_FIFTHS
        .iter()
        .position(|tonic| note_to_pitch_class(tonic).ok() == Some(pc))
}

/// Whether chords in this key are spelled with flats
pub fn prefers_flats(key: &str) -> bool {
    canonical_spelling(key)
        .map(|k| FLAT_KEYS.contains(&k.as_str()))
        .unwrap_or(false)
}

/// Major keys whose tonic is the given pitch class
pub fn major_keys_for(pc: PitchClass) -> impl Iterator<Item = &'static (&'static str, [&'static str; 7])> {
    MAJOR_SCALES
        .iter()
        .filter(move |(tonic, _)| note_to_pitch_class(tonic).ok() == Some(pc))
}

/// Everything the tables know about one major key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    /// Tonic spelling
    pub tonic: String,
    /// Strict scale spelling
    pub scale: Vec<String>,
    /// Signed count of sharps (positive) or flats (negative)
    pub signature: i8,
    /// Relative minor tonic
    pub relative_minor: Option<String>,
    /// Clockwise position on the circle of fifths
    pub circle_position: usize,
}

/// Look up a major key
pub fn key_info(key: &str) -> Result<KeyInfo> {
    let unknown = || TheoryError::UnknownKey(key.to_string());
    let tonic = canonical_spelling(key).ok_or_else(unknown)?;
    let scale = major_scale(&tonic).ok_or_else(unknown)?;
    let signature = key_signature(&tonic).ok_or_else(unknown)?;
    let circle_position = circle_position(&tonic).ok_or_else(unknown)?;

    Ok(KeyInfo {
        scale: scale.iter().map(|n| n.to_string()).collect(),
        signature,
        relative_minor: relative_minor(&tonic).map(str::to_string),
        circle_position,
        tonic,
    })
}
