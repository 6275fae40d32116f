// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord dictionary: concrete note spellings looked up by exact chord name.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::music::pitch::{
    is_double_accidental, letter_above, pitch_class_to_note, should_show_alternate_spelling,
    spell_with_letter, Spelling, LETTERS,
};

/// Notes of one chord
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChordEntry {
    /// Primary spelling
    pub notes: Vec<String>,
    /// Enharmonic alternative, usually free of double accidentals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_enharmonic_alt: Option<Vec<String>>,
}

impl ChordEntry {
    /// Create an entry without an alternate spelling
    pub fn new<S: Into<String>>(notes: impl IntoIterator<Item = S>) -> Self {
        Self {
            notes: notes.into_iter().map(Into::into).collect(),
            notes_enharmonic_alt: None,
        }
    }

    /// Attach an alternate spelling
    pub fn with_alt<S: Into<String>>(mut self, alt: impl IntoIterator<Item = S>) -> Self {
        self.notes_enharmonic_alt = Some(alt.into_iter().map(Into::into).collect());
        self
    }
}

/// Lookup of chord spellings by exact name
pub trait ChordDictionary {
    /// Find a chord by its full name, e.g. "F#m7"
    fn find_by_name(&self, name: &str) -> Option<ChordEntry>;
}

impl ChordDictionary for HashMap<String, ChordEntry> {
    fn find_by_name(&self, name: &str) -> Option<ChordEntry> {
        self.get(name).cloned()
    }
}

/// Letter steps and semitones of each chord tone above the root
type ChordFormula = &'static [(usize, i32)];

/// Chord suffixes spelled by the built-in library
const CHORD_FORMULAS: [(&str, ChordFormula); 13] = [
    ("", &[(0, 0), (2, 4), (4, 7)]),
    ("m", &[(0, 0), (2, 3), (4, 7)]),
    ("dim", &[(0, 0), (2, 3), (4, 6)]),
    ("°", &[(0, 0), (2, 3), (4, 6)]),
    ("aug", &[(0, 0), (2, 4), (4, 8)]),
    ("+", &[(0, 0), (2, 4), (4, 8)]),
    ("sus2", &[(0, 0), (1, 2), (4, 7)]),
    ("sus4", &[(0, 0), (3, 5), (4, 7)]),
    ("7", &[(0, 0), (2, 4), (4, 7), (6, 10)]),
    ("maj7", &[(0, 0), (2, 4), (4, 7), (6, 11)]),
    ("m7", &[(0, 0), (2, 3), (4, 7), (6, 10)]),
    ("m7b5", &[(0, 0), (2, 3), (4, 6), (6, 10)]),
    ("dim7", &[(0, 0), (2, 3), (4, 6), (6, 9)]),
];

/// Spell a chord from its root, keeping one letter per chord tone
fn spell_chord(root: &str, formula: ChordFormula) -> Option<ChordEntry> {
    let root = Spelling::parse(root).ok()?;
    let root_pc = root.pitch_class();

    let notes = formula
        .iter()
        .map(|&(steps, semitones)| {
            spell_with_letter(letter_above(root.letter, steps), root_pc.transpose(semitones))
        })
        .collect::<Option<Vec<String>>>()?;

    let mut entry = ChordEntry::new(notes);
    if entry.notes.iter().any(|n| is_double_accidental(n)) {
        let prefer_flats = root.accidental < 0;
        let alt: Vec<String> = formula
            .iter()
            .map(|&(_, semitones)| {
                pitch_class_to_note(root_pc.transpose(semitones), prefer_flats).to_string()
            })
            .collect();
        if should_show_alternate_spelling(entry.notes.as_slice(), alt.as_slice()) {
            entry = entry.with_alt(alt);
        }
    }
    Some(entry)
}

/// A name-keyed chord dictionary
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChordLibrary {
    /// Entries by chord name
    #[serde(default)]
    pub chords: BTreeMap<String, ChordEntry>,
}

impl ChordLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Spell the built-in chord set for every natural, sharp and flat root
    pub fn builtin() -> Self {
        let mut library = Self::new();
        for letter in LETTERS {
            for accidental in ["b", "", "#"] {
                let root = format!("{}{}", letter, accidental);
                for &(suffix, formula) in CHORD_FORMULAS.iter() {
                    if let Some(entry) = spell_chord(&root, formula) {
                        library.insert(format!("{}{}", root, suffix), entry);
                    }
                }
            }
        }
        library
    }

    /// Add or replace a chord
    pub fn insert(&mut self, name: impl Into<String>, entry: ChordEntry) {
        self.chords.insert(name.into(), entry);
    }

    /// Merge another library in, its entries winning
    pub fn merge(&mut self, other: ChordLibrary) {
        self.chords.extend(other.chords);
    }

    /// Number of chords
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Whether the library holds no chords
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Load a library from a YAML or TOML file (by extension)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read chord dictionary: {:?}", path))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Parse a library from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse chord dictionary YAML")
    }

    /// Parse a library from TOML
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse chord dictionary TOML")
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize chord dictionary to YAML")
    }
}

impl ChordDictionary for ChordLibrary {
    fn find_by_name(&self, name: &str) -> Option<ChordEntry> {
        self.chords.get(name).cloned()
    }
}
