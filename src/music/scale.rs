// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named scale formulas.
//!
//! Formulas are semitone offsets from the tonic. Spelled scales produced
//! here use pitch-class spelling (sharps or flats by the root's accidental),
//! unlike the strict letter-per-degree spellings of the key tables.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::pitch::{note_to_pitch_class, pitch_class_to_note};
use super::tables::prefers_flats;
use crate::error::Result;

/// Scale formulas supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor, // Ascending form
    MajorPentatonic,
    MinorPentatonic,
    Blues,
    WholeTone,
    DiminishedHW, // Half-whole
    DiminishedWH, // Whole-half
    SpanishPhrygian,
}

impl ScaleType {
    /// All built-in scale types
    pub const ALL: [ScaleType; 11] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::MajorPentatonic,
        ScaleType::MinorPentatonic,
        ScaleType::Blues,
        ScaleType::WholeTone,
        ScaleType::DiminishedHW,
        ScaleType::DiminishedWH,
        ScaleType::SpanishPhrygian,
    ];

    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleType::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleType::MajorPentatonic => &[0, 2, 4, 7, 9],
            ScaleType::MinorPentatonic => &[0, 3, 5, 7, 10],
            ScaleType::Blues => &[0, 3, 5, 6, 7, 10],
            ScaleType::WholeTone => &[0, 2, 4, 6, 8, 10],
            ScaleType::DiminishedHW => &[0, 1, 3, 4, 6, 7, 9, 10],
            ScaleType::DiminishedWH => &[0, 2, 3, 5, 6, 8, 9, 11],
            ScaleType::SpanishPhrygian => &[0, 1, 4, 5, 7, 8, 10],
        }
    }

    /// Parse scale type from string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" => Some(ScaleType::Major),
            "minor" | "naturalminor" | "aeolian" => Some(ScaleType::NaturalMinor),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            "majorpentatonic" | "pentatonicmajor" => Some(ScaleType::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Some(ScaleType::MinorPentatonic),
            "blues" => Some(ScaleType::Blues),
            "wholetone" => Some(ScaleType::WholeTone),
            "diminished" | "diminishedhw" | "halfwhole" => Some(ScaleType::DiminishedHW),
            "diminishedwh" | "wholehalf" => Some(ScaleType::DiminishedWH),
            "spanishphrygian" | "phrygiandominant" => Some(ScaleType::SpanishPhrygian),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::MinorPentatonic => "Minor Pentatonic",
            ScaleType::Blues => "Blues",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::DiminishedHW => "Diminished (H-W)",
            ScaleType::DiminishedWH => "Diminished (W-H)",
            ScaleType::SpanishPhrygian => "Spanish Phrygian",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Spell a formula from a root.
///
/// Flat roots and flat keys spell with flats, everything else with sharps.
pub fn spell_formula(root: &str, intervals: &[u8]) -> Result<Vec<String>> {
    let root_pc = note_to_pitch_class(root.trim())?;
    let prefer_flats = root
        .trim()
        .get(1..)
        .map_or(false, |accidental| accidental.contains('b'))
        || prefers_flats(root);
    Ok(intervals
        .iter()
        .map(|&i| pitch_class_to_note(root_pc.transpose(i as i32), prefer_flats).to_string())
        .collect())
}

/// Spell a built-in scale from a root
pub fn spell_scale(root: &str, scale_type: ScaleType) -> Result<Vec<String>> {
    spell_formula(root, scale_type.intervals())
}

/// Custom scale definitions that can be loaded from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomScaleDefinition {
    /// Name of the scale
    pub name: String,
    /// Intervals from root (semitones)
    pub intervals: Vec<u8>,
}

/// Registry for scale formulas, built-in and custom
#[derive(Debug, Clone, Default)]
pub struct ScaleRegistry {
    custom_scales: HashMap<String, CustomScaleDefinition>,
}

impl ScaleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given custom definitions
    pub fn with_custom(defs: &[CustomScaleDefinition]) -> Self {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def.clone());
        }
        registry
    }

    /// Register a custom scale
    pub fn register(&mut self, def: CustomScaleDefinition) {
        self.custom_scales.insert(def.name.clone(), def);
    }

    /// Get a formula by name (checks custom first, then built-in)
    pub fn formula(&self, name: &str) -> Option<Vec<u8>> {
        if let Some(def) = self.custom_scales.get(name) {
            return Some(def.intervals.clone());
        }
        ScaleType::parse(name).map(|st| st.intervals().to_vec())
    }

    /// Spell a scale by name; `None` when the name is unknown
    pub fn spell(&self, root: &str, name: &str) -> Option<Result<Vec<String>>> {
        self.formula(name).map(|intervals| spell_formula(root, &intervals))
    }

    /// List all available scale names
    pub fn available_scales(&self) -> Vec<String> {
        let mut names: Vec<String> = self.custom_scales.keys().cloned().collect();

        let built_in = [
            "major",
            "natural_minor",
            "harmonic_minor",
            "melodic_minor",
            "major_pentatonic",
            "minor_pentatonic",
            "blues",
            "whole_tone",
            "diminished_hw",
            "diminished_wh",
            "spanish_phrygian",
        ];

        names.extend(built_in.iter().map(|s| s.to_string()));
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_type_intervals() {
        assert_eq!(ScaleType::Major.intervals(), &[0, 2, 4, 5, 7, 9, 11]);
        assert_eq!(ScaleType::MinorPentatonic.intervals(), &[0, 3, 5, 7, 10]);
        assert_eq!(ScaleType::SpanishPhrygian.intervals(), &[0, 1, 4, 5, 7, 8, 10]);

        for st in ScaleType::ALL {
            assert_eq!(st.intervals()[0], 0, "{}", st);
        }
    }

    #[test]
    fn test_scale_type_parse() {
        assert_eq!(ScaleType::parse("major"), Some(ScaleType::Major));
        assert_eq!(ScaleType::parse("Minor"), Some(ScaleType::NaturalMinor));
        assert_eq!(ScaleType::parse("harmonic_minor"), Some(ScaleType::HarmonicMinor));
        assert_eq!(ScaleType::parse("whole-tone"), Some(ScaleType::WholeTone));
        assert_eq!(ScaleType::parse("unknown"), None);

        // Every registered name resolves
        let registry = ScaleRegistry::new();
        for name in registry.available_scales() {
            assert!(ScaleType::parse(&name).is_some(), "{}", name);
        }
    }

    #[test]
    fn test_spell_scale() {
        assert_eq!(
            spell_scale("A", ScaleType::MinorPentatonic).unwrap(),
            vec!["A", "C", "D", "E", "G"]
        );
        assert_eq!(
            spell_scale("Bb", ScaleType::Blues).unwrap(),
            vec!["Bb", "Db", "Eb", "E", "F", "Ab"]
        );
        assert_eq!(
            spell_scale("E", ScaleType::SpanishPhrygian).unwrap(),
            vec!["E", "F", "G#", "A", "B", "C", "D"]
        );
        assert!(spell_scale("Q", ScaleType::Major).is_err());
    }

    #[test]
    fn test_scale_registry() {
        let mut registry = ScaleRegistry::new();

        registry.register(CustomScaleDefinition {
            name: "super_locrian".to_string(),
            intervals: vec![0, 1, 3, 4, 6, 8, 10],
        });

        let custom = registry.spell("C", "super_locrian").unwrap().unwrap();
        assert_eq!(custom.len(), 7);
        assert_eq!(custom[3], "E");

        assert!(registry.formula("major").is_some());
        assert!(registry.spell("C", "nonexistent").is_none());
        assert!(registry
            .available_scales()
            .contains(&"super_locrian".to_string()));
    }
}
