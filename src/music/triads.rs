// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Diatonic triad builder.
//!
//! Builds a seven-note scale for a key, minor variant or mode and stacks
//! thirds on every degree, labelling each triad with its quality, chord
//! name and roman numeral. Unknown keys never fail: they produce an empty
//! pack labelled "Unknown".

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::pitch::{note_to_pitch_class, raise_same_letter};
use super::tables::{
    canonical_spelling, major_keys_for, major_scale, relative_major, relative_minor,
    CIRCLE_OF_FIFTHS, MODE_NAMES, MODE_STEPS,
};
use crate::error::{Result, TheoryError};

/// Triad quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl ChordQuality {
    /// Suffix appended to the root in a chord name
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "°",
            ChordQuality::Augmented => "+",
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Diminished => "Diminished",
            ChordQuality::Augmented => "Augmented",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

use ChordQuality::{Augmented as Aug, Diminished as Dim, Major as Maj, Minor as Min};

const MAJOR_QUALITIES: [ChordQuality; 7] = [Maj, Min, Min, Maj, Maj, Min, Dim];
const NATURAL_MINOR_QUALITIES: [ChordQuality; 7] = [Min, Dim, Maj, Min, Min, Maj, Maj];
const HARMONIC_MINOR_QUALITIES: [ChordQuality; 7] = [Min, Dim, Aug, Min, Maj, Maj, Dim];
const MELODIC_MINOR_QUALITIES: [ChordQuality; 7] = [Min, Min, Aug, Maj, Maj, Dim, Dim];

/// Aeolian starts on the sixth degree of its parent major
const AEOLIAN_ROTATION: usize = 5;

/// Minor scale variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinorVariant {
    #[default]
    Natural,
    Harmonic,
    Melodic,
}

impl MinorVariant {
    /// Parse from a name such as "harmonic"
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "natural" | "aeolian" | "minor" => Some(MinorVariant::Natural),
            "harmonic" => Some(MinorVariant::Harmonic),
            "melodic" => Some(MinorVariant::Melodic),
            _ => None,
        }
    }

    /// Triad qualities on each degree
    pub fn qualities(self) -> &'static [ChordQuality; 7] {
        match self {
            MinorVariant::Natural => &NATURAL_MINOR_QUALITIES,
            MinorVariant::Harmonic => &HARMONIC_MINOR_QUALITIES,
            MinorVariant::Melodic => &MELODIC_MINOR_QUALITIES,
        }
    }

    /// Zero-based degrees raised by a semitone relative to natural minor
    pub fn raised_degrees(self) -> &'static [usize] {
        match self {
            MinorVariant::Natural => &[],
            MinorVariant::Harmonic => &[6],
            MinorVariant::Melodic => &[5, 6],
        }
    }

    /// Label used in the pack's key label
    pub fn label(self) -> &'static str {
        match self {
            MinorVariant::Natural => "Minor",
            MinorVariant::Harmonic => "Harmonic Minor",
            MinorVariant::Melodic => "Melodic Minor",
        }
    }
}

/// Which view of the selected major key to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Major,
    RelativeMinor,
}

impl ViewMode {
    /// Parse from a name such as "relative_minor"
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "major" => Some(ViewMode::Major),
            "relative_minor" | "minor" => Some(ViewMode::RelativeMinor),
            _ => None,
        }
    }
}

/// Roman numeral for a zero-based degree with the given quality
pub fn roman_numeral(degree: usize, quality: ChordQuality) -> String {
    const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
    let numeral = NUMERALS[degree % NUMERALS.len()];
    match quality {
        ChordQuality::Major => numeral.to_string(),
        ChordQuality::Minor => numeral.to_lowercase(),
        ChordQuality::Diminished => format!("{}°", numeral.to_lowercase()),
        ChordQuality::Augmented => format!("{}+", numeral),
    }
}

/// Scale and diatonic triads for one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriadPack {
    /// Display label, e.g. "A Harmonic Minor"
    pub key_label: String,
    /// Seven scale degrees, tonic first
    pub scale: Vec<String>,
    /// Roman numeral per degree
    pub roman: Vec<String>,
    /// Chord name per degree
    pub chord_names: Vec<String>,
    /// Root, third and fifth of each triad
    pub notes: Vec<[String; 3]>,
    /// Quality per degree
    pub qualities: Vec<ChordQuality>,
}

impl TriadPack {
    /// The empty pack returned for keys that cannot be resolved
    pub fn unknown() -> Self {
        Self {
            key_label: "Unknown".to_string(),
            scale: Vec::new(),
            roman: Vec::new(),
            chord_names: Vec::new(),
            notes: Vec::new(),
            qualities: Vec::new(),
        }
    }

    /// Whether this pack carries no scale
    pub fn is_unknown(&self) -> bool {
        self.scale.is_empty()
    }

    fn from_scale(key_label: String, scale: Vec<String>, qualities: &[ChordQuality; 7]) -> Self {
        let len = scale.len();
        let notes = (0..len)
            .map(|i| {
                [
                    scale[i].clone(),
                    scale[(i + 2) % len].clone(),
                    scale[(i + 4) % len].clone(),
                ]
            })
            .collect();
        let chord_names = scale
            .iter()
            .zip(qualities)
            .map(|(root, quality)| format!("{}{}", root, quality.suffix()))
            .collect();
        let roman = qualities
            .iter()
            .enumerate()
            .map(|(degree, &quality)| roman_numeral(degree, quality))
            .collect();

        Self {
            key_label,
            scale,
            roman,
            chord_names,
            notes,
            qualities: qualities.to_vec(),
        }
    }
}

fn rotated(scale: &[&str; 7], start: usize) -> Vec<String> {
    (0..scale.len())
        .map(|i| scale[(start + i) % scale.len()].to_string())
        .collect()
}

fn rotated_qualities(qualities: &[ChordQuality; 7], start: usize) -> [ChordQuality; 7] {
    let mut out = *qualities;
    out.rotate_left(start % qualities.len());
    out
}

fn canonical(note: &str) -> Result<String> {
    canonical_spelling(note).ok_or_else(|| TheoryError::InvalidNote(note.to_string()))
}

fn major_pack(key: &str) -> Result<TriadPack> {
    let tonic = canonical(key)?;
    let scale = major_scale(&tonic).ok_or_else(|| TheoryError::UnknownKey(tonic.clone()))?;

    Ok(TriadPack::from_scale(
        format!("{} Major", tonic),
        rotated(scale, 0),
        &MAJOR_QUALITIES,
    ))
}

fn minor_pack(minor_tonic: &str, variant: MinorVariant) -> Result<TriadPack> {
    let tonic = canonical(minor_tonic)?;
    let parent = relative_major(&tonic).ok_or_else(|| TheoryError::UnknownKey(tonic.clone()))?;
    let parent_scale =
        major_scale(parent).ok_or_else(|| TheoryError::UnknownKey(parent.to_string()))?;

    let mut scale = rotated(parent_scale, AEOLIAN_ROTATION);
    for &degree in variant.raised_degrees() {
        scale[degree] = raise_same_letter(&scale[degree], 1)?;
    }

    debug!(tonic = %tonic, parent, ?variant, "built minor scale");
    Ok(TriadPack::from_scale(
        format!("{} {}", tonic, variant.label()),
        scale,
        variant.qualities(),
    ))
}

fn mode_pack(root: &str, mode_index: usize, mode_name: &str) -> Result<TriadPack> {
    if mode_index >= MODE_STEPS.len() {
        return Err(TheoryError::InvalidMode(mode_index));
    }
    let spelling = canonical(root)?;
    let root_pc = note_to_pitch_class(&spelling)?;

    // Walk back over the steps of the preceding modes to the parent tonic
    let offset: i32 = MODE_STEPS[..mode_index].iter().sum();
    let parent_pc = root_pc.transpose(-offset);

    // Prefer the parent whose rotation keeps the root's spelling
    let parent_scale = major_keys_for(parent_pc)
        .map(|(_, scale)| scale)
        .find(|scale| scale[mode_index] == spelling)
        .or_else(|| {
            CIRCLE_OF_FIFTHS
                .iter()
                .find(|tonic| note_to_pitch_class(tonic).ok() == Some(parent_pc))
                .and_then(|tonic| major_scale(tonic))
        })
        .ok_or_else(|| TheoryError::UnknownKey(spelling.clone()))?;

    let scale = rotated(parent_scale, mode_index);
    let name = if mode_name.trim().is_empty() {
        MODE_NAMES[mode_index]
    } else {
        mode_name.trim()
    };

    debug!(root = %spelling, parent = parent_scale[0], mode = name, "built mode scale");
    Ok(TriadPack::from_scale(
        format!("{} {}", scale[0], name),
        scale,
        &rotated_qualities(&MAJOR_QUALITIES, mode_index),
    ))
}

fn or_unknown(result: Result<TriadPack>) -> TriadPack {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "cannot build triad pack");
        TriadPack::unknown()
    })
}

/// Build the pack for a major key
pub fn build_major_pack(key: &str) -> TriadPack {
    or_unknown(major_pack(key))
}

/// Build the pack for a minor tonic in the given variant
pub fn build_minor_pack(minor_tonic: &str, variant: MinorVariant) -> TriadPack {
    or_unknown(minor_pack(minor_tonic, variant))
}

/// Build the pack for the mode starting on `root`.
///
/// `mode_index` selects Ionian (0) through Locrian (6); `mode_name` is used
/// for the label, falling back to the standard name when blank.
pub fn build_mode_pack(root: &str, mode_index: usize, mode_name: &str) -> TriadPack {
    or_unknown(mode_pack(root, mode_index, mode_name))
}

/// Build the pack for the selected major key in the requested view
pub fn build_pack(selected_major_root: &str, view: ViewMode, minor_variant: MinorVariant) -> TriadPack {
    match view {
        ViewMode::Major => build_major_pack(selected_major_root),
        ViewMode::RelativeMinor => match relative_minor(selected_major_root) {
            Some(minor) => build_minor_pack(minor, minor_variant),
            None => {
                warn!(key = selected_major_root, "no relative minor");
                TriadPack::unknown()
            }
        },
    }
}
