// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keywheel - music-theory helpers for a key/chord explorer
//!
//! Builds diatonic triad packs for major keys, minor variants and modes,
//! parses loosely typed chord names, normalizes search text and
//! transposes chord progressions between keys.

pub mod chords;
pub mod config;
pub mod error;
pub mod music;

pub use chords::{
    normalize_search_query, parse_chord, transpose_progression, ChordDictionary, ChordEntry,
    ChordLibrary, ParsedChord, TransposedChord,
};
pub use config::AppConfig;
pub use error::{Result, TheoryError};
pub use music::{
    build_major_pack, build_minor_pack, build_mode_pack, build_pack, MinorVariant, TriadPack,
    ViewMode,
};
