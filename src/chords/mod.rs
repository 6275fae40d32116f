// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord text handling.
//!
//! Free-text chord parsing, search normalization, the chord dictionary
//! collaborator and progression transposition.

pub mod dictionary;
pub mod parser;
pub mod transpose;
pub mod vocabulary;

pub use dictionary::{ChordDictionary, ChordEntry, ChordLibrary};
pub use parser::{normalize_search_query, parse_chord, try_parse_chord, ParsedChord};
pub use transpose::{semitone_delta, transpose_progression, TransposedChord};
