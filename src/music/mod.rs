// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory core.
//!
//! Pitch-class arithmetic, the static key tables, named scale formulas and
//! the diatonic triad builder.

pub mod pitch;
pub mod scale;
pub mod tables;
pub mod triads;

pub use pitch::{
    interval, note_to_pitch_class, pitch_class_to_note, raise_same_letter,
    should_show_alternate_spelling, simple_pitch_class, PitchClass, Spelling,
};
pub use scale::{spell_scale, CustomScaleDefinition, ScaleRegistry, ScaleType};
pub use tables::{key_info, KeyInfo};
pub use triads::{
    build_major_pack, build_minor_pack, build_mode_pack, build_pack, ChordQuality, MinorVariant,
    TriadPack, ViewMode,
};
