// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the keywheel front end.
//!
//! Holds the default key and view, an optional chord dictionary file,
//! custom scale formulas and the log level. Files are YAML or TOML,
//! chosen by extension.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::chords::ChordLibrary;
use crate::music::{CustomScaleDefinition, MinorVariant, ScaleRegistry, ViewMode};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Key and view defaults
    #[serde(default)]
    pub theory: TheoryConfig,
    /// Chord dictionary file, merged over the built-in library
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    /// Custom scale formulas
    #[serde(default)]
    pub scales: Vec<CustomScaleDefinition>,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load a configuration from a YAML or TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Scale registry with the configured custom scales
    pub fn scale_registry(&self) -> ScaleRegistry {
        ScaleRegistry::with_custom(&self.scales)
    }

    /// Built-in chord library, overlaid with the configured dictionary file.
    ///
    /// A relative dictionary path is resolved against `base_dir`.
    pub fn chord_library(&self, base_dir: Option<&Path>) -> Result<ChordLibrary> {
        let mut library = ChordLibrary::builtin();
        if let Some(path) = &self.dictionary {
            let path = match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            };
            library.merge(ChordLibrary::load(&path)?);
        }
        Ok(library)
    }
}

/// Key and view defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TheoryConfig {
    /// Selected major key (e.g., "C", "Bb", "F#")
    #[serde(default = "default_key")]
    pub default_key: String,
    /// Major or relative-minor view
    #[serde(default)]
    pub view: ViewMode,
    /// Minor variant used by the relative-minor view
    #[serde(default)]
    pub minor_variant: MinorVariant,
}

fn default_key() -> String {
    "C".to_string()
}

impl TheoryConfig {
    /// View and minor variant selected by a view argument.
    ///
    /// Accepts a view name ("major", "relative_minor") or a minor variant
    /// name, which implies the relative-minor view. No argument keeps the
    /// configured defaults.
    pub fn resolve_view(&self, arg: Option<&str>) -> Option<(ViewMode, MinorVariant)> {
        let Some(arg) = arg else {
            return Some((self.view, self.minor_variant));
        };
        if let Some(view) = ViewMode::parse(arg) {
            return Some((view, self.minor_variant));
        }
        MinorVariant::parse(arg).map(|variant| (ViewMode::RelativeMinor, variant))
    }
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            default_key: default_key(),
            view: ViewMode::default(),
            minor_variant: MinorVariant::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Max level: error, warn, info, debug or trace
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level, falling back to WARN
    pub fn max_level(&self) -> tracing::Level {
        self.level.parse().unwrap_or(tracing::Level::WARN)
    }
}
