//! Diff engine configuration
//!
//! `DiffConfig` is the value object every stage reads. It is persisted with `confy`
//! in the OS-specific config directory, and each field can be overridden through a
//! `LINEDIFF_*` environment variable.

use crate::constant::{
    APP_NAME, DEFAULT_FALLBACK_LANGUAGE, DEFAULT_FOLD_CONTEXT, DEFAULT_FOLD_THRESHOLD,
    DEFAULT_LINE_NUMBER_START, DEFAULT_MAX_HIGHLIGHT_LENGTH, DEFAULT_MAX_MATRIX_CELLS,
    DEFAULT_PAIR_WINDOW, ENV_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// First line number on both sides
    pub line_number_start: usize,

    /// Context runs strictly longer than this are folded
    pub fold_threshold: usize,

    /// Context lines kept visible on each side of a fold
    pub fold_context: usize,

    /// Largest `|A| * |B|` the LCS table may cover before the positional fallback kicks in
    pub max_matrix_cells: usize,

    /// Treat `"a\nb\n"` the same as `"a\nb"`
    pub drop_trailing_empty_line: bool,

    /// How far ahead a removed line looks for its added counterpart
    pub pair_window: usize,

    /// Language used when a path has no known extension
    pub fallback_language: String,

    /// Lines longer than this (in chars) are truncated before highlighting
    pub max_highlight_length: usize,

    /// Stamp action payloads with the build time
    pub include_timestamp: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            line_number_start: DEFAULT_LINE_NUMBER_START,
            fold_threshold: DEFAULT_FOLD_THRESHOLD,
            fold_context: DEFAULT_FOLD_CONTEXT,
            max_matrix_cells: DEFAULT_MAX_MATRIX_CELLS,
            drop_trailing_empty_line: true,
            pair_window: DEFAULT_PAIR_WINDOW,
            fallback_language: DEFAULT_FALLBACK_LANGUAGE.to_string(),
            max_highlight_length: DEFAULT_MAX_HIGHLIGHT_LENGTH,
            include_timestamp: true,
        }
    }
}

impl DiffConfig {
    /// Load configuration from disk, creating default if it doesn't exist,
    /// then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config: DiffConfig = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, self)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Apply `LINEDIFF_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are skipped, keeping the current setting.
    /// A `line_number_start` of 0 is raised to 1.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        override_field(&lookup, "LINE_NUMBER_START", &mut self.line_number_start);
        override_field(&lookup, "FOLD_THRESHOLD", &mut self.fold_threshold);
        override_field(&lookup, "FOLD_CONTEXT", &mut self.fold_context);
        override_field(&lookup, "MAX_MATRIX_CELLS", &mut self.max_matrix_cells);
        override_field(
            &lookup,
            "DROP_TRAILING_EMPTY_LINE",
            &mut self.drop_trailing_empty_line,
        );
        override_field(&lookup, "PAIR_WINDOW", &mut self.pair_window);
        override_field(&lookup, "FALLBACK_LANGUAGE", &mut self.fallback_language);
        override_field(&lookup, "MAX_HIGHLIGHT_LENGTH", &mut self.max_highlight_length);
        override_field(&lookup, "INCLUDE_TIMESTAMP", &mut self.include_timestamp);

        if self.line_number_start == 0 {
            warn!("line_number_start must be positive, using 1");
            self.line_number_start = 1;
        }
    }
}

fn override_field<F, T>(lookup: &F, name: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let key = format!("{}{}", ENV_PREFIX, name);
    let Some(raw) = lookup(&key) else {
        return;
    };

    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => warn!("Ignoring {}={:?}: not a valid value", key, raw),
    }
}
