/// Application name, used for the config file location
pub const APP_NAME: &str = "linediff";

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "LINEDIFF_";

// Diff defaults
pub const DEFAULT_LINE_NUMBER_START: usize = 1;
pub const DEFAULT_FOLD_THRESHOLD: usize = 6;
pub const DEFAULT_FOLD_CONTEXT: usize = 2;
pub const DEFAULT_MAX_MATRIX_CELLS: usize = 40_000;
pub const DEFAULT_PAIR_WINDOW: usize = 1;

// Highlight defaults
pub const DEFAULT_FALLBACK_LANGUAGE: &str = "plaintext";
pub const DEFAULT_MAX_HIGHLIGHT_LENGTH: usize = 2000;
pub const DEFAULT_THEME: &str = "base16-ocean.dark";
