//! Error types.
//!
//! `CalcError` values never reach the user: the engine matches on them and
//! turns every failure into a silent no-op. They exist so that the failure
//! paths stay explicit and testable.

use std::path::PathBuf;

/// Recoverable failures inside the calculator core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// The operand being typed is not a number (e.g. empty input).
    #[error("invalid operand: {0:?}")]
    InvalidOperand(String),

    /// Right-hand operand of a division is exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The operation overflowed to infinity or produced NaN.
    #[error("result is not a finite number")]
    NonFiniteResult,

    /// No pending operator or left operand to evaluate against.
    #[error("incomplete equation")]
    IncompleteEquation,

    /// A second decimal point was requested for the same operand.
    #[error("operand already has a decimal point")]
    RedundantPoint,

    /// A button label that does not map to any key.
    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    /// A language tag without a localization table.
    #[error("unsupported language: {0:?}")]
    UnsupportedLanguage(String),
}

/// Failures while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no config directory available")]
    NoConfigDir,
}
