//! Voicecal: a talking calculator.
//!
//! Key presses build an expression that is evaluated strictly left to right,
//! and every key is narrated in the selected language through a pluggable
//! speech sink.

pub mod calculator;
pub mod error;
pub mod locale;
pub mod session;
pub mod settings;
pub mod speech;
pub mod ui;

pub use calculator::{CalculatorEngine, ExpressionState, Key};
pub use error::{CalcError, SettingsError};
pub use locale::LanguageTag;
pub use session::{Readout, Session};
pub use settings::Settings;
