//! Calculator core.
//!
//! This module provides:
//! - Keypad events and label parsing
//! - Left-to-right evaluation of binary operations and result formatting
//! - The session state and the engine that mutates it, narrating every key

mod engine;
mod evaluation;
mod input;
mod state;

pub use engine::CalculatorEngine;
pub use evaluation::{MAX_FRACTION_DIGITS, Operator, evaluate, format_number, parse_operand};
pub use input::{Digit, Function, KEYPAD, Key, parse_keys};
pub use state::{Expression, ExpressionState};
