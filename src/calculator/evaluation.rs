//! Binary operation evaluation and result formatting.
//!
//! Operations are applied strictly left to right; there is no precedence.
//! Every failure is returned as an explicit `CalcError` so callers can decide
//! whether to skip the update.

use crate::error::CalcError;

/// Maximum number of fractional digits shown for a result.
pub const MAX_FRACTION_DIGITS: usize = 8;

/// One of the four binary operators on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    /// The label rendered in the expression string.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "×",
            Self::Div => "÷",
        }
    }

    /// Apply the operator to `lhs` and `rhs`.
    ///
    /// Division by an exact zero and non-finite results are failures, so an
    /// infinite or NaN value never reaches the display.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFiniteResult)
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluate `pending op current`, the rule shared by operator chaining and equals.
pub fn evaluate(
    pending_value: Option<f64>,
    pending_operator: Option<Operator>,
    current_input: &str,
) -> Result<f64, CalcError> {
    let (Some(lhs), Some(op)) = (pending_value, pending_operator) else {
        return Err(CalcError::IncompleteEquation);
    };
    let rhs = parse_operand(current_input)?;
    op.apply(lhs, rhs)
}

/// Parse the text of an operand.
///
/// Only finite decimal numbers are accepted; `""`, `"."` and words such as
/// `"inf"` are rejected.
pub fn parse_operand(input: &str) -> Result<f64, CalcError> {
    let is_numeric = !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-');

    match input.parse::<f64>() {
        Ok(value) if is_numeric && value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidOperand(input.to_string())),
    }
}

/// Format a result for display.
///
/// No grouping separators, at most `MAX_FRACTION_DIGITS` fractional digits,
/// trailing zeros trimmed. Negative zero renders as `"0"`.
pub fn format_number(value: f64) -> String {
    let formatted = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
