//! Keypad events.
//!
//! Maps button labels (and a few keyboard-friendly aliases) to the events the
//! engine understands.

use lazy_static::lazy_static;
use regex::Regex;

use super::evaluation::Operator;
use crate::error::CalcError;

/// Keypad rows, top to bottom.
pub const KEYPAD: &[&[&str]] = &[
    &["C", "±", "%", "÷"],
    &["7", "8", "9", "×"],
    &["4", "5", "6", "-"],
    &["1", "2", "3", "+"],
    &["0", ".", "="],
];

lazy_static! {
    /// One key press: a word alias or any single non-space character.
    static ref KEY_TOKEN: Regex = Regex::new(r"(?i)clear|neg|\S").unwrap();
}

/// A single decimal digit `0`..=`9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<char> for Digit {
    type Error = CalcError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or_else(|| CalcError::UnknownKey(c.to_string()))
    }
}

impl std::fmt::Display for Digit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-numeric, non-operator commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Clear,
    Equals,
    Negate,
    Percent,
    Point,
}

impl Function {
    pub const ALL: [Function; 5] = [
        Self::Clear,
        Self::Equals,
        Self::Negate,
        Self::Percent,
        Self::Point,
    ];

    /// The keypad label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "C",
            Self::Equals => "=",
            Self::Negate => "±",
            Self::Percent => "%",
            Self::Point => ".",
        }
    }
}

/// Any button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(Digit),
    Operator(Operator),
    Function(Function),
}

impl Key {
    /// Resolve a single button label.
    pub fn from_label(label: &str) -> Result<Self, CalcError> {
        let key = match label.to_ascii_lowercase().as_str() {
            "+" => Self::Operator(Operator::Add),
            "-" => Self::Operator(Operator::Sub),
            "×" | "*" | "x" => Self::Operator(Operator::Mul),
            "÷" | "/" => Self::Operator(Operator::Div),
            "c" | "clear" => Self::Function(Function::Clear),
            "=" => Self::Function(Function::Equals),
            "±" | "n" | "neg" => Self::Function(Function::Negate),
            "%" => Self::Function(Function::Percent),
            "." => Self::Function(Function::Point),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Digit(Digit::try_from(c)?),
                    _ => return Err(CalcError::UnknownKey(label.to_string())),
                }
            }
        };
        Ok(key)
    }

    /// The keypad label for this key.
    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Function(f) => f.label().to_string(),
        }
    }
}

impl From<Digit> for Key {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl From<Operator> for Key {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<Function> for Key {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

/// Parse a run of key presses such as `"12+8×2="` or `"12 + 8 x 2 ="`.
///
/// Fails on the first label that is not a key; nothing is returned in that case.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, CalcError> {
    KEY_TOKEN
        .find_iter(input)
        .map(|m| Key::from_label(m.as_str()))
        .collect()
}
