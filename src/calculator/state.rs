//! Calculator state: the operand being typed, the pending operation, and the
//! rendered readouts.

use super::evaluation::Operator;

/// One element of the visible expression.
#[derive(Clone, Debug, PartialEq)]
enum Token {
    Operand(String),
    Operator(Operator),
    /// Final result, rendered as `= <value>`.
    Result(String),
}

/// The expression shown above the display, kept as tokens and rendered on
/// demand (`"12 + 8 × "`, `"12 + 8 × 2 = 40"`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    /// Start an expression with `operand op`.
    pub fn starting_with(operand: &str, op: Operator) -> Self {
        Self {
            tokens: vec![Token::Operand(operand.to_string()), Token::Operator(op)],
        }
    }

    /// Expression holding a single operand.
    pub fn operand(operand: &str) -> Self {
        Self {
            tokens: vec![Token::Operand(operand.to_string())],
        }
    }

    /// Whether nothing has been entered since the last reset.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the last completed action was a final evaluation.
    pub fn is_evaluated(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Result(_)))
    }

    /// Whether the expression ends in an operator awaiting its operand.
    pub fn ends_with_operator(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Operator(_)))
    }

    /// Set the operand after the last operator, appending it if missing.
    pub fn set_trailing_operand(&mut self, operand: &str) {
        match self.tokens.last_mut() {
            Some(Token::Operand(last)) => *last = operand.to_string(),
            _ => self.tokens.push(Token::Operand(operand.to_string())),
        }
    }

    /// Append an operator awaiting its right-hand operand.
    pub fn push_operator(&mut self, op: Operator) {
        self.tokens.push(Token::Operator(op));
    }

    /// Close the expression with `= result`.
    pub fn push_result(&mut self, result: &str) {
        self.tokens.push(Token::Result(result.to_string()));
    }

    /// Replace a trailing operator. Returns `false` if the expression does
    /// not end in one.
    pub fn replace_trailing_operator(&mut self, op: Operator) -> bool {
        match self.tokens.last_mut() {
            Some(Token::Operator(last)) => {
                *last = op;
                true
            }
            _ => false,
        }
    }

    /// Append `operand` only if the expression is waiting for one after an
    /// operator. An operand already shown is left as typed.
    pub fn commit_operand(&mut self, operand: &str) {
        if self.ends_with_operator() {
            self.tokens.push(Token::Operand(operand.to_string()));
        }
    }

    /// Drop the operand typed after the last operator and swap that operator
    /// for `op`. Used when an intermediate evaluation was rejected.
    pub fn retract_operand(&mut self, op: Operator) {
        if matches!(self.tokens.last(), Some(Token::Operand(_))) && self.tokens.len() > 1 {
            self.tokens.pop();
        }
        if !self.replace_trailing_operator(op) {
            self.push_operator(op);
        }
    }

    /// Render the expression string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match token {
                Token::Operand(value) => out.push_str(value),
                Token::Operator(op) => out.push_str(op.symbol()),
                Token::Result(value) => {
                    out.push_str("= ");
                    out.push_str(value);
                }
            }
        }
        if self.ends_with_operator() {
            out.push(' ');
        }
        out
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// All mutable state of one calculator session.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionState {
    /// Digits and decimal point of the operand being typed; empty when
    /// nothing has been typed for this operand yet.
    pub current_input: String,
    /// Left operand awaiting the pending operator.
    pub pending_value: Option<f64>,
    pub pending_operator: Option<Operator>,
    /// Primary numeric readout; never empty.
    pub display_text: String,
    pub expression: Expression,
}

impl Default for ExpressionState {
    fn default() -> Self {
        Self {
            current_input: String::new(),
            pending_value: None,
            pending_operator: None,
            display_text: "0".to_string(),
            expression: Expression::default(),
        }
    }
}

impl ExpressionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every field to its start-of-session value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The rendered expression string.
    pub fn expression_text(&self) -> String {
        self.expression.render()
    }
}
