//! The calculator engine.
//!
//! Each handler takes the session state by `&mut`, applies one key press and
//! returns the phrase to speak for it. Failed operations leave the state as it
//! was and return no phrase.

use super::evaluation::{Operator, evaluate, format_number, parse_operand};
use super::input::{Digit, Function, Key};
use super::state::{Expression, ExpressionState};
use crate::error::CalcError;
use crate::locale::{LanguageTag, function_word, operator_word};
use crate::settings::{DEFAULT_SPEECH_RATE, clamp_speech_rate};
use crate::speech::Utterance;

/// Applies key presses to an `ExpressionState` and narrates them.
#[derive(Clone, Debug)]
pub struct CalculatorEngine {
    language: LanguageTag,
    speech_rate: f32,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new(LanguageTag::default(), DEFAULT_SPEECH_RATE)
    }
}

impl CalculatorEngine {
    /// Create an engine speaking `language` at `speech_rate` (clamped to the
    /// supported range).
    pub fn new(language: LanguageTag, speech_rate: f32) -> Self {
        Self {
            language,
            speech_rate: clamp_speech_rate(speech_rate),
        }
    }

    /// Language used for the phrases of subsequent key presses.
    pub fn language(&self) -> LanguageTag {
        self.language
    }

    /// Switch the speech language; the state is untouched.
    pub fn set_language(&mut self, language: LanguageTag) {
        self.language = language;
    }

    pub fn speech_rate(&self) -> f32 {
        self.speech_rate
    }

    pub fn set_speech_rate(&mut self, rate: f32) {
        self.speech_rate = clamp_speech_rate(rate);
    }

    /// Dispatch any key press.
    pub fn handle_key(&self, state: &mut ExpressionState, key: Key) -> Option<Utterance> {
        match key {
            Key::Digit(digit) => Some(self.handle_digit(state, digit)),
            Key::Operator(op) => Some(self.handle_operator(state, op)),
            Key::Function(function) => self.handle_function(state, function),
        }
    }

    /// A digit key.
    pub fn handle_digit(&self, state: &mut ExpressionState, digit: Digit) -> Utterance {
        let digit_text = digit.to_string();

        if state.expression.is_evaluated() {
            // A bare digit after "=" starts over; the old result is discarded.
            state.current_input = digit_text.clone();
            state.expression = Expression::operand(&digit_text);
        } else if state.pending_operator.is_none() {
            if state.current_input == "0" {
                state.current_input = digit_text.clone();
            } else {
                state.current_input.push_str(&digit_text);
            }
            state.expression = Expression::operand(&state.current_input);
        } else {
            state.current_input.push_str(&digit_text);
            state.expression.set_trailing_operand(&state.current_input);
        }

        state.display_text = state.current_input.clone();
        self.utterance(digit_text)
    }

    /// An operator key.
    pub fn handle_operator(&self, state: &mut ExpressionState, op: Operator) -> Utterance {
        if state.expression.is_evaluated() {
            state.pending_value = parse_operand(&state.display_text).ok();
            state.current_input.clear();
            state.expression = Expression::starting_with(&state.display_text, op);
        } else if let Ok(current) = parse_operand(&state.current_input) {
            if state.pending_value.is_some() {
                Self::chain(state, op);
            } else {
                state.pending_value = Some(current);
                state.expression = Expression::starting_with(&state.current_input, op);
            }
            state.current_input.clear();
        } else if state.expression.is_empty() && state.display_text != "0" {
            state.pending_value = parse_operand(&state.display_text).ok();
            state.expression = Expression::starting_with(&state.display_text, op);
        } else if !state.expression.is_empty() {
            state.expression.replace_trailing_operator(op);
        }

        state.pending_operator = Some(op);
        self.utterance(operator_word(self.language, op))
    }

    /// Evaluate the pending operation before `op` takes over.
    ///
    /// If the intermediate step fails the old pending value is kept and only
    /// the operator changes.
    fn chain(state: &mut ExpressionState, op: Operator) {
        match evaluate(
            state.pending_value,
            state.pending_operator,
            &state.current_input,
        ) {
            Ok(result) => {
                state.pending_value = Some(result);
                state.display_text = format_number(result);
                state.expression.commit_operand(&state.current_input);
                state.expression.push_operator(op);
            }
            Err(err) => {
                tracing::debug!("Skipping intermediate step: {}", err);
                state.expression.retract_operand(op);
            }
        }
    }

    /// A function key. Returns `None` when the key had no effect.
    pub fn handle_function(
        &self,
        state: &mut ExpressionState,
        function: Function,
    ) -> Option<Utterance> {
        let outcome = match function {
            Function::Clear => {
                state.reset();
                Ok(self.function_utterance(function))
            }
            Function::Equals => self.equals(state),
            Function::Negate => Self::transform_operand(state, |value| -value)
                .map(|()| self.function_utterance(function)),
            Function::Percent => Self::transform_operand(state, |value| value / 100.0)
                .map(|()| self.function_utterance(function)),
            Function::Point => Self::point(state).map(|()| self.function_utterance(function)),
        };

        match outcome {
            Ok(utterance) => Some(utterance),
            Err(err) => {
                tracing::debug!("Ignoring {:?}: {}", function, err);
                None
            }
        }
    }

    fn equals(&self, state: &mut ExpressionState) -> Result<Utterance, CalcError> {
        let result = evaluate(
            state.pending_value,
            state.pending_operator,
            &state.current_input,
        )?;
        let formatted = format_number(result);

        state.expression.commit_operand(&state.current_input);
        state.expression.push_result(&formatted);
        state.display_text = formatted.clone();
        state.current_input = formatted.clone();
        state.pending_value = None;
        state.pending_operator = None;

        Ok(self.utterance(format!(
            "{} {}",
            function_word(self.language, Function::Equals),
            formatted
        )))
    }

    fn transform_operand(
        state: &mut ExpressionState,
        transform: impl FnOnce(f64) -> f64,
    ) -> Result<(), CalcError> {
        let value = parse_operand(&state.current_input)?;
        state.current_input = format_number(transform(value));
        state.display_text = state.current_input.clone();
        Ok(())
    }

    fn point(state: &mut ExpressionState) -> Result<(), CalcError> {
        if state.current_input.contains('.') {
            return Err(CalcError::RedundantPoint);
        }
        if state.current_input.is_empty() {
            state.current_input.push('0');
        }
        state.current_input.push('.');
        state.display_text = state.current_input.clone();
        Ok(())
    }

    fn function_utterance(&self, function: Function) -> Utterance {
        self.utterance(function_word(self.language, function))
    }

    fn utterance(&self, text: impl Into<String>) -> Utterance {
        Utterance {
            text: text.into(),
            language: self.language,
            rate: self.speech_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::input::parse_keys;

    fn press(engine: &CalculatorEngine, state: &mut ExpressionState, keys: &str) -> Vec<String> {
        parse_keys(keys)
            .unwrap()
            .into_iter()
            .filter_map(|key| engine.handle_key(state, key))
            .map(|u| u.text)
            .collect()
    }

    fn digit(c: char) -> Digit {
        Digit::try_from(c).unwrap()
    }

    #[test]
    fn test_digits_build_first_operand() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();

        for (c, expected) in [('1', "1"), ('2', "12"), ('3', "123")] {
            engine.handle_digit(&mut state, digit(c));
            assert_eq!(state.current_input, expected);
            assert_eq!(state.display_text, state.current_input);
            assert_eq!(state.expression_text(), expected);
        }
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "007");
        assert_eq!(state.current_input, "7");
        assert_eq!(state.display_text, "7");
    }

    #[test]
    fn test_digit_is_spoken_verbatim() {
        let engine = CalculatorEngine::new(LanguageTag::ZhCn, 0.5);
        let mut state = ExpressionState::new();
        let spoken = engine.handle_digit(&mut state, digit('7'));
        assert_eq!(spoken.text, "7");
        assert_eq!(spoken.language, LanguageTag::ZhCn);
    }

    #[test]
    fn test_first_operator() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        let spoken = press(&engine, &mut state, "12+");

        assert_eq!(spoken.last().map(String::as_str), Some("plus"));
        assert_eq!(state.pending_value, Some(12.0));
        assert_eq!(state.pending_operator, Some(Operator::Add));
        assert_eq!(state.current_input, "");
        assert_eq!(state.display_text, "12");
        assert_eq!(state.expression_text(), "12 + ");
    }

    #[test]
    fn test_second_operand_tracks_expression() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "12+3");
        assert_eq!(state.expression_text(), "12 + 3");
        press(&engine, &mut state, "4");
        assert_eq!(state.expression_text(), "12 + 34");
        assert_eq!(state.display_text, "34");
    }

    #[test]
    fn test_chained_evaluation_is_left_to_right() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        let spoken = press(&engine, &mut state, "12+8×2=");

        assert_eq!(state.expression_text(), "12 + 8 × 2 = 40");
        assert_eq!(state.display_text, "40");
        assert_eq!(state.current_input, "40");
        assert_eq!(state.pending_value, None);
        assert_eq!(state.pending_operator, None);
        assert_eq!(
            spoken,
            vec!["1", "2", "plus", "8", "times", "2", "equals 40"]
        );
    }

    #[test]
    fn test_intermediate_result_is_displayed() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "12+8×");
        assert_eq!(state.display_text, "20");
        assert_eq!(state.pending_value, Some(20.0));
        assert_eq!(state.expression_text(), "12 + 8 × ");
    }

    #[test]
    fn test_continue_from_result() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "12+8×2=");

        press(&engine, &mut state, "-");
        assert_eq!(state.expression_text(), "40 - ");
        assert_eq!(state.pending_value, Some(40.0));

        press(&engine, &mut state, "5=");
        assert_eq!(state.display_text, "35");
        assert_eq!(state.expression_text(), "40 - 5 = 35");
    }

    #[test]
    fn test_digit_after_result_starts_over() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "6÷3=");
        assert_eq!(state.display_text, "2");

        press(&engine, &mut state, "9");
        assert_eq!(state.expression_text(), "9");
        assert_eq!(state.display_text, "9");
        assert_eq!(state.current_input, "9");

        press(&engine, &mut state, "1");
        assert_eq!(state.expression_text(), "91");
    }

    #[test]
    fn test_operator_replaces_operator() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        let spoken = press(&engine, &mut state, "5+÷");

        assert_eq!(spoken.last().map(String::as_str), Some("divided by"));
        assert_eq!(state.expression_text(), "5 ÷ ");
        assert_eq!(state.pending_operator, Some(Operator::Div));
        assert_eq!(state.pending_value, Some(5.0));

        press(&engine, &mut state, "2=");
        assert_eq!(state.display_text, "2.5");
    }

    #[test]
    fn test_operator_on_fresh_state() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        let spoken = engine.handle_operator(&mut state, Operator::Mul);

        assert_eq!(spoken.text, "times");
        assert_eq!(state.expression_text(), "");
        assert_eq!(state.display_text, "0");
        assert_eq!(state.pending_operator, Some(Operator::Mul));
    }

    #[test]
    fn test_operator_anchors_on_display() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState {
            display_text: "7".to_string(),
            ..ExpressionState::default()
        };
        engine.handle_operator(&mut state, Operator::Add);
        assert_eq!(state.expression_text(), "7 + ");
        assert_eq!(state.pending_value, Some(7.0));

        press(&engine, &mut state, "3=");
        assert_eq!(state.display_text, "10");
    }

    #[test]
    fn test_equals_without_operand_is_noop() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "5+");
        let before = state.clone();

        assert!(engine.handle_function(&mut state, Function::Equals).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "42");
        let before = state.clone();

        assert!(engine.handle_function(&mut state, Function::Equals).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_division_by_zero_is_noop() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "5÷0");
        let before = state.clone();

        assert!(engine.handle_function(&mut state, Function::Equals).is_none());
        assert_eq!(state, before);
        assert_eq!(state.display_text, "0");
    }

    #[test]
    fn test_division_by_zero_mid_chain_keeps_old_value() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        let spoken = press(&engine, &mut state, "5÷0×");

        assert_eq!(spoken.last().map(String::as_str), Some("times"));
        assert_eq!(state.pending_value, Some(5.0));
        assert_eq!(state.pending_operator, Some(Operator::Mul));
        assert_eq!(state.current_input, "");
        assert_eq!(state.expression_text(), "5 × ");

        press(&engine, &mut state, "3=");
        assert_eq!(state.display_text, "15");
        assert_eq!(state.expression_text(), "5 × 3 = 15");
    }

    #[test]
    fn test_clear() {
        let engine = CalculatorEngine::new(LanguageTag::EsEs, 0.5);
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "12+8");

        let spoken = engine.handle_function(&mut state, Function::Clear).unwrap();
        assert_eq!(spoken.text, "borrar");
        assert_eq!(state, ExpressionState::default());
    }

    #[test]
    fn test_negate() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "12");

        let spoken = engine.handle_function(&mut state, Function::Negate).unwrap();
        assert_eq!(spoken.text, "negative");
        assert_eq!(state.current_input, "-12");
        assert_eq!(state.display_text, "-12");

        engine.handle_function(&mut state, Function::Negate);
        assert_eq!(state.current_input, "12");
    }

    #[test]
    fn test_negate_keeps_typed_operand_in_expression() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "2+3±=");
        assert_eq!(state.display_text, "-1");
        assert_eq!(state.expression_text(), "2 + 3 = -1");

        let mut state = ExpressionState::new();
        press(&engine, &mut state, "2+3±×");
        assert_eq!(state.display_text, "-1");
        assert_eq!(state.expression_text(), "2 + 3 × ");
    }

    #[test]
    fn test_percent_keeps_typed_operand_in_expression() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "50+10%=");
        assert_eq!(state.display_text, "50.1");
        assert_eq!(state.expression_text(), "50 + 10 = 50.1");
    }

    #[test]
    fn test_percent() {
        let engine = CalculatorEngine::new(LanguageTag::FrFr, 0.5);
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "50");

        let spoken = engine.handle_function(&mut state, Function::Percent).unwrap();
        assert_eq!(spoken.text, "pour cent");
        assert_eq!(state.current_input, "0.5");
        assert_eq!(state.display_text, "0.5");
    }

    #[test]
    fn test_negate_and_percent_need_an_operand() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();

        assert!(engine.handle_function(&mut state, Function::Negate).is_none());
        assert!(engine.handle_function(&mut state, Function::Percent).is_none());
        assert_eq!(state, ExpressionState::default());
    }

    #[test]
    fn test_point() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();

        let spoken = engine.handle_function(&mut state, Function::Point).unwrap();
        assert_eq!(spoken.text, "point");
        assert_eq!(state.current_input, "0.");
        assert_eq!(state.display_text, "0.");

        press(&engine, &mut state, "5");
        assert_eq!(state.current_input, "0.5");
        assert_eq!(state.expression_text(), "0.5");
    }

    #[test]
    fn test_second_point_is_ignored() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "3.");
        let once = state.clone();

        assert!(engine.handle_function(&mut state, Function::Point).is_none());
        assert_eq!(state, once);
        assert_eq!(state.current_input, "3.");
    }

    #[test]
    fn test_decimal_second_operand() {
        let engine = CalculatorEngine::default();
        let mut state = ExpressionState::new();
        press(&engine, &mut state, "2+.5=");
        assert_eq!(state.display_text, "2.5");
        assert_eq!(state.expression_text(), "2 + 0.5 = 2.5");
    }

    #[test]
    fn test_localized_equals() {
        let engine = CalculatorEngine::new(LanguageTag::ZhHk, 0.4);
        let mut state = ExpressionState::new();
        let spoken = press(&engine, &mut state, "7×6=");
        assert_eq!(spoken, vec!["7", "乘", "6", "等於 42"]);
    }

    #[test]
    fn test_speech_rate_is_clamped() {
        let mut engine = CalculatorEngine::new(LanguageTag::EnUs, 2.0);
        assert_eq!(engine.speech_rate(), 0.75);
        engine.set_speech_rate(0.0);
        assert_eq!(engine.speech_rate(), 0.1);

        let mut state = ExpressionState::new();
        let spoken = engine.handle_digit(&mut state, digit('1'));
        assert_eq!(spoken.rate, 0.1);
    }
}
