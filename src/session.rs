//! A calculator session: state, engine and speech sink wired together.

use crate::calculator::{CalculatorEngine, ExpressionState, Key};
use crate::locale::LanguageTag;
use crate::settings::Settings;
use crate::speech::{SpeechSink, Utterance};

/// What the display shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readout {
    /// The numeric readout.
    pub display: String,
    /// The expression line above it.
    pub expression: String,
}

/// One calculator session: the state, the engine that mutates it and the
/// sink that speaks each key press.
pub struct Session<S: SpeechSink> {
    state: ExpressionState,
    engine: CalculatorEngine,
    sink: S,
}

impl<S: SpeechSink> Session<S> {
    pub fn new(settings: &Settings, sink: S) -> Self {
        Self {
            state: ExpressionState::new(),
            engine: CalculatorEngine::new(settings.language, settings.speech_rate),
            sink,
        }
    }

    /// Apply one key press and speak it. Returns the phrase, if any.
    pub fn press(&mut self, key: Key) -> Option<Utterance> {
        let utterance = self.engine.handle_key(&mut self.state, key)?;
        tracing::debug!(
            key = %key.label(),
            display = %self.state.display_text,
            expression = %self.state.expression_text(),
            "key pressed"
        );
        self.sink.speak(utterance.clone());
        Some(utterance)
    }

    /// Apply a sequence of key presses.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    pub fn readout(&self) -> Readout {
        Readout {
            display: self.state.display_text.clone(),
            expression: self.state.expression_text(),
        }
    }

    pub fn state(&self) -> &ExpressionState {
        &self.state
    }

    pub fn language(&self) -> LanguageTag {
        self.engine.language()
    }

    pub fn set_language(&mut self, language: LanguageTag) {
        tracing::info!("Speech language set to {}", language);
        self.engine.set_language(language);
    }

    pub fn speech_rate(&self) -> f32 {
        self.engine.speech_rate()
    }

    pub fn set_speech_rate(&mut self, rate: f32) {
        self.engine.set_speech_rate(rate);
        tracing::info!("Speech rate set to {}", self.engine.speech_rate());
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
