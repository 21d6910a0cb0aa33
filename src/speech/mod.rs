//! Speech output.
//!
//! The engine hands every spoken phrase to a `SpeechSink` and never waits for
//! it. Sinks swallow their own failures; a phrase that cannot be spoken is
//! logged and dropped.

mod command;

pub use command::CommandSink;

use crate::locale::LanguageTag;

/// A phrase to speak, with the voice settings in effect when it was produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: LanguageTag,
    pub rate: f32,
}

/// Receiver of spoken phrases.
pub trait SpeechSink {
    fn speak(&mut self, utterance: Utterance);
}

/// Writes each phrase to the log instead of a speaker.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl SpeechSink for LogSink {
    fn speak(&mut self, utterance: Utterance) {
        tracing::info!(
            language = utterance.language.as_str(),
            rate = utterance.rate,
            "speak: {}",
            utterance.text
        );
    }
}

/// Discards every phrase.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SpeechSink for NullSink {
    fn speak(&mut self, _utterance: Utterance) {}
}

/// Keeps every phrase in order.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub spoken: Vec<Utterance>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The texts spoken so far.
    pub fn texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }
}

impl SpeechSink for MemorySink {
    fn speak(&mut self, utterance: Utterance) {
        self.spoken.push(utterance);
    }
}

impl<S: SpeechSink + ?Sized> SpeechSink for Box<S> {
    fn speak(&mut self, utterance: Utterance) {
        (**self).speak(utterance);
    }
}
