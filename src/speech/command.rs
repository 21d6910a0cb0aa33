//! Speech through an external text-to-speech program (`espeak-ng` by default).

use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use super::{SpeechSink, Utterance};
use crate::locale::LanguageTag;

/// Words per minute at the default rate of 0.5.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Spawns one detached TTS process per phrase.
#[derive(Clone, Debug)]
pub struct CommandSink {
    program: String,
}

impl CommandSink {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn(&self, utterance: &Utterance) -> std::io::Result<()> {
        // SAFETY: setsid() is async-signal-safe; it detaches the speaker from
        // our process group so an exiting calculator does not cut it off.
        unsafe {
            Command::new(&self.program)
                .args(speech_args(utterance))
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .pre_exec(|| {
                    libc::setsid();
                    Ok(())
                })
                .spawn()?;
        }
        Ok(())
    }
}

impl SpeechSink for CommandSink {
    fn speak(&mut self, utterance: Utterance) {
        if let Err(err) = self.spawn(&utterance) {
            tracing::warn!("Failed to run {}: {}", self.program, err);
        }
    }
}

/// Voice name understood by espeak-ng.
fn voice_name(lang: LanguageTag) -> &'static str {
    match lang {
        LanguageTag::EnUs => "en-us",
        LanguageTag::EsEs => "es",
        LanguageTag::FrFr => "fr-fr",
        LanguageTag::ZhCn => "cmn",
        LanguageTag::ZhHk => "yue",
    }
}

/// Convert the 0..1 rate scale into espeak's words per minute.
fn words_per_minute(rate: f32) -> u32 {
    (rate / 0.5 * BASE_WORDS_PER_MINUTE).clamp(80.0, 450.0).round() as u32
}

fn speech_args(utterance: &Utterance) -> Vec<String> {
    vec![
        "-v".to_string(),
        voice_name(utterance.language).to_string(),
        "-s".to_string(),
        words_per_minute(utterance.rate).to_string(),
        "--".to_string(),
        utterance.text.clone(),
    ]
}
