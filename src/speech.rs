//! Text-to-speech narration.
//!
//! Speech is fire-and-forget: a new request cancels whatever is still
//! playing and nothing is queued.

use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

use crate::models::Field;

/// espeak's default speaking speed in words per minute.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EnUs,
    EsEs,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EsEs => "es-ES",
        }
    }

    pub fn for_field(field: Field) -> Self {
        if field.is_spanish() {
            Locale::EsEs
        } else {
            Locale::EnUs
        }
    }

    fn voice(self) -> &'static str {
        match self {
            Locale::EnUs => "en-us",
            Locale::EsEs => "es",
        }
    }
}

pub trait Speaker {
    fn speak(&mut self, text: &str, locale: Locale);
}

/// Discards every request.
#[derive(Debug, Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&mut self, _text: &str, _locale: Locale) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    /// espeak-compatible program (`-v <voice> -s <wpm> <text>`).
    pub program: String,
    /// Relative speed, 1.0 is the program's normal speed.
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            rate: 0.9,
        }
    }
}

/// Speaks through an external program, one utterance at a time.
pub struct CommandSpeaker {
    config: SpeechConfig,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    fn command(&self, text: &str, locale: Locale) -> Command {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * self.config.rate).round().max(1.0) as u32;

        let mut command = Command::new(&self.config.program);
        command
            .arg("-v")
            .arg(locale.voice())
            .arg("-s")
            .arg(words_per_minute.to_string())
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str, locale: Locale) {
        self.cancel();

        let text = text.trim();
        if text.is_empty() {
            return;
        }

        match self.command(text, locale).spawn() {
            Ok(child) => {
                debug!(text, locale = locale.tag(), "speaking");
                self.current = Some(child);
            }
            Err(err) => {
                warn!(program = %self.config.program, %err, "could not start speech program");
            }
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}
