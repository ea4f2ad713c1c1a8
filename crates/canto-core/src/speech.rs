//! Hand text to the host speech facility.
//!
//! Speaking is fire-and-forget: a new request cancels whatever is still
//! playing, and the caller never waits for playback unless it asks to.

use std::io;
use std::process::{Child, Command, Stdio};

use tracing::{debug, warn};

use crate::settings::{settings, SpeechSettings};

/// Words per minute at rate 1.0, used to expand the `{wpm}` placeholder.
const BASE_WPM: f64 = 175.0;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to start speech program: {0}")]
    Spawn(#[source] io::Error),
}

/// One request to speak `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub locale: String,
    pub rate: f64,
}

impl Utterance {
    pub fn new(text: &str, locale: &str, rate: f64) -> Self {
        Self {
            text: text.to_string(),
            locale: locale.to_string(),
            rate,
        }
    }

    /// Utterance with the locale and rate from the global settings.
    pub fn from_settings(text: &str) -> Self {
        let speech = &settings().speech;
        Self::new(text, &speech.locale, speech.rate)
    }
}

fn expand_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub trait Speaker {
    /// Start speaking, cancelling any utterance still in progress.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;
}

/// Speaker backed by an external text-to-speech program. Dropping the speaker
/// leaves a running utterance to finish on its own.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    current: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
            current: None,
        }
    }

    pub fn from_settings(speech: &SpeechSettings) -> Self {
        Self::new(&speech.program, speech.args.clone())
    }

    /// Expand placeholders in the argument template. Each argument is
    /// scanned once, so braces inside the substituted values stay literal.
    pub fn expand_args(&self, utterance: &Utterance) -> Vec<String> {
        let rate = utterance.rate.to_string();
        let wpm = ((utterance.rate * BASE_WPM).round() as i64).to_string();
        let values: [(&str, &str); 4] = [
            ("{text}", &utterance.text),
            ("{locale}", &utterance.locale),
            ("{rate}", &rate),
            ("{wpm}", &wpm),
        ];
        self.args
            .iter()
            .map(|arg| expand_placeholders(arg, &values))
            .collect()
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            // An already finished child makes kill fail; that is fine.
            if child.kill().is_ok() {
                debug!(pid = child.id(), "cancelled previous utterance");
            }
            if let Err(e) = child.wait() {
                debug!(error = %e, "could not reap previous utterance");
            }
        }
    }

    /// Block until the current utterance, if any, has finished.
    pub fn wait(&mut self) -> Result<(), SpeechError> {
        if let Some(mut child) = self.current.take() {
            let status = child.wait().map_err(SpeechError::Spawn)?;
            if !status.success() {
                warn!(%status, program = %self.program, "speech program exited with failure");
            }
        }
        Ok(())
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        self.cancel();
        if utterance.text.trim().is_empty() {
            return Ok(());
        }

        let args = self.expand_args(utterance);
        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    SpeechError::Unavailable(format!("{} not found", self.program))
                } else {
                    SpeechError::Spawn(e)
                }
            })?;

        debug!(pid = child.id(), program = %self.program, "speaking");
        self.current = Some(child);
        Ok(())
    }
}
