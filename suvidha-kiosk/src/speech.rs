//! Speech announcer with newest-wins preemption.
//!
//! At most one utterance plays at a time, process-wide: starting a new one
//! cancels whatever is in progress, with no queueing. Calls are
//! fire-and-forget; completion is never awaited. A kiosk without a working
//! synthesis command reports `Unavailable` instead of silently doing
//! nothing.

use std::process::Stdio;
use std::sync::{Arc, Mutex};
use suvidha_core::Language;
use thiserror::Error;
use tracing::debug;

/// Fixed synthesis parameters (espeak units: words/min, pitch 0-99,
/// amplitude 0-200).
pub const SPEECH_RATE_WPM: u32 = 160;
pub const SPEECH_PITCH: u32 = 50;
pub const SPEECH_VOLUME: u32 = 100;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("text-to-speech is not available on this kiosk")]
    Unavailable,
    #[error("speech backend: {0}")]
    Backend(#[from] std::io::Error),
}

/// One spoken announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub voice: String,
}

/// Handle to an in-flight playback; cancelled when a newer utterance wins.
pub trait PlaybackHandle: Send {
    fn cancel(&mut self);
}

/// Platform synthesis seam.
pub trait SpeechBackend: Send + Sync {
    /// Voice identifiers the platform offers (BCP-47-style tags).
    fn voices(&self) -> Vec<String>;
    fn speak(&self, utterance: &Utterance) -> Result<Box<dyn PlaybackHandle>, SpeechError>;
}

/// Pick the closest voice for a language tag: exact match, then primary
/// subtag prefix, then whatever the platform offers first.
pub fn match_voice(voices: &[String], tag: &str) -> String {
    if voices.iter().any(|v| v == tag) {
        return tag.to_string();
    }
    let primary = tag.split('-').next().unwrap_or(tag);
    if let Some(voice) = voices.iter().find(|v| v.starts_with(primary)) {
        return voice.clone();
    }
    voices.first().cloned().unwrap_or_else(|| primary.to_string())
}

/// Process-wide announcer; owns the single active playback.
pub struct Announcer {
    backend: Option<Box<dyn SpeechBackend>>,
    current: Mutex<Option<Box<dyn PlaybackHandle>>>,
}

impl Announcer {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Announcer {
        Announcer { backend: Some(backend), current: Mutex::new(None) }
    }

    /// Announcer for kiosks without a speech capability; every `speak`
    /// fails visibly.
    pub fn disabled() -> Announcer {
        Announcer { backend: None, current: Mutex::new(None) }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Cancel whatever is playing, then start the new utterance with a
    /// voice matched to the language. Returns as soon as playback starts.
    pub fn speak(&self, text: &str, language: Language) -> Result<(), SpeechError> {
        let backend = self.backend.as_ref().ok_or(SpeechError::Unavailable)?;
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(mut playback) = current.take() {
            playback.cancel();
        }
        let voice = match_voice(&backend.voices(), language.bcp47());
        debug!(%voice, chars = text.chars().count(), "speaking");
        *current = Some(backend.speak(&Utterance { text: text.to_string(), voice })?);
        Ok(())
    }

    /// Stop the active utterance, if any.
    pub fn cancel(&self) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(mut playback) = current.take() {
            playback.cancel();
        }
    }
}

/// espeak-style command-line backend. The child process is killed when a
/// newer utterance preempts it.
pub struct EspeakBackend {
    command: String,
}

impl EspeakBackend {
    /// Probe the synthesis command once; kiosks without it run with the
    /// announcer disabled.
    pub fn probe(command: &str) -> Result<EspeakBackend, SpeechError> {
        let status = std::process::Command::new(command)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(s) if s.success() => Ok(EspeakBackend { command: command.to_string() }),
            _ => Err(SpeechError::Unavailable),
        }
    }
}

struct ChildPlayback {
    child: tokio::process::Child,
}

impl PlaybackHandle for ChildPlayback {
    fn cancel(&mut self) {
        let _ = self.child.start_kill();
    }
}

impl SpeechBackend for EspeakBackend {
    fn voices(&self) -> Vec<String> {
        // `espeak --voices` lists one voice per line after a header:
        // Pty Language Age/Gender VoiceName ...
        let output = match std::process::Command::new(&self.command).arg("--voices").output() {
            Ok(output) => output,
            Err(_) => return Vec::new(),
        };
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().nth(1).map(str::to_string))
            .collect()
    }

    fn speak(&self, utterance: &Utterance) -> Result<Box<dyn PlaybackHandle>, SpeechError> {
        let child = tokio::process::Command::new(&self.command)
            .arg("-v")
            .arg(&utterance.voice)
            .arg("-s")
            .arg(SPEECH_RATE_WPM.to_string())
            .arg("-p")
            .arg(SPEECH_PITCH.to_string())
            .arg("-a")
            .arg(SPEECH_VOLUME.to_string())
            .arg(&utterance.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        Ok(Box::new(ChildPlayback { child }))
    }
}

/// Recording backend for tests; shares its event log with the test body.
#[derive(Clone, Default)]
pub struct NullBackend {
    voices: Vec<String>,
    events: Arc<Mutex<Vec<SpeechEvent>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Spoke { text: String, voice: String },
    Cancelled,
}

impl NullBackend {
    pub fn with_voices(voices: Vec<String>) -> NullBackend {
        NullBackend { voices, events: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn events(&self) -> Vec<SpeechEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

struct NullPlayback {
    events: Arc<Mutex<Vec<SpeechEvent>>>,
}

impl PlaybackHandle for NullPlayback {
    fn cancel(&mut self) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SpeechEvent::Cancelled);
    }
}

impl SpeechBackend for NullBackend {
    fn voices(&self) -> Vec<String> {
        self.voices.clone()
    }

    fn speak(&self, utterance: &Utterance) -> Result<Box<dyn PlaybackHandle>, SpeechError> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SpeechEvent::Spoke {
                text: utterance.text.clone(),
                voice: utterance.voice.clone(),
            });
        Ok(Box::new(NullPlayback { events: Arc::clone(&self.events) }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_matching_prefers_exact_then_prefix_then_first() {
        let voices: Vec<String> = ["en-IN", "hi", "ta"].map(String::from).to_vec();
        assert_eq!(match_voice(&voices, "en-IN"), "en-IN");
        assert_eq!(match_voice(&voices, "hi-IN"), "hi");
        assert_eq!(match_voice(&voices, "gu-IN"), "en-IN");
        assert_eq!(match_voice(&[], "bn-IN"), "bn");
    }

    #[test]
    fn newest_utterance_cancels_the_previous_one() {
        let backend = NullBackend::with_voices(vec!["hi".into(), "en".into()]);
        let probe = backend.clone();
        let announcer = Announcer::new(Box::new(backend));

        announcer.speak("first", Language::Hi).unwrap();
        announcer.speak("second", Language::Hi).unwrap();

        let events = probe.events();
        assert_eq!(
            events,
            vec![
                SpeechEvent::Spoke { text: "first".into(), voice: "hi".into() },
                SpeechEvent::Cancelled,
                SpeechEvent::Spoke { text: "second".into(), voice: "hi".into() },
            ]
        );
    }

    #[test]
    fn explicit_cancel_stops_playback() {
        let backend = NullBackend::with_voices(vec!["en".into()]);
        let probe = backend.clone();
        let announcer = Announcer::new(Box::new(backend));
        announcer.speak("hello", Language::En).unwrap();
        announcer.cancel();
        announcer.cancel(); // second cancel is a no-op
        assert_eq!(probe.events().last(), Some(&SpeechEvent::Cancelled));
        assert_eq!(probe.events().len(), 2);
    }

    #[test]
    fn disabled_announcer_fails_visibly() {
        let announcer = Announcer::disabled();
        assert!(!announcer.is_available());
        assert!(matches!(
            announcer.speak("hello", Language::En),
            Err(SpeechError::Unavailable)
        ));
    }
}
