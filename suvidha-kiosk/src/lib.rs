#![forbid(unsafe_code)]

//! Kiosk application engine for SUVIDHA: the citizen flow driver, the
//! speech announcer, and the official dashboard surface.

pub mod admin;
pub mod app;
pub mod speech;

pub use app::{KioskApp, KioskError};
pub use speech::{Announcer, EspeakBackend, SpeechError};
