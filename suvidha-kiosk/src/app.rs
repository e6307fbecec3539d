//! Kiosk engine: wires the navigation flow to the complaint service and
//! the speech announcer. All async work is single-shot and guarded; the
//! guards are always released on both success and failure paths.

use crate::speech::{Announcer, SpeechError};
use suvidha_api::{ApiError, Complaint, ComplaintApi, NewComplaint};
use suvidha_core::flow::{FlowError, KioskFlow};
use suvidha_core::i18n::{self, key};
use suvidha_core::{KioskConfig, Language, Screen, Token, TokenError};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum KioskError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("submission failed: {0}")]
    Submission(ApiError),
    #[error("status lookup failed: {0}")]
    Lookup(ApiError),
    #[error("session is missing a department or service selection")]
    IncompleteSession,
}

impl KioskError {
    /// Localized message to show the citizen. Lookup transport failures and
    /// not-found collapse into the single generic token message here.
    pub fn user_message(&self, language: Language) -> &str {
        let key = match self {
            KioskError::Flow(FlowError::Validation(e)) => e.message_key(),
            KioskError::Flow(FlowError::SubmissionInFlight) => key::SUBMITTING,
            KioskError::Flow(FlowError::LookupInFlight) => key::CHECKING,
            KioskError::Flow(FlowError::InvalidTransition { .. })
            | KioskError::IncompleteSession
            | KioskError::Submission(_) => key::SUBMIT_ERROR,
            KioskError::Token(_) => key::ENTER_VALID_TOKEN,
            KioskError::Lookup(_) => key::INVALID_TOKEN,
        };
        i18n::text(language, key)
    }
}

/// One kiosk terminal: flow state, complaint service adapter, announcer.
pub struct KioskApp<A> {
    flow: KioskFlow,
    api: A,
    location: String,
    announcer: Announcer,
}

impl<A: ComplaintApi> KioskApp<A> {
    pub fn new(api: A, cfg: &KioskConfig, announcer: Announcer) -> KioskApp<A> {
        KioskApp {
            flow: KioskFlow::new(),
            api,
            location: cfg.default_location.clone(),
            announcer,
        }
    }

    pub fn flow(&self) -> &KioskFlow {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut KioskFlow {
        &mut self.flow
    }

    pub fn screen(&self) -> Screen {
        self.flow.screen()
    }

    pub fn language(&self) -> Language {
        self.flow.session().language
    }

    pub fn announcer(&self) -> &Announcer {
        &self.announcer
    }

    /// Submit the confirmed complaint. The guard blocks a second submission
    /// while one is pending; it is released on every exit path.
    pub async fn submit(&mut self) -> Result<Token, KioskError> {
        self.flow.begin_submission()?;
        let payload = match NewComplaint::from_session(self.flow.session(), &self.location) {
            Some(payload) => payload,
            None => {
                self.flow.fail_submission();
                return Err(KioskError::IncompleteSession);
            }
        };
        info!(issue_type = %payload.issue_type, "submitting complaint");
        match self.api.create_complaint(&payload).await {
            Ok(resp) => {
                let token = Token::from_id(resp.complaint.id);
                self.flow.complete_submission(token)?;
                Ok(token)
            }
            Err(e) => {
                warn!("submission failed: {e}");
                self.flow.fail_submission();
                Err(KioskError::Submission(e))
            }
        }
    }

    /// Look up a complaint from the track screen. Malformed tokens fail
    /// fast without touching the network; the lookup guard covers only the
    /// actual request.
    pub async fn track(&mut self, input: &str) -> Result<Complaint, KioskError> {
        let token = Token::parse(input)?;
        self.flow.begin_lookup()?;
        let result = self.api.get_complaint(token.id()).await;
        self.flow.end_lookup();
        result.map_err(KioskError::Lookup)
    }

    /// Speak arbitrary text in the session language.
    pub fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.announcer.speak(text, self.language())
    }

    /// Read the current screen aloud, the way the on-screen speaker icon
    /// does.
    pub fn speak_screen(&self) -> Result<(), SpeechError> {
        let script = self.screen_script();
        self.speak(&script)
    }

    /// Compose the spoken description of the current screen from the
    /// catalog and the accumulated session.
    pub fn screen_script(&self) -> String {
        let lang = self.language();
        let t = |key| i18n::text(lang, key);
        let session = self.flow.session();
        match self.flow.screen() {
            Screen::Welcome => {
                format!("{} - {}. {}.", t(key::WELCOME), t(key::WELCOME_SUBTITLE), t(key::START))
            }
            Screen::Language => {
                let names: Vec<&str> =
                    Language::ALL.iter().map(|l| l.native_name()).collect();
                format!(
                    "{}. {}: {}. {}",
                    t(key::SELECT_LANGUAGE),
                    t(key::AVAILABLE_LANGUAGES),
                    names.join(", "),
                    t(key::CHOOSE_LANGUAGE_PROMPT),
                )
            }
            Screen::Department => format!(
                "{}. {} {}, {}, {}, {}. {}",
                t(key::SELECT_DEPARTMENT),
                t(key::AVAILABLE_DEPARTMENTS),
                t(key::ELECTRICITY),
                t(key::WATER),
                t(key::GAS),
                t(key::MUNICIPAL),
                t(key::CHOOSE_PROMPT),
            ),
            Screen::Service => format!(
                "{}. {} {}, {}, {}. {}",
                t(key::SELECT_SERVICE),
                t(key::AVAILABLE_SERVICES),
                t(key::COMPLAINT),
                t(key::NEW_APPLICATION),
                t(key::TRACK_STATUS),
                t(key::CHOOSE_PROMPT),
            ),
            Screen::Form => {
                let or = |value: &str, prompt: &'static str| {
                    if value.is_empty() { t(prompt).to_string() } else { value.to_string() }
                };
                format!(
                    "{}. {}: {}. {}: {}. {}: {}. {}.",
                    t(key::FILL_FORM),
                    t(key::NAME),
                    or(&session.name, key::ENTER_YOUR_NAME),
                    t(key::MOBILE),
                    or(&session.mobile, key::ENTER_MOBILE),
                    t(key::PROBLEM),
                    or(&session.problem, key::DESCRIBE_PROBLEM),
                    t(key::NEXT),
                )
            }
            Screen::Confirm => {
                let department = session
                    .department
                    .map(|d| t(d.message_key()))
                    .unwrap_or_default();
                let service = session.service.map(|s| t(s.message_key())).unwrap_or_default();
                format!(
                    "{}. {}. {}: {}. {}: {}. {}: {}. {}: {}. {}: {}. {}",
                    t(key::CONFIRM),
                    t(key::REVIEW_ALL_DETAILS),
                    t(key::DEPARTMENT),
                    department,
                    t(key::SERVICE),
                    service,
                    t(key::NAME),
                    session.name,
                    t(key::MOBILE),
                    session.mobile,
                    t(key::PROBLEM),
                    session.problem,
                    t(key::IF_CORRECT_SUBMIT),
                )
            }
            Screen::Receipt => {
                let token =
                    self.flow.token().map(|tok| tok.to_string()).unwrap_or_default();
                format!(
                    "{}. {} {}. {} {}. {}. {}. {}.",
                    t(key::RECEIPT),
                    t(key::TOKEN_IS),
                    token,
                    t(key::SMS_SENT_TO),
                    session.mobile,
                    t(key::REGISTERED_SUCCESSFULLY),
                    t(key::THANK_YOU),
                    t(key::KEEP_TOKEN),
                )
            }
            Screen::Track => format!(
                "{}. {}. {}.",
                t(key::TRACK_STATUS),
                t(key::ENTER_TOKEN_TO_TRACK),
                t(key::CLICK_TRACK),
            ),
        }
    }
}
