//! Kiosk navigation state machine: screens, the accumulated session, and
//! the two in-flight guards. Forward transitions validate their
//! preconditions and leave all state untouched on rejection; back edges
//! are unconditional.

use crate::types::{Department, Language, ServiceKind, Token};
use crate::validate::{validate, FormInput, ValidationError};
use thiserror::Error;
use tracing::debug;

/// One discrete step of the kiosk wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Language,
    Department,
    Service,
    Form,
    Confirm,
    Receipt,
    Track,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("{action} is not allowed on the {from:?} screen")]
    InvalidTransition { from: Screen, action: &'static str },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("a status lookup is already in flight")]
    LookupInFlight,
}

/// Citizen input accumulated across the wizard. Reset restores the initial
/// empty value, including the default language, so every kiosk session
/// re-selects its language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    pub language: Language,
    pub department: Option<Department>,
    pub service: Option<ServiceKind>,
    pub name: String,
    pub mobile: String,
    pub problem: String,
    pub file_name: Option<String>,
}

impl UserSession {
    pub fn reset(&mut self) {
        *self = UserSession::default();
    }
}

/// Current screen plus session, token, and in-flight guards.
#[derive(Debug, Default)]
pub struct KioskFlow {
    screen: Screen,
    session: UserSession,
    token: Option<Token>,
    submitting: bool,
    tracking: bool,
}

impl KioskFlow {
    pub fn new() -> KioskFlow {
        KioskFlow::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    pub fn token(&self) -> Option<Token> {
        self.token
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    fn require(&self, expected: Screen, action: &'static str) -> Result<(), FlowError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(FlowError::InvalidTransition { from: self.screen, action })
        }
    }

    fn goto(&mut self, next: Screen) {
        debug!(from = ?self.screen, to = ?next, "screen transition");
        self.screen = next;
    }

    /// Welcome → Language on the explicit start action.
    pub fn start(&mut self) -> Result<(), FlowError> {
        self.require(Screen::Welcome, "start")?;
        self.goto(Screen::Language);
        Ok(())
    }

    /// Language → Department; records the chosen language.
    pub fn choose_language(&mut self, language: Language) -> Result<(), FlowError> {
        self.require(Screen::Language, "choose_language")?;
        self.session.language = language;
        self.goto(Screen::Department);
        Ok(())
    }

    /// Department → Service; records the chosen department.
    pub fn choose_department(&mut self, department: Department) -> Result<(), FlowError> {
        self.require(Screen::Department, "choose_department")?;
        self.session.department = Some(department);
        self.goto(Screen::Service);
        Ok(())
    }

    /// Service → Form, or Service → Track when the tag is `TrackStatus`.
    /// The branch is keyed off the service tag, not its localized label.
    pub fn choose_service(&mut self, service: ServiceKind) -> Result<(), FlowError> {
        self.require(Screen::Service, "choose_service")?;
        self.session.service = Some(service);
        if service == ServiceKind::TrackStatus {
            self.goto(Screen::Track);
        } else {
            self.goto(Screen::Form);
        }
        Ok(())
    }

    /// Form → Confirm, only when the validator approves. On rejection the
    /// screen and session are unchanged.
    pub fn submit_form(&mut self, input: &FormInput) -> Result<(), FlowError> {
        self.require(Screen::Form, "submit_form")?;
        let form = validate(input)?;
        self.session.name = form.name;
        self.session.mobile = form.mobile;
        self.session.problem = form.problem;
        self.session.file_name = form.file_name;
        self.goto(Screen::Confirm);
        Ok(())
    }

    /// Arm the single-submission guard on the confirm screen.
    pub fn begin_submission(&mut self) -> Result<(), FlowError> {
        self.require(Screen::Confirm, "begin_submission")?;
        if self.submitting {
            return Err(FlowError::SubmissionInFlight);
        }
        self.submitting = true;
        Ok(())
    }

    /// Confirm → Receipt after the adapter succeeds; stores the token and
    /// releases the guard.
    pub fn complete_submission(&mut self, token: Token) -> Result<(), FlowError> {
        if !self.submitting {
            return Err(FlowError::InvalidTransition {
                from: self.screen,
                action: "complete_submission",
            });
        }
        self.submitting = false;
        self.token = Some(token);
        self.goto(Screen::Receipt);
        Ok(())
    }

    /// Release the guard after a failed submission; the screen stays on
    /// Confirm so the citizen can retry.
    pub fn fail_submission(&mut self) {
        self.submitting = false;
    }

    /// Arm the single-lookup guard on the track screen.
    pub fn begin_lookup(&mut self) -> Result<(), FlowError> {
        self.require(Screen::Track, "begin_lookup")?;
        if self.tracking {
            return Err(FlowError::LookupInFlight);
        }
        self.tracking = true;
        Ok(())
    }

    /// Release the lookup guard; the track screen handles its own retry loop.
    pub fn end_lookup(&mut self) {
        self.tracking = false;
    }

    /// Unconditional back edge to the immediate predecessor. Welcome has no
    /// predecessor and Receipt only offers the home action.
    pub fn back(&mut self) -> Result<(), FlowError> {
        let target = match self.screen {
            Screen::Language => Screen::Welcome,
            Screen::Department => Screen::Language,
            Screen::Service => Screen::Department,
            Screen::Form => Screen::Service,
            Screen::Confirm => Screen::Form,
            Screen::Track => Screen::Service,
            Screen::Welcome | Screen::Receipt => {
                return Err(FlowError::InvalidTransition { from: self.screen, action: "back" })
            }
        };
        self.goto(target);
        Ok(())
    }

    /// Receipt → Welcome; clears the session, token, and guards.
    pub fn go_home(&mut self) -> Result<(), FlowError> {
        self.require(Screen::Receipt, "go_home")?;
        self.session.reset();
        self.token = None;
        self.submitting = false;
        self.tracking = false;
        self.goto(Screen::Welcome);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Field;

    fn filled_form() -> FormInput {
        FormInput {
            name: "Test User".into(),
            mobile: "9876543210".into(),
            problem: "leak".into(),
            file_name: None,
        }
    }

    fn flow_at_form() -> KioskFlow {
        let mut flow = KioskFlow::new();
        flow.start().unwrap();
        flow.choose_language(Language::Hi).unwrap();
        flow.choose_department(Department::Water).unwrap();
        flow.choose_service(ServiceKind::RegisterComplaint).unwrap();
        flow
    }

    #[test]
    fn transitions() {
        let mut flow = flow_at_form();
        assert_eq!(flow.screen(), Screen::Form);
        flow.submit_form(&filled_form()).unwrap();
        assert_eq!(flow.screen(), Screen::Confirm);
        flow.begin_submission().unwrap();
        flow.complete_submission(Token::from_id(7)).unwrap();
        assert_eq!(flow.screen(), Screen::Receipt);
        assert_eq!(flow.token(), Some(Token::from_id(7)));
    }

    #[test]
    fn track_service_branches_to_track_screen() {
        let mut flow = KioskFlow::new();
        flow.start().unwrap();
        flow.choose_language(Language::En).unwrap();
        flow.choose_department(Department::Gas).unwrap();
        flow.choose_service(ServiceKind::TrackStatus).unwrap();
        assert_eq!(flow.screen(), Screen::Track);
        // track is a leaf branch: back returns to service selection
        flow.back().unwrap();
        assert_eq!(flow.screen(), Screen::Service);
    }

    #[test]
    fn invalid_form_blocks_transition_and_keeps_session() {
        let mut flow = flow_at_form();
        let before = flow.session().clone();
        let mut input = filled_form();
        input.mobile = "12345".into();
        assert_eq!(
            flow.submit_form(&input),
            Err(FlowError::Validation(ValidationError::InvalidMobileFormat))
        );
        assert_eq!(flow.screen(), Screen::Form);
        assert_eq!(flow.session(), &before);

        input.mobile.clear();
        assert_eq!(
            flow.submit_form(&input),
            Err(FlowError::Validation(ValidationError::MissingField(Field::Mobile)))
        );
        assert_eq!(flow.screen(), Screen::Form);
    }

    #[test]
    fn forward_actions_rejected_on_wrong_screen() {
        let mut flow = KioskFlow::new();
        assert!(matches!(
            flow.choose_department(Department::Gas),
            Err(FlowError::InvalidTransition { from: Screen::Welcome, .. })
        ));
        assert_eq!(flow.screen(), Screen::Welcome);
    }

    #[test]
    fn submission_guard_blocks_duplicates() {
        let mut flow = flow_at_form();
        flow.submit_form(&filled_form()).unwrap();
        flow.begin_submission().unwrap();
        assert_eq!(flow.begin_submission(), Err(FlowError::SubmissionInFlight));
        flow.fail_submission();
        assert_eq!(flow.screen(), Screen::Confirm);
        flow.begin_submission().unwrap();
    }

    #[test]
    fn lookup_guard_blocks_duplicates() {
        let mut flow = KioskFlow::new();
        flow.start().unwrap();
        flow.choose_language(Language::En).unwrap();
        flow.choose_department(Department::Water).unwrap();
        flow.choose_service(ServiceKind::TrackStatus).unwrap();
        flow.begin_lookup().unwrap();
        assert_eq!(flow.begin_lookup(), Err(FlowError::LookupInFlight));
        flow.end_lookup();
        assert!(!flow.is_tracking());
        flow.begin_lookup().unwrap();
    }

    #[test]
    fn go_home_resets_everything_regardless_of_path() {
        let mut flow = flow_at_form();
        flow.submit_form(&filled_form()).unwrap();
        flow.begin_submission().unwrap();
        flow.complete_submission(Token::from_id(99)).unwrap();
        flow.go_home().unwrap();
        assert_eq!(flow.screen(), Screen::Welcome);
        assert_eq!(flow.session(), &UserSession::default());
        assert_eq!(flow.session().language, Language::En);
        assert_eq!(flow.token(), None);
        assert!(!flow.is_submitting() && !flow.is_tracking());
    }

    #[test]
    fn back_walks_to_the_predecessor() {
        let mut flow = flow_at_form();
        flow.back().unwrap();
        assert_eq!(flow.screen(), Screen::Service);
        flow.back().unwrap();
        assert_eq!(flow.screen(), Screen::Department);
        flow.back().unwrap();
        assert_eq!(flow.screen(), Screen::Language);
        flow.back().unwrap();
        assert_eq!(flow.screen(), Screen::Welcome);
        assert!(flow.back().is_err());
    }
}
