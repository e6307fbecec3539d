#![forbid(unsafe_code)]

//! Core of the SUVIDHA public service kiosk: domain types, the localization
//! catalog, the screen navigation state machine, form validation, and
//! deployment configuration. Network adapters and the speech announcer live
//! in their own crates.

pub mod config;
pub mod error;
pub mod flow;
pub mod i18n;
pub mod types;
pub mod validate;

pub use config::KioskConfig;
pub use error::{Error, Result};
pub use flow::{FlowError, KioskFlow, Screen, UserSession};
pub use i18n::{text, Catalog, I18nError};
pub use types::{ComplaintStatus, Department, Language, ServiceKind, Token, TokenError};
pub use validate::{validate, Field, FormInput, ValidForm, ValidationError};
