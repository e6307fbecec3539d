use crate::flow::FlowError;
use crate::i18n::I18nError;
use crate::types::TokenError;
use crate::validate::ValidationError;
use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("i18n: {0}")]
    I18n(#[from] I18nError),
    #[error("flow: {0}")]
    Flow(#[from] FlowError),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("token: {0}")]
    Token(#[from] TokenError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
