//! Static localization catalog for the kiosk screens.
//!
//! Catalogs are `key = value` files embedded at compile time, one per
//! supported language. Every language must define every required key; the
//! check runs when the catalog is loaded so a translation gap is a startup
//! failure, never an empty string at render time.

use crate::types::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

/// Catalog keys referenced by the kiosk screens.
pub mod key {
    pub const WELCOME: &str = "welcome";
    pub const WELCOME_SUBTITLE: &str = "welcome_subtitle";
    pub const START: &str = "start";
    pub const SELECT_LANGUAGE: &str = "select_language";
    pub const SELECT_DEPARTMENT: &str = "select_department";
    pub const SELECT_SERVICE: &str = "select_service";
    pub const FILL_FORM: &str = "fill_form";
    pub const CONFIRM: &str = "confirm";
    pub const RECEIPT: &str = "receipt";
    pub const BACK: &str = "back";
    pub const NEXT: &str = "next";
    pub const SUBMIT: &str = "submit";
    pub const HOME: &str = "home";
    pub const ELECTRICITY: &str = "electricity";
    pub const WATER: &str = "water";
    pub const GAS: &str = "gas";
    pub const MUNICIPAL: &str = "municipal";
    pub const COMPLAINT: &str = "complaint";
    pub const NEW_APPLICATION: &str = "new_application";
    pub const TRACK_STATUS: &str = "track_status";
    pub const NAME: &str = "name";
    pub const MOBILE: &str = "mobile";
    pub const PROBLEM: &str = "problem";
    pub const ENTER_YOUR_NAME: &str = "enter_your_name";
    pub const ENTER_MOBILE: &str = "enter_mobile";
    pub const DESCRIBE_PROBLEM: &str = "describe_problem";
    pub const REVIEW_DETAILS: &str = "review_details";
    pub const REVIEW_ALL_DETAILS: &str = "review_all_details";
    pub const IF_CORRECT_SUBMIT: &str = "if_correct_submit";
    pub const DEPARTMENT: &str = "department";
    pub const SERVICE: &str = "service";
    pub const TOKEN_NUMBER: &str = "token_number";
    pub const TOKEN_IS: &str = "token_is";
    pub const SMS_SENT_TO: &str = "sms_sent_to";
    pub const REGISTERED_SUCCESSFULLY: &str = "registered_successfully";
    pub const THANK_YOU: &str = "thank_you";
    pub const KEEP_TOKEN: &str = "keep_token";
    pub const ENTER_TOKEN_TO_TRACK: &str = "enter_token_to_track";
    pub const CLICK_TRACK: &str = "click_track";
    pub const ENTER_VALID_TOKEN: &str = "enter_valid_token";
    pub const INVALID_TOKEN: &str = "invalid_token";
    pub const COMPLAINT_DETAILS: &str = "complaint_details";
    pub const STATUS: &str = "status";
    pub const DESCRIPTION: &str = "description";
    pub const LOCATION: &str = "location";
    pub const SUBMITTED_ON: &str = "submitted_on";
    pub const NOT_PROVIDED: &str = "not_provided";
    pub const AVAILABLE_LANGUAGES: &str = "available_languages";
    pub const CHOOSE_LANGUAGE_PROMPT: &str = "choose_language_prompt";
    pub const AVAILABLE_DEPARTMENTS: &str = "available_departments";
    pub const AVAILABLE_SERVICES: &str = "available_services";
    pub const CHOOSE_PROMPT: &str = "choose_prompt";
    pub const MISSING_FIELD: &str = "missing_field";
    pub const INVALID_MOBILE: &str = "invalid_mobile";
    pub const SUBMIT_ERROR: &str = "submit_error";
    pub const SPEECH_UNAVAILABLE: &str = "speech_unavailable";
    pub const SUBMITTING: &str = "submitting";
    pub const CHECKING: &str = "checking";
}

/// Every key a screen may ask for. `Catalog::verify` requires each language
/// to define all of them.
pub const REQUIRED_KEYS: &[&str] = &[
    key::WELCOME,
    key::WELCOME_SUBTITLE,
    key::START,
    key::SELECT_LANGUAGE,
    key::SELECT_DEPARTMENT,
    key::SELECT_SERVICE,
    key::FILL_FORM,
    key::CONFIRM,
    key::RECEIPT,
    key::BACK,
    key::NEXT,
    key::SUBMIT,
    key::HOME,
    key::ELECTRICITY,
    key::WATER,
    key::GAS,
    key::MUNICIPAL,
    key::COMPLAINT,
    key::NEW_APPLICATION,
    key::TRACK_STATUS,
    key::NAME,
    key::MOBILE,
    key::PROBLEM,
    key::ENTER_YOUR_NAME,
    key::ENTER_MOBILE,
    key::DESCRIBE_PROBLEM,
    key::REVIEW_DETAILS,
    key::REVIEW_ALL_DETAILS,
    key::IF_CORRECT_SUBMIT,
    key::DEPARTMENT,
    key::SERVICE,
    key::TOKEN_NUMBER,
    key::TOKEN_IS,
    key::SMS_SENT_TO,
    key::REGISTERED_SUCCESSFULLY,
    key::THANK_YOU,
    key::KEEP_TOKEN,
    key::ENTER_TOKEN_TO_TRACK,
    key::CLICK_TRACK,
    key::ENTER_VALID_TOKEN,
    key::INVALID_TOKEN,
    key::COMPLAINT_DETAILS,
    key::STATUS,
    key::DESCRIPTION,
    key::LOCATION,
    key::SUBMITTED_ON,
    key::NOT_PROVIDED,
    key::AVAILABLE_LANGUAGES,
    key::CHOOSE_LANGUAGE_PROMPT,
    key::AVAILABLE_DEPARTMENTS,
    key::AVAILABLE_SERVICES,
    key::CHOOSE_PROMPT,
    key::MISSING_FIELD,
    key::INVALID_MOBILE,
    key::SUBMIT_ERROR,
    key::SPEECH_UNAVAILABLE,
    key::SUBMITTING,
    key::CHECKING,
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum I18nError {
    #[error("language `{lang}` is missing required key `{key}`")]
    MissingKey { lang: &'static str, key: &'static str },
}

const SOURCES: [(Language, &str); 7] = [
    (Language::En, include_str!("../i18n/en.ftl")),
    (Language::Hi, include_str!("../i18n/hi.ftl")),
    (Language::Bn, include_str!("../i18n/bn.ftl")),
    (Language::Te, include_str!("../i18n/te.ftl")),
    (Language::Mr, include_str!("../i18n/mr.ftl")),
    (Language::Ta, include_str!("../i18n/ta.ftl")),
    (Language::Gu, include_str!("../i18n/gu.ftl")),
];

/// Parsed, verified string tables for all supported languages.
pub struct Catalog {
    tables: HashMap<Language, HashMap<&'static str, &'static str>>,
}

impl Catalog {
    /// Parse the embedded catalogs and verify completeness.
    pub fn load_embedded() -> Result<Catalog, I18nError> {
        let mut tables = HashMap::with_capacity(SOURCES.len());
        for (lang, src) in SOURCES {
            tables.insert(lang, parse_table(src));
        }
        let catalog = Catalog { tables };
        catalog.verify()?;
        Ok(catalog)
    }

    /// Require every supported language to define every required key.
    pub fn verify(&self) -> Result<(), I18nError> {
        for lang in Language::ALL {
            let table = self.tables.get(&lang);
            for key in REQUIRED_KEYS {
                if !table.is_some_and(|t| t.contains_key(key)) {
                    return Err(I18nError::MissingKey { lang: lang.code(), key });
                }
            }
        }
        Ok(())
    }

    /// Resolve `key` for `lang`. Unknown keys fall back to the key itself.
    pub fn text<'a>(&self, lang: Language, key: &'a str) -> &'a str {
        self.tables
            .get(&lang)
            .and_then(|t| t.get(key).copied())
            .unwrap_or(key)
    }
}

fn parse_table(src: &'static str) -> HashMap<&'static str, &'static str> {
    let mut entries = HashMap::new();
    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = trimmed.split_once('=') {
            entries.insert(k.trim(), v.trim());
        }
    }
    entries
}

// The catalogs are compiled in, so an incomplete table is a build defect;
// refuse to serve partial translations.
#[allow(clippy::panic)]
static CATALOG: Lazy<Catalog> = Lazy::new(|| match Catalog::load_embedded() {
    Ok(catalog) => catalog,
    Err(e) => panic!("embedded localization catalog is incomplete: {e}"),
});

/// Look up `key` for `lang` from the process-wide catalog.
pub fn text(lang: Language, key: &str) -> &str {
    CATALOG.text(lang, key)
}

/// Startup-time completeness check; call before rendering any screen.
pub fn verify_catalogs() -> Result<(), I18nError> {
    Catalog::load_embedded().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_defines_every_required_key() {
        let catalog = Catalog::load_embedded().unwrap();
        assert_eq!(catalog.verify(), Ok(()));
    }

    #[test]
    fn lookup_returns_localized_text() {
        let catalog = Catalog::load_embedded().unwrap();
        assert_eq!(catalog.text(Language::En, key::BACK), "Back");
        assert_eq!(catalog.text(Language::Hi, key::BACK), "पीछे");
        assert_eq!(catalog.text(Language::Gu, key::START), "શરૂ કરો");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        let catalog = Catalog::load_embedded().unwrap();
        assert_eq!(catalog.text(Language::Ta, "no_such_key"), "no_such_key");
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let table = parse_table("# heading\n\n a = b \nmalformed line\n");
        assert_eq!(table.get("a").copied(), Some("b"));
        assert_eq!(table.len(), 1);
    }
}
