use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Kiosk deployment settings. The complaint API base URL is the only value
/// most installations change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KioskConfig {
    pub api_base_url: String,
    /// Location stamped onto every submitted complaint.
    pub default_location: String,
    pub request_timeout_ms: u64,
    pub log_level: String,
    /// Command used for speech synthesis; probed at startup.
    pub speech_command: String,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".into(),
            default_location: "Delhi".into(),
            request_timeout_ms: 5_000,
            log_level: "info".into(),
            speech_command: "espeak".into(),
        }
    }
}

impl KioskConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&data).map_err(|e| Error::config(format!("toml parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("SUVIDHA_API_URL") {
            cfg.api_base_url = v;
        }
        if let Ok(v) = std::env::var("SUVIDHA_LOCATION") {
            cfg.default_location = v;
        }
        if let Ok(v) = std::env::var("SUVIDHA_TIMEOUT_MS") {
            cfg.request_timeout_ms = v
                .parse()
                .map_err(|_| Error::config(format!("invalid SUVIDHA_TIMEOUT_MS: {v}")))?;
        }
        if let Ok(v) = std::env::var("SUVIDHA_LOG_LEVEL") {
            cfg.log_level = v;
        }
        if let Ok(v) = std::env::var("SUVIDHA_SPEECH_CMD") {
            cfg.speech_command = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let allowed = ["trace", "debug", "info", "warn", "error"];
        if !allowed.contains(&self.log_level.as_str()) {
            return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(Error::config("api_base_url must not be empty"));
        }
        if self.request_timeout_ms == 0 {
            return Err(Error::config("request_timeout_ms must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_validate() {
        assert!(KioskConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let cfg = KioskConfig { log_level: "chatty".into(), ..KioskConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn loads_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_base_url = \"http://kiosk.local/api\"\n\
             default_location = \"Pune\"\n\
             request_timeout_ms = 2500\n\
             log_level = \"debug\"\n\
             speech_command = \"espeak-ng\""
        )
        .unwrap();
        let cfg = KioskConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.api_base_url, "http://kiosk.local/api");
        assert_eq!(cfg.default_location, "Pune");
        assert_eq!(cfg.request_timeout_ms, 2500);
    }

    #[test]
    fn file_with_bad_timeout_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_base_url = \"x\"\ndefault_location = \"d\"\nrequest_timeout_ms = 0\n\
             log_level = \"info\"\nspeech_command = \"espeak\""
        )
        .unwrap();
        assert!(KioskConfig::load_from_file(file.path()).is_err());
    }
}
