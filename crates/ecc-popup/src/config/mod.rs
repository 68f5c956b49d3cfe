//! Settings, one file per category.
//!
//! [`Settings`] aggregates the categories and merges partial updates from a
//! JSON payload or a TOML file. Unknown keys are ignored.

mod clang;
mod logging;
mod popup;

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub use clang::ClangSettings;
use clang::ClangSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
pub use popup::PopupSettings;
use popup::PopupSettingsPatch;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub const SETTINGS_SECTION_KEY: &str = "ecc";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub popup: PopupSettings,
    pub clang: ClangSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    pub fn from_payload(payload: Option<&Value>) -> Self {
        let settings = Self::default();
        match payload {
            Some(payload) => settings.merged_with_payload(payload),
            None => settings,
        }
    }

    /// Copy of `self` with `payload` applied. The payload may be the bare
    /// settings object or one scoped under [`SETTINGS_SECTION_KEY`].
    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<SettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    /// Defaults overridden by the TOML file at `path`.
    pub fn load_toml_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|error| SettingsError::Read {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
        let mut settings = Self::default();
        settings.merge_toml(&content).map_err(|reason| SettingsError::Parse {
            path: path.to_path_buf(),
            reason,
        })?;
        debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    fn merge_toml(
        &mut self,
        content: &str,
    ) -> Result<(), String> {
        let patch = toml::from_str::<SettingsPatch>(content).map_err(|error| error.to_string())?;
        self.apply_patch(patch);
        self.normalize();
        Ok(())
    }

    fn apply_patch(
        &mut self,
        patch: SettingsPatch,
    ) {
        if let Some(p) = patch.popup {
            self.popup.apply_patch(p);
        }
        if let Some(p) = patch.clang {
            self.clang.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    fn normalize(&mut self) {
        self.popup.normalize();
        self.clang.normalize();
        self.logging.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct SettingsPatch {
    popup: Option<PopupSettingsPatch>,
    clang: Option<ClangSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());
    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }
    candidates
}

#[derive(Debug)]
pub enum SettingsError {
    Read {
        path: PathBuf,
        reason: String,
    },
    Parse {
        path: PathBuf,
        reason: String,
    },
}

impl Display for SettingsError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Read { path, reason } => write!(f, "failed to read {}: {reason}", path.display()),
            Self::Parse { path, reason } => write!(f, "invalid settings in {}: {reason}", path.display()),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
