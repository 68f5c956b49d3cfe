use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use tracing::level_filters::LevelFilter;

/// Verbosity of the `ecc_popup` log target. `off` silences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Where the command-line tool logs and how much.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    /// Log file kept in addition to stderr. `--log-file` takes precedence.
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// `EnvFilter` directive for the crate's own events.
    pub fn directive(&self) -> String {
        format!("ecc_popup={}", LevelFilter::from(self.level))
    }

    pub(crate) fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(file) = patch.file {
            self.file = Some(file);
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.file = self.file.take().filter(|path| !path.as_os_str().is_empty());
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LoggingSettingsPatch {
    level: Option<LogLevel>,
    file: Option<PathBuf>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}
