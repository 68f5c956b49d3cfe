use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

const DEFAULT_CLANG_BINARY: &str = "clang++";

#[derive(Debug, Clone, PartialEq)]
pub struct ClangSettings {
    /// Compiler used to dump the JSON AST.
    pub binary: String,
    /// Extra flags such as `-I` and `-std=`.
    pub flags: Vec<String>,
}

impl Default for ClangSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_CLANG_BINARY.to_string(),
            flags: Vec::new(),
        }
    }
}

impl ClangSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: ClangSettingsPatch,
    ) {
        if let Some(v) = patch.binary {
            self.binary = v;
        }
        if let Some(v) = patch.flags {
            self.flags = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.binary = self.binary.trim().to_string();
        if self.binary.is_empty() {
            self.binary = DEFAULT_CLANG_BINARY.to_string();
        }
        self.flags = self.flags.iter().map(|f| f.trim().to_string()).filter(|f| !f.is_empty()).collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ClangSettingsPatch {
    pub(crate) binary: Option<String>,
    pub(crate) flags: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
