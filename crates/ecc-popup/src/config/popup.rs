use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::popup::{MAX_POPUP_HEIGHT, MAX_POPUP_WIDTH, PopupOptions};

const MIN_POPUP_EXTENT: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct PopupSettings {
    /// Append the source text of type declarations to info popups.
    pub show_type_body: bool,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            show_type_body: true,
            max_width: MAX_POPUP_WIDTH,
            max_height: MAX_POPUP_HEIGHT,
        }
    }
}

impl PopupSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: PopupSettingsPatch,
    ) {
        if let Some(v) = patch.show_type_body {
            self.show_type_body = v;
        }
        if let Some(v) = patch.max_width {
            self.max_width = v;
        }
        if let Some(v) = patch.max_height {
            self.max_height = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_width = self.max_width.max(MIN_POPUP_EXTENT);
        self.max_height = self.max_height.max(MIN_POPUP_EXTENT);
    }

    pub fn options(&self) -> PopupOptions {
        PopupOptions {
            max_width: self.max_width,
            max_height: self.max_height,
            ..PopupOptions::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct PopupSettingsPatch {
    pub(crate) show_type_body: Option<bool>,
    pub(crate) max_width: Option<u32>,
    pub(crate) max_height: Option<u32>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, Value>,
}
