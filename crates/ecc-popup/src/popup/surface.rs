/// Geometry and styling hints passed along with a popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupOptions {
    pub max_width: u32,
    pub max_height: u32,
    pub wrapper_class: &'static str,
    /// Text offset the popup is anchored to; `None` means the caret.
    pub anchor: Option<usize>,
}

pub const WRAPPER_CLASS: &str = "ECC";
pub const MAX_POPUP_WIDTH: u32 = 1800;
pub const MAX_POPUP_HEIGHT: u32 = 800;

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: MAX_POPUP_WIDTH,
            max_height: MAX_POPUP_HEIGHT,
            wrapper_class: WRAPPER_CLASS,
            anchor: None,
        }
    }
}

/// Host-side display of rendered popups.
///
/// Implementations own the stylesheet and wire link clicks back to
/// navigation, see [`crate::link::NavigationTarget`].
pub trait PopupSurface {
    fn show_popup(
        &self,
        markdown: &str,
        options: &PopupOptions,
    );
}
