use tracing::{debug, warn};

use crate::ast::Extent;

/// Source lines spanned by `extent`, verbatim and with their line endings.
///
/// Returns `None` when the extent crosses files or the file cannot be read.
pub fn text_by_extent(extent: &Extent) -> Option<String> {
    if !extent.is_single_file() {
        debug!(
            "extent spans {:?} and {:?}, not reading",
            extent.start.file, extent.end.file
        );
        return None;
    }
    let file = extent.start.file_name()?;
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            warn!("failed to read {file} for extent: {e}");
            return None;
        },
    };
    Some(lines_in_range(&content, extent.start.line, extent.end.line))
}

/// Lines `first..=last` (1-based) of `content`, clamped to the file.
pub(crate) fn lines_in_range(
    content: &str,
    first: u32,
    last: u32,
) -> String {
    let skip = first.saturating_sub(1) as usize;
    let take = (last as usize).saturating_sub(skip);
    content.split_inclusive('\n').skip(skip).take(take).collect()
}

#[cfg(test)]
#[path = "../../tests/src/source/extent_tests.rs"]
mod tests;
