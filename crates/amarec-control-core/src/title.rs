//! Recorder window identification and title scraping.
//!
//! The recorder exposes no API. Its main window title starts with a fixed
//! product marker and, while recording, embeds the active output filename
//! after a fixed-width prefix. Offsets are counted in `char`s.

use tracing::debug;

/// Leading marker of the recorder's window title.
pub const RECORDER_TITLE_MARKER: &str = "AmaRecTV";

/// Number of leading characters compared against [`RECORDER_TITLE_MARKER`].
pub const RECORDER_MARKER_LEN: usize = 8;

/// Character offset at which the active filename starts.
pub const FILENAME_OFFSET: usize = 10;

/// Shortest title that can carry a filename.
pub const MIN_RECORDING_TITLE_LEN: usize = 15;

/// Extension of the recorder's output files, including the dot.
pub const RECORDING_EXTENSION: &str = ".avi";

/// Source of visible top-level window titles.
///
/// Implementations must fail closed: if enumeration is unavailable they
/// return an empty list rather than an error.
pub trait WindowTitles {
    /// Titles of all visible top-level windows, in OS enumeration order.
    fn visible_titles(&self) -> Vec<String>;
}

/// Returns `true` if the first [`RECORDER_MARKER_LEN`] characters of `title`
/// equal the recorder marker.
pub fn is_recorder_title(title: &str) -> bool {
    title
        .chars()
        .take(RECORDER_MARKER_LEN)
        .eq(RECORDER_TITLE_MARKER.chars())
}

/// First title carrying the recorder marker, in the order given.
///
/// When several windows match, the first encountered wins. Enumeration order
/// is whatever the OS returns.
pub fn find_recorder_title<I, S>(titles: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let found = titles
        .into_iter()
        .map(Into::into)
        .find(|title| is_recorder_title(title));

    debug!(found = ?found, "Recorder window lookup");

    found
}

/// Extract the active output filename from a recorder title.
///
/// Defined only when the title is at least [`MIN_RECORDING_TITLE_LEN`]
/// characters long and ends with [`RECORDING_EXTENSION`]; the filename is
/// then everything from [`FILENAME_OFFSET`] to the end.
pub fn extract_filename(title: &str) -> Option<&str> {
    if title.chars().count() < MIN_RECORDING_TITLE_LEN || !title.ends_with(RECORDING_EXTENSION) {
        return None;
    }

    let (start, _) = title.char_indices().nth(FILENAME_OFFSET)?;
    Some(&title[start..])
}
