//! Destination filename templating.

use crate::environment::Labels;

use std::path::{Path, PathBuf, is_separator};

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// Default template: `20150801_1234_Stage_Rule_win.avi`.
pub const DEFAULT_FILENAME_TEMPLATE: &str =
    "%year%%month%%date%_%hour%%minutes%_%stage%_%rule%_%won%.avi";

/// Extension forced onto every destination path, without the dot.
pub const OUTPUT_EXTENSION: &str = "avi";

/// Source of the local wall-clock time.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// [`Clock`] reading the system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Filename template with `%name%` placeholders.
///
/// Placeholders: `%year%` (4 digits), `%month%`, `%date%`, `%hour%`,
/// `%minutes%`, `%second%` (2 digits each), `%stage%`, `%rule%`, `%won%`.
/// Anything else is copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate(String);

impl Default for FilenameTemplate {
    fn default() -> Self {
        Self(DEFAULT_FILENAME_TEMPLATE.to_string())
    }
}

impl FilenameTemplate {
    /// Wrap a template string.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand every placeholder.
    pub fn render(&self, now: &NaiveDateTime, labels: &Labels) -> String {
        let substitutions = [
            ("%year%", format!("{:04}", now.year())),
            ("%month%", format!("{:02}", now.month())),
            ("%date%", format!("{:02}", now.day())),
            ("%hour%", format!("{:02}", now.hour())),
            ("%minutes%", format!("{:02}", now.minute())),
            ("%second%", format!("{:02}", now.second())),
            ("%stage%", labels.stage.clone()),
            ("%rule%", labels.rule.clone()),
            ("%won%", labels.won.clone()),
        ];

        substitutions
            .iter()
            .fold(self.0.clone(), |acc, (placeholder, value)| {
                acc.replace(placeholder, value)
            })
    }

    /// `dir` joined with the rendered name, extension forced to
    /// [`OUTPUT_EXTENSION`].
    ///
    /// The extension is forced on the rendered text before joining, so an
    /// empty render gives `dir/.avi` and `..` gives `dir/...avi`.
    pub fn destination_path(&self, dir: &Path, now: &NaiveDateTime, labels: &Labels) -> PathBuf {
        dir.join(with_output_extension(&self.render(now, labels)))
    }
}

/// Replace the extension of the last path component of `name`.
///
/// A leading dot and the `..` component are part of the stem.
fn with_output_extension(name: &str) -> String {
    let component_start = name.rfind(is_separator).map_or(0, |i| i + 1);
    let component = &name[component_start..];

    let stem_len = match component.rfind('.') {
        Some(dot) if dot > 0 && component != ".." => dot,
        _ => component.len(),
    };

    format!(
        "{}.{}",
        &name[..component_start + stem_len],
        OUTPUT_EXTENSION
    )
}
