/// Progress reporting contract between the worker pool and its consumer.
///
/// Updates are emitted from worker tasks, once per successfully translated
/// paragraph (never per retry attempt), plus one terminal update when a run
/// is stopped. Callbacks may be invoked from several workers concurrently
/// and must either be safe to call that way or serialize internally.
/// A single progress notification
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Number of paragraphs translated so far, read at the instant of
    /// the slot write this update reports
    pub translated: usize,

    /// Total number of paragraphs in the run
    pub total: usize,

    /// The just-translated text, for display purposes
    pub preview: String,

    /// True only for the terminal update of a cancelled run
    pub stopped: bool,
}

impl ProgressUpdate {
    /// Update for one completed paragraph
    pub fn completed(translated: usize, total: usize, preview: impl Into<String>) -> Self {
        Self {
            translated,
            total,
            preview: preview.into(),
            stopped: false,
        }
    }

    /// Terminal update for a cancelled run
    pub fn stopped(translated: usize, total: usize) -> Self {
        Self {
            translated,
            total,
            preview: String::new(),
            stopped: true,
        }
    }
}
