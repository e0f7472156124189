use std::io;

/// Marks the start of a region being composed.
pub const MARKER_WHITE: char = '▽';
/// Marks the start of a region showing a candidate.
pub const MARKER_BLACK: char = '▼';

pub(crate) fn is_marker(c: char) -> bool {
    c == MARKER_WHITE || c == MARKER_BLACK
}

/// What the host should do after a command returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Finish the line and return its text.
    Accept,
    /// Abandon the line.
    Abort,
}

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("input aborted")]
    Aborted,
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}
