//! SKK conversion session on top of a line-editor host.
//!
//! The host delivers one key at a time to whatever [`Command`] is bound to it.
//! [`Mode`] installs the kana-input bindings, and the conversion commands
//! block on further keys through the [`Buffer`] capability until a region is
//! committed, cancelled, or purged.

mod buffer;
mod command;
mod conversion;
mod editor;
mod mode;
mod prompt;
mod romaji_input;
mod types;

#[cfg(test)]
mod tests;

pub use buffer::{seek_marker, Buffer};
pub use command::{Command, Keymap, NamedCommand, SavedBindings};
pub use editor::{LineEditor, ScriptedTerminal, Terminal};
pub use mode::Mode;
pub use prompt::{prompter_for, QueryOnCurrentLine, QueryOnNextLine, QueryPrompter};
pub use romaji_input::{ConversionTrigger, RomajiInput};
pub use types::{Flow, PromptError, MARKER_BLACK, MARKER_WHITE};
