//! Reading → candidate stores.
//!
//! `SystemDictionary` is the read-only store loaded at start-up, the mutable
//! store lives in [`crate::user_dict`]. `Dictionaries` layers the two and adds
//! the numeral placeholder fallback.

mod entry;
mod layered;
mod system;
#[cfg(test)]
mod tests;

pub use entry::{Candidate, ANNOTATION_SEPARATOR};
pub use layered::Dictionaries;
pub use system::SystemDictionary;

pub trait Dictionary: Send + Sync {
    /// Ordered candidates for `reading`. `None` when not found; a found list is
    /// never empty.
    fn lookup(&self, reading: &str) -> Option<Vec<Candidate>>;
}
