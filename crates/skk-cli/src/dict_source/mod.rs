//! Dictionary snapshots in TOML.
//!
//! ```toml
//! [entries]
//! "かく" = ["書く;write", "画く"]
//! "とし#" = ["#0年", "#2年"]
//! ```
//!
//! User snapshots may also list purged readings, which hide System entries:
//!
//! ```toml
//! purged = ["あい"]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use skk_core::dict::{Candidate, SystemDictionary};
use skk_core::user_dict::UserDictionary;

#[derive(Debug, thiserror::Error)]
pub enum DictSourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid entry {reading:?}: {reason}")]
    InvalidEntry { reading: String, reason: String },
}

/// Reading → candidates, as stored in a snapshot file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DictSnapshot {
    /// Tombstoned readings (User snapshots only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purged: Vec<String>,
    #[serde(default)]
    pub entries: BTreeMap<String, Vec<Candidate>>,
}

impl DictSnapshot {
    pub fn parse(content: &str) -> Result<Self, DictSourceError> {
        let snapshot: DictSnapshot =
            toml::from_str(content).map_err(|e| DictSourceError::Parse(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn load(path: &Path) -> Result<Self, DictSourceError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<(), DictSourceError> {
        for (reading, candidates) in &self.entries {
            let invalid = |reason: &str| DictSourceError::InvalidEntry {
                reading: reading.clone(),
                reason: reason.to_string(),
            };
            if reading.is_empty() {
                return Err(invalid("empty reading"));
            }
            if candidates.is_empty() {
                return Err(invalid("no candidates"));
            }
            if candidates.iter().any(|c| c.word().is_empty()) {
                return Err(invalid("empty candidate"));
            }
        }
        for reading in &self.purged {
            let reason = if reading.is_empty() {
                "empty reading"
            } else if self.entries.contains_key(reading) {
                "both purged and listed"
            } else {
                continue;
            };
            return Err(DictSourceError::InvalidEntry {
                reading: reading.clone(),
                reason: reason.to_string(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A System store has no tombstones; `purged` is ignored.
    pub fn into_system(self) -> SystemDictionary {
        SystemDictionary::from_entries(self.entries)
    }

    pub fn into_user(self) -> UserDictionary {
        let user = UserDictionary::from_entries(self.entries);
        for reading in &self.purged {
            user.delete(reading);
        }
        user
    }

    /// Live entries and tombstones of a User store.
    pub fn from_user(user: &UserDictionary) -> Self {
        Self {
            purged: user.purged(),
            entries: user.list().into_iter().collect(),
        }
    }

    pub fn to_toml(&self) -> Result<String, DictSourceError> {
        toml::to_string_pretty(self).map_err(|e| DictSourceError::Parse(e.to_string()))
    }
}

/// Loads a User store snapshot; a missing file is an empty store.
pub fn load_user(path: &Path) -> Result<UserDictionary, DictSourceError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(DictSnapshot::parse(&content)?.into_user()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(UserDictionary::new()),
        Err(e) => Err(e.into()),
    }
}

pub fn save_user(path: &Path, user: &UserDictionary) -> Result<(), DictSourceError> {
    let text = DictSnapshot::from_user(user).to_toml()?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use skk_core::dict::Dictionary;

    use super::*;

    const SAMPLE: &str = r##"
[entries]
"かく" = ["書く;write", "画く"]
"とし#" = ["#0年", "#2年"]
"##;

    #[test]
    fn parse_sample() {
        let snapshot = DictSnapshot::parse(SAMPLE).unwrap();
        assert_eq!(snapshot.len(), 2);
        let dict = snapshot.into_system();
        let list = dict.lookup("かく").unwrap();
        assert_eq!(list[0].word(), "書く");
        assert_eq!(list[0].annotation(), Some("write"));
    }

    #[test]
    fn parse_empty_file() {
        assert!(DictSnapshot::parse("").unwrap().is_empty());
    }

    #[test]
    fn reject_empty_list() {
        let err = DictSnapshot::parse("[entries]\n\"かく\" = []\n").unwrap_err();
        assert!(matches!(err, DictSourceError::InvalidEntry { .. }), "{err}");
    }

    #[test]
    fn reject_empty_candidate() {
        let err = DictSnapshot::parse("[entries]\n\"かく\" = [\";note\"]\n").unwrap_err();
        assert!(matches!(err, DictSourceError::InvalidEntry { .. }), "{err}");
    }

    #[test]
    fn reject_wrong_shape() {
        let err = DictSnapshot::parse("[entries]\n\"かく\" = \"書く\"\n").unwrap_err();
        assert!(matches!(err, DictSourceError::Parse(_)));
    }

    #[test]
    fn user_round_trip() {
        let user = DictSnapshot::parse(SAMPLE).unwrap().into_user();
        user.delete("とし#");
        let snapshot = DictSnapshot::from_user(&user);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.purged, ["とし#"]);
        let text = snapshot.to_toml().unwrap();
        let again = DictSnapshot::parse(&text).unwrap();
        assert_eq!(again.entries["かく"].len(), 2);
    }

    #[test]
    fn missing_user_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let user = load_user(&dir.path().join("user.toml")).unwrap();
        assert!(user.list().is_empty());
    }

    #[test]
    fn save_then_load_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.toml");
        let user = UserDictionary::new();
        user.insert_front("ほげ", "保下");
        save_user(&path, &user).unwrap();
        let loaded = load_user(&path).unwrap();
        assert_eq!(loaded.lookup("ほげ").unwrap()[0].word(), "保下");
    }

    #[test]
    fn purge_of_system_reading_survives_reload() {
        use std::sync::Arc;

        use skk_core::dict::Dictionaries;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.toml");
        let system = DictSnapshot::parse("[entries]\n\"あい\" = [\"愛\"]\n")
            .unwrap()
            .into_system();
        let system: Arc<dyn Dictionary> = Arc::new(system);

        let dicts = Dictionaries::new(Arc::new(UserDictionary::new()), Arc::clone(&system));
        assert!(dicts.purge("あい", 0));
        assert_eq!(dicts.lookup("あい"), None);
        save_user(&path, dicts.user()).unwrap();

        let reloaded = Dictionaries::new(Arc::new(load_user(&path).unwrap()), system);
        assert_eq!(reloaded.lookup("あい"), None);
        assert_eq!(reloaded.user().purged(), ["あい"]);
    }

    #[test]
    fn reject_reading_both_purged_and_listed() {
        let text = "purged = [\"かく\"]\n[entries]\n\"かく\" = [\"書く\"]\n";
        let err = DictSnapshot::parse(text).unwrap_err();
        assert!(matches!(err, DictSourceError::InvalidEntry { .. }), "{err}");
    }
}
