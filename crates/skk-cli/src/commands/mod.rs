use std::path::Path;
use std::sync::Arc;

use tracing::info;

use skk_core::dict::Dictionaries;
use skk_core::settings::{parse_settings_toml, Settings};

use crate::dict_source::{self, DictSnapshot};
use crate::CliError;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod convert_ops;
pub mod simulate_ops;
pub mod user_dict_ops;

/// System snapshot plus an optional User snapshot (missing file = empty).
pub fn load_dictionaries(dict_file: &Path, user_file: Option<&Path>) -> Result<Dictionaries, CliError> {
    let system = DictSnapshot::load(dict_file)?.into_system();
    let user = match user_file {
        Some(path) => dict_source::load_user(path)?,
        None => Default::default(),
    };
    info!(
        system = system.len(),
        user = user.list().len(),
        purged = user.purged().len(),
        "dictionaries loaded"
    );
    Ok(Dictionaries::new(Arc::new(user), Arc::new(system)))
}

pub fn load_settings(file: Option<&Path>) -> Result<Settings, CliError> {
    match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Ok(parse_settings_toml(&content)?)
        }
        None => Ok(Settings::default()),
    }
}

/// Replaces the built-in romaji table; must run before any conversion.
pub fn init_romaji(file: &Path) -> Result<(), CliError> {
    let content = std::fs::read_to_string(file)?;
    skk_core::romaji::KanaTable::init_custom(content)?;
    Ok(())
}
