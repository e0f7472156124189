pub mod dict;
pub mod key;
pub mod numeric;
pub mod romaji;
pub mod selection;
pub mod settings;
pub mod unicode;
pub mod user_dict;
