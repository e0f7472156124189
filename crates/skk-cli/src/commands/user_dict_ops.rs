use std::path::Path;

use skk_core::user_dict::UserEntry;

use crate::dict_source::{load_user, save_user};

pub fn user_dict_add(path: &Path, reading: &str, word: &str) {
    let dict = die!(load_user(path), "Error opening user dictionary: {}");
    if dict.insert_front(reading, word) {
        die!(save_user(path, &dict), "Error saving user dictionary: {}");
        println!("Added: {reading} → {word}");
    } else {
        println!("Already exists: {reading} → {word}");
    }
}

pub fn user_dict_remove(path: &Path, reading: &str, word: &str) {
    let dict = die!(load_user(path), "Error opening user dictionary: {}");
    let index = match dict.entry(reading) {
        Some(UserEntry::Words(words)) => words.iter().position(|c| c.word() == word),
        _ => None,
    };
    match index {
        Some(i) => {
            dict.remove(reading, i);
            die!(save_user(path, &dict), "Error saving user dictionary: {}");
            println!("Removed: {reading} → {word}");
        }
        None => println!("Not found: {reading} → {word}"),
    }
}

/// Hide `reading` in every layer, System entries included.
pub fn user_dict_purge(path: &Path, reading: &str) {
    let dict = die!(load_user(path), "Error opening user dictionary: {}");
    dict.delete(reading);
    die!(save_user(path, &dict), "Error saving user dictionary: {}");
    println!("Purged: {reading}");
}

/// Drop whatever the user store holds for `reading`, tombstone included.
pub fn user_dict_forget(path: &Path, reading: &str) {
    let dict = die!(load_user(path), "Error opening user dictionary: {}");
    if dict.forget(reading) {
        die!(save_user(path, &dict), "Error saving user dictionary: {}");
        println!("Forgot: {reading}");
    } else {
        println!("Not found: {reading}");
    }
}

pub fn user_dict_list(path: &Path) {
    let dict = die!(load_user(path), "Error opening user dictionary: {}");
    let entries = dict.list();
    let purged = dict.purged();
    if entries.is_empty() && purged.is_empty() {
        println!("(empty)");
        return;
    }
    for (reading, words) in &entries {
        let joined: Vec<&str> = words.iter().map(|c| c.raw()).collect();
        println!("{reading}\t/{}/", joined.join("/"));
    }
    for reading in &purged {
        println!("{reading}\t(purged)");
    }
    println!("---");
    println!("{} entries, {} purged", entries.len(), purged.len());
}
