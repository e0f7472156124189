use std::sync::Arc;

use crate::dict::{Candidate, Dictionaries, Dictionary, SystemDictionary};
use crate::user_dict::UserDictionary;

fn words(list: &[&str]) -> Vec<Candidate> {
    list.iter().map(|s| Candidate::new(*s)).collect()
}

fn sample() -> Dictionaries {
    let system = SystemDictionary::from_entries([
        ("かく".to_string(), words(&["書く;write", "画く"])),
        ("とし#".to_string(), words(&["#0年", "#2年", "#1歳"])),
        ("あい".to_string(), words(&["愛"])),
        ("から".to_string(), Vec::new()),
    ]);
    Dictionaries::new(Arc::new(UserDictionary::new()), Arc::new(system))
}

#[test]
fn system_lookup() {
    let dicts = sample();
    let list = dicts.lookup("かく").unwrap();
    assert_eq!(list[0].word(), "書く");
    assert_eq!(list[1].word(), "画く");
    assert_eq!(dicts.lookup("ほげ"), None);
}

#[test]
fn empty_list_is_not_found() {
    let dicts = sample();
    assert_eq!(dicts.lookup("から"), None);
    assert_eq!(dicts.system().lookup("から"), None);
}

#[test]
fn user_shadows_system() {
    let dicts = sample();
    dicts.user().replace("かく", words(&["描く"]));
    assert_eq!(dicts.lookup("かく"), Some(words(&["描く"])));
}

#[test]
fn numeral_lookup() {
    let dicts = sample();
    let list = dicts.lookup("とし5").unwrap();
    let rendered: Vec<&str> = list.iter().map(Candidate::word).collect();
    assert_eq!(rendered, vec!["5年", "五年", "５歳"]);
    // the stored placeholder list is untouched
    assert_eq!(dicts.lookup("とし#").unwrap()[0].word(), "#0年");
}

#[test]
fn numeral_lookup_without_entry() {
    let dicts = sample();
    assert_eq!(dicts.lookup("ほげ12"), None);
}

#[test]
fn register_prepends() {
    let dicts = sample();
    assert!(dicts.register("かく", "描く"));
    let list = dicts.lookup("かく").unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].word(), "描く");
    assert_eq!(list[1].word(), "書く");
}

#[test]
fn register_duplicate_is_noop() {
    let dicts = sample();
    assert!(!dicts.register("かく", "画く"));
    assert_eq!(dicts.lookup("かく").unwrap().len(), 2);
    assert!(dicts.user().list().is_empty());

    assert!(dicts.register("ほげ", "保下"));
    assert!(!dicts.register("ほげ", "保下"));
    assert_eq!(dicts.lookup("ほげ"), Some(words(&["保下"])));
}

#[test]
fn register_numeral_reading() {
    let dicts = sample();
    assert!(dicts.register("とし5", "五歳"));
    let list = dicts.lookup("とし5").unwrap();
    assert_eq!(list[0].word(), "五歳");
    assert_eq!(list[1].word(), "5年");
    // other digit runs still use the placeholder entry
    assert_eq!(dicts.lookup("とし7").unwrap()[0].word(), "7年");
}

#[test]
fn purge_one_of_many() {
    let dicts = sample();
    dicts.user().replace("かく", words(&["書く", "画く", "描く"]));
    assert!(dicts.purge("かく", 1));
    assert_eq!(dicts.lookup("かく"), Some(words(&["書く", "描く"])));
}

#[test]
fn purge_system_only_reading() {
    let dicts = sample();
    assert!(dicts.purge("あい", 0));
    assert_eq!(dicts.lookup("あい"), None);
    assert!(dicts.system().lookup("あい").is_some());
}

#[test]
fn purge_out_of_range() {
    let dicts = sample();
    assert!(!dicts.purge("かく", 2));
    assert!(!dicts.purge("ほげ", 0));
    assert_eq!(dicts.lookup("かく").unwrap().len(), 2);
}

#[test]
fn purge_numeral_reading_hides_placeholder() {
    let dicts = sample();
    dicts.user().replace("とし5", words(&["五歳"]));
    assert!(dicts.purge("とし5", 0));
    assert_eq!(dicts.lookup("とし5"), None);
    assert!(dicts.lookup("とし6").is_some());
}
