fn main() {
    println!("cargo:rerun-if-changed=src/default_settings.toml");
    println!("cargo:rerun-if-changed=src/romaji/default_romaji.toml");

    let settings = parse("src/default_settings.toml", include_str!("src/default_settings.toml"));
    for section in ["keys", "candidates", "prompt"] {
        if !settings.contains_key(section) {
            panic!("src/default_settings.toml is missing [{section}]");
        }
    }

    let romaji = parse(
        "src/romaji/default_romaji.toml",
        include_str!("src/romaji/default_romaji.toml"),
    );
    match romaji.get("mappings").and_then(toml::Value::as_table) {
        Some(mappings) if !mappings.is_empty() => {}
        _ => panic!("src/romaji/default_romaji.toml has no [mappings]"),
    }
}

fn parse(path: &str, content: &str) -> toml::Table {
    content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("{path} contains invalid TOML: {e}"))
}
