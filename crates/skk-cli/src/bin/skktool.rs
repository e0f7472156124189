use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use skk_cli::commands::config_ops::{self, ConfigKind};
use skk_cli::commands::{self, convert_ops, simulate_ops, user_dict_ops};
use skk_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "skktool", about = "SKK input method diagnostics")]
struct Cli {
    /// Write JSON trace logs to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Custom romaji table (TOML)
    #[arg(long, global = true)]
    romaji: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate romaji to kana
    Romaji {
        /// Romaji input
        input: String,
        /// Produce katakana instead of hiragana
        #[arg(long)]
        katakana: bool,
    },
    /// Render a digit run in a numeral style (#0 .. #9)
    Numeral {
        /// Style code digit
        code: char,
        /// Digits to render
        digits: String,
    },
    /// Look up a reading (user entries shadow system entries)
    Lookup {
        /// System dictionary snapshot (TOML)
        dict_file: String,
        /// Reading to look up
        reading: String,
        /// User dictionary snapshot (TOML)
        #[arg(long)]
        user: Option<String>,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay keystrokes through the line editor (`^x` = control key)
    Simulate {
        /// System dictionary snapshot (TOML)
        dict_file: String,
        /// Keystrokes
        keys: String,
        /// User dictionary snapshot (TOML)
        #[arg(long)]
        user: Option<String>,
        /// Settings file (TOML)
        #[arg(long)]
        settings: Option<String>,
        /// Print the raw terminal output
        #[arg(long)]
        show_output: bool,
        /// Write registrations and purges back to the user snapshot
        #[arg(long)]
        save_user: bool,
    },
    /// Export or check the romaji table and settings files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage a user dictionary snapshot
    UserDict {
        /// User dictionary snapshot (TOML)
        file: String,
        #[command(subcommand)]
        action: UserDictAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the built-in TOML
    Export {
        #[arg(value_enum)]
        kind: ConfigKind,
    },
    /// Parse a TOML file and summarize what a session would use
    Check {
        #[arg(value_enum)]
        kind: ConfigKind,
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Add a word in front of the reading's list
    Add {
        /// Reading
        reading: String,
        /// Word
        word: String,
    },
    /// Remove a word
    Remove {
        /// Reading
        reading: String,
        /// Word
        word: String,
    },
    /// Hide a reading, including its system entries
    Purge {
        /// Reading
        reading: String,
    },
    /// Drop a reading from the user dictionary, undoing a purge
    Forget {
        /// Reading
        reading: String,
    },
    /// List all entries
    List,
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref());

    if let Some(file) = &cli.romaji {
        if let Err(e) = commands::init_romaji(Path::new(file)) {
            eprintln!("Error loading {file}: {e}");
            std::process::exit(1);
        }
    }

    match cli.command {
        Command::Romaji { input, katakana } => convert_ops::romaji_cmd(&input, katakana),
        Command::Numeral { code, digits } => convert_ops::numeral_cmd(code, &digits),
        Command::Lookup {
            dict_file,
            reading,
            user,
            json,
        } => convert_ops::lookup_cmd(&dict_file, user.as_deref(), &reading, json),
        Command::Simulate {
            dict_file,
            keys,
            user,
            settings,
            show_output,
            save_user,
        } => {
            let opts = simulate_ops::SimulateOptions {
                user_file: user.as_deref(),
                settings_file: settings.as_deref(),
                show_output,
                save_user,
            };
            simulate_ops::simulate_cmd(&dict_file, &keys, &opts);
        }
        Command::Config { action } => match action {
            ConfigAction::Export { kind } => config_ops::config_export(kind),
            ConfigAction::Check { kind, file } => config_ops::config_check(kind, &file),
        },
        Command::UserDict { file, action } => {
            let path = Path::new(&file);
            match action {
                UserDictAction::Add { reading, word } => {
                    user_dict_ops::user_dict_add(path, &reading, &word)
                }
                UserDictAction::Remove { reading, word } => {
                    user_dict_ops::user_dict_remove(path, &reading, &word)
                }
                UserDictAction::Purge { reading } => {
                    user_dict_ops::user_dict_purge(path, &reading)
                }
                UserDictAction::Forget { reading } => {
                    user_dict_ops::user_dict_forget(path, &reading)
                }
                UserDictAction::List => user_dict_ops::user_dict_list(path),
            }
        }
    }
}
