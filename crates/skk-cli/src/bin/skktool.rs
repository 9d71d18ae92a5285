use std::path::Path;

use clap::{Parser, Subcommand};

use skk_cli::commands::{config_ops, dict_ops, type_ops, user_dict_ops};

#[derive(Parser)]
#[command(name = "skktool", about = "SKK dictionary and session tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile an SKK-JISYO text file into a dictionary store
    Compile {
        /// Input SKK-JISYO file
        input_file: String,
        /// Output dictionary file
        output_file: String,
        /// Text encoding of the input (SKK-JISYO files are usually EUC-JP)
        #[arg(long, default_value = "euc-jp")]
        encoding: String,
    },
    /// Show dictionary statistics
    Info {
        /// Dictionary file
        dict_file: String,
    },
    /// Look up a reading (exact match)
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Reading to look up (hiragana, okuri-ari keys end in a consonant)
        reading: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List readings that follow a key in dictionary order
    Complete {
        /// Dictionary file
        dict_file: String,
        /// Key to complete
        key: String,
        /// Number of keys examined after the first
        #[arg(short, long, default_value = "5")]
        limit: usize,
        /// Treat the key as English; keep okuri-ari keys
        #[arg(long)]
        literal: bool,
    },
    /// Replay a key script through a conversion session
    Type {
        /// Dictionary file
        dict_file: String,
        /// Key script, e.g. "Kanji <next><enter>"
        script: String,
        /// User dictionary file (default: in memory)
        #[arg(long)]
        user_dict: Option<String>,
        /// Print one line per key
        #[arg(short, long)]
        verbose: bool,
    },
    /// Export default romaji mappings as TOML
    RomajiExport,
    /// Validate a custom romaji TOML file
    RomajiValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Manage the user dictionary
    UserDict {
        /// User dictionary file (default: ~/.skk/skk_userdict)
        #[arg(long)]
        file: Option<String>,
        #[command(subcommand)]
        action: UserDictAction,
    },
}

#[derive(Subcommand)]
enum UserDictAction {
    /// Record a word, moving it to the front of its reading
    Add {
        /// Reading (hiragana)
        reading: String,
        /// Candidate, optionally with ";annotation"
        candidate: String,
    },
    /// List all entries
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Compile {
            input_file,
            output_file,
            encoding,
        } => dict_ops::compile(&input_file, &output_file, &encoding),
        Command::Info { dict_file } => dict_ops::info(&dict_file),
        Command::Lookup {
            dict_file,
            reading,
            json,
        } => dict_ops::lookup(&dict_file, &reading, json),
        Command::Complete {
            dict_file,
            key,
            limit,
            literal,
        } => dict_ops::complete(&dict_file, &key, limit, literal),
        Command::Type {
            dict_file,
            script,
            user_dict,
            verbose,
        } => type_ops::type_cmd(&dict_file, user_dict.as_deref(), &script, verbose),
        Command::RomajiExport => config_ops::romaji_export(),
        Command::RomajiValidate { file } => config_ops::romaji_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::UserDict { file, action } => {
            let path_str = file.unwrap_or_else(user_dict_ops::default_user_dict_path);
            let path = Path::new(&path_str);
            match action {
                UserDictAction::Add { reading, candidate } => {
                    user_dict_ops::user_dict_add(path, &reading, &candidate)
                }
                UserDictAction::List => user_dict_ops::user_dict_list(path),
            }
        }
    }
}
