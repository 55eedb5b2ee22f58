use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    anki::FieldMapping,
    persistence,
};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_base: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub system_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub anki_connect_url: String,
    pub deck_name: String,
    pub basic_model_name: String,
    pub cloze_model_name: String,
    pub basic_fields: FieldMapping,
    pub cloze_fields: FieldMapping,
    pub basic_prompt_path: PathBuf,
    pub cloze_prompt_path: PathBuf,
    pub pending_path: PathBuf,
    pub done_path: PathBuf,
    pub skipped_path: PathBuf,
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anki_connect_url: "http://localhost:8765/".to_string(),
            deck_name: "Japanese".to_string(),
            basic_model_name: "Japanese Reading".to_string(),
            cloze_model_name: "Japanese Cloze".to_string(),
            basic_fields: FieldMapping {
                sentence_field: "Expression".to_string(),
                english_field: "Meaning".to_string(),
            },
            cloze_fields: FieldMapping {
                sentence_field: "Expression".to_string(),
                english_field: "Extra".to_string(),
            },
            basic_prompt_path: PathBuf::from("prompts/basic_prompt.txt"),
            cloze_prompt_path: PathBuf::from("prompts/cloze_prompt.txt"),
            pending_path: PathBuf::from("words_pending.txt"),
            done_path: PathBuf::from("words_done.txt"),
            skipped_path: PathBuf::from("words_skipped.txt"),
            llm: LlmConfig {
                model: "gpt-4o".to_string(),
                api_base: "https://api.openai.com/v1".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                system_role: "You are a Japanese language assistant, skilled in coming up with \
                              useful example sentences for JSON-formatted flashcards."
                    .to_string(),
            },
        }
    }
}

impl Config {
    /// Loads the saved config, writing out the defaults on first run so the
    /// user has a file to edit.
    pub fn load() -> Self {
        if !persistence::data_file_exists(CONFIG_FILE) {
            let config = Config::default();
            if let Err(e) = persistence::save_json(&config, CONFIG_FILE) {
                eprintln!("Failed to save default config: {}", e);
            }
            return config;
        }

        persistence::load_json_or_default(CONFIG_FILE)
    }
}
