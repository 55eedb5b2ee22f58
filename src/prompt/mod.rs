use std::fs;

use crate::core::{
    CardStyle,
    Config,
    ReibunError,
};

/// Placeholder token substituted with the target word in prompt templates.
pub const WORD_PLACEHOLDER: &str = "{{WORD}}";

/// Loads the template for the word's card style and substitutes every
/// occurrence of the placeholder. The word is inserted verbatim.
pub fn render_prompt(config: &Config, word: &str) -> Result<String, ReibunError> {
    let path = match CardStyle::of(word) {
        CardStyle::Basic => &config.basic_prompt_path,
        CardStyle::Cloze => &config.cloze_prompt_path,
    };

    let template = fs::read_to_string(path)?;
    Ok(template.replace(WORD_PLACEHOLDER, word))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn template_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.basic_prompt_path = dir.join("basic_prompt.txt");
        config.cloze_prompt_path = dir.join("cloze_prompt.txt");
        fs::write(&config.basic_prompt_path, "Basic: {{WORD}} ({{WORD}})").unwrap();
        fs::write(&config.cloze_prompt_path, "Cloze: {{WORD}}").unwrap();
        config
    }

    #[test]
    fn kana_words_render_the_basic_template() {
        let dir = tempdir().unwrap();
        let config = template_config(dir.path());

        let prompt = render_prompt(&config, "みかん").unwrap();
        assert_eq!(prompt, "Basic: みかん (みかん)");
    }

    #[test]
    fn non_kana_words_render_the_cloze_template() {
        let dir = tempdir().unwrap();
        let config = template_config(dir.path());

        let prompt = render_prompt(&config, "勉強").unwrap();
        assert_eq!(prompt, "Cloze: 勉強");
    }

    #[test]
    fn missing_template_file_is_an_error() {
        let dir = tempdir().unwrap();
        let mut config = template_config(dir.path());
        config.cloze_prompt_path = dir.path().join("nope.txt");

        assert!(render_prompt(&config, "勉強").is_err());
    }
}
