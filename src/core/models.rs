use serde::{
    Deserialize,
    Serialize,
};
use wana_kana::IsJapaneseStr;

/// One candidate card from the model: an example sentence using the target
/// word (cloze-marked for non-kana words) and its English gloss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub example_sentence: String,
    pub english: String,
}

/// The JSON document the model is asked to return.
#[derive(Debug, Deserialize)]
pub struct FlashcardResponse {
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    Basic,
    Cloze,
}

impl CardStyle {
    /// Words written entirely in hiragana or katakana get a basic reading
    /// card; anything containing kanji or other characters gets a cloze.
    pub fn of(word: &str) -> Self {
        if word.is_kana() {
            CardStyle::Basic
        } else {
            CardStyle::Cloze
        }
    }
}
