use std::{
    collections::HashMap,
    sync::Arc,
};

use tokio::runtime::Runtime;

use api::Deck;
use crate::core::{
    CardStyle,
    Config,
    ReibunError,
};

pub mod api;

/// Note field names for one card style.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FieldMapping {
    pub sentence_field: String,
    pub english_field: String,
}

/// The one capability the interactive selector needs from the collection.
pub trait NoteSink {
    fn create_note(
        &mut self,
        style: CardStyle,
        fields: HashMap<String, String>,
    ) -> Result<u64, ReibunError>;
}

#[derive(Debug, Clone)]
pub struct NoteModel {
    pub name: String,
    pub id: u64,
}

pub struct AnkiState {
    runtime: Arc<Runtime>,
    url: String,
    deck: Deck,
    basic_model: NoteModel,
    cloze_model: NoteModel,
}

impl AnkiState {
    /// Resolves the configured deck and note type names against the running
    /// Anki instance. Unknown names abort the run before any word is
    /// processed.
    pub fn connect(runtime: Arc<Runtime>, config: &Config) -> Result<Self, ReibunError> {
        let url = config.anki_connect_url.clone();

        let (version, decks, model_ids) = runtime.block_on(async {
            futures::future::try_join3(
                api::get_version(&url),
                api::get_deck_ids(&url),
                api::get_model_ids(&url),
            )
            .await
        })?;
        println!("AnkiConnect is online. Version: {}", version);

        let deck = decks
            .into_iter()
            .find(|deck| deck.name == config.deck_name)
            .ok_or_else(|| ReibunError::DeckNotFound(config.deck_name.clone()))?;

        let basic_model = resolve_model(&model_ids, &config.basic_model_name)?;
        let cloze_model = resolve_model(&model_ids, &config.cloze_model_name)?;

        println!(
            "Loaded Anki collection. Deck ID: {}, Basic Model ID: {}, Cloze Model ID: {}",
            deck.id, basic_model.id, cloze_model.id
        );

        Ok(Self { runtime, url, deck, basic_model, cloze_model })
    }

    fn model(&self, style: CardStyle) -> &NoteModel {
        match style {
            CardStyle::Basic => &self.basic_model,
            CardStyle::Cloze => &self.cloze_model,
        }
    }
}

fn resolve_model(model_ids: &HashMap<String, u64>, name: &str) -> Result<NoteModel, ReibunError> {
    let id = *model_ids.get(name).ok_or_else(|| ReibunError::ModelNotFound(name.to_string()))?;
    Ok(NoteModel { name: name.to_string(), id })
}

impl NoteSink for AnkiState {
    fn create_note(
        &mut self,
        style: CardStyle,
        fields: HashMap<String, String>,
    ) -> Result<u64, ReibunError> {
        let model = self.model(style);
        self.runtime.block_on(api::add_note(&self.url, &self.deck.name, &model.name, &fields))
    }
}
