use std::collections::HashMap;

use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::ReibunError;

#[derive(Debug)]
pub struct Deck {
    pub name: String,
    pub id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, ReibunError> {
        if let Some(error) = self.error {
            return Err(ReibunError::Api(error));
        }
        self.result.ok_or_else(|| ReibunError::Api("missing result field".to_string()))
    }
}

async fn make_request<T: for<'de> Deserialize<'de>>(
    url: &str,
    action: &str,
    params: Option<serde_json::Value>,
) -> Result<ApiResponse<T>, reqwest::Error> {
    let mut body = serde_json::Map::new();
    body.insert("action".to_string(), serde_json::Value::String(action.to_string()));
    body.insert("version".to_string(), serde_json::Value::Number((6).into()));

    if let Some(params) = params {
        body.insert("params".to_string(), params);
    }

    let response: ApiResponse<T> =
        Client::new().post(url).json(&body).send().await?.json().await?;

    Ok(response)
}

//Used to check that AnkiConnect is reachable before processing starts
pub async fn get_version(url: &str) -> Result<u32, ReibunError> {
    make_request::<u32>(url, "version", None).await?.into_result()
}

pub async fn get_deck_ids(url: &str) -> Result<Vec<Deck>, ReibunError> {
    let response: ApiResponse<HashMap<String, u64>> =
        make_request(url, "deckNamesAndIds", None).await?;

    Ok(response
        .into_result()?
        .into_iter()
        .map(|(name, id)| Deck { name, id })
        .collect())
}

pub async fn get_model_ids(url: &str) -> Result<HashMap<String, u64>, ReibunError> {
    make_request(url, "modelNamesAndIds", None).await?.into_result()
}

pub async fn add_note(
    url: &str,
    deck_name: &str,
    model_name: &str,
    fields: &HashMap<String, String>,
) -> Result<u64, ReibunError> {
    let params = serde_json::json!({
        "note": {
            "deckName": deck_name,
            "modelName": model_name,
            "fields": fields,
            "options": { "allowDuplicate": true },
        }
    });

    make_request::<u64>(url, "addNote", Some(params)).await?.into_result()
}
