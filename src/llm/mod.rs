use async_trait::async_trait;
use reqwest::Client;
use serde_json::{
    json,
    Value,
};

use crate::{
    core::{
        Config,
        Flashcard,
        FlashcardResponse,
        ReibunError,
    },
    prompt::render_prompt,
};

/// Anything that can produce flashcard candidates for a word. The prefetch
/// pipeline only ever sees this seam.
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn fetch(&self, word: &str) -> Result<Vec<Flashcard>, ReibunError>;
}

/// Minimal chat-completions client for OpenAI-style APIs.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: Option<f32>,
}

impl LlmClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: "https://api.openai.com/v1".to_string(),
            model,
            temperature: None,
        }
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn build_request_body(&self, system_role: &str, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system_role },
                { "role": "user", "content": prompt },
            ],
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = temperature.into();
        }

        body
    }

    /// Sends one chat completion request and returns the content of the
    /// first choice's message.
    pub async fn complete(&self, system_role: &str, prompt: &str) -> Result<String, ReibunError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request_body(system_role, prompt);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ReibunError::Api(format!(
                "chat completion request failed with status {}: {}",
                status, text
            )));
        }

        let response_json: Value = serde_json::from_str(&text)?;
        message_content(&response_json).map(str::to_string).ok_or(ReibunError::EmptyResponse)
    }
}

fn message_content(response: &Value) -> Option<&str> {
    response["choices"][0]["message"]["content"].as_str()
}

/// Renders a word's prompt and asks the chat API for candidate cards.
pub struct FlashcardRequester {
    client: LlmClient,
    config: Config,
}

impl FlashcardRequester {
    pub fn new(config: &Config) -> Result<Self, ReibunError> {
        let api_key = std::env::var(&config.llm.api_key_env)
            .map_err(|_| ReibunError::MissingApiKey(config.llm.api_key_env.clone()))?;

        let client = LlmClient::new(api_key, config.llm.model.clone())
            .with_api_base(config.llm.api_base.clone());

        Ok(Self { client, config: config.clone() })
    }
}

#[async_trait]
impl CardSource for FlashcardRequester {
    async fn fetch(&self, word: &str) -> Result<Vec<Flashcard>, ReibunError> {
        let prompt = render_prompt(&self.config, word)?;
        let content = self.client.complete(&self.config.llm.system_role, &prompt).await?;
        let response: FlashcardResponse = serde_json::from_str(&content)?;
        Ok(response.flashcards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_asks_for_a_json_object_response() {
        let client = LlmClient::new("test-key".to_string(), "gpt-4o".to_string());
        let body = client.build_request_body("system text", "user prompt");

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "system text");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user prompt");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn temperature_is_included_only_when_set() {
        let client = LlmClient::new("test-key".to_string(), "gpt-4o".to_string())
            .with_temperature(0.7);
        let body = client.build_request_body("s", "u");

        let temperature = body["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let client = LlmClient::new("test-key".to_string(), "gpt-4o".to_string())
            .with_api_base("http://localhost:8080/v1/".to_string());

        assert_eq!(client.api_base, "http://localhost:8080/v1");
    }

    #[test]
    fn message_content_reads_the_first_choice() {
        let response = serde_json::json!({
            "choices": [
                { "message": { "content": "{\"flashcards\": []}" } }
            ]
        });

        assert_eq!(message_content(&response), Some("{\"flashcards\": []}"));
    }

    #[test]
    fn message_content_is_none_when_choices_are_missing() {
        let response = serde_json::json!({ "error": "rate limited" });
        assert_eq!(message_content(&response), None);
    }

    #[test]
    fn flashcard_document_parses_into_candidates() {
        let content = r#"{
            "flashcards": [
                { "example_sentence": "猫がいる。", "english": "There is a cat." },
                { "example_sentence": "{{c1::猫}}が好き。", "english": "I like cats." }
            ]
        }"#;

        let response: FlashcardResponse = serde_json::from_str(content).unwrap();
        assert_eq!(response.flashcards.len(), 2);
        assert_eq!(response.flashcards[0].english, "There is a cat.");
    }

    #[test]
    fn flashcard_document_without_the_key_is_an_error() {
        assert!(serde_json::from_str::<FlashcardResponse>("{\"cards\": []}").is_err());
    }
}
