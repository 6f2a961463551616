//! AI draft generator: free text in, reviewed task drafts out.
//!
//! One prompt per request, no multi-turn state. The model's response is
//! interpreted entirely on this side: the first `[` to the last `]` is
//! taken as the candidate JSON array, parsed, and every element validated
//! before a human ever sees it. Drafts live in caller memory until
//! explicitly committed.

pub mod prompts;

use crate::error::CoreError;
use crate::models::{NewTaskData, ScoreVariables, Task, TaskDraft, UNCATEGORIZED};
use crate::repository::{CategoryRepository, TaskRepository};
use crate::scoring::clamp_axis;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Fixed placeholder axes for committed drafts: the model's single 1-10
/// leverage judgment maps onto `outcome` only.
const DRAFT_CERTAINTY: f64 = 9.0;
const DRAFT_DELAY: f64 = 5.0;
const DRAFT_EFFORT: f64 = 5.0;

/// Canned reply when the disruptor path cannot reach the model. This path
/// never errors.
const DISRUPTOR_FALLBACK: &str =
    "State Disruptor: Error analyzing your reality. Specifically, what is preventing you from succeeding right now?";
const DISRUPTOR_NO_KEY: &str =
    "State Disruptor: API key missing. I can't disrupt your state until you fix your configuration.";

#[derive(Error, Debug)]
pub enum DraftError {
    #[error("API key missing. Configure it before using AI features.")]
    MissingKey,

    #[error("Model did not return a recognizable array")]
    Format,

    #[error("Model returned malformed data")]
    Parse(#[source] serde_json::Error),

    #[error("Model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Model response was empty")]
    EmptyResponse,
}

/// Configuration for the text-completion backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-flash-latest".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the generative-language API.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, DraftError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn has_key(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Sends one prompt and returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, DraftError> {
        if !self.has_key() {
            return Err(DraftError::MissingKey);
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        // Prompts quote raw user text; every safety category is opened up
        // so the model answers instead of refusing.
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE" },
            ],
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(DraftError::EmptyResponse)?;

        Ok(text)
    }

    /// Breaks a goal into reviewed-before-commit task drafts.
    pub async fn generate_action_plan(
        &self,
        goal: &str,
        categories: &[String],
    ) -> Result<Vec<TaskDraft>, DraftError> {
        let raw = self
            .complete(&prompts::strategic_intake(categories, goal))
            .await?;
        parse_drafts(&raw)
    }

    /// Triages a brain dump into task drafts.
    pub async fn parse_bulk_tasks(
        &self,
        text: &str,
        categories: &[String],
    ) -> Result<Vec<TaskDraft>, DraftError> {
        let raw = self
            .complete(&prompts::brain_dump_triage(categories, text))
            .await?;
        parse_drafts(&raw)
    }

    /// One free-text coaching message. Degrades to a canned string on any
    /// failure; the other paths fail loudly, this one never does.
    pub async fn generate_state_disruptor(&self, logs: &[String]) -> String {
        if !self.has_key() {
            return DISRUPTOR_NO_KEY.to_string();
        }
        match self.complete(&prompts::state_disruptor(logs)).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "state disruptor request failed");
                DISRUPTOR_FALLBACK.to_string()
            }
        }
    }
}

/// Extracts the first top-level JSON array substring from free text.
///
/// Heuristic by design: the model is asked for a bare array but may wrap
/// it in prose or markdown. Missing brackets fail with `Format`, distinct
/// from `Parse` for brackets around invalid JSON.
pub fn extract_json_array(raw: &str) -> Result<&str, DraftError> {
    let start = raw.find('[').ok_or(DraftError::Format)?;
    let end = raw.rfind(']').ok_or(DraftError::Format)?;
    if end < start {
        return Err(DraftError::Format);
    }
    Ok(&raw[start..=end])
}

/// Bracket-scans, parses, and validates a raw model response into drafts.
///
/// Validation clamps rather than rejects where possible: scores are forced
/// into 1-10 and blank categories fall back to the sentinel. Only drafts
/// with no usable title are dropped.
pub fn parse_drafts(raw: &str) -> Result<Vec<TaskDraft>, DraftError> {
    let json_text = extract_json_array(raw)?;
    let drafts: Vec<TaskDraft> = serde_json::from_str(json_text).map_err(DraftError::Parse)?;

    Ok(drafts
        .into_iter()
        .filter_map(|mut draft| {
            draft.title = draft.title.trim().to_string();
            if draft.title.is_empty() {
                tracing::warn!("dropping draft with empty title");
                return None;
            }
            draft.category = draft.category.trim().to_string();
            if draft.category.is_empty() {
                draft.category = UNCATEGORIZED.to_string();
            }
            draft.hormozi_score = clamp_axis(draft.hormozi_score);
            Some(draft)
        })
        .collect())
}

/// Commits reviewed drafts: every referenced category is created first
/// (sequentially, so no task can reference a category that does not exist
/// yet), then tasks are created one by one.
pub async fn commit_drafts<R>(
    repo: &R,
    owner: &str,
    drafts: &[TaskDraft],
) -> Result<Vec<Task>, CoreError>
where
    R: TaskRepository + CategoryRepository + Sync,
{
    for draft in drafts {
        if draft.category != UNCATEGORIZED {
            repo.add_category(owner, &draft.category).await?;
        }
    }

    let mut created = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let data = NewTaskData {
            title: draft.title.clone(),
            category: Some(draft.category.clone()),
            score_variables: Some(ScoreVariables {
                outcome: clamp_axis(draft.hormozi_score),
                certainty: DRAFT_CERTAINTY,
                delay: DRAFT_DELAY,
                effort: DRAFT_EFFORT,
            }),
            magic_words: Some(draft.magic_words.clone()),
            ..NewTaskData::default()
        };
        created.push(repo.create_task(owner, data).await?);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ARRAY: &str = r#"[
        {"title": "Call vendor", "category": "Income Generation", "hormoziScore": 8, "magicWords": "Just dial."},
        {"title": "Draft proposal", "category": "Strategy", "hormoziScore": 6, "magicWords": ""}
    ]"#;

    #[test]
    fn extraction_strips_surrounding_prose() {
        let raw = format!("Sure! Here is your plan:\n```json\n{}\n```\nGood luck!", VALID_ARRAY);
        let extracted = extract_json_array(&raw).unwrap();
        assert!(extracted.starts_with('['));
        assert!(extracted.ends_with(']'));
        let drafts = parse_drafts(&raw).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].title, "Call vendor");
        assert_eq!(drafts[1].hormozi_score, 6.0);
    }

    #[test]
    fn missing_brackets_is_a_format_error() {
        let err = parse_drafts("I could not produce a plan, sorry.").unwrap_err();
        assert!(matches!(err, DraftError::Format));
    }

    #[test]
    fn reversed_brackets_is_a_format_error() {
        let err = parse_drafts("] nothing here [").unwrap_err();
        assert!(matches!(err, DraftError::Format));
    }

    #[test]
    fn invalid_interior_json_is_a_parse_error() {
        let err = parse_drafts("[{title: unquoted}]").unwrap_err();
        assert!(matches!(err, DraftError::Parse(_)));
    }

    #[test]
    fn drafts_are_validated_and_clamped() {
        let raw = r#"[
            {"title": "  Fix billing  ", "category": "", "hormoziScore": 42, "magicWords": "go"},
            {"title": "   ", "category": "Strategy", "hormoziScore": 5, "magicWords": ""}
        ]"#;
        let drafts = parse_drafts(raw).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Fix billing");
        assert_eq!(drafts[0].category, UNCATEGORIZED);
        assert_eq!(drafts[0].hormozi_score, 10.0);
    }

    #[test]
    fn missing_magic_words_defaults_to_empty() {
        let raw = r#"[{"title": "Ship it", "category": "Strategy", "hormoziScore": 7}]"#;
        let drafts = parse_drafts(raw).unwrap();
        assert_eq!(drafts[0].magic_words, "");
    }

    #[tokio::test]
    async fn client_parses_a_mocked_completion() {
        let mut server = mockito::Server::new_async().await;
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{
                    "text": format!("Here you go:\n{}", VALID_ARRAY)
                }] }
            }]
        });
        let mock = server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"^/models/gemini-flash-latest:generateContent".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            base_url: server.url(),
            ..GeminiConfig::default()
        })
        .unwrap();

        let drafts = client
            .generate_action_plan("Grow revenue", &["Income Generation".to_string()])
            .await
            .unwrap();
        assert_eq!(drafts.len(), 2);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_without_key_fails_plan_but_not_disruptor() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let err = client.generate_action_plan("goal", &[]).await.unwrap_err();
        assert!(matches!(err, DraftError::MissingKey));

        let message = client.generate_state_disruptor(&[]).await;
        assert!(message.contains("API key missing"));
    }

    #[tokio::test]
    async fn disruptor_degrades_to_canned_string_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"generateContent".to_string()),
            )
            .with_status(500)
            .create_async()
            .await;

        let client = GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            base_url: server.url(),
            ..GeminiConfig::default()
        })
        .unwrap();

        let message = client.generate_state_disruptor(&["[Strategy] wrote plan".to_string()]).await;
        assert_eq!(message, DISRUPTOR_FALLBACK);
    }
}
