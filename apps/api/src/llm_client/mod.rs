/// Generation client: the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Callers depend on the `GenerationClient` trait; `GeminiClient` is the
/// production backend and tests substitute their own stubs.
///
/// One HTTP request per `complete` call. Retrying is left to the caller,
/// and the proposal pipeline never retries.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const X_GOOG_API_KEY: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("GOOGLE_API_KEY is not configured")]
    MissingCredential,

    #[error("generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("prompt blocked by the generation backend: {reason}")]
    Blocked { reason: String },

    #[error("generation backend returned empty content")]
    EmptyContent,
}

impl GenerationError {
    /// True when the failure points at the credential rather than the request.
    pub fn is_auth(&self) -> bool {
        match self {
            GenerationError::MissingCredential => true,
            GenerationError::Api { status, .. } => matches!(status, 401 | 403),
            _ => false,
        }
    }
}

/// Text in, text out. Implementations must be safe for concurrent calls.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` backend.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        api_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    /// Makes one raw call to the API, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(X_GOOG_API_KEY, api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            // Try to parse error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Generation call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }

    fn classify(&self, error: reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Http(error)
        }
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.call(prompt).await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(GenerationError::Blocked { reason });
        }

        response.text().ok_or(GenerationError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server, api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(
            api_key.map(str::to_string),
            server.url(),
            "gemini-2.0-flash",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_concatenated_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"Title: "},{"text":"Proposal"}]}}],
                    "usageMetadata":{"promptTokenCount":12,"candidatesTokenCount":3}}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, Some("test-key"));
        let text = client.complete("prompt").await.unwrap();

        assert_eq!(text, "Title: Proposal");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, None);
        let err = client.complete("prompt").await.unwrap_err();

        assert!(matches!(err, GenerationError::MissingCredential));
        assert!(err.is_auth());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("bad-key"));
        let err = client.complete("prompt").await.unwrap_err();

        match &err {
            GenerationError::Api { status, message } => {
                assert_eq!(*status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(err.is_auth());
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(503)
            .with_body("overloaded")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, Some("test-key"));
        let err = client.complete("prompt").await.unwrap_err();

        assert!(matches!(err, GenerationError::Api { status: 503, .. }));
        assert!(!err.is_auth());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_reported() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[],"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("test-key"));
        let err = client.complete("prompt").await.unwrap_err();

        assert!(matches!(err, GenerationError::Blocked { ref reason } if reason == "SAFETY"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_content() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[]}}]}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some("test-key"));
        let err = client.complete("prompt").await.unwrap_err();

        assert!(matches!(err, GenerationError::EmptyContent));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = GeminiClient::new(
            Some("super-secret".to_string()),
            "http://localhost/",
            "gemini-2.0-flash",
            Duration::from_secs(1),
        )
        .unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(
            client.endpoint(),
            "http://localhost/models/gemini-2.0-flash:generateContent"
        );
    }
}
