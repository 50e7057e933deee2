//! LLM Integration Module
//!
//! OpenAI互換のChat Completion APIを呼び出す機能を提供する。
//!
//! ## 使用方法
//!
//! ### LlmConfig
//!
//! ```rust
//! use prompt_optimizer_core::LlmConfig;
//!
//! let config = LlmConfig::default();
//! assert_eq!(config.model, "gpt-4");
//! assert_eq!(config.api_key_env, "OPENAI_API_KEY");
//! ```
//!
//! ### 完全な使用例（外部依存あり）
//!
//! ```rust,ignore
//! use prompt_optimizer_core::{CompletionClient, LlmConfig};
//!
//! let client = CompletionClient::new(&LlmConfig::default())?;
//! let reply = client.complete("Why is the sky blue?", &api_key).await;
//! println!("{}", reply);
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{OptimizerError, Result};

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// 失敗時に返す文字列の接頭辞
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// LLM接続の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// APIのベースURL（`/chat/completions`が付加される）
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// 使用するモデル名
    #[serde(default = "default_model")]
    pub model: String,

    /// リクエストタイムアウト（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// APIキーを読む環境変数名
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl LlmConfig {
    /// 設定された環境変数からAPIキーを読む（空白のみは未設定扱い）
    pub fn credential_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Chat Completion APIクライアント
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl CompletionClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// プロンプトを送信し、応答テキストを返す
    ///
    /// 失敗はエラーにせず、`"An error occurred: ..."`形式の文字列として返す。
    pub async fn complete(&self, prompt: &str, credential: &str) -> String {
        match self.try_complete(prompt, credential).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "completion failed");
                format!("{ERROR_PREFIX}{e}")
            }
        }
    }

    /// プロンプトを送信し、応答テキストを返す
    ///
    /// # Errors
    /// * `Http` - 接続やレスポンスの読み取りに失敗した場合
    /// * `Api` - 2xx以外のステータスが返った場合
    /// * `EmptyCompletion` - choicesが空、またはcontentがnullの場合
    pub async fn try_complete(&self, prompt: &str, credential: &str) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let start = Instant::now();
        let response = self
            .http
            .post(&url)
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let latency_ms = start.elapsed().as_millis() as u64;
        info!(
            model = %self.config.model,
            status = status.as_u16(),
            latency_ms,
            "completion request finished"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OptimizerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OptimizerError::EmptyCompletion)
    }
}

// ============================================================================
// Tests
// ============================================================================
