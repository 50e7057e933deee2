//! Side-by-side comparison of the original and optimized prompt.
//!
//! Both prompts go to the completion endpoint concurrently; the replies are
//! only combined for display.

use serde::Serialize;
use tracing::info;

use crate::category::Category;
use crate::error::{OptimizerError, Result};
use crate::llm::CompletionClient;
use crate::rewrite::{optimize, Optimization};

/// Everything a front end needs to render a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub original: String,
    pub augmented: String,
    pub category: Category,
    pub original_response: String,
    pub optimized_response: String,
    pub rationale: &'static str,
}

/// Returns the credential unchanged if it is not blank, otherwise `MissingCredential`
pub fn require_credential<'a>(credential: Option<&'a str>, env: &str) -> Result<&'a str> {
    match credential {
        Some(c) if !c.trim().is_empty() => Ok(c),
        _ => Err(OptimizerError::MissingCredential {
            env: env.to_string(),
        }),
    }
}

/// Optimize `text` and fetch completions for both versions
///
/// No request is sent when the credential is absent or blank.
pub async fn compare(
    client: &CompletionClient,
    text: &str,
    credential: Option<&str>,
) -> Result<Comparison> {
    let credential = require_credential(credential, &client.config().api_key_env)?;

    let Optimization {
        augmented,
        rationale,
        category,
    } = optimize(text);

    info!(%category, model = %client.config().model, "requesting completions");

    let (original_response, optimized_response) = tokio::join!(
        client.complete(text, credential),
        client.complete(&augmented, credential),
    );

    Ok(Comparison {
        original: text.to_string(),
        augmented,
        category,
        original_response,
        optimized_response,
        rationale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::llm::{LlmConfig, ERROR_PREFIX};

    fn reply(content: &str) -> serde_json::Value {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
    }

    fn client_for(server: &MockServer) -> CompletionClient {
        let config = LlmConfig {
            endpoint: server.uri(),
            ..LlmConfig::default()
        };
        CompletionClient::new(&config).unwrap()
    }

    #[test]
    fn test_require_credential() {
        assert_eq!(require_credential(Some("sk-1"), "K").unwrap(), "sk-1");
        // passed through as-is, only the blank check trims
        assert_eq!(require_credential(Some(" sk-1 "), "K").unwrap(), " sk-1 ");
        assert!(matches!(
            require_credential(None, "K"),
            Err(OptimizerError::MissingCredential { .. })
        ));
        assert!(require_credential(Some("   "), "K").is_err());
    }

    #[tokio::test]
    async fn test_compare_sends_both_prompts() {
        let server = MockServer::start().await;
        let text = "How does inflation affect interest rates?";
        let augmented =
            "How does inflation affect interest rates? - Please explain the causes and their effects in detail.";

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(
                json!({"messages": [{"role": "user", "content": text}]}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("short answer")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(
                json!({"messages": [{"role": "user", "content": augmented}]}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("detailed answer")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = compare(&client, text, Some("sk-test")).await.unwrap();

        assert_eq!(result.original, text);
        assert_eq!(result.augmented, augmented);
        assert_eq!(result.category, Category::Causal);
        assert_eq!(result.original_response, "short answer");
        assert_eq!(result.optimized_response, "detailed answer");
        assert!(result.rationale.contains("causal relationships"));
    }

    #[tokio::test]
    async fn test_compare_without_credential_skips_requests() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = compare(&client, "Tell me about quantum computing", None)
            .await
            .unwrap_err();
        assert!(matches!(err, OptimizerError::MissingCredential { .. }));

        let err = compare(&client, "anything", Some("")).await.unwrap_err();
        assert!(err.to_string().contains("Please enter a valid API key"));
    }

    #[tokio::test]
    async fn test_compare_keeps_failures_as_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = compare(&client, "Tell me about quantum computing", Some("sk-test"))
            .await
            .unwrap();
        assert_eq!(result.category, Category::General);
        assert!(result.original_response.starts_with(ERROR_PREFIX));
        assert!(result.optimized_response.starts_with(ERROR_PREFIX));
    }
}
