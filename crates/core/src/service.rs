//! Scenario generation service.
//!
//! One call to [`ScenarioService::generate`] is one all-or-nothing round-trip:
//! credential check, request validation, prompt composition, a single provider call, fence
//! stripping, JSON parsing, payload validation and scenario assembly. Nothing is cached, retried
//! or shared between calls.

use crate::config::{ApiKey, CoreConfig};
use crate::constants::{GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE, OPENAI_API_KEY_ENV};
use crate::error::{ScenarioError, ScenarioResult};
use crate::prompt::build_prompt;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::scenario::{GenerationRequest, Scenario};
use crate::validation::{validate_model_payload, validate_request};
use chrono::Utc;
use lexcase_uuid::ScenarioId;
use serde_json::Value;
use std::sync::Arc;

/// Generates scenarios through an injected completion provider.
///
/// Holds only immutable configuration and a shared provider handle, so clones can serve
/// concurrent requests.
#[derive(Clone)]
pub struct ScenarioService {
    cfg: Arc<CoreConfig>,
    provider: Arc<dyn CompletionProvider>,
}

impl ScenarioService {
    pub fn new(cfg: Arc<CoreConfig>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { cfg, provider }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Generate a scenario from a raw JSON request.
    ///
    /// # Errors
    ///
    /// - [`ScenarioError::Configuration`] if no API key is configured (checked first).
    /// - [`ScenarioError::BadRequest`] if the request fails validation; the provider is not called.
    /// - any error of [`ScenarioService::generate_request`].
    ///
    /// Every error is logged here with its internal detail.
    pub async fn generate(&self, raw: &Value) -> ScenarioResult<Scenario> {
        let result = self.generate_inner(raw).await;
        if let Err(err) = &result {
            log_failure(err);
        }
        result
    }

    async fn generate_inner(&self, raw: &Value) -> ScenarioResult<Scenario> {
        let api_key = self.api_key()?;
        let request = validate_request(raw)?;
        self.run(api_key, &request).await
    }

    /// Generate a scenario from an already validated request.
    ///
    /// # Errors
    ///
    /// - [`ScenarioError::Configuration`] if no API key is configured.
    /// - [`ScenarioError::Upstream`] if the provider call fails.
    /// - [`ScenarioError::EmptyResponse`] if the provider returned no text.
    /// - [`ScenarioError::MalformedPayload`] if the text is not a JSON object of the expected shape.
    pub async fn generate_request(&self, request: &GenerationRequest) -> ScenarioResult<Scenario> {
        let result = match self.api_key() {
            Ok(api_key) => self.run(api_key, request).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            log_failure(err);
        }
        result
    }

    fn api_key(&self) -> ScenarioResult<&ApiKey> {
        self.cfg.api_key().ok_or_else(|| {
            ScenarioError::Configuration(format!("{OPENAI_API_KEY_ENV} is not set"))
        })
    }

    async fn run(&self, api_key: &ApiKey, request: &GenerationRequest) -> ScenarioResult<Scenario> {
        let prompt = build_prompt(request);
        let completion = CompletionRequest {
            model: self.cfg.model().to_owned(),
            system: prompt.system,
            user: prompt.user,
            temperature: GENERATION_TEMPERATURE,
            max_tokens: GENERATION_MAX_TOKENS,
        };

        tracing::info!(
            area = %request.area(),
            difficulty = %request.difficulty(),
            custom_prompt = request.custom_prompt().is_some(),
            "generating scenario"
        );

        let text = self.provider.complete(api_key, &completion).await?;
        if text.trim().is_empty() {
            return Err(ScenarioError::EmptyResponse);
        }

        let cleaned = strip_code_fences(&text);
        let raw: Value = serde_json::from_str(cleaned).map_err(|err| {
            tracing::error!(response = %text, "provider response is not valid JSON");
            ScenarioError::MalformedPayload(format!("response is not valid JSON: {err}"))
        })?;

        let content = validate_model_payload(&raw).map_err(|err| {
            tracing::error!(response = %text, "provider response does not match the scenario shape");
            ScenarioError::MalformedPayload(err.to_string())
        })?;

        let created_at = Utc::now();
        let scenario = Scenario::from_content(
            ScenarioId::generate_at(created_at),
            request.difficulty(),
            content,
            created_at,
        );

        tracing::info!(id = %scenario.id(), "scenario generated");
        Ok(scenario)
    }
}

fn log_failure(err: &ScenarioError) {
    match err {
        ScenarioError::BadRequest(detail) => {
            tracing::warn!("rejected scenario request: {detail}");
        }
        other => tracing::error!("scenario generation failed: {other}"),
    }
}

/// Remove optional markdown code-fence wrapping around a provider response.
///
/// Handles a leading ```` ``` ```` or ```` ```json ```` line and a trailing ```` ``` ````. Text
/// without fences is returned trimmed, so applying this twice gives the same result as once.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        // Drop the info string (e.g. `json`) up to the end of the fence line.
        body = match rest.find('\n') {
            Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
                &rest[idx + 1..]
            }
            _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix("```") {
        body = rest;
    }

    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{Difficulty, LegalArea};
    use crate::error::{ProviderError, ValidationError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubProvider {
        reply: Result<String, ProviderError>,
        calls: AtomicUsize,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl StubProvider {
        fn replying(text: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.into()),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn failing(err: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(err),
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(
            &self,
            _api_key: &ApiKey,
            request: &CompletionRequest,
        ) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request.clone());
            self.reply.clone()
        }
    }

    fn payload() -> Value {
        json!({
            "title": "Vício oculto em veículo usado",
            "description": "Consumidor descobre defeito no motor.",
            "context": "Três semanas após a compra...",
            "difficulty": "Expert",
            "parties": {
                "plaintiff": "Carlos Andrade",
                "defendant": "Auto Center Brasil",
                "lawyers": ["Dra. Beatriz Nunes (consumidor)"]
            },
            "objectives": ["Aplicar o CDC"],
            "challenges": ["Prazo decadencial"],
            "suggestedStrategies": ["Notificação extrajudicial"],
            "estimatedTime": "30-45 minutos"
        })
    }

    fn service_with(provider: Arc<StubProvider>, key: Option<&str>) -> ScenarioService {
        let cfg = CoreConfig::with_defaults(key.and_then(ApiKey::new));
        ScenarioService::new(Arc::new(cfg), provider)
    }

    fn valid_request() -> Value {
        json!({ "area": "civil", "difficulty": "Intermediário" })
    }

    #[tokio::test]
    async fn test_generate_end_to_end_keeps_request_difficulty() {
        let stub = StubProvider::replying(payload().to_string());
        let service = service_with(stub.clone(), Some("sk-test"));

        let scenario = service.generate(&valid_request()).await.expect("should generate");

        assert_eq!(scenario.difficulty(), Difficulty::Intermediate);
        assert_eq!(scenario.title(), "Vício oculto em veículo usado");
        assert_eq!(scenario.parties().lawyers.len(), 1);
        assert!(ScenarioId::is_canonical(&scenario.id().to_string()));
        assert_eq!(stub.calls(), 1);

        let json = serde_json::to_value(&scenario).unwrap();
        assert_eq!(json["difficulty"], "Intermediário");
    }

    #[tokio::test]
    async fn test_generate_sends_fixed_generation_parameters() {
        let stub = StubProvider::replying(payload().to_string());
        let service = service_with(stub.clone(), Some("sk-test"));

        service
            .generate(&json!({ "area": "penal", "difficulty": "Expert", "customPrompt": "júri" }))
            .await
            .unwrap();

        let sent = stub.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(sent.model, crate::constants::DEFAULT_MODEL);
        assert_eq!(sent.temperature, GENERATION_TEMPERATURE);
        assert_eq!(sent.max_tokens, GENERATION_MAX_TOKENS);
        assert!(sent.user.contains(LegalArea::Criminal.context()));
        assert!(sent.user.contains(Difficulty::Expert.prompt_description()));
        assert!(sent.user.contains("júri"));
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_request_without_calling_provider() {
        let stub = StubProvider::replying(payload().to_string());
        let service = service_with(stub.clone(), Some("sk-test"));

        for raw in [
            json!({ "area": "maritimo", "difficulty": "Expert" }),
            json!({ "area": "civil", "difficulty": "Mestre" }),
            json!({ "area": "civil" }),
            json!({}),
        ] {
            let err = service.generate(&raw).await.unwrap_err();
            assert!(matches!(err, ScenarioError::BadRequest(_)), "got {err:?}");
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_without_credential_is_configuration_error() {
        let stub = StubProvider::replying(payload().to_string());
        let service = service_with(stub.clone(), None);

        let err = service.generate(&valid_request()).await.unwrap_err();
        assert!(matches!(err, ScenarioError::Configuration(_)));

        // Checked before request validation as well.
        let err = service.generate(&json!({})).await.unwrap_err();
        assert!(matches!(err, ScenarioError::Configuration(_)));

        let typed = GenerationRequest::new(LegalArea::Civil, Difficulty::Beginner, None);
        let err = service.generate_request(&typed).await.unwrap_err();
        assert!(matches!(err, ScenarioError::Configuration(_)));

        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_surfaces_upstream_error() {
        let stub = StubProvider::failing(ProviderError::Status {
            status: 401,
            message: "Incorrect API key provided".into(),
        });
        let service = service_with(stub.clone(), Some("sk-bad"));

        let err = service.generate(&valid_request()).await.unwrap_err();
        assert!(matches!(err, ScenarioError::Upstream(ProviderError::Status { status: 401, .. })));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_empty_response() {
        for reply in ["", "   \n  "] {
            let stub = StubProvider::replying(reply);
            let service = service_with(stub, Some("sk-test"));

            let err = service.generate(&valid_request()).await.unwrap_err();
            assert!(matches!(err, ScenarioError::EmptyResponse));
        }
    }

    #[tokio::test]
    async fn test_generate_parses_fenced_response_like_plain() {
        let plain = payload().to_string();
        let fenced = format!("```json\n{plain}\n```");

        let a = service_with(StubProvider::replying(plain), Some("sk-test"))
            .generate(&valid_request())
            .await
            .unwrap();
        let b = service_with(StubProvider::replying(fenced), Some("sk-test"))
            .generate(&valid_request())
            .await
            .unwrap();

        assert_eq!(a.title(), b.title());
        assert_eq!(a.parties(), b.parties());
        assert_eq!(a.objectives(), b.objectives());
        assert_eq!(a.estimated_time(), b.estimated_time());
    }

    #[tokio::test]
    async fn test_generate_rejects_prose_response() {
        let stub = StubProvider::replying("Claro! Aqui está o cenário solicitado.");
        let service = service_with(stub, Some("sk-test"));

        let err = service.generate(&valid_request()).await.unwrap_err();
        assert!(matches!(err, ScenarioError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_generate_rejects_payload_missing_field() {
        let mut raw = payload();
        raw.as_object_mut().unwrap().remove("estimatedTime");
        let stub = StubProvider::replying(raw.to_string());
        let service = service_with(stub, Some("sk-test"));

        let err = service.generate(&valid_request()).await.unwrap_err();
        assert!(
            matches!(err, ScenarioError::MalformedPayload(ref msg) if msg.contains("estimatedTime")),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_generate_twice_yields_distinct_ids_in_time_order() {
        let stub = StubProvider::replying(payload().to_string());
        let service = service_with(stub.clone(), Some("sk-test"));

        let first = service.generate(&valid_request()).await.unwrap();
        let second = service.generate(&valid_request()).await.unwrap();

        assert_ne!(first.id(), second.id());
        assert!(first.created_at() <= second.created_at());
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_generate_request_accepts_typed_request() {
        let stub = StubProvider::replying(payload().to_string());
        let service = service_with(stub, Some("sk-test"));

        let request = GenerationRequest::new(LegalArea::Tax, Difficulty::Advanced, None);
        let scenario = service.generate_request(&request).await.unwrap();
        assert_eq!(scenario.difficulty(), Difficulty::Advanced);
    }

    #[test]
    fn test_bad_request_keeps_validator_detail() {
        let err: ScenarioError = ValidationError::MissingField("area").into();
        assert!(err.to_string().contains("area"));
    }

    #[test]
    fn test_strip_code_fences_variants() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```json\n{\"a\":1}```  "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_code_fences_is_idempotent() {
        for input in [
            "```json\n{\"a\":1}\n```",
            "{\"a\":1}",
            "\n\n{\"a\":\"```\"}\n",
        ] {
            let once = strip_code_fences(input);
            assert_eq!(strip_code_fences(once), once);
        }
    }
}
