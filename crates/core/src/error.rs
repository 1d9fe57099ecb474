/// Structural validation failures, raised for both inbound requests and provider payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` has unsupported value {value}")]
    InvalidEnum { field: &'static str, value: String },
    #[error("`{field}` must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Failures of the outbound completion call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("bad request: {0}")]
    BadRequest(#[from] ValidationError),
    #[error("upstream provider error: {0}")]
    Upstream(#[from] ProviderError),
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error("unusable provider response: {0}")]
    MalformedPayload(String),
}

impl ScenarioError {
    /// Stable, user-facing message for this error.
    ///
    /// Never includes provider output or internal detail; those go to the log only.
    pub fn user_message(&self) -> &'static str {
        match self {
            ScenarioError::Configuration(_) => "API key do OpenAI não configurada",
            ScenarioError::BadRequest(ValidationError::MissingField(_)) => {
                "Área e dificuldade são obrigatórias"
            }
            ScenarioError::BadRequest(_) => "Área ou dificuldade inválida",
            ScenarioError::EmptyResponse | ScenarioError::MalformedPayload(_) => {
                "Erro ao processar resposta da IA"
            }
            ScenarioError::Upstream(_) => "Erro interno do servidor ao gerar cenário",
        }
    }

    /// True when the caller sent an unusable request (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScenarioError::BadRequest(_))
    }
}

pub type ScenarioResult<T> = std::result::Result<T, ScenarioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_distinguishes_missing_and_invalid() {
        let missing = ScenarioError::BadRequest(ValidationError::MissingField("area"));
        let invalid = ScenarioError::BadRequest(ValidationError::InvalidEnum {
            field: "difficulty",
            value: "\"Mestre\"".into(),
        });

        assert_eq!(missing.user_message(), "Área e dificuldade são obrigatórias");
        assert_eq!(invalid.user_message(), "Área ou dificuldade inválida");
        assert!(missing.is_client_error());
        assert!(invalid.is_client_error());
    }

    #[test]
    fn test_user_message_hides_provider_detail() {
        let err = ScenarioError::MalformedPayload("expected value at line 1 column 1: Sure! Here".into());
        assert_eq!(err.user_message(), "Erro ao processar resposta da IA");
        assert!(!err.is_client_error());

        let err = ScenarioError::Upstream(ProviderError::Status {
            status: 429,
            message: "quota exceeded".into(),
        });
        assert!(!err.user_message().contains("quota"));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_configuration_is_server_error() {
        let err = ScenarioError::Configuration("OPENAI_API_KEY is not set".into());
        assert_eq!(err.user_message(), "API key do OpenAI não configurada");
        assert!(!err.is_client_error());
    }
}
