//! Constants used throughout the LexCase core crate.
//!
//! Generation parameters are fixed here rather than configured: the prompt is tuned for them.

/// Default OpenAI model used for scenario generation.
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// Default base URL of the OpenAI REST API.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default transport timeout for a single completion call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Sampling temperature for scenario generation (favours creative output).
pub const GENERATION_TEMPERATURE: f32 = 0.8;

/// Ceiling on output tokens for one generated scenario.
pub const GENERATION_MAX_TOKENS: u32 = 2000;

/// Environment variable holding the OpenAI credential.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
