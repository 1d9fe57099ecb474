//! # LexCase Core
//!
//! Core logic for generating legal-training scenarios with a hosted language model.
//!
//! This crate contains:
//! - The closed catalogues of legal areas and difficulty levels
//! - Structural validation of inbound requests and provider payloads
//! - Prompt composition and the outbound completion-provider seam
//! - The generation service and the in-memory scenario session
//!
//! **No API concerns**: HTTP servers, routing and OpenAPI docs belong in `api-rest` and
//! `api-shared`.

pub mod catalogue;
pub mod config;
pub mod constants;
pub mod error;
pub mod prompt;
pub mod provider;
pub mod scenario;
pub mod service;
pub mod session;
pub mod validation;

pub use catalogue::{Difficulty, LegalArea};
pub use config::{ApiKey, CoreConfig};
pub use error::{ProviderError, ScenarioError, ScenarioResult, ValidationError};
pub use lexcase_uuid::ScenarioId;
pub use provider::{CompletionProvider, CompletionRequest, OpenAiProvider};
pub use scenario::{GenerationRequest, Parties, Scenario, ScenarioContent};
pub use service::ScenarioService;
pub use session::ScenarioSession;
