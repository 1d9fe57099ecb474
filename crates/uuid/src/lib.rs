//! Scenario identifier utilities.
//!
//! Every generated scenario carries an opaque identifier that is allocated once, at creation time,
//! and never reused. The identifier is time-prefixed so that it sorts roughly by creation and is
//! readable in logs, with a random suffix drawn from a v4 UUID so that two scenarios created in
//! the same millisecond still differ.
//!
//! ## Canonical form
//! `scenario_<unix-millis>_<suffix>`
//!
//! - `unix-millis`: decimal milliseconds since the Unix epoch (no sign, no leading `+`)
//! - `suffix`: exactly 9 characters from `0-9` and `a-z`
//!
//! Example: `scenario_1760870400123_k3v9x0a2q`
//!
//! Use [`ScenarioId::generate`] to allocate a fresh identifier and [`ScenarioId::parse`] to
//! validate one supplied from outside (for example a REST path segment).

mod service;

pub use service::{ScenarioId, SCENARIO_ID_PREFIX, SUFFIX_LEN};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
