//! JSON bodies exchanged with API clients.
//!
//! Scenarios themselves are serialised straight from [`lexcase_core::Scenario`]; this module
//! holds the envelopes around them.

use lexcase_core::{Difficulty, LegalArea, Scenario, ScenarioSession};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned with every non-2xx status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Documented shape of a generation request.
///
/// The endpoint itself reads the body as untyped JSON so that validation errors map onto the
/// service's error taxonomy instead of a framework rejection.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateScenarioReq {
    pub area: LegalArea,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AreaEntry {
    pub value: LegalArea,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DifficultyEntry {
    pub value: Difficulty,
    pub label: String,
    pub description: String,
}

/// Selectable legal areas and difficulty levels, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogueRes {
    pub areas: Vec<AreaEntry>,
    pub difficulties: Vec<DifficultyEntry>,
}

impl CatalogueRes {
    pub fn current() -> Self {
        Self {
            areas: LegalArea::ALL
                .into_iter()
                .map(|area| AreaEntry {
                    value: area,
                    label: area.label().into(),
                })
                .collect(),
            difficulties: Difficulty::ALL
                .into_iter()
                .map(|level| DifficultyEntry {
                    value: level,
                    label: level.as_str().into(),
                    description: level.description().into(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DifficultyCount {
    pub difficulty: Difficulty,
    pub count: usize,
}

/// Scenarios generated in the current session, newest first.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListScenariosRes {
    pub total: usize,
    pub counts_by_difficulty: Vec<DifficultyCount>,
    pub scenarios: Vec<Scenario>,
}

impl ListScenariosRes {
    pub fn from_session(session: &ScenarioSession) -> Self {
        Self {
            total: session.len(),
            counts_by_difficulty: session
                .counts_by_difficulty()
                .into_iter()
                .map(|(difficulty, count)| DifficultyCount { difficulty, count })
                .collect(),
            scenarios: session.scenarios().to_vec(),
        }
    }
}
