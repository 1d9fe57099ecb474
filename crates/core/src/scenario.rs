//! Scenario and generation-request types.

use crate::catalogue::{Difficulty, LegalArea};
use chrono::{DateTime, Utc};
use lexcase_uuid::ScenarioId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A validated generation request.
///
/// Only [`crate::validation::validate_request`] and [`GenerationRequest::new`] construct it, so
/// the area and difficulty are always members of their closed sets and the custom prompt, when
/// present, is trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    area: LegalArea,
    difficulty: Difficulty,
    custom_prompt: Option<String>,
}

impl GenerationRequest {
    pub fn new(area: LegalArea, difficulty: Difficulty, custom_prompt: Option<&str>) -> Self {
        let custom_prompt = custom_prompt
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);

        Self {
            area,
            difficulty,
            custom_prompt,
        }
    }

    pub fn area(&self) -> LegalArea {
        self.area
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt.as_deref()
    }
}

/// People involved in the case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Parties {
    pub plaintiff: String,
    pub defendant: String,
    pub lawyers: Vec<String>,
}

/// Scenario content as produced by the model, after structural validation.
///
/// This is also the wire shape the model is asked to return; unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioContent {
    pub title: String,
    pub description: String,
    pub context: String,
    pub parties: Parties,
    pub objectives: Vec<String>,
    pub challenges: Vec<String>,
    pub suggested_strategies: Vec<String>,
    pub estimated_time: String,
}

/// A fully-formed legal-training scenario.
///
/// Immutable once built: there are no setters, and every field is private behind a read-only
/// accessor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[schema(value_type = String, example = "scenario_1760870400123_k3v9x0a2q")]
    id: ScenarioId,
    title: String,
    difficulty: Difficulty,
    description: String,
    context: String,
    parties: Parties,
    objectives: Vec<String>,
    challenges: Vec<String>,
    suggested_strategies: Vec<String>,
    estimated_time: String,
    created_at: DateTime<Utc>,
}

impl Scenario {
    /// Assemble a scenario from validated content.
    ///
    /// `difficulty` always comes from the request, never from the model output.
    pub fn from_content(
        id: ScenarioId,
        difficulty: Difficulty,
        content: ScenarioContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ScenarioContent {
            title,
            description,
            context,
            parties,
            objectives,
            challenges,
            suggested_strategies,
            estimated_time,
        } = content;

        Self {
            id,
            title,
            difficulty,
            description,
            context,
            parties,
            objectives,
            challenges,
            suggested_strategies,
            estimated_time,
            created_at,
        }
    }

    pub fn id(&self) -> &ScenarioId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn parties(&self) -> &Parties {
        &self.parties
    }

    pub fn objectives(&self) -> &[String] {
        &self.objectives
    }

    pub fn challenges(&self) -> &[String] {
        &self.challenges
    }

    pub fn suggested_strategies(&self) -> &[String] {
        &self.suggested_strategies
    }

    pub fn estimated_time(&self) -> &str {
        &self.estimated_time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn content() -> ScenarioContent {
        ScenarioContent {
            title: "Contrato de locação".into(),
            description: "Disputa sobre reajuste".into(),
            context: "Locador e locatário divergem.".into(),
            parties: Parties {
                plaintiff: "Ana Souza".into(),
                defendant: "Imobiliária Sol".into(),
                lawyers: vec!["Dr. Paulo Lima".into()],
            },
            objectives: vec!["Negociar".into()],
            challenges: vec!["Cláusula ambígua".into()],
            suggested_strategies: vec!["Mediação".into()],
            estimated_time: "45-60 minutos".into(),
        }
    }

    #[test]
    fn test_generation_request_trims_custom_prompt() {
        let req = GenerationRequest::new(LegalArea::Civil, Difficulty::Expert, Some("  foco  "));
        assert_eq!(req.custom_prompt(), Some("foco"));

        let req = GenerationRequest::new(LegalArea::Civil, Difficulty::Expert, Some("   "));
        assert_eq!(req.custom_prompt(), None);
    }

    #[test]
    fn test_scenario_serializes_camel_case_with_iso_timestamp() {
        let created_at = Utc.with_ymd_and_hms(2025, 10, 19, 12, 30, 0).unwrap();
        let id = ScenarioId::parse("scenario_1760877000000_abcdefghi").unwrap();
        let scenario = Scenario::from_content(id, Difficulty::Intermediate, content(), created_at);

        let json = serde_json::to_value(&scenario).unwrap();
        assert_eq!(json["id"], "scenario_1760877000000_abcdefghi");
        assert_eq!(json["difficulty"], "Intermediário");
        assert_eq!(json["suggestedStrategies"][0], "Mediação");
        assert_eq!(json["estimatedTime"], "45-60 minutos");
        assert_eq!(json["parties"]["lawyers"][0], "Dr. Paulo Lima");
        assert_eq!(json["createdAt"], "2025-10-19T12:30:00Z");
    }
}
