//! In-memory record of the scenarios generated during one session.
//!
//! Scenarios are only ever added; there is no deletion. The whole session is discarded when its
//! owner drops it.

use crate::catalogue::Difficulty;
use crate::scenario::Scenario;
use lexcase_uuid::ScenarioId;

#[derive(Clone, Debug, Default)]
pub struct ScenarioSession {
    // newest first
    scenarios: Vec<Scenario>,
}

impl ScenarioSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a freshly generated scenario at the front of the session.
    pub fn record(&mut self, scenario: Scenario) {
        self.scenarios.insert(0, scenario);
    }

    /// All scenarios, newest first.
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn get(&self, id: &ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Number of scenarios per difficulty, easiest first, omitting levels with none.
    pub fn counts_by_difficulty(&self) -> Vec<(Difficulty, usize)> {
        Difficulty::ALL
            .into_iter()
            .map(|level| {
                let count = self
                    .scenarios
                    .iter()
                    .filter(|s| s.difficulty() == level)
                    .count();
                (level, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
