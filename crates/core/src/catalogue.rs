//! Closed catalogues of legal areas and difficulty levels.
//!
//! Both sets are fixed. Every lookup (wire tag, display label, prompt description) is an
//! exhaustive `match`, so adding a variant without its descriptions fails to compile.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Legal domain a scenario is drawn from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum LegalArea {
    #[serde(rename = "civil")]
    Civil,
    #[serde(rename = "trabalhista")]
    Labor,
    #[serde(rename = "empresarial")]
    Corporate,
    #[serde(rename = "consumidor")]
    Consumer,
    #[serde(rename = "tributario")]
    Tax,
    #[serde(rename = "penal")]
    Criminal,
}

impl LegalArea {
    pub const ALL: [LegalArea; 6] = [
        LegalArea::Civil,
        LegalArea::Labor,
        LegalArea::Corporate,
        LegalArea::Consumer,
        LegalArea::Tax,
        LegalArea::Criminal,
    ];

    /// Wire tag accepted in requests.
    pub fn as_str(self) -> &'static str {
        match self {
            LegalArea::Civil => "civil",
            LegalArea::Labor => "trabalhista",
            LegalArea::Corporate => "empresarial",
            LegalArea::Consumer => "consumidor",
            LegalArea::Tax => "tributario",
            LegalArea::Criminal => "penal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LegalArea::Civil => "Direito Civil",
            LegalArea::Labor => "Direito Trabalhista",
            LegalArea::Corporate => "Direito Empresarial",
            LegalArea::Consumer => "Direito do Consumidor",
            LegalArea::Tax => "Direito Tributário",
            LegalArea::Criminal => "Direito Penal",
        }
    }

    /// Subject matter embedded in the generation prompt.
    pub fn context(self) -> &'static str {
        match self {
            LegalArea::Civil => {
                "direito civil, contratos, responsabilidade civil, direitos reais, família"
            }
            LegalArea::Labor => {
                "direito do trabalho, CLT, relações trabalhistas, rescisões, assédio"
            }
            LegalArea::Corporate => {
                "direito empresarial, societário, fusões, aquisições, compliance"
            }
            LegalArea::Consumer => {
                "CDC, direito do consumidor, relações de consumo, defeitos, vícios"
            }
            LegalArea::Tax => "direito tributário, impostos, fiscalização, planejamento fiscal",
            LegalArea::Criminal => {
                "direito penal, crimes, defesa criminal, processo penal, medidas cautelares"
            }
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.as_str() == tag)
    }
}

impl fmt::Display for LegalArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegalArea {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("unknown legal area '{s}'"))
    }
}

/// Difficulty level, ordered from easiest to hardest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub enum Difficulty {
    #[serde(rename = "Iniciante")]
    Beginner,
    #[serde(rename = "Intermediário")]
    Intermediate,
    #[serde(rename = "Avançado")]
    Advanced,
    #[serde(rename = "Expert")]
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
        Difficulty::Expert,
    ];

    /// Wire tag accepted in requests and echoed in scenarios. Doubles as the display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Iniciante",
            Difficulty::Intermediate => "Intermediário",
            Difficulty::Advanced => "Avançado",
            Difficulty::Expert => "Expert",
        }
    }

    /// Short description shown next to the level in a picker.
    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Casos básicos e diretos",
            Difficulty::Intermediate => "Situações com complexidade moderada",
            Difficulty::Advanced => "Casos complexos com múltiplas variáveis",
            Difficulty::Expert => "Cenários altamente complexos e desafiadores",
        }
    }

    /// Complexity instruction embedded in the generation prompt.
    pub fn prompt_description(self) -> &'static str {
        match self {
            Difficulty::Beginner => "cenário simples e direto, com poucos elementos complicadores",
            Difficulty::Intermediate => {
                "cenário com complexidade moderada, incluindo algumas nuances jurídicas"
            }
            Difficulty::Advanced => {
                "cenário complexo com múltiplas questões jurídicas e partes envolvidas"
            }
            Difficulty::Expert => {
                "cenário altamente complexo com questões controvertidas e aspectos técnicos avançados"
            }
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == tag)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_area_tags_round_trip_and_are_distinct() {
        let tags: HashSet<&str> = LegalArea::ALL.iter().map(|a| a.as_str()).collect();
        assert_eq!(tags.len(), LegalArea::ALL.len());

        for area in LegalArea::ALL {
            assert_eq!(LegalArea::from_tag(area.as_str()), Some(area));
            assert!(!area.label().is_empty());
            assert!(!area.context().is_empty());
        }
    }

    #[test]
    fn test_difficulty_tags_round_trip() {
        for level in Difficulty::ALL {
            assert_eq!(level.as_str().parse::<Difficulty>().unwrap(), level);
            assert!(!level.description().is_empty());
            assert!(!level.prompt_description().is_empty());
        }
    }

    #[test]
    fn test_difficulty_is_ordered() {
        assert!(Difficulty::Beginner < Difficulty::Intermediate);
        assert!(Difficulty::Intermediate < Difficulty::Advanced);
        assert!(Difficulty::Advanced < Difficulty::Expert);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(LegalArea::from_tag("Civil"), None);
        assert_eq!(LegalArea::from_tag(" civil"), None);
        assert_eq!(Difficulty::from_tag("Intermediario"), None);
        assert_eq!(Difficulty::from_tag("expert"), None);
    }

    #[test]
    fn test_serde_uses_wire_tags() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            "\"Intermediário\""
        );
        assert_eq!(serde_json::to_string(&LegalArea::Tax).unwrap(), "\"tributario\"");
        let parsed: LegalArea = serde_json::from_str("\"penal\"").unwrap();
        assert_eq!(parsed, LegalArea::Criminal);
    }
}
