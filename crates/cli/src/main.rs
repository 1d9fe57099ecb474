use std::sync::Arc;

use clap::{Parser, Subcommand};
use lexcase_core::{
    prompt::build_prompt, CoreConfig, Difficulty, GenerationRequest, LegalArea, OpenAiProvider,
    Scenario, ScenarioService,
};

#[derive(Parser)]
#[command(name = "lexcase")]
#[command(about = "LexCase legal-training scenario generator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available legal areas
    Areas,
    /// List the difficulty levels
    Difficulties,
    /// Print the prompt that would be sent, without calling the model
    Prompt {
        /// Legal area tag (e.g. civil, trabalhista)
        #[arg(long)]
        area: LegalArea,
        /// Difficulty level (e.g. Iniciante, Expert)
        #[arg(long)]
        difficulty: Difficulty,
        /// Additional requirements appended to the prompt
        #[arg(long)]
        custom: Option<String>,
    },
    /// Generate a scenario with the configured model
    Generate {
        /// Legal area tag (e.g. civil, trabalhista)
        #[arg(long)]
        area: LegalArea,
        /// Difficulty level (e.g. Iniciante, Expert)
        #[arg(long)]
        difficulty: Difficulty,
        /// Additional requirements appended to the prompt
        #[arg(long)]
        custom: Option<String>,
        /// Print the scenario as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Areas) => {
            for area in LegalArea::ALL {
                println!("{:<14} {}", area.as_str(), area.label());
            }
        }
        Some(Commands::Difficulties) => {
            for level in Difficulty::ALL {
                println!("{:<14} {}", level.as_str(), level.description());
            }
        }
        Some(Commands::Prompt {
            area,
            difficulty,
            custom,
        }) => {
            let request = GenerationRequest::new(area, difficulty, custom.as_deref());
            let prompt = build_prompt(&request);
            println!("[system]\n{}\n\n[user]\n{}", prompt.system, prompt.user);
        }
        Some(Commands::Generate {
            area,
            difficulty,
            custom,
            json,
        }) => {
            let cfg = Arc::new(CoreConfig::from_env_values(
                std::env::var("OPENAI_API_KEY").ok(),
                std::env::var("OPENAI_MODEL").ok(),
                std::env::var("OPENAI_BASE_URL").ok(),
                std::env::var("OPENAI_TIMEOUT_SECS").ok(),
            )?);
            let provider = Arc::new(OpenAiProvider::from_config(&cfg)?);
            let service = ScenarioService::new(cfg, provider);

            let request = GenerationRequest::new(area, difficulty, custom.as_deref());
            match service.generate_request(&request).await {
                Ok(scenario) if json => println!("{}", serde_json::to_string_pretty(&scenario)?),
                Ok(scenario) => print!("{}", render_scenario(&scenario)),
                Err(e) => {
                    eprintln!("Error: {}", e.user_message());
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn render_list(heading: &str, items: &[String], out: &mut String) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n{heading}\n"));
    for item in items {
        out.push_str(&format!("  - {item}\n"));
    }
}

/// Plain-text detail view of a generated scenario.
fn render_scenario(scenario: &Scenario) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n[{}] {} | {}\n",
        scenario.title(),
        scenario.difficulty(),
        scenario.estimated_time(),
        scenario.created_at().format("%d/%m/%Y %H:%M"),
    ));
    out.push_str(&format!("\n{}\n", scenario.description()));
    out.push_str(&format!("\nContexto\n  {}\n", scenario.context()));

    let parties = scenario.parties();
    out.push_str(&format!(
        "\nPartes\n  Autor: {}\n  Réu: {}\n",
        parties.plaintiff, parties.defendant
    ));
    if !parties.lawyers.is_empty() {
        out.push_str(&format!("  Advogados: {}\n", parties.lawyers.join(", ")));
    }

    render_list("Objetivos", scenario.objectives(), &mut out);
    render_list("Desafios", scenario.challenges(), &mut out);
    render_list("Estratégias sugeridas", scenario.suggested_strategies(), &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clap::CommandFactory;
    use lexcase_core::{Parties, ScenarioContent, ScenarioId};

    fn scenario(lawyers: Vec<String>, challenges: Vec<String>) -> Scenario {
        let content = ScenarioContent {
            title: "Rescisão indireta".into(),
            description: "Empregado alega falta grave do empregador.".into(),
            context: "Atrasos reiterados de salário.".into(),
            parties: Parties {
                plaintiff: "João".into(),
                defendant: "Metalúrgica ABC".into(),
                lawyers,
            },
            objectives: vec!["Comprovar a mora salarial".into()],
            challenges,
            suggested_strategies: vec!["Juntar extratos bancários".into()],
            estimated_time: "45 minutos".into(),
        };
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        Scenario::from_content(ScenarioId::generate_at(at), Difficulty::Intermediate, content, at)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_args_parse_wire_values() {
        let cli = Cli::try_parse_from([
            "lexcase",
            "generate",
            "--area",
            "trabalhista",
            "--difficulty",
            "Avançado",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Generate {
                area,
                difficulty,
                custom,
                json,
            }) => {
                assert_eq!(area, LegalArea::Labor);
                assert_eq!(difficulty, Difficulty::Advanced);
                assert_eq!(custom, None);
                assert!(json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_unknown_area_is_rejected() {
        let result = Cli::try_parse_from([
            "lexcase",
            "prompt",
            "--area",
            "maritimo",
            "--difficulty",
            "Expert",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_scenario_lists_sections() {
        let text = render_scenario(&scenario(
            vec!["Dra. Ana".into(), "Dr. Bruno".into()],
            vec!["Prova testemunhal frágil".into()],
        ));
        assert!(text.starts_with("Rescisão indireta\n[Intermediário] 45 minutos | 14/03/2025 09:30\n"));
        assert!(text.contains("  Autor: João\n  Réu: Metalúrgica ABC\n"));
        assert!(text.contains("  Advogados: Dra. Ana, Dr. Bruno\n"));
        assert!(text.contains("\nDesafios\n  - Prova testemunhal frágil\n"));
        assert!(text.contains("\nEstratégias sugeridas\n  - Juntar extratos bancários\n"));
    }

    #[test]
    fn test_render_scenario_skips_empty_sections() {
        let text = render_scenario(&scenario(vec![], vec![]));
        assert!(!text.contains("Advogados"));
        assert!(!text.contains("Desafios"));
        assert!(text.contains("Objetivos"));
    }
}
