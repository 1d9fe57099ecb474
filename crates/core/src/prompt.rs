//! Prompt composition for scenario generation.

use crate::scenario::GenerationRequest;

/// Role description sent as the system instruction.
pub const SYSTEM_PROMPT: &str = "Você é um especialista em direito brasileiro e criador de cenários de treinamento jurídico. Sua tarefa é criar cenários realistas e educativos para advogados praticarem suas habilidades.";

/// Marker that introduces the optional caller-supplied requirements.
pub const CUSTOM_PROMPT_LABEL: &str = "**Requisitos adicionais:**";

/// Output-format template. Lists exactly the fields accepted by
/// [`crate::validation::validate_model_payload`].
const OUTPUT_FORMAT: &str = r#"O cenário deve ser retornado EXATAMENTE no seguinte formato JSON, sem texto adicional:

{
  "title": "Título conciso e atrativo do cenário",
  "description": "Breve descrição do que o cenário aborda (1-2 frases)",
  "context": "Contexto detalhado da situação jurídica, incluindo fatos relevantes, cronologia e circunstâncias (3-4 parágrafos)",
  "parties": {
    "plaintiff": "Nome e breve descrição do requerente/cliente",
    "defendant": "Nome e breve descrição do requerido/parte contrária",
    "lawyers": ["Nome do Advogado 1 (perfil)", "Nome do Advogado 2 (perfil)"]
  },
  "objectives": [
    "Objetivo específico 1 para o treinamento",
    "Objetivo específico 2 para o treinamento",
    "Objetivo específico 3 para o treinamento"
  ],
  "challenges": [
    "Desafio jurídico 1 que será encontrado",
    "Desafio jurídico 2 que será encontrado",
    "Desafio jurídico 3 que será encontrado"
  ],
  "suggestedStrategies": [
    "Estratégia recomendada 1",
    "Estratégia recomendada 2",
    "Estratégia recomendada 3"
  ],
  "estimatedTime": "Tempo estimado para completar o exercício (ex: 45-60 minutos)"
}

Certifique-se de que:
- Os nomes sejam brasileiros e realistas
- O contexto seja detalhado mas conciso
- Os desafios sejam apropriados para o nível de dificuldade
- As estratégias sejam práticas e aplicáveis
- O cenário seja educativo e relevante para a prática jurídica brasileira
"#;

/// System and user instructions for one completion call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Compose the prompt for a validated request.
pub fn build_prompt(request: &GenerationRequest) -> Prompt {
    let mut user = String::with_capacity(OUTPUT_FORMAT.len() + 512);
    user.push_str(
        "Crie um cenário jurídico realista para treinamento de advogados com as seguintes características:\n\n",
    );
    user.push_str(&format!("**Área:** {}\n", request.area().context()));
    user.push_str(&format!(
        "**Dificuldade:** {}\n",
        request.difficulty().prompt_description()
    ));
    if let Some(custom) = request.custom_prompt() {
        user.push_str(&format!("{CUSTOM_PROMPT_LABEL} {custom}\n"));
    }
    user.push('\n');
    user.push_str(OUTPUT_FORMAT);

    Prompt {
        system: SYSTEM_PROMPT.to_owned(),
        user,
    }
}
