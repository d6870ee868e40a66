// src/common/error.rs

use std::collections::HashMap;

use thiserror::Error;

// Erros de tudo que fica FORA do alocador de receita.
// O alocador em si nunca falha: normaliza para zero ou para o mês padrão.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Erro de leitura/escrita: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro de CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Snapshot de reservas inválido: {0}")]
    InvalidSnapshot(String),

    #[error("Período inválido: {year}-{month}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("Janela de tendência inválida: {0} meses (permitido de 1 a 12)")]
    InvalidTrendWindow(u32),

    #[error("Erro de configuração: {0}")]
    ConfigError(String),
}

// Achata os erros do `validator` em "campo -> mensagens".
// Sem mensagem configurada, usa o código do erro.
pub fn field_messages(errors: &validator::ValidationErrors) -> HashMap<String, Vec<String>> {
    let mut details = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        details.insert(field.to_string(), messages);
    }
    details
}
