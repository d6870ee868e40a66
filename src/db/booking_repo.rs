// src/db/booking_repo.rs

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use validator::Validate;

use crate::{
    common::error::{field_messages, AppError},
    models::booking::{Booking, FIELD_ALIASES},
};

// O repositório de reservas. Lê o snapshot exportado do Firebase a cada
// consulta: os relatórios sempre trabalham com a lista completa e atual.
#[derive(Clone)]
pub struct BookingRepository {
    path: PathBuf,
    strict: bool,
}

impl BookingRepository {
    pub fn new(path: impl Into<PathBuf>, strict: bool) -> Self {
        Self {
            path: path.into(),
            strict,
        }
    }

    // Busca todas as reservas do snapshot
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, AppError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let bookings = parse_snapshot(&raw, self.strict)?;

        debug!(
            path = %self.path.display(),
            total = bookings.len(),
            "Snapshot de reservas carregado"
        );

        Ok(bookings)
    }
}

/// Converte o JSON do Firebase em reservas.
///
/// Aceita uma lista de registros ou um objeto `{ chave: registro }`
/// (formato do Realtime Database); `null` é uma coleção vazia.
/// No modo estrito, o primeiro registro inválido interrompe a leitura;
/// no modo tolerante, ele é mantido e apenas registrado no log.
pub fn parse_snapshot(raw: &str, strict: bool) -> Result<Vec<Booking>, AppError> {
    let root: Value = serde_json::from_str(raw)?;

    let entries: Vec<(Option<String>, Value)> = match root {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(|item| (None, item)).collect(),
        Value::Object(map) => map.into_iter().map(|(key, item)| (Some(key), item)).collect(),
        other => {
            return Err(AppError::InvalidSnapshot(format!(
                "esperado lista ou objeto, recebido {}",
                json_kind(&other)
            )));
        }
    };

    let mut bookings = Vec::with_capacity(entries.len());

    for (position, (key, item)) in entries.into_iter().enumerate() {
        if !item.is_object() {
            if strict {
                return Err(AppError::InvalidSnapshot(format!(
                    "registro {} não é um objeto ({})",
                    key.as_deref().unwrap_or(&position.to_string()),
                    json_kind(&item)
                )));
            }
            warn!(position, key = ?key, "Registro ignorado: não é um objeto");
            continue;
        }

        let item = match item {
            Value::Object(map) => Value::Object(collapse_aliases(map)),
            other => other,
        };

        let mut booking: Booking = match serde_json::from_value(item) {
            Ok(booking) => booking,
            Err(e) if !strict => {
                warn!(position, key = ?key, error = %e, "Registro ignorado: não foi possível ler a reserva");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if booking.id.is_none() {
            booking.id = key;
        }

        if let Err(errors) = booking.validate() {
            if strict {
                return Err(AppError::ValidationError(errors));
            }
            warn!(
                id = booking.id.as_deref().unwrap_or("-"),
                details = ?field_messages(&errors),
                "Reserva com dados inconsistentes mantida no cálculo"
            );
        }

        bookings.push(booking);
    }

    info!("✅ {} reservas lidas do snapshot", bookings.len());
    Ok(bookings)
}

// O mesmo campo pode vir com o nome canônico e com um apelido
// ("createdAt" e "created_at"). Fica o primeiro na ordem de FIELD_ALIASES.
fn collapse_aliases(mut record: Map<String, Value>) -> Map<String, Value> {
    for (canonical, aliases) in FIELD_ALIASES {
        let mut kept = record.contains_key(*canonical);
        for alias in aliases.iter() {
            if !record.contains_key(*alias) {
                continue;
            }
            if kept {
                record.remove(*alias);
                debug!(field = *canonical, alias = *alias, "Apelido duplicado descartado");
            } else {
                kept = true;
            }
        }
    }
    record
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "booleano",
        Value::Number(_) => "número",
        Value::String(_) => "texto",
        Value::Array(_) => "lista",
        Value::Object(_) => "objeto",
    }
}
