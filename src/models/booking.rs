// src/models/booking.rs

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{common::parse, models::period::YearMonth};

// Reserva de viagem de um cliente, como vem do Firebase.
// Todos os campos são lidos de forma tolerante (ver `common::parse`):
// o cálculo de receita nunca recebe um registro "quebrado".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_amounts", skip_on_field_errors = false))]
pub struct Booking {
    // A chave do registro no Firebase (preenchida pelo repositório quando vier vazia)
    #[serde(default, deserialize_with = "parse::lenient_text")]
    pub id: Option<String>,

    #[serde(default, alias = "client_name", alias = "name", deserialize_with = "parse::lenient_text")]
    pub client_name: Option<String>,

    #[serde(default, deserialize_with = "parse::lenient_text")]
    pub destination: Option<String>,

    #[serde(default, alias = "travel_date", deserialize_with = "parse::lenient_date")]
    pub travel_date: Option<NaiveDate>,

    #[validate(email(message = "invalid_email"))]
    #[serde(default, deserialize_with = "parse::lenient_text")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "parse::lenient_text")]
    pub phone: Option<String>,

    // --- Campos do cálculo de receita ---

    #[validate(required(message = "required"))]
    #[serde(default, alias = "created_at", deserialize_with = "parse::lenient_timestamp")]
    pub created_at: Option<NaiveDateTime>,

    #[serde(default, alias = "travel_price", deserialize_with = "parse::lenient_decimal")]
    pub travel_price: Decimal,

    #[serde(default, alias = "down_payment", deserialize_with = "parse::lenient_decimal")]
    pub down_payment: Decimal,

    #[validate(range(max = 120, message = "too_many_installments"))]
    #[serde(default, alias = "installments_count", alias = "installments", deserialize_with = "parse::lenient_count")]
    pub installments_count: u32,

    #[serde(
        default,
        alias = "first_installment_due_date",
        deserialize_with = "parse::lenient_date"
    )]
    pub first_installment_due_date: Option<NaiveDate>,
}

// Nome canônico de cada campo e os apelidos aceitos no Firebase, na ordem
// de preferência. Registro com mais de um deles fica só com o primeiro.
pub const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("clientName", &["client_name", "name"]),
    ("travelDate", &["travel_date"]),
    ("createdAt", &["created_at"]),
    ("travelPrice", &["travel_price"]),
    ("downPayment", &["down_payment"]),
    ("installmentsCount", &["installments_count", "installments"]),
    ("firstInstallmentDueDate", &["first_installment_due_date"]),
];

impl Booking {
    pub fn created_month(&self) -> Option<YearMonth> {
        self.created_at.as_ref().map(YearMonth::of)
    }

    pub fn was_created_in(&self, period: YearMonth) -> bool {
        self.created_month() == Some(period)
    }

    // Plano parcelado: tem parcelas E tem valor. Caso contrário é "à vista".
    pub fn is_installment_plan(&self) -> bool {
        self.installments_count > 0 && self.travel_price > Decimal::ZERO
    }

    pub fn display_name(&self) -> &str {
        self.client_name.as_deref().unwrap_or("Cliente sem nome")
    }
}

// Regra entre campos: a entrada não pode passar do valor da viagem.
// Só é aplicada na ingestão; o cálculo apenas limita o saldo a zero.
fn validate_amounts(booking: &Booking) -> Result<(), ValidationError> {
    if booking.down_payment > booking.travel_price {
        let mut err = ValidationError::new("down_payment_exceeds_price");
        err.message = Some("A entrada não pode ser maior que o valor da viagem".into());
        return Err(err);
    }
    Ok(())
}
