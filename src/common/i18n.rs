// src/common/i18n.rs

use rust_decimal::Decimal;

use crate::models::payment::{MonthlyPayments, PaymentEvent};

// Idioma dos rótulos de relatório. A agência trabalha em português,
// então qualquer idioma desconhecido cai em `Pt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Pt,
    En,
}

impl Locale {
    // Lê um valor no formato do cabeçalho Accept-Language ("pt-BR,en;q=0.8").
    pub fn from_accept_language(header: &str) -> Self {
        accept_language::parse(header)
            .first()
            .map(|tag| {
                // "pt-BR" -> "pt", "en" -> "en"
                tag.split('-').next().unwrap_or(tag).to_lowercase()
            })
            .map(|lang| match lang.as_str() {
                "en" => Locale::En,
                _ => Locale::Pt,
            })
            .unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::En => "en",
        }
    }
}

pub const NO_PAYMENT_LABEL: &str = "—";

pub fn event_label(event: &PaymentEvent, locale: Locale) -> String {
    match (event, locale) {
        (PaymentEvent::DownPayment { .. }, Locale::Pt) => "Entrada".to_string(),
        (PaymentEvent::DownPayment { .. }, Locale::En) => "Down payment".to_string(),
        (PaymentEvent::Installment { number, total, .. }, Locale::Pt) => {
            format!("Parcela {}/{}", number, total)
        }
        (PaymentEvent::Installment { number, total, .. }, Locale::En) => {
            format!("Installment {}/{}", number, total)
        }
        (PaymentEvent::FullPayment { .. }, Locale::Pt) => "À Vista".to_string(),
        (PaymentEvent::FullPayment { .. }, Locale::En) => "Full payment".to_string(),
    }
}

/// Rótulo do mês inteiro: "Entrada + Parcela 1/4", ou "—" sem pagamento.
pub fn payments_label(payments: &MonthlyPayments, locale: Locale) -> String {
    if payments.is_empty() {
        return NO_PAYMENT_LABEL.to_string();
    }

    payments
        .events()
        .iter()
        .map(|event| event_label(event, locale))
        .collect::<Vec<_>>()
        .join(" + ")
}

pub fn month_abbrev(month: u32, locale: Locale) -> &'static str {
    const PT: [&str; 12] = [
        "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
    ];
    const EN: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];

    let index = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::Pt => PT[index],
        Locale::En => EN[index],
    }
}

pub fn format_money(amount: Decimal) -> String {
    format!("R$ {:.2}", amount)
}
