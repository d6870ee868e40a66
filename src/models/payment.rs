// src/models/payment.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::period::YearMonth;

// --- Eventos de pagamento ---
// Um evento é o que uma reserva paga em um mês. O total do mês e o rótulo
// da tabela ("Entrada", "Parcela 3/12", "À Vista") saem da mesma lista.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PaymentEvent {
    DownPayment { amount: Decimal },
    Installment { amount: Decimal, number: u32, total: u32 },
    FullPayment { amount: Decimal },
}

impl PaymentEvent {
    pub fn amount(&self) -> Decimal {
        match self {
            PaymentEvent::DownPayment { amount }
            | PaymentEvent::Installment { amount, .. }
            | PaymentEvent::FullPayment { amount } => *amount,
        }
    }
}

// Eventos de uma reserva em um mês. Vazio = nenhum pagamento.
// No máximo dois: entrada e parcela podem cair no mesmo mês.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthlyPayments {
    events: Vec<PaymentEvent>,
}

impl MonthlyPayments {
    pub fn push(&mut self, event: PaymentEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[PaymentEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    // Satura em Decimal::MAX em vez de estourar
    pub fn total(&self) -> Decimal {
        self.events
            .iter()
            .map(PaymentEvent::amount)
            .fold(Decimal::ZERO, saturating_add)
    }
}

pub fn saturating_add(acc: Decimal, amount: Decimal) -> Decimal {
    acc.checked_add(amount).unwrap_or(Decimal::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirstInstallmentSource {
    Explicit,           // firstInstallmentDueDate válido
    MonthAfterCreation, // política padrão
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub period: YearMonth,
    pub event: PaymentEvent,
}
