// src/services/revenue_service.rs

// Alocador de receita por parcelas.
// Funções puras: recebem a lista completa de reservas e um mês alvo,
// não guardam estado e não dependem do relógio. Nunca retornam erro.

use rust_decimal::Decimal;
use tracing::warn;

use crate::{
    common::i18n::{self, Locale},
    models::{
        booking::Booking,
        payment::{self, FirstInstallmentSource, MonthlyPayments, PaymentEvent, ScheduledPayment},
        period::YearMonth,
    },
};

/// Política padrão: sem data explícita, a parcela 1 vence no mês
/// seguinte ao do cadastro.
pub const FIRST_INSTALLMENT_LAG_MONTHS: i64 = 1;

pub fn default_first_installment_month(created: YearMonth) -> YearMonth {
    created.plus_months(FIRST_INSTALLMENT_LAG_MONTHS)
}

/// Mês da parcela 1 e a origem dessa informação.
/// `None` quando não há data explícita nem data de cadastro.
pub fn first_installment_month(booking: &Booking) -> Option<(YearMonth, FirstInstallmentSource)> {
    if let Some(due) = booking.first_installment_due_date.as_ref() {
        return Some((YearMonth::of(due), FirstInstallmentSource::Explicit));
    }

    booking
        .created_month()
        .map(|created| (default_first_installment_month(created), FirstInstallmentSource::MonthAfterCreation))
}

/// Valor de cada parcela: (valor - entrada) / parcelas, sem arredondamento.
/// O saldo é limitado a zero quando a entrada passa do valor.
pub fn installment_amount(booking: &Booking) -> Decimal {
    if booking.installments_count == 0 {
        return Decimal::ZERO;
    }

    let balance = (booking.travel_price - booking.down_payment).max(Decimal::ZERO);
    balance
        .checked_div(Decimal::from(booking.installments_count))
        .unwrap_or(Decimal::ZERO)
}

// =========================================================================
//  AVALIADOR POR RESERVA (fonte única do total e do rótulo)
// =========================================================================

pub fn evaluate(booking: &Booking, period: YearMonth) -> MonthlyPayments {
    let mut payments = MonthlyPayments::default();
    let created_here = booking.was_created_in(period);

    // À vista: o valor inteiro no mês de cadastro
    if !booking.is_installment_plan() {
        if created_here && booking.travel_price > Decimal::ZERO {
            payments.push(PaymentEvent::FullPayment { amount: booking.travel_price });
        }
        return payments;
    }

    // Entrada: só no mês de cadastro
    if created_here && booking.down_payment > Decimal::ZERO {
        payments.push(PaymentEvent::DownPayment { amount: booking.down_payment });
    }

    // Parcela: independente da entrada, as duas podem cair no mesmo mês
    if let Some((first, _)) = first_installment_month(booking) {
        let offset = period.months_since(first);
        if (0..booking.installments_count as i64).contains(&offset) {
            payments.push(PaymentEvent::Installment {
                amount: installment_amount(booking),
                number: offset as u32 + 1,
                total: booking.installments_count,
            });
        }
    }

    payments
}

// =========================================================================
//  RECEITA AGREGADA
// =========================================================================

pub fn monthly_revenue(bookings: &[Booking], period: YearMonth) -> Decimal {
    let total = bookings
        .iter()
        .map(|booking| evaluate(booking, period).total())
        .fold(Decimal::ZERO, payment::saturating_add);

    if total == Decimal::MAX {
        warn!(%period, "Receita do mês atingiu o limite de Decimal, valor saturado");
    }
    total
}

/// Versão sem tipo forte. Mês fora de 1..=12 não tem receita.
pub fn calculate_monthly_revenue(bookings: &[Booking], year: i32, month: u32) -> Decimal {
    match YearMonth::new(year, month) {
        Some(period) => monthly_revenue(bookings, period),
        None => {
            warn!(year, month, "Mês inválido no cálculo de receita, retornando zero");
            Decimal::ZERO
        }
    }
}

// =========================================================================
//  CONSULTA POR RESERVA (rótulos da tabela)
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentInfo {
    pub label: String,
    pub amount: Decimal,
}

/// O que a reserva paga no mês, ou `None` se nada.
pub fn installment_info(booking: &Booking, period: YearMonth, locale: Locale) -> Option<InstallmentInfo> {
    let payments = evaluate(booking, period);
    if payments.is_empty() {
        return None;
    }

    Some(InstallmentInfo {
        label: i18n::payments_label(&payments, locale),
        amount: payments.total(),
    })
}

/// Último mês com parcela, para planos parcelados.
pub fn last_installment_month(booking: &Booking) -> Option<YearMonth> {
    if !booking.is_installment_plan() {
        return None;
    }
    first_installment_month(booking)
        .map(|(first, _)| first.plus_months(booking.installments_count as i64 - 1))
}

/// Cronograma completo da reserva, mês a mês, pelo mesmo avaliador.
pub fn installment_schedule(booking: &Booking) -> Vec<ScheduledPayment> {
    let created = booking.created_month();
    let first = first_installment_month(booking).map(|(first, _)| first);
    let last = last_installment_month(booking);

    let start = match (created, first) {
        (Some(c), Some(f)) if booking.is_installment_plan() => c.min(f),
        (Some(c), _) => c,
        (None, Some(f)) if booking.is_installment_plan() => f,
        _ => return Vec::new(),
    };
    let end = match (created, last) {
        (Some(c), Some(l)) => c.max(l),
        (Some(c), None) => c,
        (None, Some(l)) => l,
        (None, None) => return Vec::new(),
    };

    (0..=end.months_since(start))
        .map(|offset| start.plus_months(offset))
        .flat_map(|period| {
            evaluate(booking, period)
                .events()
                .iter()
                .map(|event| ScheduledPayment { period, event: *event })
                .collect::<Vec<_>>()
        })
        .collect()
}

// Parcelas do cronograma que vencem depois de `period`.
pub fn remaining_installments(booking: &Booking, period: YearMonth) -> usize {
    installment_schedule(booking)
        .iter()
        .filter(|s| s.period > period && matches!(s.event, PaymentEvent::Installment { .. }))
        .count()
}
