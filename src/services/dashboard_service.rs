// src/services/dashboard_service.rs

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::BookingRepository,
    models::{booking::Booking, period::YearMonth, report::DashboardSummary},
    services::revenue_service,
};

#[derive(Clone)]
pub struct DashboardService {
    repo: BookingRepository,
}

impl DashboardService {
    pub fn new(repo: BookingRepository) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self, reference: YearMonth) -> Result<DashboardSummary, AppError> {
        let bookings = self.repo.list_bookings().await?;
        Ok(build_summary(&bookings, reference))
    }
}

// O mês de referência vem de fora: nada aqui olha o relógio.
pub fn build_summary(bookings: &[Booking], reference: YearMonth) -> DashboardSummary {
    let revenue_this_month = revenue_service::monthly_revenue(bookings, reference);
    let revenue_previous_month = revenue_service::monthly_revenue(bookings, reference.previous());

    let revenue_growth_percent = growth_percent(revenue_this_month, revenue_previous_month);

    let open_installment_bookings = bookings
        .iter()
        .filter_map(revenue_service::last_installment_month)
        .filter(|last| *last >= reference)
        .count();

    DashboardSummary {
        reference,
        revenue_this_month,
        revenue_previous_month,
        revenue_growth_percent,
        new_bookings_this_month: bookings.iter().filter(|b| b.was_created_in(reference)).count(),
        open_installment_bookings,
    }
}

// Variação percentual. Sem receita anterior, ou fora da faixa de Decimal, não há valor.
fn growth_percent(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    (current - previous)
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|p| p.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking(created: (i32, u32, u32), price: i64, down: i64, count: u32) -> Booking {
        Booking {
            created_at: NaiveDate::from_ymd_opt(created.0, created.1, created.2)
                .and_then(|d| d.and_hms_opt(8, 0, 0)),
            travel_price: Decimal::new(price, 0),
            down_payment: Decimal::new(down, 0),
            installments_count: count,
            ..Default::default()
        }
    }

    #[test]
    fn summary_compares_with_previous_month() {
        let bookings = vec![
            booking((2025, 1, 10), 1000, 200, 4), // jan: 200, fev..mai: 200
            booking((2025, 2, 1), 300, 0, 0),     // fev: 300
            booking((2024, 6, 1), 1200, 0, 6),    // jul..dez/24
        ];

        let summary = build_summary(&bookings, YearMonth::new(2025, 2).unwrap());

        assert_eq!(summary.revenue_this_month, Decimal::new(500, 0));
        assert_eq!(summary.revenue_previous_month, Decimal::new(200, 0));
        assert_eq!(summary.revenue_growth_percent, Some(Decimal::new(150, 0)));
        assert_eq!(summary.new_bookings_this_month, 1);
        assert_eq!(summary.open_installment_bookings, 1);
    }

    #[test]
    fn growth_is_none_without_previous_revenue() {
        let bookings = vec![booking((2025, 3, 5), 900, 0, 0)];
        let summary = build_summary(&bookings, YearMonth::new(2025, 3).unwrap());

        assert_eq!(summary.revenue_this_month, Decimal::new(900, 0));
        assert_eq!(summary.revenue_growth_percent, None);
        assert_eq!(summary.open_installment_bookings, 0);
    }

    #[test]
    fn growth_out_of_decimal_range_is_none() {
        let mut tiny = booking((2025, 1, 10), 0, 0, 0);
        tiny.travel_price = Decimal::new(1, 25);
        let bookings = vec![tiny, booking((2025, 2, 3), 1_000_000, 0, 0)];

        let summary = build_summary(&bookings, YearMonth::new(2025, 2).unwrap());

        assert_eq!(summary.revenue_previous_month, Decimal::new(1, 25));
        assert_eq!(summary.revenue_growth_percent, None);

        assert_eq!(growth_percent(Decimal::new(10, 0), Decimal::new(1, 26)), None);
        assert_eq!(growth_percent(Decimal::new(110, 0), Decimal::new(100, 0)), Some(Decimal::new(10, 0)));
    }
}
