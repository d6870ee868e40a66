// src/services/report_service.rs

use tracing::info;

use crate::{
    common::{error::AppError, i18n::{self, Locale}},
    db::BookingRepository,
    models::{
        booking::Booking,
        period::YearMonth,
        report::{MonthlyReport, TrendPoint},
    },
    services::revenue_service,
};

pub const MAX_TREND_MONTHS: u32 = 12;

#[derive(Clone)]
pub struct ReportService {
    repo: BookingRepository,
    locale: Locale,
}

impl ReportService {
    pub fn new(repo: BookingRepository, locale: Locale) -> Self {
        Self { repo, locale }
    }

    pub async fn monthly_report(&self, period: YearMonth) -> Result<MonthlyReport, AppError> {
        let bookings = self.repo.list_bookings().await?;
        let report = build_monthly_report(&bookings, period);

        info!(
            period = %period,
            new_bookings = report.new_bookings(),
            revenue = %report.total_revenue_for_month,
            "Relatório mensal gerado"
        );

        Ok(report)
    }

    pub async fn revenue_trend(&self, end: YearMonth, months: u32) -> Result<Vec<TrendPoint>, AppError> {
        let bookings = self.repo.list_bookings().await?;
        build_revenue_trend(&bookings, end, months, self.locale)
    }
}

/// Reservas cadastradas no mês (ordenadas pela data de cadastro) e a
/// receita atribuída ao mês, que também conta parcelas de reservas antigas.
pub fn build_monthly_report(bookings: &[Booking], period: YearMonth) -> MonthlyReport {
    let mut filtered_bookings: Vec<Booking> = bookings
        .iter()
        .filter(|booking| booking.was_created_in(period))
        .cloned()
        .collect();
    filtered_bookings.sort_by_key(|booking| booking.created_at);

    MonthlyReport {
        period,
        filtered_bookings,
        total_revenue_for_month: revenue_service::monthly_revenue(bookings, period),
    }
}

/// Janela deslizante de `months` pontos terminando em `end`, do mais antigo
/// para o mais recente.
pub fn build_revenue_trend(
    bookings: &[Booking],
    end: YearMonth,
    months: u32,
    locale: Locale,
) -> Result<Vec<TrendPoint>, AppError> {
    if months == 0 || months > MAX_TREND_MONTHS {
        return Err(AppError::InvalidTrendWindow(months));
    }

    let start = end.plus_months(-(months as i64 - 1));

    let points = (0..months as i64)
        .map(|offset| start.plus_months(offset))
        .map(|month| TrendPoint {
            month,
            label: format!(
                "{}/{:02}",
                i18n::month_abbrev(month.month(), locale),
                month.year().rem_euclid(100)
            ),
            revenue: revenue_service::monthly_revenue(bookings, month),
            new_bookings: bookings.iter().filter(|b| b.was_created_in(month)).count(),
        })
        .collect();

    Ok(points)
}
