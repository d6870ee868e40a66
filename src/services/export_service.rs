// src/services/export_service.rs

use std::{io::Write, path::PathBuf};

use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::{
    common::{error::AppError, i18n::{self, Locale}},
    db::BookingRepository,
    models::{booking::Booking, period::YearMonth},
    services::{report_service, revenue_service},
};

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    client: &'a str,
    destination: &'a str,
    created_at: String,
    travel_price: String,
    down_payment: String,
    installments: u32,
    remaining_installments: usize,
    payment: String,
    amount: String,
}

const HEADERS_PT: [&str; 10] = [
    "id",
    "cliente",
    "destino",
    "data_cadastro",
    "valor_viagem",
    "entrada",
    "parcelas",
    "parcelas_restantes",
    "pagamento_mes",
    "valor_mes",
];

const HEADERS_EN: [&str; 10] = [
    "id",
    "client",
    "destination",
    "created_at",
    "travel_price",
    "down_payment",
    "installments",
    "remaining_installments",
    "payment_this_month",
    "amount_this_month",
];

#[derive(Clone)]
pub struct ExportService {
    repo: BookingRepository,
    export_dir: PathBuf,
}

impl ExportService {
    pub fn new(repo: BookingRepository, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo,
            export_dir: export_dir.into(),
        }
    }

    /// Gera `relatorio_AAAA-MM.csv` no diretório de exportação e retorna o caminho.
    pub async fn export_monthly_csv(&self, period: YearMonth, locale: Locale) -> Result<PathBuf, AppError> {
        let bookings = self.repo.list_bookings().await?;

        let mut buffer = Vec::new();
        let total = write_monthly_csv(&bookings, period, locale, &mut buffer)?;

        tokio::fs::create_dir_all(&self.export_dir).await?;
        let path = self.export_dir.join(format!("relatorio_{}.csv", period));
        tokio::fs::write(&path, buffer).await?;

        info!(path = %path.display(), total = %total, "📄 Relatório CSV exportado");
        Ok(path)
    }
}

/// Escreve o CSV do mês: uma linha por reserva cadastrada no mês e uma
/// linha TOTAL. O total vem do mesmo alocador do relatório, então bate
/// com o que aparece na tela. Retorna esse total.
pub fn write_monthly_csv<W: Write>(
    bookings: &[Booking],
    period: YearMonth,
    locale: Locale,
    writer: W,
) -> Result<Decimal, AppError> {
    let report = report_service::build_monthly_report(bookings, period);

    let mut wrt = WriterBuilder::new().has_headers(false).from_writer(writer);
    wrt.write_record(match locale {
        Locale::Pt => HEADERS_PT,
        Locale::En => HEADERS_EN,
    })?;

    for booking in &report.filtered_bookings {
        let payments = revenue_service::evaluate(booking, period);

        wrt.serialize(CsvRow {
            id: booking.id.as_deref().unwrap_or(""),
            client: booking.display_name(),
            destination: booking.destination.as_deref().unwrap_or(""),
            created_at: booking
                .created_at
                .map(|dt| dt.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            travel_price: money(booking.travel_price),
            down_payment: money(booking.down_payment),
            installments: booking.installments_count,
            remaining_installments: revenue_service::remaining_installments(booking, period),
            payment: i18n::payments_label(&payments, locale),
            amount: money(payments.total()),
        })?;
    }

    let total = report.total_revenue_for_month;
    let total_amount = money(total);
    wrt.write_record(["TOTAL", "", "", "", "", "", "", "", "", total_amount.as_str()])?;
    wrt.flush()?;

    Ok(total)
}

// Arredondamento só na apresentação
fn money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
