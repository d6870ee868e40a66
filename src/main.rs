//src/main.rs

use backoffice::{
    common::i18n::{self, format_money},
    config::AppState,
    services::revenue_service,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger. RUST_LOG controla o nível (padrão: info).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve seguir.
    let app_state = AppState::new().await?;
    let config = &app_state.config;
    let period = config.report_period;
    let locale = config.locale;

    tracing::info!("🚀 Gerando relatórios de {} ({})", period, locale.code());

    // --- Relatório do mês ---
    let report = app_state.report_service.monthly_report(period).await?;

    println!("Relatório {}", period);
    for booking in &report.filtered_bookings {
        let (label, amount) = revenue_service::installment_info(booking, period, locale)
            .map(|info| (info.label, info.amount))
            .unwrap_or_else(|| (i18n::NO_PAYMENT_LABEL.to_string(), Default::default()));
        println!(
            "  {:<30} {:>14}  {:<24} {:>14}",
            booking.display_name(),
            format_money(booking.travel_price),
            label,
            format_money(amount),
        );
    }
    println!("  Novas reservas: {}", report.new_bookings());
    println!("  Receita do mês: {}", format_money(report.total_revenue_for_month));

    // --- Dashboard ---
    let summary = app_state.dashboard_service.get_summary(period).await?;
    println!(
        "  Mês anterior: {}  Variação: {}  Planos em aberto: {}",
        format_money(summary.revenue_previous_month),
        summary
            .revenue_growth_percent
            .map(|p| format!("{:.2}%", p))
            .unwrap_or_else(|| "—".to_string()),
        summary.open_installment_bookings,
    );

    // --- Tendência ---
    let trend = app_state
        .report_service
        .revenue_trend(period, config.trend_months)
        .await?;

    println!("Tendência ({} meses)", trend.len());
    for point in &trend {
        println!(
            "  {:<8} {:>14}  {:>3} novas",
            point.label,
            format_money(point.revenue),
            point.new_bookings
        );
    }

    // --- Exportação ---
    let path = app_state.export_service.export_monthly_csv(period, locale).await?;
    println!("CSV: {}", path.display());

    Ok(())
}
