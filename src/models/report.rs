// src/models/report.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{booking::Booking, period::YearMonth};

// 1. Relatório Mensal (tabela + card de receita)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub period: YearMonth,
    pub filtered_bookings: Vec<Booking>, // Reservas CADASTRADAS no mês
    pub total_revenue_for_month: Decimal, // Receita atribuída ao mês (inclui parcelas de reservas antigas)
}

impl MonthlyReport {
    pub fn new_bookings(&self) -> usize {
        self.filtered_bookings.len()
    }
}

// 2. Gráfico de Tendência (um ponto por mês)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: YearMonth,
    pub label: String, // Ex: "jan/25"
    pub revenue: Decimal,
    pub new_bookings: usize,
}

// 3. Resumo do Dashboard (os cards do topo)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub reference: YearMonth,
    pub revenue_this_month: Decimal,
    pub revenue_previous_month: Decimal,
    pub revenue_growth_percent: Option<Decimal>, // None quando o mês anterior foi zero
    pub new_bookings_this_month: usize,
    pub open_installment_bookings: usize, // Planos com parcela a vencer a partir do mês de referência
}
