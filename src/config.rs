// src/config.rs

use std::{env, path::PathBuf};

use chrono::Utc;

use crate::{
    common::{error::AppError, i18n::Locale},
    db::BookingRepository,
    models::period::YearMonth,
    services::{DashboardService, ExportService, ReportService},
};

pub const DEFAULT_TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bookings_file: PathBuf,
    pub report_period: YearMonth,
    pub locale: Locale,
    pub trend_months: u32,
    pub export_dir: PathBuf,
    pub strict_validation: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let today = Utc::now().date_naive();
        Self::from_lookup(|key| env::var(key).ok(), YearMonth::of(&today))
    }

    // `current` é o mês usado quando REPORT_YEAR/REPORT_MONTH não vierem
    pub fn from_lookup<F>(lookup: F, current: YearMonth) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bookings_file = lookup("BOOKINGS_FILE")
            .map(PathBuf::from)
            .ok_or_else(|| AppError::ConfigError("BOOKINGS_FILE deve ser definida".to_string()))?;

        let year = parse_var(&lookup, "REPORT_YEAR")?.unwrap_or(current.year());
        let month = parse_var(&lookup, "REPORT_MONTH")?.unwrap_or(current.month());
        let report_period = YearMonth::try_new(year, month)?;

        let locale = Locale::from_accept_language(
            lookup("REPORT_LOCALE").as_deref().unwrap_or("pt-BR"),
        );

        let trend_months = parse_var(&lookup, "TREND_MONTHS")?.unwrap_or(DEFAULT_TREND_MONTHS);

        let export_dir = lookup("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./exports"));

        let strict_validation = parse_var(&lookup, "STRICT_VALIDATION")?.unwrap_or(false);

        Ok(Self {
            bookings_file,
            report_period,
            locale,
            trend_months,
            export_dir,
            strict_validation,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::ConfigError(format!("{} inválida: '{}'", key, raw))),
    }
}

// O estado compartilhado: configuração + serviços montados
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = AppConfig::from_env()?;

        // Falha cedo se o snapshot não existir
        tokio::fs::metadata(&config.bookings_file).await.map_err(|e| {
            anyhow::anyhow!(
                "Snapshot de reservas não encontrado em {}: {}",
                config.bookings_file.display(),
                e
            )
        })?;

        tracing::info!(
            "✅ Snapshot de reservas encontrado em {}",
            config.bookings_file.display()
        );

        Ok(Self::with_config(config))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_config(config: AppConfig) -> Self {
        let repo = BookingRepository::new(config.bookings_file.clone(), config.strict_validation);

        Self {
            report_service: ReportService::new(repo.clone(), config.locale),
            dashboard_service: DashboardService::new(repo.clone()),
            export_service: ExportService::new(repo, config.export_dir.clone()),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn current() -> YearMonth {
        YearMonth::new(2025, 7).unwrap()
    }

    #[test]
    fn defaults_apply_when_only_the_file_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("BOOKINGS_FILE", "reservas.json")]), current()).unwrap();

        assert_eq!(config.bookings_file, PathBuf::from("reservas.json"));
        assert_eq!(config.report_period, current());
        assert_eq!(config.locale, Locale::Pt);
        assert_eq!(config.trend_months, DEFAULT_TREND_MONTHS);
        assert_eq!(config.export_dir, PathBuf::from("./exports"));
        assert!(!config.strict_validation);
    }

    #[test]
    fn explicit_values_are_parsed() {
        let config = AppConfig::from_lookup(
            lookup_from(&[
                ("BOOKINGS_FILE", "/dados/reservas.json"),
                ("REPORT_YEAR", "2024"),
                ("REPORT_MONTH", " 12 "),
                ("REPORT_LOCALE", "en-US,en;q=0.9"),
                ("TREND_MONTHS", "12"),
                ("EXPORT_DIR", "/tmp/relatorios"),
                ("STRICT_VALIDATION", "true"),
            ]),
            current(),
        )
        .unwrap();

        assert_eq!(config.report_period, YearMonth::new(2024, 12).unwrap());
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.trend_months, 12);
        assert!(config.strict_validation);
    }

    #[test]
    fn missing_file_and_bad_values_are_config_errors() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[]), current()),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(
                lookup_from(&[("BOOKINGS_FILE", "r.json"), ("REPORT_MONTH", "março")]),
                current()
            ),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(
                lookup_from(&[("BOOKINGS_FILE", "r.json"), ("REPORT_MONTH", "13")]),
                current()
            ),
            Err(AppError::InvalidPeriod { month: 13, .. })
        ));
    }
}
