// src/models/period.rs

use std::fmt;

use chrono::Datelike;
use serde::Serialize;

use crate::common::error::AppError;

// Mês do calendário (ano + mês 1..=12): a unidade de atribuição de receita.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn try_new(year: i32, month: u32) -> Result<Self, AppError> {
        Self::new(year, month).ok_or(AppError::InvalidPeriod { year, month })
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    // Índice contínuo de meses; o ano "vira" no mês 13.
    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn plus_months(&self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }

    pub fn previous(&self) -> Self {
        self.plus_months(-1)
    }

    // Quantos meses `self` está depois de `earlier` (negativo se antes).
    pub fn months_since(&self, earlier: YearMonth) -> i64 {
        (self.year as i64 - earlier.year as i64) * 12 + (self.month as i64 - earlier.month as i64)
    }

    pub fn contains<D: Datelike>(&self, date: &D) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
