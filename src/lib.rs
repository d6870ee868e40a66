// src/lib.rs

// Back-office da agência de viagens: atribuição de receita por mês
// (entrada + parcelas), relatórios, tendência e exportação CSV.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
