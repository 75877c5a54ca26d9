//! Core business logic for LoanFX.
//!
//! This crate contains pure computation with ZERO web or IO dependencies.
//!
//! # Modules
//!
//! - `amortization` - Installment calculation and amortization schedules
//! - `currency` - Exchange rate tables and currency conversion
//! - `format` - Display formatting for money, percentages and dates

pub mod amortization;
pub mod currency;
pub mod format;
