use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::model::{Category, PaymentRecord};

use super::ReportPeriod;

/// Aggregated figures for one period, built once by the calculator and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportResult {
    pub period: ReportPeriod,
    pub transaction_count: usize,
    /// Sum of INCOMING amounts
    pub total_inflow: Decimal,
    /// Sum of OUTGOING amounts
    pub total_outflow: Decimal,
    /// `total_inflow - total_outflow`, may be negative
    pub net_balance: Decimal,
    /// Sum of all amounts over the days in the period, 2 decimals, half-up
    pub average_daily_value: Decimal,
    pub category_totals: BTreeMap<Category, Decimal>,
    /// Keyed by employee id
    pub employee_totals: BTreeMap<u32, Decimal>,
    /// Keyed by counterparty id
    pub counterparty_totals: BTreeMap<u32, Decimal>,
    /// Every payment in the period, in source order
    pub transactions: Vec<PaymentRecord>,
}
