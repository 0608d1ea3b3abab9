use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

use crate::error::{ReportError, Result};
use crate::model::{Direction, PaymentRecord};
use crate::source::PaymentSource;

use super::{ReportPeriod, ReportResult};

/// Fetch every payment created in `[start, end]` and aggregate it.
///
/// The period is validated before the source is queried. A range with no
/// payments is an error rather than an all-zero report.
pub fn calculate_report<S>(source: &S, start: NaiveDate, end: NaiveDate) -> Result<ReportResult>
where
    S: PaymentSource + ?Sized,
{
    let period = ReportPeriod::new(start, end)?;
    let payments = source.fetch_by_date_range(start, end)?;

    if payments.is_empty() {
        return Err(ReportError::EmptyResult { start, end });
    }

    let report = aggregate(period, payments);
    log::debug!(
        "aggregated {} payments for {}: inflow {}, outflow {}",
        report.transaction_count,
        period.range_text(),
        report.total_inflow,
        report.total_outflow
    );
    Ok(report)
}

fn aggregate(period: ReportPeriod, payments: Vec<PaymentRecord>) -> ReportResult {
    let total_inflow = total_for(&payments, Direction::Incoming);
    let total_outflow = total_for(&payments, Direction::Outgoing);

    ReportResult {
        period,
        transaction_count: payments.len(),
        total_inflow,
        total_outflow,
        net_balance: total_inflow - total_outflow,
        average_daily_value: average_daily(&payments, period),
        category_totals: group_totals(&payments, |p| Some(p.category)),
        employee_totals: group_totals(&payments, PaymentRecord::employee_id),
        counterparty_totals: group_totals(&payments, PaymentRecord::counterparty_id),
        transactions: payments,
    }
}

fn total_for(payments: &[PaymentRecord], direction: Direction) -> Decimal {
    payments
        .iter()
        .filter(|p| p.direction == direction)
        .map(|p| p.amount)
        .sum()
}

/// All amounts, inflow and outflow alike, spread over the days in the period
fn average_daily(payments: &[PaymentRecord], period: ReportPeriod) -> Decimal {
    let days = period.days();
    debug_assert!(days > 0, "a validated period spans at least one day");

    let total: Decimal = payments.iter().map(|p| p.amount).sum();
    (total / Decimal::from(days)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum amounts per key; payments mapping to `None` are left out
fn group_totals<K, F>(payments: &[PaymentRecord], key: F) -> BTreeMap<K, Decimal>
where
    K: Ord,
    F: Fn(&PaymentRecord) -> Option<K>,
{
    let mut totals = BTreeMap::new();
    for payment in payments {
        if let Some(k) = key(payment) {
            *totals.entry(k).or_insert(Decimal::ZERO) += payment.amount;
        }
    }
    totals
}
