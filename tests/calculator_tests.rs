mod common;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::cell::Cell;

use common::{arb_payments, at, date, dec, january_ledger, payment, sample_ledger};
use payreport::{
    calculate_report, Category, Direction, Ledger, Party, PaymentRecord, PaymentSource,
    ReportError, Result,
};

/// Source that records how often it was queried
struct CountingSource {
    calls: Cell<usize>,
    payments: Vec<PaymentRecord>,
}

impl PaymentSource for CountingSource {
    fn fetch_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PaymentRecord>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self
            .payments
            .iter()
            .filter(|p| (start..=end).contains(&p.created_on()))
            .cloned()
            .collect())
    }
}

#[test]
fn test_january_totals() {
    let ledger = january_ledger();
    let report = calculate_report(&ledger, date(2024, 1, 1), date(2024, 1, 31)).unwrap();

    assert_eq!(report.transaction_count, 2);
    assert_eq!(report.total_inflow, dec("1000.00"));
    assert_eq!(report.total_outflow, dec("400.00"));
    assert_eq!(report.net_balance, dec("600.00"));
    // 1400 / 31 = 45.161...
    assert_eq!(report.average_daily_value, dec("45.16"));

    assert_eq!(report.category_totals.len(), 2);
    assert_eq!(report.category_totals[&Category::ClientInvoice], dec("1000.00"));
    assert_eq!(report.category_totals[&Category::Salary], dec("400.00"));
    assert_eq!(report.employee_totals[&3], dec("400.00"));
    assert_eq!(report.counterparty_totals[&7], dec("1000.00"));
    assert_eq!(report.transactions.len(), 2);
}

#[test]
fn test_quarter_totals() {
    let ledger = sample_ledger();
    let report = calculate_report(&ledger, date(2024, 1, 1), date(2024, 3, 31)).unwrap();

    assert_eq!(report.transaction_count, 4);
    assert_eq!(report.total_inflow, dec("2250.00"));
    assert_eq!(report.total_outflow, dec("650.50"));
    assert_eq!(report.net_balance, dec("1599.50"));
    // 2900.50 / 91 = 31.873...
    assert_eq!(report.average_daily_value, dec("31.87"));
    let gross: Decimal = report.transactions.iter().map(|p| p.amount).sum();
    assert_eq!(gross, dec("2900.50"));
    assert_eq!(report.counterparty_totals[&7], dec("2250.00"));
    assert_eq!(report.counterparty_totals[&4], dec("250.50"));

    let categories: Vec<Category> = report.category_totals.keys().copied().collect();
    assert_eq!(
        categories,
        vec![Category::Salary, Category::VendorPayment, Category::ClientInvoice]
    );
}

#[test]
fn test_negative_net_balance() {
    let ledger = Ledger::new(
        common::employees(),
        common::counterparties(),
        vec![payment(
            1,
            "75.25",
            Direction::Outgoing,
            Category::VendorPayment,
            Party::Counterparty(4),
            at(2024, 5, 2, 8, 0),
        )],
    );
    let report = calculate_report(&ledger, date(2024, 5, 1), date(2024, 5, 31)).unwrap();

    assert_eq!(report.total_inflow, Decimal::ZERO);
    assert_eq!(report.net_balance, dec("-75.25"));
    assert!(report.employee_totals.is_empty());
}

#[test]
fn test_range_bounds_are_inclusive() {
    let ledger = Ledger::new(
        common::employees(),
        common::counterparties(),
        vec![
            payment(
                1,
                "10",
                Direction::Incoming,
                Category::ClientInvoice,
                Party::Counterparty(7),
                at(2024, 1, 1, 0, 0),
            ),
            payment(
                2,
                "20",
                Direction::Incoming,
                Category::ClientInvoice,
                Party::Counterparty(7),
                date(2024, 1, 31).and_hms_opt(23, 59, 59).unwrap(),
            ),
            payment(
                3,
                "40",
                Direction::Incoming,
                Category::ClientInvoice,
                Party::Counterparty(7),
                at(2024, 2, 1, 0, 0),
            ),
        ],
    );
    let report = calculate_report(&ledger, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    assert_eq!(report.transaction_count, 2);
    assert_eq!(report.total_inflow, dec("30"));
}

#[test]
fn test_single_day_period() {
    let ledger = january_ledger();
    let report = calculate_report(&ledger, date(2024, 1, 15), date(2024, 1, 15)).unwrap();
    assert_eq!(report.period.days(), 1);
    assert_eq!(report.average_daily_value, dec("1400.00"));
}

#[test]
fn test_empty_range_is_an_error() {
    let ledger = january_ledger();
    let err = calculate_report(&ledger, date(2024, 6, 1), date(2024, 6, 30)).unwrap_err();
    assert!(matches!(err, ReportError::EmptyResult { .. }));
    assert_eq!(
        err.to_string(),
        "No payments found between 2024-06-01 and 2024-06-30"
    );
}

#[test]
fn test_invalid_period_skips_source() {
    let source = CountingSource {
        calls: Cell::new(0),
        payments: common::january_payments(),
    };
    let err = calculate_report(&source, date(2024, 1, 31), date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, ReportError::InvalidPeriod { .. }));
    assert_eq!(source.calls.get(), 0);

    calculate_report(&source, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
    assert_eq!(source.calls.get(), 1);
}

#[test]
fn test_repeat_runs_are_identical() {
    let ledger = sample_ledger();
    let first = calculate_report(&ledger, date(2024, 1, 1), date(2024, 3, 31)).unwrap();
    let second = calculate_report(&ledger, date(2024, 1, 1), date(2024, 3, 31)).unwrap();
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn totals_are_consistent(payments in arb_payments()) {
        let ledger = Ledger::new(Vec::new(), Vec::new(), payments.clone());
        let report = calculate_report(&ledger, date(2024, 2, 1), date(2024, 2, 29)).unwrap();
        let gross: Decimal = payments.iter().map(|p| p.amount).sum();

        prop_assert_eq!(report.transaction_count, payments.len());
        prop_assert_eq!(report.net_balance, report.total_inflow - report.total_outflow);
        prop_assert_eq!(report.total_inflow + report.total_outflow, gross);
        prop_assert_eq!(report.category_totals.values().copied().sum::<Decimal>(), gross);

        let by_entity: Decimal = report.employee_totals.values().copied().sum::<Decimal>()
            + report.counterparty_totals.values().copied().sum::<Decimal>();
        prop_assert_eq!(by_entity, gross);

        // Rounded to cents, so within half a cent per day of the exact total
        let days = Decimal::from(report.period.days());
        let drift = (report.average_daily_value * days - gross).abs();
        prop_assert!(drift <= dec("0.005") * days);
        prop_assert!(report.average_daily_value.scale() <= 2);
    }
}
