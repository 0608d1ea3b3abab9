#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use payreport::config::{Organization, PdfSettings, ReportSettings};
use payreport::{
    Category, Config, Counterparty, Direction, Employee, Ledger, Party, PartyType, PaymentRecord,
    Status,
};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

pub fn payment(
    id: u32,
    amount: &str,
    direction: Direction,
    category: Category,
    party: Party,
    created_at: NaiveDateTime,
) -> PaymentRecord {
    PaymentRecord {
        id,
        amount: dec(amount),
        direction,
        category,
        status: Status::Completed,
        description: None,
        created_by: "finance".to_string(),
        created_at,
        updated_at: None,
        party,
    }
}

pub fn employees() -> Vec<Employee> {
    vec![Employee {
        id: 3,
        name: "Asha Verma".to_string(),
        department: Some("Finance".to_string()),
    }]
}

pub fn counterparties() -> Vec<Counterparty> {
    vec![
        Counterparty {
            id: 4,
            name: "Paper & Co.".to_string(),
            party_type: PartyType::Vendor,
            mobile: None,
        },
        Counterparty {
            id: 7,
            name: "Northwind Traders".to_string(),
            party_type: PartyType::Client,
            mobile: None,
        },
    ]
}

/// The January 2024 example: one client invoice and one salary
pub fn january_payments() -> Vec<PaymentRecord> {
    let mut invoice = payment(
        1,
        "1000.00",
        Direction::Incoming,
        Category::ClientInvoice,
        Party::Counterparty(7),
        at(2024, 1, 15, 10, 30),
    );
    invoice.description = Some("Website redesign, phase 1".to_string());

    let mut salary = payment(
        2,
        "400.00",
        Direction::Outgoing,
        Category::Salary,
        Party::Employee(3),
        at(2024, 1, 15, 12, 0),
    );
    salary.description = Some("January salary".to_string());

    vec![invoice, salary]
}

pub fn january_ledger() -> Ledger {
    Ledger::new(employees(), counterparties(), january_payments())
}

/// Same data as the `init` templates
pub fn sample_ledger() -> Ledger {
    let mut payments = january_payments();

    let mut paper = payment(
        3,
        "250.50",
        Direction::Outgoing,
        Category::VendorPayment,
        Party::Counterparty(4),
        at(2024, 2, 3, 9, 15),
    );
    paper.status = Status::Pending;
    paper.description = Some("Printer paper and toner cartridges".to_string());
    payments.push(paper);

    let mut march = payment(
        4,
        "1250.00",
        Direction::Incoming,
        Category::ClientInvoice,
        Party::Counterparty(7),
        at(2024, 3, 28, 16, 45),
    );
    march.status = Status::Processing;
    payments.push(march);

    Ledger::new(employees(), counterparties(), payments)
}

pub fn config() -> Config {
    Config {
        organization: Organization {
            name: "Acme Payments".to_string(),
        },
        report: ReportSettings::default(),
        pdf: PdfSettings::default(),
    }
}

pub fn generated_at() -> NaiveDateTime {
    at(2024, 2, 1, 9, 0)
}

/// One payment in February 2024 with a party id in 1..=9
pub fn arb_payment(id: u32) -> impl Strategy<Value = PaymentRecord> {
    (
        1i64..10_000_000,
        any::<bool>(),
        0u8..3,
        1u32..=28,
        1u32..=9,
    )
        .prop_map(move |(cents, incoming, category, day, party_id)| {
            let direction = if incoming {
                Direction::Incoming
            } else {
                Direction::Outgoing
            };
            let (category, party) = match category {
                0 => (Category::Salary, Party::Employee(party_id)),
                1 => (Category::VendorPayment, Party::Counterparty(party_id)),
                _ => (Category::ClientInvoice, Party::Counterparty(party_id)),
            };
            let mut record = payment(id, "1", direction, category, party, at(2024, 2, day, 12, 0));
            record.amount = Decimal::new(cents, 2);
            record
        })
}

pub fn arb_payments() -> impl Strategy<Value = Vec<PaymentRecord>> {
    prop::collection::vec(arb_payment(0), 1..40).prop_map(|mut payments| {
        for (i, p) in payments.iter_mut().enumerate() {
            p.id = i as u32 + 1;
        }
        payments
    })
}

/// Employees and counterparties 1..=9, covering every generated party id
pub fn numbered_ledger(payments: Vec<PaymentRecord>) -> Ledger {
    let employees = (1..=9)
        .map(|id| Employee {
            id,
            name: format!("Employee {id}"),
            department: None,
        })
        .collect();
    let counterparties = (1..=9)
        .map(|id| Counterparty {
            id,
            name: format!("Party {id}"),
            party_type: if id % 2 == 0 {
                PartyType::Client
            } else {
                PartyType::Vendor
            },
            mobile: None,
        })
        .collect();
    Ledger::new(employees, counterparties, payments)
}
