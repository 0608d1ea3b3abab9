//! Payment value types shared by the calculator and the renderers.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Incoming => "INCOMING",
            Direction::Outgoing => "OUTGOING",
        }
    }
}

/// Business purpose of a payment. Ordering follows declaration order and
/// drives the order of category breakdowns in every output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Salary,
    VendorPayment,
    ClientInvoice,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Salary => "SALARY",
            Category::VendorPayment => "VENDOR_PAYMENT",
            Category::ClientInvoice => "CLIENT_INVOICE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Processing,
    Completed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Processing => "PROCESSING",
            Status::Completed => "COMPLETED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyType {
    Vendor,
    Client,
}

impl PartyType {
    pub fn as_str(self) -> &'static str {
        match self {
            PartyType::Vendor => "VENDOR",
            PartyType::Client => "CLIENT",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        })*
    };
}

display_as_str!(Direction, Category, Status, PartyType);

/// Which entity table an identifier points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Employee,
    Counterparty,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Employee => write!(f, "Employee"),
            EntityKind::Counterparty => write!(f, "Counterparty"),
        }
    }
}

/// The single entity a payment is associated with. Salaries go to an
/// employee, everything else to a counterparty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Employee(u32),
    Counterparty(u32),
}

/// Immutable snapshot of one recorded payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub id: u32,
    pub amount: Decimal,
    pub direction: Direction,
    pub category: Category,
    pub status: Status,
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub party: Party,
}

impl PaymentRecord {
    pub fn employee_id(&self) -> Option<u32> {
        match self.party {
            Party::Employee(id) => Some(id),
            Party::Counterparty(_) => None,
        }
    }

    pub fn counterparty_id(&self) -> Option<u32> {
        match self.party {
            Party::Counterparty(id) => Some(id),
            Party::Employee(_) => None,
        }
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date()
    }
}
