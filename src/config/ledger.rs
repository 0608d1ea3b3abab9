use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ReportError, Result};
use crate::model::{Category, Direction, Party, PaymentRecord, Status};

/// One `[[payments]]` table as written in payments.toml
#[derive(Debug, Deserialize, Clone)]
pub struct PaymentEntry {
    pub id: u32,
    pub amount: Decimal,
    pub direction: Direction,
    pub category: Category,
    pub status: Status,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub employee: Option<u32>,
    #[serde(default)]
    pub counterparty: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct PaymentsFile {
    #[serde(default)]
    pub payments: Vec<PaymentEntry>,
}

impl PaymentEntry {
    /// Validate the raw entry and turn it into an immutable record
    pub fn into_record(self) -> Result<PaymentRecord> {
        let id = self.id;
        let invalid = |reason: &str| ReportError::InvalidRecord {
            id,
            reason: reason.to_string(),
        };

        if self.amount <= Decimal::ZERO {
            return Err(invalid("amount must be greater than zero"));
        }

        let party = match (self.employee, self.counterparty) {
            (Some(_), Some(_)) => {
                return Err(invalid("has both an employee and a counterparty"));
            }
            (None, None) => return Err(invalid("has neither an employee nor a counterparty")),
            (Some(employee), None) => Party::Employee(employee),
            (None, Some(counterparty)) => Party::Counterparty(counterparty),
        };

        match (self.category, party) {
            (Category::Salary, Party::Counterparty(_)) => {
                return Err(invalid("SALARY payments must reference an employee"));
            }
            (Category::VendorPayment | Category::ClientInvoice, Party::Employee(_)) => {
                return Err(invalid(&format!(
                    "{} payments must reference a counterparty",
                    self.category
                )));
            }
            _ => {}
        }

        Ok(PaymentRecord {
            id,
            amount: self.amount,
            direction: self.direction,
            category: self.category,
            status: self.status,
            description: self.description.filter(|d| !d.trim().is_empty()),
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
            party,
        })
    }
}
