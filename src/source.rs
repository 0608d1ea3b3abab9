//! Seams to the record store: where payments come from and how entity
//! identifiers turn into display names.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

use crate::config::{load_counterparties, load_employees, load_payments, Counterparty, Employee};
use crate::error::{ReportError, Result};
use crate::model::{EntityKind, PartyType, PaymentRecord};

pub trait PaymentSource {
    /// Payments created on any day in `[start, end]`, in a stable order.
    fn fetch_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PaymentRecord>>;
}

pub trait EntityResolver {
    fn employee_name(&self, id: u32) -> Result<&str>;

    fn counterparty(&self, id: u32) -> Result<(&str, PartyType)>;
}

/// File-backed store of employees, counterparties and payments.
#[derive(Debug, Default)]
pub struct Ledger {
    employees: HashMap<u32, Employee>,
    counterparties: HashMap<u32, Counterparty>,
    payments: Vec<PaymentRecord>,
}

impl Ledger {
    pub fn new(
        employees: Vec<Employee>,
        counterparties: Vec<Counterparty>,
        payments: Vec<PaymentRecord>,
    ) -> Self {
        Self {
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
            counterparties: counterparties.into_iter().map(|c| (c.id, c)).collect(),
            payments,
        }
    }

    /// Load employees.toml, counterparties.toml and payments.toml
    pub fn load(config_dir: &Path) -> Result<Self> {
        let ledger = Self::new(
            load_employees(config_dir)?,
            load_counterparties(config_dir)?,
            load_payments(config_dir)?,
        );
        log::debug!(
            "loaded ledger from {}: {} employees, {} counterparties, {} payments",
            config_dir.display(),
            ledger.employees.len(),
            ledger.counterparties.len(),
            ledger.payments.len()
        );
        Ok(ledger)
    }

    /// Employees sorted by id
    pub fn employees(&self) -> Vec<&Employee> {
        let mut sorted: Vec<_> = self.employees.values().collect();
        sorted.sort_by_key(|e| e.id);
        sorted
    }

    /// Counterparties sorted by id
    pub fn counterparties(&self) -> Vec<&Counterparty> {
        let mut sorted: Vec<_> = self.counterparties.values().collect();
        sorted.sort_by_key(|c| c.id);
        sorted
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    /// First and last creation date across the ledger
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.payments.iter().map(|p| p.created_on()).min()?;
        let last = self.payments.iter().map(|p| p.created_on()).max()?;
        Some((first, last))
    }
}

impl PaymentSource for Ledger {
    fn fetch_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<PaymentRecord>> {
        let matching: Vec<PaymentRecord> = self
            .payments
            .iter()
            .filter(|p| (start..=end).contains(&p.created_on()))
            .cloned()
            .collect();
        log::debug!(
            "{} of {} payments fall between {} and {}",
            matching.len(),
            self.payments.len(),
            start,
            end
        );
        Ok(matching)
    }
}

impl EntityResolver for Ledger {
    fn employee_name(&self, id: u32) -> Result<&str> {
        self.employees
            .get(&id)
            .map(|e| e.name.as_str())
            .ok_or(ReportError::EntityResolution {
                kind: EntityKind::Employee,
                id,
            })
    }

    fn counterparty(&self, id: u32) -> Result<(&str, PartyType)> {
        self.counterparties
            .get(&id)
            .map(|c| (c.name.as_str(), c.party_type))
            .ok_or(ReportError::EntityResolution {
                kind: EntityKind::Counterparty,
                id,
            })
    }
}
