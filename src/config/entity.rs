use serde::Deserialize;

use crate::model::PartyType;

#[derive(Debug, Deserialize, Clone)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Counterparty {
    pub id: u32,
    pub name: String,
    pub party_type: PartyType,
    #[serde(default)]
    pub mobile: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct EmployeesFile {
    #[serde(default)]
    pub employees: Vec<Employee>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct CounterpartiesFile {
    #[serde(default)]
    pub counterparties: Vec<Counterparty>,
}
