mod entity;
mod ledger;
mod settings;

pub use entity::{Counterparty, Employee};
pub use ledger::PaymentEntry;
pub use settings::{Config, Organization, PdfSettings, ReportSettings};

use crate::error::{ReportError, Result};
use crate::model::PaymentRecord;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use entity::{CounterpartiesFile, EmployeesFile};
use ledger::PaymentsFile;

/// Get the config directory path (XDG config dir, or ~/.payreport/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "payreport") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".payreport"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output directory; relative paths hang off the config dir
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

fn read_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ReportError::ConfigParse { path, source: e })
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    read_toml(path)
}

/// Load employees.toml
pub fn load_employees(config_dir: &Path) -> Result<Vec<Employee>> {
    let path = config_dir.join("employees.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let file: EmployeesFile = read_toml(path)?;
    Ok(file.employees)
}

/// Load counterparties.toml
pub fn load_counterparties(config_dir: &Path) -> Result<Vec<Counterparty>> {
    let path = config_dir.join("counterparties.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let file: CounterpartiesFile = read_toml(path)?;
    Ok(file.counterparties)
}

/// Load and validate payments.toml (an absent ledger is empty)
pub fn load_payments(config_dir: &Path) -> Result<Vec<PaymentRecord>> {
    let path = config_dir.join("payments.toml");
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file: PaymentsFile = read_toml(path)?;
    file.payments
        .into_iter()
        .map(PaymentEntry::into_record)
        .collect()
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[organization]
name = "Your Organization"

[report]
currency_symbol = "₹"
description_width = 18     # console column width for descriptions and parties
output_dir = "output"      # relative to this directory, or absolute / ~/...

[pdf]
converter = "wkhtmltopdf"  # any HTML-to-PDF tool taking <input.html> <output.pdf>
args = ["--quiet", "--encoding", "utf-8"]
"#;

/// Template content for employees.toml
pub const EMPLOYEES_TEMPLATE: &str = r#"# Employees referenced by SALARY payments.

[[employees]]
id = 3
name = "Asha Verma"
department = "Finance"

[[employees]]
id = 5
name = "Rahul Nair"
department = "Engineering"
"#;

/// Template content for counterparties.toml
pub const COUNTERPARTIES_TEMPLATE: &str = r#"# Vendors and clients referenced by VENDOR_PAYMENT and CLIENT_INVOICE payments.
# party_type is VENDOR or CLIENT.

[[counterparties]]
id = 4
name = "Paper & Co."
party_type = "VENDOR"
mobile = "+91-98450-00000"

[[counterparties]]
id = 7
name = "Northwind Traders"
party_type = "CLIENT"
"#;

/// Template content for payments.toml
pub const PAYMENTS_TEMPLATE: &str = r#"# Payment ledger. Amounts are decimal strings; timestamps are local
# ISO datetimes. Each payment names exactly one of `employee` (SALARY)
# or `counterparty` (VENDOR_PAYMENT, CLIENT_INVOICE).

[[payments]]
id = 1
amount = "1000.00"
direction = "INCOMING"
category = "CLIENT_INVOICE"
status = "COMPLETED"
description = "Website redesign, phase 1"
created_by = "finance"
created_at = "2024-01-15T10:30:00"
counterparty = 7

[[payments]]
id = 2
amount = "400.00"
direction = "OUTGOING"
category = "SALARY"
status = "COMPLETED"
description = "January salary"
created_by = "finance"
created_at = "2024-01-15T12:00:00"
employee = 3

[[payments]]
id = 3
amount = "250.50"
direction = "OUTGOING"
category = "VENDOR_PAYMENT"
status = "PENDING"
description = "Printer paper and toner cartridges"
created_by = "finance"
created_at = "2024-02-03T09:15:00"
counterparty = 4

[[payments]]
id = 4
amount = "1250.00"
direction = "INCOMING"
category = "CLIENT_INVOICE"
status = "PROCESSING"
created_by = "finance"
created_at = "2024-03-28T16:45:00"
updated_at = "2024-03-29T09:00:00"
counterparty = 7
"#;
