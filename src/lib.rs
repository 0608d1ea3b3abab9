pub mod config;
pub mod error;
pub mod model;
pub mod pdf;
pub mod render;
pub mod report;
pub mod service;
pub mod source;

pub use config::{Config, Counterparty, Employee};
pub use error::{ReportError, Result};
pub use model::{Category, Direction, EntityKind, Party, PartyType, PaymentRecord, Status};
pub use report::{calculate_report, ReportPeriod, ReportResult};
pub use service::{Destination, ExportFormat, ReportService};
pub use source::{EntityResolver, Ledger, PaymentSource};
