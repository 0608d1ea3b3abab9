mod calculator;
mod period;
mod result;

pub use calculator::calculate_report;
pub use period::ReportPeriod;
pub use result::ReportResult;
