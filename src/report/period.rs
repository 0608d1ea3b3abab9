use chrono::{Datelike, Month, NaiveDate};

use crate::error::{ReportError, Result};

/// Inclusive calendar date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

/// What a period looks like on the calendar, used for titles and file names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Custom,
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

impl ReportPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ReportError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// First through last calendar day of `month`
    pub fn monthly(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidDate(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        let invalid =
            || ReportError::InvalidDate(format!("{year}-{month:02} is not a valid month"));
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let end = last_day_of_month(year, month).ok_or_else(invalid)?;
        Self::new(start, end)
    }

    /// Three calendar months starting at month `(quarter - 1) * 3 + 1`
    pub fn quarterly(year: i32, quarter: u32) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(ReportError::InvalidDate(format!(
                "quarter must be between 1 and 4, got {quarter}"
            )));
        }
        let first_month = (quarter - 1) * 3 + 1;
        let invalid =
            || ReportError::InvalidDate(format!("Q{quarter} {year} is not a valid quarter"));
        let start = NaiveDate::from_ymd_opt(year, first_month, 1).ok_or_else(invalid)?;
        let end = last_day_of_month(year, first_month + 2).ok_or_else(invalid)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    fn shape(&self) -> Shape {
        let (year, month) = (self.start.year(), self.start.month());
        if self.start.day() != 1 {
            return Shape::Custom;
        }
        if Some(self.end) == last_day_of_month(year, month) {
            return Shape::Month { year, month };
        }
        if month % 3 == 1 && Some(self.end) == last_day_of_month(year, month + 2) {
            return Shape::Quarter {
                year,
                quarter: month / 3 + 1,
            };
        }
        Shape::Custom
    }

    /// Short label such as `JANUARY 2024`, `Q1 2024` or `2024-01-05 to 2024-02-10`
    pub fn label(&self) -> String {
        match self.shape() {
            Shape::Month { year, month } => {
                let name = Month::try_from(month as u8)
                    .map(|m| m.name().to_uppercase())
                    .unwrap_or_else(|_| format!("{month:02}"));
                format!("{name} {year}")
            }
            Shape::Quarter { year, quarter } => format!("Q{quarter} {year}"),
            Shape::Custom => self.range_text(),
        }
    }

    /// Document title used by the HTML and PDF exports
    pub fn title(&self) -> String {
        match self.shape() {
            Shape::Month { year, month } => format!("Monthly Report for {year}-{month:02}"),
            Shape::Quarter { year, quarter } => format!("Quarterly Report for Q{quarter} {year}"),
            Shape::Custom => format!("Report for {}", self.range_text()),
        }
    }

    /// Banner line for the console title block
    pub fn headline(&self) -> &'static str {
        match self.shape() {
            Shape::Month { .. } => "MONTHLY FINANCIAL REPORT",
            Shape::Quarter { .. } => "QUARTERLY FINANCIAL REPORT",
            Shape::Custom => "FINANCIAL REPORT",
        }
    }

    /// Stem for default export file names
    pub fn file_stem(&self) -> String {
        match self.shape() {
            Shape::Month { year, month } => format!("REPORT-{year}-{month:02}"),
            Shape::Quarter { year, quarter } => format!("REPORT-{year}-Q{quarter}"),
            Shape::Custom => format!("REPORT-{}_{}", self.start, self.end),
        }
    }

    /// `2024-01-01 to 2024-01-31`
    pub fn range_text(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}
