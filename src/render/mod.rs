//! Output formats for a computed report. Every renderer reads the same
//! `ReportResult` and resolves entity names through the same resolver, so
//! the figures agree across console, CSV, HTML and PDF.

mod console;
mod csv;
mod html;

pub use self::console::render_text;
pub use self::csv::{render_csv, write_csv};
pub use self::html::render_html;

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::Result;
use crate::model::{Party, PaymentRecord};
use crate::source::EntityResolver;

/// Everything a renderer needs besides the report itself
pub struct RenderContext<'a> {
    pub resolver: &'a dyn EntityResolver,
    pub organization: &'a str,
    pub currency_symbol: &'a str,
    /// Console column width for descriptions and party names
    pub description_width: usize,
    pub generated_at: NaiveDateTime,
}

impl RenderContext<'_> {
    /// Employee name for salaries, counterparty name otherwise
    fn party_name(&self, payment: &PaymentRecord) -> Result<&str> {
        match payment.party {
            Party::Employee(id) => self.resolver.employee_name(id),
            Party::Counterparty(id) => self.resolver.counterparty(id).map(|(name, _)| name),
        }
    }

    fn generated_text(&self) -> String {
        self.generated_at.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Two decimals (half-up) with thousands separators, e.g. `1,234.50`
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);

    let text = rounded.abs().to_string();
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let grouped = group_digits(whole);

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}.{}", grouped, frac)
    } else {
        format!("{}.{}", grouped, frac)
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// Cut `text` to `width` characters, ending in `...` when shortened
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
