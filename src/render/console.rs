use chrono::NaiveDate;
use rust_decimal::Decimal;
use tabled::settings::{object::Columns, Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::error::Result;
use crate::report::ReportResult;

use super::{format_amount, truncate, RenderContext};

const WIDTH: usize = 80;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "DIRECTION")]
    direction: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "PARTY")]
    party: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d-%b-%y").to_string()
}

fn center(text: &str) -> String {
    let width = (WIDTH + text.chars().count()) / 2;
    format!("{:>width$}", text, width = width)
}

fn money(ctx: &RenderContext<'_>, value: Decimal) -> String {
    format!("{}{:>12}", ctx.currency_symbol, format_amount(value))
}

/// Render the report as console text.
///
/// Fails if a payment references an employee or counterparty the resolver
/// does not know; nothing is returned in that case.
pub fn render_text(report: &ReportResult, ctx: &RenderContext<'_>) -> Result<String> {
    let border = "=".repeat(WIDTH);
    let section = "-".repeat(WIDTH);
    let mut out = String::new();

    // Title block
    out.push_str(&format!("{border}\n"));
    out.push_str(&format!("{}\n", center(ctx.organization)));
    out.push_str(&format!("{}\n", center(report.period.headline())));
    out.push_str(&format!("{}\n", center(&report.period.label())));
    out.push_str(&format!("{border}\n"));

    // Summary
    out.push_str(&format!("\n{section}\n"));
    out.push_str(&format!(
        "📅 PERIOD: {} to {}\n",
        format_date(report.period.start()),
        format_date(report.period.end())
    ));
    out.push_str(&format!("📝 TRANSACTIONS: {}\n", report.transaction_count));
    out.push_str(&format!("🕒 REPORT GENERATED: {}\n", ctx.generated_text()));
    out.push_str(&format!("{section}\n"));

    out.push_str(&format!("\n💰 AGGREGATE TOTALS\n{section}\n"));
    for (label, value) in [
        ("Total Inflow:", report.total_inflow),
        ("Total Outflow:", report.total_outflow),
        ("Net Balance:", report.net_balance),
        ("Avg Daily Value:", report.average_daily_value),
    ] {
        out.push_str(&format!("{:<20} {}\n", label, money(ctx, value)));
    }
    out.push_str(&format!("{section}\n"));

    out.push_str(&format!("\n📊 CATEGORY BREAKDOWN\n{section}\n"));
    for (category, amount) in &report.category_totals {
        let label = format!("{category}:");
        out.push_str(&format!("{:<20} {}\n", label, money(ctx, *amount)));
    }
    out.push_str(&format!("{section}\n"));

    out.push_str(&format!("\n👥 ENTITY BREAKDOWN\n{section}\n"));
    out.push_str("EMPLOYEES:\n");
    for (id, amount) in &report.employee_totals {
        let label = format!("{}:", ctx.resolver.employee_name(*id)?);
        out.push_str(&format!("- {:<20} {}\n", label, money(ctx, *amount)));
    }
    out.push_str("\nCOUNTERPARTIES:\n");
    for (id, amount) in &report.counterparty_totals {
        let (name, party_type) = ctx.resolver.counterparty(*id)?;
        out.push_str(&format!(
            "- {:<20} ({}) {}\n",
            name,
            party_type,
            money(ctx, *amount)
        ));
    }
    out.push_str(&format!("{section}\n"));

    // Transaction details
    let mut rows = Vec::with_capacity(report.transactions.len());
    for payment in &report.transactions {
        rows.push(TransactionRow {
            date: format_date(payment.created_on()),
            amount: format!("{}{}", ctx.currency_symbol, format_amount(payment.amount)),
            direction: payment.direction.to_string(),
            category: payment.category.to_string(),
            description: payment
                .description
                .as_deref()
                .map(|d| truncate(d, ctx.description_width))
                .unwrap_or_else(|| "-".to_string()),
            party: truncate(ctx.party_name(payment)?, ctx.description_width),
            status: payment.status.to_string(),
        });
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()))
        .to_string();

    out.push_str(&format!("\n📜 TRANSACTION DETAILS\n{section}\n"));
    out.push_str(&table);
    out.push_str(&format!("\n{section}\n"));

    Ok(out)
}
