use csv::{Writer, WriterBuilder};
use std::io::Write;

use crate::error::Result;
use crate::report::ReportResult;

use super::RenderContext;

/// Literal header of the trailing transaction table
const TRANSACTION_HEADER: [&str; 7] = [
    "Date",
    "Amount",
    "Direction",
    "Category",
    "Description",
    "Party",
    "Status",
];

const SECTION_HEADER: [&str; 3] = ["Section", "Key", "Value"];

fn section_writer<W: Write>(writer: W) -> Writer<W> {
    WriterBuilder::new().flexible(true).from_writer(writer)
}

/// Flush one section and separate it from the next with a blank line
fn end_section<W: Write>(mut wtr: Writer<&mut W>) -> Result<()> {
    wtr.flush()?;
    let writer = wtr.into_inner().map_err(|e| e.into_error())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write the sectioned CSV layout to `writer`.
///
/// Amounts are plain decimal strings so the file re-parses to the exact
/// totals. Entity names are resolved as rows are written, so prefer
/// [`render_csv`] when a failure must not leave partial output behind.
pub fn write_csv<W: Write>(
    report: &ReportResult,
    ctx: &RenderContext<'_>,
    mut writer: W,
) -> Result<()> {
    let mut wtr = section_writer(&mut writer);
    wtr.write_record(SECTION_HEADER)?;
    wtr.write_record(["REPORT", "Period", report.period.range_text().as_str()])?;
    wtr.write_record([
        "REPORT",
        "Transactions",
        report.transaction_count.to_string().as_str(),
    ])?;
    wtr.write_record(["REPORT", "Report Generated", ctx.generated_text().as_str()])?;
    end_section(wtr)?;

    let mut wtr = section_writer(&mut writer);
    wtr.write_record(SECTION_HEADER)?;
    for (key, value) in [
        ("Total Inflow", report.total_inflow),
        ("Total Outflow", report.total_outflow),
        ("Net Balance", report.net_balance),
        ("Avg Daily Value", report.average_daily_value),
    ] {
        wtr.write_record(["AGGREGATE", key, value.to_string().as_str()])?;
    }
    end_section(wtr)?;

    let mut wtr = section_writer(&mut writer);
    wtr.write_record(SECTION_HEADER)?;
    for (category, amount) in &report.category_totals {
        wtr.write_record(["CATEGORY", category.as_str(), amount.to_string().as_str()])?;
    }
    end_section(wtr)?;

    let mut wtr = section_writer(&mut writer);
    wtr.write_record(SECTION_HEADER)?;
    for (id, amount) in &report.employee_totals {
        let name = ctx.resolver.employee_name(*id)?;
        wtr.write_record(["EMPLOYEE", name, amount.to_string().as_str()])?;
    }
    end_section(wtr)?;

    let mut wtr = section_writer(&mut writer);
    wtr.write_record(SECTION_HEADER)?;
    for (id, amount) in &report.counterparty_totals {
        let (name, _) = ctx.resolver.counterparty(*id)?;
        wtr.write_record(["COUNTERPARTY", name, amount.to_string().as_str()])?;
    }
    end_section(wtr)?;

    let mut wtr = section_writer(&mut writer);
    wtr.write_record(TRANSACTION_HEADER)?;
    for payment in &report.transactions {
        wtr.write_record([
            payment.created_on().to_string().as_str(),
            payment.amount.to_string().as_str(),
            payment.direction.as_str(),
            payment.category.as_str(),
            payment.description.as_deref().unwrap_or(""),
            ctx.party_name(payment)?,
            payment.status.as_str(),
        ])?;
    }
    wtr.flush()?;

    Ok(())
}

/// Render the full CSV document in memory
pub fn render_csv(report: &ReportResult, ctx: &RenderContext<'_>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(report, ctx, &mut buf)?;
    Ok(buf)
}
