use rust_decimal::Decimal;

use crate::error::Result;
use crate::report::ReportResult;

use super::{format_amount, RenderContext};

/// Inline stylesheet kept to CSS 2.1 so HTML-to-PDF converters lay it out
/// the same way browsers do.
const STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;font-size:11px;margin:20px;}\
table{border-collapse:collapse;width:100%;margin-bottom:15px;}\
th,td{border:1px solid #333;padding:4px 6px;text-align:left;}\
th{background:#f6f6f6;}\
td.amount{text-align:right;}\
.org{text-align:center;color:#555;margin:0;}\
.section{margin:18px 0 8px 0;padding:0;font-size:14px;font-weight:bold;border-bottom:1px solid #aaa;}";

/// Escape text for element content and double-quoted attributes
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn amount_cell(ctx: &RenderContext<'_>, value: Decimal) -> String {
    format!(
        "<td class=\"amount\">{}{}</td>",
        escape_html(ctx.currency_symbol),
        format_amount(value)
    )
}

fn text_cell(text: &str) -> String {
    format!("<td>{}</td>", escape_html(text))
}

fn header_row(labels: &[&str]) -> String {
    let cells: String = labels
        .iter()
        .map(|label| format!("<th>{}</th>", escape_html(label)))
        .collect();
    format!("<tr>{cells}</tr>\n")
}

/// Render a self-contained XHTML document for the report.
///
/// This is also the input for PDF export, so the markup stays well-formed:
/// every element is closed, void elements are self-closed and all text is
/// escaped.
pub fn render_html(report: &ReportResult, title: &str, ctx: &RenderContext<'_>) -> Result<String> {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html xmlns=\"http://www.w3.org/1999/xhtml\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\" />\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str(&format!("<style type=\"text/css\">{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n");

    // Heading
    html.push_str(&format!(
        "<h2 style=\"text-align:center;margin-bottom:2px;\">{}</h2>\n",
        escape_html(title)
    ));
    html.push_str(&format!(
        "<h4 style=\"text-align:center;margin-top:2px;\">{}</h4>\n",
        escape_html(&report.period.label())
    ));
    html.push_str(&format!(
        "<p class=\"org\">{}</p>\n<hr />\n",
        escape_html(ctx.organization)
    ));

    // Metadata
    html.push_str("<div>\n");
    html.push_str(&format!(
        "<b>PERIOD:</b> {}<br />\n",
        escape_html(&report.period.range_text())
    ));
    html.push_str(&format!(
        "<b>TRANSACTIONS:</b> {}<br />\n",
        report.transaction_count
    ));
    html.push_str(&format!(
        "<b>REPORT GENERATED:</b> {}<br />\n",
        ctx.generated_text()
    ));
    html.push_str("</div>\n<hr />\n");

    // Aggregate totals: one row, four columns
    html.push_str("<div class=\"section\">AGGREGATE TOTALS</div>\n<table>\n");
    html.push_str(&header_row(&[
        "Total Inflow",
        "Total Outflow",
        "Net Balance",
        "Avg Daily Value",
    ]));
    html.push_str("<tr>");
    for value in [
        report.total_inflow,
        report.total_outflow,
        report.net_balance,
        report.average_daily_value,
    ] {
        html.push_str(&amount_cell(ctx, value));
    }
    html.push_str("</tr>\n</table>\n");

    // Category breakdown: names row, values row
    html.push_str("<div class=\"section\">CATEGORY BREAKDOWN</div>\n<table>\n");
    let categories: Vec<&str> = report.category_totals.keys().map(|c| c.as_str()).collect();
    html.push_str(&header_row(&categories));
    html.push_str("<tr>");
    for amount in report.category_totals.values() {
        html.push_str(&amount_cell(ctx, *amount));
    }
    html.push_str("</tr>\n</table>\n");

    // Entity breakdown
    html.push_str("<div class=\"section\">ENTITY BREAKDOWN</div>\n<table>\n");
    html.push_str(&header_row(&["EMPLOYEES", "AMOUNT"]));
    for (id, amount) in &report.employee_totals {
        let name = ctx.resolver.employee_name(*id)?;
        html.push_str(&format!(
            "<tr>{}{}</tr>\n",
            text_cell(name),
            amount_cell(ctx, *amount)
        ));
    }
    html.push_str("</table>\n<table>\n");
    html.push_str(&header_row(&["COUNTERPARTIES", "TYPE", "AMOUNT"]));
    for (id, amount) in &report.counterparty_totals {
        let (name, party_type) = ctx.resolver.counterparty(*id)?;
        html.push_str(&format!(
            "<tr>{}{}{}</tr>\n",
            text_cell(name),
            text_cell(party_type.as_str()),
            amount_cell(ctx, *amount)
        ));
    }
    html.push_str("</table>\n");

    // Transactions, untruncated
    html.push_str("<div class=\"section\">TRANSACTION DETAILS</div>\n<table>\n");
    html.push_str(&header_row(&[
        "Date",
        "Amount",
        "Direction",
        "Category",
        "Description",
        "Party",
        "Status",
    ]));
    for payment in &report.transactions {
        html.push_str("<tr>");
        html.push_str(&text_cell(&payment.created_on().to_string()));
        html.push_str(&amount_cell(ctx, payment.amount));
        html.push_str(&text_cell(payment.direction.as_str()));
        html.push_str(&text_cell(payment.category.as_str()));
        html.push_str(&text_cell(payment.description.as_deref().unwrap_or("-")));
        html.push_str(&text_cell(ctx.party_name(payment)?));
        html.push_str(&text_cell(payment.status.as_str()));
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n</body>\n</html>\n");

    Ok(html)
}
