//! Orchestration: period boundaries, report generation and export dispatch.

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ReportError, Result};
use crate::pdf::html_to_pdf;
use crate::render::{render_csv, render_html, render_text, RenderContext};
use crate::report::{calculate_report, ReportPeriod, ReportResult};
use crate::source::{EntityResolver, PaymentSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Console,
    Csv,
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Console => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ExportFormat::Console => "Console",
            ExportFormat::Csv => "CSV",
            ExportFormat::Html => "HTML",
            ExportFormat::Pdf => "PDF",
        }
    }
}

/// Where an export goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

pub struct ReportService<'a> {
    source: &'a dyn PaymentSource,
    resolver: &'a dyn EntityResolver,
    config: &'a Config,
}

impl<'a> ReportService<'a> {
    pub fn new(
        source: &'a dyn PaymentSource,
        resolver: &'a dyn EntityResolver,
        config: &'a Config,
    ) -> Self {
        Self {
            source,
            resolver,
            config,
        }
    }

    pub fn monthly_period(year: i32, month: u32) -> Result<ReportPeriod> {
        ReportPeriod::monthly(year, month)
    }

    pub fn quarterly_period(year: i32, quarter: u32) -> Result<ReportPeriod> {
        ReportPeriod::quarterly(year, quarter)
    }

    pub fn custom_period(start: NaiveDate, end: NaiveDate) -> Result<ReportPeriod> {
        ReportPeriod::new(start, end)
    }

    /// Compute the report for `period`; calculator errors pass through unchanged
    pub fn generate_report(&self, period: &ReportPeriod) -> Result<ReportResult> {
        let report = calculate_report(self.source, period.start(), period.end())?;
        log::info!(
            "generated report for {} with {} transactions",
            period.label(),
            report.transaction_count
        );
        Ok(report)
    }

    pub fn render_context(&self, generated_at: NaiveDateTime) -> RenderContext<'_> {
        RenderContext {
            resolver: self.resolver,
            organization: &self.config.organization.name,
            currency_symbol: &self.config.report.currency_symbol,
            description_width: self.config.report.description_width,
            generated_at,
        }
    }

    /// Render `report` in `format` and deliver it, stamped with the current time
    pub fn export(
        &self,
        report: &ReportResult,
        format: ExportFormat,
        destination: &Destination,
    ) -> Result<()> {
        self.export_at(report, format, destination, Local::now().naive_local())
    }

    /// Like [`export`](Self::export) with an explicit generation timestamp
    pub fn export_at(
        &self,
        report: &ReportResult,
        format: ExportFormat,
        destination: &Destination,
        generated_at: NaiveDateTime,
    ) -> Result<()> {
        let ctx = self.render_context(generated_at);

        match format {
            ExportFormat::Console => {
                let text = render_text(report, &ctx)?;
                deliver(text.as_bytes(), destination)?;
            }
            ExportFormat::Csv => {
                let bytes = render_csv(report, &ctx)?;
                deliver(&bytes, destination)?;
            }
            ExportFormat::Html => {
                let html = render_html(report, &report.period.title(), &ctx)?;
                deliver(html.as_bytes(), destination)?;
            }
            ExportFormat::Pdf => {
                let Destination::File(path) = destination else {
                    return Err(ReportError::MissingDestination(format.name()));
                };
                let html = render_html(report, &report.period.title(), &ctx)?;
                create_parent_dir(path)?;
                html_to_pdf(&html, &self.config.pdf, path)?;
            }
        }

        if let Destination::File(path) = destination {
            log::info!("exported {} report to {}", format.name(), path.display());
        }
        Ok(())
    }
}

fn deliver(bytes: &[u8], destination: &Destination) -> Result<()> {
    match destination {
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
        Destination::File(path) => write_file(path, bytes),
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| ReportError::Export {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Write a fully rendered export; a failed write removes the partial file
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    create_parent_dir(path)?;

    let result = File::create(path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });

    result.map_err(|source| {
        if path.exists() {
            let _ = fs::remove_file(path);
        }
        ReportError::Export {
            path: path.to_path_buf(),
            source,
        }
    })
}
