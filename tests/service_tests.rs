mod common;

use std::fs;
use tempfile::TempDir;

use common::{config, date, generated_at, january_ledger, sample_ledger};
use payreport::{Destination, ExportFormat, Ledger, ReportError, ReportService};

#[test]
fn test_period_boundaries() {
    let jan = ReportService::monthly_period(2024, 1).unwrap();
    assert_eq!((jan.start(), jan.end()), (date(2024, 1, 1), date(2024, 1, 31)));

    let q2 = ReportService::quarterly_period(2024, 2).unwrap();
    assert_eq!((q2.start(), q2.end()), (date(2024, 4, 1), date(2024, 6, 30)));

    assert!(matches!(
        ReportService::custom_period(date(2024, 2, 1), date(2024, 1, 1)),
        Err(ReportError::InvalidPeriod { .. })
    ));
}

#[test]
fn test_generate_quarterly_report() {
    let ledger = sample_ledger();
    let config = config();
    let service = ReportService::new(&ledger, &ledger, &config);

    let period = ReportService::quarterly_period(2024, 1).unwrap();
    let report = service.generate_report(&period).unwrap();
    assert_eq!(report.transaction_count, 4);
    assert_eq!(report.period, period);
}

#[test]
fn test_generate_empty_period_fails() {
    let ledger = sample_ledger();
    let config = config();
    let service = ReportService::new(&ledger, &ledger, &config);

    let period = ReportService::monthly_period(2023, 12).unwrap();
    assert!(matches!(
        service.generate_report(&period),
        Err(ReportError::EmptyResult { .. })
    ));
}

#[test]
fn test_export_writes_files() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = january_ledger();
    let config = config();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    for format in [ExportFormat::Console, ExportFormat::Csv, ExportFormat::Html] {
        let path = temp_dir
            .path()
            .join("nested")
            .join(format!("REPORT-2024-01.{}", format.extension()));
        service
            .export_at(&report, format, &Destination::File(path.clone()), generated_at())
            .unwrap();
        assert!(path.exists(), "{} missing", path.display());
    }

    let csv = fs::read_to_string(temp_dir.path().join("nested/REPORT-2024-01.csv")).unwrap();
    assert!(csv.starts_with("Section,Key,Value"));

    let html = fs::read_to_string(temp_dir.path().join("nested/REPORT-2024-01.html")).unwrap();
    assert!(html.contains("<title>Monthly Report for 2024-01</title>"));

    let text = fs::read_to_string(temp_dir.path().join("nested/REPORT-2024-01.txt")).unwrap();
    assert!(text.contains("Acme Payments"));
}

#[test]
fn test_failed_render_leaves_no_file() {
    let temp_dir = TempDir::new().unwrap();
    // Salary for an employee the ledger does not know
    let ledger = Ledger::new(
        Vec::new(),
        common::counterparties(),
        common::january_payments(),
    );
    let config = config();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    for format in [ExportFormat::Console, ExportFormat::Csv, ExportFormat::Html] {
        let path = temp_dir.path().join(format!("out.{}", format.extension()));
        let err = service
            .export(&report, format, &Destination::File(path.clone()))
            .unwrap_err();
        assert!(matches!(err, ReportError::EntityResolution { id: 3, .. }));
        assert!(!path.exists());
    }
}

#[test]
fn test_unwritable_destination_is_export_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let ledger = january_ledger();
    let config = config();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    let path = blocker.join("report.csv");
    let err = service
        .export(&report, ExportFormat::Csv, &Destination::File(path))
        .unwrap_err();
    assert!(matches!(err, ReportError::Export { .. }));
}

#[test]
fn test_pdf_requires_file_destination() {
    let ledger = january_ledger();
    let config = config();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    let err = service
        .export(&report, ExportFormat::Pdf, &Destination::Stdout)
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingDestination(_)));
    assert_eq!(err.to_string(), "PDF export needs an output file path");
}

#[test]
fn test_pdf_missing_converter() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = january_ledger();
    let mut config = config();
    config.pdf.converter = "payreport-no-such-converter".to_string();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    let path = temp_dir.path().join("report.pdf");
    let err = service
        .export(&report, ExportFormat::Pdf, &Destination::File(path.clone()))
        .unwrap_err();
    assert!(matches!(err, ReportError::ConverterNotFound(_)));
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_pdf_converter_failure() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = january_ledger();
    let mut config = config();
    config.pdf.converter = "false".to_string();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    let path = temp_dir.path().join("report.pdf");
    let err = service
        .export(&report, ExportFormat::Pdf, &Destination::File(path.clone()))
        .unwrap_err();
    assert!(matches!(err, ReportError::PdfConversion { .. }));
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_pdf_converter_without_output_replaces_old_file() {
    // `true` exits 0 without writing anything
    let temp_dir = TempDir::new().unwrap();
    let ledger = january_ledger();
    let mut config = config();
    config.pdf.converter = "true".to_string();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    let path = temp_dir.path().join("report.pdf");
    fs::write(&path, "report from last month").unwrap();

    let err = service
        .export(&report, ExportFormat::Pdf, &Destination::File(path.clone()))
        .unwrap_err();
    match err {
        ReportError::PdfConversion { path: failed, reason } => {
            assert_eq!(failed, path);
            assert!(reason.contains("produced no output"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!path.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_pdf_with_copying_converter() {
    // `cp in.html out.pdf` stands in for a real converter
    let temp_dir = TempDir::new().unwrap();
    let ledger = january_ledger();
    let mut config = config();
    config.pdf.converter = "cp".to_string();
    let service = ReportService::new(&ledger, &ledger, &config);
    let report = service
        .generate_report(&ReportService::monthly_period(2024, 1).unwrap())
        .unwrap();

    let path = temp_dir.path().join("pdf").join("report.pdf");
    service
        .export(&report, ExportFormat::Pdf, &Destination::File(path.clone()))
        .unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("Monthly Report for 2024-01"));
}
