use std::fs;
use std::path::Path;
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::PdfSettings;
use crate::error::{ReportError, Result};

static CONVERSIONS: AtomicUsize = AtomicUsize::new(0);

/// Convert an HTML document to PDF with the configured external converter.
///
/// The HTML goes to a per-call temp file that is removed on every exit
/// path. Any file already at `output_path` is removed first, so only the
/// converter's own output can satisfy the check that a document was
/// written. A non-zero exit status, or a converter that leaves no output
/// behind, is reported as a conversion failure.
pub fn html_to_pdf(html: &str, settings: &PdfSettings, output_path: &Path) -> Result<()> {
    // Check if the converter is available
    let probe = Command::new(&settings.converter).arg("--version").output();
    if probe.is_err() {
        return Err(ReportError::ConverterNotFound(settings.converter.clone()));
    }

    let conversion_error = |stage: &str, e: std::io::Error| ReportError::PdfConversion {
        path: output_path.to_path_buf(),
        reason: format!("{stage}: {e}"),
    };

    let temp_dir = std::env::temp_dir().join("payreport");
    fs::create_dir_all(&temp_dir)
        .map_err(|e| conversion_error("could not create temp directory", e))?;
    let html_path = temp_dir.join(format!(
        "report-{}-{}.html",
        std::process::id(),
        CONVERSIONS.fetch_add(1, Ordering::Relaxed)
    ));

    let outcome = fs::write(&html_path, html)
        .map_err(|e| conversion_error("could not write HTML input", e))
        .and_then(|()| remove_stale_output(output_path))
        .and_then(|()| run_converter(settings, &html_path, output_path));

    if html_path.exists() {
        if let Err(e) = fs::remove_file(&html_path) {
            log::warn!("could not remove {}: {}", html_path.display(), e);
        }
    }

    if outcome.is_err() && output_path.exists() {
        let _ = fs::remove_file(output_path);
    }
    outcome
}

fn remove_stale_output(output_path: &Path) -> Result<()> {
    match fs::remove_file(output_path) {
        Ok(()) => {
            log::debug!("removed previous {}", output_path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ReportError::Export {
            path: output_path.to_path_buf(),
            source,
        }),
    }
}

fn run_converter(settings: &PdfSettings, html_path: &Path, output_path: &Path) -> Result<()> {
    let conversion_error = |reason: String| ReportError::PdfConversion {
        path: output_path.to_path_buf(),
        reason,
    };

    log::debug!(
        "running {} {:?} {} {}",
        settings.converter,
        settings.args,
        html_path.display(),
        output_path.display()
    );
    let output = Command::new(&settings.converter)
        .args(&settings.args)
        .arg(html_path)
        .arg(output_path)
        .output()
        .map_err(|e| conversion_error(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(conversion_error(format!(
            "{} exited with {}: {}",
            settings.converter,
            output.status,
            stderr.trim()
        )));
    }

    let written = fs::metadata(output_path).map(|m| m.len()).unwrap_or(0);
    if written == 0 {
        return Err(conversion_error(format!(
            "{} produced no output",
            settings.converter
        )));
    }

    Ok(())
}
