//! Paginated document export
//!
//! Serializes a report into a plain-text document: centered title block,
//! one emphasized header per section, one line per field, fixed number of
//! lines per page with a page footer. The file is written to a temp path,
//! flushed, then renamed into place so a failed write never leaves a
//! half-written report behind.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::encoding::Symptom;
use super::Report;

const PAGE_WIDTH: usize = 72;
const DEFAULT_LINES_PER_PAGE: usize = 40;

#[derive(Debug)]
pub enum ExportError {
    /// Writing or finalizing the artifact failed. Distinct from formatting:
    /// the caller still has a prediction to show.
    Io(io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "Report export failed: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<io::Error> for ExportError {
    fn from(e: io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// Deterministic artifact name for a report, e.g. `no_malaria_report.txt`.
pub fn report_file_name(report: &Report) -> String {
    let slug: String = report
        .prediction
        .label
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}_report.txt", slug)
}

fn centered(text: &str) -> String {
    if text.len() >= PAGE_WIDTH {
        return text.to_string();
    }
    let pad = (PAGE_WIDTH - text.len()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn section_header(title: &str) -> [String; 2] {
    let upper = title.to_uppercase();
    let rule = "=".repeat(upper.len());
    [upper, rule]
}

/// The document body as ordered lines, before pagination.
fn body_lines(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(centered("Malaria Prediction Report"));
    lines.push(centered(&format!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"))));
    lines.push(String::new());

    let [header, rule] = section_header("Prediction");
    lines.push(header);
    lines.push(rule);
    lines.push(format!("Result: {}", report.prediction.label));
    lines.push(String::new());

    let [header, rule] = section_header("Symptoms");
    lines.push(header);
    lines.push(rule);
    for symptom in Symptom::ALL {
        let answer = if report.symptoms.is_present(symptom) { "Yes" } else { "No" };
        lines.push(format!("{}: {}", symptom.name(), answer));
    }
    lines.push(String::new());

    let [header, rule] = section_header("Additional Information");
    lines.push(header);
    lines.push(rule);
    lines.push(format!("Blood Pressure: {}", report.blood_pressure_text()));
    lines.push(format!("Temperature: {:.1}°C", report.vitals.temperature_c));

    lines
}

/// Write the paginated document to any sink. Split out from the file
/// handling so write failures can be injected in tests.
pub fn write_document(report: &Report, lines_per_page: usize, out: &mut dyn Write) -> io::Result<()> {
    let lines_per_page = lines_per_page.max(1);
    let lines = body_lines(report);
    let pages = lines.chunks(lines_per_page).collect::<Vec<_>>();
    let total = pages.len();

    for (i, page) in pages.iter().enumerate() {
        for line in *page {
            writeln!(out, "{}", line)?;
        }
        // Pad short pages so the footer lands in the same place everywhere
        for _ in page.len()..lines_per_page {
            writeln!(out)?;
        }
        writeln!(out, "{}", centered(&format!("Page {} of {}", i + 1, total)))?;
        if i + 1 < total {
            writeln!(out, "\x0c")?;
        }
    }

    Ok(())
}

/// Export one report to `<output_dir>/<label-slug>_report.txt`.
///
/// Exactly one artifact per invocation. The temp handle is dropped (closed)
/// on every exit path; on failure the temp file is removed and no final
/// artifact appears at the destination.
pub fn export_report(
    report: &Report,
    output_dir: impl AsRef<Path>,
    lines_per_page: Option<usize>,
) -> Result<PathBuf, ExportError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let final_path = output_dir.join(report_file_name(report));
    let temp_path = final_path.with_extension("tmp");
    let lines_per_page = lines_per_page.unwrap_or(DEFAULT_LINES_PER_PAGE);

    let result = (|| -> io::Result<()> {
        let mut file = File::create(&temp_path)?;
        write_document(report, lines_per_page, &mut file)?;
        // Ensure the bytes hit the disk before the rename makes them visible
        file.sync_all()?;
        Ok(())
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(ExportError::Io(e));
    }

    fs::rename(&temp_path, &final_path)?;
    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{BloodPressure, SymptomSet, VitalSigns};
    use crate::model::{LabelMapping, Prediction};
    use pretty_assertions::assert_eq;

    fn sample_report() -> Report {
        let labels = LabelMapping::default();
        Report::new(
            Prediction::new(0, &labels),
            SymptomSet::none(),
            VitalSigns {
                blood_pressure: Some(BloodPressure { systolic: 120, diastolic: 80 }),
                temperature_c: 36.6,
            },
        )
    }

    #[test]
    fn file_name_is_deterministic_slug() {
        assert_eq!(report_file_name(&sample_report()), "no_malaria_report.txt");
    }

    #[test]
    fn export_produces_exactly_one_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_report(&sample_report(), dir.path(), None).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "expected a single artifact, no leftover temp file");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("PREDICTION"));
        assert!(contents.contains("SYMPTOMS"));
        assert!(contents.contains("ADDITIONAL INFORMATION"));
        assert!(contents.contains("Result: No Malaria"));
        assert!(contents.contains("Blood Pressure: 120/80 mmHg"));
        assert!(contents.contains("Temperature: 36.6°C"));
        assert!(contents.contains("Page 1 of 1"));
    }

    #[test]
    fn short_pages_paginate_with_footers() {
        let report = sample_report();
        let mut buffer = Vec::new();
        write_document(&report, 10, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Page 1 of"));
        assert!(text.contains('\x0c'), "pages should be separated by a form feed");
        // Last page footer matches the page count
        let total = text.matches('\x0c').count() + 1;
        assert!(text.contains(&format!("Page {} of {}", total, total)));
    }

    #[test]
    fn write_failure_surfaces_as_export_error_and_leaves_no_artifact() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        // The writer path reports the injected failure
        let err = write_document(&sample_report(), 40, &mut FailingSink).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);

        // The file path refuses an unwritable destination and cleans up
        let dir = tempfile::tempdir().unwrap();
        let blocking_file = dir.path().join("reports");
        fs::write(&blocking_file, b"not a directory").unwrap();

        let result = export_report(&sample_report(), &blocking_file, None);
        assert!(matches!(result, Err(ExportError::Io(_))));
        assert!(!blocking_file.join("no_malaria_report.txt").exists());
    }
}
