// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::dataset::{AffectedArea, Dataset};
use crate::QuakeError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const JSON_FILE_NAME: &str = "kamchatka_earthquake_data.json";
pub const CSV_FILE_NAME: &str = "kamchatka_earthquake_damage.csv";
pub const CSV_HEADER: &str =
    "Location,Latitude,Longitude,Population,Damage Level,Buildings Damaged,Injured";
pub const PDF_UNAVAILABLE: &str = "PDF report generation would be implemented with a PDF library in a real application.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Pdf];

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Csv => "CSV",
            ExportFormat::Pdf => "PDF",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ready-to-save payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn extension(&self) -> &str {
        Path::new(self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
    }

    pub fn write_to(&self, path: &Path) -> Result<(), QuakeError> {
        fs::write(path, &self.bytes)?;
        log::info!("[Export] Wrote {} bytes to {:?}", self.bytes.len(), path);
        Ok(())
    }

    /// Writes the payload under its default file name inside `dir`.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf, QuakeError> {
        let path = dir.join(self.file_name);
        self.write_to(&path)?;
        Ok(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Download(ExportFile),
    /// The format exists in the UI but has no implementation; tell the user.
    Unsupported { message: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    #[serde(flatten)]
    dataset: &'a Dataset,
    export_time: String,
}

pub fn export_data(
    dataset: &Dataset,
    format: ExportFormat,
    exported_at: DateTime<Utc>,
) -> Result<ExportOutcome, QuakeError> {
    let outcome = match format {
        ExportFormat::Json => ExportOutcome::Download(ExportFile {
            file_name: JSON_FILE_NAME,
            mime: "application/json",
            bytes: to_json(dataset, exported_at)?.into_bytes(),
        }),
        ExportFormat::Csv => ExportOutcome::Download(ExportFile {
            file_name: CSV_FILE_NAME,
            mime: "text/csv",
            bytes: to_csv(&dataset.affected_areas)?.into_bytes(),
        }),
        ExportFormat::Pdf => ExportOutcome::Unsupported {
            message: PDF_UNAVAILABLE.to_string(),
        },
    };
    log::info!("[Export] Prepared {} export", format);
    Ok(outcome)
}

/// Full dataset plus `exportTime`, pretty-printed.
pub fn to_json(dataset: &Dataset, exported_at: DateTime<Utc>) -> Result<String, QuakeError> {
    let document = ExportDocument {
        dataset,
        export_time: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// One row per affected area after a fixed header. Location and damage level
/// are always quoted; the numeric columns never are.
pub fn to_csv(areas: &[AffectedArea]) -> Result<String, QuakeError> {
    let mut out = Vec::new();
    out.extend_from_slice(CSV_HEADER.as_bytes());
    out.push(b'\n');

    // Text fields arrive pre-quoted, so the writer must leave every field alone.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    for area in areas {
        writer.write_record([
            quoted(&area.name),
            area.location.lat.to_string(),
            area.location.lng.to_string(),
            area.population.to_string(),
            quoted(area.damage.level.as_str()),
            area.damage.buildings_damaged.to_string(),
            area.damage.injured.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| QuakeError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pdf_is_informational() {
        let outcome = export_data(&Dataset::kamchatka(), ExportFormat::Pdf, Utc::now()).unwrap();
        match outcome {
            ExportOutcome::Unsupported { message } => assert!(message.contains("PDF")),
            other => panic!("expected Unsupported, got {:?}", other),
        }
    }

    #[test]
    fn test_json_has_export_time() {
        let at = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        let json = to_json(&Dataset::kamchatka(), at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["exportTime"], "2025-08-01T12:00:00.000Z");
        assert_eq!(value["earthquake"]["epicenter"]["magnitude"], 8.8);
        assert_eq!(value["affectedAreas"].as_array().unwrap().len(), 4);
        assert!(json.contains("\n  \"earthquake\""));
    }

    #[test]
    fn test_file_names() {
        let data = Dataset::kamchatka();
        let ExportOutcome::Download(json) = export_data(&data, ExportFormat::Json, Utc::now()).unwrap() else {
            panic!("json export should download");
        };
        assert_eq!(json.file_name, "kamchatka_earthquake_data.json");
        assert_eq!(json.extension(), "json");

        let ExportOutcome::Download(csv) = export_data(&data, ExportFormat::Csv, Utc::now()).unwrap() else {
            panic!("csv export should download");
        };
        assert_eq!(csv.file_name, "kamchatka_earthquake_damage.csv");
        assert_eq!(csv.mime, "text/csv");
    }
}
