use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::error::DataError;
use super::loader::format_timestamp;
use super::model::{FilteredSeries, Series};

/// One row of the 2-column original artifact.
#[derive(Serialize)]
struct OriginalRow {
    #[serde(rename = "DateTime")]
    date_time: String,
    #[serde(rename = "Temperature (°C)")]
    temperature: f64,
}

/// One row of the 3-column filtered artifact. `FilterType` repeats the
/// filter label on every row so a consumer can recover the filter identity
/// from any single row.
#[derive(Serialize)]
struct FilteredRow {
    #[serde(rename = "DateTime")]
    date_time: String,
    #[serde(rename = "Temperature (°C)")]
    temperature: f64,
    #[serde(rename = "FilterType")]
    filter_type: String,
}

// ---------------------------------------------------------------------------
// Comparison – the validated original/filtered pair
// ---------------------------------------------------------------------------

/// An original series and its filtered counterpart, checked to share one
/// time axis. Construction is the only place alignment is verified; the
/// writers below just serialize.
#[derive(Debug)]
pub struct Comparison<'a> {
    original: &'a Series,
    filtered: &'a FilteredSeries,
}

impl<'a> Comparison<'a> {
    /// Pair the two series, failing with [`DataError::Alignment`] at the
    /// first index where their timestamp sequences differ (a length
    /// mismatch reports the shorter length).
    pub fn pair(original: &'a Series, filtered: &'a FilteredSeries) -> Result<Self, DataError> {
        let mismatch = original
            .timestamps()
            .zip(filtered.series.timestamps())
            .position(|(a, b)| a != b);
        if let Some(index) = mismatch {
            return Err(DataError::Alignment { index });
        }
        if original.len() != filtered.series.len() {
            return Err(DataError::Alignment {
                index: original.len().min(filtered.series.len()),
            });
        }
        Ok(Comparison { original, filtered })
    }

    /// Emit the original series unchanged, in the input-artifact layout
    /// (`DateTime,Temperature (°C)`).
    pub fn write_original<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for sample in self.original.samples() {
            csv.serialize(OriginalRow {
                date_time: format_timestamp(sample.timestamp),
                temperature: sample.value,
            })
            .context("writing original row")?;
        }
        csv.flush().context("flushing original artifact")?;
        Ok(())
    }

    /// Emit the filtered series in the output-artifact layout
    /// (`DateTime,Temperature (°C),FilterType`).
    pub fn write_filtered<W: Write>(&self, writer: W) -> Result<()> {
        let label = &self.filtered.config.label;
        let mut csv = csv::Writer::from_writer(writer);
        for sample in self.filtered.series.samples() {
            csv.serialize(FilteredRow {
                date_time: format_timestamp(sample.timestamp),
                temperature: sample.value,
                filter_type: label.clone(),
            })
            .context("writing filtered row")?;
        }
        csv.flush().context("flushing filtered artifact")?;
        Ok(())
    }

    /// Write the filtered artifact to a file. The artifact is serialized
    /// fully in memory first, so a failed export never leaves a partial
    /// file behind.
    pub fn write_filtered_file(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        self.write_filtered(&mut buf)?;
        std::fs::write(path, buf).with_context(|| format!("writing {}", path.display()))?;
        info!(
            "wrote {} filtered samples ({}) to {}",
            self.filtered.series.len(),
            self.filtered.config.label,
            path.display()
        );
        Ok(())
    }

    /// Write the original artifact to a file, same all-or-nothing rule.
    pub fn write_original_file(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        self.write_original(&mut buf)?;
        std::fs::write(path, buf).with_context(|| format!("writing {}", path.display()))?;
        info!(
            "wrote {} original samples to {}",
            self.original.len(),
            path.display()
        );
        Ok(())
    }
}
