// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Standalone spike-train export formats.
//!
//! Three shapes for the raw per-unit spike times of a finished run:
//! time-sorted CSV rows, a JSON map of unit id to spike times, and a binned
//! sparse raster written through the columnar binary container.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use neurosim_structures::SimulationResult;

use crate::columnar::ColumnarArchive;
use crate::{ExportError, ExportResult};

/// Formats for standalone spike-train export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpikeTrainFormat {
    /// One `time_ms,neuron_id` row per spike, globally time-sorted
    Csv,
    /// Map of unit id to spike-time list
    Json,
    /// Binned `(time index, neuron index)` pairs with the id table
    Sparse,
}

impl FromStr for SpikeTrainFormat {
    type Err = ExportError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "csv" => Ok(SpikeTrainFormat::Csv),
            "json" => Ok(SpikeTrainFormat::Json),
            "sparse" => Ok(SpikeTrainFormat::Sparse),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for SpikeTrainFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            SpikeTrainFormat::Csv => "csv",
            SpikeTrainFormat::Json => "json",
            SpikeTrainFormat::Sparse => "sparse",
        };
        write!(f, "{token}")
    }
}

/// Export the run's spike trains to `path` in `format`.
pub fn export_spike_trains(
    result: &SimulationResult,
    path: impl AsRef<Path>,
    format: SpikeTrainFormat,
) -> ExportResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        SpikeTrainFormat::Csv => write_spikes_csv(result, &mut writer)?,
        SpikeTrainFormat::Json => write_spikes_json(result, &mut writer)?,
        SpikeTrainFormat::Sparse => spike_trains_to_columnar(result).write_to(&mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

fn write_spikes_csv<W: Write>(result: &SimulationResult, writer: &mut W) -> ExportResult<()> {
    let mut rows: Vec<(f64, &str)> = Vec::new();
    for (unit, times) in &result.spike_times {
        for &t in times {
            rows.push((t, unit.as_str()));
        }
    }
    rows.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    writeln!(writer, "time_ms,neuron_id")?;
    for (t, unit) in rows {
        writeln!(writer, "{t},{unit}")?;
    }
    Ok(())
}

fn write_spikes_json<W: Write>(result: &SimulationResult, writer: &mut W) -> ExportResult<()> {
    // BTreeMap keeps the unit keys sorted
    let by_unit: BTreeMap<&str, &Vec<f64>> = result
        .spike_times
        .iter()
        .map(|(unit, times)| (unit.as_str(), times))
        .collect();
    serde_json::to_writer_pretty(writer, &by_unit)?;
    Ok(())
}

/// Binned sparse raster of the run's spike trains.
///
/// Spikes land in bin `floor(t / dt)`; spikes outside `[0, n_bins)` are
/// dropped. A run with a non-positive time step yields an empty raster.
pub fn spike_trains_to_columnar(result: &SimulationResult) -> ColumnarArchive {
    let mut neuron_ids: Vec<String> = result.spike_times.keys().cloned().collect();
    neuron_ids.sort_unstable();

    let n_bins = if result.dt_ms > 0.0 {
        (result.duration_ms / result.dt_ms) as usize
    } else {
        0
    };

    let mut time_indices = Vec::new();
    let mut neuron_indices = Vec::new();
    for (index, unit) in neuron_ids.iter().enumerate() {
        for &t in &result.spike_times[unit] {
            if t < 0.0 {
                continue;
            }
            let bin = (t / result.dt_ms) as usize;
            if bin < n_bins {
                time_indices.push(bin as f64);
                neuron_indices.push(index as f64);
            }
        }
    }

    let mut archive = ColumnarArchive::new();
    archive.push_vector("time_indices", time_indices);
    archive.push_vector("neuron_indices", neuron_indices);
    archive.push_vector("shape", vec![n_bins as f64, neuron_ids.len() as f64]);
    archive.push_scalar("dt", result.dt_ms);
    archive.push_scalar("duration", result.duration_ms);
    archive.push_labels("neuron_ids", neuron_ids);
    archive
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashMap;

    fn small_result() -> SimulationResult {
        let mut spike_times: AHashMap<String, Vec<f64>> = AHashMap::new();
        spike_times.insert("b".to_string(), vec![2.0, 0.5]);
        spike_times.insert("a".to_string(), vec![1.0]);
        SimulationResult {
            duration_ms: 10.0,
            dt_ms: 1.0,
            spike_times,
            ..SimulationResult::default()
        }
    }

    #[test]
    fn test_csv_rows_time_sorted() {
        let mut bytes = Vec::new();
        write_spikes_csv(&small_result(), &mut bytes).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time_ms,neuron_id");
        assert_eq!(lines[1], "0.5,b");
        assert_eq!(lines[2], "1,a");
        assert_eq!(lines[3], "2,b");
    }

    #[test]
    fn test_json_keys_sorted() {
        let mut bytes = Vec::new();
        write_spikes_json(&small_result(), &mut bytes).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(value["a"][0], 1.0);
    }

    #[test]
    fn test_sparse_raster_bins() {
        let archive = spike_trains_to_columnar(&small_result());
        assert_eq!(archive.vector("time_indices").unwrap(), &[1.0, 0.0, 2.0]);
        assert_eq!(archive.vector("neuron_indices").unwrap(), &[0.0, 1.0, 1.0]);
        assert_eq!(archive.vector("shape").unwrap(), &[10.0, 2.0]);
        assert_eq!(archive.scalar("dt"), Some(1.0));
    }

    #[test]
    fn test_sparse_zero_dt_yields_empty_raster() {
        let mut result = small_result();
        result.dt_ms = 0.0;
        let archive = spike_trains_to_columnar(&result);
        assert!(archive.vector("time_indices").unwrap().is_empty());
        assert_eq!(archive.vector("shape").unwrap(), &[0.0, 2.0]);
    }

    #[test]
    fn test_unknown_spike_format_token() {
        assert!(matches!(
            "parquet".parse::<SpikeTrainFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }
}
