// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Columnar archive encoding.
//!
//! Flat archive of named scalar/array entries for numeric post-processing,
//! stored in a little-endian binary container with a magic number and a
//! format version. Omits the per-layer textual metadata on purpose; the
//! structured encoding carries it.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use neurosim_structures::ExportDocument;

use crate::{ExportError, ExportResult};

/// Magic number for columnar archive payloads: "NSIMC"
const MAGIC: &[u8; 5] = b"NSIMC";

/// Current format version (increment when the entry layout changes)
const FORMAT_VERSION: u32 = 1;

const KIND_SCALAR: u8 = 0;
const KIND_VECTOR: u8 = 1;
const KIND_MATRIX: u8 = 2;
const KIND_LABELS: u8 = 3;

/// One named archive entry.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnarEntry {
    Scalar(f64),
    Vector(Vec<f64>),
    /// Row-major matrix with explicit dimensions
    Matrix {
        rows: usize,
        cols: usize,
        data: Vec<f64>,
    },
    /// String table, for id lists that accompany numeric entries
    Labels(Vec<String>),
}

/// Flat, insertion-ordered archive of named entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnarArchive {
    entries: Vec<(String, ColumnarEntry)>,
}

impl ColumnarArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scalar(&mut self, name: impl Into<String>, value: f64) {
        self.entries.push((name.into(), ColumnarEntry::Scalar(value)));
    }

    pub fn push_vector(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.entries.push((name.into(), ColumnarEntry::Vector(values)));
    }

    pub fn push_matrix(&mut self, name: impl Into<String>, rows: usize, cols: usize, data: Vec<f64>) {
        self.entries
            .push((name.into(), ColumnarEntry::Matrix { rows, cols, data }));
    }

    pub fn push_labels(&mut self, name: impl Into<String>, labels: Vec<String>) {
        self.entries.push((name.into(), ColumnarEntry::Labels(labels)));
    }

    pub fn get(&self, name: &str) -> Option<&ColumnarEntry> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, entry)| entry)
    }

    /// Scalar entry by name, `None` for missing or non-scalar entries.
    pub fn scalar(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(ColumnarEntry::Scalar(value)) => Some(*value),
            _ => None,
        }
    }

    /// Vector entry by name, `None` for missing or non-vector entries.
    pub fn vector(&self, name: &str) -> Option<&[f64]> {
        match self.get(name) {
            Some(ColumnarEntry::Vector(values)) => Some(values),
            _ => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the archive into the binary container layout.
    pub fn write_to<W: Write>(&self, mut writer: W) -> ExportResult<()> {
        writer.write_all(MAGIC)?;
        writer.write_u32::<LittleEndian>(FORMAT_VERSION)?;
        writer.write_u32::<LittleEndian>(self.entries.len() as u32)?;

        for (name, entry) in &self.entries {
            let name_bytes = name.as_bytes();
            writer.write_u16::<LittleEndian>(name_bytes.len() as u16)?;
            writer.write_all(name_bytes)?;
            match entry {
                ColumnarEntry::Scalar(value) => {
                    writer.write_u8(KIND_SCALAR)?;
                    writer.write_f64::<LittleEndian>(*value)?;
                }
                ColumnarEntry::Vector(values) => {
                    writer.write_u8(KIND_VECTOR)?;
                    writer.write_u32::<LittleEndian>(values.len() as u32)?;
                    for value in values {
                        writer.write_f64::<LittleEndian>(*value)?;
                    }
                }
                ColumnarEntry::Matrix { rows, cols, data } => {
                    writer.write_u8(KIND_MATRIX)?;
                    writer.write_u32::<LittleEndian>(*rows as u32)?;
                    writer.write_u32::<LittleEndian>(*cols as u32)?;
                    for value in data {
                        writer.write_f64::<LittleEndian>(*value)?;
                    }
                }
                ColumnarEntry::Labels(labels) => {
                    writer.write_u8(KIND_LABELS)?;
                    writer.write_u32::<LittleEndian>(labels.len() as u32)?;
                    for label in labels {
                        let label_bytes = label.as_bytes();
                        writer.write_u16::<LittleEndian>(label_bytes.len() as u16)?;
                        writer.write_all(label_bytes)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Parse an archive back out of the binary container layout.
    pub fn read_from<R: Read>(mut reader: R) -> ExportResult<Self> {
        let mut magic = [0u8; 5];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(ExportError::InvalidMagic(magic));
        }

        let file_version = reader.read_u32::<LittleEndian>()?;
        if file_version != FORMAT_VERSION {
            return Err(ExportError::VersionMismatch {
                file_version,
                expected_version: FORMAT_VERSION,
            });
        }

        let n_entries = reader.read_u32::<LittleEndian>()?;
        let mut archive = ColumnarArchive::new();
        for _ in 0..n_entries {
            let name = read_string(&mut reader)?;
            let kind = reader.read_u8()?;
            let entry = match kind {
                KIND_SCALAR => ColumnarEntry::Scalar(reader.read_f64::<LittleEndian>()?),
                KIND_VECTOR => {
                    let len = reader.read_u32::<LittleEndian>()? as usize;
                    ColumnarEntry::Vector(read_f64s(&mut reader, len)?)
                }
                KIND_MATRIX => {
                    let rows = reader.read_u32::<LittleEndian>()? as usize;
                    let cols = reader.read_u32::<LittleEndian>()? as usize;
                    ColumnarEntry::Matrix {
                        rows,
                        cols,
                        data: read_f64s(&mut reader, rows * cols)?,
                    }
                }
                KIND_LABELS => {
                    let len = reader.read_u32::<LittleEndian>()? as usize;
                    let mut labels = Vec::with_capacity(len);
                    for _ in 0..len {
                        labels.push(read_string(&mut reader)?);
                    }
                    ColumnarEntry::Labels(labels)
                }
                other => {
                    return Err(ExportError::InvalidEntry(format!(
                        "unknown entry kind {other} for '{name}'"
                    )))
                }
            };
            archive.entries.push((name, entry));
        }
        Ok(archive)
    }
}

fn read_string<R: Read>(reader: &mut R) -> ExportResult<String> {
    let len = reader.read_u16::<LittleEndian>()? as usize;
    let mut bytes = vec![0u8; len];
    reader.read_exact(&mut bytes)?;
    String::from_utf8(bytes)
        .map_err(|err| ExportError::InvalidEntry(format!("non-UTF-8 name: {err}")))
}

fn read_f64s<R: Read>(reader: &mut R, len: usize) -> ExportResult<Vec<f64>> {
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(reader.read_f64::<LittleEndian>()?);
    }
    Ok(values)
}

/// Pure projection of `document` into the flat columnar archive.
pub fn to_columnar(document: &ExportDocument) -> ColumnarArchive {
    let mut archive = ColumnarArchive::new();
    archive.push_scalar("duration", document.duration_ms);
    archive.push_scalar("dt", document.dt_ms);
    archive.push_scalar("global_coherence", document.global_coherence);
    archive.push_scalar("mean_firing_rate", document.mean_firing_rate_hz);
    archive.push_scalar("network_synchrony", document.network_synchrony);

    let matrix = document.connectivity.as_array();
    archive.push_matrix(
        "connectivity",
        matrix.nrows(),
        matrix.ncols(),
        matrix.iter().copied().collect(),
    );

    if let Some(time) = &document.time_vector {
        archive.push_vector("time", time.clone());
    }
    if let Some(activities) = &document.layer_activities {
        for (layer, series) in activities.iter() {
            archive.push_vector(format!("layer_{layer}_activity"), series.clone());
        }
    }
    archive
}
