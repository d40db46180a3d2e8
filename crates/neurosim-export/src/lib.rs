// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # NeuroSim Export
//!
//! Serialization of the analysis [`ExportDocument`] into the supported output
//! encodings. One canonical immutable document, three pure projections:
//!
//! - **Structured JSON**: human-readable nested object (metadata, global
//!   metrics, per-layer records, connectivity)
//! - **Columnar archive**: flat named scalar/array entries in a little-endian
//!   binary container, for numeric post-processing
//! - **ONI-native interchange JSON**: the schema expected by the ONI
//!   framework consumer
//!
//! All three carry the identical numeric content; only the container shape
//! differs. Requests for an unknown encoding fail fast — there is no
//! sensible default.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use neurosim_structures::ExportDocument;
use thiserror::Error;

mod columnar;
mod interchange;
mod spike_formats;
mod structured_json;

pub use columnar::{to_columnar, ColumnarArchive, ColumnarEntry};
pub use interchange::to_interchange_json;
pub use spike_formats::{export_spike_trains, spike_trains_to_columnar, SpikeTrainFormat};
pub use structured_json::to_structured_json;

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested encoding does not exist
    #[error("Unknown output encoding: {0}")]
    UnknownFormat(String),

    #[error("Invalid magic number: expected NSIMC, got {0:?}")]
    InvalidMagic([u8; 5]),

    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: u32,
        expected_version: u32,
    },

    #[error("Invalid archive entry: {0}")]
    InvalidEntry(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Output encodings for an [`ExportDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Structured JSON document
    Json,
    /// Binary columnar archive of named arrays and scalars
    Columnar,
    /// ONI framework interchange JSON
    OniNative,
}

impl ExportFormat {
    /// Conventional file extension for the encoding.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Columnar => "nsc",
            ExportFormat::OniNative => "oni.json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "json" => Ok(ExportFormat::Json),
            // "numpy" kept for compatibility with the original tool's flag
            "columnar" | "numpy" => Ok(ExportFormat::Columnar),
            "oni" | "oni-native" => Ok(ExportFormat::OniNative),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ExportFormat::Json => "json",
            ExportFormat::Columnar => "columnar",
            ExportFormat::OniNative => "oni",
        };
        write!(f, "{token}")
    }
}

/// Render `document` in `format` as in-memory bytes.
pub fn render_document(document: &ExportDocument, format: ExportFormat) -> ExportResult<Vec<u8>> {
    match format {
        ExportFormat::Json => {
            let value = to_structured_json(document);
            Ok(serde_json::to_vec_pretty(&value)?)
        }
        ExportFormat::Columnar => {
            let mut bytes = Vec::new();
            to_columnar(document).write_to(&mut bytes)?;
            Ok(bytes)
        }
        ExportFormat::OniNative => {
            let value = to_interchange_json(document);
            Ok(serde_json::to_vec_pretty(&value)?)
        }
    }
}

/// Serialize `document` in `format` and write it to `path`.
pub fn save_document(
    document: &ExportDocument,
    path: impl AsRef<Path>,
    format: ExportFormat,
) -> ExportResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&render_document(document, format)?)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens_round_trip() {
        for format in [ExportFormat::Json, ExportFormat::Columnar, ExportFormat::OniNative] {
            let token = format.to_string();
            assert_eq!(token.parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!("numpy".parse::<ExportFormat>().unwrap(), ExportFormat::Columnar);
    }

    #[test]
    fn test_unknown_format_fails_fast() {
        let err = "matlab".parse::<ExportFormat>().unwrap_err();
        match err {
            ExportError::UnknownFormat(token) => assert_eq!(token, "matlab"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
