// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # NeuroSim ONI Analysis
//!
//! Maps the units of a finished simulation run onto the ONI 14-layer model and
//! computes per-layer and network-wide synchrony/coherence metrics.
//!
//! ## Pipeline
//! - **Layer mapping**: explicit per-unit layer, structural-layer rescale, or unassigned
//! - **Synchrony**: pairwise temporal coincidence over merged spike trains
//! - **Layer metrics**: spike counts, rates, voltages, synchrony, coherence per layer
//! - **Connectivity**: synaptic weights folded into a 14x14 inter-layer matrix
//! - **Activity**: downsampled per-layer mean-voltage time series
//! - **Assembly**: one immutable [`ExportDocument`](neurosim_structures::ExportDocument)
//!
//! The whole pipeline is a single-pass batch transform over immutable inputs;
//! missing or malformed per-unit data degrades to documented defaults and is
//! never an error.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod activity;
pub mod config;
pub mod connectivity;
pub mod exporter;
pub mod layer_map;
pub mod layer_metrics;
pub mod statistics;
pub mod synchrony;

pub use activity::{compute_layer_activities, downsampled_time_vector};
pub use config::{AnalysisConfig, ConfigError};
pub use connectivity::reduce_connectivity;
pub use exporter::{global_coherence, OniExporter};
pub use layer_map::{rescale_structural_index, resolve_layers};
pub use layer_metrics::{coherence_blend, compute_all_layer_metrics, RATE_CEILING_HZ};
pub use synchrony::{spike_synchrony, COINCIDENCE_WINDOW_MS};
