// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! ONI export document assembly.
//!
//! Runs the full analysis pipeline over one finished simulation and produces
//! the immutable [`ExportDocument`] consumed by the encoders:
//!
//! ```text
//! result + topology -> layer mapping -> { layer metrics, connectivity,
//! activity } -> global reduction -> ExportDocument
//! ```

use std::collections::BTreeMap;

use chrono::Utc;
use neurosim_structures::{
    ExportDocument, LayerAssignment, LayerMetrics, LayerSlots, NetworkTopology, NeuronId,
    SimulationResult,
};
use tracing::debug;

use crate::activity::{compute_layer_activities, downsampled_time_vector};
use crate::config::AnalysisConfig;
use crate::connectivity::reduce_connectivity;
use crate::layer_map::resolve_layers;
use crate::layer_metrics::compute_all_layer_metrics;
use crate::synchrony::spike_synchrony;

/// Mean coherence over non-empty layers, 0 when every layer is empty.
pub fn global_coherence(layers: &LayerSlots<LayerMetrics>) -> f64 {
    let mut sum = 0.0;
    let mut n_layers: usize = 0;
    for (_, record) in layers.iter() {
        if record.n_neurons > 0 {
            sum += record.coherence;
            n_layers += 1;
        }
    }
    if n_layers == 0 {
        0.0
    } else {
        sum / n_layers as f64
    }
}

fn extract_spike_trains(
    result: &SimulationResult,
    assignment: &LayerAssignment,
) -> LayerSlots<BTreeMap<NeuronId, Vec<f64>>> {
    LayerSlots::from_fn(|layer| {
        assignment
            .members(layer)
            .iter()
            .filter_map(|unit| {
                result
                    .spike_times
                    .get(unit)
                    .map(|times| (unit.clone(), times.clone()))
            })
            .collect()
    })
}

/// Builds ONI export documents from finished simulation runs.
pub struct OniExporter {
    config: AnalysisConfig,
}

impl OniExporter {
    pub fn new(config: AnalysisConfig) -> Self {
        OniExporter { config }
    }

    pub fn with_defaults() -> Self {
        OniExporter::new(AnalysisConfig::default())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis pipeline over one simulation result and its
    /// network topology.
    pub fn export(&self, result: &SimulationResult, topology: &NetworkTopology) -> ExportDocument {
        let assignment = resolve_layers(topology);
        debug!(
            "[ONI-ANALYSIS] Mapped {} of {} units onto the 14-layer model",
            assignment.n_mapped(),
            topology.neurons.len()
        );

        let layers = compute_all_layer_metrics(&assignment, result, &self.config);
        let connectivity = reduce_connectivity(topology, &assignment);
        let global_coherence = global_coherence(&layers);

        let network_synchrony = if result.spike_times.is_empty() {
            0.0
        } else {
            let mapped: Vec<NeuronId> = assignment.mapped_units().cloned().collect();
            spike_synchrony(&mapped, &result.spike_times)
        };

        let time_vector = downsampled_time_vector(result, self.config.downsample_factor);
        let layer_activities =
            compute_layer_activities(result, &assignment, self.config.downsample_factor);
        let spike_trains = Some(extract_spike_trains(result, &assignment));

        ExportDocument {
            timestamp: Utc::now().to_rfc3339(),
            duration_ms: result.duration_ms,
            dt_ms: result.dt_ms,
            n_total_neurons: result.n_neurons,
            n_total_spikes: result.total_spikes,
            layers,
            connectivity,
            global_coherence,
            mean_firing_rate_hz: result.mean_firing_rate_hz,
            network_synchrony,
            time_vector,
            layer_activities,
            spike_trains,
        }
    }
}
