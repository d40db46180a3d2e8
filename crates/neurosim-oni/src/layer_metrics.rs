// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-layer metric aggregation.
//!
//! Combines spike counts, voltage traces, and synchrony into one
//! [`LayerMetrics`] record per layer. The 14 layers are independent, so the
//! per-layer loop fans out across worker threads; a layer whose computation
//! produces non-finite values is replaced by its zero record with a warning
//! instead of aborting the run.

use neurosim_structures::{
    LayerAssignment, LayerMetrics, LayerSlots, NeuronId, OniLayerId, SimulationResult,
};
use rayon::prelude::*;
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::synchrony::spike_synchrony;

/// Normalization ceiling (Hz) for typical cortical firing rates in the
/// coherence blend. Fixed, not configurable.
pub const RATE_CEILING_HZ: f64 = 50.0;

/// Blend normalized firing rate and synchrony into the coherence score.
pub fn coherence_blend(rate_hz: f64, synchrony: f64) -> f64 {
    let rate_norm = (rate_hz / RATE_CEILING_HZ).min(1.0);
    0.4 * rate_norm + 0.6 * synchrony
}

/// Metrics for a single layer given its member units.
pub fn compute_layer_metrics(
    layer: OniLayerId,
    members: &[NeuronId],
    result: &SimulationResult,
    config: &AnalysisConfig,
) -> LayerMetrics {
    let mut metrics = LayerMetrics::empty(layer);
    metrics.n_neurons = members.len();
    if members.is_empty() {
        return metrics;
    }

    metrics.n_spikes = members.iter().map(|unit| result.spike_count_of(unit)).sum();

    let duration_secs = result.duration_ms / 1000.0;
    if duration_secs > 0.0 {
        metrics.mean_rate_hz = metrics.n_spikes as f64 / members.len() as f64 / duration_secs;
    }

    let mut voltage_sum = 0.0;
    let mut voltage_samples: usize = 0;
    for unit in members {
        if let Some(trace) = result.voltages.get(unit) {
            voltage_sum += trace.iter().sum::<f64>();
            voltage_samples += trace.len();
        }
    }
    if voltage_samples > 0 {
        metrics.mean_voltage_mv = voltage_sum / voltage_samples as f64;
    }

    if config.compute_coherence {
        if !result.spike_times.is_empty() {
            metrics.synchrony = spike_synchrony(members, &result.spike_times);
        }
        metrics.coherence = coherence_blend(metrics.mean_rate_hz, metrics.synchrony);
    }

    metrics
}

/// Metrics for all 14 layers, computed in parallel.
pub fn compute_all_layer_metrics(
    assignment: &LayerAssignment,
    result: &SimulationResult,
    config: &AnalysisConfig,
) -> LayerSlots<LayerMetrics> {
    let layers: Vec<OniLayerId> = OniLayerId::all().collect();
    let records: Vec<LayerMetrics> = layers
        .into_par_iter()
        .map(|layer| {
            let metrics = compute_layer_metrics(layer, assignment.members(layer), result, config);
            if metrics.is_finite() {
                metrics
            } else {
                warn!(
                    "[ONI-ANALYSIS] Layer {} produced non-finite metrics, substituting empty record",
                    layer
                );
                LayerMetrics::empty(layer)
            }
        })
        .collect();

    LayerSlots::from_fn(|layer| records[layer.index()].clone())
}
