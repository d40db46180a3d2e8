// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Downsampled per-layer activity time series.

use neurosim_structures::{LayerAssignment, LayerSlots, SimulationResult};

fn downsample(samples: &[f64], stride: usize) -> Vec<f64> {
    samples.iter().copied().step_by(stride.max(1)).collect()
}

/// Stride-downsampled copy of the run's time vector, `None` when the run
/// recorded no samples.
pub fn downsampled_time_vector(result: &SimulationResult, stride: usize) -> Option<Vec<f64>> {
    match result.time_vector.as_deref() {
        Some(time) if !time.is_empty() => Some(downsample(time, stride)),
        _ => None,
    }
}

/// Elementwise mean of the strided member voltage traces, per layer.
///
/// A member trace whose strided length disagrees with the downsampled time
/// vector is excluded from that layer's mean; layers with no usable traces
/// yield an all-zero series of matching length.
pub fn compute_layer_activities(
    result: &SimulationResult,
    assignment: &LayerAssignment,
    stride: usize,
) -> Option<LayerSlots<Vec<f64>>> {
    let time = downsampled_time_vector(result, stride)?;
    let n_samples = time.len();

    Some(LayerSlots::from_fn(|layer| {
        let mut sum = vec![0.0; n_samples];
        let mut n_traces: usize = 0;
        for unit in assignment.members(layer) {
            let Some(trace) = result.voltages.get(unit) else {
                continue;
            };
            let strided = downsample(trace, stride);
            if strided.len() != n_samples {
                continue;
            }
            for (acc, sample) in sum.iter_mut().zip(&strided) {
                *acc += sample;
            }
            n_traces += 1;
        }
        if n_traces > 0 {
            for acc in &mut sum {
                *acc /= n_traces as f64;
            }
        }
        sum
    }))
}
