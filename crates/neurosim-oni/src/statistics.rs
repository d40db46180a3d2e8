// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Spike-train statistics for plots and summaries.
//!
//! Raster data, population firing-rate histograms, and inter-spike-interval
//! distributions over the raw per-unit spike-time map. Empty inputs degrade
//! to zero-filled outputs, never errors.

use ahash::AHashMap;
use neurosim_structures::NeuronId;

/// Flattened raster-plot data: `(times, unit indices, unit id table)`.
///
/// `unit_order` fixes the vertical ordering; by default units are sorted by
/// id. Units named in `unit_order` but absent from `spike_times` simply
/// contribute no points.
pub fn raster_data(
    spike_times: &AHashMap<NeuronId, Vec<f64>>,
    unit_order: Option<&[NeuronId]>,
) -> (Vec<f64>, Vec<usize>, Vec<NeuronId>) {
    let id_table: Vec<NeuronId> = match unit_order {
        Some(order) => order.to_vec(),
        None => {
            let mut ids: Vec<NeuronId> = spike_times.keys().cloned().collect();
            ids.sort_unstable();
            ids
        }
    };

    let mut times = Vec::new();
    let mut indices = Vec::new();
    for (index, unit) in id_table.iter().enumerate() {
        if let Some(spikes) = spike_times.get(unit) {
            for &t in spikes {
                times.push(t);
                indices.push(index);
            }
        }
    }
    (times, indices, id_table)
}

/// Population firing-rate histogram: `(bin centers (ms), rates (spikes/s per neuron))`.
///
/// Bin count is `floor(duration / bin_width)`; spikes outside `[0, duration]`
/// are dropped, and a spike exactly at `duration` lands in the last bin.
pub fn firing_rate_histogram(
    spike_times: &AHashMap<NeuronId, Vec<f64>>,
    duration_ms: f64,
    bin_width_ms: f64,
) -> (Vec<f64>, Vec<f64>) {
    if !(bin_width_ms > 0.0) || !(duration_ms > 0.0) {
        return (Vec::new(), Vec::new());
    }
    let n_bins = (duration_ms / bin_width_ms) as usize;
    if n_bins == 0 {
        return (Vec::new(), Vec::new());
    }

    let centers: Vec<f64> = (0..n_bins)
        .map(|i| (i as f64 + 0.5) * bin_width_ms)
        .collect();

    let mut counts = vec![0u64; n_bins];
    for spikes in spike_times.values() {
        for &t in spikes {
            if t < 0.0 || t > duration_ms {
                continue;
            }
            let bin = ((t / bin_width_ms) as usize).min(n_bins - 1);
            counts[bin] += 1;
        }
    }

    let n_neurons = spike_times.len().max(1);
    let rates: Vec<f64> = counts
        .iter()
        .map(|&count| count as f64 / (bin_width_ms / 1000.0) / n_neurons as f64)
        .collect();
    (centers, rates)
}

/// Pooled inter-spike-interval distribution: `(bin centers (ms), counts)`.
///
/// ISIs are computed per unit on time-sorted spikes, pooled across units,
/// and clipped to `max_isi_ms`. Units with fewer than two spikes contribute
/// nothing.
pub fn isi_distribution(
    spike_times: &AHashMap<NeuronId, Vec<f64>>,
    max_isi_ms: f64,
    n_bins: usize,
) -> (Vec<f64>, Vec<u64>) {
    if n_bins == 0 || !(max_isi_ms > 0.0) {
        return (Vec::new(), Vec::new());
    }

    let mut isis = Vec::new();
    for spikes in spike_times.values() {
        if spikes.len() < 2 {
            continue;
        }
        let mut sorted = spikes.clone();
        sorted.sort_by(f64::total_cmp);
        for pair in sorted.windows(2) {
            let isi = pair[1] - pair[0];
            if isi <= max_isi_ms {
                isis.push(isi);
            }
        }
    }

    let bin_width = max_isi_ms / n_bins as f64;
    let centers: Vec<f64> = (0..n_bins).map(|i| (i as f64 + 0.5) * bin_width).collect();
    let mut counts = vec![0u64; n_bins];
    for isi in isis {
        let bin = ((isi / bin_width) as usize).min(n_bins - 1);
        counts[bin] += 1;
    }
    (centers, counts)
}
