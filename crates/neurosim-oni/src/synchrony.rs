// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pairwise temporal-coincidence synchrony.
//!
//! Merges the spike trains of the requested units into one time-sorted
//! sequence and scans it with a forward window, counting coincident spikes
//! from distinct units. Quadratic in the worst case (dense synchronous
//! bursts); near-linear on sparse trains because the window breaks early.

use std::cmp::Ordering;

use ahash::AHashMap;
use neurosim_structures::NeuronId;

/// Coincidence window (ms)
pub const COINCIDENCE_WINDOW_MS: f64 = 5.0;

/// Synchrony score in `[0, 1]` for `units`, given the full spike-time map.
///
/// Returns 0 when fewer than two units or fewer than two spikes exist, or
/// when no distinct-unit pair falls within any window. Equal timestamps are
/// ordered by unit id, so the score is a pure function of the input sets.
pub fn spike_synchrony(units: &[NeuronId], spike_times: &AHashMap<NeuronId, Vec<f64>>) -> f64 {
    if units.len() < 2 {
        return 0.0;
    }

    let mut merged: Vec<(f64, &str)> = Vec::new();
    for unit in units {
        if let Some(times) = spike_times.get(unit) {
            for &t in times {
                merged.push((t, unit.as_str()));
            }
        }
    }
    if merged.len() < 2 {
        return 0.0;
    }

    merged.sort_by(|a, b| match a.0.total_cmp(&b.0) {
        Ordering::Equal => a.1.cmp(b.1),
        order => order,
    });

    let mut coincidences: u64 = 0;
    let mut total_pairs: u64 = 0;
    for i in 0..merged.len() {
        let (t1, u1) = merged[i];
        for &(t2, u2) in &merged[i + 1..] {
            if t2 - t1 > COINCIDENCE_WINDOW_MS {
                break;
            }
            if u1 != u2 {
                coincidences += 1;
                total_pairs += 1;
            }
        }
    }

    if total_pairs == 0 {
        0.0
    } else {
        coincidences as f64 / total_pairs as f64
    }
}
