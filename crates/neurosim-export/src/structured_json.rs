// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Structured JSON encoding.
//!
//! Human-readable nested object: metadata block, global-metrics block, one
//! layer record per id ascending, and the connectivity matrix as nested
//! arrays.

use neurosim_structures::ExportDocument;
use serde_json::{json, Map, Value};

/// Format tag carried in the metadata block.
const FORMAT_TAG: &str = "oni_neurosim_v1";

/// Pure projection of `document` into the structured JSON encoding.
pub fn to_structured_json(document: &ExportDocument) -> Value {
    let mut layers = Map::new();
    for (layer, record) in document.layers.iter() {
        layers.insert(
            layer.to_string(),
            json!({
                "name": record.name,
                "n_neurons": record.n_neurons,
                "n_spikes": record.n_spikes,
                "mean_rate_hz": record.mean_rate_hz,
                "mean_voltage_mv": record.mean_voltage_mv,
                "synchrony": record.synchrony,
                "coherence": record.coherence,
            }),
        );
    }

    json!({
        "metadata": {
            "timestamp": document.timestamp,
            "duration_ms": document.duration_ms,
            "dt_ms": document.dt_ms,
            "n_neurons": document.n_total_neurons,
            "n_spikes": document.n_total_spikes,
            "format": FORMAT_TAG,
        },
        "global_metrics": {
            "coherence": document.global_coherence,
            "mean_firing_rate_hz": document.mean_firing_rate_hz,
            "synchrony": document.network_synchrony,
        },
        "layers": layers,
        "connectivity": document.connectivity.to_rows(),
    })
}
