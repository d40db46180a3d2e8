// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! ONI framework interchange encoding.
//!
//! The schema expected by the downstream ONI consumer: renamed top-level
//! groupings (`simulation`, `coherence_analysis`, `firing_statistics`,
//! `connectivity`) over the same numeric content as the other encodings.

use neurosim_structures::{ExportDocument, OniLayerId};
use serde_json::{json, Map, Value};

/// Interchange schema version
const INTERCHANGE_VERSION: &str = "1.0";
/// Interchange payload type tag
const INTERCHANGE_TYPE: &str = "neurosim_export";

fn layer_map(document: &ExportDocument, field: impl Fn(OniLayerId) -> f64) -> Value {
    let mut map = Map::new();
    for (layer, _) in document.layers.iter() {
        map.insert(layer.to_string(), json!(field(layer)));
    }
    Value::Object(map)
}

/// Pure projection of `document` into the ONI interchange encoding.
pub fn to_interchange_json(document: &ExportDocument) -> Value {
    json!({
        "version": INTERCHANGE_VERSION,
        "type": INTERCHANGE_TYPE,
        "timestamp": document.timestamp,
        "simulation": {
            "duration_ms": document.duration_ms,
            "dt_ms": document.dt_ms,
            "n_neurons": document.n_total_neurons,
        },
        "coherence_analysis": {
            "Cs_global": document.global_coherence,
            "layer_coherences": layer_map(document, |layer| document.layers[layer].coherence),
            "layer_synchrony": layer_map(document, |layer| document.layers[layer].synchrony),
        },
        "firing_statistics": {
            "total_spikes": document.n_total_spikes,
            "mean_rate_hz": document.mean_firing_rate_hz,
            "layer_rates": layer_map(document, |layer| document.layers[layer].mean_rate_hz),
        },
        "connectivity": {
            "inter_layer_weights": document.connectivity.to_rows(),
        },
    })
}
