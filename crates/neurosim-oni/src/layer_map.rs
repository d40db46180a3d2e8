// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unit-to-layer resolution.
//!
//! Three-branch decision per unit, in priority order: the explicit layer
//! carried by the unit's parameters, a rescale of the network's native
//! structural-layer index onto the 14-layer range, or unassigned.

use ahash::AHashMap;
use neurosim_structures::{LayerAssignment, NetworkTopology, NeuronId, OniLayerId};

/// Rescale a native structural-layer index onto the 14-layer range.
///
/// `floor((structural_index / structural_layer_count) * 13) + 1`, clamped to
/// `[1, 14]`. Pure, so the mapping can be tested in isolation.
pub fn rescale_structural_index(structural_index: usize, structural_layer_count: usize) -> OniLayerId {
    if structural_layer_count == 0 {
        return OniLayerId::MIN;
    }
    let scaled = (structural_index as f64 / structural_layer_count as f64) * 13.0;
    OniLayerId::clamped(scaled as i64 + 1)
}

/// Resolve every unit of `topology` to at most one ONI layer.
///
/// Units with no explicit layer and no structural-layer membership stay
/// unassigned; a topology with neither yields an assignment in which every
/// layer is empty, which downstream components treat as 14 empty layers.
pub fn resolve_layers(topology: &NetworkTopology) -> LayerAssignment {
    // Reverse membership map, built once.
    let mut structural_index_of: AHashMap<&str, usize> = AHashMap::new();
    for (&index, members) in &topology.structural_layers {
        for unit in members {
            structural_index_of.entry(unit.as_str()).or_insert(index);
        }
    }
    let n_structural = topology.n_structural_layers();

    // Sorted iteration keeps the per-layer member lists deterministic.
    let mut ids: Vec<&NeuronId> = topology.neurons.keys().collect();
    ids.sort_unstable();

    let mut assignment = LayerAssignment::new();
    for id in ids {
        let params = &topology.neurons[id];
        let resolved = params.oni_layer.or_else(|| {
            if n_structural == 0 {
                return None;
            }
            structural_index_of
                .get(id.as_str())
                .map(|&index| rescale_structural_index(index, n_structural))
        });
        if let Some(layer) = resolved {
            assignment.assign(id.clone(), layer);
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurosim_structures::NeuronParameters;

    #[test]
    fn test_rescale_spans_range() {
        // Four structural layers spread across the 14 slots
        assert_eq!(rescale_structural_index(0, 4).get(), 1);
        assert_eq!(rescale_structural_index(1, 4).get(), 4);
        assert_eq!(rescale_structural_index(2, 4).get(), 7);
        assert_eq!(rescale_structural_index(3, 4).get(), 10);
    }

    #[test]
    fn test_rescale_single_layer() {
        assert_eq!(rescale_structural_index(0, 1).get(), 1);
    }

    #[test]
    fn test_rescale_clamps() {
        // Index beyond the declared count still lands inside [1, 14]
        assert_eq!(rescale_structural_index(50, 4).get(), 14);
        assert_eq!(rescale_structural_index(0, 0).get(), 1);
    }

    #[test]
    fn test_explicit_layer_wins() {
        let mut topology = NetworkTopology::default();
        topology.neurons.insert(
            "n0".to_string(),
            NeuronParameters {
                oni_layer: Some(OniLayerId::new(9).unwrap()),
            },
        );
        topology
            .structural_layers
            .insert(0, vec!["n0".to_string()]);

        let assignment = resolve_layers(&topology);
        assert_eq!(assignment.layer_of("n0").unwrap().get(), 9);
    }

    #[test]
    fn test_structural_fallback() {
        let mut topology = NetworkTopology::default();
        for i in 0..4 {
            topology
                .neurons
                .insert(format!("n{i}"), NeuronParameters::default());
            topology
                .structural_layers
                .insert(i, vec![format!("n{i}")]);
        }

        let assignment = resolve_layers(&topology);
        assert_eq!(assignment.layer_of("n0").unwrap().get(), 1);
        assert_eq!(assignment.layer_of("n3").unwrap().get(), 10);
    }

    #[test]
    fn test_unresolvable_units_stay_unassigned() {
        let mut topology = NetworkTopology::default();
        topology
            .neurons
            .insert("n0".to_string(), NeuronParameters::default());

        let assignment = resolve_layers(&topology);
        assert_eq!(assignment.layer_of("n0"), None);
        assert_eq!(assignment.n_mapped(), 0);
        for layer in OniLayerId::all() {
            assert!(assignment.members(layer).is_empty());
        }
    }
}
