// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Inter-layer connectivity reduction.

use neurosim_structures::{ConnectivityMatrix, LayerAssignment, NetworkTopology};

/// Fold every synapse into the 14x14 inter-layer weight matrix.
///
/// A synapse contributes only when both endpoints resolve to a layer;
/// unresolved endpoints are skipped, not an error.
pub fn reduce_connectivity(
    topology: &NetworkTopology,
    assignment: &LayerAssignment,
) -> ConnectivityMatrix {
    let mut matrix = ConnectivityMatrix::zeros();
    for synapse in &topology.synapses {
        if let (Some(pre), Some(post)) = (
            assignment.layer_of(&synapse.pre),
            assignment.layer_of(&synapse.post),
        ) {
            matrix.add_weight(pre, post, synapse.weight);
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurosim_structures::{NeuronParameters, OniLayerId, SynapseRecord};

    fn unit(layer: Option<u8>) -> NeuronParameters {
        NeuronParameters {
            oni_layer: layer.map(|raw| OniLayerId::new(raw).unwrap()),
        }
    }

    #[test]
    fn test_single_synapse_within_layer() {
        let mut topology = NetworkTopology::default();
        topology.neurons.insert("pre".to_string(), unit(Some(2)));
        topology.neurons.insert("post".to_string(), unit(Some(2)));
        topology.synapses.push(SynapseRecord {
            pre: "pre".to_string(),
            post: "post".to_string(),
            weight: 3.5,
        });

        let assignment = crate::layer_map::resolve_layers(&topology);
        let matrix = reduce_connectivity(&topology, &assignment);
        let l2 = OniLayerId::new(2).unwrap();
        assert_eq!(matrix.weight(l2, l2), 3.5);
        assert_eq!(matrix.total_weight(), 3.5);
    }

    #[test]
    fn test_unresolved_endpoint_skipped() {
        let mut topology = NetworkTopology::default();
        topology.neurons.insert("pre".to_string(), unit(Some(5)));
        topology.neurons.insert("post".to_string(), unit(None));
        topology.synapses.push(SynapseRecord {
            pre: "pre".to_string(),
            post: "post".to_string(),
            weight: 1.0,
        });

        let assignment = crate::layer_map::resolve_layers(&topology);
        let matrix = reduce_connectivity(&topology, &assignment);
        assert_eq!(matrix.total_weight(), 0.0);
    }

    #[test]
    fn test_directionality() {
        let mut topology = NetworkTopology::default();
        topology.neurons.insert("pre".to_string(), unit(Some(1)));
        topology.neurons.insert("post".to_string(), unit(Some(8)));
        topology.synapses.push(SynapseRecord {
            pre: "pre".to_string(),
            post: "post".to_string(),
            weight: 0.25,
        });

        let assignment = crate::layer_map::resolve_layers(&topology);
        let matrix = reduce_connectivity(&topology, &assignment);
        let l1 = OniLayerId::new(1).unwrap();
        let l8 = OniLayerId::new(8).unwrap();
        assert_eq!(matrix.weight(l1, l8), 0.25);
        assert_eq!(matrix.weight(l8, l1), 0.0);
    }
}
