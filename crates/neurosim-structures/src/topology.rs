//! Read-only input contract of the network-topology collaborator.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::layers::{NeuronId, OniLayerId};

/// Per-unit parameter record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeuronParameters {
    /// Explicit ONI layer assignment, when the network model declares one
    pub oni_layer: Option<OniLayerId>,
}

/// One directed synapse between two units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynapseRecord {
    pub pre: NeuronId,
    pub post: NeuronId,
    pub weight: f64,
}

/// Topology of the simulated network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkTopology {
    /// Parameter record per unit
    pub neurons: AHashMap<NeuronId, NeuronParameters>,
    /// All synapses, in network construction order
    pub synapses: Vec<SynapseRecord>,
    /// Native structural-layer membership (layer index -> member units),
    /// for networks built in explicit feedforward layers. Empty otherwise.
    pub structural_layers: BTreeMap<usize, Vec<NeuronId>>,
}

impl NetworkTopology {
    /// Number of native structural layers (0 when the network has none).
    pub fn n_structural_layers(&self) -> usize {
        self.structural_layers.len()
    }
}
