//! Analysis output structures: per-layer metrics, the unit-to-layer
//! assignment, the inter-layer connectivity matrix, and the export document.

use std::collections::BTreeMap;

use ahash::AHashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::layers::{LayerSlots, NeuronId, OniLayerId, ONI_LAYER_COUNT};

/// Assignment of simulated units to ONI layers.
///
/// Each unit appears in at most one layer; the per-layer member sets are
/// pairwise disjoint by construction (one pass, one decision per unit).
#[derive(Debug, Clone, Default)]
pub struct LayerAssignment {
    by_unit: AHashMap<NeuronId, OniLayerId>,
    members: LayerSlots<Vec<NeuronId>>,
}

impl LayerAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `unit` to `layer`. A repeated assignment for the same unit is
    /// ignored: the first decision stands.
    pub fn assign(&mut self, unit: NeuronId, layer: OniLayerId) {
        if self.by_unit.contains_key(&unit) {
            return;
        }
        self.members[layer].push(unit.clone());
        self.by_unit.insert(unit, layer);
    }

    /// Layer of one unit, `None` when the unit is unassigned.
    pub fn layer_of(&self, unit: &str) -> Option<OniLayerId> {
        self.by_unit.get(unit).copied()
    }

    /// Member units of one layer, in assignment order.
    pub fn members(&self, layer: OniLayerId) -> &[NeuronId] {
        &self.members[layer]
    }

    /// All assigned units, in ascending layer order.
    pub fn mapped_units(&self) -> impl Iterator<Item = &NeuronId> {
        OniLayerId::all().flat_map(move |layer| self.members(layer).iter())
    }

    /// Number of assigned units.
    pub fn n_mapped(&self) -> usize {
        self.by_unit.len()
    }
}

/// Metrics of one ONI layer, always present even when the layer is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMetrics {
    pub layer_id: OniLayerId,
    /// Human-readable name from the fixed lookup table
    pub name: String,
    pub n_neurons: usize,
    pub n_spikes: u64,
    /// Mean firing rate (Hz)
    pub mean_rate_hz: f64,
    /// Mean membrane voltage (mV)
    pub mean_voltage_mv: f64,
    /// Spike synchrony in `[0, 1]`
    pub synchrony: f64,
    /// Blended coherence score in `[0, 1]`
    pub coherence: f64,
}

impl LayerMetrics {
    /// The zero/default record for `layer`. Used for empty layers and as the
    /// substitute when a layer's computation has to be discarded.
    pub fn empty(layer: OniLayerId) -> Self {
        LayerMetrics {
            layer_id: layer,
            name: layer.name().to_string(),
            n_neurons: 0,
            n_spikes: 0,
            mean_rate_hz: 0.0,
            mean_voltage_mv: 0.0,
            synchrony: 0.0,
            coherence: 0.0,
        }
    }

    /// Whether every floating-point field holds a finite value.
    pub fn is_finite(&self) -> bool {
        self.mean_rate_hz.is_finite()
            && self.mean_voltage_mv.is_finite()
            && self.synchrony.is_finite()
            && self.coherence.is_finite()
    }
}

/// 14x14 matrix of accumulated synaptic weight between ONI layer pairs.
///
/// Entry `(i, j)` is the summed weight of synapses whose presynaptic unit
/// resolves to layer `i + 1` and postsynaptic unit to layer `j + 1`. Always
/// fully allocated and zero-initialized regardless of data volume.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityMatrix(Array2<f64>);

impl ConnectivityMatrix {
    pub fn zeros() -> Self {
        ConnectivityMatrix(Array2::zeros((ONI_LAYER_COUNT, ONI_LAYER_COUNT)))
    }

    /// Accumulate one synapse's weight.
    pub fn add_weight(&mut self, pre: OniLayerId, post: OniLayerId, weight: f64) {
        self.0[[pre.index(), post.index()]] += weight;
    }

    /// Accumulated weight from `pre` to `post`.
    pub fn weight(&self, pre: OniLayerId, post: OniLayerId) -> f64 {
        self.0[[pre.index(), post.index()]]
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.0
    }

    /// Nested rows (presynaptic layer outer), for the JSON encodings.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.0.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Sum of all entries.
    pub fn total_weight(&self) -> f64 {
        self.0.sum()
    }
}

impl Default for ConnectivityMatrix {
    fn default() -> Self {
        Self::zeros()
    }
}

/// The root aggregate of one analysis run.
///
/// Constructed once per run from one [`SimulationResult`](crate::SimulationResult)
/// and one [`NetworkTopology`](crate::NetworkTopology), immutable thereafter,
/// and consumed by exactly one encoder per requested output format.
#[derive(Debug, Clone)]
pub struct ExportDocument {
    /// Generation timestamp (RFC 3339)
    pub timestamp: String,
    pub duration_ms: f64,
    pub dt_ms: f64,
    /// Total units in the simulated network, mapped or not
    pub n_total_neurons: usize,
    pub n_total_spikes: u64,
    /// One metrics record per layer, ascending by layer id
    pub layers: LayerSlots<LayerMetrics>,
    pub connectivity: ConnectivityMatrix,
    /// Mean coherence over non-empty layers
    pub global_coherence: f64,
    /// Network-wide mean firing rate, passed through from the simulation
    pub mean_firing_rate_hz: f64,
    /// Synchrony over the full set of mapped units
    pub network_synchrony: f64,
    /// Downsampled sample-time vector (ms), when the run recorded one
    pub time_vector: Option<Vec<f64>>,
    /// Downsampled mean-voltage series per layer, aligned with `time_vector`
    pub layer_activities: Option<LayerSlots<Vec<f64>>>,
    /// Spike trains grouped by layer and unit
    pub spike_trains: Option<LayerSlots<BTreeMap<NeuronId, Vec<f64>>>>,
}

impl ExportDocument {
    /// An empty document shell with zeroed metrics for every layer.
    pub fn empty() -> Self {
        ExportDocument {
            timestamp: String::new(),
            duration_ms: 0.0,
            dt_ms: 0.0,
            n_total_neurons: 0,
            n_total_spikes: 0,
            layers: LayerSlots::from_fn(LayerMetrics::empty),
            connectivity: ConnectivityMatrix::zeros(),
            global_coherence: 0.0,
            mean_firing_rate_hz: 0.0,
            network_synchrony: 0.0,
            time_vector: None,
            layer_activities: None,
            spike_trains: None,
        }
    }
}
