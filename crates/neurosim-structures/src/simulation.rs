//! Read-only input contract of the simulation engine.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::layers::NeuronId;

/// Complete result of one finished simulation run.
///
/// Produced by the simulation engine collaborator and consumed immutably by
/// the analysis pipeline; nothing here is mutated after the run ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Simulated duration (ms)
    pub duration_ms: f64,
    /// Integration time step (ms)
    pub dt_ms: f64,
    /// Number of integration steps
    pub n_steps: usize,
    /// Number of units in the simulated network
    pub n_neurons: usize,
    /// Number of synapses in the simulated network
    pub n_synapses: usize,
    /// Wall-clock run time (s)
    pub wall_time_secs: f64,
    /// Total spike count across all units
    pub total_spikes: u64,
    /// Network-wide mean firing rate (Hz)
    pub mean_firing_rate_hz: f64,
    /// Spike timestamps (ms) per unit; per-unit ordering is not significant
    pub spike_times: AHashMap<NeuronId, Vec<f64>>,
    /// Membrane voltage traces (mV) sampled every `dt_ms`, per unit
    pub voltages: AHashMap<NeuronId, Vec<f64>>,
    /// Spike counts per unit
    pub spike_counts: AHashMap<NeuronId, u64>,
    /// Uniform sample-time vector (ms), when the engine recorded one
    pub time_vector: Option<Vec<f64>>,
}

impl SimulationResult {
    /// Spike count for one unit (0 for unknown units).
    pub fn spike_count_of(&self, unit: &str) -> u64 {
        self.spike_counts.get(unit).copied().unwrap_or(0)
    }

    /// Whether any voltage traces were recorded.
    pub fn has_voltages(&self) -> bool {
        !self.voltages.is_empty()
    }
}
