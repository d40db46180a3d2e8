//! The core crate for NeuroSim analysis. Defines the data structures shared between
//! the analysis engine and the export encoders: unit identifiers, the ONI 14-layer
//! taxonomy, the read-only simulation input contracts, and the export document.

mod error;
pub mod layers;
pub mod metrics;
pub mod simulation;
pub mod topology;

pub use error::{DataError, DataResult};
pub use layers::{LayerSlots, NeuronId, OniLayerId, ONI_LAYER_COUNT, ONI_LAYER_NAMES};
pub use metrics::{ConnectivityMatrix, ExportDocument, LayerAssignment, LayerMetrics};
pub use simulation::SimulationResult;
pub use topology::{NetworkTopology, NeuronParameters, SynapseRecord};
