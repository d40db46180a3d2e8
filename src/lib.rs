//! # NeuroSim - Simulation Analysis & Export
//!
//! Analysis toolkit for finished neural-simulation runs. Maps simulated
//! units onto the ONI 14-layer model, computes per-layer and network-wide
//! synchrony/coherence metrics, and serializes the resulting report into
//! three encodings with identical numeric content.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! neurosim = "0.1"
//! ```
//!
//! ```rust
//! use neurosim::{save_document, ExportFormat, OniExporter};
//! use neurosim::{NetworkTopology, SimulationResult};
//!
//! let result = SimulationResult::default();
//! let topology = NetworkTopology::default();
//!
//! let document = OniExporter::with_defaults().export(&result, &topology);
//! # let dir = std::env::temp_dir();
//! save_document(&document, dir.join("run.oni.json"), ExportFormat::OniNative)?;
//! # Ok::<(), neurosim::ExportError>(())
//! ```
//!
//! ## Workspace Members
//!
//! - **[`structures`]**: core data types (simulation inputs, the 14-layer
//!   taxonomy, the export document)
//! - **[`oni`]**: the analysis engine (layer mapping, synchrony, coherence,
//!   connectivity, activity series)
//! - **[`export`]**: the output encodings (structured JSON, binary columnar
//!   archive, ONI interchange JSON)

pub use neurosim_export as export;
pub use neurosim_oni as oni;
pub use neurosim_structures as structures;

// Common entry points, re-exported for convenience
pub use neurosim_export::{
    render_document, save_document, ExportError, ExportFormat, ExportResult,
};
pub use neurosim_oni::{AnalysisConfig, OniExporter};
pub use neurosim_structures::{
    ExportDocument, LayerMetrics, NetworkTopology, OniLayerId, SimulationResult,
};
