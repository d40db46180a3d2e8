//! The ONI 14-layer taxonomy.
//!
//! Every simulated unit maps onto at most one of 14 fixed ordinal layers.
//! The taxonomy is closed: [`LayerSlots`] always holds exactly one slot per
//! layer, so "present but empty" is an invariant of the type rather than a
//! runtime convention.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Unit (neuron) identifier, a string id assigned by the simulation engine
pub type NeuronId = String;

/// Number of layers in the ONI model
pub const ONI_LAYER_COUNT: usize = 14;

/// Names of the ONI 14-layer model, indexed by zero-based slot
pub const ONI_LAYER_NAMES: [&str; ONI_LAYER_COUNT] = [
    "Physical Interface",
    "Signal Transduction",
    "Pattern Recognition",
    "Feature Integration",
    "Temporal Processing",
    "Memory Encoding",
    "Contextual Association",
    "Decision Making",
    "Motor Planning",
    "Action Selection",
    "Feedback Integration",
    "Error Correction",
    "Learning/Adaptation",
    "Meta-Cognition",
];

/// Identifier of a single ONI layer, always within `1..=14`.
///
/// Construction is validated, so any `OniLayerId` held by downstream code is
/// a usable index into the fixed taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OniLayerId(u8);

impl OniLayerId {
    pub const MIN: OniLayerId = OniLayerId(1);
    pub const MAX: OniLayerId = OniLayerId(ONI_LAYER_COUNT as u8);

    /// Create a layer id, rejecting anything outside `1..=14`.
    pub fn new(raw: u8) -> Result<Self, DataError> {
        if (1..=ONI_LAYER_COUNT as u8).contains(&raw) {
            Ok(OniLayerId(raw))
        } else {
            Err(DataError::InvalidLayerId(raw as i64))
        }
    }

    /// Clamp an arbitrary integer into the valid layer range.
    pub fn clamped(raw: i64) -> Self {
        OniLayerId(raw.clamp(1, ONI_LAYER_COUNT as i64) as u8)
    }

    /// All layer ids in ascending order.
    pub fn all() -> impl Iterator<Item = OniLayerId> {
        (1..=ONI_LAYER_COUNT as u8).map(OniLayerId)
    }

    /// Raw id in `1..=14`
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot index in `0..14`
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Human-readable layer name from the fixed lookup table.
    pub fn name(self) -> &'static str {
        ONI_LAYER_NAMES[self.index()]
    }
}

impl TryFrom<u8> for OniLayerId {
    type Error = DataError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        OniLayerId::new(raw)
    }
}

impl From<OniLayerId> for u8 {
    fn from(layer: OniLayerId) -> u8 {
        layer.0
    }
}

impl fmt::Display for OniLayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed container holding exactly one `T` per ONI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSlots<T>([T; ONI_LAYER_COUNT]);

impl<T> LayerSlots<T> {
    /// Build a container by evaluating `f` for each layer in ascending order.
    pub fn from_fn(mut f: impl FnMut(OniLayerId) -> T) -> Self {
        LayerSlots(std::array::from_fn(|i| f(OniLayerId(i as u8 + 1))))
    }

    pub fn get(&self, layer: OniLayerId) -> &T {
        &self.0[layer.index()]
    }

    pub fn get_mut(&mut self, layer: OniLayerId) -> &mut T {
        &mut self.0[layer.index()]
    }

    /// Iterate slots in ascending layer order.
    pub fn iter(&self) -> impl Iterator<Item = (OniLayerId, &T)> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, value)| (OniLayerId(i as u8 + 1), value))
    }
}

impl<T: Default> Default for LayerSlots<T> {
    fn default() -> Self {
        LayerSlots::from_fn(|_| T::default())
    }
}

impl<T> Index<OniLayerId> for LayerSlots<T> {
    type Output = T;

    fn index(&self, layer: OniLayerId) -> &T {
        self.get(layer)
    }
}

impl<T> IndexMut<OniLayerId> for LayerSlots<T> {
    fn index_mut(&mut self, layer: OniLayerId) -> &mut T {
        self.get_mut(layer)
    }
}
