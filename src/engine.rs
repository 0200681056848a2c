//! Boundary to the host simulation.
//!
//! The tracker owns none of the ground truth. Everything it knows about agents,
//! time and places comes through these traits, which the host implements over
//! its own buffers (and tests implement with `testutil::FakeEngine`).

use crate::id::{BuildingId, HumanId, NodeId, PedestrianId, TransitLineId};
use crate::model::{HumanRecord, PedestrianRecord, Position, StatusReport};

/// Simulation time as seen by a renderer.
pub trait SimulationClock {
    /// Current reference tick. Wraps at `u32::MAX`.
    fn reference_tick(&self) -> u32;

    /// Progress through the current tick, in `[0, 1)`.
    fn sub_tick(&self) -> f32;
}

/// Read access to the engine's agent buffers.
///
/// `None` always means the handle no longer denotes a live entity; an idle but
/// valid agent still returns its record.
pub trait RecordStore {
    fn human(&self, id: HumanId) -> Option<HumanRecord>;

    fn pedestrian(&self, id: PedestrianId) -> Option<PedestrianRecord>;

    /// Size of the pedestrian buffer; valid indices are `1..instance_count`.
    /// A full buffer holds 65536 slots, one more than a `u16` can count.
    fn instance_count(&self) -> u32;

    fn citizen_name(&self, id: HumanId) -> Option<String>;

    /// Asset name the pedestrian is rendered with.
    fn prefab_name(&self, id: PedestrianId) -> Option<String>;

    fn localized_status(&self, id: PedestrianId) -> Option<StatusReport>;
}

/// Names for place-like objects.
pub trait LocationResolver {
    fn building_name(&self, id: BuildingId) -> Option<String>;

    fn transit_line_of(&self, node: NodeId) -> Option<TransitLineId>;

    fn transit_line_name(&self, id: TransitLineId) -> Option<String>;
}

/// RGBA colour for overlay primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Blue and red added together.
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Receiver of debug-overlay draw calls.
pub trait OverlaySink {
    fn circle(&mut self, center: Position, color: Color32, radius: f32);

    fn arrow(&mut self, from: Position, to: Position, color: Color32);
}
