use serde::{Deserialize, Serialize};

use super::transform::{Displacement, Position, Rotation};
use crate::id::{BuildingId, HumanId, ObjectId, PedestrianId, VehicleId};

/// Flags on the citizen (generic human) record.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HumanFlags(u32);

impl HumanFlags {
    pub const NONE: Self = Self(0);
    pub const TOURIST: Self = Self(1 << 0);
    pub const STUDENT: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn bits(self) -> u32 {
        self.0
    }
}

/// Flags on the citizen instance (the simulated pedestrian).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceFlags(u32);

impl InstanceFlags {
    pub const NONE: Self = Self(0);
    pub const ENTERING_VEHICLE: Self = Self(1 << 0);
    pub const HANG_AROUND: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Static attributes of a citizen as stored by the engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanRecord {
    pub flags: HumanFlags,
    pub home: Option<BuildingId>,
    pub work: Option<BuildingId>,
    pub vehicle: Option<VehicleId>,
    /// The moving instance, when the citizen is currently out and about.
    pub instance: Option<PedestrianId>,
}

/// Raw motion state of a simulated pedestrian.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PedestrianRecord {
    /// Back-link to the citizen this instance animates.
    pub citizen: Option<HumanId>,
    pub flags: InstanceFlags,
    /// Where the pedestrian is walking towards this tick.
    pub target_position: Position,
    /// Render-smoothed position from the engine.
    pub smooth_position: Position,
    pub smooth_rotation: Rotation,
    pub last_velocity: Displacement,
}

/// Localized activity text plus the object it refers to, if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub text: String,
    pub target: Option<ObjectId>,
}
