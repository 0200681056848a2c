use std::fmt;

use serde::{Deserialize, Serialize};

// Index 0 is the null handle in every engine buffer, so constructors go
// through `from_index` and reject it.
macro_rules! object_id {
    ($name:ident, $index:ty, $label:literal) => {
        #[doc = concat!("Handle to a ", $label, " slot in the engine's buffer.")]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name($index);

        impl $name {
            pub fn from_index(index: $index) -> Option<Self> {
                (index != 0).then_some(Self(index))
            }

            pub fn index(self) -> $index {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $label, self.0)
            }
        }
    };
}

object_id!(HumanId, u32, "human");
object_id!(PedestrianId, u16, "pedestrian");
object_id!(VehicleId, u16, "vehicle");
object_id!(BuildingId, u16, "building");
object_id!(NodeId, u16, "node");
object_id!(TransitLineId, u16, "transit line");

/// Any engine object a query can refer to.
///
/// Status queries hand back one of these for the place an agent is heading to;
/// callers match on the kind instead of downcasting.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ObjectId {
    Human(HumanId),
    Pedestrian(PedestrianId),
    Vehicle(VehicleId),
    Building(BuildingId),
    Node(NodeId),
    TransitLine(TransitLineId),
}

impl From<HumanId> for ObjectId {
    fn from(id: HumanId) -> Self {
        Self::Human(id)
    }
}

impl From<PedestrianId> for ObjectId {
    fn from(id: PedestrianId) -> Self {
        Self::Pedestrian(id)
    }
}

impl From<BuildingId> for ObjectId {
    fn from(id: BuildingId) -> Self {
        Self::Building(id)
    }
}

impl From<NodeId> for ObjectId {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human(id) => fmt::Display::fmt(id, f),
            Self::Pedestrian(id) => fmt::Display::fmt(id, f),
            Self::Vehicle(id) => fmt::Display::fmt(id, f),
            Self::Building(id) => fmt::Display::fmt(id, f),
            Self::Node(id) => fmt::Display::fmt(id, f),
            Self::TransitLine(id) => fmt::Display::fmt(id, f),
        }
    }
}
