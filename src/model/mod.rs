pub mod record;
pub mod transform;

pub use record::{HumanFlags, HumanRecord, InstanceFlags, PedestrianRecord, StatusReport};
pub use transform::{Angle, Displacement, Position, Positioning, Rotation};
