//! Position history and look-ahead facing for simulated agents.
//!
//! The simulation records each tracked pedestrian's walking target once per
//! tick into a four-slot ring ([`history`]). Renderers then ask for a pose at
//! any time between ticks and get the engine's smoothed position with a facing
//! turned towards where the agent will be shortly ([`predictor`]). Wrappers are
//! handed out by [`object::AgentCache`], one per live handle.

pub mod config;
pub mod ecs;
pub mod engine;
pub mod flush;
pub mod history;
pub mod id;
pub mod model;
pub mod object;
pub mod overlay;
pub mod predictor;
pub mod testutil;

pub use config::LookAheadConfig;
pub use engine::{Color32, LocationResolver, OverlaySink, RecordStore, SimulationClock};
pub use history::HistoryBuffer;
pub use id::{BuildingId, HumanId, NodeId, ObjectId, PedestrianId, TransitLineId, VehicleId};
pub use model::{Angle, Displacement, Position, Positioning, Rotation};
pub use object::{AgentCache, Citizen, Human, Pedestrian};
