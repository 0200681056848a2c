//! Bevy ECS wiring: a tick schedule that records history for every tracked agent.

pub mod app;
pub mod clock;
pub mod schedule;
pub mod systems;

pub use app::{build_track_app, build_track_app_at, build_track_app_with_executor};
pub use clock::SimClock;
pub use schedule::{SimPhase, SimTick, configure_sim_schedule};
pub use systems::{prune_cache, record_history};
