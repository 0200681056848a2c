use bevy_app::App;
use bevy_ecs::resource::Resource;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};

use super::clock::SimClock;
use super::schedule::{SimPhase, configure_sim_schedule};
use super::systems::{prune_cache, record_history};
use crate::config::LookAheadConfig;
use crate::engine::RecordStore;
use crate::object::AgentCache;

/// Build a headless Bevy app that keeps agent history in step with `store`.
///
/// Manual tick control:
/// ```no_run
/// # use agent_track::ecs::{build_track_app, SimTick};
/// # use agent_track::testutil::FakeEngine;
/// let mut app = build_track_app(FakeEngine::new());
/// for _ in 0..64 {
///     app.world_mut().run_schedule(SimTick);
/// }
/// ```
pub fn build_track_app<S: RecordStore + Resource>(store: S) -> App {
    build_track_app_at(store, 0)
}

/// Build a headless Bevy app whose clock starts at `start_tick`.
pub fn build_track_app_at<S: RecordStore + Resource>(store: S, start_tick: u32) -> App {
    build_track_app_with_executor(store, start_tick, ExecutorKind::MultiThreaded)
}

/// Build a headless Bevy app with a specific executor kind.
pub fn build_track_app_with_executor<S: RecordStore + Resource>(
    store: S,
    start_tick: u32,
    executor: ExecutorKind,
) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(SimClock::new(start_tick));
    app.insert_resource(AgentCache::new());
    app.insert_resource(LookAheadConfig::default());
    app.insert_resource(store);

    // Prune before recording so freed handles never receive a sample.
    let mut schedule = configure_sim_schedule(executor);
    schedule.add_systems(
        (prune_cache::<S>, record_history::<S>)
            .chain()
            .in_set(SimPhase::PostUpdate),
    );
    app.add_schedule(schedule);
    app
}
