use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for the main simulation tick.
/// Run manually each tick via `app.world_mut().run_schedule(SimTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimTick;

/// Ordered phases within each simulation tick.
///
/// Host systems that move agents go in `Update`; history is recorded in
/// `PostUpdate` from whatever `Update` left behind.
/// Phases run in declaration order: PreUpdate < Update < PostUpdate < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Last,
}

/// Build a configured `SimTick` schedule with phase ordering.
pub fn configure_sim_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(SimTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            SimPhase::PreUpdate,
            SimPhase::Update,
            SimPhase::PostUpdate,
            SimPhase::Last,
        )
            .chain(),
    );
    schedule.add_systems(advance_clock.in_set(SimPhase::Last));
    schedule
}
