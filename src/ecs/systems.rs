use bevy_ecs::resource::Resource;
use bevy_ecs::system::Res;

use super::clock::SimClock;
use crate::engine::RecordStore;
use crate::object::AgentCache;

/// Write this tick's target position into every cached pedestrian's history.
pub fn record_history<S: RecordStore + Resource>(
    clock: Res<SimClock>,
    store: Res<S>,
    cache: Res<AgentCache>,
) {
    let recorded = cache.record_tick(&*store, clock.reference_tick);
    tracing::trace!(tick = clock.reference_tick, recorded, "history recorded");
}

/// Drop wrappers whose handles the engine has freed or repurposed.
pub fn prune_cache<S: RecordStore + Resource>(store: Res<S>, cache: Res<AgentCache>) {
    cache.prune(&*store);
}
