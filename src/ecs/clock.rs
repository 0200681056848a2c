use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use crate::engine::SimulationClock;

/// Simulation clock resource: reference tick plus render progress within it.
///
/// The `advance_clock` system moves the clock forward at the end of each tick
/// (in `SimPhase::Last`), so systems see the current tick before it advances.
/// Renderers set `sub_tick` between ticks.
#[derive(Resource, Debug, Clone, Default)]
pub struct SimClock {
    pub reference_tick: u32,
    pub sub_tick: f32,
    pub tick_count: u64,
}

impl SimClock {
    pub fn new(reference_tick: u32) -> Self {
        Self {
            reference_tick,
            ..Self::default()
        }
    }

    /// Advance by one tick. The reference tick wraps; the count does not.
    pub fn advance(&mut self) {
        self.reference_tick = self.reference_tick.wrapping_add(1);
        self.sub_tick = 0.0;
        self.tick_count += 1;
    }

    /// Set render progress through the current tick, clamped to `[0, 1)`.
    pub fn set_sub_tick(&mut self, progress: f32) {
        self.sub_tick = progress.clamp(0.0, 1.0 - f32::EPSILON);
    }
}

impl SimulationClock for SimClock {
    fn reference_tick(&self) -> u32 {
        self.reference_tick
    }

    fn sub_tick(&self) -> f32 {
        self.sub_tick
    }
}

/// Bevy system that advances the simulation clock by one tick.
/// Registered in `SimPhase::Last` so all other systems see the current
/// tick before it advances.
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
