//! Look-ahead prediction over an agent's position history.
//!
//! Agents are sampled at a per-agent phase behind the reference tick. The aim
//! point slides between two neighbouring history windows as render time moves
//! through a tick, and the agent's facing is turned towards it.

use crate::config::LookAheadConfig;
use crate::history::{HistoryBuffer, TICKS_PER_SLOT};
use crate::model::{Angle, Position, Positioning};

/// Per-agent lag behind the reference tick, in `0..=15` for 16-bit indices.
pub fn phase_offset(index: u16) -> u32 {
    (u32::from(index) << 4) / 65536
}

/// Tick at which an agent's history is sampled. Wraps with the tick counter.
pub fn target_tick(reference_tick: u32, index: u16) -> u32 {
    reference_tick.wrapping_sub(phase_offset(index))
}

/// Interpolation weight between the previous and current windows.
pub fn window_fraction(target_tick: u32, sub_tick: f32) -> f32 {
    ((target_tick & (TICKS_PER_SLOT - 1)) as f32 + sub_tick) / TICKS_PER_SLOT as f32
}

/// Predicted near-future position for an agent sampled at `target_tick`.
pub fn aim_point(history: &HistoryBuffer, target_tick: u32, sub_tick: f32) -> Position {
    let earlier = history.read(target_tick.wrapping_sub(TICKS_PER_SLOT));
    let later = history.read(target_tick);
    Position::lerp(earlier, later, window_fraction(target_tick, sub_tick))
}

/// Turn `base` towards `aim`.
///
/// The base pose is returned untouched when the aim point is within the
/// threshold, so nearly stationary agents do not jitter.
pub fn blend_facing(base: Positioning, aim: Position, config: &LookAheadConfig) -> Positioning {
    let towards = base.position.displacement_to(aim);
    if towards.distance() > config.turn_threshold {
        let angle = Angle::lerp(base.angle, towards.as_looking_angle(), config.turn_blend);
        Positioning::new(base.position, angle)
    } else {
        base
    }
}
