use serde::{Deserialize, Serialize};

use crate::config::LookAheadConfig;
use crate::engine::{Color32, OverlaySink, RecordStore, SimulationClock};
use crate::history::{SLOT_COUNT, TICKS_PER_SLOT};
use crate::model::Position;
use crate::object::Pedestrian;
use crate::predictor;

/// Colour of the `age`-th history circle, fading from red towards yellow-white.
pub fn history_color(age: u8) -> Color32 {
    Color32::rgba(255, 100 + 50 * age, 64 * age, 255)
}

/// Radius of the `age`-th history circle, shrinking a quarter per window.
pub fn history_radius(base: f32, age: u8) -> f32 {
    base * (1.0 - 0.25 * f32::from(age))
}

/// Draw the look-ahead debug view for one pedestrian.
///
/// Emits the four history samples behind the target tick (newest first), an
/// arrow along the engine's own facing, an arrow to the aim point and, when the
/// aim point is far enough away, an arrow along the blended facing. Returns
/// `false` without drawing if the pedestrian is gone from the engine.
pub fn render_overlay(
    pedestrian: &Pedestrian,
    clock: &dyn SimulationClock,
    store: &dyn RecordStore,
    config: &LookAheadConfig,
    sink: &mut dyn OverlaySink,
) -> bool {
    let Some(base) = pedestrian.base_positioning(store) else {
        return false;
    };
    let target = pedestrian.target_tick(clock);

    for age in 0..SLOT_COUNT as u8 {
        let tick = target.wrapping_sub(TICKS_PER_SLOT * u32::from(age));
        sink.circle(
            pedestrian.history().read(tick),
            history_color(age),
            history_radius(config.circle_radius, age),
        );
    }

    let origin = base.position;
    let facing = origin.moved(base.angle.to_displacement(config.arrow_length));
    sink.arrow(origin, facing, Color32::BLUE);

    let aim = pedestrian.smooth_look_position(clock);
    sink.arrow(origin, aim, Color32::RED);

    if origin.displacement_to(aim).distance() > config.turn_threshold {
        let blended = predictor::blend_facing(base, aim, config);
        let look = origin.moved(blended.angle.to_displacement(config.arrow_length));
        sink.arrow(origin, look, Color32::MAGENTA);
    }
    true
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum OverlayPrimitive {
    Circle {
        center: Position,
        color: Color32,
        radius: f32,
    },
    Arrow {
        from: Position,
        to: Position,
        color: Color32,
    },
}

/// Sink that keeps every draw call, for inspection or export.
#[derive(Debug, Clone, Default)]
pub struct RecordingOverlay {
    pub primitives: Vec<OverlayPrimitive>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &OverlayPrimitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, OverlayPrimitive::Circle { .. }))
    }

    pub fn arrows(&self) -> impl Iterator<Item = &OverlayPrimitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, OverlayPrimitive::Arrow { .. }))
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }
}

impl OverlaySink for RecordingOverlay {
    fn circle(&mut self, center: Position, color: Color32, radius: f32) {
        self.primitives.push(OverlayPrimitive::Circle {
            center,
            color,
            radius,
        });
    }

    fn arrow(&mut self, from: Position, to: Position, color: Color32) {
        self.primitives
            .push(OverlayPrimitive::Arrow { from, to, color });
    }
}
