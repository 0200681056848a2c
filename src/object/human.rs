use crate::config::LookAheadConfig;
use crate::engine::{RecordStore, SimulationClock};
use crate::history::HistoryBuffer;
use crate::id::{BuildingId, HumanId, PedestrianId, VehicleId};
use crate::model::{Angle, HumanFlags, HumanRecord, Position, Positioning};
use crate::predictor;

/// A citizen's static attributes, captured when the wrapper was built.
#[derive(Debug, Clone)]
pub struct Citizen {
    id: HumanId,
    record: HumanRecord,
}

impl Citizen {
    pub(crate) fn new(id: HumanId, record: HumanRecord) -> Self {
        Self { id, record }
    }

    pub fn id(&self) -> HumanId {
        self.id
    }

    /// The engine record this wrapper was built from.
    pub fn record(&self) -> &HumanRecord {
        &self.record
    }

    pub fn is_tourist(&self) -> bool {
        self.record.flags.contains(HumanFlags::TOURIST)
    }

    pub fn is_student(&self) -> bool {
        self.record.flags.contains(HumanFlags::STUDENT)
    }

    pub fn ridden_vehicle(&self) -> Option<VehicleId> {
        self.record.vehicle
    }

    pub fn work_building(&self) -> Option<BuildingId> {
        self.record.work
    }

    pub fn home_building(&self) -> Option<BuildingId> {
        self.record.home
    }
}

/// A citizen that is currently instantiated and moving, with its position history.
#[derive(Debug)]
pub struct Pedestrian {
    citizen: Citizen,
    pedestrian_id: PedestrianId,
    history: HistoryBuffer,
}

impl Pedestrian {
    /// Every history slot starts at `seed`, so the new wrapper shows no motion.
    pub(crate) fn new(citizen: Citizen, pedestrian_id: PedestrianId, seed: Position) -> Self {
        Self {
            citizen,
            pedestrian_id,
            history: HistoryBuffer::seeded(seed),
        }
    }

    pub fn citizen(&self) -> &Citizen {
        &self.citizen
    }

    pub fn pedestrian_id(&self) -> PedestrianId {
        self.pedestrian_id
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Store this tick's walking target. Returns `false` if the instance is gone.
    pub fn record_tick(&self, store: &dyn RecordStore, tick: u32) -> bool {
        match store.pedestrian(self.pedestrian_id) {
            Some(record) => {
                self.history.record(tick, record.target_position);
                tracing::trace!(pedestrian = %self.pedestrian_id, tick, "recorded target position");
                true
            }
            None => false,
        }
    }

    pub fn target_tick(&self, clock: &dyn SimulationClock) -> u32 {
        predictor::target_tick(clock.reference_tick(), self.pedestrian_id.index())
    }

    /// Where the pedestrian is heading at the clock's current render time.
    pub fn smooth_look_position(&self, clock: &dyn SimulationClock) -> Position {
        predictor::aim_point(&self.history, self.target_tick(clock), clock.sub_tick())
    }

    /// The engine's own smoothed pose, before any look-ahead.
    pub fn base_positioning(&self, store: &dyn RecordStore) -> Option<Positioning> {
        let record = store.pedestrian(self.pedestrian_id)?;
        Some(Positioning::new(
            record.smooth_position,
            Angle::from_rotation(record.smooth_rotation),
        ))
    }

    /// Smoothed pose with facing turned towards the look-ahead aim point.
    pub fn positioning(
        &self,
        clock: &dyn SimulationClock,
        store: &dyn RecordStore,
        config: &LookAheadConfig,
    ) -> Option<Positioning> {
        let base = self.base_positioning(store)?;
        let aim = self.smooth_look_position(clock);
        Some(predictor::blend_facing(base, aim, config))
    }
}

/// A tracked agent: either moving with history, or only static attributes.
#[derive(Debug)]
pub enum Human {
    Pedestrian(Pedestrian),
    Citizen(Citizen),
}

impl Human {
    pub fn citizen(&self) -> &Citizen {
        match self {
            Human::Pedestrian(ped) => &ped.citizen,
            Human::Citizen(citizen) => citizen,
        }
    }

    pub fn id(&self) -> HumanId {
        self.citizen().id
    }

    pub fn has_motion_history(&self) -> bool {
        matches!(self, Human::Pedestrian(_))
    }

    pub fn is_static_only(&self) -> bool {
        matches!(self, Human::Citizen(_))
    }

    /// Prediction operations are only available on the moving variant.
    pub fn as_pedestrian(&self) -> Option<&Pedestrian> {
        match self {
            Human::Pedestrian(ped) => Some(ped),
            Human::Citizen(_) => None,
        }
    }

    pub(crate) fn pedestrian_id(&self) -> Option<PedestrianId> {
        self.as_pedestrian().map(|ped| ped.pedestrian_id)
    }
}
