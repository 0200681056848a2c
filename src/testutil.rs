use std::collections::BTreeMap;

use bevy_ecs::resource::Resource;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::{LocationResolver, RecordStore, SimulationClock};
use crate::id::{BuildingId, HumanId, NodeId, ObjectId, PedestrianId, TransitLineId};
use crate::model::{
    Displacement, HumanRecord, InstanceFlags, PedestrianRecord, Position, Rotation, StatusReport,
};

/// In-memory engine with deterministic state, standing in for the host
/// simulation in tests and demos.
#[derive(Resource, Debug, Default, Clone)]
pub struct FakeEngine {
    humans: BTreeMap<HumanId, HumanRecord>,
    names: BTreeMap<HumanId, String>,
    pedestrians: BTreeMap<PedestrianId, PedestrianRecord>,
    prefabs: BTreeMap<PedestrianId, String>,
    statuses: BTreeMap<PedestrianId, StatusReport>,
    buildings: BTreeMap<BuildingId, String>,
    stops: BTreeMap<NodeId, TransitLineId>,
    lines: BTreeMap<TransitLineId, String>,
    reference_tick: u32,
    sub_tick: f32,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Clock --

    pub fn set_time(&mut self, reference_tick: u32, sub_tick: f32) {
        self.reference_tick = reference_tick;
        self.sub_tick = sub_tick;
    }

    // -- Agents --

    pub fn add_human(&mut self, id: HumanId, record: HumanRecord) {
        self.humans.insert(id, record);
    }

    pub fn remove_human(&mut self, id: HumanId) {
        if let Some(pid) = self.humans.remove(&id).and_then(|r| r.instance) {
            self.pedestrians.remove(&pid);
        }
    }

    pub fn human_record_mut(&mut self, id: HumanId) -> Option<&mut HumanRecord> {
        self.humans.get_mut(&id)
    }

    pub fn set_name(&mut self, id: HumanId, name: &str) {
        self.names.insert(id, name.to_string());
    }

    /// Put a citizen on the street at `position`, creating the citizen if needed.
    pub fn spawn_pedestrian(&mut self, citizen: HumanId, id: PedestrianId, position: Position) {
        self.humans.entry(citizen).or_default().instance = Some(id);
        self.pedestrians.insert(
            id,
            PedestrianRecord {
                citizen: Some(citizen),
                flags: InstanceFlags::NONE,
                target_position: position,
                smooth_position: position,
                smooth_rotation: Rotation::IDENTITY,
                last_velocity: Displacement::default(),
            },
        );
    }

    /// Free the instance; the citizen stays, without a moving instance.
    pub fn despawn_pedestrian(&mut self, id: PedestrianId) {
        if let Some(citizen) = self.pedestrians.remove(&id).and_then(|r| r.citizen)
            && let Some(record) = self.humans.get_mut(&citizen)
        {
            record.instance = None;
        }
        self.statuses.remove(&id);
    }

    pub fn pedestrian_record_mut(&mut self, id: PedestrianId) -> Option<&mut PedestrianRecord> {
        self.pedestrians.get_mut(&id)
    }

    /// Move the walking target and the smoothed pose together.
    pub fn move_pedestrian(&mut self, id: PedestrianId, position: Position) {
        if let Some(record) = self.pedestrians.get_mut(&id) {
            record.target_position = position;
            record.smooth_position = position;
        }
    }

    pub fn set_prefab(&mut self, id: PedestrianId, name: &str) {
        self.prefabs.insert(id, name.to_string());
    }

    pub fn set_status(&mut self, id: PedestrianId, text: &str, target: Option<ObjectId>) {
        self.statuses.insert(
            id,
            StatusReport {
                text: text.to_string(),
                target,
            },
        );
    }

    /// Spawn `count` pedestrians at seeded random spots within `extent` of the origin.
    /// Handles are allocated sequentially from 1.
    pub fn scatter(&mut self, seed: u64, count: u16, extent: f32) -> Vec<PedestrianId> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (1..=count)
            .filter_map(|i| Some((HumanId::from_index(u32::from(i))?, PedestrianId::from_index(i)?)))
            .map(|(hid, pid)| {
                let position = Position::new(
                    rng.random_range(-extent..extent),
                    0.0,
                    rng.random_range(-extent..extent),
                );
                self.spawn_pedestrian(hid, pid, position);
                pid
            })
            .collect()
    }

    // -- Places --

    pub fn add_building(&mut self, id: BuildingId, name: &str) {
        self.buildings.insert(id, name.to_string());
    }

    pub fn add_transit_stop(&mut self, node: NodeId, line: TransitLineId, line_name: &str) {
        self.stops.insert(node, line);
        self.lines.insert(line, line_name.to_string());
    }
}

impl SimulationClock for FakeEngine {
    fn reference_tick(&self) -> u32 {
        self.reference_tick
    }

    fn sub_tick(&self) -> f32 {
        self.sub_tick
    }
}

impl RecordStore for FakeEngine {
    fn human(&self, id: HumanId) -> Option<HumanRecord> {
        self.humans.get(&id).copied()
    }

    fn pedestrian(&self, id: PedestrianId) -> Option<PedestrianRecord> {
        self.pedestrians.get(&id).copied()
    }

    fn instance_count(&self) -> u32 {
        self.pedestrians
            .keys()
            .next_back()
            .map_or(1, |pid| u32::from(pid.index()) + 1)
    }

    fn citizen_name(&self, id: HumanId) -> Option<String> {
        self.names.get(&id).cloned()
    }

    fn prefab_name(&self, id: PedestrianId) -> Option<String> {
        self.prefabs.get(&id).cloned()
    }

    fn localized_status(&self, id: PedestrianId) -> Option<StatusReport> {
        self.statuses.get(&id).cloned()
    }
}

impl LocationResolver for FakeEngine {
    fn building_name(&self, id: BuildingId) -> Option<String> {
        self.buildings.get(&id).cloned()
    }

    fn transit_line_of(&self, node: NodeId) -> Option<TransitLineId> {
        self.stops.get(&node).copied()
    }

    fn transit_line_name(&self, id: TransitLineId) -> Option<String> {
        self.lines.get(&id).cloned()
    }
}

/// Fixed clock for queries at an exact render time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedClock {
    pub reference_tick: u32,
    pub sub_tick: f32,
}

impl FixedClock {
    pub fn new(reference_tick: u32, sub_tick: f32) -> Self {
        Self {
            reference_tick,
            sub_tick,
        }
    }
}

impl SimulationClock for FixedClock {
    fn reference_tick(&self) -> u32 {
        self.reference_tick
    }

    fn sub_tick(&self) -> f32 {
        self.sub_tick
    }
}
