use agent_track::model::Position;
use agent_track::testutil::FakeEngine;
use agent_track::{HumanId, PedestrianId};

pub fn hid(index: u32) -> HumanId {
    HumanId::from_index(index).unwrap()
}

pub fn pid(index: u16) -> PedestrianId {
    PedestrianId::from_index(index).unwrap()
}

/// One citizen (#1) walking as pedestrian #1, standing at the origin.
pub fn single_walker() -> FakeEngine {
    let mut engine = FakeEngine::new();
    engine.spawn_pedestrian(hid(1), pid(1), Position::ORIGIN);
    engine
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
